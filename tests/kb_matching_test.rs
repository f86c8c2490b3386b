//! Knowledge base behavior against the built-in catalog

use khetguru::kb::compose_rule_based;
use khetguru::kb::Language;
use khetguru::KnowledgeBase;

fn kb() -> KnowledgeBase {
    KnowledgeBase::builtin().expect("built-in catalog must load")
}

#[test]
fn test_sandy_soil_query() {
    let kb = kb();
    let found = kb.find_answer("sandy soil crop").unwrap();
    assert_eq!(found.entry_index, 0);
    assert_eq!(found.score, 3);
    assert_eq!(found.language, Language::English);
    assert_eq!(
        found.answer,
        "Sandy soil is best for groundnut, potato, watermelon, and pulses."
    );
}

#[test]
fn test_hindi_black_soil_query() {
    let kb = kb();
    let found = kb.find_answer("काली मिट्टी").unwrap();
    assert_eq!(found.language, Language::Hindi);
    assert_eq!(found.answer, "कपास, सोयाबीन और सूरजमुखी काली मिट्टी के लिए आदर्श हैं।");

    let english = kb.find_answer("black soil").unwrap();
    assert_eq!(english.entry_index, found.entry_index);
    assert_eq!(
        english.answer,
        "Cotton, soybean, and sunflower are ideal for black soil."
    );
}

#[test]
fn test_order_case_and_punctuation_do_not_matter() {
    let kb = kb();
    let plain = kb.find_answer("sandy soil crop").unwrap();
    let noisy = kb.find_answer("Crop, SOIL... sandy!!").unwrap();
    assert_eq!(plain.entry_index, noisy.entry_index);
    assert_eq!(plain.score, noisy.score);
}

#[test]
fn test_punctuation_only_query_has_no_match() {
    let kb = kb();
    assert!(kb.find_answer("???").is_none());
    assert!(kb.find_answer("").is_none());
}

#[test]
fn test_matching_is_deterministic() {
    let kb = kb();
    for query in ["what is drip irrigation", "mandi price", "wheat variety", "गेहूं किस्म"] {
        let first = kb.find_answer(query).map(|m| (m.entry_index, m.score));
        let second = kb.find_answer(query).map(|m| (m.entry_index, m.score));
        assert!(first.is_some(), "no match for {query}");
        assert_eq!(first, second);
    }
}

#[test]
fn test_drip_irrigation_prefers_longest_pattern() {
    let kb = kb();
    let found = kb.find_answer("what is drip irrigation").unwrap();
    assert_eq!(found.score, 4);
}

#[test]
fn test_wheat_variety_bilingual() {
    let kb = kb();
    let en = kb.find_answer("wheat variety").unwrap();
    let hi = kb.find_answer("गेहूं किस्म").unwrap();
    assert_eq!(en.entry_index, hi.entry_index);
    assert_eq!(hi.language, Language::Hindi);
    assert_ne!(en.answer, hi.answer);
}

#[test]
fn test_reply_chain_falls_through_to_keywords() {
    let kb = kb();
    assert!(kb.find_answer("hello").is_none());
    assert!(compose_rule_based(&kb, "hello").contains("KhetGuru"));
    assert!(compose_rule_based(&kb, "नमस्ते").contains("खेतगुरु"));
    assert!(compose_rule_based(&kb, "xyzzy").contains("clarify"));
}
