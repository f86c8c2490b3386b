//! Chat reply composition
//!
//! Without a remote model the reply is the knowledge-base answer, then a
//! canned answer for the first keyword group found in the message, then a
//! clarifying prompt. With a model configured it is asked first and any
//! failure drops back to the same chain.

use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use super::text;
use super::KnowledgeBase;
use crate::llm::ChatMessage;
use crate::llm::LlmService;

/// Asked when neither the catalog nor a keyword group recognises the message
pub const CLARIFY_REPLY: &str =
    "I noted your query. Could you clarify the crop or topic (soil, weather, mandi, insurance)?";

/// Keyword group with its canned reply
struct KeywordRule {
    topic: &'static str,
    keywords: &'static [&'static str],
    reply: &'static str,
}

/// Checked in order, first hit wins
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        topic: "soil (hi)",
        keywords: &["मिट्टी", "उर्वरता"],
        reply: "मिट्टी pH 6.0-7.5 रखें, जैविक खाद व फसल चक्र अपनाएँ। किस फसल की योजना है?",
    },
    KeywordRule {
        topic: "weather (hi)",
        keywords: &["मौसम", "बारिश", "तापमान"],
        reply: "अगले 24 घंटे में सम्भव वर्षा। जल निकासी जाँचें। कौनसी फसल पर सलाह चाहिए?",
    },
    KeywordRule {
        topic: "mandi (hi)",
        keywords: &["मंडी", "भाव", "दर"],
        reply: "आज का उदाहरण मंडी भाव (चावल) ₹2200/क्विंटल (सांकेतिक)। अन्य फसल पूछें।",
    },
    KeywordRule {
        topic: "insurance (hi)",
        keywords: &["बीमा", "फसल बीमा", "दावा"],
        reply: "फसल बीमा सूखा/बाढ़ हानि कवर करता। कृपया फसल व क्षेत्र बताएँ।",
    },
    KeywordRule {
        topic: "greeting (hi)",
        keywords: &["नमस्ते", "प्रणाम"],
        reply: "नमस्ते! मैं खेतगुरु हूँ। मुझसे मिट्टी, मौसम, मंडी भाव, बीमा या कीट प्रबंधन पूछें।",
    },
    KeywordRule {
        topic: "soil",
        keywords: &["soil", "ph", "fertilizer"],
        reply: "For healthy soil keep pH 6.0-7.5 and add organic compost. What crop are you planning?",
    },
    KeywordRule {
        topic: "weather",
        keywords: &["weather", "rain", "temperature"],
        reply: "Upcoming 24h: possible showers. Consider drainage check. Need crop-specific advice?",
    },
    KeywordRule {
        topic: "mandi",
        keywords: &["mandi", "price", "rate"],
        reply: "Today's sample mandi rate for rice is ₹2200/quintal (illustrative). Want another crop?",
    },
    KeywordRule {
        topic: "insurance",
        keywords: &["insurance", "claim", "policy"],
        reply: "Crop insurance helps against drought & flood. I can outline typical coverage if you share crop & area.",
    },
    KeywordRule {
        topic: "greeting",
        keywords: &["hello", "hi", "namaste"],
        reply: "Namaste! I'm KhetGuru. Ask me about soil, weather, crops, insurance, or mandi rates.",
    },
];

/// Reply without a remote model; never fails
pub fn compose_rule_based(kb: &KnowledgeBase, message: &str) -> String {
    if let Some(found) = kb.find_answer(message) {
        return found.answer.to_string();
    }

    let lowered = message.to_lowercase();
    for rule in KEYWORD_RULES {
        if rule.keywords.iter().any(|k| lowered.contains(k)) {
            debug!("Keyword reply: {}", rule.topic);
            return rule.reply.to_string();
        }
    }

    CLARIFY_REPLY.to_string()
}

/// Chat front end shared by the API and the CLI
#[derive(Debug, Clone)]
pub struct ReplyComposer {
    kb: Arc<KnowledgeBase>,
    llm: Option<Arc<LlmService>>,
}

impl ReplyComposer {
    pub fn new(kb: Arc<KnowledgeBase>, llm: Option<Arc<LlmService>>) -> Self {
        Self { kb, llm }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Model reply when available, rule-based reply otherwise
    pub async fn reply(&self, message: &str, history: &[ChatMessage]) -> String {
        if let Some(llm) = &self.llm {
            let language = text::detect_language(message);
            match llm.chat(message, history, language).await {
                Ok(reply) => return reply,
                Err(e) => warn!("LLM reply failed, using knowledge base: {}", e),
            }
        }
        compose_rule_based(&self.kb, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;

    fn builtin() -> KnowledgeBase {
        KnowledgeBase::builtin().unwrap()
    }

    #[test]
    fn test_catalog_answer_takes_priority() {
        let reply = compose_rule_based(&builtin(), "sandy soil crop");
        assert_eq!(
            reply,
            "Sandy soil is best for groundnut, potato, watermelon, and pulses."
        );
    }

    #[test]
    fn test_english_keyword_groups() {
        let kb = builtin();
        assert!(compose_rule_based(&kb, "hello").starts_with("Namaste! I'm KhetGuru."));
        assert!(compose_rule_based(&kb, "Namaste").starts_with("Namaste! I'm KhetGuru."));
        assert!(compose_rule_based(&kb, "tell me about the weather").starts_with("Upcoming 24h"));
        assert!(compose_rule_based(&kb, "fertilizer").starts_with("For healthy soil"));
        assert!(compose_rule_based(&kb, "insurance claim").starts_with("Crop insurance helps"));
    }

    #[test]
    fn test_hindi_greeting() {
        let reply = compose_rule_based(&builtin(), "नमस्ते");
        assert!(reply.starts_with("नमस्ते! मैं खेतगुरु हूँ।"));
    }

    #[test]
    fn test_group_order() {
        let kb = KnowledgeBase::from_json_str(
            r#"[{"patterns": ["zzzz"], "answer_en": "z", "answer_hi": "ज़"}]"#,
        )
        .unwrap();
        // soil is checked before greetings
        assert!(compose_rule_based(&kb, "hello, soil question").starts_with("For healthy soil"));
        // Hindi groups are checked before English ones
        assert!(compose_rule_based(&kb, "weather मौसम").starts_with("अगले 24 घंटे"));
    }

    #[test]
    fn test_unknown_message_asks_to_clarify() {
        assert_eq!(compose_rule_based(&builtin(), "xyzzy"), CLARIFY_REPLY);
        assert_eq!(compose_rule_based(&builtin(), ""), CLARIFY_REPLY);
    }

    #[tokio::test]
    async fn test_composer_without_llm() {
        let composer = ReplyComposer::new(Arc::new(builtin()), None);
        assert!(!composer.llm_enabled());
        assert_eq!(composer.reply("xyzzy", &[]).await, CLARIFY_REPLY);
    }

    #[tokio::test]
    async fn test_composer_falls_back_when_llm_fails() {
        let llm = LlmService::new(&LlmConfig {
            api_key: Some("sk-test".to_string()),
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..LlmConfig::default()
        })
        .unwrap();
        let composer = ReplyComposer::new(Arc::new(builtin()), Some(Arc::new(llm)));

        let reply = composer.reply("sandy soil crop", &[]).await;
        assert!(reply.starts_with("Sandy soil is best"));
    }
}
