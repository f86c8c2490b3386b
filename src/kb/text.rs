//! Text normalization and script detection shared by the matcher and reply rules
//!
//! Matching works on a canonical form of the text: NFC-composed, lowercased,
//! and reduced to Latin letters, digits, whitespace and Devanagari. Everything
//! else (punctuation, symbols, other scripts) becomes a space, so tokens are
//! simply the whitespace-separated runs of the normalized string.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

/// First code point of the Devanagari block
const DEVANAGARI_START: char = '\u{0900}';
/// Last code point of the Devanagari block
const DEVANAGARI_END: char = '\u{097F}';

/// Reply language chosen for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
}

impl Language {
    /// ISO 639-1 code
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => f.write_str("English"),
            Self::Hindi => f.write_str("Hindi"),
        }
    }
}

#[inline]
pub fn is_devanagari(c: char) -> bool {
    (DEVANAGARI_START..=DEVANAGARI_END).contains(&c)
}

/// Hindi as soon as a single Devanagari character is present
pub fn detect_language(text: &str) -> Language {
    if text.chars().any(is_devanagari) {
        Language::Hindi
    } else {
        Language::English
    }
}

/// Canonical matching form of `text`
///
/// Output contains only `a-z`, `0-9`, whitespace and U+0900..=U+097F.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || is_devanagari(c)
            {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Token set of an already normalized string
pub fn token_set(normalized: &str) -> BTreeSet<String> {
    normalized.split_whitespace().map(str::to_owned).collect()
}

/// Normalize then split into a token set
pub fn tokenize(text: &str) -> BTreeSet<String> {
    token_set(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Sandy SOIL, crop?"), "sandy soil  crop ");
    }

    #[test]
    fn test_normalize_keeps_devanagari_and_digits() {
        assert_eq!(normalize("गेहूं: HD 2967!"), "गेहूं  hd 2967 ");
    }

    #[test]
    fn test_normalize_drops_non_latin_letters() {
        // accented Latin, Greek and emoji are not part of the matching alphabet
        assert_eq!(normalize("café ß 🌾"), "caf     ");
    }

    #[test]
    fn test_normalize_composes_before_filtering() {
        // "e" + combining acute composes to U+00E9 which is then replaced as a whole
        assert_eq!(normalize("e\u{0301}x"), " x");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert!(tokenize("?!... ,;--").is_empty());
    }

    #[test]
    fn test_tokenize_collapses_duplicates() {
        let tokens = tokenize("soil soil SOIL test");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("soil"));
        assert!(tokens.contains("test"));
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("which crop for sandy soil"), Language::English);
        assert_eq!(detect_language("काली मिट्टी"), Language::Hindi);
        // presence, not majority
        assert_eq!(detect_language("best crop for black soil मिट्टी"), Language::Hindi);
        assert_eq!(detect_language(""), Language::English);
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Hindi.code(), "hi");
    }
}
