//! Matching predicates over vector identifiers.

use regex::Regex;

use crate::error::CoreError;

/// Predicate selecting vectors by their identifier.
///
/// Matching is unanchored: a regex or literal matches anywhere in the
/// identifier unless the pattern anchors itself.
#[derive(Debug, Clone)]
pub enum VectorPattern {
    /// Regular expression searched within the identifier.
    Regex(Regex),
    /// Plain substring.
    Literal(String),
}

impl VectorPattern {
    /// Compile a regular expression pattern.
    pub fn regex(pattern: &str) -> Result<Self, CoreError> {
        Regex::new(pattern)
            .map(Self::Regex)
            .map_err(|source| CoreError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Substring pattern.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Whether `vector` matches.
    #[must_use]
    pub fn is_match(&self, vector: &str) -> bool {
        match self {
            Self::Regex(re) => re.is_match(vector),
            Self::Literal(text) => vector.contains(text.as_str()),
        }
    }

    /// Source text of the pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Regex(re) => re.as_str(),
            Self::Literal(text) => text,
        }
    }
}

impl std::fmt::Display for VectorPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
            Self::Literal(text) => write!(f, "\"{}\"", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_is_unanchored() {
        let pattern = VectorPattern::regex("_indicative_mood").unwrap();
        assert!(pattern.is_match("active_voice_indicative_mood"));
        assert!(pattern.is_match("active_voice_indicative_mood_present_tense"));
        assert!(!pattern.is_match("active_voice_subjunctive_mood"));
    }

    #[test]
    fn test_literal_substring() {
        let pattern = VectorPattern::literal("passive_voice_imperative_mood_present_tense");
        assert!(pattern.is_match(
            "passive_voice_imperative_mood_present_tense_singular_number_first_person"
        ));
        assert!(!pattern.is_match("active_voice_imperative_mood_present_tense"));
    }

    #[test]
    fn test_invalid_regex() {
        let err = VectorPattern::regex("(unclosed").unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_display() {
        assert_eq!(VectorPattern::regex(".*_mood").unwrap().to_string(), "/.*_mood/");
        assert_eq!(VectorPattern::literal("tense").to_string(), "\"tense\"");
    }
}
