//! The vector set engine.
//!
//! A [`VectorSet`] holds the ordered vectors currently valid plus the sorted
//! list of every aspect used to build them. Operations read the whole set and
//! replace it; there is no interior mutability and no sharing while a set is
//! being built.
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`VectorSet::expand_all`] | Cartesian product of every vector with every new token |
//! | [`VectorSet::refine_where`] | Product applied only to vectors matching a pattern |
//! | [`VectorSet::remove_matching`] | Drop vectors matching a pattern |
//! | [`VectorSet::vectors_up_to_aspect`] | Distinct prefixes ending at an aspect |

use crate::aspect::{combinatorialize, AspectSpec, Position};
use crate::error::CoreError;
use crate::pattern::VectorPattern;
use crate::TOKEN_SEPARATOR;

/// Ordered set of vectors and the aspects that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorSet {
    vectors: Vec<String>,
    aspects: Vec<String>,
}

impl VectorSet {
    /// Create an empty vector set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vectors: Vec::new(),
            aspects: Vec::new(),
        }
    }

    /// Vectors in their current order.
    #[must_use]
    pub fn vectors(&self) -> &[String] {
        &self.vectors
    }

    /// Every aspect used so far, deduplicated and sorted.
    #[must_use]
    pub fn aspect_list(&self) -> &[String] {
        &self.aspects
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    #[must_use]
    pub fn contains(&self, vector: &str) -> bool {
        self.vectors.iter().any(|v| v == vector)
    }

    /// Copy of every vector matching `pattern`, in set order.
    #[must_use]
    pub fn matching(&self, pattern: &VectorPattern) -> Vec<String> {
        self.vectors
            .iter()
            .filter(|v| pattern.is_match(v))
            .cloned()
            .collect()
    }

    /// Full cartesian expansion.
    ///
    /// Each `(aspect, values)` pair in `spec` is applied in turn: an empty set
    /// becomes the pair's tokens, otherwise every existing vector (outer) is
    /// joined with every token (inner). Tokens are always appended on the
    /// right, so `position` is advisory only.
    pub fn expand_all(&mut self, spec: &AspectSpec, _position: Position) {
        for (aspect, values) in spec.iter() {
            let tokens = combinatorialize(aspect, values);

            self.vectors = if self.vectors.is_empty() {
                tokens
            } else {
                cross(&self.vectors, &tokens)
            };

            self.record_aspect(aspect);
        }
    }

    /// Expand only the vectors matching `pattern`.
    ///
    /// Matched vectors are replaced by their product with the tokens of the
    /// FIRST pair in `spec`. Any further pairs are ignored: refinement has
    /// always consumed a single entry and existing declarations depend on
    /// that, so multi-entry specifications are truncated rather than
    /// rejected. The resulting set is sorted and deduplicated.
    ///
    /// Returns the number of vectors that matched.
    pub fn refine_where(
        &mut self,
        pattern: &VectorPattern,
        spec: &AspectSpec,
    ) -> Result<usize, CoreError> {
        let (aspect, values) = spec.first().ok_or(CoreError::EmptySpecification)?;
        let tokens = combinatorialize(aspect, values);

        let (matched, unmatched): (Vec<String>, Vec<String>) = self
            .vectors
            .drain(..)
            .partition(|v| pattern.is_match(v));

        let mut refined = unmatched;
        refined.extend(cross(&matched, &tokens));
        refined.sort();
        refined.dedup();

        self.vectors = refined;
        self.record_aspect(aspect);

        Ok(matched.len())
    }

    /// Remove every vector matching `pattern`, returning how many went.
    pub fn remove_matching(&mut self, pattern: &VectorPattern) -> usize {
        let before = self.vectors.len();
        self.vectors.retain(|v| !pattern.is_match(v));
        before - self.vectors.len()
    }

    /// Distinct vector prefixes ending at the first occurrence of `aspect`.
    ///
    /// Vectors not containing `aspect` are skipped. Everything right of the
    /// first occurrence is discarded, results that are empty or not made of
    /// identifier characters are dropped, and the rest is sorted and
    /// deduplicated.
    #[must_use]
    pub fn vectors_up_to_aspect(&self, aspect: &str) -> Vec<String> {
        let mut prefixes: Vec<String> = self
            .vectors
            .iter()
            .filter_map(|v| v.find(aspect).map(|start| &v[..start + aspect.len()]))
            .filter(|prefix| is_identifier(prefix))
            .map(str::to_string)
            .collect();

        prefixes.sort();
        prefixes.dedup();
        prefixes
    }

    fn record_aspect(&mut self, aspect: &str) {
        if let Err(index) = self.aspects.binary_search_by(|a| a.as_str().cmp(aspect)) {
            self.aspects.insert(index, aspect.to_string());
        }
        debug_assert!(self.aspects.windows(2).all(|w| w[0] < w[1]));
    }
}

fn cross(bases: &[String], tokens: &[String]) -> Vec<String> {
    let mut product = Vec::with_capacity(bases.len() * tokens.len());
    for base in bases {
        for token in tokens {
            product.push(format!("{}{}{}", base, TOKEN_SEPARATOR, token));
        }
    }
    product
}

fn is_identifier(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_alphanumeric() || c == TOKEN_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice_mood() -> VectorSet {
        let mut set = VectorSet::new();
        set.expand_all(
            &AspectSpec::new()
                .with("voice", ["active", "passive"])
                .with("mood", ["indicative", "subjunctive", "imperative"]),
            Position::StartWith,
        );
        set
    }

    #[test]
    fn test_expand_all_cross_order() {
        let set = voice_mood();
        assert_eq!(
            set.vectors(),
            [
                "active_voice_indicative_mood",
                "active_voice_subjunctive_mood",
                "active_voice_imperative_mood",
                "passive_voice_indicative_mood",
                "passive_voice_subjunctive_mood",
                "passive_voice_imperative_mood",
            ]
        );
        assert_eq!(set.aspect_list(), ["mood", "voice"]);
    }

    #[test]
    fn test_expand_all_split_calls_equivalent() {
        let mut split = VectorSet::new();
        split.expand_all(
            &AspectSpec::new().with("voice", ["active", "passive"]),
            Position::StartWith,
        );
        split.expand_all(
            &AspectSpec::new().with("mood", ["indicative", "subjunctive", "imperative"]),
            Position::EndWith,
        );

        assert_eq!(split, voice_mood());
    }

    #[test]
    fn test_expand_all_empty_spec_is_identity() {
        let mut set = voice_mood();
        let before = set.clone();
        set.expand_all(&AspectSpec::new(), Position::EndWith);
        assert_eq!(set, before);
    }

    #[test]
    fn test_refine_where_only_touches_matches() {
        let mut set = voice_mood();
        let pattern = VectorPattern::regex(".*_imperative_mood").unwrap();
        let matched = set
            .refine_where(&pattern, &AspectSpec::new().with("tense", ["present"]))
            .unwrap();

        assert_eq!(matched, 2);
        assert_eq!(set.len(), 6);
        assert!(set.contains("active_voice_imperative_mood_present_tense"));
        assert!(!set.contains("active_voice_imperative_mood"));
        assert!(set.contains("active_voice_indicative_mood"));
        assert!(set.vectors().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(set.aspect_list(), ["mood", "tense", "voice"]);
    }

    #[test]
    fn test_refine_where_honors_first_pair_only() {
        let mut set = voice_mood();
        let pattern = VectorPattern::regex("_indicative_mood").unwrap();
        let spec = AspectSpec::new()
            .with("tense", ["present", "future"])
            .with("number", ["singular", "plural"]);

        set.refine_where(&pattern, &spec).unwrap();

        assert_eq!(set.len(), 8);
        assert!(set.contains("active_voice_indicative_mood_future_tense"));
        assert!(set.vectors().iter().all(|v| !v.contains("number")));
        assert!(!set.aspect_list().iter().any(|a| a == "number"));
    }

    #[test]
    fn test_refine_where_empty_spec_rejected() {
        let mut set = voice_mood();
        let before = set.clone();
        let pattern = VectorPattern::literal("mood");
        assert!(matches!(
            set.refine_where(&pattern, &AspectSpec::new()),
            Err(CoreError::EmptySpecification)
        ));
        assert_eq!(set, before);
    }

    #[test]
    fn test_remove_matching() {
        let mut set = voice_mood();
        let removed = set.remove_matching(&VectorPattern::literal("passive_voice_imperative"));
        assert_eq!(removed, 1);
        assert_eq!(set.len(), 5);
        assert!(!set.contains("passive_voice_imperative_mood"));
    }

    #[test]
    fn test_vectors_up_to_aspect() {
        let mut set = voice_mood();
        set.expand_all(
            &AspectSpec::new().with("number", ["singular", "plural"]),
            Position::EndWith,
        );

        assert_eq!(
            set.vectors_up_to_aspect("voice"),
            vec!["active_voice", "passive_voice"]
        );
        assert_eq!(set.vectors_up_to_aspect("mood").len(), 6);
        assert!(set.vectors_up_to_aspect("tense").is_empty());
        assert!(set.vectors_up_to_aspect("").is_empty());
    }

    #[test]
    fn test_vectors_up_to_aspect_drops_non_identifiers() {
        let mut set = VectorSet::new();
        set.expand_all(
            &AspectSpec::new().with("mood", ["non-finite", "indicative"]),
            Position::StartWith,
        );
        assert_eq!(set.vectors_up_to_aspect("mood"), vec!["indicative_mood"]);
    }
}
