//! Aspect declarations.
//!
//! An aspect is a named feature dimension (`voice`, `mood`, `tense`) with an
//! ordered list of value tokens. An [`AspectSpec`] is the payload of one
//! declarative call: an ordered list of `(aspect, values)` pairs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::TOKEN_SEPARATOR;

/// Advisory position label carried by full expansions.
///
/// Expansion always appends tokens to the right of existing vectors. The
/// label is kept so declarations read the way they were written, and has no
/// effect on ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    StartWith,
    #[default]
    EndWith,
}

/// Ordered mapping from aspect name to its value tokens.
///
/// Entry order is significant: it is the order tokens appear in vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AspectSpec {
    entries: Vec<(String, Vec<String>)>,
}

impl AspectSpec {
    /// Create an empty specification.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder-style append of one `(aspect, values)` pair.
    #[must_use]
    pub fn with<I, V>(mut self, aspect: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.push(aspect, values);
        self
    }

    /// Append one `(aspect, values)` pair.
    pub fn push<I, V>(&mut self, aspect: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let aspect = aspect.into();
        let values = values.into_iter().map(Into::into).collect();
        self.entries.push((aspect, values));
    }

    /// The first pair, the only one honored by refinement.
    #[must_use]
    pub fn first(&self) -> Option<(&str, &[String])> {
        self.entries
            .first()
            .map(|(aspect, values)| (aspect.as_str(), values.as_slice()))
    }

    /// A copy holding only the first pair: what refinement consumes.
    #[must_use]
    pub fn head(&self) -> Self {
        Self {
            entries: self.entries.iter().take(1).cloned().collect(),
        }
    }

    /// Iterate pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(aspect, values)| (aspect.as_str(), values.as_slice()))
    }

    /// Aspect names in declaration order.
    pub fn aspect_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(aspect, _)| aspect.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A, I, V> FromIterator<(A, I)> for AspectSpec
where
    A: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (A, I)>>(iter: T) -> Self {
        let mut spec = Self::new();
        for (aspect, values) in iter {
            spec.push(aspect, values);
        }
        spec
    }
}

/// Map each value to its `<value>_<aspect>` token.
///
/// Value order is preserved; no sorting, no deduplication.
#[must_use]
pub fn combinatorialize(aspect: &str, values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| format!("{}{}{}", value, TOKEN_SEPARATOR, aspect))
        .collect()
}

/// Check that a name can key a prefix query.
///
/// Aspect names are matched as substrings of vectors, so they must be
/// non-empty and made only of identifier characters.
pub fn validate_aspect_name(name: &str) -> Result<(), CoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == TOKEN_SEPARATOR);

    if valid {
        Ok(())
    } else {
        Err(CoreError::InvalidAspectName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_keeps_first_pair_only() {
        let spec = AspectSpec::new()
            .with("tense", ["present"])
            .with("number", ["singular"]);
        let head = spec.head();

        assert_eq!(head.len(), 1);
        assert_eq!(head.first(), spec.first());
        assert!(AspectSpec::new().head().is_empty());
    }

    #[test]
    fn test_combinatorialize_preserves_order() {
        let values = vec!["passive".to_string(), "active".to_string()];
        assert_eq!(
            combinatorialize("voice", &values),
            vec!["passive_voice", "active_voice"]
        );
    }

    #[test]
    fn test_combinatorialize_keeps_duplicates() {
        let values = vec!["present".to_string(), "present".to_string()];
        assert_eq!(combinatorialize("tense", &values).len(), 2);
    }

    #[test]
    fn test_spec_order_and_first() {
        let spec = AspectSpec::new()
            .with("number", ["singular", "plural"])
            .with("person", ["first", "second", "third"]);

        assert_eq!(spec.len(), 2);
        assert_eq!(
            spec.aspect_names().collect::<Vec<_>>(),
            vec!["number", "person"]
        );

        let (aspect, values) = spec.first().unwrap();
        assert_eq!(aspect, "number");
        assert_eq!(values, ["singular", "plural"]);
    }

    #[test]
    fn test_spec_from_iter() {
        let spec: AspectSpec = vec![("tense", vec!["present"])].into_iter().collect();
        assert_eq!(spec.first().unwrap().0, "tense");
        assert!(AspectSpec::new().first().is_none());
    }

    #[test]
    fn test_validate_aspect_name() {
        assert!(validate_aspect_name("tense").is_ok());
        assert!(validate_aspect_name("verb_class2").is_ok());
        assert!(validate_aspect_name("").is_err());
        assert!(validate_aspect_name(".*_mood").is_err());
    }
}
