//! Declaration records and declaration files.
//!
//! A language definition is an ordered list of [`Declaration`]s. In files
//! they are tagged by `op`:
//!
//! ```yaml
//! - op: set_language
//!   name: Latin
//! - op: expand
//!   position: start_with
//!   aspects:
//!     voice: [active, passive]
//!     mood: indicative subjunctive imperative
//! - op: refine_where
//!   pattern: ".*_indicative_mood"
//!   aspects:
//!     tense: [present, imperfect, future]
//! - op: except
//!   action: remove
//!   pattern: passive_voice_imperative_mood_present_tense
//! - op: define_cluster
//!   matcher: { aspect: tense }
//!   name: tense_list
//! ```
//!
//! Aspect mappings keep document order. Values are a list or a single
//! whitespace-separated string.

use std::fmt;
use std::path::Path;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use vv_core::{AspectSpec, Position};

use crate::generator::{ExceptAction, GeneratorError};

/// One declarative call against a generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Declaration {
    SetLanguage {
        name: String,
    },
    Expand {
        #[serde(default)]
        position: Position,
        #[serde(deserialize_with = "deserialize_aspects")]
        aspects: AspectSpec,
    },
    RefineWhere {
        pattern: String,
        #[serde(deserialize_with = "deserialize_aspects")]
        aspects: AspectSpec,
    },
    Except {
        action: ExceptAction,
        pattern: String,
    },
    DefineCluster {
        matcher: MatcherDecl,
        name: String,
    },
}

impl Declaration {
    /// Operation name, as tagged in files.
    pub fn op(&self) -> &'static str {
        match self {
            Self::SetLanguage { .. } => "set_language",
            Self::Expand { .. } => "expand",
            Self::RefineWhere { .. } => "refine_where",
            Self::Except { .. } => "except",
            Self::DefineCluster { .. } => "define_cluster",
        }
    }

    /// Aspect specification carried by the declaration, if any.
    pub fn aspects(&self) -> Option<&AspectSpec> {
        match self {
            Self::Expand { aspects, .. } | Self::RefineWhere { aspects, .. } => Some(aspects),
            _ => None,
        }
    }
}

/// Cluster matcher as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherDecl {
    Pattern(String),
    Aspect(String),
}

/// Declaration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, GeneratorError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(GeneratorError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Top level of a declaration file: a bare list, or a mapping with a
/// `declarations` key.
///
/// Records are deserialized straight from the source, so an error in one
/// of them surfaces with its own message and location.
struct DeclarationFile(Vec<Declaration>);

impl<'de> Deserialize<'de> for DeclarationFile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FileVisitor;

        impl<'de> Visitor<'de> for FileVisitor {
            type Value = DeclarationFile;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of declarations or a mapping with a `declarations` key")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<DeclarationFile, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut declarations = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(declaration) = seq.next_element()? {
                    declarations.push(declaration);
                }
                Ok(DeclarationFile(declarations))
            }

            fn visit_map<A>(self, mut map: A) -> Result<DeclarationFile, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut declarations = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key != "declarations" {
                        map.next_value::<IgnoredAny>()?;
                        continue;
                    }
                    if declarations.is_some() {
                        return Err(de::Error::duplicate_field("declarations"));
                    }
                    declarations = Some(map.next_value()?);
                }

                declarations
                    .map(DeclarationFile)
                    .ok_or_else(|| de::Error::missing_field("declarations"))
            }
        }

        deserializer.deserialize_any(FileVisitor)
    }
}

/// Parse declarations from text.
pub fn parse_declarations(text: &str, format: Format) -> Result<Vec<Declaration>, GeneratorError> {
    let file: DeclarationFile = match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(file.0)
}

/// Load declarations from a `.json`, `.yaml` or `.yml` file.
pub fn load_declarations(path: &Path) -> Result<Vec<Declaration>, GeneratorError> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    parse_declarations(&text, format)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Values {
    List(Vec<String>),
    Words(String),
}

impl From<Values> for Vec<String> {
    fn from(values: Values) -> Self {
        match values {
            Values::List(list) => list,
            Values::Words(words) => words.split_whitespace().map(str::to_string).collect(),
        }
    }
}

/// Deserialize an aspect mapping, keeping entry order.
fn deserialize_aspects<'de, D>(deserializer: D) -> Result<AspectSpec, D::Error>
where
    D: Deserializer<'de>,
{
    struct AspectsVisitor;

    impl<'de> Visitor<'de> for AspectsVisitor {
        type Value = AspectSpec;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping from aspect name to values")
        }

        fn visit_map<A>(self, mut map: A) -> Result<AspectSpec, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut spec = AspectSpec::new();
            while let Some((aspect, values)) = map.next_entry::<String, Values>()? {
                spec.push(aspect, Vec::<String>::from(values));
            }
            Ok(spec)
        }
    }

    deserializer.deserialize_map(AspectsVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_keeps_aspect_order() {
        let text = r#"[
            {"op": "set_language", "name": "Latin"},
            {"op": "expand", "aspects": {"voice": ["active", "passive"], "mood": ["indicative"]}}
        ]"#;
        let declarations = parse_declarations(text, Format::Json).unwrap();

        assert_eq!(declarations.len(), 2);
        let aspects = declarations[1].aspects().unwrap();
        assert_eq!(
            aspects.aspect_names().collect::<Vec<_>>(),
            vec!["voice", "mood"]
        );
        assert!(matches!(
            declarations[1],
            Declaration::Expand { position: Position::EndWith, .. }
        ));
    }

    #[test]
    fn test_yaml_document_and_word_values() {
        let text = r#"
declarations:
  - op: refine_where
    pattern: ".*_subjunctive_mood"
    aspects:
      tense: present imperfect perfect pastperfect
  - op: except
    action: add
    pattern: anything
  - op: define_cluster
    matcher:
      aspect: tense
    name: tense_list
"#;
        let declarations = parse_declarations(text, Format::Yaml).unwrap();

        let (aspect, values) = declarations[0].aspects().unwrap().first().unwrap();
        assert_eq!(aspect, "tense");
        assert_eq!(values.len(), 4);
        assert_eq!(
            declarations[1],
            Declaration::Except {
                action: ExceptAction::Add,
                pattern: "anything".to_string(),
            }
        );
        assert_eq!(
            declarations[2],
            Declaration::DefineCluster {
                matcher: MatcherDecl::Aspect("tense".to_string()),
                name: "tense_list".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_matcher_rejected() {
        let text = r#"[{"op": "define_cluster", "matcher": 42, "name": "x"}]"#;
        assert!(matches!(
            parse_declarations(text, Format::Json),
            Err(GeneratorError::Json(_))
        ));
    }

    #[test]
    fn test_bad_record_reports_its_own_error() {
        let text = r#"
- op: set_language
  name: Latin
- op: except
  action: delete
  pattern: anything
"#;
        let err = parse_declarations(text, Format::Yaml).unwrap_err();
        let message = err.to_string();

        assert!(matches!(err, GeneratorError::Yaml(_)));
        assert!(message.contains("delete"), "{}", message);
        assert!(!message.contains("untagged"), "{}", message);
    }

    #[test]
    fn test_bad_record_in_document_form() {
        let text = r#"{"declarations": [
            {"op": "set_language", "name": "Latin"},
            {"op": "expand", "position": "middle", "aspects": {"voice": ["active"]}}
        ]}"#;
        let message = parse_declarations(text, Format::Json).unwrap_err().to_string();
        assert!(message.contains("middle"), "{}", message);
    }

    #[test]
    fn test_missing_declarations_key() {
        let message = parse_declarations("{}", Format::Json).unwrap_err().to_string();
        assert!(message.contains("declarations"), "{}", message);
    }

    #[test]
    fn test_unknown_op_rejected() {
        let text = r#"[{"op": "conjugate", "name": "x"}]"#;
        assert!(parse_declarations(text, Format::Json).is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("latin.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("latin.json")).unwrap(), Format::Json);
        assert!(matches!(
            Format::from_path(Path::new("latin.rb")),
            Err(GeneratorError::UnsupportedFormat(_))
        ));
    }
}
