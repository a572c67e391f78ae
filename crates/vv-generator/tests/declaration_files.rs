//! Loading declaration files from disk.

use std::io::Write;

use tempfile::Builder;
use vv_generator::{load_declarations, GeneratorError, VerbvectorGenerator};

const LATIN_YAML: &str = r#"
- op: set_language
  name: Latin
- op: expand
  position: start_with
  aspects:
    voice: [active, passive]
    mood: indicative subjunctive imperative
- op: refine_where
  pattern: ".*_indicative_mood"
  aspects:
    tense: present imperfect future perfect pastperfect futureperfect
- op: refine_where
  pattern: ".*_subjunctive_mood"
  aspects:
    tense: present imperfect perfect pastperfect
- op: refine_where
  pattern: ".*_imperative_mood"
  aspects:
    tense: [present]
- op: expand
  position: end_with
  aspects:
    number: [singular, plural]
    person: [first, second, third]
- op: except
  action: remove
  pattern: passive_voice_imperative_mood_present_tense
- op: define_cluster
  matcher: { aspect: tense }
  name: tense_list
- op: define_cluster
  matcher: { pattern: "^active_voice_imperative" }
  name: active_imperatives
"#;

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_yaml_file_builds_latin() {
    let file = write_temp(".yaml", LATIN_YAML);
    let declarations = load_declarations(file.path()).unwrap();
    let generator = VerbvectorGenerator::from_declarations(declarations).unwrap();

    assert_eq!(generator.vectors_up_to_aspect("mood").len(), 5);
    assert_eq!(generator.cluster("tense_list").unwrap().len(), 21);
    assert_eq!(generator.cluster("active_imperatives").unwrap().len(), 6);

    let extension = generator.build_extension().unwrap();
    assert!(extension.responds_to("active_imperatives"));
    assert!(extension
        .responds_to("latin_passive_voice_subjunctive_mood_pastperfect_tense_plural_number_first_person"));
}

#[test]
fn test_json_document_form() {
    let file = write_temp(
        ".json",
        r#"{"declarations": [
            {"op": "set_language", "name": "Greek"},
            {"op": "expand", "aspects": {"voice": ["active", "middle", "passive"]}}
        ]}"#,
    );
    let generator =
        VerbvectorGenerator::from_declarations(load_declarations(file.path()).unwrap()).unwrap();

    assert_eq!(generator.language(), Some("Greek"));
    assert_eq!(
        generator.vector_set(),
        ["active_voice", "middle_voice", "passive_voice"]
    );
}

#[test]
fn test_unsupported_extension() {
    let file = write_temp(".rb", "language :Latin do end");
    assert!(matches!(
        load_declarations(file.path()),
        Err(GeneratorError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");
    assert!(matches!(
        load_declarations(&missing),
        Err(GeneratorError::Io(_))
    ));
}

#[test]
fn test_malformed_record_names_bad_value() {
    let file = write_temp(
        ".yaml",
        "- op: set_language\n  name: Latin\n- op: except\n  action: delete\n  pattern: x\n",
    );
    let message = load_declarations(file.path()).unwrap_err().to_string();

    assert!(message.contains("unknown variant `delete`"), "{}", message);
}

#[test]
fn test_bundled_latin_declarations() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../declarations/latin.yaml");
    let generator = VerbvectorGenerator::from_declarations(load_declarations(&path).unwrap()).unwrap();

    assert_eq!(generator.vectors_up_to_aspect("tense").len(), 21);
    assert!(generator.check_properties().failed == 0);
}
