//! # vv-generator
//!
//! Declarative verb-vector generation and capability extensions.
//!
//! A language's conjugation name space is declared as an ordered list of
//! calls: set the language, expand every vector by some aspects, refine
//! subsets with further aspects, remove exceptions, and capture clusters.
//! The finished generator yields a [`CapabilityExtension`]: one stub member
//! per vector for a host verb type to implement, plus real cluster accessors.
//!
//! # Usage
//!
//! ```rust
//! use vv_core::{AspectSpec, Position};
//! use vv_generator::{BuilderDriver, Declaration, GeneratorConfig, MatcherDecl};
//!
//! let declarations = vec![
//!     Declaration::SetLanguage { name: "Latin".to_string() },
//!     Declaration::Expand {
//!         position: Position::StartWith,
//!         aspects: AspectSpec::new()
//!             .with("voice", ["active", "passive"])
//!             .with("mood", ["indicative", "imperative"]),
//!     },
//!     Declaration::RefineWhere {
//!         pattern: ".*_imperative_mood".to_string(),
//!         aspects: AspectSpec::new().with("tense", ["present"]),
//!     },
//!     Declaration::DefineCluster {
//!         matcher: MatcherDecl::Aspect("mood".to_string()),
//!         name: "mood_list".to_string(),
//!     },
//! ];
//!
//! let generator = BuilderDriver::new(GeneratorConfig::default())
//!     .run(declarations)
//!     .unwrap();
//! let extension = generator.build_extension().unwrap();
//!
//! assert!(extension.responds_to("latin_passive_voice_imperative_mood_present_tense"));
//! assert_eq!(extension.cluster("mood_list").unwrap().len(), 4);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Declarations │ ──> │   Builder    │ ──> │  Generator   │
//! │ (file / API) │     │    Driver    │     │ (vector set) │
//! └──────────────┘     └──────────────┘     └──────┬───────┘
//!                                                  │
//!                      ┌───────────────────────────┤
//!                      ▼                           ▼
//!               ┌──────────────┐           ┌──────────────┐
//!               │   Clusters   │ ────────> │  Capability  │
//!               │  (snapshots) │           │  Extension   │
//!               └──────────────┘           └──────────────┘
//! ```

pub mod builder;
pub mod config;
pub mod declaration;
pub mod extension;
pub mod generator;

pub use builder::{lint_declarations, BuilderDriver};
pub use config::GeneratorConfig;
pub use declaration::{load_declarations, parse_declarations, Declaration, Format, MatcherDecl};
pub use extension::{
    AdoptedSurface, CapabilityExtension, ExtensionMember, MemberValue, Resolved,
    RESPONDABLE_METHODS_MEMBER, VECTOR_LIST_MEMBER,
};
pub use generator::{ClusterMatcher, ExceptAction, GeneratorError, VerbvectorGenerator};
