//! # vv-core
//!
//! Combinatorial engine for verb-conjugation taxonomies.
//!
//! A *vector* is a compound identifier such as
//! `active_voice_indicative_mood_present_tense`: each aspect contributes one
//! `<value>_<aspect>` token, in the order the aspects were declared. This
//! crate owns the pure parts of building such a name space:
//!
//! - [`AspectSpec`] and [`combinatorialize`]: ordered aspect declarations
//! - [`VectorSet`]: full cartesian expansion, subset refinement, removal and
//!   prefix queries
//! - [`VectorPattern`]: the matching predicate used by refinement, exceptions
//!   and clusters
//! - [`NamingChecker`]: lints tokens that would make broken member names
//! - [`PropertyChecker`] / [`VectorSetPropertyChecker`]: invariant checks over
//!   a finished vector set
//!
//! ```rust
//! use vv_core::{AspectSpec, Position, VectorPattern, VectorSet};
//!
//! let mut set = VectorSet::new();
//! set.expand_all(
//!     &AspectSpec::new()
//!         .with("voice", ["active", "passive"])
//!         .with("mood", ["indicative", "imperative"]),
//!     Position::StartWith,
//! );
//! let imperative = VectorPattern::regex(".*_imperative_mood").unwrap();
//! set.refine_where(&imperative, &AspectSpec::new().with("tense", ["present"]))
//!     .unwrap();
//!
//! assert_eq!(set.vectors_up_to_aspect("mood").len(), 4);
//! assert!(set.contains("passive_voice_imperative_mood_present_tense"));
//! ```
//!
//! Nothing here logs or performs I/O; the generator crate layers the
//! declarative driver, clusters and capability extensions on top.

pub mod aspect;
pub mod error;
pub mod invariants;
pub mod naming;
pub mod pattern;
pub mod property;
pub mod vector_set;

pub use aspect::{combinatorialize, validate_aspect_name, AspectSpec, Position};
pub use error::CoreError;
pub use invariants::{VectorSetProperties, VectorSetPropertyChecker};
pub use naming::{NamingChecker, NamingReport, Severity, Violation};
pub use pattern::VectorPattern;
pub use property::{PropertyChecker, PropertyResult, PropertySummary};
pub use vector_set::VectorSet;

/// Separator between a value and its aspect, and between successive tokens.
pub const TOKEN_SEPARATOR: char = '_';
