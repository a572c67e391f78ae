//! The verb-vector generator.
//!
//! A [`VerbvectorGenerator`] is the aggregate one language's declarations
//! are applied to: it owns the language identifier, the vector set (with
//! its aspect list) and the cluster registry. It is configured in one pass,
//! then only read: prefix queries, property checks and capability
//! extensions all work from the finished state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vv_core::{
    validate_aspect_name, AspectSpec, CoreError, NamingChecker, Position, PropertyChecker,
    PropertySummary, VectorPattern, VectorSet, VectorSetProperties, VectorSetPropertyChecker,
};

use crate::config::GeneratorConfig;
use crate::extension::CapabilityExtension;

/// Action carried by an exception declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptAction {
    /// Delete every vector matching the pattern.
    Remove,
    /// Reserved. Accepted and ignored; giving it behavior needs a design
    /// of its own.
    Add,
}

/// Selects the snapshot a cluster captures.
#[derive(Debug, Clone)]
pub enum ClusterMatcher {
    /// Every current vector matching the pattern.
    Pattern(VectorPattern),
    /// The prefixes returned by [`VerbvectorGenerator::vectors_up_to_aspect`].
    Aspect(String),
}

impl ClusterMatcher {
    /// Matcher from a regular expression.
    pub fn pattern(pattern: &str) -> Result<Self, GeneratorError> {
        Ok(Self::Pattern(VectorPattern::regex(pattern)?))
    }

    /// Matcher from an aspect name.
    pub fn aspect(name: &str) -> Result<Self, GeneratorError> {
        validate_aspect_name(name).map_err(|_| GeneratorError::InvalidMatcher(name.to_string()))?;
        Ok(Self::Aspect(name.to_string()))
    }
}

impl std::fmt::Display for ClusterMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pattern(pattern) => write!(f, "pattern {}", pattern),
            Self::Aspect(aspect) => write!(f, "aspect {}", aspect),
        }
    }
}

/// Generator for one conjugation language.
#[derive(Debug, Clone, Default)]
pub struct VerbvectorGenerator {
    language: Option<String>,
    vectors: VectorSet,
    clusters: BTreeMap<String, Vec<String>>,
    config: GeneratorConfig,
}

impl VerbvectorGenerator {
    /// Create an empty generator with the default config.
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create an empty generator with the given config.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            language: None,
            vectors: VectorSet::new(),
            clusters: BTreeMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Set the language identifier. It can be set once, and must not be blank.
    pub fn set_language(&mut self, name: &str) -> Result<(), GeneratorError> {
        if name.trim().is_empty() {
            return Err(GeneratorError::EmptyLanguage);
        }
        if let Some(current) = &self.language {
            return Err(GeneratorError::LanguageAlreadySet {
                current: current.clone(),
                requested: name.to_string(),
            });
        }

        debug!(language = name, "language set");
        self.language = Some(name.to_string());
        Ok(())
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Current vectors in set order.
    pub fn vector_set(&self) -> &[String] {
        self.vectors.vectors()
    }

    /// Every aspect used so far, deduplicated and sorted.
    pub fn aspect_list(&self) -> &[String] {
        self.vectors.aspect_list()
    }

    /// Full cartesian expansion with every pair of `spec`.
    pub fn expand_all(&mut self, spec: &AspectSpec, position: Position) -> Result<(), GeneratorError> {
        self.check_naming(spec)?;
        self.vectors.expand_all(spec, position);

        debug!(
            aspects = ?spec.aspect_names().collect::<Vec<_>>(),
            ?position,
            vectors_count = self.vectors.len(),
            "expanded all vectors"
        );
        Ok(())
    }

    /// Expand the vectors matching `pattern` with the first pair of `spec`.
    ///
    /// Only the first pair is consumed; see [`VectorSet::refine_where`].
    pub fn refine_where(
        &mut self,
        pattern: &VectorPattern,
        spec: &AspectSpec,
    ) -> Result<usize, GeneratorError> {
        self.check_naming(&spec.head())?;

        if spec.len() > 1 {
            debug!(
                %pattern,
                ignored = ?spec.aspect_names().skip(1).collect::<Vec<_>>(),
                "refinement consumes only the first aspect"
            );
        }

        let matched = self.vectors.refine_where(pattern, spec)?;

        debug!(
            %pattern,
            matched,
            vectors_count = self.vectors.len(),
            "refined vectors"
        );
        Ok(matched)
    }

    /// Apply an exception. Returns how many vectors were removed.
    pub fn except(&mut self, action: ExceptAction, pattern: &VectorPattern) -> usize {
        match action {
            ExceptAction::Remove => {
                let removed = self.vectors.remove_matching(pattern);
                debug!(%pattern, removed, vectors_count = self.vectors.len(), "removed vectors");
                removed
            }
            ExceptAction::Add => {
                warn!(%pattern, "except add has no behavior; ignored");
                0
            }
        }
    }

    /// Register a named snapshot of the vectors selected by `matcher`.
    ///
    /// An empty selection is not stored. Returns whether the cluster was
    /// registered. Redefining a name replaces the earlier snapshot.
    pub fn define_cluster(
        &mut self,
        matcher: &ClusterMatcher,
        name: &str,
    ) -> Result<bool, GeneratorError> {
        let snapshot = match matcher {
            ClusterMatcher::Pattern(pattern) => self.vectors.matching(pattern),
            ClusterMatcher::Aspect(aspect) => {
                validate_aspect_name(aspect)
                    .map_err(|_| GeneratorError::InvalidMatcher(aspect.clone()))?;
                self.vectors.vectors_up_to_aspect(aspect)
            }
        };

        if snapshot.is_empty() {
            debug!(cluster = name, %matcher, "cluster selects nothing; skipped");
            return Ok(false);
        }

        debug!(cluster = name, %matcher, size = snapshot.len(), "cluster defined");
        self.clusters.insert(name.to_string(), snapshot);
        Ok(true)
    }

    /// Distinct vector prefixes ending at `aspect`.
    pub fn vectors_up_to_aspect(&self, aspect: &str) -> Vec<String> {
        self.vectors.vectors_up_to_aspect(aspect)
    }

    /// Registered clusters by name.
    pub fn clusters(&self) -> &BTreeMap<String, Vec<String>> {
        &self.clusters
    }

    pub fn cluster(&self, name: &str) -> Option<&[String]> {
        self.clusters.get(name).map(Vec::as_slice)
    }

    /// Build the capability extension for the finished vector set.
    ///
    /// Fails if no language has been set.
    pub fn build_extension(&self) -> Result<CapabilityExtension, GeneratorError> {
        CapabilityExtension::from_generator(self)
    }

    /// Check the vector set invariants.
    pub fn check_properties(&self) -> PropertySummary {
        VectorSetPropertyChecker::new(self).summary()
    }

    /// Format as a summary string.
    pub fn format_summary(&self) -> String {
        let mut summary = format!(
            "Language: {}\n",
            self.language.as_deref().unwrap_or("(unset)")
        );

        summary.push_str(&format!("  Vectors: {}\n", self.vectors.len()));
        summary.push_str(&format!("  Aspects: {}\n", self.aspect_list().join(", ")));

        for aspect in self.aspect_list() {
            summary.push_str(&format!(
                "    up to {}: {}\n",
                aspect,
                self.vectors_up_to_aspect(aspect).len()
            ));
        }

        if !self.clusters.is_empty() {
            summary.push_str("  Clusters:\n");
            for (name, snapshot) in &self.clusters {
                summary.push_str(&format!("    {}: {} vectors\n", name, snapshot.len()));
            }
        }

        summary
    }

    fn check_naming(&self, spec: &AspectSpec) -> Result<(), GeneratorError> {
        if !self.config.check_naming {
            return Ok(());
        }

        let report = NamingChecker::new().check_spec(spec, self.vectors.aspect_list());
        for violation in &report.violations {
            warn!(rule = violation.rule, "{}", violation.message);
        }

        let denied_warnings = self.config.deny_naming_warnings && report.warnings_count() > 0;
        if !report.passes || denied_warnings {
            return Err(GeneratorError::NamingViolations(report.format_report()));
        }
        Ok(())
    }
}

impl VectorSetProperties for VerbvectorGenerator {
    fn vector_set(&self) -> &[String] {
        self.vectors.vectors()
    }

    fn aspect_list(&self) -> &[String] {
        self.vectors.aspect_list()
    }

    fn cluster_snapshots(&self) -> Vec<(&str, &[String])> {
        self.clusters
            .iter()
            .map(|(name, snapshot)| (name.as_str(), snapshot.as_slice()))
            .collect()
    }
}

/// Generator errors.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Language not set: a capability extension needs a language")]
    LanguageNotSet,

    #[error("Language name is empty")]
    EmptyLanguage,

    #[error("Language already set to '{current}', cannot set '{requested}'")]
    LanguageAlreadySet { current: String, requested: String },

    #[error("Declaration '{op}' appears before the language declaration")]
    DeclarationBeforeLanguage { op: &'static str },

    #[error("Invalid cluster matcher: '{0}'")]
    InvalidMatcher(String),

    #[error("Naming violations:\n{0}")]
    NamingViolations(String),

    #[error("Unknown member: {0}")]
    UnknownMember(String),

    #[error("Unsupported declaration format: {0}")]
    UnsupportedFormat(String),

    #[error("Engine error: {0}")]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
