//! Builder driver.
//!
//! Applies an ordered sequence of [`Declaration`]s to one fresh generator.
//! The driver only sequences calls; all behavior lives in the generator.
//! A failed pass drops the partly built generator, so a configuration that
//! errors can never be used.

use tracing::debug;

use vv_core::{NamingChecker, NamingReport, VectorPattern};

use crate::config::GeneratorConfig;
use crate::declaration::{Declaration, MatcherDecl};
use crate::generator::{ClusterMatcher, GeneratorError, VerbvectorGenerator};

/// Sequences declarations against a generator.
#[derive(Debug, Clone, Default)]
pub struct BuilderDriver {
    config: GeneratorConfig,
}

impl BuilderDriver {
    /// Create a driver with the given config.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Run `declarations` in order against a new generator.
    pub fn run<I>(&self, declarations: I) -> Result<VerbvectorGenerator, GeneratorError>
    where
        I: IntoIterator<Item = Declaration>,
    {
        let mut generator = VerbvectorGenerator::with_config(self.config.clone());

        for (index, declaration) in declarations.into_iter().enumerate() {
            debug!(index, op = declaration.op(), "applying declaration");
            self.apply(&mut generator, declaration)?;
        }

        Ok(generator)
    }

    /// Apply a single declaration.
    pub fn apply(
        &self,
        generator: &mut VerbvectorGenerator,
        declaration: Declaration,
    ) -> Result<(), GeneratorError> {
        let is_language = matches!(declaration, Declaration::SetLanguage { .. });
        if self.config.require_language_first && !is_language && generator.language().is_none() {
            return Err(GeneratorError::DeclarationBeforeLanguage {
                op: declaration.op(),
            });
        }

        match declaration {
            Declaration::SetLanguage { name } => generator.set_language(&name)?,
            Declaration::Expand { position, aspects } => generator.expand_all(&aspects, position)?,
            Declaration::RefineWhere { pattern, aspects } => {
                let pattern = VectorPattern::regex(&pattern)?;
                generator.refine_where(&pattern, &aspects)?;
            }
            Declaration::Except { action, pattern } => {
                let pattern = VectorPattern::regex(&pattern)?;
                generator.except(action, &pattern);
            }
            Declaration::DefineCluster { matcher, name } => {
                let matcher = match matcher {
                    MatcherDecl::Pattern(pattern) => ClusterMatcher::pattern(&pattern)?,
                    MatcherDecl::Aspect(aspect) => ClusterMatcher::aspect(&aspect)?,
                };
                generator.define_cluster(&matcher, &name)?;
            }
        }

        Ok(())
    }
}

impl VerbvectorGenerator {
    /// Build a generator from declarations with the default config.
    pub fn from_declarations<I>(declarations: I) -> Result<Self, GeneratorError>
    where
        I: IntoIterator<Item = Declaration>,
    {
        BuilderDriver::default().run(declarations)
    }
}

/// Run the naming checker over every aspect specification in `declarations`.
///
/// Refinements contribute only their first pair, the one the generator
/// applies. Aspects declared earlier count toward overlap checks of later ones.
pub fn lint_declarations(declarations: &[Declaration]) -> NamingReport {
    let checker = NamingChecker::new();
    let mut report = NamingReport::from_violations(Vec::new());
    let mut declared: Vec<String> = Vec::new();

    for declaration in declarations {
        let spec = match declaration {
            Declaration::Expand { aspects, .. } => aspects.clone(),
            Declaration::RefineWhere { aspects, .. } => aspects.head(),
            _ => continue,
        };

        report.merge(checker.check_spec(&spec, &declared));
        for aspect in spec.aspect_names() {
            if !declared.iter().any(|a| a == aspect) {
                declared.push(aspect.to_string());
            }
        }
    }

    report
}
