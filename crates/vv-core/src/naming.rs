//! Naming rules for aspect and value tokens.
//!
//! Every token ends up inside a member name such as
//! `latin_active_voice_indicative_mood`, so tokens must be usable as
//! identifiers. Errors make a name unusable; warnings flag names that
//! work but make later queries ambiguous.

use crate::aspect::AspectSpec;
use crate::TOKEN_SEPARATOR;

/// A naming violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Rule that was violated
    pub rule: &'static str,
    /// Description of the violation
    pub message: String,
    /// Severity level
    pub severity: Severity,
}

/// Violation severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The token cannot form a member name
    Error,
    /// The token works but invites ambiguity
    Warning,
}

impl Violation {
    /// Create a new error violation.
    pub fn error(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Create a new warning violation.
    pub fn warning(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Format for display.
    pub fn format(&self) -> String {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        };
        format!("[{}] {}: {}", severity, self.rule, self.message)
    }
}

/// Result of a naming check.
#[derive(Debug, Clone, Default)]
pub struct NamingReport {
    /// All violations found
    pub violations: Vec<Violation>,
    /// Whether no error-level violation was found
    pub passes: bool,
}

impl NamingReport {
    /// Create from violations.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        let passes = !violations.iter().any(|v| v.severity == Severity::Error);
        Self { violations, passes }
    }

    pub fn errors_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count()
    }

    pub fn warnings_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count()
    }

    /// Merge another report into this one.
    pub fn merge(&mut self, other: NamingReport) {
        self.violations.extend(other.violations);
        self.passes = !self.violations.iter().any(|v| v.severity == Severity::Error);
    }

    /// Format as report.
    pub fn format_report(&self) -> String {
        let mut report = String::new();

        report.push_str("Naming Check Results\n");
        report.push_str("====================\n\n");

        for violation in &self.violations {
            report.push_str(&violation.format());
            report.push('\n');
        }

        report.push_str(&format!(
            "\nSummary: {} errors, {} warnings\n",
            self.errors_count(),
            self.warnings_count()
        ));
        report.push_str(if self.passes {
            "Result: PASS\n"
        } else {
            "Result: FAIL\n"
        });

        report
    }
}

/// Naming rule checker.
pub struct NamingChecker;

impl NamingChecker {
    /// Create a new checker.
    pub fn new() -> Self {
        Self
    }

    /// Check one specification against the aspects already declared.
    pub fn check_spec(&self, spec: &AspectSpec, declared_aspects: &[String]) -> NamingReport {
        let mut violations = Vec::new();

        for (aspect, values) in spec.iter() {
            violations.extend(self.check_token(aspect, "aspect"));
            for value in values {
                violations.extend(self.check_token(value, "value"));
                violations.extend(self.check_value_boundaries(aspect, value));
            }
            violations.extend(self.check_repeated_values(aspect, values));
        }

        let mut aspects: Vec<&str> = declared_aspects.iter().map(String::as_str).collect();
        aspects.extend(spec.aspect_names());
        violations.extend(self.check_aspect_overlap(&aspects));

        NamingReport::from_violations(violations)
    }

    /// Check that a single token can appear in a member name.
    ///
    /// Rule: tokens are non-empty, lowercase ASCII letters, digits and `_`.
    pub fn check_token(&self, token: &str, kind: &str) -> Vec<Violation> {
        let mut violations = Vec::new();

        if token.is_empty() {
            violations.push(Violation::error(
                "NonEmptyToken",
                format!("Empty {} token", kind),
            ));
            return violations;
        }

        let lowered = token.to_ascii_lowercase();
        if let Some(bad) = lowered
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == TOKEN_SEPARATOR))
        {
            violations.push(Violation::error(
                "IdentifierToken",
                format!("{} '{}' contains '{}', not valid in a member name", kind, token, bad),
            ));
        }

        if lowered != token {
            violations.push(Violation::warning(
                "LowercaseToken",
                format!("{} '{}' has uppercase letters; use '{}'", kind, token, lowered),
            ));
        }

        violations
    }

    /// Rule: values should not contain the token separator.
    ///
    /// `past_perfect_tense` cannot be split back into value and aspect.
    pub fn check_value_boundaries(&self, aspect: &str, value: &str) -> Vec<Violation> {
        if value.contains(TOKEN_SEPARATOR) {
            vec![Violation::warning(
                "AmbiguousBoundary",
                format!(
                    "value '{}' of aspect '{}' contains '{}'",
                    value, aspect, TOKEN_SEPARATOR
                ),
            )]
        } else {
            Vec::new()
        }
    }

    /// Rule: an aspect lists each value once.
    ///
    /// Repeats are kept by expansion, so the set ends up holding the same
    /// vector more than once while the extension has one member for it.
    pub fn check_repeated_values(&self, aspect: &str, values: &[String]) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (i, value) in values.iter().enumerate() {
            if values[..i].contains(value) && !values[i + 1..].contains(value) {
                violations.push(Violation::warning(
                    "RepeatedValue",
                    format!("value '{}' is listed more than once for aspect '{}'", value, aspect),
                ));
            }
        }

        violations
    }

    /// Rule: no aspect name is a substring of another.
    ///
    /// Prefix queries locate aspects by substring, so `mood` inside
    /// `moodiness` would truncate at the wrong place.
    pub fn check_aspect_overlap(&self, aspects: &[&str]) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (i, inner) in aspects.iter().enumerate() {
            for (j, outer) in aspects.iter().enumerate() {
                if i != j && inner != outer && !inner.is_empty() && outer.contains(inner) {
                    violations.push(Violation::warning(
                        "AspectOverlap",
                        format!("aspect '{}' is contained in aspect '{}'", inner, outer),
                    ));
                }
            }
        }

        violations
    }
}

impl Default for NamingChecker {
    fn default() -> Self {
        Self::new()
    }
}
