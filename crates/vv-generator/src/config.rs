//! Generator configuration.

/// Generator configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Reject declarations that precede the language declaration
    pub require_language_first: bool,
    /// Run the naming checker over every aspect specification
    pub check_naming: bool,
    /// Fail on naming warnings as well as errors
    pub deny_naming_warnings: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            require_language_first: true,
            check_naming: false,
            deny_naming_warnings: false,
        }
    }
}

impl GeneratorConfig {
    /// No ordering or naming checks.
    pub fn lenient() -> Self {
        Self {
            require_language_first: false,
            check_naming: false,
            deny_naming_warnings: false,
        }
    }

    /// Every check on, warnings denied.
    pub fn strict() -> Self {
        Self {
            require_language_first: true,
            check_naming: true,
            deny_naming_warnings: true,
        }
    }
}
