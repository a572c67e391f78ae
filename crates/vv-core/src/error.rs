//! Engine errors.

/// Errors raised by the pure engine.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid vector pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid aspect name: '{0}'")]
    InvalidAspectName(String),

    #[error("Aspect specification is empty")]
    EmptySpecification,
}
