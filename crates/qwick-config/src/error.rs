//! Configuration errors — §7 ERROR HANDLING DESIGN `ConfigError`.

/// Result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A malformed or internally inconsistent configuration value. The pipeline
/// never mutates a `Config` once it validates (§9 Design Notes); loading the
/// dictionary itself is an external collaborator's job (§1).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `syntax.lessmore` must hold exactly two prefixes of equal length
    /// (the original asserts this while parsing a superscript).
    #[error("syntax.lessmore must have exactly two same-length entries, got {0:?}")]
    BadLessmore(Vec<String>),

    /// `syntax.dg` must name at least one dagger marker.
    #[error("syntax.dg must not be empty")]
    EmptyDg,

    /// A required `hamilton` role has no configured symbol.
    #[error("missing hamilton role '{0}'")]
    MissingHamiltonRole(&'static str),
}
