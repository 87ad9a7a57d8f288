//! Top-level error aggregate — §6 "Errors", §7 ERROR HANDLING DESIGN.

/// Every error any pipeline stage can raise while deriving an equation,
/// tagged by originating stage. `qwick_parser::ParseError` already wraps
/// the lexer's and engine's own error types transparently, so those
/// surface here through [`Error::Parse`] rather than duplicate variants.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config: {0}")]
    Config(#[from] qwick_config::ConfigError),

    #[error("{0}")]
    Parse(#[from] qwick_parser::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
