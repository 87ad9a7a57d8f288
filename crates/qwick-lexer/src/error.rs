//! Lexer errors — §7 ERROR HANDLING DESIGN `SyntaxError`.

/// Result type for lexer operations.
pub type LexResult<T> = Result<T, LexError>;

/// A malformed input string. All variants are fatal to the current
/// equation's pipeline (§7: "all errors are fatal ... never recovered
/// locally").
#[derive(Debug, thiserror::Error)]
pub enum LexError {
    /// `closbrack`/`openbrack` found no matching bracket (§4.1).
    #[error("unbalanced brackets at position {0}")]
    UnbalancedBrackets(usize),

    /// `expandnewops` detected a macro that (directly or transitively)
    /// expands to itself (§4.1).
    #[error("cyclic macro definition: {0}")]
    CyclicMacro(String),

    /// A raw token did not match any recognised lexic element.
    #[error("unrecognised token '{text}' at offset {offset}")]
    UnrecognisedToken { text: String, offset: usize },

    /// A `\langle ... \rangle` block did not contain the two `|` separators
    /// a bra-operators-ket triple requires.
    #[error("malformed bra-ket block: {0}")]
    MalformedBraKet(String),

    /// Input ended while a brace or bra-ket group was still open.
    #[error("unexpected end of input, expected closing '{0}'")]
    UnexpectedEof(&'static str),
}
