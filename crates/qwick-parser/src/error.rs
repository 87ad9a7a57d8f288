//! Parser/term-builder errors — §7 ERROR HANDLING DESIGN `SyntaxError`/`SemanticError`.

/// Result type for term-builder operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A fatal failure of the lexic or term-builder stage. All variants abort
/// the current equation's pipeline (§7: "all errors are fatal ... never
/// recovered locally").
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Propagated from the lexic layer.
    #[error(transparent)]
    Lex(#[from] qwick_lexer::LexError),

    /// Propagated from the algebraic engine (e.g. an invalid connection
    /// index surfacing while validating a freshly built term).
    #[error(transparent)]
    Engine(#[from] qwick_engine::EngineError),

    /// `LParsedName::parse_superscript` found two `\dg`/lessmore-style
    /// sub-decorations asserted inconsistent (SyntaxError: malformed name).
    #[error("malformed operator name '{0}'")]
    MalformedName(String),

    /// `handle_excitation`: no excitation class could be determined for an
    /// operator that isn't a non-conserving short form either.
    #[error("no excitation class in '{0}'")]
    NoExcitationClass(String),

    /// `handle_excitation`: the ambient `lmel` (from a non-conserving
    /// bra/ket prefix) conflicts with the one parsed from the name itself.
    #[error("mismatch in non-conserving class in '{0}'")]
    LmelMismatch(String),

    /// `handle_operator`: an operator token names neither a Hamiltonian
    /// part, a bare excitation operator, nor carries an excitation class.
    #[error("no excitation class in operator '{0}'")]
    MissingOperatorClass(String),

    /// `handle_sum`/`handle_permutation`: malformed `\sum`/`\perm` directive
    /// (missing subscript, `from`/`to` of mismatched length, `^{from-to}`
    /// range form which is not implemented).
    #[error("malformed directive '{0}': {1}")]
    MalformedDirective(String, &'static str),

    /// A `\param{...}` directive names an excitation operator absent from
    /// `_excops` (SemanticError: unknown macro/reference).
    #[error("unknown excitation in parameter '{0}'")]
    UnknownParameterExcitation(String),

    /// `addterm`: a connection constraint's operator index was not found
    /// among this term's operator positions (EngineError-adjacent, but
    /// raised before the term is even handed to the engine).
    #[error("connected operator at lexic index {0} is not in this term")]
    ConnectedOperatorNotInTerm(i64),

    /// A bare `\perm{...}`/`\sum{...}` directive used an unsupported form
    /// (e.g. a `\sum^{from}_{to}` range, which §4.3 step 6 explicitly does
    /// not support: "Sum from-to is not implemented yet").
    #[error("unsupported form: {0}")]
    Unsupported(&'static str),

    /// Division is an explicitly unsupported token kind (§4.3 dispatch
    /// table: "Div | fatal: unsupported").
    #[error("division is not supported in equation input")]
    DivisionUnsupported,

    /// A lexic element kind reached `do_sumterms` with no dispatch entry
    /// (§4.3 dispatch table: "others | fatal: unimplemented").
    #[error("'{0}' is not implemented yet")]
    Unimplemented(String),

    /// A `Spinsym::Triplet` operator was requested; stubbed per §9 Design
    /// Notes item (iii).
    #[error("triplet spin symmetry is not implemented for '{0}'")]
    TripletUnsupported(String),
}
