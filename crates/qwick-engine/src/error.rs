//! Engine errors — §7 ERROR HANDLING DESIGN `EngineError`.

/// Result type for term-algebra operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// A fatal failure of the algebraic engine. All variants abort the current
/// equation's pipeline (§7: "all errors are fatal ... never recovered
/// locally").
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Wick recursion reached a state it cannot contract further (e.g. an
    /// odd number of operators left after all exhausted pairings).
    #[error("Wick recursion reached an inconsistent state: {0}")]
    InconsistentWick(String),

    /// A recorded connection constraint names an index outside `[1, mat.len()]`.
    #[error("connection constraint references matrix index {0} out of range")]
    InvalidConnectionIndex(i64),

    /// Spin symmetry `Triplet` has no supported operator construction
    /// (§9 Design Notes item iii, SPEC_FULL supplement 2): the original
    /// leaves a `//TODO: implement Triplet!` and this repo does the same,
    /// explicitly.
    #[error("triplet spin symmetry is not implemented for operator '{0}'")]
    TripletUnsupported(String),

    /// `create_Oper`-style construction received occupied/virtual slot
    /// counts inconsistent with the declared excitation class.
    #[error("excitation class mismatch: exccl={exccl} lm={lm} occs={occs} virts={virts}")]
    ExcitationShapeMismatch { exccl: i16, lm: i16, occs: usize, virts: usize },
}
