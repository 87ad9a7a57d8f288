//! Persistent registration info for an excitation operator encountered
//! during the term-builder's Discover pass — §4.3 `LExcitationInfo`.

use qwick_ast::{Orbital, OrbitalType, Spinsym};
use rustc_hash::FxHashMap;

/// Maps an excitation operator's base name to its registered free-orbital
/// assignment, found once during the Discover pass and reused by every
/// later occurrence of the same operator across the whole equation.
pub type ExcopsMap = FxHashMap<String, LExcitationInfo>;

/// One excitation operator's persistent bookkeeping across the Discover and
/// Emit passes (§4.3, §9 Design Notes).
#[derive(Debug, Clone)]
pub struct LExcitationInfo {
    /// Free orbital name registered for each orbital type this operator
    /// touches (e.g. `Occ -> i`, `Virt -> a`), assigned once on first sight.
    pub orbs4excops: FxHashMap<OrbitalType, Orbital>,
    /// Excitation class (occupied/virtual pair count), as first parsed.
    pub exccl: i16,
    pub spinsym: Spinsym,
    /// Position of this operator's matrix within the *current* term's
    /// `mat()`. `-1` when the operator isn't present in the term currently
    /// being built (the initial state, and after [`Self::reset_term_info`]).
    pub posexcopsterm: i64,
}

impl LExcitationInfo {
    pub fn new(orbs4excops: FxHashMap<OrbitalType, Orbital>, exccl: i16, spinsym: Spinsym) -> Self {
        Self { orbs4excops, exccl, spinsym, posexcopsterm: -1 }
    }

    /// Clear the per-term position, called once a term has been fully
    /// processed (§4.3 `addterm` -> `handle_parameters`).
    pub fn reset_term_info(&mut self) {
        self.posexcopsterm = -1;
    }
}
