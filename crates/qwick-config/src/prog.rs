//! `prog.*` keys — §6 External Interfaces.

use serde::{Deserialize, Serialize};

/// Program-wide numeric/behavioural thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgConfig {
    /// Prefactor threshold below which a term is treated as zero
    /// (`prog.minfac`, §6).
    pub minfac: f64,
    /// Selects spin-integrated (`GenS`) vs spin-general (`Gen`) default
    /// orbital spin for freshly minted orbitals (`prog.spinintegr`, §6).
    pub spinintegr: bool,
}

impl Default for ProgConfig {
    fn default() -> Self {
        Self { minfac: 1e-10, spinintegr: true }
    }
}
