//! `hamilton` role → symbol map — §6 External Interfaces.

use serde::{Deserialize, Serialize};

/// Maps a Hamiltonian role to the symbol the mini-language uses for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HamiltonConfig {
    pub fock: String,
    pub oneelop: String,
    pub flucpot: String,
    /// The de-antisymmetrised fluctuation potential symbol (original's
    /// `Oper(Ops::FluctP, false, ...)` branch, §4.3 step 5).
    pub dflucpot: String,
    pub perturbation: String,
}

impl HamiltonConfig {
    /// The role name for `symbol`, if it names one of the configured parts.
    pub fn role_of(&self, symbol: &str) -> Option<&'static str> {
        if symbol == self.fock {
            Some("fock")
        } else if symbol == self.oneelop {
            Some("oneelop")
        } else if symbol == self.flucpot {
            Some("flucpot")
        } else if symbol == self.dflucpot {
            Some("dflucpot")
        } else if symbol == self.perturbation {
            Some("perturbation")
        } else {
            None
        }
    }

    pub fn is_hamiltonian_part(&self, symbol: &str) -> bool {
        self.role_of(symbol).is_some()
    }
}

impl Default for HamiltonConfig {
    fn default() -> Self {
        Self {
            fock: "F".to_string(),
            oneelop: "h".to_string(),
            flucpot: "W".to_string(),
            dflucpot: "\\tilde W".to_string(),
            perturbation: "X".to_string(),
        }
    }
}
