//! Kronecker delta — §3 DATA MODEL.

use crate::orbital::Orbital;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pair of orbitals asserted equal by a Wick contraction. The convention
/// is "replace `b` by `a` on substitution" (§3).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Kronecker {
    a: Orbital,
    b: Orbital,
}

impl Kronecker {
    pub fn new(a: Orbital, b: Orbital) -> Self {
        Self { a, b }
    }

    /// The orbital that survives a substitution.
    pub fn keep(&self) -> &Orbital {
        &self.a
    }

    /// The orbital that gets replaced by [`Kronecker::keep`].
    pub fn replaced(&self) -> &Orbital {
        &self.b
    }
}

impl PartialOrd for Kronecker {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kronecker {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (&self.a, &self.b).cmp(&(&other.a, &other.b))
    }
}

impl fmt::Display for Kronecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\delta_{{{}{}}}", self.a, self.b)
    }
}
