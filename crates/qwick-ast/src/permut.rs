//! Permutation symmetry operator — §3 DATA MODEL `Permut`.

use crate::orbital::Orbital;
use crate::product::Product;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A symmetry operation mapping an orbital tuple `from` to `to`
/// (`\perm{ia,jb}` maps `(i,a)` to `(j,b)`, i.e. swaps them in a term).
/// The identity permutation has an empty `from` (§3).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permut {
    from: Product<Orbital>,
    to: Product<Orbital>,
}

impl Permut {
    pub fn identity() -> Self {
        Self { from: Product::new(), to: Product::new() }
    }

    pub fn new(from: Product<Orbital>, to: Product<Orbital>) -> Self {
        Self { from, to }
    }

    pub fn from_pair(a: Orbital, b: Orbital) -> Self {
        let mut from = Product::new();
        from.push(a);
        let mut to = Product::new();
        to.push(b);
        Self { from, to }
    }

    pub fn is_identity(&self) -> bool {
        self.from.is_empty()
    }

    pub fn from_orbs(&self) -> &Product<Orbital> {
        &self.from
    }

    pub fn to_orbs(&self) -> &Product<Orbital> {
        &self.to
    }

    /// Compose `self` with `other`, concatenating their orbital lists —
    /// mirrors the original's `Permut::operator*=`.
    pub fn combine(&self, other: &Permut) -> Permut {
        let mut from = self.from.clone();
        from *= &other.from;
        let mut to = self.to.clone();
        to *= &other.to;
        Permut { from, to }
    }

    /// Apply the permutation to a single orbital: if `orb` appears in
    /// `from` at position `i`, the result is the orbital at position `i`
    /// in `to`; otherwise `orb` is returned unchanged.
    pub fn apply(&self, orb: &Orbital) -> Orbital {
        if let Some(pos) = self.from.as_slice().iter().position(|o| o == orb) {
            if let Some(to) = self.to.get(pos) {
                return to.clone();
            }
        }
        orb.clone()
    }
}

impl Default for Permut {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialOrd for Permut {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Permut {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (&self.from, &self.to).cmp(&(&other.from, &other.to))
    }
}

impl fmt::Display for Permut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return Ok(());
        }
        write!(f, "\\perm{{")?;
        for (i, o) in self.from.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{o}")?;
        }
        write!(f, "/")?;
        for (i, o) in self.to.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{o}")?;
        }
        write!(f, "}}")
    }
}
