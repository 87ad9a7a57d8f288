//! Tensor matrices — §3 DATA MODEL `Matrices`.

use crate::orbital::Orbital;
use crate::product::Product;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of tensor a [`Matrices`] value represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpType {
    /// Placeholder / trivial matrix, dropped by `deleteNoneMats`.
    None,
    /// Fock matrix.
    Fock,
    /// One-electron operator (supplemental to spec.md's hamilton map,
    /// grounded on `original_source/src/operators.cpp`).
    OneEl,
    /// Fluctuation potential (two-electron integral).
    FluctP,
    /// External perturbation.
    XPert,
    /// General parameterised excitation amplitude.
    Exc,
    /// General parameterised de-excitation amplitude.
    Deexc,
    /// Bare (unparameterised) excitation operator.
    Exc0,
    /// Bare (unparameterised) de-excitation operator.
    Deexc0,
    /// Intermediate amplitude bound via a `\param{...}` directive.
    Interm,
    /// A bare scalar parameter (no orbital indices).
    Number,
}

impl OpType {
    pub fn is_hamiltonian_part(self) -> bool {
        matches!(self, OpType::Fock | OpType::OneEl | OpType::FluctP | OpType::XPert)
    }

    pub fn is_bare_excitation(self) -> bool {
        matches!(self, OpType::Exc0 | OpType::Deexc0)
    }

    pub fn is_deexcitation(self) -> bool {
        matches!(self, OpType::Deexc | OpType::Deexc0)
    }
}

/// Spin symmetry of a tensor. `Triplet` is a recognised-but-unsupported
/// stub (§9 Design Notes item iii / SPEC_FULL supplement 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spinsym {
    Singlet,
    Triplet,
}

/// A named tensor (amplitude or integral) with an ordered orbital index
/// list. Two matrices are equal iff `type`, `orbs`, `name`, `spinsym` and
/// `antisymform` all match (§3) — the classification fields set by
/// `matrixkind` and the connection bookkeeping are deliberately excluded
/// from equality, since they are derived/auxiliary state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matrices {
    ty: OpType,
    orbs: Product<Orbital>,
    name: String,
    spinsym: Spinsym,
    antisymform: bool,
    exccl: i16,
    intlines: i16,
    intvirt: i16,
    connected2: Product<i64>,
}

impl Matrices {
    pub fn new(ty: OpType, orbs: Product<Orbital>, name: impl Into<String>, spinsym: Spinsym) -> Self {
        Self {
            ty,
            orbs,
            name: name.into(),
            spinsym,
            antisymform: false,
            exccl: 0,
            intlines: 0,
            intvirt: 0,
            connected2: Product::new(),
        }
    }

    pub fn new_antisym(
        ty: OpType,
        orbs: Product<Orbital>,
        name: impl Into<String>,
        spinsym: Spinsym,
        antisymform: bool,
    ) -> Self {
        let mut m = Self::new(ty, orbs, name, spinsym);
        m.antisymform = antisymform;
        m
    }

    /// The placeholder `None`-typed matrix every fresh `Term` starts with
    /// (`term.addmatrix(empty)` in the original's `reset_term`).
    pub fn none() -> Self {
        Self::new(OpType::None, Product::new(), "", Spinsym::Singlet)
    }

    pub fn ty(&self) -> OpType {
        self.ty
    }

    pub fn orbitals(&self) -> &Product<Orbital> {
        &self.orbs
    }

    pub fn orbitals_mut(&mut self) -> &mut Product<Orbital> {
        &mut self.orbs
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spinsym(&self) -> Spinsym {
        self.spinsym
    }

    pub fn antisymform(&self) -> bool {
        self.antisymform
    }

    pub fn replace(&mut self, from: &Orbital, to: &Orbital) {
        for o in self.orbs.iter_mut() {
            if o == from {
                *o = to.clone();
            }
        }
    }

    pub fn set_kind(&mut self, exccl: i16, intlines: i16, intvirt: i16) {
        self.exccl = exccl;
        self.intlines = intlines;
        self.intvirt = intvirt;
    }

    pub fn kind(&self) -> (i16, i16, i16) {
        (self.exccl, self.intlines, self.intvirt)
    }

    pub fn connections(&self) -> &Product<i64> {
        &self.connected2
    }

    pub fn set_connections(&mut self, conns: Product<i64>) {
        self.connected2 = conns;
    }

    pub fn add_connection(&mut self, c: i64) {
        self.connected2.push(c);
    }

    /// The orbital paired with `orb` in a two-electron block (same
    /// "electron", i.e. same position within a bra or ket half). Returns
    /// `None` when `orb` is not one of this matrix's orbitals or there is
    /// no two-electron structure.
    pub fn orbital_partner(&self, orb: &Orbital) -> Option<&Orbital> {
        let pos = self.orbs.as_slice().iter().position(|o| o == orb)?;
        self.orbital_partner_at(pos)
    }

    pub fn orbital_partner_at(&self, pos: usize) -> Option<&Orbital> {
        let n = self.orbs.len();
        if n == 0 || n % 2 != 0 {
            return None;
        }
        let half = n / 2;
        let partner = if pos < half { pos + half } else { pos - half };
        self.orbs.get(partner)
    }
}

impl PartialEq for Matrices {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
            && self.orbs == other.orbs
            && self.name == other.name
            && self.spinsym == other.spinsym
            && self.antisymform == other.antisymform
    }
}
impl Eq for Matrices {}

impl PartialOrd for Matrices {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Matrices {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.ty as u8, &self.name, &self.orbs, self.antisymform)
            .cmp(&(other.ty as u8, &other.name, &other.orbs, other.antisymform))
    }
}

impl fmt::Display for Matrices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ty == OpType::None {
            return Ok(());
        }
        if self.ty.is_hamiltonian_part() {
            let n = self.orbs.len();
            let half = n / 2;
            write!(f, "\\langle ")?;
            for o in self.orbs.iter().take(half) {
                write!(f, "{o}")?;
            }
            if self.antisymform {
                write!(f, "||")?;
            } else {
                write!(f, "|")?;
            }
            for o in self.orbs.iter().skip(half) {
                write!(f, "{o}")?;
            }
            write!(f, "\\rangle")
        } else {
            write!(f, "{}^{{", self.name)?;
            for o in self.orbs.iter() {
                write!(f, "{o}")?;
            }
            write!(f, "}}")
        }
    }
}
