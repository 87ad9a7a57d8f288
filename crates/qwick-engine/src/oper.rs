//! Constructed compound operator — §2 `Oper`.
//!
//! Grounded on `original_source/src/operators.cpp`'s `Oper::create_Oper`
//! family: a Hamiltonian-part constructor for `Fock`/`OneEl`/`FluctP`/`XPert`
//! (general `P,Q[,R,S]` indices; the customary antisymmetrised `1/4` for the
//! two-electron block is written explicitly by the caller rather than baked
//! into the matrix, per spec scenario 1) and an excitation-operator constructor building a
//! creator/annihilator product from parallel occupied/virtual orbital lists,
//! with the `1/n!` symmetry prefactor from the multiplicities of each
//! orbital type appearing among the created/annihilated lines.

use crate::error::{EngineError, EngineResult};
use qwick_ast::{factor, Factor, Gender, Matrices, OpType, Orbital, OrbitalType, Product, SQOp, Spinsym};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// A constructed compound operator: its own `Matrices`, `SQOp` product,
/// internal summation indices and prefactor, ready to be multiplied into a
/// [`crate::term::Term`] (§2 `Oper`).
#[derive(Debug, Clone)]
pub struct Oper {
    sqprod: Product<SQOp>,
    mat: Matrices,
    prefac: Factor,
    sumindx: BTreeSet<Orbital>,
    fakesumindx: BTreeSet<Orbital>,
}

impl Oper {
    /// The identity operator: no `SQOp`s, a `None`-kind matrix, prefactor 1.
    /// Used for reference bra/ket markers and the first Discover pass
    /// (§4.3 step 4 "Returns an Oper of kind Exc0/Deexc0 (identity if
    /// excopsonly)").
    pub fn identity() -> Self {
        Self {
            sqprod: Product::new(),
            mat: Matrices::none(),
            prefac: factor::one(),
            sumindx: BTreeSet::new(),
            fakesumindx: BTreeSet::new(),
        }
    }

    /// A Hamiltonian-part operator: `F`/one-electron use 2 general indices
    /// `P,Q`; `W`/`X` use 4, `P^\dg R^\dg S Q` in chemical-notation order.
    /// The customary antisymmetrised `1/4` is left for the caller to write
    /// explicitly (`\frac{1}{4} W`, per spec scenario 1) rather than baked
    /// into the matrix itself.
    pub fn hamiltonian_part(ty: OpType, name: impl Into<String>, antisym: bool) -> Self {
        let mut sqprod = Product::new();
        let mut porbs = Product::new();
        let mut sumindx = BTreeSet::new();
        let p = Orbital::from_name("P");
        let q = Orbital::from_name("Q");
        sqprod *= SQOp::new(Gender::Creator, p.clone());
        porbs *= p.clone();
        sumindx.insert(p);
        porbs *= q.clone();
        sumindx.insert(q.clone());

        let prefac = factor::one();
        if matches!(ty, OpType::FluctP) {
            let r = Orbital::from_name("R");
            let s = Orbital::from_name("S");
            sqprod *= SQOp::new(Gender::Creator, r.clone());
            porbs *= r.clone();
            sumindx.insert(r);
            sqprod *= SQOp::new(Gender::Annihilator, s.clone());
            porbs *= s.clone();
            sumindx.insert(s);
            sqprod *= SQOp::new(Gender::Annihilator, q.clone());
        } else {
            // Fock/OneEl/XPert: two general indices, P^\dg Q
            sqprod *= SQOp::new(Gender::Annihilator, q.clone());
        }
        let mat = Matrices::new_antisym(ty, porbs, name, Spinsym::Singlet, antisym);
        Self { sqprod, mat, prefac, sumindx, fakesumindx: BTreeSet::new() }
    }

    /// An excitation/de-excitation operator built from parallel occupied and
    /// virtual orbital lists (already-named, e.g. from an explicit `^{ab}_{ij}`
    /// block or from freshly minted free orbital names).
    ///
    /// For `Exc`/`Exc0` the occupied orbitals are annihilated and the virtual
    /// ones created; for `Deexc`/`Deexc0` the roles swap. `Exc0`/`Deexc0`
    /// mark every orbital `fake` (no visible summation index, §3 `realsumindx`).
    pub fn excitation(ty: OpType, occs: &Product<Orbital>, virts: &Product<Orbital>, name: impl Into<String>) -> Self {
        for orb in occs.iter() {
            if orb.ty() != OrbitalType::Occ {
                tracing::warn!(orbital = %orb, expected = "Occ", "excitation operator built with an orbital of unexpected type");
            }
        }
        for orb in virts.iter() {
            if orb.ty() != OrbitalType::Virt {
                tracing::warn!(orbital = %orb, expected = "Virt", "excitation operator built with an orbital of unexpected type");
            }
        }
        let (creators, annihilators) = if ty.is_deexcitation() { (occs, virts) } else { (virts, occs) };
        let ncrea = creators.len();
        let nanni = annihilators.len();
        let nmax = ncrea.max(nanni);

        let mut sqprod = Product::new();
        let mut porbs = Product::new();
        let mut sumindx = BTreeSet::new();
        let mut fakesumindx = BTreeSet::new();
        let mut type_counts: FxHashMap<(u8, bool), usize> = FxHashMap::default();
        let fake = ty.is_bare_excitation();

        for i in 0..nmax {
            if i < ncrea {
                let orb = creators[i].clone();
                sqprod *= SQOp::new(Gender::Creator, orb.clone());
                porbs *= orb.clone();
                sumindx.insert(orb.clone());
                if fake {
                    fakesumindx.insert(orb.clone());
                }
                *type_counts.entry((orb.ty() as u8, true)).or_insert(0) += 1;
            }
            if i < nanni {
                let orb = annihilators[i].clone();
                sqprod *= SQOp::new(Gender::Annihilator, orb.clone());
                porbs *= orb.clone();
                sumindx.insert(orb.clone());
                if fake {
                    fakesumindx.insert(orb.clone());
                }
                *type_counts.entry((orb.ty() as u8, false)).or_insert(0) += 1;
            }
        }

        let mut prefac_denom = 1i64;
        for count in type_counts.values() {
            for i in 1..=*count as i64 {
                prefac_denom *= i;
            }
        }
        let prefac = Factor::new(1, prefac_denom);
        let mat = Matrices::new(ty, porbs, name, Spinsym::Singlet);
        Self { sqprod, mat, prefac, sumindx, fakesumindx }
    }

    /// Build occupied/virtual orbital lists of the requested shape from a
    /// single occupied and virtual base orbital (the bare short-form
    /// constructor, `name^{}_{exccl}` with no explicit orbital lists),
    /// numbering the extra slots `occ, occ1, occ2, ...`.
    pub fn excitation_from_base(
        ty: OpType,
        exccl: i16,
        occ_base: &Orbital,
        virt_base: &Orbital,
        name: impl Into<String>,
        lm: i16,
    ) -> EngineResult<Self> {
        let nocc = exccl;
        let nvirt = exccl + lm;
        if nocc < 0 || nvirt < 0 {
            return Err(EngineError::ExcitationShapeMismatch {
                exccl,
                lm,
                occs: nocc.max(0) as usize,
                virts: nvirt.max(0) as usize,
            });
        }
        let mut occs = Product::new();
        for i in 0..nocc {
            occs *= numbered(occ_base, i);
        }
        let mut virts = Product::new();
        for i in 0..nvirt {
            virts *= numbered(virt_base, i);
        }
        Ok(Self::excitation(ty, &occs, &virts, name))
    }

    pub fn mat(&self) -> &Matrices {
        &self.mat
    }

    pub fn sqprod(&self) -> &Product<SQOp> {
        &self.sqprod
    }

    pub fn prefac(&self) -> Factor {
        self.prefac
    }

    pub fn sumindx(&self) -> &BTreeSet<Orbital> {
        &self.sumindx
    }

    /// Summation indices with the fake (bare-excitation) ones removed.
    pub fn realsumindx(&self) -> BTreeSet<Orbital> {
        self.sumindx.difference(&self.fakesumindx).cloned().collect()
    }

    pub fn fakesumindx(&self) -> &BTreeSet<Orbital> {
        &self.fakesumindx
    }
}

fn numbered(base: &Orbital, i: i16) -> Orbital {
    let name = if i == 0 { base.name().to_string() } else { format!("{}{}", base.name(), i) };
    Orbital::new(name, base.ty(), base.spin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hamiltonian_fock_has_two_general_indices() {
        let op = Oper::hamiltonian_part(OpType::Fock, "F", false);
        assert_eq!(op.mat().orbitals().len(), 2);
        assert_eq!(op.sqprod().len(), 2);
        assert_eq!(op.prefac(), factor::one());
    }

    #[test]
    fn hamiltonian_fluctp_has_four_orbitals_and_no_builtin_prefactor() {
        let op = Oper::hamiltonian_part(OpType::FluctP, "W", true);
        assert_eq!(op.mat().orbitals().len(), 4);
        assert_eq!(op.prefac(), factor::one());
    }

    #[test]
    fn bare_excitation_class_two_builds_four_operators() {
        let occ = Orbital::from_name("i");
        let virt = Orbital::from_name("a");
        let op = Oper::excitation_from_base(OpType::Exc0, 2, &occ, &virt, "T", 0).unwrap();
        assert_eq!(op.sqprod().len(), 4);
        assert!(op.realsumindx().is_empty());
    }
}
