//! Wick contraction combinatorics — §4.4 `wickstheorem`/`wick`/`genwick`.
//!
//! `term.h` declares `wick`/`genwick` as recursive routines walking an index
//! list into `_opProd`; the recursion itself (which pairs are contractible,
//! how the anticommutation sign accumulates) isn't in the retrieved
//! `original_source` files, so this module implements the standard true-vacuum
//! Wick recursion: an earlier annihilator contracts with a later creator of
//! the same orbital subspace, contributing a sign `(-1)^d` for the `d`
//! operators jumped to bring them adjacent; survivors are returned in their
//! original relative order for the caller to normal-order.

use qwick_ast::{Gender, Kronecker, OrbitalType, SQOp};

/// One fully-expanded branch of the Wick recursion: the contracted pairs
/// (as `Kronecker`s, in contraction order), the indices of `ops` left
/// uncontracted (original relative order preserved), and the accumulated
/// anticommutation sign.
#[derive(Debug, Clone)]
pub struct WickBranch {
    pub krons: Vec<Kronecker>,
    pub remaining: Vec<usize>,
    pub sign: i64,
}

/// A density-matrix contraction recorded by the generalised Wick recursion
/// when two active-space (`Gender::General`) operators pair up (§4.4
/// "additional bookkeeping list densmat records active-space density-matrix
/// contractions").
#[derive(Debug, Clone)]
pub struct DensityContraction {
    pub orbitals: (qwick_ast::Orbital, qwick_ast::Orbital),
}

fn contractible(a: &SQOp, b: &SQOp) -> bool {
    a.gender() == Gender::Annihilator && b.gender() == Gender::Creator && a.orb().ty() == b.orb().ty()
}

fn general_pair(a: &SQOp, b: &SQOp) -> bool {
    a.gender() == Gender::General && b.gender() == Gender::General
}

/// Enumerate every way of pairing up contractible operators among
/// `indices` (positions into the caller's `ops` slice), including the
/// all-uncontracted branch. Pure standard Wick's theorem (`genw = false`):
/// only `Annihilator`-before-`Creator` pairs of matching orbital subspace
/// contract.
pub fn wick(ops: &[SQOp], indices: &[usize]) -> Vec<WickBranch> {
    if indices.is_empty() {
        return vec![WickBranch { krons: Vec::new(), remaining: Vec::new(), sign: 1 }];
    }
    let first = indices[0];
    let rest = &indices[1..];
    let mut out = Vec::new();

    for branch in wick(ops, rest) {
        let mut remaining = vec![first];
        remaining.extend(branch.remaining);
        out.push(WickBranch { krons: branch.krons, remaining, sign: branch.sign });
    }

    for (k, &j) in rest.iter().enumerate() {
        if !contractible(&ops[first], &ops[j]) {
            continue;
        }
        let mut sub = Vec::with_capacity(rest.len() - 1);
        sub.extend(rest[..k].iter().copied());
        sub.extend(rest[k + 1..].iter().copied());
        let swap_sign: i64 = if k % 2 == 0 { 1 } else { -1 };
        for branch in wick(ops, &sub) {
            let mut krons = vec![Kronecker::new(ops[first].orb().clone(), ops[j].orb().clone())];
            krons.extend(branch.krons);
            out.push(WickBranch { krons, remaining: branch.remaining, sign: swap_sign * branch.sign });
        }
    }
    out
}

/// One branch of the generalised Wick recursion: standard contractions plus
/// density-matrix bookkeeping for active-space (`General`-gender) pairs.
#[derive(Debug, Clone)]
pub struct GenWickBranch {
    pub krons: Vec<Kronecker>,
    pub densmat: Vec<DensityContraction>,
    pub remaining: Vec<usize>,
    pub sign: i64,
}

/// Generalised Wick recursion (`genw = true`): in addition to the standard
/// annihilator/creator pairing, two `General`-gender operators (active or
/// `GenT` orbitals collapsed by the particle-hole transform) may pair into a
/// `densmat` entry instead of a `Kronecker`.
pub fn genwick(ops: &[SQOp], indices: &[usize]) -> Vec<GenWickBranch> {
    if indices.is_empty() {
        return vec![GenWickBranch { krons: Vec::new(), densmat: Vec::new(), remaining: Vec::new(), sign: 1 }];
    }
    let first = indices[0];
    let rest = &indices[1..];
    let mut out = Vec::new();

    for branch in genwick(ops, rest) {
        let mut remaining = vec![first];
        remaining.extend(branch.remaining);
        out.push(GenWickBranch { krons: branch.krons, densmat: branch.densmat, remaining, sign: branch.sign });
    }

    for (k, &j) in rest.iter().enumerate() {
        let as_kron = contractible(&ops[first], &ops[j]);
        let as_dens = general_pair(&ops[first], &ops[j]);
        if !as_kron && !as_dens {
            continue;
        }
        let mut sub = Vec::with_capacity(rest.len() - 1);
        sub.extend(rest[..k].iter().copied());
        sub.extend(rest[k + 1..].iter().copied());
        let swap_sign: i64 = if k % 2 == 0 { 1 } else { -1 };
        for branch in genwick(ops, &sub) {
            let mut krons = branch.krons.clone();
            let mut densmat = branch.densmat.clone();
            if as_kron {
                krons.insert(0, Kronecker::new(ops[first].orb().clone(), ops[j].orb().clone()));
            } else {
                densmat.insert(0, DensityContraction { orbitals: (ops[first].orb().clone(), ops[j].orb().clone()) });
            }
            out.push(GenWickBranch { krons, densmat, remaining: branch.remaining, sign: swap_sign * branch.sign });
        }
    }
    out
}

/// Stable-sort uncontracted survivor indices so creators precede
/// annihilators/generals (true-vacuum normal order), returning the
/// additional sign from the anticommutation swaps performed.
pub fn normal_order_sign(ops: &[SQOp], remaining: &[usize]) -> (Vec<usize>, i64) {
    let mut items: Vec<usize> = remaining.to_vec();
    let mut sign = 1i64;
    // insertion sort by (gender rank), stable among equal rank, counting swaps.
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && rank(ops[items[j - 1]].gender()) > rank(ops[items[j]].gender()) {
            items.swap(j - 1, j);
            sign = -sign;
            j -= 1;
        }
    }
    (items, sign)
}

fn rank(g: Gender) -> u8 {
    match g {
        Gender::Creator => 0,
        Gender::General => 1,
        Gender::Annihilator => 2,
    }
}

/// Gender a `SQOp` should be treated as for the given normal-order flavour.
pub fn effective_gender(op: &SQOp, ph: bool) -> Gender {
    if ph {
        op.gender_ph()
    } else {
        op.gender()
    }
}

/// Whether `ty` participates in the active-space density-matrix bookkeeping
/// rather than ordinary occ/virt contraction.
pub fn is_active_space(ty: OrbitalType) -> bool {
    matches!(ty, OrbitalType::Act | OrbitalType::GenT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qwick_ast::Orbital;

    fn ann(name: &str) -> SQOp {
        SQOp::new(Gender::Annihilator, Orbital::from_name(name))
    }
    fn crea(name: &str) -> SQOp {
        SQOp::new(Gender::Creator, Orbital::from_name(name))
    }

    #[test]
    fn two_operator_contraction_has_one_branch_plus_uncontracted() {
        let ops = vec![ann("i"), crea("a")];
        let branches = wick(&ops, &[0, 1]);
        assert_eq!(branches.len(), 2);
        assert!(branches.iter().any(|b| b.krons.len() == 1 && b.remaining.is_empty()));
        assert!(branches.iter().any(|b| b.krons.is_empty() && b.remaining.len() == 2));
    }

    #[test]
    fn mismatched_subspace_operators_never_contract() {
        let ops = vec![ann("i"), crea("p")]; // occ vs general: not contractible here
        let ops2 = vec![ann("i"), crea("j")]; // both occ
        assert!(wick(&ops, &[0, 1]).iter().all(|b| b.krons.is_empty()));
        assert!(wick(&ops2, &[0, 1]).iter().any(|b| b.krons.len() == 1));
    }
}
