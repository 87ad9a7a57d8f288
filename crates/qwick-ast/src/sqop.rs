//! Second-quantised operator — §3 DATA MODEL `SQOp`.

use crate::orbital::{Orbital, OrbitalType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a second-quantised operator creates, annihilates, or (after a
/// particle-hole transform collapses active/general lines) is left generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Creator,
    Annihilator,
    General,
}

/// A single second-quantised operator acting on one orbital.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SQOp {
    gender: Gender,
    orb: Orbital,
}

impl SQOp {
    pub fn new(gender: Gender, orb: Orbital) -> Self {
        Self { gender, orb }
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// The gender this operator has in particle-hole form: occupied
    /// creators/annihilators flip, and active/general-T orbitals become
    /// [`Gender::General`] (§3: "active/GenT orbitals become General").
    pub fn gender_ph(&self) -> Gender {
        match (self.orb.ty(), self.gender) {
            (OrbitalType::Occ, Gender::Creator) => Gender::Annihilator,
            (OrbitalType::Occ, Gender::Annihilator) => Gender::Creator,
            (OrbitalType::Act, _) | (OrbitalType::GenT, _) => Gender::General,
            _ => self.gender,
        }
    }

    pub fn orb(&self) -> &Orbital {
        &self.orb
    }

    pub fn orb_mut(&mut self) -> &mut Orbital {
        &mut self.orb
    }

    pub fn replace(&mut self, from: &Orbital, to: &Orbital) {
        if &self.orb == from {
            self.orb = to.clone();
        }
    }
}

impl PartialOrd for SQOp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SQOp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.gender, &self.orb).cmp(&(other.gender, &other.orb))
    }
}

impl fmt::Display for SQOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\op{{{}}}", self.orb)?;
        match self.gender {
            Gender::Creator => write!(f, "^\\dg"),
            Gender::Annihilator | Gender::General => Ok(()),
        }
    }
}
