//! Orbital and spin value types — §3 DATA MODEL.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The "kind" of an orbital index: which subspace it ranges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrbitalType {
    /// Occupied in the reference determinant.
    Occ,
    /// Virtual (unoccupied) in the reference determinant.
    Virt,
    /// Active-space orbital.
    Act,
    /// General orbital restricted to the active-space generalised-Wick bookkeeping.
    GenT,
    /// Fully general orbital (ranges over the whole basis).
    Gen,
}

impl OrbitalType {
    /// All variants, in canonical iteration order (mirrors the original's
    /// `for (it = Orbital::Occ; it < Orbital::MaxType; ++it)` loops).
    pub const ALL: [OrbitalType; 5] = [
        OrbitalType::Occ,
        OrbitalType::Virt,
        OrbitalType::Act,
        OrbitalType::GenT,
        OrbitalType::Gen,
    ];

    /// Default base letter used when minting a fresh free orbital name of this type.
    pub const fn default_letter(self) -> char {
        match self {
            OrbitalType::Occ => 'i',
            OrbitalType::Virt => 'a',
            OrbitalType::Act => 't',
            OrbitalType::GenT => 'p',
            OrbitalType::Gen => 'P',
        }
    }

    /// Infer an orbital type from its leading letter, following the usual
    /// quantum-chemistry naming convention (i,j,k,... occupied; a,b,c,...
    /// virtual; t,u,v,w active; p,q,r,s general).
    pub fn infer_from_letter(c: char) -> OrbitalType {
        match c.to_ascii_lowercase() {
            'i' | 'j' | 'k' | 'l' | 'm' | 'n' | 'o' => OrbitalType::Occ,
            'a' | 'b' | 'c' | 'd' | 'e' | 'f' | 'g' | 'h' => OrbitalType::Virt,
            't' | 'u' | 'v' | 'w' => OrbitalType::Act,
            _ => OrbitalType::Gen,
        }
    }
}

impl fmt::Display for OrbitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrbitalType::Occ => "occ",
            OrbitalType::Virt => "virt",
            OrbitalType::Act => "act",
            OrbitalType::GenT => "gent",
            OrbitalType::Gen => "gen",
        };
        f.write_str(s)
    }
}

/// Spin label carried by an orbital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpinType {
    /// Spin-free (no spin label, e.g. after spin integration).
    None,
    Alpha,
    Beta,
    /// Generic spin, same for a whole group of indistinguishable operators (spin-integrated default).
    GenS,
    /// Generic spin-difference marker used by the (stubbed) triplet code path.
    GenD,
}

impl fmt::Display for SpinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpinType::None => "",
            SpinType::Alpha => "\\alpha",
            SpinType::Beta => "\\beta",
            SpinType::GenS => "\\sigma",
            SpinType::GenD => "\\bar\\sigma",
        };
        f.write_str(s)
    }
}

/// A spin label. Thin wrapper so call sites read `Spin::new(SpinType::Alpha)`
/// rather than passing the bare enum, matching the original's `Spin` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Spin {
    ty: SpinType,
}

impl Spin {
    pub const fn new(ty: SpinType) -> Self {
        Self { ty }
    }

    pub const fn none() -> Self {
        Self::new(SpinType::None)
    }

    pub fn ty(&self) -> SpinType {
        self.ty
    }

    pub fn set_type(&mut self, ty: SpinType) {
        self.ty = ty;
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::none()
    }
}

/// A single tensor index: a named orbital with a type and a spin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Orbital {
    name: String,
    ty: OrbitalType,
    spin: Spin,
}

impl Orbital {
    pub fn new(name: impl Into<String>, ty: OrbitalType, spin: Spin) -> Self {
        Self { name: name.into(), ty, spin }
    }

    /// Construct an orbital inferring its type from the leading letter of
    /// `name`, with no spin label. Mirrors the original's `Orbital(string)`
    /// single-argument constructor.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let ty = name
            .chars()
            .next()
            .map(OrbitalType::infer_from_letter)
            .unwrap_or(OrbitalType::Gen);
        Self { name, ty, spin: Spin::none() }
    }

    pub fn from_name_spin(name: impl Into<String>, spin: Spin) -> Self {
        let mut orb = Self::from_name(name);
        orb.spin = spin;
        orb
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> OrbitalType {
        self.ty
    }

    pub fn spin(&self) -> Spin {
        self.spin
    }

    pub fn set_spin(&mut self, spin: Spin) {
        self.spin = spin;
    }

    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = spin;
        self
    }

    /// The name with any trailing digits stripped — two orbitals share a
    /// "letter family" when their `letname()`s match.
    pub fn letname(&self) -> &str {
        self.name.trim_end_matches(|c: char| c.is_ascii_digit())
    }

    pub fn same_letter_family(&self, other: &Orbital) -> bool {
        self.letname() == other.letname()
    }
}

impl PartialOrd for Orbital {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Orbital {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.ty, &self.name, self.spin).cmp(&(other.ty, &other.name, other.spin))
    }
}

impl fmt::Display for Orbital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.spin.ty() != SpinType::None {
            write!(f, "_{{{}}}", self.spin.ty())?;
        }
        Ok(())
    }
}

/// Error parsing an [`Orbital`] back out of its canonical textual form.
#[derive(Debug, thiserror::Error)]
pub enum ParseOrbitalError {
    #[error("empty orbital name")]
    Empty,
}

impl FromStr for Orbital {
    type Err = ParseOrbitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let base = s.split("_{").next().unwrap_or(s);
        if base.is_empty() {
            return Err(ParseOrbitalError::Empty);
        }
        Ok(Orbital::from_name(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letname_strips_trailing_digits() {
        let o = Orbital::from_name("i12");
        assert_eq!(o.letname(), "i");
    }

    #[test]
    fn infers_type_from_letter() {
        assert_eq!(Orbital::from_name("i").ty(), OrbitalType::Occ);
        assert_eq!(Orbital::from_name("a1").ty(), OrbitalType::Virt);
        assert_eq!(Orbital::from_name("t").ty(), OrbitalType::Act);
        assert_eq!(Orbital::from_name("P").ty(), OrbitalType::Gen);
    }

    #[test]
    fn ordering_is_type_then_name_then_spin() {
        let occ = Orbital::from_name("i");
        let virt = Orbital::from_name("a");
        assert!(occ < virt);
    }

    #[test]
    fn roundtrips_through_canonical_display() {
        let o = Orbital::from_name("a3");
        let printed = o.to_string();
        let reparsed: Orbital = printed.parse().unwrap();
        assert_eq!(reparsed.letname().chars().next(), o.letname().chars().next());
        assert_eq!(reparsed.name(), o.name());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn letter() -> impl Strategy<Value = char> {
        prop_oneof![Just('i'), Just('j'), Just('a'), Just('b'), Just('t'), Just('u'), Just('P'), Just('Q')]
    }

    fn orbital_name() -> impl Strategy<Value = String> {
        (letter(), 0u32..5).prop_map(|(c, n)| if n == 0 { c.to_string() } else { format!("{c}{n}") })
    }

    proptest! {
        /// §8 round-trip law: parse, emit canonical form, reparse -> same name/type.
        #[test]
        fn orbital_name_survives_display_reparse(name in orbital_name()) {
            let o = Orbital::from_name(&name);
            let reparsed: Orbital = o.to_string().parse().unwrap();
            prop_assert_eq!(reparsed.name(), o.name());
            prop_assert_eq!(reparsed.ty(), o.ty());
        }

        /// `letname` is stable under appending then stripping digits.
        #[test]
        fn letname_ignores_trailing_digit_suffix(c in letter(), n in 0u32..100) {
            let name = format!("{c}{n}");
            let o = Orbital::from_name(&name);
            prop_assert_eq!(o.letname(), c.to_string());
        }
    }
}
