//! Operator/parameter name mini-language parser — §4.2 `LParsedName`.
//!
//! Grounded on `original_source/src/equation.cpp`'s `LParsedName` family
//! (constructor, `parse_superscript`, `parse_subscript`, `gen_orbtypes`);
//! the free `IL::*` scanning helpers it calls are reconstructed in
//! [`crate::textutil`] since the `IL` namespace itself wasn't part of the
//! retrieved original source.

use crate::textutil;
use qwick_ast::OrbitalType;
use qwick_config::SyntaxConfig;

/// Bitmask of [`LParsedName`] fields a caller wants populated. A parse
/// failure on a field the caller did not request must not raise (§4.2) —
/// this parser never raises at all; callers that ask for [`Name`] alone get
/// only the plain name with every other field left at its default.
pub mod try2set {
    /// Populate only `name` (the original's sentinel: "if try2set == Name, return").
    pub const NAME: u32 = 0;
    /// Populate `dg`.
    pub const DG: u32 = 1 << 0;
    /// Populate `lmel`.
    pub const LMEL: u32 = 1 << 1;
    /// Populate `excl`.
    pub const EXCL: u32 = 1 << 2;
    /// Populate `nameadd`.
    pub const NAMEADD: u32 = 1 << 3;
    /// Populate explicit orbital lists (reserved for callers that parse an
    /// explicit `^{ab}_{ij}` excitation directly; unused by this parser's
    /// own fields, kept for parity with §4.2's bitmask set).
    pub const ORBS: u32 = 1 << 4;
    /// Populate `excitation`.
    pub const EXCITATION: u32 = 1 << 5;
    /// Populate `orbtypes`.
    pub const ORBTYPES: u32 = 1 << 6;
}

/// The result of parsing `Name^{superscript}_{subscript}` (§4.2).
#[derive(Debug, Clone, Default)]
pub struct LParsedName {
    /// The plain name before any sub/superscript decoration.
    pub name: String,
    /// Whether a configured dagger marker was found in the superscript.
    pub dg: bool,
    /// Non-conserving electron-count offset parsed from a `lessmore`
    /// prefix in the superscript (0 if none found).
    pub lmel: i32,
    /// Excitation class parsed from the subscript, if it was a bare
    /// integer.
    pub excl: i16,
    /// Superscript text accumulated verbatim (minus the recognised dagger
    /// marker), appended to the operator's displayed name.
    pub nameadd: String,
    /// The subscript's first word: either the excitation-class digits, or
    /// (when that fails to parse) a free label such as `\mu_2`.
    pub excitation: String,
    /// Two orbital-type sequences parsed from a nested `^{upper}_{lower}`
    /// layer following the excitation class, if present.
    pub orbtypes: Vec<Vec<OrbitalType>>,
    /// True iff any sub/superscript decoration was present at all.
    pub foundsscipt: bool,
}

impl LParsedName {
    /// Parse `namein` with the requested fields. Never fails (§4.2).
    pub fn parse(namein: &str, mask: u32, syntax: &SyntaxConfig) -> Self {
        let (name, up, down) = textutil::nameupdown(namein);
        let mut out = Self { name, ..Default::default() };
        if mask == try2set::NAME {
            return out;
        }
        out.foundsscipt = !up.is_empty() || !down.is_empty();
        if !up.is_empty() {
            out.parse_superscript(&up, mask, syntax);
        }
        if !down.is_empty() {
            out.parse_subscript(&down, mask);
        }
        out
    }

    fn parse_superscript(&mut self, up: &str, mask: u32, syntax: &SyntaxConfig) {
        let lmsize = syntax.less().chars().count().max(syntax.more().chars().count());
        let mut ipos = textutil::skip(up, 1, "{} ");
        loop {
            let ipos1 = textutil::nextwordpos(up, ipos);
            if ipos1 == ipos {
                ipos = textutil::skip(up, ipos + 1, "{} ");
                if ipos >= up.chars().count() {
                    break;
                }
                continue;
            }
            let word = textutil::slice_chars(up, ipos, ipos1);
            if syntax.is_dagger(&word) {
                self.dg = true;
                if mask & try2set::NAMEADD != 0 {
                    if !self.nameadd.is_empty() {
                        self.nameadd.push(' ');
                    }
                    self.nameadd.push_str(syntax.canonical_dagger());
                }
            } else {
                if mask & try2set::NAMEADD != 0 {
                    if !self.nameadd.is_empty() {
                        self.nameadd.push(' ');
                    }
                    self.nameadd.push_str(&word);
                }
                if mask & try2set::LMEL != 0 && word.chars().count() > lmsize {
                    let prefix: String = word.chars().take(lmsize).collect();
                    let rest: String = word.chars().skip(lmsize).collect();
                    if let Ok(n) = rest.parse::<i32>() {
                        if prefix == syntax.less() {
                            self.lmel = -n;
                        } else if prefix == syntax.more() {
                            self.lmel = n;
                        }
                    }
                }
            }
            ipos = textutil::skip(up, ipos1, "{} ");
            if ipos >= up.chars().count() {
                break;
            }
        }
    }

    fn parse_subscript(&mut self, down: &str, mask: u32) {
        let ipos = textutil::skip(down, 1, "{} ");
        let ipos1 = textutil::nextwordpos(down, ipos);
        let word = textutil::slice_chars(down, ipos, ipos1);
        if mask & try2set::EXCL != 0 {
            if let Ok(n) = word.parse::<i16>() {
                self.excl = n;
                self.excitation = word;
                if mask & try2set::ORBTYPES != 0 {
                    let rest = textutil::slice_chars(down, ipos1, down.chars().count());
                    if let Some(ot) = gen_orbtypes(&rest) {
                        self.orbtypes = ot;
                    }
                }
                return;
            }
        }
        // Not (or not requested as) an excitation class: keep the subscript
        // as a free label, e.g. `\mu_2`.
        if mask & try2set::EXCITATION != 0 {
            self.excitation = free_label(down);
        } else {
            self.excitation = word;
        }
    }
}

fn free_label(down: &str) -> String {
    let chars: Vec<char> = down.chars().collect();
    if let Some(open) = chars.iter().position(|&c| c == '{') {
        if let Some(close) = textutil::closbrack_str(down, open) {
            return textutil::slice_chars(down, open + 1, close).trim().to_string();
        }
    }
    let ipos = textutil::skip(down, 1, "{} ");
    let ipos1 = textutil::nextwordpos(down, ipos);
    textutil::slice_chars(down, ipos, ipos1)
}

/// Parse a `^{upper}_{lower}` orbital-type layer into two type sequences
/// (§4.2 `gen_orbtypes`). Each letter in `upper`/`lower` is mapped to an
/// `OrbitalType` via the usual naming convention; returns `None` when both
/// sequences are empty (§4.2: "if both empty, clear").
fn gen_orbtypes(s: &str) -> Option<Vec<Vec<OrbitalType>>> {
    let (_, up, down) = textutil::nameupdown(s);
    let t0: Vec<OrbitalType> = up.chars().filter(|c| c.is_ascii_alphabetic()).map(OrbitalType::infer_from_letter).collect();
    let t1: Vec<OrbitalType> = down.chars().filter(|c| c.is_ascii_alphabetic()).map(OrbitalType::infer_from_letter).collect();
    if t0.is_empty() && t1.is_empty() {
        None
    } else {
        Some(vec![t0, t1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax() -> SyntaxConfig {
        SyntaxConfig::default()
    }

    #[test]
    fn parses_dagger_and_excitation_class() {
        let p = LParsedName::parse("T^{\\dg}_{2}", try2set::DG | try2set::EXCL | try2set::EXCITATION, &syntax());
        assert_eq!(p.name, "T");
        assert!(p.dg);
        assert_eq!(p.excl, 2);
    }

    #[test]
    fn parses_nonconserving_more_suffix() {
        let p = LParsedName::parse("R^{more1}_{2}", try2set::LMEL | try2set::EXCL, &syntax());
        assert_eq!(p.lmel, 1);
        assert_eq!(p.excl, 2);
    }

    #[test]
    fn parses_nonconserving_less_suffix() {
        let p = LParsedName::parse("R^{less1}_{2}", try2set::LMEL | try2set::EXCL, &syntax());
        assert_eq!(p.lmel, -1);
    }

    #[test]
    fn free_label_subscript_kept_when_not_integer() {
        let p = LParsedName::parse("\\mu_{2}", try2set::EXCL | try2set::EXCITATION, &syntax());
        assert_eq!(p.excitation, "2");
        // a non-numeric label:
        let p2 = LParsedName::parse("\\mu_{ab}", try2set::EXCL | try2set::EXCITATION, &syntax());
        assert_eq!(p2.excitation, "ab");
    }

    #[test]
    fn name_only_mask_populates_nothing_else() {
        let p = LParsedName::parse("T^{\\dg}_{2}", try2set::NAME, &syntax());
        assert_eq!(p.name, "T");
        assert!(!p.dg);
        assert_eq!(p.excl, 0);
    }

    #[test]
    fn nested_orbtypes_layer_parsed_after_excitation_class() {
        let p = LParsedName::parse(
            "T_2^{ij}_{ab}",
            try2set::EXCL | try2set::ORBTYPES,
            &syntax(),
        );
        assert_eq!(p.excl, 2);
        assert_eq!(p.orbtypes.len(), 2);
        assert_eq!(p.orbtypes[0], vec![OrbitalType::Occ, OrbitalType::Occ]);
        assert_eq!(p.orbtypes[1], vec![OrbitalType::Virt, OrbitalType::Virt]);
    }
}
