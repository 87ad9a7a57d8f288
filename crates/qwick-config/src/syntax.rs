//! `syntax.*` keys — §6 External Interfaces.

use serde::{Deserialize, Serialize};

/// Mini-language syntax keywords. All fields come from the dictionary's
/// `syntax` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxConfig {
    /// Symbols treated as a dagger marker in a superscript; the first is
    /// canonical (`syntax.dg`, §6).
    pub dg: Vec<String>,
    /// Two-element `[less, more]` prefix pair for non-conserving electron
    /// counts (`syntax.lessmore`, §6).
    pub lessmore: [String; 2],
    /// Reference bra/ket names that yield the identity operator
    /// (`syntax.ref`, §6).
    #[serde(rename = "ref")]
    pub reference: Vec<String>,
    /// Configuration-state-function keywords opening an explicit
    /// excitation block (`syntax.csf`, §6).
    pub csf: Vec<String>,
    /// Operator base names treated as bare excitation operators
    /// (`syntax.bexcop`, §6).
    pub bexcop: Vec<String>,
}

impl SyntaxConfig {
    /// `lessmore[0]` is the "less" prefix (negative non-conserving count).
    pub fn less(&self) -> &str {
        &self.lessmore[0]
    }

    /// `lessmore[1]` is the "more" prefix (positive non-conserving count).
    pub fn more(&self) -> &str {
        &self.lessmore[1]
    }

    pub fn is_reference(&self, name: &str) -> bool {
        self.reference.iter().any(|r| r == name)
    }

    pub fn is_csf(&self, name: &str) -> bool {
        self.csf.iter().any(|r| r == name)
    }

    pub fn is_bare_excop(&self, name: &str) -> bool {
        self.bexcop.iter().any(|r| r == name)
    }

    pub fn is_dagger(&self, token: &str) -> bool {
        self.dg.iter().any(|d| d == token)
    }

    pub fn canonical_dagger(&self) -> &str {
        self.dg.first().map(|s| s.as_str()).unwrap_or("\\dg")
    }
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            dg: vec!["\\dg".to_string()],
            lessmore: ["less".to_string(), "more".to_string()],
            reference: vec!["HF".to_string(), "0".to_string()],
            csf: vec!["Phi".to_string()],
            bexcop: vec!["T".to_string(), "R".to_string()],
        }
    }
}
