//! Lexic element — §4.1 `Lelem`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a lexic element (§4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lex {
    Bra,
    Ket,
    LPar,
    RPar,
    Oper,
    Param,
    Num,
    Frac,
    Plus,
    Minus,
    Times,
    Div,
    Sum,
    Perm,
}

/// The connection marker a parenthesis pair carries (§4.1, §6 Connect/Disconnect
/// resolution: `\pconn(...)` / `\pdisconn(...)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conn {
    Normal,
    Connect,
    Disconnect,
}

/// A single tokenised lexic element: raw text, its kind, an optional
/// connection marker (meaningful only on `LPar`/`RPar`), and a flag
/// preventing a bra-ket product from being re-expanded (§4.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lelem {
    name: String,
    lex: Lex,
    conn: Conn,
    bra_expanded: bool,
    /// Connection-group tag: set while `expand()` walks a `Connect`/
    /// `Disconnect`-marked parenthesis, and read once more, after expansion
    /// has fully settled, to assemble `Term::connections` (§4.1 "recording
    /// connection constraints"). `true` means the group requires the
    /// tagged operators to end up connected, `false` disconnected.
    group: Option<(u32, bool)>,
}

impl Lelem {
    pub fn new(name: impl Into<String>, lex: Lex) -> Self {
        Self { name: name.into(), lex, conn: Conn::Normal, bra_expanded: false, group: None }
    }

    pub fn with_conn(name: impl Into<String>, lex: Lex, conn: Conn) -> Self {
        Self { name: name.into(), lex, conn, bra_expanded: false, group: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lex(&self) -> Lex {
        self.lex
    }

    pub fn conn(&self) -> Conn {
        self.conn
    }

    pub fn expandedbra(&self) -> bool {
        self.bra_expanded
    }

    /// The same element, marked as having its bra-ket product already
    /// expanded (§4.1, prevents re-expansion of `(A+B)` sub-products that
    /// live between a `Bra` and its matching `Ket`).
    pub fn braexpanded(&self) -> Self {
        let mut l = self.clone();
        l.bra_expanded = true;
        l
    }

    pub fn conn_group(&self) -> Option<(u32, bool)> {
        self.group
    }

    pub fn tag_group(&mut self, id: u32, connect: bool) {
        self.group = Some((id, connect));
    }
}

impl fmt::Display for Lelem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
