//! Sequences of lexic elements — §4.1 `LelString`.

use crate::error::{LexError, LexResult};
use crate::lelem::{Conn, Lelem, Lex};
use qwick_ast::Product;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

/// One required-contraction group, as positions (1-based) into the fully
/// expanded [`LelString`]: positive entries must end up sharing a
/// summation index, negative entries must not (§3 "Connection constraint").
pub type Connections = Vec<Vec<i64>>;

/// Macro operator dictionary: name → the `LelString` it expands to
/// (§4.1 `NewOpMap`).
pub type NewOpMap = FxHashMap<String, LelString>;

/// A sequence of [`Lelem`]s — §4.1 `LelString`, a thin algebraic wrapper
/// around `Product<Lelem>` the way the original subclasses `Product<Lelem>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LelString(Product<Lelem>);

impl Deref for LelString {
    type Target = Product<Lelem>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for LelString {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl LelString {
    pub fn new() -> Self {
        Self(Product::new())
    }

    pub fn from_vec(items: Vec<Lelem>) -> Self {
        Self(Product::from_vec(items))
    }

    pub fn substring(&self, beg: usize, end: usize) -> LelString {
        let end1 = if end < self.len() { end + 1 } else { self.len() };
        LelString::from_vec(self.as_slice()[beg..end1].to_vec())
    }

    /// Position of the closing bracket matching the `LPar` at `beg`
    /// (§4.1 `closbrack`).
    pub fn closbrack(&self, beg: usize) -> LexResult<usize> {
        let mut depth = 0i32;
        for i in beg..self.len() {
            match self[i].lex() {
                Lex::LPar => depth += 1,
                Lex::RPar => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(i);
                    }
                }
                _ => {}
            }
        }
        Err(LexError::UnbalancedBrackets(beg))
    }

    /// Position of the opening bracket matching the `RPar` at `end`
    /// (§4.1 `openbrack`).
    pub fn openbrack(&self, end: usize) -> LexResult<usize> {
        let mut depth = 0i32;
        let mut i = end as isize;
        while i >= 0 {
            match self[i as usize].lex() {
                Lex::RPar => depth += 1,
                Lex::LPar => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(i as usize);
                    }
                }
                _ => {}
            }
            i -= 1;
        }
        Err(LexError::UnbalancedBrackets(end))
    }

    /// Find the end position of the current atomic element starting at
    /// `beg`; if `bk` is true, `Bra`/`Ket` act as brackets so a whole
    /// `⟨…|…|…⟩` counts as one element (§4.1 `elem`).
    pub fn elem(&self, beg: usize, bk: bool) -> usize {
        match self[beg].lex() {
            Lex::LPar => self.closbrack(beg).unwrap_or(beg),
            Lex::Bra if bk => {
                let mut depth = 1i32;
                let mut i = beg + 1;
                while i < self.len() {
                    match self[i].lex() {
                        Lex::Bra => depth += 1,
                        Lex::Ket => {
                            depth -= 1;
                            if depth == 0 {
                                return i;
                            }
                        }
                        _ => {}
                    }
                    i += 1;
                }
                self.len().saturating_sub(1)
            }
            _ => beg,
        }
    }

    /// Find the end position of the current term (§4.1 `term` = `elem(beg, true)`).
    pub fn term(&self, beg: usize) -> usize {
        self.elem(beg, true)
    }

    /// True iff no parenthesis remains (§4.1 `expanded`).
    pub fn expanded(&self) -> bool {
        self.iter().all(|l| !matches!(l.lex(), Lex::LPar | Lex::RPar))
    }

    /// Repeatedly substitute macro-operator occurrences by their
    /// right-hand-side `LelString`, failing on a cyclic definition
    /// (§4.1 `expandnewops`).
    pub fn expandnewops(&self, macros: &NewOpMap) -> LexResult<LelString> {
        let mut current = self.clone();
        let max_passes = macros.len() + 1;
        for _ in 0..max_passes {
            let mut changed = false;
            let mut out = Vec::new();
            for lel in current.iter() {
                if lel.lex() == Lex::Oper {
                    if let Some(rhs) = macros.get(lel.name()) {
                        out.extend(rhs.iter().cloned());
                        changed = true;
                        continue;
                    }
                }
                out.push(lel.clone());
            }
            current = LelString::from_vec(out);
            if !changed {
                return Ok(current);
            }
        }
        for lel in current.iter() {
            if lel.lex() == Lex::Oper && macros.contains_key(lel.name()) {
                return Err(LexError::CyclicMacro(lel.name().to_string()));
            }
        }
        Ok(current)
    }

    fn prev_term_boundary(&self, pos: usize) -> usize {
        let mut depth = 0i32;
        let mut i = pos;
        while i > 0 {
            i -= 1;
            match self[i].lex() {
                Lex::RPar => depth += 1,
                Lex::LPar => depth -= 1,
                Lex::Plus | Lex::Minus if depth == 0 => return i + 1,
                _ => {}
            }
        }
        0
    }

    fn next_term_boundary(&self, pos: usize) -> usize {
        let mut depth = 0i32;
        let mut i = pos + 1;
        while i < self.len() {
            match self[i].lex() {
                Lex::LPar => depth += 1,
                Lex::RPar => depth -= 1,
                Lex::Plus | Lex::Minus if depth == 0 => return i,
                _ => {}
            }
            i += 1;
        }
        self.len()
    }

    fn split_alternatives(content: &[Lelem]) -> Vec<(bool, Vec<Lelem>)> {
        let mut out = Vec::new();
        let mut depth = 0i32;
        let mut cur: Vec<Lelem> = Vec::new();
        let mut cur_sign = true;
        let mut i = 0;
        if let Some(first) = content.first() {
            match first.lex() {
                Lex::Plus => {
                    i = 1;
                }
                Lex::Minus => {
                    i = 1;
                    cur_sign = false;
                }
                _ => {}
            }
        }
        while i < content.len() {
            let lel = &content[i];
            match lel.lex() {
                Lex::LPar => depth += 1,
                Lex::RPar => depth -= 1,
                Lex::Plus | Lex::Minus if depth == 0 => {
                    out.push((cur_sign, std::mem::take(&mut cur)));
                    cur_sign = lel.lex() == Lex::Plus;
                    i += 1;
                    continue;
                }
                _ => {}
            }
            cur.push(lel.clone());
            i += 1;
        }
        out.push((cur_sign, cur));
        out
    }

    /// Rewrite `(A+B)*C` as `A*C + B*C`, preserving sign. When the
    /// parenthesis is `Connect`/`Disconnect`, tags every operator-bearing
    /// element of the resulting branch (both the content that was inside
    /// the parenthesis and the multiplicative context outside it within
    /// the same term) with a fresh connection-group id, so the constraint
    /// survives further nested rewrites and is read out by
    /// [`LelString::connections`] once expansion settles (§4.1 `expandpar`).
    pub fn expandpar(&self, beg: usize, end: usize, next_group: &mut u32) -> LexResult<LelString> {
        let left_bound = self.prev_term_boundary(beg);
        let right_bound = self.next_term_boundary(end);
        let before = self.as_slice()[0..left_bound].to_vec();
        let prefix = self.as_slice()[left_bound..beg].to_vec();
        let suffix = self.as_slice()[end + 1..right_bound].to_vec();
        let after = self.as_slice()[right_bound..].to_vec();
        let content = self.as_slice()[beg + 1..end].to_vec();
        let marked = self[beg].conn();

        let alternatives = Self::split_alternatives(&content);
        let mut out = before;
        for (i, (sign_positive, items)) in alternatives.into_iter().enumerate() {
            let mut chunk: Vec<Lelem> = Vec::new();
            chunk.extend(prefix.iter().cloned());
            chunk.extend(items);
            chunk.extend(suffix.iter().cloned());
            if marked != Conn::Normal {
                let gid = *next_group;
                *next_group += 1;
                let connect = marked == Conn::Connect;
                for lel in chunk.iter_mut() {
                    if matches!(lel.lex(), Lex::Oper | Lex::Bra | Lex::Ket) {
                        lel.tag_group(gid, connect);
                    }
                }
            }
            if i > 0 {
                out.push(Lelem::new(if sign_positive { "+" } else { "-" }, if sign_positive { Lex::Plus } else { Lex::Minus }));
            } else if !sign_positive {
                out.push(Lelem::new("-", Lex::Minus));
            }
            out.extend(chunk);
        }
        out.extend(after);
        Ok(LelString::from_vec(out))
    }

    /// Expand all parentheses until [`LelString::expanded`] holds
    /// (§4.1 `expand`), returning the resolved connection groups
    /// (§3 "Connection constraint").
    pub fn expand(&self) -> LexResult<(LelString, Connections)> {
        let mut cur = self.clone();
        let mut next_group = 1u32;
        loop {
            if cur.expanded() {
                break;
            }
            let pos = cur.iter().position(|l| l.lex() == Lex::LPar);
            match pos {
                Some(beg) => {
                    let end = cur.closbrack(beg)?;
                    cur = cur.expandpar(beg, end, &mut next_group)?;
                }
                None => break,
            }
        }
        let connections = cur.collect_connections();
        Ok((cur, connections))
    }

    fn collect_connections(&self) -> Connections {
        let mut groups: BTreeMap<u32, Vec<i64>> = BTreeMap::new();
        for (i, lel) in self.iter().enumerate() {
            if let Some((gid, connect)) = lel.conn_group() {
                let idx = (i as i64 + 1) * if connect { 1 } else { -1 };
                groups.entry(gid).or_default().push(idx);
            }
        }
        groups.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lelem::Lex;

    fn oper(name: &str) -> Lelem {
        Lelem::new(name, Lex::Oper)
    }

    #[test]
    fn closbrack_finds_matching_paren() {
        let s = LelString::from_vec(vec![
            Lelem::new("(", Lex::LPar),
            oper("A"),
            Lelem::new("(", Lex::LPar),
            oper("B"),
            Lelem::new(")", Lex::RPar),
            Lelem::new(")", Lex::RPar),
        ]);
        assert_eq!(s.closbrack(0).unwrap(), 5);
        assert_eq!(s.closbrack(2).unwrap(), 4);
    }

    #[test]
    fn unbalanced_brackets_error() {
        let s = LelString::from_vec(vec![Lelem::new("(", Lex::LPar), oper("A")]);
        assert!(s.closbrack(0).is_err());
    }

    #[test]
    fn expand_distributes_sum_over_product() {
        let s = LelString::from_vec(vec![
            Lelem::new("(", Lex::LPar),
            oper("A"),
            Lelem::new("+", Lex::Plus),
            oper("B"),
            Lelem::new(")", Lex::RPar),
            oper("C"),
        ]);
        let (expanded, conns) = s.expand().unwrap();
        assert!(expanded.expanded());
        let names: Vec<&str> = expanded.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["A", "C", "+", "B", "C"]);
        assert!(conns.is_empty());
    }

    #[test]
    fn connect_marked_paren_yields_connection_group_per_branch() {
        let s = LelString::from_vec(vec![
            Lelem::with_conn("(", Lex::LPar, Conn::Connect),
            oper("A"),
            Lelem::new("+", Lex::Plus),
            oper("B"),
            Lelem::new(")", Lex::RPar),
            oper("C"),
        ]);
        let (expanded, conns) = s.expand().unwrap();
        assert_eq!(conns.len(), 2);
        for group in &conns {
            assert_eq!(group.len(), 2);
            assert!(group.iter().all(|&i| i > 0));
        }
        let _ = expanded;
    }

    #[test]
    fn expandnewops_substitutes_macro() {
        let mut macros = NewOpMap::default();
        macros.insert("T2".to_string(), LelString::from_vec(vec![oper("W"), oper("X")]));
        let s = LelString::from_vec(vec![oper("T2")]);
        let out = s.expandnewops(&macros).unwrap();
        let names: Vec<&str> = out.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["W", "X"]);
    }

    #[test]
    fn expandnewops_detects_cycle() {
        let mut macros = NewOpMap::default();
        macros.insert("A".to_string(), LelString::from_vec(vec![oper("B")]));
        macros.insert("B".to_string(), LelString::from_vec(vec![oper("A")]));
        let s = LelString::from_vec(vec![oper("A")]);
        assert!(matches!(s.expandnewops(&macros), Err(LexError::CyclicMacro(_))));
    }
}
