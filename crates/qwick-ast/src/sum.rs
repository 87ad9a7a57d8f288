//! Generic "sum" container — §2 `Sum<K,V>`.
//!
//! An ordered list of `(key, coefficient)` pairs with additive combination.
//! Plain `PartialEq`-based merging is enough for the simple uses in this
//! crate (`Sum<Permut, Factor>`); `Term`'s own sum needs the richer
//! `Term::equal` merge and builds that on top in `qwick-engine` rather than
//! specialising this container.

use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, Neg};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sum<K, V> {
    terms: Vec<(K, V)>,
}

impl<K, V> Sum<K, V> {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn push(&mut self, key: K, val: V) {
        self.terms.push((key, val));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.terms.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, (K, V)> {
        self.terms.iter_mut()
    }

    pub fn into_vec(self) -> Vec<(K, V)> {
        self.terms
    }
}

impl<K, V> Default for Sum<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> IntoIterator for Sum<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;
    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Sum<K, V> {
    type Item = &'a (K, V);
    type IntoIter = std::slice::Iter<'a, (K, V)>;
    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl<K: PartialEq, V: AddAssign + Clone> Sum<K, V> {
    /// Add `key` with coefficient `val`, merging into an existing
    /// (plain-`Eq`) matching key if present.
    pub fn add(&mut self, key: K, val: V) {
        if let Some((_, v)) = self.terms.iter_mut().find(|(k, _)| *k == key) {
            *v += val;
        } else {
            self.terms.push((key, val));
        }
    }
}

impl<K: PartialEq, V: AddAssign + Clone + Neg<Output = V>> Sum<K, V> {
    pub fn sub(&mut self, key: K, val: V) {
        self.add(key, -val);
    }
}

impl<K: PartialEq + Clone, V: AddAssign + Clone> AddAssign<Sum<K, V>> for Sum<K, V> {
    fn add_assign(&mut self, rhs: Sum<K, V>) {
        for (k, v) in rhs.terms {
            self.add(k, v);
        }
    }
}

impl<K: Clone, V: Clone> FromIterator<(K, V)> for Sum<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { terms: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merges_equal_keys() {
        let mut s: Sum<&str, i32> = Sum::new();
        s.add("a", 1);
        s.add("b", 2);
        s.add("a", 3);
        assert_eq!(s.len(), 2);
        assert_eq!(s.iter().find(|(k, _)| *k == "a").unwrap().1, 4);
    }

    #[test]
    fn sub_negates_before_merging() {
        let mut s: Sum<&str, i32> = Sum::new();
        s.add("a", 5);
        s.sub("a", 2);
        assert_eq!(s.iter().next().unwrap().1, 3);
    }
}
