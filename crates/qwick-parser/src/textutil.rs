//! Small character-scanning helpers used by [`crate::parsed_name`], mirroring
//! the original's `IL::skip`/`IL::nextwordpos`/`IL::nameupdown` free
//! functions (grounded on `original_source/src/equation.cpp`'s call sites;
//! the `IL` namespace itself wasn't part of the retrieved original source,
//! so these are reconstructed from how every call site uses them).

/// Advance past any leading characters found in `chars`, returning the new
/// character-index position.
pub fn skip(s: &str, pos: usize, chars: &str) -> usize {
    let v: Vec<char> = s.chars().collect();
    let mut i = pos.min(v.len());
    while i < v.len() && chars.contains(v[i]) {
        i += 1;
    }
    i
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\\' || c == '\''
}

/// Find the end (exclusive) of the word starting at `pos`: a maximal run of
/// alphanumeric/backslash/apostrophe characters. Returns `pos` unchanged
/// (no progress) if `s[pos]` isn't a word character, the signal the callers
/// use to detect "no more words".
pub fn nextwordpos(s: &str, pos: usize) -> usize {
    let v: Vec<char> = s.chars().collect();
    let mut i = pos.min(v.len());
    while i < v.len() && is_word_char(v[i]) {
        i += 1;
    }
    i
}

/// Extract a word as a `&str` slice of `s`, given char-index bounds from
/// [`skip`]/[`nextwordpos`] (character-index safe for the ASCII-ish mini-
/// language this lexes).
pub fn slice_chars(s: &str, beg: usize, end: usize) -> String {
    s.chars().skip(beg).take(end.saturating_sub(beg)).collect()
}

/// Find the index (character position) of the `}` matching the `{` at
/// `open_idx`.
pub fn closbrack_str(s: &str, open_idx: usize) -> Option<usize> {
    let v: Vec<char> = s.chars().collect();
    if open_idx >= v.len() || v[open_idx] != '{' {
        return None;
    }
    let mut depth = 0i32;
    for (i, &c) in v.iter().enumerate().skip(open_idx) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strip LaTeX decoration (`{`, `}`, `\`) from a captured token, leaving the
/// bare alphanumeric orbital name (§4.3 `IL::plainname`).
pub fn plainname(raw: &str) -> String {
    raw.chars().filter(|c| c.is_alphanumeric() || *c == '\'').collect()
}

/// Split `namein` into `(name, up, down)`: the plain name before any
/// top-level `^`/`_` decoration, the superscript region (from the first
/// top-level `^` to the next top-level `_`, if any), and the subscript
/// region (from the first top-level `_` to the end of the string).
///
/// When a top-level `_` precedes any top-level `^`, the whole remainder
/// (including that later `^{...}` group) becomes `down` — matching the
/// original's one-level-nested `Name_{excl}^{upper}_{lower}` shape, where
/// the inner `^{upper}_{lower}` pair is recovered by calling this function
/// again on `down`'s tail (§4.2 "a second layer may follow").
pub fn nameupdown(namein: &str) -> (String, String, String) {
    let v: Vec<char> = namein.chars().collect();
    let mut depth = 0i32;
    let mut p_up: Option<usize> = None;
    let mut p_down: Option<usize> = None;
    for (i, &c) in v.iter().enumerate() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            '^' if depth == 0 && p_up.is_none() => p_up = Some(i),
            '_' if depth == 0 && p_down.is_none() => p_down = Some(i),
            _ => {}
        }
        if p_up.is_some() && p_down.is_some() {
            break;
        }
    }
    let first_delim = match (p_up, p_down) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => v.len(),
    };
    let name = slice_chars(namein, 0, first_delim);
    let (up, down) = match (p_up, p_down) {
        (Some(pu), Some(pd)) if pu < pd => (slice_chars(namein, pu, pd), slice_chars(namein, pd, v.len())),
        (Some(pu), Some(_)) => (String::new(), slice_chars(namein, pu.min(v.len()), v.len())),
        (Some(pu), None) => (slice_chars(namein, pu, v.len()), String::new()),
        (None, Some(pd)) => (String::new(), slice_chars(namein, pd, v.len())),
        (None, None) => (String::new(), String::new()),
    };
    (name, up, down)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nameupdown_splits_plain_superscript_subscript() {
        let (name, up, down) = nameupdown("T^{\\dg}_{2}");
        assert_eq!(name, "T");
        assert_eq!(up, "^{\\dg}");
        assert_eq!(down, "_{2}");
    }

    #[test]
    fn nameupdown_nests_superscript_inside_subscript() {
        let (name, up, down) = nameupdown("T_2^{ij}_{ab}");
        assert_eq!(name, "T");
        assert_eq!(up, "");
        assert_eq!(down, "_2^{ij}_{ab}");
    }

    #[test]
    fn nameupdown_name_only() {
        let (name, up, down) = nameupdown("W");
        assert_eq!(name, "W");
        assert!(up.is_empty() && down.is_empty());
    }

    #[test]
    fn closbrack_str_finds_nested_match() {
        let s = "{a{b}c}";
        assert_eq!(closbrack_str(s, 0), Some(6));
    }

    #[test]
    fn plainname_strips_braces_and_backslash() {
        assert_eq!(plainname("{\\tilde i}"), "tildei");
        assert_eq!(plainname("a1"), "a1");
    }
}
