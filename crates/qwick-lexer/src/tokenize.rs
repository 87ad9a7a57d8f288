//! Raw-string tokeniser: flat [`Token`] pass (logos) plus the brace-nesting
//! and bra-ket assembly pass that produces a [`LelString`] (§6 External
//! Interfaces, §4.1).

use crate::error::{LexError, LexResult};
use crate::lelem::{Conn, Lelem, Lex};
use crate::lelstring::LelString;
use crate::token::Token;
use logos::Logos;

type Spanned<'a> = (Token<'a>, std::ops::Range<usize>);

/// Tokenise a raw mini-language string into a flat [`LelString`]
/// (parentheses still present; macro/parenthesis expansion happens later
/// via [`LelString::expandnewops`]/[`LelString::expand`]).
pub fn tokenize(src: &str) -> LexResult<LelString> {
    let mut lexer = Token::lexer(src);
    let mut toks: Vec<Spanned> = Vec::new();
    while let Some(res) = lexer.next() {
        match res {
            Ok(tok) => toks.push((tok, lexer.span())),
            Err(()) => {
                return Err(LexError::UnrecognisedToken {
                    text: lexer.slice().to_string(),
                    offset: lexer.span().start,
                })
            }
        }
    }
    let mut out = Vec::new();
    let mut i = 0;
    while i < toks.len() {
        i = scan_one(src, &toks, i, &mut out)?;
    }
    Ok(LelString::from_vec(out))
}

/// Consume one atomic element starting at `toks[i]`, pushing the resulting
/// `Lelem`(s) onto `out`, and return the index just past what was consumed.
fn scan_one(src: &str, toks: &[Spanned], i: usize, out: &mut Vec<Lelem>) -> LexResult<usize> {
    let (tok, span) = &toks[i];
    match tok {
        Token::Command(word) if *word == "\\pconn" || *word == "\\pdisconn" => {
            let conn = if *word == "\\pconn" { Conn::Connect } else { Conn::Disconnect };
            if i + 1 >= toks.len() || toks[i + 1].0 != Token::LParen {
                return Err(LexError::UnrecognisedToken { text: word.to_string(), offset: span.start });
            }
            out.push(Lelem::with_conn("(", Lex::LPar, conn));
            Ok(i + 2)
        }
        Token::LParen => {
            out.push(Lelem::new("(", Lex::LPar));
            Ok(i + 1)
        }
        Token::RParen => {
            out.push(Lelem::new(")", Lex::RPar));
            Ok(i + 1)
        }
        Token::Plus => {
            out.push(Lelem::new("+", Lex::Plus));
            Ok(i + 1)
        }
        Token::Minus => {
            out.push(Lelem::new("-", Lex::Minus));
            Ok(i + 1)
        }
        Token::Star => {
            out.push(Lelem::new("*", Lex::Times));
            Ok(i + 1)
        }
        Token::Slash => {
            out.push(Lelem::new("/", Lex::Div));
            Ok(i + 1)
        }
        Token::Number(n) => {
            out.push(Lelem::new(*n, Lex::Num));
            Ok(i + 1)
        }
        Token::Command(word) if *word == "\\sum" => {
            let (text, next) = capture_decorated(src, toks, i);
            out.push(Lelem::new(text, Lex::Sum));
            Ok(next)
        }
        Token::Command(word) if *word == "\\perm" => {
            let (text, next) = capture_decorated(src, toks, i);
            out.push(Lelem::new(strip_command(&text), Lex::Perm));
            Ok(next)
        }
        Token::Command(word) if *word == "\\param" => {
            let (text, next) = capture_decorated(src, toks, i);
            out.push(Lelem::new(strip_command(&text), Lex::Param));
            Ok(next)
        }
        Token::Command(word) if *word == "\\frac" => {
            let (text, next) = capture_frac(src, toks, i)?;
            out.push(Lelem::new(text, Lex::Frac));
            Ok(next)
        }
        Token::Command(word) if *word == "\\langle" => scan_braket(src, toks, i, out),
        Token::Command(word) if *word == "\\rangle" => {
            Err(LexError::UnrecognisedToken { text: word.to_string(), offset: span.start })
        }
        Token::Command(_) | Token::Ident(_) => {
            let (text, next) = capture_decorated(src, toks, i);
            out.push(Lelem::new(text, Lex::Oper));
            Ok(next)
        }
        Token::Comma => Ok(i + 1),
        other => Err(LexError::UnrecognisedToken { text: other.text().to_string(), offset: span.start }),
    }
}

fn strip_command(text: &str) -> String {
    text.splitn(2, '{').nth(1).map(|rest| format!("{{{rest}")).unwrap_or_default()
}

/// Find the index of the token that closes the `{` at `toks[open_idx]`.
fn matching_brace(toks: &[Spanned], open_idx: usize) -> LexResult<usize> {
    let mut depth = 0i32;
    for (k, (t, span)) in toks.iter().enumerate().skip(open_idx) {
        match t {
            Token::LBrace => depth += 1,
            Token::RBrace => {
                depth -= 1;
                if depth == 0 {
                    return Ok(k);
                }
            }
            _ => {}
        }
        let _ = span;
    }
    Err(LexError::UnexpectedEof("}"))
}

/// Capture a name token (`Command`/`Ident`/`Number`) plus any immediately
/// following `^{...}`/`_{...}` decoration groups, returning the raw source
/// text spanned and the index just past it.
fn capture_decorated(src: &str, toks: &[Spanned], start: usize) -> (String, usize) {
    let begin = toks[start].1.start;
    let mut j = start + 1;
    let mut end = toks[start].1.end;
    while j < toks.len() {
        match toks[j].0 {
            Token::Caret | Token::Underscore => {
                if j + 1 < toks.len() && toks[j + 1].0 == Token::LBrace {
                    if let Ok(close) = matching_brace(toks, j + 1) {
                        end = toks[close].1.end;
                        j = close + 1;
                        continue;
                    }
                    break;
                }
                // Bare single-token script, e.g. `T_2` or `R^+`, with no braces.
                if j + 1 < toks.len() && matches!(toks[j + 1].0, Token::Number(_) | Token::Ident(_) | Token::Plus | Token::Minus) {
                    end = toks[j + 1].1.end;
                    j += 2;
                    continue;
                }
                break;
            }
            _ => break,
        }
    }
    (src[begin..end].to_string(), j)
}

fn capture_frac(src: &str, toks: &[Spanned], start: usize) -> LexResult<(String, usize)> {
    if start + 1 >= toks.len() || toks[start + 1].0 != Token::LBrace {
        return Err(LexError::UnexpectedEof("{"));
    }
    let num_close = matching_brace(toks, start + 1)?;
    if num_close + 1 >= toks.len() || toks[num_close + 1].0 != Token::LBrace {
        return Err(LexError::UnexpectedEof("{"));
    }
    let den_close = matching_brace(toks, num_close + 1)?;
    let num = &src[toks[start + 1].1.start + 1..toks[num_close].1.start];
    let den = &src[toks[num_close + 1].1.start + 1..toks[den_close].1.start];
    Ok((format!("{}/{}", num.trim(), den.trim()), den_close + 1))
}

/// Assemble a `\langle bra | middle | ket \rangle` block: `Bra`, the
/// recursively-tokenised middle section, then `Ket` (§4.1: a whole bra-ket
/// is one atomic element for `elem(beg, true)`).
fn scan_braket(src: &str, toks: &[Spanned], langle_idx: usize, out: &mut Vec<Lelem>) -> LexResult<usize> {
    let mut depth = 1i32;
    let mut rangle_idx = None;
    let mut pipes = Vec::new();
    let mut k = langle_idx + 1;
    while k < toks.len() {
        match &toks[k].0 {
            Token::Command(w) if *w == "\\langle" => depth += 1,
            Token::Command(w) if *w == "\\rangle" => {
                depth -= 1;
                if depth == 0 {
                    rangle_idx = Some(k);
                    break;
                }
            }
            Token::Pipe if depth == 1 => pipes.push(k),
            _ => {}
        }
        k += 1;
    }
    let rangle_idx = rangle_idx.ok_or(LexError::UnexpectedEof("\\rangle"))?;
    if pipes.len() < 2 {
        return Err(LexError::MalformedBraKet(src[toks[langle_idx].1.start..toks[rangle_idx].1.end].to_string()));
    }
    let first_pipe = *pipes.first().unwrap();
    let last_pipe = *pipes.last().unwrap();

    let bra_text = src[toks[langle_idx].1.end..toks[first_pipe].1.start].trim();
    let ket_text = src[toks[last_pipe].1.end..toks[rangle_idx].1.start].trim();

    out.push(Lelem::new(bra_text, Lex::Bra));
    let mut m = first_pipe + 1;
    while m < last_pipe {
        m = scan_one(src, toks, m, out)?;
    }
    out.push(Lelem::new(ket_text, Lex::Ket));
    Ok(rangle_idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(s: &LelString) -> Vec<(String, Lex)> {
        s.iter().map(|l| (l.name().to_string(), l.lex())).collect()
    }

    #[test]
    fn tokenizes_fraction_and_operator() {
        let s = tokenize(r"\frac{1}{4} W").unwrap();
        let n = names(&s);
        assert_eq!(n, vec![("1/4".to_string(), Lex::Frac), ("W".to_string(), Lex::Oper)]);
    }

    #[test]
    fn tokenizes_decorated_operator_name() {
        let s = tokenize(r"T_2^{ij}_{ab}").unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].lex(), Lex::Oper);
        assert_eq!(s[0].name(), "T_2^{ij}_{ab}");
    }

    #[test]
    fn tokenizes_braket_reference() {
        let s = tokenize(r"\langle|\tilde H T_2|\rangle").unwrap();
        let n = names(&s);
        assert_eq!(n[0], ("".to_string(), Lex::Bra));
        assert_eq!(n.last().unwrap(), &("".to_string(), Lex::Ket));
        assert!(n.iter().any(|(name, lex)| *lex == Lex::Oper && name == "\\tilde"));
    }

    #[test]
    fn rejects_malformed_braket() {
        let err = tokenize(r"\langle A \rangle").unwrap_err();
        assert!(matches!(err, LexError::MalformedBraKet(_)));
    }

    #[test]
    fn tokenizes_plain_and_marked_parens() {
        let s = tokenize(r"\pconn(A + B) C").unwrap();
        assert_eq!(s[0].lex(), Lex::LPar);
        assert_eq!(s[0].conn(), Conn::Connect);
    }
}
