//! Flat character-level tokeniser — the pass logos handles well, before the
//! brace-nesting / bra-ket assembly pass in [`crate::lelstring`] that logos
//! itself cannot express (grounded on the teacher's `synton-lexer::Token`
//! shape: one flat `Logos` enum covering delimiters, operators, literals and
//! identifiers).

use logos::Logos;

/// A single flat token of the LaTeX-flavoured mini-language (§6 External
/// Interfaces).
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token<'a> {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("^")]
    Caret,
    #[token("_")]
    Underscore,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("|")]
    Pipe,
    #[token(",")]
    Comma,

    /// A backslash command word: `\sum`, `\perm`, `\param`, `\frac`,
    /// `\langle`, `\rangle`, `\pconn`, `\pdisconn`, or a macro/Hamiltonian
    /// symbol spelled with a backslash (`\tilde`, `\hat`, ...).
    #[regex(r"\\[A-Za-z]+", |lex| lex.slice())]
    Command(&'a str),

    #[regex(r"[0-9]+", |lex| lex.slice())]
    Number(&'a str),

    /// A bare identifier: an operator/parameter name, orbital letter, or
    /// macro name written without a leading backslash.
    #[regex(r"[A-Za-z][A-Za-z0-9']*", |lex| lex.slice())]
    Ident(&'a str),
}

impl<'a> Token<'a> {
    /// The raw source text this token covers, for error messages.
    pub fn text(&self) -> &'a str {
        match self {
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Caret => "^",
            Token::Underscore => "_",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Pipe => "|",
            Token::Comma => ",",
            Token::Command(s) | Token::Number(s) | Token::Ident(s) => s,
        }
    }
}
