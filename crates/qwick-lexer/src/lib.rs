//! Tokeniser, macro expansion and parenthesis expansion for the mini-language
//! equations are written in (§4.1 Lexic Layer).
//!
//! [`tokenize`] turns raw source text into a flat [`LelString`]; from there
//! [`LelString::expandnewops`] substitutes macro operators and
//! [`LelString::expand`] distributes sums over products, yielding the fully
//! expanded element sequence plus its connection constraints that the parser
//! layer consumes term by term.

pub mod error;
pub mod lelem;
pub mod lelstring;
pub mod token;
pub mod tokenize;

pub use error::{LexError, LexResult};
pub use lelem::{Conn, Lelem, Lex};
pub use lelstring::{Connections, LelString, NewOpMap};
pub use token::Token;
pub use tokenize::tokenize;
