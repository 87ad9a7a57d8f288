//! Term-builder layer: turns a tokenised equation into the signed sum of
//! [`qwick_engine::Term`]s it denotes (§4.2 `LParsedName`, §4.3 `LEquation`).
//!
//! [`derive`] is the single entry point: it tokenises `source`, expands
//! macros and parentheses, then walks the result twice — a Discover pass
//! that registers every excitation operator's free orbital names, and an
//! Emit pass that builds the real terms against that registry.

pub mod equation;
pub mod error;
pub mod excitation;
pub mod parsed_name;
pub mod textutil;

pub use equation::{derive, LEquation};
pub use error::{ParseError, ParseResult};
pub use excitation::{ExcopsMap, LExcitationInfo};
pub use parsed_name::{try2set, LParsedName};
