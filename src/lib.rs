//! Symbolic derivation engine for many-body quantum-chemistry equations.
//!
//! This crate is the facade wiring the lexic layer ([`qwick_lexer`]), the
//! term-builder ([`qwick_parser`]) and the algebraic engine
//! ([`qwick_engine`]) together behind a single [`derive`] entry point, the
//! way the teacher's workspace root would assemble compiler stages for a
//! driver — except the driver itself (CLI, config loader, pretty-printer)
//! is an external collaborator's job; this crate stops at the library
//! boundary.

#![warn(missing_docs)]

mod error;

pub use error::{Error, Result};
pub use qwick_ast::{Factor, Product, Sum};
pub use qwick_config::Config;
pub use qwick_engine::Term;
pub use qwick_lexer::NewOpMap as Macros;

/// Derive the signed sum of terms `source` denotes under `config`,
/// expanding any operator macros named in `macros` first.
///
/// `config` is validated once before the pipeline runs; an invalid
/// configuration is rejected rather than silently tolerated (§9 Design
/// Notes: "pass a single immutable `Config` value ... and forbid mutation
/// after parsing").
pub fn derive(source: &str, config: &Config, macros: Macros) -> Result<Sum<Term, Factor>> {
    config.validate()?;
    tracing::debug!(chars = source.len(), macros = macros.len(), "deriving equation");
    let sum = qwick_parser::derive(source, config, macros)?;
    tracing::debug!(terms = sum.len(), "derivation complete");
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_a_fluctuation_potential_prefactor() {
        let cfg = Config::default();
        let sum = derive(r"\frac{1}{4} W", &cfg, Macros::default()).unwrap();
        assert_eq!(sum.len(), 1);
    }

    #[test]
    fn rejects_an_invalid_config_before_touching_the_pipeline() {
        let mut cfg = Config::default();
        cfg.syntax.dg.clear();
        let err = derive("F", &cfg, Macros::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn derives_a_nonconserving_excitation_operator() {
        let cfg = Config::default();
        let sum = derive(r"R^{more1}_{2}", &cfg, Macros::default()).unwrap();
        assert_eq!(sum.len(), 1);
    }

    #[test]
    fn derives_a_connected_parenthesised_sum() {
        let cfg = Config::default();
        let sum = derive(r"\pconn(F + h) T", &cfg, Macros::default());
        assert!(sum.is_ok());
    }
}
