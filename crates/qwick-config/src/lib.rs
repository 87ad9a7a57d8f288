//! # qwick-config
//!
//! The typed shape of the dictionary-of-dictionaries configuration the
//! pipeline is driven by (§6 Configuration). Loading a `Config` value from
//! a TOML/JSON file or a CLI is an external collaborator's job (§1 OUT OF
//! SCOPE); this crate only defines the shape, provides sane defaults, and
//! validates internal consistency once (§9: "pass a single immutable
//! `Config` value through the pipeline and forbid mutation after parsing").

#![warn(missing_docs, unused_crate_dependencies)]

mod error;
mod hamilton;
mod prog;
mod syntax;

pub use error::{ConfigError, ConfigResult};
pub use hamilton::HamiltonConfig;
pub use prog::ProgConfig;
pub use syntax::SyntaxConfig;

use serde::{Deserialize, Serialize};

/// Immutable configuration threaded through the whole pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub syntax: SyntaxConfig,
    pub hamilton: HamiltonConfig,
    pub prog: ProgConfig,
}

impl Config {
    /// Validate internal consistency (§7 ConfigError). Called once after
    /// loading; a `Config` that passes this is never mutated again.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.syntax.dg.is_empty() {
            return Err(ConfigError::EmptyDg);
        }
        let [less, more] = &self.syntax.lessmore;
        if less.is_empty() || more.is_empty() || less.len() != more.len() {
            return Err(ConfigError::BadLessmore(vec![less.clone(), more.clone()]));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            syntax: SyntaxConfig::default(),
            hamilton: HamiltonConfig::default(),
            prog: ProgConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn mismatched_lessmore_lengths_rejected() {
        let mut cfg = Config::default();
        cfg.syntax.lessmore = ["less".to_string(), "mo".to_string()];
        assert!(matches!(cfg.validate(), Err(ConfigError::BadLessmore(_))));
    }

    #[test]
    fn empty_dg_rejected() {
        let mut cfg = Config::default();
        cfg.syntax.dg.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyDg)));
    }
}
