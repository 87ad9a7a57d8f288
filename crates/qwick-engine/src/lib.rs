//! Term algebra for the quantwo-rs symbolic derivation engine: Wick's
//! theorem (standard and generalised), spin integration, Kronecker
//! reduction, matrix classification, antisymmetric-integral expansion, the
//! Brillouin filter, structural equality and connection validation (§4.4).

pub mod error;
pub mod oper;
pub mod term;
pub mod wick;

pub use error::{EngineError, EngineResult};
pub use oper::Oper;
pub use term::{Connections, Term};
pub use wick::{DensityContraction, GenWickBranch, WickBranch};
