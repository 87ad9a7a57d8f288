//! Rational scalar prefactor.
//!
//! §4.4 describes the `Term` prefactor as "rational or double". This repo
//! resolves that to an exact rational (grounded in
//! `examples/other_examples/manifests/AhmedMashour-mathhook`, a symbolic-math
//! workspace in the retrieval pack that represents coefficients the same
//! way), since every prefactor arising in this pipeline — antisymmetrisation
//! factors, permutation symmetry factors, `1/n!`-style normalisations,
//! parsed `\frac{a}{b}` literals — is exactly representable as a ratio of
//! small integers, and exact arithmetic avoids spurious near-zero terms at
//! the `prog.minfac` threshold.

use num_rational::Ratio;

/// Exact rational prefactor.
pub type Factor = Ratio<i64>;

/// `1`.
pub fn one() -> Factor {
    Factor::new(1, 1)
}

/// `0`.
pub fn zero() -> Factor {
    Factor::new(0, 1)
}

/// Build a factor from a bare integer.
pub fn from_int(n: i64) -> Factor {
    Factor::new(n, 1)
}

/// Approximate the factor as `f64`, for comparison against `prog.minfac`.
pub fn to_f64(f: Factor) -> f64 {
    *f.numer() as f64 / *f.denom() as f64
}
