//! # primeswing — sub-quadratic factorials via prime factorization
//!
//! Computes `n!` with Luschny's prime-swing algorithm instead of naive
//! repeated multiplication: `n! = swing(n) * (n/2)!^2`, where the odd swing
//! numbers are assembled directly from prime-power exponents read off a
//! shared sieve and multiplied through a balanced product tree. A final
//! power-of-two shift (Legendre's formula, `exp2 = n - popcount(n)`) restores
//! the even part.
//!
//! The crate is a pure computational library. Its pieces:
//!
//! 1. **[`range::BoundedRange`]** — validated `[min,max]` intervals guarding
//!    every sieve query.
//! 2. **[`sieve::PrimeSieve`]** — a mod-6 wheel sieve of Eratosthenes built
//!    once per upper bound, with range/stride prime views and primorials.
//! 3. **[`product`]** — balanced binary-splitting multiplication keeping all
//!    partial products comparable in bit length (the property that makes the
//!    total multiplication cost sub-quadratic).
//! 4. **[`factorial`]** — the prime-swing engine, plain and primorial-cached.
//! 5. **[`cache::PrimorialCache`]** — grow-only memo of primorial ranges,
//!    exploiting that nested swing calls re-request the same lower bounds
//!    with growing upper bounds.
//! 6. **[`strategy`]** — a registry of interchangeable factorial
//!    implementations; the slow ones serve as test oracles.
//! 7. **[`binomial`]** — `C(n,k)` both from prime-power exponents and from
//!    factorials; the two routes must agree.
//!
//! ## References
//!
//! - Peter Luschny, "Fast Factorial Functions",
//!   <https://www.luschny.de/math/factorial/FastFactorialFunctions.htm>
//! - A. Schönhage, A. Grotefeld, E. Vetter, "Fast Algorithms", 1994
//!   (prime factorization approach to the factorial).
//! - Legendre's formula: exponent of p in n! is `sum_k floor(n / p^k)`.

pub mod binomial;
pub mod cache;
pub mod factorial;
pub mod product;
pub mod range;
pub mod sieve;
pub mod strategy;

use rug::Integer;

/// Errors surfaced by range and sieve queries. All of them are precondition
/// violations detected before any expensive work; none are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A `[min,max]` pair with `min > max` was used to build a range.
    #[error("invalid range [{min},{max}]: min <= max required")]
    InvalidRange { min: u64, max: u64 },

    /// A value or subrange fell outside the interval that guards it.
    #[error("[{min},{max}] does not contain {what}")]
    OutOfRange { min: u64, max: u64, what: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Floor of the square root, exact for all u64 inputs.
///
/// The float estimate is within one of the truth for anything the sieve can
/// hold; the two correction loops make it exact everywhere else.
pub fn floor_sqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut r = (n as f64).sqrt() as u64;
    while r > 0 && r.checked_mul(r).map_or(true, |sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= n) {
        r += 1;
    }
    r
}

/// Floor of the binary logarithm. Zero input maps to zero.
pub fn floor_log2(n: u64) -> u32 {
    if n == 0 {
        0
    } else {
        63 - n.leading_zeros()
    }
}

/// Estimate decimal digit count from bit length, avoiding expensive
/// to_string conversion.
pub fn estimate_digits(n: &Integer) -> u64 {
    let bits = n.significant_bits();
    if bits == 0 {
        return 1;
    }
    (bits as f64 * std::f64::consts::LOG10_2) as u64 + 1
}

/// Exact decimal digit count (expensive for very large numbers).
pub fn exact_digits(n: &Integer) -> u64 {
    n.to_string_radix(10).len() as u64
}
