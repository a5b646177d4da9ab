//! Binomial coefficients by prime factorization.
//!
//! Kummer's theorem: the exponent of `p` in `C(n, k)` is the number of
//! carries when adding `k` and `n - k` in base `p`. After reducing to
//! `k <= n/2`, one sieve pass classifies every prime:
//!
//! - `p <= sqrt(n)`: full carry count over all base-p digits;
//! - `sqrt(n) < p <= n/2`: at most one carry, present iff `n % p < k % p`;
//! - `n/2 < p <= n - k`: exponent zero, skipped;
//! - `n - k < p <= n`: exponent one.

use crate::product;
use crate::range::BoundedRange;
use crate::sieve::PrimeSieve;
use crate::{floor_sqrt, Error, Result};
use rug::ops::Pow;
use rug::Integer;

/// `C(n, k)` assembled from prime-power exponents.
pub fn binomial(n: u64, k: u64) -> Result<Integer> {
    if k > n {
        return Err(Error::OutOfRange {
            min: 0,
            max: n,
            what: format!("k = {}", k),
        });
    }
    let k = k.min(n - k);
    if k == 0 {
        return Ok(Integer::from(1u32));
    }
    if n < 4 {
        // Only C(2,1) = 2 and C(3,1) = 3 reach here.
        return Ok(Integer::from(n));
    }

    let sieve = PrimeSieve::new(n);
    let root_n = floor_sqrt(n);
    let mut result = Integer::from(1u32);
    let mut factors: Vec<u64> = Vec::new();

    let primes = sieve
        .prime_view(BoundedRange::new(2, n).expect("2 <= n"))
        .expect("[2, n] is the whole sieve");
    for p in primes.iter() {
        if p <= root_n {
            // Carry count over all base-p digits of k + (n - k).
            let mut exp = 0u32;
            let mut carry = 0u64;
            let mut nn = n;
            let mut kk = k;
            while nn > 0 {
                carry = if nn % p < kk % p + carry { 1 } else { 0 };
                exp += carry as u32;
                nn /= p;
                kk /= p;
            }
            if exp > 0 {
                result *= Integer::from(p).pow(exp);
            }
        } else if p <= n / 2 {
            // Two base-p digits at most, so a single possible carry.
            if n % p < k % p {
                factors.push(p);
            }
        } else if p > n - k {
            factors.push(p);
        }
        // Primes in (n/2, n - k] never divide C(n, k).
    }

    Ok(result * product::product(&factors))
}

/// `C(n, k)` the classic way, `n! / (k! (n-k)!)`, via the prime-swing
/// factorial. Exists to cross-check [`binomial`].
pub fn binomial_via_factorials(n: u64, k: u64) -> Result<Integer> {
    if k > n {
        return Err(Error::OutOfRange {
            min: 0,
            max: n,
            what: format!("k = {}", k),
        });
    }
    let numerator = crate::factorial::factorial(n);
    let denominator = crate::factorial::factorial(k) * crate::factorial::factorial(n - k);
    Ok(numerator.div_exact(&denominator))
}
