//! # Prime-swing factorial
//!
//! `n! = swing(n) * ((n/2)!)^2`, unrolled by the doubling recursion
//! `rec_factorial(n) = swing(n) * rec_factorial(n/2)^2`, where `swing(n)` is
//! the odd part of `n! / (floor(n/2)!)^2`. The swing numbers are assembled
//! directly from prime-power exponents read off a single [`PrimeSieve`]:
//!
//! - primes in `(n/2, n]` divide `n!` exactly once and always appear in
//!   `swing(n)` — their product is a primorial;
//! - primes in `(sqrt(n), n/3]` appear iff `floor(n/p)` is odd;
//! - primes up to `sqrt(n)` contribute powers found by repeated division of
//!   `n`, accumulating one parity bit per division level.
//!
//! All factor lists go through the balanced product tree, and the final
//! power of two is restored with Legendre's formula, `exp2 = n - popcount(n)`.
//!
//! Two variants share the skeleton: [`factorial`] recomputes every primorial
//! from the sieve, [`factorial_cached`] routes the overlapping primorial
//! requests of nested swing levels through a [`PrimorialCache`].
//!
//! Concurrency: `swing(n)` runs as one arm of a `rayon::join` while the
//! other arm descends into `rec_factorial(n/2)`, so the swing computations
//! of all `log n` levels overlap with the recursion; each swing additionally
//! overlaps its primorial with its factor-list scan. Joins are the only
//! suspension points and all joined work is itself recursively decomposed,
//! bounding depth to `O(log n)`.

use crate::cache::PrimorialCache;
use crate::floor_sqrt;
use crate::product;
use crate::range::BoundedRange;
use crate::sieve::PrimeSieve;
use rug::ops::Pow;
use rug::Integer;
use tracing::debug;

/// 0! through 20!, everything that fits in a u64.
pub const SMALL_FACTORIALS: [u64; 21] = [
    1,
    1,
    2,
    6,
    24,
    120,
    720,
    5040,
    40320,
    362880,
    3628800,
    39916800,
    479001600,
    6227020800,
    87178291200,
    1307674368000,
    20922789888000,
    355687428096000,
    6402373705728000,
    121645100408832000,
    2432902008176640000,
];

/// swing(0) through swing(64); the sieve path takes over at 65.
pub const SMALL_ODD_SWING: [u64; 65] = [
    1,
    1,
    1,
    3,
    3,
    15,
    5,
    35,
    35,
    315,
    63,
    693,
    231,
    3003,
    429,
    6435,
    6435,
    109395,
    12155,
    230945,
    46189,
    969969,
    88179,
    2028117,
    676039,
    16900975,
    1300075,
    35102025,
    5014575,
    145422675,
    9694845,
    300540195,
    300540195,
    9917826435,
    583401555,
    20419054425,
    2268783825,
    83945001525,
    4418157975,
    172308161025,
    34461632205,
    1412926920405,
    67282234305,
    2893136075115,
    263012370465,
    11835556670925,
    514589420475,
    24185702762325,
    8061900920775,
    395033145117975,
    15801325804719,
    805867616040669,
    61989816618513,
    3285460280781189,
    121683714103007,
    6692604275665385,
    956086325095055,
    54496920530418135,
    1879204156221315,
    110873045217057585,
    7391536347803839,
    450883717216034179,
    14544636039226909,
    916312070471295267,
    916312070471295267,
];

/// Upper bound on the number of swing factors of n, for list preallocation.
fn swing_factor_capacity(n: u64) -> usize {
    if n < 4 {
        return 6;
    }
    (2.0 * (floor_sqrt(n) as f64 + n as f64 / (crate::floor_log2(n) as f64 - 1.0))) as usize
}

/// `n!` by prime swing. Table lookup below 21; above, one sieve over
/// `[1, n]` feeds the doubling recursion, and the final shift restores the
/// even part.
pub fn factorial(n: u64) -> Integer {
    if n <= 20 {
        return Integer::from(SMALL_FACTORIALS[n as usize]);
    }
    let sieve = PrimeSieve::new(n);
    let exp2 = (n - n.count_ones() as u64) as u32;
    debug!(n, exp2, "prime swing factorial");
    rec_factorial(&sieve, n) << exp2
}

/// `n!` by prime swing with the primorial cache. The nested swing levels
/// request primorials whose low bound repeats while the high bound grows;
/// the cache extends instead of recomputing.
pub fn factorial_cached(n: u64) -> Integer {
    if n <= 20 {
        return Integer::from(SMALL_FACTORIALS[n as usize]);
    }
    let sieve = PrimeSieve::new(n);
    let cache = PrimorialCache::new();
    let exp2 = (n - n.count_ones() as u64) as u32;
    debug!(n, exp2, "prime swing factorial (cached primorials)");
    rec_factorial_cached(&sieve, &cache, n) << exp2
}

fn rec_factorial(sieve: &PrimeSieve, n: u64) -> Integer {
    if n < 2 {
        return Integer::from(1u32);
    }
    // swing(n) runs concurrently with the descent; joined only here.
    let (sw, rec) = rayon::join(|| swing(sieve, n), || rec_factorial(sieve, n / 2));
    sw * rec.pow(2)
}

fn rec_factorial_cached(sieve: &PrimeSieve, cache: &PrimorialCache, n: u64) -> Integer {
    if n < 2 {
        return Integer::from(1u32);
    }
    let (sw, rec) = rayon::join(
        || swing_cached(sieve, cache, n),
        || rec_factorial_cached(sieve, cache, n / 2),
    );
    sw * rec.pow(2)
}

/// The odd swing number `swing(n)`, the odd part of `n! / (floor(n/2)!)^2`.
///
/// The sieve must cover `[1, n]`.
pub fn swing(sieve: &PrimeSieve, n: u64) -> Integer {
    if n < 65 {
        return Integer::from(SMALL_ODD_SWING[n as usize]);
    }

    let root_n = floor_sqrt(n);
    let (primorial, factor_product) = rayon::join(
        // Primes in (n/2, n] divide n! exactly once; all of them are in swing(n).
        || {
            sieve
                .primorial(n / 2 + 1, n)
                .expect("(n/2, n] lies within the sieve")
        },
        || {
            let mut factors: Vec<u64> = Vec::with_capacity(swing_factor_capacity(n));

            let a_range = BoundedRange::new(3, root_n).expect("3 <= sqrt(n) for n >= 65");
            let a_primes = sieve
                .prime_view(a_range)
                .expect("[3, sqrt(n)] lies within the sieve");
            for p in a_primes.iter() {
                // Exponent of p in swing(n): parity of floor(n/p^k) summed
                // over all division levels.
                let mut q = n;
                let mut f = 1u64;
                loop {
                    q /= p;
                    if q == 0 {
                        break;
                    }
                    if q & 1 == 1 {
                        f *= p;
                    }
                }
                if f > 1 {
                    factors.push(f);
                }
            }

            let b_range =
                BoundedRange::new(root_n + 1, n / 3).expect("sqrt(n) < n/3 for n >= 65");
            let b_primes = sieve
                .prime_view(b_range)
                .expect("(sqrt(n), n/3] lies within the sieve");
            // For sqrt(n) < p <= n/3 only the first division level is
            // nonzero, so the exponent is just the parity of floor(n/p).
            factors.extend(b_primes.iter().filter(|&p| (n / p) & 1 == 1));

            product::product(&factors)
        },
    );

    primorial * factor_product
}

/// Cache-routed swing: instead of one `(n/2, n]` primorial, walk the
/// shrinking intervals `(n/(j+1), n/j]` for odd `j` until they get narrow,
/// fetching each through the cache. The intervals of `swing(n/2)`,
/// `swing(n/4)`, ... start at the same low bounds with smaller highs, which
/// is exactly the access pattern the cache extends cheaply.
fn swing_cached(sieve: &PrimeSieve, cache: &PrimorialCache, n: u64) -> Integer {
    if n < 65 {
        return Integer::from(SMALL_ODD_SWING[n as usize]);
    }

    let root_n = floor_sqrt(n);
    let mut prod = Integer::from(1u32);
    let mut j = 1u64;
    let high = loop {
        let high = n / j;
        j += 1;
        let low = (n / j).max(root_n);
        j += 1;

        if high - low < 32 {
            break high;
        }
        prod *= cache
            .get_primorial(sieve, low + 1, high)
            .expect("(low, high] lies within the sieve");
    };

    // One parity pass over [3, high] covers both small primes (repeated
    // division) and the mid-range (single division level) uniformly.
    let mut factors: Vec<u64> = Vec::with_capacity(swing_factor_capacity(n));
    let range = BoundedRange::new(3, high).expect("3 <= high for n >= 65");
    let primes = sieve
        .prime_view(range)
        .expect("[3, high] lies within the sieve");
    for p in primes.iter() {
        let mut q = n;
        let mut f = 1u64;
        loop {
            q /= p;
            if q == 0 {
                break;
            }
            if q & 1 == 1 {
                f *= p;
            }
        }
        if f > 1 {
            factors.push(f);
        }
    }

    prod * product::product(&factors)
}
