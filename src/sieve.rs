//! # PrimeSieve — wheel sieve with range views and primorials
//!
//! Builds the sorted list of all primes up to a limit exactly once, then
//! serves every downstream query from that immutable array:
//!
//! 1. **Prime generation** via a mod-6 wheel sieve of Eratosthenes — only
//!    candidates ≡ ±1 (mod 6) are tracked, a third of the naive candidate
//!    space. The marking loop contains no multiplication or division; each
//!    prime's exclusion strides are derived arithmetically from counters
//!    advanced by a two-phase toggle.
//! 2. **Point queries** (`nth_prime`, `is_prime`, `next_prime`) backed by
//!    binary search over the sorted array.
//! 3. **Range/stride views** ([`PrimeView`]) — cheap read-only windows into
//!    the prime array, safe to enumerate from any number of threads because
//!    every enumeration gets a fresh cursor.
//! 4. **Primorials** — products of all primes in a range, delegated to the
//!    balanced product tree in [`crate::product`].
//!
//! The sieve is never mutated after construction, so a single instance is
//! freely shared across concurrent tasks without locking.

use crate::product;
use crate::range::BoundedRange;
use crate::{Error, Result};
use rug::Integer;
use tracing::debug;

/// An immutable prime table over `[1, limit]`.
pub struct PrimeSieve {
    sieve_range: BoundedRange,
    primes: Vec<u64>,
}

/// Estimate of the number of primes <= n, always an upper bound for the
/// capacity of the prime list.
fn pi_high_bound(n: u64) -> usize {
    if n < 17 {
        6
    } else {
        (n as f64 / ((n as f64).ln() - 1.5)).floor() as usize
    }
}

/// Mark composites among the wheel candidates 5, 7, 11, 13, 17, 19, ...
/// (index i holds the i-th integer ≡ ±1 mod 6).
///
/// No multiplication in the loop: the first multiple to cancel and the two
/// alternating strides for each prime are maintained incrementally by the
/// toggle, which tracks whether the current candidate is ≡ -1 or ≡ +1 mod 6.
fn sieve_of_eratosthenes(composite: &mut [bool]) {
    let len = composite.len();
    let mut d1 = 8usize;
    let mut d2 = 8usize;
    let mut p1 = 3usize;
    let mut p2 = 7usize;
    let mut s = 7usize;
    let mut s2 = 3usize;
    let mut n = 0usize;
    let mut toggle = false;

    while s < len {
        if !composite[n] {
            // a prime was found, cancel its multiples
            let inc = p1 + p2;
            let mut k = s;
            while k < len {
                composite[k] = true;
                k += inc;
            }
            let mut k = s + s2;
            while k < len {
                composite[k] = true;
                k += inc;
            }
        }
        n += 1;

        toggle = !toggle;
        if toggle {
            s += d2;
            d1 += 16;
            p1 += 2;
            p2 += 2;
            s2 = p2;
        } else {
            s += d1;
            d2 += 8;
            p1 += 2;
            p2 += 6;
            s2 = p1;
        }
    }
}

/// Expand the composite mask into the ascending prime list. 2 and 3 are not
/// wheel candidates and are seeded explicitly.
fn make_prime_list(limit: u64) -> Vec<u64> {
    let mut primes = Vec::with_capacity(pi_high_bound(limit));
    if limit >= 2 {
        primes.push(2);
    }
    if limit >= 3 {
        primes.push(3);
    }

    let mut composite = vec![false; (limit / 3) as usize];
    sieve_of_eratosthenes(&mut composite);

    let mut p = 5u64;
    let mut i = 0usize;
    let mut toggle = false;
    while p <= limit {
        if !composite[i] {
            primes.push(p);
        }
        i += 1;
        toggle = !toggle;
        p += if toggle { 2 } else { 4 };
    }
    primes
}

impl PrimeSieve {
    /// Sieve the interval `[1, limit]`. A limit below 2 yields an empty
    /// prime list.
    pub fn new(limit: u64) -> Self {
        let sieve_range = BoundedRange::new(1, limit.max(1)).expect("1 <= max(limit,1)");
        let primes = make_prime_list(limit);
        debug!(limit, primes = primes.len(), "prime sieve constructed");
        PrimeSieve { sieve_range, primes }
    }

    /// The sieved interval `[1, limit]`.
    #[inline]
    pub fn sieve_range(&self) -> BoundedRange {
        self.sieve_range
    }

    /// Upper bound of the sieved interval.
    #[inline]
    pub fn limit(&self) -> u64 {
        self.sieve_range.max()
    }

    /// Total number of primes found.
    #[inline]
    pub fn number_of_primes(&self) -> usize {
        self.primes.len()
    }

    /// Index of the first prime >= `value` in the sorted prime array.
    /// Monotonic binary search; returns `number_of_primes` when no such
    /// prime exists.
    #[inline]
    fn index_of(&self, value: u64) -> usize {
        self.primes.partition_point(|&p| p < value)
    }

    /// The n-th prime, 1-indexed: `nth_prime(1) == 2`.
    pub fn nth_prime(&self, n: u64) -> Result<u64> {
        let prime_range = BoundedRange::new(1, self.primes.len().max(1) as u64)
            .expect("1 <= max(len,1)");
        prime_range.contains_or_fail(n)?;
        if self.primes.is_empty() {
            return Err(Error::OutOfRange {
                min: 1,
                max: 1,
                what: n.to_string(),
            });
        }
        Ok(self.primes[(n - 1) as usize])
    }

    /// Primality of `candidate`, answered from the sorted prime array: the
    /// candidate is prime iff the half-open interval `(candidate-1,
    /// candidate]` contains a sieve entry. Fails if the candidate lies
    /// outside the sieved interval.
    pub fn is_prime(&self, candidate: u64) -> Result<bool> {
        self.sieve_range.contains_or_fail(candidate)?;
        let i = self.index_of(candidate);
        Ok(self.primes.get(i) == Some(&candidate))
    }

    /// Smallest prime >= `n`, or an error if `n` is outside the sieve or no
    /// such prime exists within it.
    ///
    /// Each call redoes a binary search — do not use this to walk many
    /// consecutive primes, take a [`PrimeView`] instead.
    pub fn next_prime(&self, n: u64) -> Result<u64> {
        self.sieve_range.contains_or_fail(n)?;
        let i = self.index_of(n);
        self.primes.get(i).copied().ok_or_else(|| Error::OutOfRange {
            min: self.sieve_range.min(),
            max: self.sieve_range.max(),
            what: format!("a prime >= {n}"),
        })
    }

    /// View of all primes in `range`. Empty if no primes fall in it; fails
    /// if `range` is not contained in the sieved interval.
    pub fn prime_view(&self, range: BoundedRange) -> Result<PrimeView<'_>> {
        self.prime_view_strided(range, 1)
    }

    /// Like [`prime_view`](Self::prime_view), but enumerating only every
    /// `stride`-th prime of the range.
    pub fn prime_view_strided(&self, range: BoundedRange, stride: usize) -> Result<PrimeView<'_>> {
        assert!(stride > 0, "stride must be positive");
        self.sieve_range.contains_range_or_fail(&range)?;
        let start = self.index_of(range.min());
        let end = self.primes.partition_point(|&p| p <= range.max());
        Ok(PrimeView {
            window: &self.primes[start..end],
            stride,
        })
    }

    /// Product of all primes in `[low, high]`; `1` when the range holds no
    /// primes.
    pub fn primorial(&self, low: u64, high: u64) -> Result<Integer> {
        self.primorial_strided(low, high, 1)
    }

    /// Product of every `stride`-th prime in `[low, high]`.
    pub fn primorial_strided(&self, low: u64, high: u64, stride: usize) -> Result<Integer> {
        let range = BoundedRange::new(low, high)?;
        let view = self.prime_view_strided(range, stride)?;
        if view.is_empty() {
            return Ok(Integer::from(1u32));
        }
        Ok(if stride == 1 {
            product::product(view.as_slice())
        } else {
            product::product_strided(view.as_slice(), stride)
        })
    }
}

/// A read-only window into a sieve's prime array, optionally strided.
///
/// A view is a value: enumerating it never mutates shared state, each call
/// to [`iter`](PrimeView::iter) hands out a fresh cursor, and any number of
/// threads may enumerate the same view concurrently.
#[derive(Debug, Clone, Copy)]
pub struct PrimeView<'a> {
    window: &'a [u64],
    stride: usize,
}

impl<'a> PrimeView<'a> {
    /// The contiguous slice of the prime array underlying this view,
    /// ignoring the stride.
    #[inline]
    pub fn as_slice(&self) -> &'a [u64] {
        self.window
    }

    /// Number of primes the view enumerates (stride applied).
    pub fn number_of_primes(&self) -> usize {
        self.window.len().div_ceil(self.stride)
    }

    /// True if the view enumerates nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// A fresh cursor over the view's primes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + 'a {
        self.window.iter().step_by(self.stride).copied()
    }

    /// The view's primes collected into a vector.
    pub fn to_vec(&self) -> Vec<u64> {
        self.iter().collect()
    }
}
