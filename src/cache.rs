//! Grow-only primorial cache keyed by interval low bound.
//!
//! The cached swing walk asks for primorials over intervals whose low bounds
//! repeat across recursion levels while the high bounds only ever grow for a
//! given low. A hit with a matching high bound is a clone; a hit with a
//! smaller cached high is extended by one tail primorial instead of being
//! recomputed from scratch. Entries never shrink: when two threads race to
//! store the same key, the merge keeps whichever extends further.

use crate::sieve::PrimeSieve;
use crate::Result;
use rug::Integer;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::trace;

#[derive(Debug, Clone)]
struct CachedPrimorial {
    high: u64,
    value: Integer,
}

/// Concurrent map from interval low bound to the widest primorial computed
/// so far from that low bound. The lock guards only map access; primorial
/// computation always happens outside it.
#[derive(Debug, Default)]
pub struct PrimorialCache {
    entries: Mutex<HashMap<u64, CachedPrimorial>>,
}

impl PrimorialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct low bounds cached.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Product of the primes in `[low, high]`, served from the cache when
    /// possible. A request narrower than what is cached for `low` is
    /// computed fresh and does not disturb the cached entry.
    pub fn get_primorial(&self, sieve: &PrimeSieve, low: u64, high: u64) -> Result<Integer> {
        let cached = {
            let entries = self.entries.lock().expect("cache lock poisoned");
            entries.get(&low).cloned()
        };

        let value = match cached {
            Some(entry) if entry.high == high => {
                trace!(low, high, "primorial cache hit");
                return Ok(entry.value);
            }
            Some(entry) if entry.high < high => {
                trace!(low, cached_high = entry.high, high, "primorial cache extend");
                entry.value * sieve.primorial(entry.high + 1, high)?
            }
            Some(entry) => {
                // Narrower than cached; serve fresh, keep the wider entry.
                trace!(low, cached_high = entry.high, high, "primorial cache bypass");
                return sieve.primorial(low, high);
            }
            None => {
                trace!(low, high, "primorial cache miss");
                sieve.primorial(low, high)?
            }
        };

        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries
            .entry(low)
            .and_modify(|existing| {
                if existing.high < high {
                    *existing = CachedPrimorial {
                        high,
                        value: value.clone(),
                    };
                }
            })
            .or_insert_with(|| CachedPrimorial {
                high,
                value: value.clone(),
            });
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::BoundedRange;

    fn naive_primorial(sieve: &PrimeSieve, low: u64, high: u64) -> Integer {
        sieve
            .prime_view(BoundedRange::new(low, high).unwrap())
            .unwrap()
            .iter()
            .fold(Integer::from(1u32), |acc, p| acc * p)
    }

    #[test]
    fn cold_and_primed_lookups_agree() {
        let sieve = PrimeSieve::new(1000);
        let cache = PrimorialCache::new();
        let first = cache.get_primorial(&sieve, 100, 500).unwrap();
        let second = cache.get_primorial(&sieve, 100, 500).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, naive_primorial(&sieve, 100, 500));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn extension_multiplies_only_the_tail() {
        let sieve = PrimeSieve::new(1000);
        let cache = PrimorialCache::new();
        cache.get_primorial(&sieve, 10, 100).unwrap();
        let extended = cache.get_primorial(&sieve, 10, 900).unwrap();
        assert_eq!(extended, naive_primorial(&sieve, 10, 900));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn narrower_request_leaves_cache_untouched() {
        let sieve = PrimeSieve::new(1000);
        let cache = PrimorialCache::new();
        cache.get_primorial(&sieve, 10, 900).unwrap();
        let narrow = cache.get_primorial(&sieve, 10, 100).unwrap();
        assert_eq!(narrow, naive_primorial(&sieve, 10, 100));
        // The wide entry survives and still serves the wide request exactly.
        let wide = cache.get_primorial(&sieve, 10, 900).unwrap();
        assert_eq!(wide, naive_primorial(&sieve, 10, 900));
    }

    #[test]
    fn empty_interval_is_one() {
        let sieve = PrimeSieve::new(100);
        let cache = PrimorialCache::new();
        assert_eq!(cache.get_primorial(&sieve, 24, 28).unwrap(), 1);
    }

    #[test]
    fn out_of_sieve_request_is_an_error() {
        let sieve = PrimeSieve::new(100);
        let cache = PrimorialCache::new();
        assert!(cache.get_primorial(&sieve, 10, 200).is_err());
    }

    #[test]
    fn concurrent_extensions_converge() {
        let sieve = PrimeSieve::new(2000);
        let cache = PrimorialCache::new();
        let highs: Vec<u64> = (1..=16).map(|i| 100 + i * 100).collect();
        let results: Vec<Integer> = highs
            .iter()
            .map(|&high| {
                let (r, _) = rayon::join(
                    || cache.get_primorial(&sieve, 50, high).unwrap(),
                    || cache.get_primorial(&sieve, 50, high).unwrap(),
                );
                r
            })
            .collect();
        for (&high, result) in highs.iter().zip(&results) {
            assert_eq!(*result, naive_primorial(&sieve, 50, high), "high = {}", high);
        }
        assert_eq!(cache.len(), 1);
    }
}
