//! Factorial strategy registry.
//!
//! Every algorithm in the crate, plus a few simpler baselines, behind one
//! trait, so tests can cross-check them against each other and benchmarks
//! can sweep the whole set by name. [`Gmp`] delegates to the GMP builtin and
//! serves as the oracle the others are measured against.

use crate::factorial::{self, SMALL_FACTORIALS};
use crate::floor_log2;
use rug::ops::Pow;
use rug::Integer;

pub trait FactorialStrategy: Send + Sync {
    /// Stable identifier, usable as a benchmark id or a lookup key.
    fn name(&self) -> &'static str;

    fn factorial(&self, n: u64) -> Integer;
}

/// Prime swing over a fresh sieve, primorials recomputed per swing level.
pub struct PrimeSwing;

impl FactorialStrategy for PrimeSwing {
    fn name(&self) -> &'static str {
        "prime-swing"
    }

    fn factorial(&self, n: u64) -> Integer {
        factorial::factorial(n)
    }
}

/// Prime swing with the shared primorial cache across swing levels.
pub struct PrimeSwingCache;

impl FactorialStrategy for PrimeSwingCache {
    fn name(&self) -> &'static str {
        "prime-swing-cache"
    }

    fn factorial(&self, n: u64) -> Integer {
        factorial::factorial_cached(n)
    }
}

/// The swing recursion with swing numbers computed by the rising-factorial
/// quotient `swing(n) = z * prod (z - 4i) / i` instead of prime exponents.
/// Quadratic in bignum work, but self-contained.
pub struct SwingSimple;

impl SwingSimple {
    fn swing(n: u64) -> Integer {
        let mut z = match n % 4 {
            1 => n / 2 + 1,
            2 => 2,
            3 => 2 * (n / 2 + 2),
            _ => 1,
        };
        let mut b = Integer::from(z);
        z = 2 * (n - ((n + 1) & 1));
        for i in 1..=n / 4 {
            b = b * z / i;
            z -= 4;
        }
        b
    }

    fn rec_factorial(n: u64) -> Integer {
        if n < 2 {
            return Integer::from(1u32);
        }
        Self::rec_factorial(n / 2).pow(2) * Self::swing(n)
    }
}

impl FactorialStrategy for SwingSimple {
    fn name(&self) -> &'static str {
        "swing-simple"
    }

    fn factorial(&self, n: u64) -> Integer {
        Self::rec_factorial(n)
    }
}

/// Split-recursive product of odd ranges: every doubling level contributes
/// the odd numbers in `(n >> (k+1), n >> k]`, accumulated as `p *= block;
/// r *= p`, with the power of two restored at the end. No sieve needed.
pub struct Split;

impl Split {
    fn odd_product(current: &mut u64, len: u64) -> Integer {
        let half = len / 2;
        if half == 0 {
            *current += 2;
            return Integer::from(*current);
        }
        if len == 2 {
            *current += 2;
            let a = *current;
            *current += 2;
            return Integer::from(a) * *current;
        }
        Self::odd_product(current, len - half) * Self::odd_product(current, half)
    }
}

impl FactorialStrategy for Split {
    fn name(&self) -> &'static str {
        "split-recursive"
    }

    fn factorial(&self, n: u64) -> Integer {
        if n < 2 {
            return Integer::from(1u32);
        }
        let mut p = Integer::from(1u32);
        let mut r = Integer::from(1u32);
        let mut current = 1u64;
        let mut h = 0u64;
        let mut shift = 0u64;
        let mut high = 1u64;
        let mut log2n = floor_log2(n) as i64;
        while h != n {
            shift += h;
            h = n >> log2n;
            log2n -= 1;
            let mut len = high;
            high = (h - 1) | 1;
            len = (high - len) / 2;
            if len > 0 {
                p *= Self::odd_product(&mut current, len);
                r *= &p;
            }
        }
        r << shift as u32
    }
}

/// Balanced recursive product over `1..=n`, no odd/even separation.
pub struct ProductRecursive;

impl ProductRecursive {
    fn rec_product(start: u64, len: u64) -> Integer {
        if len == 1 {
            return Integer::from(start);
        }
        if len == 2 {
            return Integer::from(start) * (start + 1);
        }
        let half = len / 2;
        Self::rec_product(start, half) * Self::rec_product(start + half, len - half)
    }
}

impl FactorialStrategy for ProductRecursive {
    fn name(&self) -> &'static str {
        "product-recursive"
    }

    fn factorial(&self, n: u64) -> Integer {
        if n < 2 {
            return Integer::from(1u32);
        }
        Self::rec_product(1, n)
    }
}

/// Left-to-right running product. The baseline everything must beat.
pub struct NaiveLoop;

impl FactorialStrategy for NaiveLoop {
    fn name(&self) -> &'static str {
        "naive-loop"
    }

    fn factorial(&self, n: u64) -> Integer {
        if n <= 20 {
            return Integer::from(SMALL_FACTORIALS[n as usize]);
        }
        (21..=n).fold(Integer::from(SMALL_FACTORIALS[20]), |acc, i| acc * i)
    }
}

/// GMP's builtin factorial, used as the correctness oracle.
pub struct Gmp;

impl FactorialStrategy for Gmp {
    fn name(&self) -> &'static str {
        "gmp"
    }

    fn factorial(&self, n: u64) -> Integer {
        Integer::from(Integer::factorial(n as u32))
    }
}

/// All registered strategies, oracle last.
pub fn all_strategies() -> Vec<Box<dyn FactorialStrategy>> {
    vec![
        Box::new(PrimeSwing),
        Box::new(PrimeSwingCache),
        Box::new(SwingSimple),
        Box::new(Split),
        Box::new(ProductRecursive),
        Box::new(NaiveLoop),
        Box::new(Gmp),
    ]
}

pub fn strategy_by_name(name: &str) -> Option<Box<dyn FactorialStrategy>> {
    all_strategies().into_iter().find(|s| s.name() == name)
}
