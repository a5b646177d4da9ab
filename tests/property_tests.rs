//! Property-based tests for primeswing's mathematical primitives.
//!
//! These tests use the `proptest` framework to verify mathematical invariants
//! hold across thousands of randomly generated inputs. Unlike example-based
//! tests that check specific known values, property tests express universal
//! truths that must hold for all valid inputs, making them excellent at
//! finding edge cases.
//!
//! # How to run
//!
//! ```bash
//! # Run all property tests:
//! cargo test --test property_tests
//!
//! # Run a specific property:
//! cargo test --test property_tests prop_factorial_recurrence
//!
//! # Increase case count for thorough testing (default is 256):
//! PROPTEST_CASES=10000 cargo test --test property_tests
//! ```
//!
//! # Testing strategy
//!
//! Properties are organized by module:
//! - **Sieve module**: membership against trial division, view consistency,
//!   ordering, primorial against a naive fold
//! - **Product module**: balanced tree against a left fold
//! - **Factorial module**: the factorial recurrence, agreement with GMP,
//!   swing number parity
//! - **Binomial module**: Pascal's rule, symmetry, factorial quotient
//!
//! Each property is named `prop_<function>_<invariant>` for clarity. The
//! `proptest!` macro generates the test harness, input strategies, and
//! shrinking logic automatically.
//!
//! # References
//!
//! - proptest: <https://proptest-rs.github.io/proptest/>
//! - QuickCheck (inspiration): Claessen & Hughes, 2000

use primeswing::range::BoundedRange;
use primeswing::sieve::PrimeSieve;
use primeswing::{binomial, factorial, product};
use proptest::prelude::*;
use rug::Integer;

fn is_prime_by_trial_division(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

// == Sieve Module Properties ===================================================

proptest! {
    /// Verifies sieve membership matches trial division over the whole range.
    ///
    /// **Mathematical property**: n is in the prime list iff n is prime.
    #[test]
    fn prop_sieve_membership_matches_trial_division(limit in 2u64..3000) {
        let sieve = PrimeSieve::new(limit);
        let primes: std::collections::HashSet<u64> =
            sieve.prime_view(BoundedRange::new(1, limit).unwrap())
                .unwrap()
                .iter()
                .collect();
        for n in 1..=limit {
            prop_assert_eq!(
                primes.contains(&n),
                is_prime_by_trial_division(n),
                "membership wrong at {}", n
            );
        }
    }

    /// Verifies the prime list is strictly increasing and in range.
    #[test]
    fn prop_sieve_primes_strictly_increasing(limit in 2u64..5000) {
        let sieve = PrimeSieve::new(limit);
        let primes = sieve
            .prime_view(BoundedRange::new(1, limit).unwrap())
            .unwrap()
            .to_vec();
        for pair in primes.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        if let Some(&last) = primes.last() {
            prop_assert!(last <= limit);
        }
    }

    /// Verifies a sub-range view holds exactly the primes of that range.
    #[test]
    fn prop_prime_view_window_is_exact(
        limit in 100u64..3000,
        lo in 1u64..1500,
        span in 0u64..1500,
    ) {
        let hi = (lo + span).min(limit);
        prop_assume!(lo <= hi);
        let sieve = PrimeSieve::new(limit);
        let view = sieve
            .prime_view(BoundedRange::new(lo, hi).unwrap())
            .unwrap();
        for p in view.iter() {
            prop_assert!(lo <= p && p <= hi);
            prop_assert!(is_prime_by_trial_division(p));
        }
        let expected = (lo..=hi).filter(|&n| is_prime_by_trial_division(n)).count();
        prop_assert_eq!(view.number_of_primes(), expected);
    }

    /// Verifies the tree-shaped primorial equals a naive left fold.
    #[test]
    fn prop_primorial_matches_naive_fold(
        limit in 100u64..2000,
        lo in 1u64..1000,
        span in 0u64..1000,
    ) {
        let hi = (lo + span).min(limit);
        prop_assume!(lo <= hi);
        let sieve = PrimeSieve::new(limit);
        let tree = sieve.primorial(lo, hi).unwrap();
        let fold = sieve
            .prime_view(BoundedRange::new(lo, hi).unwrap())
            .unwrap()
            .iter()
            .fold(Integer::from(1u32), |acc, p| acc * p);
        prop_assert_eq!(tree, fold);
    }
}

// == Product Module Properties =================================================

proptest! {
    /// Verifies the balanced product tree against a sequential fold.
    ///
    /// **Mathematical property**: product is independent of association order.
    #[test]
    fn prop_product_matches_fold(values in prop::collection::vec(1u64..=u64::MAX, 0..200)) {
        let tree = product::product(&values);
        let fold = values.iter().fold(Integer::from(1u32), |acc, &v| acc * v);
        prop_assert_eq!(tree, fold);
    }
}

// == Factorial Module Properties ===============================================

proptest! {
    /// Verifies the defining recurrence n! = n * (n-1)!.
    #[test]
    fn prop_factorial_recurrence(n in 1u64..600) {
        prop_assert_eq!(
            factorial::factorial(n),
            factorial::factorial(n - 1) * n
        );
    }

    /// Verifies the prime-swing result against GMP's builtin factorial.
    #[test]
    fn prop_factorial_matches_gmp(n in 0u64..1500) {
        prop_assert_eq!(
            factorial::factorial(n),
            Integer::from(Integer::factorial(n as u32))
        );
    }

    /// Verifies both swing paths produce identical factorials.
    #[test]
    fn prop_cached_factorial_agrees(n in 0u64..800) {
        prop_assert_eq!(factorial::factorial_cached(n), factorial::factorial(n));
    }

    /// Verifies swing numbers are odd, the property the whole decomposition
    /// rests on: every factor of two lives in the final Legendre shift.
    #[test]
    fn prop_swing_is_odd(n in 1u64..2000) {
        let sieve = PrimeSieve::new(n.max(2));
        prop_assert!(factorial::swing(&sieve, n).is_odd());
    }
}

// == Binomial Module Properties ================================================

proptest! {
    /// Verifies Pascal's rule C(n, k) = C(n-1, k-1) + C(n-1, k).
    #[test]
    fn prop_binomial_pascal_rule(n in 2u64..300, k_seed in 0u64..300) {
        let k = 1 + k_seed % (n - 1).max(1);
        prop_assume!(1 <= k && k < n);
        let lhs = binomial::binomial(n, k).unwrap();
        let rhs = binomial::binomial(n - 1, k - 1).unwrap()
            + binomial::binomial(n - 1, k).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    /// Verifies C(n, k) = C(n, n-k).
    #[test]
    fn prop_binomial_symmetry(n in 0u64..500, k_seed in 0u64..500) {
        let k = if n == 0 { 0 } else { k_seed % (n + 1) };
        prop_assert_eq!(
            binomial::binomial(n, k).unwrap(),
            binomial::binomial(n, n - k).unwrap()
        );
    }

    /// Verifies the Kummer factorization against the factorial quotient.
    #[test]
    fn prop_binomial_matches_factorial_quotient(n in 0u64..400, k_seed in 0u64..400) {
        let k = if n == 0 { 0 } else { k_seed % (n + 1) };
        prop_assert_eq!(
            binomial::binomial(n, k).unwrap(),
            binomial::binomial_via_factorials(n, k).unwrap()
        );
    }
}
