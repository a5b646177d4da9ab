//! # Product tree — balanced binary-splitting multiplication
//!
//! Multiplying a long sequence left-to-right drags one huge accumulator
//! against ever-smaller factors, which is asymptotically poor because
//! big-integer multiplication cost grows with operand size. Instead:
//!
//! 1. **Pair symmetric ends** — `a[i] * a[j]` with `i` and `j` converging
//!    halves the element count in one cheap machine-word pass while keeping
//!    the paired magnitudes comparable.
//! 2. **Recursive halving** — split the paired buffer in the middle and
//!    multiply each half, so the multiplication tree is `O(log len)` deep
//!    and every level multiplies operands of similar bit length.
//! 3. **Threshold-gated fan-out** — halves are dispatched as `rayon::join`
//!    arms while the remaining length exceeds [`SERIAL_THRESHOLD`], plain
//!    recursion below it.
//!
//! The partition of inputs into sub-products is fixed by index, so results
//! are bit-identical no matter how the task pool schedules the arms.

use rug::Integer;

/// Remaining-element count below which recursion stays on the current
/// thread. Tuned empirically; correctness does not depend on it.
pub const SERIAL_THRESHOLD: usize = 1024;

/// Product of all elements of `a`; `1` for an empty slice.
pub fn product(a: &[u64]) -> Integer {
    if a.is_empty() {
        return Integer::from(1u32);
    }
    let mut pairs = Vec::with_capacity(a.len() / 2 + 1);
    let mut i = 0;
    let mut j = a.len() - 1;
    while i < j {
        pairs.push(a[i] as u128 * a[j] as u128);
        i += 1;
        j -= 1;
    }
    if i == j {
        pairs.push(a[i] as u128);
    }
    rec_product(&pairs)
}

/// Product of every `stride`-th element of `a`, starting at index 0.
pub fn product_strided(a: &[u64], stride: usize) -> Integer {
    assert!(stride > 0, "stride must be positive");
    if stride == 1 {
        return product(a);
    }
    let picked: Vec<u64> = a.iter().step_by(stride).copied().collect();
    product(&picked)
}

/// Balanced product of a pre-paired buffer.
fn rec_product(s: &[u128]) -> Integer {
    match s.len() {
        0 => Integer::from(1u32),
        1 => Integer::from(s[0]),
        len => {
            let (left, right) = s.split_at(len / 2);
            if len < SERIAL_THRESHOLD {
                rec_product(left) * rec_product(right)
            } else {
                let (l, r) = rayon::join(|| rec_product(left), || rec_product(right));
                l * r
            }
        }
    }
}

/// Product of a slice of big integers. No pairing pass — the operands are
/// assumed comparable in size already — but the same balanced halving and
/// the same threshold-gated parallel/serial switch.
pub fn product_integers(a: &[Integer]) -> Integer {
    match a.len() {
        0 => Integer::from(1u32),
        1 => a[0].clone(),
        len => {
            let (left, right) = a.split_at(len / 2);
            if len < SERIAL_THRESHOLD {
                product_integers(left) * product_integers(right)
            } else {
                let (l, r) = rayon::join(|| product_integers(left), || product_integers(right));
                l * r
            }
        }
    }
}
