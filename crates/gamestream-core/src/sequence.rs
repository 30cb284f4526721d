//! Infinite numeric sequence generators.
//!
//! Both generators are stateful iterators that resume exactly where the
//! previous pull stopped. Neither can be rewound: create a new instance to
//! start again from the first term. Callers must bound every pull with
//! `take`, `take_while`, or an explicit count.

use core::iter::FusedIterator;
use core::mem;
use core::ops::RangeInclusive;

use num_bigint::BigUint;

/// The Fibonacci sequence `0, 1, 1, 2, 3, 5, ...` as arbitrary-precision
/// integers.
///
/// Holds only the two most recent terms. Never returns `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fibonacci {
    current: BigUint,
    next: BigUint,
}

impl Fibonacci {
    /// Create a generator positioned at term 0.
    pub fn new() -> Self {
        Self {
            current: BigUint::from(0_u32),
            next: BigUint::from(1_u32),
        }
    }
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Fibonacci {
    type Item = BigUint;

    fn next(&mut self) -> Option<Self::Item> {
        let following = &self.current + &self.next;
        let newer = mem::replace(&mut self.next, following);
        Some(mem::replace(&mut self.current, newer))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl FusedIterator for Fibonacci {}

/// The primes `2, 3, 5, 7, 11, ...` found by trial division.
///
/// Each candidate is tested on its own; no sieve and no list of earlier
/// primes is kept. The sequence only ends if the candidate cursor would
/// pass `u64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primes {
    candidate: Option<u64>,
}

impl Primes {
    /// Create a generator whose first candidate is 2.
    pub const fn new() -> Self {
        Self { candidate: Some(2) }
    }
}

impl Default for Primes {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Primes {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let n = self.candidate?;
            self.candidate = n.checked_add(1);
            if is_prime(n) {
                return Some(n);
            }
        }
    }
}

impl FusedIterator for Primes {}

/// Divisors tried by [`is_prime`] for `n`: every integer in `[2, isqrt(n)]`.
///
/// Empty for `n < 4`, which is why 2 and 3 are classified without a
/// single division.
pub const fn trial_divisors(n: u64) -> RangeInclusive<u64> {
    2..=n.isqrt()
}

/// Trial-division primality test.
///
/// 0 and 1 are not prime.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    trial_divisors(n).all(|d| n.checked_rem(d).is_some_and(|r| r != 0))
}
