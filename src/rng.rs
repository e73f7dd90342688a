//! Random number generation for play mode transforms.
//!
//! Shuffle play modes draw random cell permutations, and a full 16-cell
//! shuffle needs one extra random bit per hold note whose shape the
//! permutation breaks (see [`crate::chart::note::Note::remapped`]). All of
//! that randomness flows through the [`Rng`] trait so it can be injected.
//!
//! # Implementations
//!
//! ## [`RngMock`]
//!
//! A deterministic mock implementation for testing that returns predefined
//! values in rotation.
//!
//! ## [`RandRng`]
//!
//! A production implementation backed by the [`rand`] crate.
//!
//! [`rand`]: https://crates.io/crates/rand

use core::ops::RangeInclusive;

/// A random number generator for play mode transforms.
///
/// # Contract
///
/// - The generated number must be within the specified `range` (inclusive)
/// - Returning a number outside the range may produce out-of-bounds cell
///   indices in the transforms
pub trait Rng {
    /// Generates a random integer within the specified `range`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memo_rs::rng::{Rng, RngMock};
    ///
    /// let mut rng = RngMock([5u64]);
    /// let result = rng.generate(1u64..=10u64);
    /// assert_eq!(result, 5u64);
    /// ```
    fn generate(&mut self, range: RangeInclusive<u64>) -> u64;
}

impl<T: Rng + ?Sized> Rng for Box<T> {
    fn generate(&mut self, range: RangeInclusive<u64>) -> u64 {
        T::generate(self, range)
    }
}

/// A deterministic mock random number generator for testing.
///
/// This implementation returns values from a predefined array in rotation.
///
/// # Examples
///
/// ```rust
/// use memo_rs::rng::{Rng, RngMock};
///
/// let mut rng = RngMock([1u64, 2u64]);
///
/// // Returns values in rotation: 1, 2, 1, 2, ...
/// assert_eq!(rng.generate(0u64..=10u64), 1u64);
/// assert_eq!(rng.generate(0u64..=10u64), 2u64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RngMock<const N: usize>(pub [u64; N]);

impl<const N: usize> Rng for RngMock<N> {
    fn generate(&mut self, _range: RangeInclusive<u64>) -> u64 {
        let Some(first) = self.0.first().copied() else {
            return 0;
        };
        self.0.rotate_left(1);
        first
    }
}

/// A production random number generator using the [`rand`] crate.
///
/// It wraps any type implementing [`rand::Rng`] and reduces its output
/// into the requested range.
///
/// # Examples
///
/// ```rust
/// use memo_rs::rng::{Rng, RandRng};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = RandRng(StdRng::seed_from_u64(42));
/// let n = rng.generate(1u64..=10u64);
/// assert!(n >= 1u64 && n <= 10u64);
/// ```
///
/// [`rand`]: https://crates.io/crates/rand
#[cfg(feature = "rand")]
pub struct RandRng<R>(pub R);

#[cfg(feature = "rand")]
impl<R: rand::Rng> Rng for RandRng<R> {
    fn generate(&mut self, range: RangeInclusive<u64>) -> u64 {
        let start = *range.start();
        let end = *range.end();
        let width = end.wrapping_sub(start).wrapping_add(1);

        if width == 0 {
            // full u64 range
            self.0.next_u64()
        } else {
            (self.0.next_u64() % width) + start
        }
    }
}
