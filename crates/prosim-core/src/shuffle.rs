//! Seedable Fisher–Yates shuffle for randomising experimental conditions.
//!
//! The random source is always passed in explicitly, so a session can be
//! replayed by reusing its seed.
//!
//! # Example
//!
//! ```rust
//! use prosim_core::shuffle::shuffled_order;
//!
//! let order = shuffled_order(5, 42);
//! assert_eq!(order, shuffled_order(5, 42));
//! ```

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Shuffle `items` in place, drawing randomness from `rng`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// A permutation of `0..n` that depends only on `seed`.
pub fn shuffled_order(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..n).collect();
    shuffle(&mut order, &mut rng);
    order
}
