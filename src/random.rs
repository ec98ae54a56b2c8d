//! Random-number helpers shared by every genetic operator.
//!
//! Operators never reach for a thread-local generator; the caller passes
//! the source in, so a seeded [`StdRng`] makes an entire run reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from a seed.
///
/// ```
/// use rand::Rng;
/// use u_evolve::random::create_rng;
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Uniform integer in `[lo, hi)`.
///
/// Returns `lo` when the range is empty, so zero-length chromosomes
/// can pass through crossover without special casing.
pub fn rand_between<R: Rng + ?Sized>(rng: &mut R, lo: usize, hi: usize) -> usize {
    if hi <= lo {
        lo
    } else {
        rng.random_range(lo..hi)
    }
}

/// Uniform draw in `[0, 1)`.
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random_range(0.0..1.0)
}
