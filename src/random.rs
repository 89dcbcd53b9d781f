//! Random sources
//!
//! Training consumes randomness only through uniform index draws: bootstrap resampling and the
//! selection of candidate features. Any `rand::Rng` provides them, so a seeded generator such
//! as `StdRng::seed_from_u64` makes training reproducible.

use rand::Rng;

/// A source of uniformly distributed indices
pub trait RandomSource {
    /// Returns an index drawn uniformly from `0..n`
    ///
    /// ### Panics
    ///
    /// If `n` is zero
    fn uniform_index(&mut self, n: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_index(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

/// Moves `k` distinct elements drawn uniformly from `items` to its front
///
/// This is a partial Fisher-Yates shuffle consuming exactly `min(k, items.len())` draws. The
/// returned slice is the drawn prefix, in draw order.
pub fn choose_prefix<'a, T, R: RandomSource + ?Sized>(
    items: &'a mut [T],
    k: usize,
    rng: &mut R,
) -> &'a mut [T] {
    let n = items.len();
    let k = k.min(n);
    for i in 0..k {
        let j = i + rng.uniform_index(n - i);
        items.swap(i, j);
    }

    &mut items[..k]
}
