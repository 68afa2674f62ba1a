//! Seeded pseudo-random generator wrapper.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Odd 64-bit constant used to spread stream indices over the seed space.
const STREAM_INCREMENT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded generator for uniform and standard normal variates.
///
/// The same seed always produces the same sequence.
///
/// ```rust
/// use pricer_pricing::rng::PricerRng;
///
/// let mut a = PricerRng::from_seed(42);
/// let mut b = PricerRng::from_seed(42);
/// assert_eq!(a.gen_normal(), b.gen_normal());
/// ```
pub struct PricerRng {
    inner: StdRng,
    seed: u64,
}

impl PricerRng {
    /// Creates a generator initialised with `seed`.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Generator for the independent stream `stream` derived from `seed`.
    ///
    /// Stream `0` is the generator of `from_seed(seed)`.
    #[inline]
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        Self::from_seed(seed.wrapping_add(stream.wrapping_mul(STREAM_INCREMENT)))
    }

    /// Seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform variate in `[0, 1)`.
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Standard normal variate (Ziggurat sampling through `rand_distr`).
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills `buffer` with standard normal variates without allocating.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}
