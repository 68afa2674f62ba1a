//! Random number generation for Monte Carlo checks.
//!
//! Generators are always seeded. Parallel simulations give every batch its
//! own generator through [`PricerRng::for_stream`], so results do not depend
//! on how batches are scheduled across threads.
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let z = rng.gen_normal();
//! assert!(z.is_finite());
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::PricerRng;
