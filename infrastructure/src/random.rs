//! Thread-local RNG adapter for the randomness seam

use boardroom_application::ports::random::RandomSource;
use rand::Rng;

/// Uniform picks from the thread-local generator
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, bound: usize) -> usize {
        rand::thread_rng().gen_range(0..bound)
    }
}
