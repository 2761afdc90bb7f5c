use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod chat;
pub mod content;
pub mod document;
pub mod error;
pub mod hit_dice;
pub mod life;
pub mod ports;
pub mod resolver;
pub mod surge;

pub use error::SurgeError;
pub use hit_dice::{DieDescriptor, ResourcePool};
pub use life::HealthPool;
pub use resolver::{resolve, HealingResult, SpendRequest};

pub struct Dice { rng: ChaCha8Rng }

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform roll in `1..=faces`. A zero-faced die rolls 0.
    pub fn die(&mut self, faces: u32) -> u32 {
        if faces == 0 {
            return 0;
        }
        self.rng.gen_range(1..=faces)
    }

    /// Roll `count` dice of `faces` each and return the individual results.
    pub fn roll_many(&mut self, count: u32, faces: u32) -> Vec<u32> {
        (0..count).map(|_| self.die(faces)).collect()
    }
}

/// D&D ability modifier = floor((score - 10) / 2) for integer scores.
pub fn ability_mod(score: i32) -> i32 {
    // `div_euclid` with positive divisor matches mathematical floor division.
    (score - 10).div_euclid(2)
}
