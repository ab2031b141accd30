use rand::{Rng, SeedableRng, rngs::StdRng};

use super::Policy;
use crate::game::{Action, GameState};

/// Uniform random action source
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, _state: &GameState) -> Action {
        Action::ALL[self.rng.gen_range(0..Action::ALL.len())]
    }
}
