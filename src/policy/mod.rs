//! Scripted action sources
//!
//! The engine is designed to be driven by an external agent. The policies
//! here stand in for that agent so the demo modes have something to run:
//! a seeded uniform-random source and a food-seeking heuristic.

pub mod greedy;
pub mod random;

pub use greedy::GreedyPolicy;
pub use random::RandomPolicy;

use crate::game::{Action, GameState};

/// Chooses the next action for the current state.
///
/// Object-safe so modes can hold a `Box<dyn Policy>`.
pub trait Policy {
    fn choose(&mut self, state: &GameState) -> Action;
}
