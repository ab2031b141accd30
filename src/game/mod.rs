//! Core simulation logic
//!
//! This module contains the whole game simulation without any I/O or
//! rendering dependencies. It is driven step by step by an external
//! action source and can run headless or behind a renderer.

pub mod action;
pub mod config;
pub mod engine;
pub mod history;
pub mod state;

// Re-export commonly used types
pub use action::{Action, ActionDecodeError, Heading};
pub use config::{GameConfig, RewardConfig};
pub use engine::{EpisodeEngine, StepInfo, StepResult};
pub use state::{Cell, EpisodeOutcomes, GameState, Snake, TerminationCause};
