//! Snake Gym - A Snake simulation engine built to be driven step by step
//!
//! This library provides:
//! - Core simulation logic with shaped rewards (game module)
//! - Action sources that drive the engine (policy module)
//! - TUI rendering (render module)
//! - Playback input handling (input module)
//! - Session and rollout statistics (metrics module)
//! - Execution modes (watch, rollout)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod policy;
pub mod render;
