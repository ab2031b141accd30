pub mod rollout;
pub mod watch;

pub use rollout::{RolloutConfig, RolloutMode};
pub use watch::{WatchMode, WatchSpeed};
