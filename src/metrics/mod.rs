pub mod rollout_stats;
pub mod session;

pub use rollout_stats::RolloutStats;
pub use session::SessionMetrics;
