use std::time::{Duration, Instant};

/// Wall-clock bookkeeping for an interactive viewing session
pub struct SessionMetrics {
    started: Instant,
    pub episodes_watched: u32,
    pub steps_taken: u64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            episodes_watched: 0,
            steps_taken: 0,
        }
    }

    pub fn on_step(&mut self) {
        self.steps_taken += 1;
    }

    pub fn on_episode_end(&mut self) {
        self.episodes_watched += 1;
    }

    /// Time since the session started, as mm:ss
    pub fn format_time(&self) -> String {
        Self::format_duration(self.started.elapsed())
    }

    fn format_duration(elapsed: Duration) -> String {
        let total = elapsed.as_secs();
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
