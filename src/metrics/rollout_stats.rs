//! Episode statistics for headless rollouts
//!
//! Tracks per-episode rewards, lengths, and scores with rolling windows so
//! long runs report smoothed numbers instead of noise.

use std::collections::VecDeque;

/// Rollout statistics tracker with rolling averages
///
/// Episode totals accumulate for the whole run; the means are computed over
/// a bounded window of recent episodes.
///
/// # Example
///
/// ```rust
/// use snake_gym::metrics::RolloutStats;
///
/// let mut stats = RolloutStats::new(100);
///
/// // Record an episode
/// stats.record_episode(15.5, 150, 5);
///
/// println!("Mean reward: {}", stats.mean_episode_reward());
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct RolloutStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f32>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Episode scores (food eaten) (rolling window)
    episode_scores: VecDeque<u32>,

    /// Total number of episodes completed
    total_episodes: usize,

    /// Total number of simulation steps taken
    total_steps: usize,

    /// Best single-episode score seen during the run
    best_score: u32,

    /// Window size for rolling averages
    window_size: usize,
}

impl RolloutStats {
    /// Create a new statistics tracker
    ///
    /// # Arguments
    ///
    /// * `window_size` - Number of recent episodes to keep for rolling averages
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            best_score: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    ///
    /// # Arguments
    ///
    /// * `reward` - Total reward accumulated during the episode
    /// * `length` - Number of steps taken in the episode
    /// * `score` - Final score (food items eaten)
    ///
    /// # Example
    ///
    /// ```rust
    /// use snake_gym::metrics::RolloutStats;
    ///
    /// let mut stats = RolloutStats::new(100);
    /// stats.record_episode(15.5, 150, 5);
    ///
    /// assert_eq!(stats.total_episodes(), 1);
    /// assert_eq!(stats.total_steps(), 150);
    /// assert_eq!(stats.best_score(), 5);
    /// ```
    pub fn record_episode(&mut self, reward: f32, length: usize, score: u32) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        if score > self.best_score {
            self.best_score = score;
        }
    }

    /// Mean episode reward over the rolling window, or 0.0 when empty
    pub fn mean_episode_reward(&self) -> f32 {
        Self::mean(&self.episode_rewards)
    }

    /// Mean episode length in steps over the rolling window
    pub fn mean_episode_length(&self) -> f32 {
        let sum: usize = self.episode_lengths.iter().sum();
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_lengths.len() as f32
        }
    }

    /// Mean episode score over the rolling window
    pub fn mean_episode_score(&self) -> f32 {
        let sum: u32 = self.episode_scores.iter().sum();
        if self.episode_scores.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_scores.len() as f32
        }
    }

    /// Total number of episodes completed
    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    /// Total number of simulation steps taken
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Best single-episode score of the run
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Window size for rolling averages
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Format a one-line summary of the current statistics
    ///
    /// # Example
    ///
    /// ```rust
    /// use snake_gym::metrics::RolloutStats;
    ///
    /// let mut stats = RolloutStats::new(100);
    /// stats.record_episode(15.5, 150, 5);
    ///
    /// println!("{}", stats.format_summary());
    /// // Output: Episodes: 1 | Steps: 150 | Reward: 15.50 | Score: 5.00 | Len: 150.0 | Best: 5
    /// ```
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Score: {:.2} | Len: {:.1} | Best: {}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_reward(),
            self.mean_episode_score(),
            self.mean_episode_length(),
            self.best_score,
        )
    }

    /// Helper function to compute mean of a VecDeque<f32>
    fn mean(deque: &VecDeque<f32>) -> f32 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().sum::<f32>() / deque.len() as f32
        }
    }

    /// Helper function to push to a deque with size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
