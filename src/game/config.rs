use serde::{Deserialize, Serialize};

/// Configuration for the playfield and episode rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the playfield in pixels
    pub width: u32,
    /// Height of the playfield in pixels
    pub height: u32,
    /// Grid unit; every cell coordinate is a multiple of this
    pub block_size: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Frames the episode may run per snake segment before timing out
    pub timeout_factor: u32,
    /// Reward shaping table
    pub rewards: RewardConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            block_size: 20,
            initial_snake_length: 3,
            timeout_factor: 100,
            rewards: RewardConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom playfield size in pixels
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Create a compact playfield for testing
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Number of cells along the x axis
    pub fn cells_x(&self) -> u32 {
        self.width / self.block_size
    }

    /// Number of cells along the y axis
    pub fn cells_y(&self) -> u32 {
        self.height / self.block_size
    }
}

/// Every shaping term the step function hands out.
///
/// Penalties are stored negative so the step function only ever adds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// First visit to a cell this episode
    pub exploration_bonus: f32,
    /// Three same-direction turns in a row
    pub triple_turn_penalty: f32,
    /// Turn, two straights, then the opposite turn
    pub lane_change_bonus: f32,
    /// The chosen move lands on the snake's own body
    pub body_ahead_penalty: f32,
    /// The chosen move lands on a free cell
    pub clear_ahead_bonus: f32,
    /// Fewer than 15 distinct cells among the last 25 visited
    pub loop_penalty: f32,
    /// Divided by the Euclidean distance to the food
    pub approach_scale: f32,
    /// Terminal reward for timeout, wall hit, or self hit
    pub death_penalty: f32,
    /// Every fifth food eaten
    pub milestone_bonus: f32,
    /// New best score for this engine
    pub record_bonus: f32,
    /// Charged on every step that does not eat
    pub survival_cost: f32,
    /// Granted on every surviving step
    pub step_bonus: f32,
    /// Moving toward the food on either axis; charged when moving away
    pub progress_reward: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            exploration_bonus: 5.0,
            triple_turn_penalty: -10.0,
            lane_change_bonus: 5.0,
            body_ahead_penalty: -5.0,
            clear_ahead_bonus: 1.0,
            loop_penalty: -20.0,
            approach_scale: 10.0,
            death_penalty: -10.0,
            milestone_bonus: 5.0,
            record_bonus: 50.0,
            survival_cost: -0.1,
            step_bonus: 0.5,
            progress_reward: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.block_size, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.timeout_factor, 100);
    }

    #[test]
    fn test_cell_counts() {
        let config = GameConfig::default();
        assert_eq!(config.cells_x(), 32);
        assert_eq!(config.cells_y(), 24);

        let small = GameConfig::small();
        assert_eq!(small.cells_x(), 10);
        assert_eq!(small.cells_y(), 10);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(320, 240);
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 240);
        assert_eq!(config.block_size, 20);
    }

    #[test]
    fn test_default_rewards() {
        let rewards = RewardConfig::default();
        assert_eq!(rewards.exploration_bonus, 5.0);
        assert_eq!(rewards.death_penalty, -10.0);
        assert_eq!(rewards.loop_penalty, -20.0);
        assert_eq!(rewards.survival_cost, -0.1);
        assert_eq!(rewards.step_bonus, 0.5);
    }
}
