//! Headless rollout mode
//!
//! Runs a policy against the engine for a fixed number of episodes without
//! any rendering, logging aggregate statistics as it goes. Useful for
//! benchmarking a policy or sanity-checking reward shaping at full speed.
//!
//! # Example
//!
//! ```rust,ignore
//! use snake_gym::modes::{RolloutConfig, RolloutMode};
//! use snake_gym::policy::GreedyPolicy;
//!
//! let config = RolloutConfig::new(1000);
//! let mut rollout = RolloutMode::new(config, Box::new(GreedyPolicy::new()));
//! rollout.run()?;
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::game::{EpisodeEngine, EpisodeOutcomes, GameConfig};
use crate::metrics::RolloutStats;
use crate::policy::Policy;

/// Configuration for rollout mode
#[derive(Debug, Clone)]
pub struct RolloutConfig {
    /// Number of episodes to run
    pub episodes: usize,

    /// Log progress every N episodes
    pub log_frequency: usize,

    /// Game configuration (board size, rewards)
    pub game_config: GameConfig,

    /// Seed for the engine's RNG; `None` seeds from entropy
    pub seed: Option<u64>,

    /// Where to write the JSON summary, if anywhere
    pub json_path: Option<PathBuf>,
}

impl RolloutConfig {
    /// Create a rollout configuration with defaults
    ///
    /// # Example
    ///
    /// ```rust
    /// use snake_gym::modes::RolloutConfig;
    ///
    /// let config = RolloutConfig::new(1000);
    /// assert_eq!(config.log_frequency, 100);
    /// ```
    pub fn new(episodes: usize) -> Self {
        Self {
            episodes,
            log_frequency: 100,
            game_config: GameConfig::default(),
            seed: None,
            json_path: None,
        }
    }
}

/// Aggregate results written to disk after a rollout
#[derive(Serialize)]
struct RolloutSummary<'a> {
    episodes: usize,
    total_steps: usize,
    mean_reward: f32,
    mean_score: f32,
    mean_length: f32,
    best_score: u32,
    record: u32,
    outcomes: &'a EpisodeOutcomes,
}

/// Headless rollout: a policy drives the engine, statistics accumulate
pub struct RolloutMode {
    engine: EpisodeEngine,
    policy: Box<dyn Policy>,
    stats: RolloutStats,
    config: RolloutConfig,
}

impl RolloutMode {
    pub fn new(config: RolloutConfig, policy: Box<dyn Policy>) -> Self {
        let engine = match config.seed {
            Some(seed) => EpisodeEngine::with_seed(config.game_config.clone(), seed),
            None => EpisodeEngine::new(config.game_config.clone()),
        };

        // 100-episode rolling window
        let stats = RolloutStats::new(100);

        Self {
            engine,
            policy,
            stats,
            config,
        }
    }

    /// Run the configured number of episodes, then print (and optionally
    /// save) the aggregate results.
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        for episode in 0..self.config.episodes {
            let (episode_reward, episode_steps, episode_score) = self.run_episode();

            self.stats
                .record_episode(episode_reward, episode_steps, episode_score);

            if (episode + 1) % self.config.log_frequency == 0 {
                self.print_progress(episode + 1);
            }
        }

        println!("\nRollout complete!");
        println!("{}", self.stats.format_summary());

        let outcomes = self.engine.outcomes();
        println!(
            "Outcomes: wall {} | self {} | timeout {}",
            outcomes.wall.episodes, outcomes.self_collision.episodes, outcomes.timeout.episodes
        );
        println!("Record: {}", self.engine.record());

        if let Some(path) = self.config.json_path.clone() {
            self.write_summary(&path)?;
            println!("Summary saved to: {:?}", path);
        }

        Ok(())
    }

    /// Run a single episode to termination
    ///
    /// # Returns
    ///
    /// A tuple containing:
    /// - Total episode reward
    /// - Number of steps in the episode
    /// - Final score (food eaten)
    fn run_episode(&mut self) -> (f32, usize, u32) {
        self.engine.reset();
        let mut episode_reward = 0.0;
        let mut episode_steps = 0;

        // The frame budget guarantees this loop terminates
        loop {
            let action = self.policy.choose(self.engine.state());
            let result = self.engine.step(action);

            episode_reward += result.reward;
            episode_steps += 1;

            if result.terminated {
                return (episode_reward, episode_steps, result.score);
            }
        }
    }

    /// Serialize the aggregate results to a JSON file
    fn write_summary(&self, path: &Path) -> Result<()> {
        let summary = RolloutSummary {
            episodes: self.stats.total_episodes(),
            total_steps: self.stats.total_steps(),
            mean_reward: self.stats.mean_episode_reward(),
            mean_score: self.stats.mean_episode_score(),
            mean_length: self.stats.mean_episode_length(),
            best_score: self.stats.best_score(),
            record: self.engine.record(),
            outcomes: self.engine.outcomes(),
        };

        let json = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize rollout summary")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write rollout summary to {:?}", path))?;

        Ok(())
    }

    /// Print rollout header information
    fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("Policy Rollout - Snake Gym");
        println!("{}", "=".repeat(70));
        println!("Episodes: {}", self.config.episodes);
        println!(
            "Game Config: {}x{} pixels ({}x{} cells)",
            self.config.game_config.width,
            self.config.game_config.height,
            self.config.game_config.cells_x(),
            self.config.game_config.cells_y()
        );
        match self.config.seed {
            Some(seed) => println!("Seed: {}", seed),
            None => println!("Seed: entropy"),
        }
        println!("Logging: Every {} episodes", self.config.log_frequency);
        if let Some(path) = &self.config.json_path {
            println!("Summary path: {:?}", path);
        }
        println!("{}", "=".repeat(70));
        println!();
    }

    /// Print rollout progress
    fn print_progress(&self, episode: usize) {
        println!(
            "[Episode {}/{}] {}",
            episode,
            self.config.episodes,
            self.stats.format_summary()
        );
    }
}
