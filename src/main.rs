use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake_gym::game::GameConfig;
use snake_gym::modes::{RolloutConfig, RolloutMode, WatchMode};
use snake_gym::policy::{GreedyPolicy, Policy, RandomPolicy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_gym")]
#[command(version, about = "Snake simulation engine with watchable policies")]
struct Cli {
    /// Execution mode
    #[arg(long, default_value = "watch")]
    mode: Mode,

    /// Board width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Board height in pixels
    #[arg(long, default_value = "480")]
    height: u32,

    /// Policy that picks the actions
    #[arg(long, default_value = "greedy")]
    policy: PolicyKind,

    /// Number of episodes to run (rollout mode)
    #[arg(long, default_value = "100")]
    episodes: usize,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON summary here after a rollout
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Watch a policy play in the terminal
    Watch,
    /// Run episodes headless and report statistics
    Rollout,
}

#[derive(Clone, ValueEnum)]
enum PolicyKind {
    /// Uniformly random actions
    Random,
    /// Head for the food, avoid fatal cells
    Greedy,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Create game configuration from CLI arguments
    let config = GameConfig::new(cli.width, cli.height);

    let policy: Box<dyn Policy> = match cli.policy {
        PolicyKind::Random => Box::new(RandomPolicy::new(cli.seed.unwrap_or_else(rand::random))),
        PolicyKind::Greedy => Box::new(GreedyPolicy::new()),
    };

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(config, policy);
            watch_mode.run().await?;
        }
        Mode::Rollout => {
            let mut rollout_config = RolloutConfig::new(cli.episodes);
            rollout_config.game_config = config;
            rollout_config.seed = cli.seed;
            rollout_config.json_path = cli.json;

            let mut rollout_mode = RolloutMode::new(rollout_config, policy);
            rollout_mode.run()?;
        }
    }

    Ok(())
}
