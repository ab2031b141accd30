use super::{
    action::{Action, Heading},
    config::GameConfig,
    history::TurnPattern,
    state::{Cell, EpisodeOutcomes, FoodRings, GameState, Snake, TerminationCause},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Every how many points the milestone bonus pays out
const MILESTONE_EVERY: u32 = 5;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the episode ended, when it did
    pub cause: Option<TerminationCause>,
}

/// Result of one simulation step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Shaped reward for the driving agent
    pub reward: f32,
    /// Whether the episode has terminated
    pub terminated: bool,
    /// Score after the step
    pub score: u32,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The engine that owns an episode and scores every step.
///
/// Episode state is rebuilt wholesale by [`reset`](Self::reset); the record
/// score and the per-cause outcome ledger live on the engine and survive for
/// its whole lifetime.
pub struct EpisodeEngine {
    config: GameConfig,
    state: GameState,
    record: u32,
    outcomes: EpisodeOutcomes,
    rng: StdRng,
}

impl EpisodeEngine {
    /// Create an engine with a fresh episode already in place
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Seeded variant for reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let state = Self::starting_state(&config, &mut rng);
        Self {
            config,
            state,
            record: 0,
            outcomes: EpisodeOutcomes::default(),
            rng,
        }
    }

    /// Start a new episode: snake centered heading right, score and frame
    /// zeroed, histories cleared, fresh food. Record and outcome counters
    /// are untouched.
    pub fn reset(&mut self) -> &GameState {
        self.state = Self::starting_state(&self.config, &mut self.rng);
        &self.state
    }

    /// Execute one step of the simulation
    pub fn step(&mut self, action: Action) -> StepResult {
        if !self.state.is_alive {
            return StepResult {
                reward: 0.0,
                terminated: true,
                score: self.state.score,
                info: StepInfo {
                    ate_food: false,
                    cause: None,
                },
            };
        }

        let r = self.config.rewards;
        self.state.frame += 1;

        // Length before the head is pushed; the timeout budget is measured
        // against this, not the transient grown body.
        let length = self.state.snake.len() as u32;

        let heading = self.state.snake.heading.turned(action);
        let next = self.state.snake.head().stepped(heading, self.state.block);

        let mut reward = 0.0;

        // One-time bonus the first time a cell is entered this episode
        if self.state.path.mark_explored(next) {
            reward += r.exploration_bonus;
        }

        match self.state.turns.record(action) {
            Some(TurnPattern::TripleTurn) => reward += r.triple_turn_penalty,
            Some(TurnPattern::LaneChange) => reward += r.lane_change_bonus,
            None => {}
        }

        // Look-ahead self-avoidance, judged against the body as it stands
        if self.state.snake.collides_with_body(next) {
            reward += r.body_ahead_penalty;
        } else {
            reward += r.clear_ahead_bonus;
        }

        // The authoritative move
        self.state.snake.heading = heading;
        self.state.snake.push_head(next);
        self.state.path.push(next);

        if self.state.path.is_looping() {
            reward += r.loop_penalty;
        }

        let distance = next.distance(self.state.food);
        if distance > 0.0 {
            reward += r.approach_scale / distance;
        }

        if self.state.frame > self.config.timeout_factor * length {
            return self.finish(TerminationCause::Timeout);
        }

        if let Some(cause) = self.collision_cause(next) {
            return self.finish(cause);
        }

        let ate_food = next == self.state.food;
        if ate_food {
            self.state.score += 1;
            if self.state.score % MILESTONE_EVERY == 0 {
                reward += r.milestone_bonus;
            }
            if self.state.score > self.record {
                self.record = self.state.score;
                reward += r.record_bonus;
            }
            self.place_food();
        } else {
            self.state.snake.pop_tail();
            reward += r.survival_cost;
        }
        reward += r.step_bonus;

        // Directional progress against the cell the head just left
        let behind = self.state.snake.body.get(1).copied().unwrap_or(next);
        let food = self.state.food;
        let toward_x = (food.x - next.x) * (next.x - behind.x) > 0;
        let toward_y = (food.y - next.y) * (next.y - behind.y) > 0;
        reward += if toward_x || toward_y {
            r.progress_reward
        } else {
            -r.progress_reward
        };

        StepResult {
            reward,
            terminated: false,
            score: self.state.score,
            info: StepInfo {
                ate_food,
                cause: None,
            },
        }
    }

    /// True if a head at `cell` would end the episode
    pub fn is_collision(&self, cell: Cell) -> bool {
        self.state.is_collision(cell)
    }

    /// Read-only view of the live episode
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Best score seen by this engine across all episodes
    pub fn record(&self) -> u32 {
        self.record
    }

    /// How episodes have ended so far
    pub fn outcomes(&self) -> &EpisodeOutcomes {
        &self.outcomes
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Terminal bookkeeping shared by every way an episode can end. The
    /// death penalty replaces whatever shaping the step had accrued.
    fn finish(&mut self, cause: TerminationCause) -> StepResult {
        self.state.is_alive = false;
        self.outcomes.record(cause, self.state.score);
        StepResult {
            reward: self.config.rewards.death_penalty,
            terminated: true,
            score: self.state.score,
            info: StepInfo {
                ate_food: false,
                cause: Some(cause),
            },
        }
    }

    /// Wall and body checks stay separate so each cause keeps its own tally
    fn collision_cause(&self, cell: Cell) -> Option<TerminationCause> {
        if !self.state.is_in_bounds(cell) {
            return Some(TerminationCause::WallCollision);
        }
        if self.state.snake.collides_with_body(cell) {
            return Some(TerminationCause::SelfCollision);
        }
        None
    }

    /// Move the food to a random free cell and rebuild its rings
    fn place_food(&mut self) {
        self.state.food = Self::random_food(&self.config, &mut self.rng, &self.state.snake);
        self.state.rings = FoodRings::around(self.state.food, self.state.block);
    }

    fn starting_state(config: &GameConfig, rng: &mut StdRng) -> GameState {
        let block = config.block_size as i32;
        let center = Cell::new(
            (config.cells_x() / 2) as i32 * block,
            (config.cells_y() / 2) as i32 * block,
        );
        let snake = Snake::new(center, Heading::Right, config.initial_snake_length, block);
        let food = Self::random_food(config, rng, &snake);
        GameState::new(
            snake,
            food,
            config.width as i32,
            config.height as i32,
            block,
        )
    }

    /// Draw block-aligned cells until one misses the snake
    fn random_food(config: &GameConfig, rng: &mut StdRng, snake: &Snake) -> Cell {
        let block = config.block_size as i32;
        loop {
            let x = rng.gen_range(0..config.cells_x()) as i32 * block;
            let y = rng.gen_range(0..config.cells_y()) as i32 * block;
            let cell = Cell::new(x, y);
            if !snake.contains(cell) {
                return cell;
            }
        }
    }
}
