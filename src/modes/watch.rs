//! Interactive viewing mode
//!
//! Runs a policy against the engine inside a TUI so episodes can be watched
//! live. Playback can be paused, restarted, and re-paced; finished episodes
//! restart automatically.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Restart the episode
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, interval};

use crate::game::{EpisodeEngine, GameConfig};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::policy::Policy;
use crate::render::Renderer;

/// Playback speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchSpeed {
    /// Slow: 2 Hz (500ms per step)
    Slow,
    /// Normal: 8 Hz (125ms per step)
    Normal,
    /// Fast: 20 Hz (50ms per step)
    Fast,
    /// Very Fast: 60 Hz (16ms per step)
    VeryFast,
}

impl WatchSpeed {
    /// Get the tick interval for this speed
    fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }

    /// Map a speed digit (1-4) to a setting
    fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Self::Slow),
            2 => Some(Self::Normal),
            3 => Some(Self::Fast),
            4 => Some(Self::VeryFast),
            _ => None,
        }
    }
}

/// Interactive mode: a policy drives the engine, the TUI shows it
pub struct WatchMode {
    engine: EpisodeEngine,
    policy: Box<dyn Policy>,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    paused: bool,
    speed: WatchSpeed,
}

impl WatchMode {
    pub fn new(config: GameConfig, policy: Box<dyn Policy>) -> Self {
        Self {
            engine: EpisodeEngine::new(config),
            policy,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            paused: false,
            speed: WatchSpeed::Normal,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run watch loop with cleanup
        let result = self.run_watch_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_watch_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Simulation ticks at the selected speed
        let mut tick_timer = interval(self.speed.tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                // Simulation tick
                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.advance();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine, &self.metrics, self.paused);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// One simulation tick: step the policy, or restart a finished episode.
    /// The dead state gets one tick on screen before the restart.
    fn advance(&mut self) {
        if !self.engine.state().is_alive {
            self.engine.reset();
            return;
        }

        let action = self.policy.choose(self.engine.state());
        let result = self.engine.step(action);
        self.metrics.on_step();

        if result.terminated {
            self.metrics.on_episode_end();
        }
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::TogglePause => {
                    self.paused = !self.paused;
                }
                KeyAction::Restart => {
                    self.engine.reset();
                }
                KeyAction::Speed(digit) => {
                    if let Some(speed) = WatchSpeed::from_digit(digit) {
                        self.change_speed(speed, tick_timer);
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    /// Change the playback speed by swapping in a fresh tick timer
    fn change_speed(&mut self, new_speed: WatchSpeed, tick_timer: &mut Interval) {
        self.speed = new_speed;
        *tick_timer = interval(self.speed.tick_interval());
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, GameState};
    use crate::policy::RandomPolicy;

    /// Drives straight into the nearest wall
    struct StraightPolicy;

    impl Policy for StraightPolicy {
        fn choose(&mut self, _state: &GameState) -> Action {
            Action::Straight
        }
    }

    #[test]
    fn test_watch_mode_initialization() {
        let mode = WatchMode::new(GameConfig::default(), Box::new(RandomPolicy::new(1)));

        assert!(mode.engine.state().is_alive);
        assert_eq!(mode.engine.state().score, 0);
        assert!(!mode.paused);
        assert_eq!(mode.speed, WatchSpeed::Normal);
    }

    #[test]
    fn test_advance_steps_the_engine() {
        let mut mode = WatchMode::new(GameConfig::default(), Box::new(RandomPolicy::new(2)));

        mode.advance();

        assert_eq!(mode.engine.state().frame, 1);
        assert_eq!(mode.metrics.steps_taken, 1);
    }

    #[test]
    fn test_advance_restarts_after_terminal_tick() {
        let mut mode = WatchMode::new(GameConfig::default(), Box::new(StraightPolicy));

        // drive until the wall ends the episode
        for _ in 0..1000 {
            if !mode.engine.state().is_alive {
                break;
            }
            mode.advance();
        }
        assert!(!mode.engine.state().is_alive);
        assert_eq!(mode.metrics.episodes_watched, 1);

        // the next tick restarts instead of stepping
        mode.advance();
        assert!(mode.engine.state().is_alive);
        assert_eq!(mode.engine.state().frame, 0);
    }

    #[test]
    fn test_speed_settings() {
        assert_eq!(WatchSpeed::Slow.tick_interval(), Duration::from_millis(500));
        assert_eq!(
            WatchSpeed::Normal.tick_interval(),
            Duration::from_millis(125)
        );
        assert_eq!(WatchSpeed::Fast.tick_interval(), Duration::from_millis(50));
        assert_eq!(
            WatchSpeed::VeryFast.tick_interval(),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn test_speed_digits() {
        assert_eq!(WatchSpeed::from_digit(1), Some(WatchSpeed::Slow));
        assert_eq!(WatchSpeed::from_digit(2), Some(WatchSpeed::Normal));
        assert_eq!(WatchSpeed::from_digit(3), Some(WatchSpeed::Fast));
        assert_eq!(WatchSpeed::from_digit(4), Some(WatchSpeed::VeryFast));
        assert_eq!(WatchSpeed::from_digit(5), None);
    }
}
