//! Interactive play in the terminal
//!
//! Keyboard input, the simulation clock and rendering each run on their own
//! cadence inside one `tokio::select!` loop. Only the scheduler mutates the
//! game; the renderer reads a snapshot each frame.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, Write, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine};
use crate::highscores::{HighScoreEntry, HighScoreLedger, ScoreStore};
use crate::input::{InitialsAction, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Overlay, Renderer, View};
use crate::scheduler::{GameEvent, Phase, TickScheduler};

/// Knobs for an interactive session
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Use the slower touch-device tick
    pub mobile: bool,
    /// Ring the terminal bell on food, bonus and game over
    pub bell: bool,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

pub struct HumanMode<S: ScoreStore> {
    scheduler: TickScheduler,
    ledger: HighScoreLedger<S>,
    high_scores: Vec<HighScoreEntry>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    overlay: Overlay,
    initials_len: usize,
    bell: bool,
    should_quit: bool,
}

impl<S: ScoreStore> HumanMode<S> {
    pub fn new(config: GameConfig, ledger: HighScoreLedger<S>, options: PlayOptions) -> Self {
        let initials_len = config.initials_len;
        let engine = match options.seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };
        let high_scores = ledger.entries();

        Self {
            scheduler: TickScheduler::new(engine, options.mobile),
            ledger,
            high_scores,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            overlay: Overlay::Title,
            initials_len,
            bell: options.bell,
            should_quit: false,
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

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The scheduler keeps its own fixed tick; this only feeds it elapsed time
        let mut clock_timer = interval(Duration::from_millis(10));
        let mut last_advance = Instant::now();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        info!(
            tick_ms = self.scheduler.tick_interval().as_millis() as u64,
            "interactive session started"
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Simulation clock
                _ = clock_timer.tick() => {
                    let now = Instant::now();
                    let elapsed = now - last_advance;
                    last_advance = now;
                    self.update_game(elapsed);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.refresh_metrics();
                    let view = View {
                        state: self.scheduler.state(),
                        phase: self.scheduler.phase(),
                        metrics: &self.metrics,
                        high_scores: &self.high_scores,
                        overlay: &self.overlay,
                    };
                    let renderer = &self.renderer;
                    terminal.draw(|frame| {
                        renderer.render(frame, &view);
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

        info!(
            games = self.metrics.games_played,
            best = self.metrics.best_score,
            "interactive session ended"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Overlay::EnterInitials { .. } = self.overlay {
            let action = self.input_handler.handle_initials_key(key);
            self.handle_initials(action);
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                self.scheduler.queue_direction(direction);
            }
            KeyAction::TogglePause => {
                if let Some(event) = self.scheduler.toggle_pause() {
                    self.on_game_event(event);
                }
            }
            KeyAction::Restart => {
                self.reset_game();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn handle_initials(&mut self, action: InitialsAction) {
        let Overlay::EnterInitials { score, typed, .. } = &mut self.overlay else {
            return;
        };
        let score = *score;

        match action {
            InitialsAction::Letter(c) => {
                if typed.len() < self.initials_len {
                    typed.push(c);
                }
            }
            InitialsAction::Backspace => {
                typed.pop();
            }
            InitialsAction::Submit => {
                if typed.is_empty() {
                    return;
                }
                let initials = typed.clone();
                self.high_scores = self.ledger.add(&initials, score);
                info!(initials = %initials, score, "high score recorded");
                self.overlay = Overlay::Results { score };
            }
            InitialsAction::Skip => {
                self.overlay = Overlay::Results { score };
            }
            InitialsAction::None => {}
        }
    }

    fn refresh_metrics(&mut self) {
        if self.scheduler.phase() == Phase::Running {
            self.metrics.update();
        }
    }

    fn update_game(&mut self, elapsed: Duration) {
        let events = self.scheduler.advance(elapsed);
        for event in events {
            self.on_game_event(event);
        }
    }

    fn on_game_event(&mut self, event: GameEvent) {
        if self.bell && event.is_audible() {
            // Fire-and-forget cue; a failed write is not worth surfacing
            let _ = stderr().write_all(b"\x07");
        }

        match event {
            GameEvent::Started => {
                self.metrics.on_game_start();
            }
            GameEvent::AteFood(eaten) => {
                self.metrics.on_food(&eaten);
            }
            GameEvent::ColorBonus(bonus) => {
                debug!(
                    colors = bonus.distinct_colors,
                    points = bonus.points,
                    "colour bonus"
                );
            }
            GameEvent::GameOver { score, .. } => {
                self.metrics.on_game_over(score);
                self.overlay = Overlay::Crashed;
            }
            GameEvent::ResultsReady { score } => {
                self.overlay = if self.ledger.is_new_high_score(score) {
                    Overlay::EnterInitials {
                        score,
                        rank: self.ledger.rank(score),
                        typed: String::new(),
                    }
                } else {
                    Overlay::Results { score }
                };
            }
            GameEvent::Paused => {
                self.metrics.on_pause();
            }
            GameEvent::Resumed => {
                self.metrics.on_resume();
            }
        }
    }

    fn reset_game(&mut self) {
        if self.scheduler.phase() == Phase::NotStarted {
            self.scheduler.start();
        } else {
            self.scheduler.reset();
        }
        self.overlay = Overlay::None;
        self.high_scores = self.ledger.entries();
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
