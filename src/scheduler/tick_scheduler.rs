use std::time::Duration;

use tracing::{debug, info};

use super::events::GameEvent;
use crate::game::{Direction, GameEngine, GameState, TickOutcome};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    /// Countdown before the first tick
    Ready { remaining: Duration },
    Running,
    Paused,
    /// `results_in` is `None` once the results delay has been reported
    GameOver { results_in: Option<Duration> },
}

/// Drives `GameEngine::tick` at a fixed cadence from elapsed time.
///
/// Time only accumulates toward the next tick while `Running`, so pausing
/// resumes mid-interval exactly where it stopped.
pub struct TickScheduler {
    engine: GameEngine,
    state: GameState,
    phase: Phase,
    tick_interval: Duration,
    accumulator: Duration,
}

impl TickScheduler {
    pub fn new(mut engine: GameEngine, mobile: bool) -> Self {
        let tick_interval = engine.config().tick_interval(mobile);
        let state = engine.reset();

        Self {
            engine,
            state,
            phase: Phase::NotStarted,
            tick_interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Read-only view of the simulation for renderers
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Time left on the ready countdown, if one is running
    pub fn ready_remaining(&self) -> Option<Duration> {
        match self.phase {
            Phase::Ready { remaining } => Some(remaining),
            _ => None,
        }
    }

    /// Begin the first run. Only has an effect before any run started.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }
        self.enter_ready();
        true
    }

    /// Throw away the current run, including any pending countdown or results
    /// delay, and begin a fresh one
    pub fn reset(&mut self) {
        self.state = self.engine.reset();
        self.enter_ready();
    }

    fn enter_ready(&mut self) {
        self.accumulator = Duration::ZERO;
        self.state.running = false;
        self.state.paused = false;
        self.phase = Phase::Ready {
            remaining: self.engine.config().ready_delay(),
        };
        debug!(delay_ms = self.engine.config().ready_delay_ms, "ready countdown");
    }

    /// Input is taken during the countdown and while running
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        match self.phase {
            Phase::Ready { .. } | Phase::Running => self.state.queue_direction(direction),
            _ => false,
        }
    }

    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.state.paused = true;
                info!("paused");
                Some(GameEvent::Paused)
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                self.state.paused = false;
                info!("resumed");
                Some(GameEvent::Resumed)
            }
            _ => None,
        }
    }

    /// Feed elapsed wall-clock time; runs every tick that fell due
    pub fn advance(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut budget = elapsed;

        loop {
            match self.phase {
                Phase::NotStarted | Phase::Paused | Phase::GameOver { results_in: None } => break,
                Phase::Ready { remaining } => {
                    if budget < remaining {
                        self.phase = Phase::Ready {
                            remaining: remaining - budget,
                        };
                        break;
                    }
                    budget -= remaining;
                    self.phase = Phase::Running;
                    self.state.running = true;
                    info!("game started");
                    events.push(GameEvent::Started);
                }
                Phase::Running => {
                    self.accumulator += budget;
                    if !self.run_due_ticks(&mut events) {
                        break;
                    }
                    // Game ended mid-batch; the leftover time counts toward the results delay
                    budget = std::mem::take(&mut self.accumulator);
                }
                Phase::GameOver {
                    results_in: Some(remaining),
                } => {
                    if budget < remaining {
                        self.phase = Phase::GameOver {
                            results_in: Some(remaining - budget),
                        };
                        break;
                    }
                    self.phase = Phase::GameOver { results_in: None };
                    events.push(GameEvent::ResultsReady {
                        score: self.state.score,
                    });
                    break;
                }
            }
        }

        events
    }

    /// Returns true if the game ended during this batch
    fn run_due_ticks(&mut self, events: &mut Vec<GameEvent>) -> bool {
        while self.accumulator >= self.tick_interval {
            self.accumulator -= self.tick_interval;

            match self.engine.tick(&mut self.state) {
                TickOutcome::Continuing => {}
                TickOutcome::AteFood(eaten) => {
                    events.push(GameEvent::AteFood(eaten));
                    if let Some(bonus) = eaten.color_bonus {
                        events.push(GameEvent::ColorBonus(bonus));
                    }
                }
                TickOutcome::GameOver(reason) => {
                    events.push(GameEvent::GameOver {
                        reason,
                        score: self.state.score,
                    });
                    self.phase = Phase::GameOver {
                        results_in: Some(self.engine.config().results_delay()),
                    };
                    return true;
                }
            }
        }
        false
    }
}
