//! Session wiring
//!
//! Owns the game state together with its ports and runs the frame loop:
//! accumulate wall time, run fixed simulation substeps, fan events out to
//! the score store and the log, then hand a snapshot to the renderer.

use crate::consts::{FRAME_MS, MAX_FRAME_MS, MAX_SUBSTEPS};
use crate::highscores::ScoreStore;
use crate::renderer::Renderer;
use crate::sim::{GameEvent, GameState, TickInput, build_snapshot, tick};

pub struct Session<S: ScoreStore, R: Renderer> {
    pub state: GameState,
    store: S,
    renderer: R,
    accumulator_ms: f32,
    pending_jump: bool,
    idle_mode: bool,
}

impl<S: ScoreStore, R: Renderer> Session<S, R> {
    /// Wire a state to its ports. Pulls the stored best score into the run.
    pub fn new(mut state: GameState, store: S, renderer: R) -> Self {
        state.high_score = store.load();
        Self {
            state,
            store,
            renderer,
            accumulator_ms: 0.0,
            pending_jump: false,
            idle_mode: false,
        }
    }

    /// Hand control to the autopilot
    pub fn set_idle_mode(&mut self, idle_mode: bool) {
        self.idle_mode = idle_mode;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Advance one rendered frame.
    ///
    /// Runs as many fixed substeps as the elapsed time covers, bounded by
    /// `MAX_SUBSTEPS`, then draws. The jump press feeds the first substep
    /// only; it is an edge, not a hold. A press on a frame too short for a
    /// substep is held until the next substep consumes it.
    pub fn frame(&mut self, jump_requested: bool, dt_ms: f32) {
        let dt_ms = dt_ms.min(MAX_FRAME_MS);
        self.accumulator_ms += dt_ms;
        self.pending_jump |= jump_requested;

        let mut input = TickInput {
            jump: self.pending_jump,
            idle_mode: self.idle_mode,
        };
        let mut substeps = 0;
        while self.accumulator_ms >= FRAME_MS && substeps < MAX_SUBSTEPS {
            let events = tick(&mut self.state, &input, FRAME_MS);
            self.accumulator_ms -= FRAME_MS;
            substeps += 1;

            // The first substep consumes the one-shot press
            input.jump = false;
            self.pending_jump = false;

            self.dispatch(&events);
        }

        let frame = build_snapshot(&self.state);
        self.renderer.draw(&frame);
    }

    /// React to simulation events that touch the ports
    fn dispatch(&mut self, events: &[GameEvent]) {
        for &event in events {
            match event {
                GameEvent::PlayerDied { distance } => {
                    log::info!("Run ended at distance {}", distance);
                }
                GameEvent::HighScore { score } => {
                    log::info!("New best score {}", score);
                    self.store.save(score);
                }
                GameEvent::RunRestarted { level } => {
                    log::info!("New attempt at level {}", level);
                }
                GameEvent::LevelUp { .. } => {}
            }
        }
    }
}
