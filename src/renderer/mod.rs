//! Rendering port
//!
//! Backends draw from a `RenderSnapshot` and never touch the simulation.
//! The crate ships headless backends only; a graphical one plugs in by
//! implementing `Renderer`.

use crate::sim::RenderSnapshot;

/// Draw target for one frame
pub trait Renderer {
    fn draw(&mut self, frame: &RenderSnapshot);
}

/// Discards every frame
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &RenderSnapshot) {}
}

/// Logs a HUD line every n-th frame
#[derive(Debug)]
pub struct HudLogRenderer {
    every: u64,
    frames: u64,
}

impl HudLogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }
}

impl Renderer for HudLogRenderer {
    fn draw(&mut self, frame: &RenderSnapshot) {
        self.frames += 1;
        if self.frames % self.every != 0 {
            return;
        }
        log::info!(
            "[{:?}] level {} score {}/{} best {} obstacles {}",
            frame.phase,
            frame.hud.level,
            frame.hud.score,
            frame.hud.target,
            frame.hud.best,
            frame.obstacles.len()
        );
    }
}
