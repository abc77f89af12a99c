//! Cube Dash - A side-scrolling cube runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `session`: Frame loop wiring the state to its ports
//! - `renderer`: Render port and the headless backends
//! - `platform`: Clock and input abstraction
//! - `highscores`: Best score persistence
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Target render rate
    pub const TARGET_FPS: u32 = 60;
    /// Reference frame length; one simulation tick covers this much time
    pub const FRAME_MS: f32 = 16.6667;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame a session accepts from a host clock
    pub const MAX_FRAME_MS: f32 = 100.0;
}

/// Scale a frame's wall time to reference frame units
#[inline]
pub fn frame_units(dt_ms: f32) -> f32 {
    dt_ms / consts::FRAME_MS
}
