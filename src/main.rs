//! Cube Dash entry point
//!
//! Runs a seeded autopilot session headlessly at the target frame rate and
//! logs the HUD. Usage:
//!
//! ```text
//! cube-dash [seed] [classic|steady|path/to/profile.json]
//! ```

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};

use cube_dash::consts::TARGET_FPS;
use cube_dash::highscores::{DEFAULT_SCORE_PATH, FileScoreStore};
use cube_dash::platform::{Clock, FrameClock, InputSource, ScriptedInput};
use cube_dash::renderer::HudLogRenderer;
use cube_dash::sim::GameState;
use cube_dash::{Session, Tuning};

/// Demo length before the summary line
const DEMO_FRAMES: u64 = 60 * 60;

/// HUD log cadence in frames
const HUD_EVERY: u64 = 60;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(raw) => raw.parse().context("seed must be an unsigned integer")?,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock is before the epoch")?
            .as_millis() as u64,
    };
    let tuning = match args.next().as_deref() {
        None | Some("classic") => Tuning::classic(),
        Some("steady") => Tuning::steady(),
        Some(path) if path.ends_with(".json") => Tuning::load(Path::new(path))
            .with_context(|| format!("loading tuning profile {}", path))?,
        Some(other) => bail!(
            "unknown profile {:?}, expected classic, steady or a .json path",
            other
        ),
    };

    log::info!("Cube Dash starting, seed {}", seed);

    let state = GameState::with_tuning(seed, tuning);
    let store = FileScoreStore::new(DEFAULT_SCORE_PATH);
    let mut session = Session::new(state, store, HudLogRenderer::new(HUD_EVERY));
    session.set_idle_mode(true);

    let mut clock = FrameClock::new(TARGET_FPS);
    let mut input = ScriptedInput::default();
    for _ in 0..DEMO_FRAMES {
        let dt = clock.tick();
        session.frame(input.poll_jump(), dt);
    }

    let state = &session.state;
    log::info!(
        "Demo over: level {}, best distance {}",
        state.level,
        state.high_score.max(state.distance as u32)
    );
    Ok(())
}
