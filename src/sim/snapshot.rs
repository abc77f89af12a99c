//! Render-facing view of the simulation
//!
//! Renderers never read `GameState` directly; they get a flat copy of the
//! data a frame needs. Keeps draw backends off the simulation types and
//! makes headless rendering trivial to test.

use glam::Vec2;

use super::state::{GamePhase, GameState, ObstacleKind};

/// Player as a renderer sees it
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub alive: bool,
    /// Damage flash frames remaining; renderers blink while nonzero
    pub flash_frames: u32,
}

/// One obstacle, already resolved to a screen rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

/// Scoreboard line for the frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub level: u32,
    /// Whole-unit distance this run
    pub score: u32,
    pub target: u32,
    pub best: u32,
    /// Overlay countdown when the run is held on a level card
    pub overlay_frames: Option<u32>,
}

/// Everything a backend needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub screen: Vec2,
    pub ground_y: f32,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub hud: HudView,
}

/// Copy the drawable parts of the state into a snapshot
pub fn build_snapshot(state: &GameState) -> RenderSnapshot {
    let ground_y = state.tuning.ground_y();

    let mut obstacles = Vec::with_capacity(state.obstacles.len());
    for obstacle in &state.obstacles {
        obstacles.push(ObstacleView {
            kind: obstacle.kind,
            pos: Vec2::new(obstacle.x, ground_y - obstacle.height),
            size: Vec2::new(obstacle.width, obstacle.height),
        });
    }

    let overlay_frames = match state.phase {
        GamePhase::Transition => Some(state.transition_frames_left),
        _ => None,
    };

    RenderSnapshot {
        screen: Vec2::new(state.tuning.screen_width, state.tuning.screen_height),
        ground_y,
        phase: state.phase,
        player: PlayerView {
            pos: state.player.pos,
            size: state.player.size,
            alive: state.player.alive,
            flash_frames: state.player.flash_frames,
        },
        obstacles,
        hud: HudView {
            level: state.level,
            score: state.distance as u32,
            target: state.target_distance as u32,
            best: state.high_score,
            overlay_frames,
        },
    }
}
