//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level overlay countdown; the world is frozen and input is ignored
    Transition,
    /// Active play
    Running,
    /// Crash aftermath, auto-restart countdown
    Dead,
}

/// Obstacle variants, spawn-weighted toward spikes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Spike,
    Block,
}

/// A ground obstacle; its base sits on the ground line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Left edge in screen coordinates
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Collision box, anchored to the ground line
    pub fn aabb(&self, ground_y: f32) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, ground_y - self.height),
            Vec2::new(self.width, self.height),
        )
    }
}

/// The runner: a square locked to a fixed column, moving only vertically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner in screen coordinates (y grows downward)
    pub pos: Vec2,
    /// Vertical velocity in pixels per frame
    pub vel_y: f32,
    /// Side length of the square
    pub size: f32,
    pub on_ground: bool,
    pub alive: bool,
    /// Damage flash countdown in frames
    pub flash_frames: u32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            vel_y: 0.0,
            size: tuning.player_size,
            on_ground: false,
            alive: true,
            flash_frames: 0,
        };
        player.reset(tuning);
        player
    }

    /// Put the player back at the start column, resting on the ground line.
    /// `on_ground` stays false until the first step's clamp confirms it.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.pos = Vec2::new(tuning.player_start_x, tuning.ground_y() - self.size);
        self.vel_y = 0.0;
        self.on_ground = false;
        self.alive = true;
        self.flash_frames = 0;
    }

    /// Request a jump; only grounded, living players leave the floor
    pub fn jump(&mut self, tuning: &Tuning) {
        if self.on_ground && self.alive {
            self.vel_y = tuning.jump_velocity;
            self.on_ground = false;
        }
    }

    /// Advance one physics frame: gravity, whole-pixel vertical motion
    /// (truncation toward zero), ground clamp, flash countdown
    pub fn step(&mut self, tuning: &Tuning) {
        self.vel_y += tuning.gravity;
        self.pos.y += self.vel_y.trunc();

        let ground_y = tuning.ground_y();
        if self.pos.y + self.size >= ground_y {
            self.pos.y = ground_y - self.size;
            self.vel_y = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        if self.flash_frames > 0 {
            self.flash_frames -= 1;
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }
}

/// Events emitted by a tick, for the shell to log or act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelUp { level: u32 },
    PlayerDied { distance: u32 },
    HighScore { score: u32 },
    RunRestarted { level: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded generator; every random draw in the simulation goes through it
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Overlay frames remaining (Transition only)
    pub transition_frames_left: u32,
    /// Auto-restart frames remaining (Dead only)
    pub restart_frames_left: u32,
    /// Current level, starting at 1
    pub level: u32,
    /// Distance travelled this run, in scroll units
    pub distance: f32,
    /// Distance at which the next level starts
    pub target_distance: f32,
    /// Horizontal world speed in pixels per frame
    pub scroll_speed: f32,
    /// Best distance ever recorded, as loaded from the score store
    pub high_score: u32,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Wall-clock milliseconds accrued toward the next spawn
    pub spawn_clock_ms: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Balance profile for this run
    pub tuning: Tuning,
}

impl GameState {
    /// Create a new game state with the given seed and the default profile
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::classic())
    }

    /// Create a new game state with an explicit balance profile.
    /// The run opens on the intro overlay.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(&tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Transition,
            transition_frames_left: tuning.intro_overlay_frames,
            restart_frames_left: 0,
            level: 1,
            distance: 0.0,
            target_distance: tuning.level_target_base,
            scroll_speed: tuning.scroll_speed_for(1),
            high_score: 0,
            player,
            obstacles: Vec::new(),
            spawn_clock_ms: 0.0,
            time_ticks: 0,
            tuning,
        }
    }
}
