//! Data-driven game balance
//!
//! Every gameplay constant lives in a `Tuning` profile so variant balances
//! are data, not forks. Two presets ship: `classic` (level targets grow 25%
//! each level) and `steady` (one long fixed target with a fixed score rate).
//! Profiles can also be loaded from JSON files and are validated before use.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the level target changes after a level-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetGrowth {
    /// Same target every level
    Fixed,
    /// Target multiplies by `factor`, truncated to whole units
    Geometric { factor: f32 },
}

/// What feeds the distance counter each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DistanceRate {
    /// Distance tracks the current scroll speed
    ScrollSpeed,
    /// Distance accrues at a fixed rate regardless of scroll speed
    Fixed(f32),
}

/// Reasons a profile is rejected at startup
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
    #[error("{field} range {lo}..={hi} is empty or starts at zero")]
    BadRange { field: &'static str, lo: u32, hi: u32 },
    #[error("gravity must be positive and jump_velocity negative")]
    BadJumpPair,
    #[error("target growth factor must be at least 1")]
    GrowthFactor,
    #[error("obstacle spawn weights cannot both be zero")]
    ZeroWeights,
    #[error("failed to read tuning file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file")]
    Parse(#[from] serde_json::Error),
}

/// Complete balance profile for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Playfield size in pixels
    pub screen_width: f32,
    pub screen_height: f32,
    /// Height of the ground band at the bottom of the playfield
    pub ground_height: f32,

    /// Downward acceleration per frame
    pub gravity: f32,
    /// Velocity applied on jump; negative because screen y grows downward
    pub jump_velocity: f32,
    /// Side of the player square
    pub player_size: f32,
    /// Fixed horizontal position of the player's left edge
    pub player_start_x: f32,

    /// Scroll speed at level 1 and its per-level increment
    pub scroll_speed_base: f32,
    pub scroll_speed_per_level: f32,

    /// Wall-clock gap between obstacle spawns
    pub spawn_interval_ms: f32,
    /// Spawn offset past the right screen edge
    pub spawn_margin: f32,
    /// Obstacles are culled once their right edge scrolls past -cull_margin
    pub cull_margin: f32,

    /// Inclusive size ranges per obstacle kind, in whole pixels
    pub spike_width: (u32, u32),
    pub spike_height: (u32, u32),
    pub block_width: (u32, u32),
    pub block_height: (u32, u32),
    /// Relative spawn weights
    pub spike_weight: u32,
    pub block_weight: u32,

    /// Distance target for level 1 and how it grows
    pub level_target_base: f32,
    pub target_growth: TargetGrowth,
    /// What the distance counter tracks
    pub distance_rate: DistanceRate,

    /// Frame timers
    pub damage_flash_frames: u32,
    pub intro_overlay_frames: u32,
    pub level_overlay_frames: u32,
    pub restart_delay_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}

impl Tuning {
    /// The growing-targets profile: each level's target is 25% farther
    pub fn classic() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 400.0,
            ground_height: 80.0,
            gravity: 0.8,
            jump_velocity: -15.0,
            player_size: 36.0,
            player_start_x: 120.0,
            scroll_speed_base: 5.0,
            scroll_speed_per_level: 1.25,
            spawn_interval_ms: 1200.0,
            spawn_margin: 20.0,
            cull_margin: 50.0,
            spike_width: (32, 45),
            spike_height: (50, 75),
            block_width: (35, 50),
            block_height: (55, 90),
            spike_weight: 3,
            block_weight: 1,
            level_target_base: 1000.0,
            target_growth: TargetGrowth::Geometric { factor: 1.25 },
            distance_rate: DistanceRate::ScrollSpeed,
            damage_flash_frames: 30,
            intro_overlay_frames: 90,
            level_overlay_frames: 120,
            restart_delay_frames: 90,
        }
    }

    /// The fixed-target profile: one long level span, gentler physics,
    /// faster scroll, score decoupled from scroll speed
    pub fn steady() -> Self {
        Self {
            screen_width: 900.0,
            gravity: 0.5,
            jump_velocity: -10.0,
            scroll_speed_base: 8.0,
            scroll_speed_per_level: 1.5,
            spawn_interval_ms: 2000.0,
            spike_width: (40, 50),
            spike_height: (40, 50),
            block_width: (40, 60),
            block_height: (40, 60),
            level_target_base: 10000.0,
            target_growth: TargetGrowth::Fixed,
            distance_rate: DistanceRate::Fixed(4.0),
            damage_flash_frames: 25,
            ..Self::classic()
        }
    }

    /// Vertical position of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.screen_height - self.ground_height
    }

    /// Scroll speed at a given level (levels start at 1)
    pub fn scroll_speed_for(&self, level: u32) -> f32 {
        self.scroll_speed_base + level.saturating_sub(1) as f32 * self.scroll_speed_per_level
    }

    /// Load and validate a profile from a JSON file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = fs::read_to_string(path)?;
        let tuning: Self = serde_json::from_str(&json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject profiles that cannot produce a playable run
    pub fn validate(&self) -> Result<(), TuningError> {
        let positives = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ground_height", self.ground_height),
            ("player_size", self.player_size),
            ("scroll_speed_base", self.scroll_speed_base),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("level_target_base", self.level_target_base),
        ];
        for (field, value) in positives {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field });
            }
        }

        if self.gravity <= 0.0 || self.jump_velocity >= 0.0 {
            return Err(TuningError::BadJumpPair);
        }

        let ranges = [
            ("spike_width", self.spike_width),
            ("spike_height", self.spike_height),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
        ];
        for (field, (lo, hi)) in ranges {
            if lo == 0 || lo > hi {
                return Err(TuningError::BadRange { field, lo, hi });
            }
        }

        if self.spike_weight + self.block_weight == 0 {
            return Err(TuningError::ZeroWeights);
        }
        if let TargetGrowth::Geometric { factor } = self.target_growth {
            if factor < 1.0 {
                return Err(TuningError::GrowthFactor);
            }
        }
        if let DistanceRate::Fixed(rate) = self.distance_rate {
            if rate <= 0.0 {
                return Err(TuningError::NonPositive {
                    field: "distance_rate",
                });
            }
        }

        Ok(())
    }
}
