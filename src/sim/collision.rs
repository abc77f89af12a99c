//! Collision detection for the obstacle field
//!
//! Everything here is axis-aligned boxes. Overlap uses strict inequalities,
//! so boxes that merely share an edge do not collide. Obstacles are scanned
//! in spawn order and the first overlap ends the check. Fast, thin shapes
//! can tunnel through each other between frames; the scroll speeds and
//! obstacle sizes in the shipped profiles stay well below that threshold.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;

/// An axis-aligned box in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test; touching edges are not a hit
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.right()
            && other.pos.x < self.right()
            && self.pos.y < other.bottom()
            && other.pos.y < self.bottom()
    }
}

/// Scan the field in spawn order and return the index of the first obstacle
/// overlapping the player box, if any
pub fn first_hit(player: &Aabb, obstacles: &[Obstacle], ground_y: f32) -> Option<usize> {
    obstacles
        .iter()
        .position(|obstacle| player.overlaps(&obstacle.aabb(ground_y)))
}
