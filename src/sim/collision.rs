//! Player vs star pickup detection
//!
//! A box test on the ground plane (lateral and depth axes). Height is
//! ignored: stars float at a fixed height the player always reaches.

use glam::Vec3;

use super::state::{Player, Star};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSystem {
    /// Half the side of the pickup box
    pub half_width: f32,
}

impl CollisionSystem {
    pub fn new(half_width: f32) -> Self {
        Self { half_width }
    }

    /// Axis-aligned overlap on (x, z)
    #[inline]
    pub fn overlaps(&self, player: Vec3, star: Vec3) -> bool {
        let dx = star.x - player.x;
        let dz = star.z - player.z;
        dx.abs() < self.half_width && dz.abs() < self.half_width
    }

    /// Hide every visible star the player touches and return their indices.
    /// Hidden stars are skipped, so a star is never collected twice.
    pub fn check(&self, player: &Player, stars: &mut [Star]) -> Vec<usize> {
        let mut collected = Vec::new();
        for (index, star) in stars.iter_mut().enumerate() {
            if !star.visible {
                continue;
            }
            if self.overlaps(player.pos, star.pos) {
                star.visible = false;
                collected.push(index);
            }
        }
        collected
    }
}
