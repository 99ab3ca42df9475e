//! Collectible stars
//!
//! Stars snap to one of the lanes. A collected star is only hidden; it keeps
//! scrolling until it passes the camera, and the recycle makes it visible
//! again at the far end.

use rand::Rng;
use rand_pcg::Pcg32;

use super::field::{RecyclingField, ResetPolicy};
use super::state::{RngState, STAR_STREAM, Star};
use crate::config::{FarWindow, WorldConfig};
use crate::consts::STAR_Y;
use crate::{lane_to_x, max_lane};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanePlacement {
    pub recycle_depth: f32,
    pub lane_count: u32,
    pub lane_width: f32,
    pub window: FarWindow,
}

impl ResetPolicy<Star> for LanePlacement {
    fn threshold(&self) -> f32 {
        self.recycle_depth
    }

    fn reset(&self, entity: &mut Star, rng: &mut Pcg32) {
        let edge = max_lane(self.lane_count);
        let lane = rng.random_range(-edge..=edge);
        entity.lane = lane;
        entity.pos.x = lane_to_x(lane, self.lane_width);
        entity.pos.y = STAR_Y;
        entity.pos.z = self.window.sample(rng.random::<f32>());
        entity.visible = true;
    }
}

pub type CollectibleField = RecyclingField<Star, LanePlacement>;

pub fn collectible_field(config: &WorldConfig, seed: u64) -> CollectibleField {
    let policy = LanePlacement {
        recycle_depth: config.star_recycle_depth,
        lane_count: config.lane_count,
        lane_width: config.lane_width,
        window: config.star_window,
    };
    RecyclingField::populate(config.stars, policy, RngState::new(seed, STAR_STREAM).to_rng())
}

impl CollectibleField {
    /// Advance the cosmetic spin of every star
    pub fn spin(&mut self, radians: f32) {
        for star in self.entities_mut() {
            star.spin = (star.spin + radians) % std::f32::consts::TAU;
        }
    }

    pub fn visible_count(&self) -> usize {
        self.iter().filter(|s| s.visible).count()
    }

    /// Place star `index` explicitly (scenario setup).
    /// Panics if `index` is out of range.
    pub(crate) fn place(&mut self, index: usize, star: Star) {
        self.entities_mut()[index] = star;
    }
}
