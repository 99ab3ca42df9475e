//! Road tiles
//!
//! The road is a ring of equal chunks. A chunk that scrolls past the camera
//! jumps back by the length of the whole ring, so neighbours always stay
//! exactly one chunk apart as long as `speed < chunk_size`.

use rand_pcg::Pcg32;

use super::field::{FieldEntity, RecyclingField, ResetPolicy};
use super::state::{ROAD_STREAM, RngState, RoadSegment};
use crate::config::WorldConfig;

/// Wrap-around reset for road chunks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadWrap {
    pub chunk_size: f32,
    pub pool_size: usize,
}

impl RoadWrap {
    /// Distance a chunk travels back when wrapped
    pub fn ring_length(&self) -> f32 {
        self.pool_size as f32 * self.chunk_size
    }
}

impl ResetPolicy<RoadSegment> for RoadWrap {
    fn threshold(&self) -> f32 {
        self.chunk_size
    }

    fn reset(&self, entity: &mut RoadSegment, _rng: &mut Pcg32) {
        entity.rewind(self.ring_length());
    }
}

pub type RoadField = RecyclingField<RoadSegment, RoadWrap>;

/// Lay chunks out at `0, -chunk, -2*chunk, ...`
pub fn road_field(config: &WorldConfig, seed: u64) -> RoadField {
    let policy = RoadWrap {
        chunk_size: config.chunk_size,
        pool_size: config.road_segments,
    };
    let segments = (0..config.road_segments)
        .map(|i| RoadSegment::new(-(i as f32) * config.chunk_size))
        .collect();
    RecyclingField::new(segments, policy, RngState::new(seed, ROAD_STREAM).to_rng())
}

impl RoadField {
    /// Depths sorted nearest-to-camera last
    pub fn sorted_depths(&self) -> Vec<f32> {
        let mut depths: Vec<f32> = self.iter().map(FieldEntity::depth).collect();
        depths.sort_by(|a, b| a.total_cmp(b));
        depths
    }
}
