//! Roadside buildings
//!
//! Buildings respawn on a random side of the road at a random lateral
//! offset and depth. Overlapping buildings are fine; they are scenery.

use rand::Rng;
use rand_pcg::Pcg32;

use super::field::{RecyclingField, ResetPolicy};
use super::state::{BUILDING_STREAM, Building, RngState};
use crate::config::{FarWindow, WorldConfig};
use crate::consts::BUILDING_Y;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingScatter {
    pub recycle_depth: f32,
    pub min_offset: f32,
    pub offset_span: f32,
    pub window: FarWindow,
}

impl ResetPolicy<Building> for BuildingScatter {
    fn threshold(&self) -> f32 {
        self.recycle_depth
    }

    fn reset(&self, entity: &mut Building, rng: &mut Pcg32) {
        let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        entity.pos.x = side * (self.min_offset + rng.random::<f32>() * self.offset_span);
        entity.pos.z = self.window.sample(rng.random::<f32>());
        entity.pos.y = BUILDING_Y;
    }
}

pub type BuildingField = RecyclingField<Building, BuildingScatter>;

pub fn building_field(config: &WorldConfig, seed: u64) -> BuildingField {
    let policy = BuildingScatter {
        recycle_depth: config.building_recycle_depth,
        min_offset: config.building_min_offset,
        offset_span: config.building_offset_span,
        window: config.building_window,
    };
    RecyclingField::populate(
        config.buildings,
        policy,
        RngState::new(seed, BUILDING_STREAM).to_rng(),
    )
}
