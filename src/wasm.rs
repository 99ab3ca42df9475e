//! Browser bindings
//!
//! The 3D scene owns the canvas, meshes and animation frame loop. Each frame
//! it forwards scroll pulses, calls `tick`, copies transforms out of the
//! flat buffers below into its meshes, then calls `drainEventsJson`. Events
//! left undrained are capped at `MAX_PENDING_EVENTS`, oldest dropped first.

use wasm_bindgen::prelude::*;

use crate::config::WorldConfig;
use crate::sim::{FieldEntity, TickInput, WorldSimulator};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Scroll Runner simulation loaded");
}

/// Handle held by the scene for the lifetime of the page
#[wasm_bindgen]
pub struct ScrollRunner {
    sim: WorldSimulator,
    pending_pulses: u32,
}

#[wasm_bindgen]
impl ScrollRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> ScrollRunner {
        Self {
            sim: WorldSimulator::with_seed(u64::from(seed)),
            pending_pulses: 0,
        }
    }

    /// Build from a JSON config; missing keys take their defaults
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(seed: u32, config_json: &str) -> Result<ScrollRunner, JsError> {
        let config = WorldConfig::from_json(config_json)?;
        Ok(Self {
            sim: WorldSimulator::new(config, u64::from(seed))?,
            pending_pulses: 0,
        })
    }

    /// Record a scroll event; applied on the next tick
    pub fn pulse(&mut self) {
        self.pending_pulses = self.pending_pulses.saturating_add(1);
    }

    /// Advance one frame. Returns how many stars were collected.
    pub fn tick(&mut self, dt: f32) -> u32 {
        let before = self.sim.stars_collected();
        let input = TickInput::pulses(std::mem::take(&mut self.pending_pulses));
        self.sim.tick(&input, dt);
        (self.sim.stars_collected() - before) as u32
    }

    pub fn restart(&mut self, seed: u32) {
        self.pending_pulses = 0;
        self.sim.restart(u64::from(seed));
    }

    pub fn score(&self) -> f64 {
        self.sim.score() as f64
    }

    pub fn speed(&self) -> f32 {
        self.sim.speed()
    }

    /// Road chunk positions as `[x, y, z, x, y, z, ...]`
    #[wasm_bindgen(js_name = roadPositions)]
    pub fn road_positions(&self) -> Vec<f32> {
        flatten(self.sim.state().road().iter().map(FieldEntity::position))
    }

    #[wasm_bindgen(js_name = buildingPositions)]
    pub fn building_positions(&self) -> Vec<f32> {
        flatten(self.sim.state().buildings().iter().map(FieldEntity::position))
    }

    #[wasm_bindgen(js_name = starPositions)]
    pub fn star_positions(&self) -> Vec<f32> {
        flatten(self.sim.state().stars().iter().map(FieldEntity::position))
    }

    /// `1` for visible stars, `0` for collected ones
    #[wasm_bindgen(js_name = starVisibility)]
    pub fn star_visibility(&self) -> Vec<u8> {
        self.sim
            .state()
            .stars()
            .iter()
            .map(|s| u8::from(s.visible))
            .collect()
    }

    #[wasm_bindgen(js_name = starSpins)]
    pub fn star_spins(&self) -> Vec<f32> {
        self.sim.state().stars().iter().map(|s| s.spin).collect()
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.sim.snapshot())?)
    }

    /// Pending events as a JSON array; clears them. Call once per frame.
    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.sim.drain_events())?)
    }
}

fn flatten(positions: impl Iterator<Item = glam::Vec3>) -> Vec<f32> {
    positions.flat_map(|p| p.to_array()).collect()
}
