//! Scroll Runner - endless-runner world simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (recycling fields, collisions, score, speed)
//! - `config`: Data-driven world constants with validation
//! - `wasm`: Browser facade consumed by the 3D scene (wasm32 only)

pub mod config;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{ConfigError, WorldConfig};
pub use sim::{TickInput, WorldEvent, WorldSimulator, WorldSnapshot};

/// World configuration constants
pub mod consts {
    /// Nominal frame timestep used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Pool sizes (fixed for the lifetime of a session)
    pub const ROAD_SEGMENTS: usize = 6;
    pub const BUILDINGS: usize = 30;
    pub const STARS: usize = 10;

    /// Road tiling
    pub const CHUNK_SIZE: f32 = 20.0;
    pub const ROAD_WIDTH: f32 = 10.0;

    /// Building box dimensions (width, height, depth)
    pub const BUILDING_SIZE: [f32; 3] = [4.0, 15.0, 4.0];
    /// Buildings sit on the ground, so their center is half their height up
    pub const BUILDING_Y: f32 = 7.5;
    pub const BUILDING_RECYCLE_DEPTH: f32 = 10.0;
    /// Closest lateral distance from the road center
    pub const BUILDING_MIN_OFFSET: f32 = 8.0;
    pub const BUILDING_OFFSET_SPAN: f32 = 5.0;
    pub const BUILDING_FAR_NEAR: f32 = -20.0;
    pub const BUILDING_FAR_SPAN: f32 = 100.0;

    /// Stars
    pub const STAR_Y: f32 = 1.0;
    pub const STAR_RECYCLE_DEPTH: f32 = 5.0;
    pub const STAR_FAR_NEAR: f32 = -20.0;
    pub const STAR_FAR_SPAN: f32 = 50.0;
    /// Cosmetic spin per tick (radians)
    pub const STAR_SPIN: f32 = 0.05;
    pub const LANE_COUNT: u32 = 3;
    pub const LANE_WIDTH: f32 = 3.0;

    /// Speed curve
    pub const BASE_SPEED: f32 = 0.3;
    pub const MAX_SPEED: f32 = 1.2;
    pub const DECAY_FACTOR: f32 = 0.95;
    pub const SPEED_EPSILON: f32 = 0.001;
    /// Debounce window after the last scroll pulse (seconds)
    pub const DEBOUNCE_SECS: f32 = 0.2;

    /// Scoring
    pub const COLLISION_HALF_WIDTH: f32 = 1.0;
    pub const POINTS_PER_STAR: u64 = 100;
}

/// Lateral position of a lane index
#[inline]
pub fn lane_to_x(lane: i32, lane_width: f32) -> f32 {
    lane as f32 * lane_width
}

/// Largest lane index for an odd lane count (3 lanes -> 1, so lanes are -1..=1)
#[inline]
pub fn max_lane(lane_count: u32) -> i32 {
    (lane_count.saturating_sub(1) / 2) as i32
}
