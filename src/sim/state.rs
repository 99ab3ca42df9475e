//! World state and core simulation types
//!
//! Everything the renderer reads each frame lives here. The simulator owns
//! it; readers only ever get shared references or a serialized snapshot.

use glam::Vec3;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::city::BuildingField;
use super::field::FieldEntity;
use super::road::RoadField;
use super::speed::SpeedPhase;
use super::stars::CollectibleField;
use crate::consts::{BUILDING_Y, STAR_Y};

/// A road tile. Only its depth ever moves; it stays centered on the road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    depth: f32,
}

impl RoadSegment {
    pub fn new(depth: f32) -> Self {
        Self { depth }
    }

    /// Shift back along the scroll axis (used when wrapping the pool)
    pub fn rewind(&mut self, distance: f32) {
        self.depth -= distance;
    }
}

impl FieldEntity for RoadSegment {
    fn depth(&self) -> f32 {
        self.depth
    }

    fn scroll(&mut self, delta: f32) {
        self.depth += delta;
    }

    fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.depth)
    }
}

/// A roadside building block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub pos: Vec3,
}

impl Default for Building {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, BUILDING_Y, 0.0),
        }
    }
}

impl FieldEntity for Building {
    fn depth(&self) -> f32 {
        self.pos.z
    }

    fn scroll(&mut self, delta: f32) {
        self.pos.z += delta;
    }

    fn position(&self) -> Vec3 {
        self.pos
    }
}

/// A collectible star sitting in one of the lanes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec3,
    /// Lane index, `0` is the road center
    pub lane: i32,
    /// Cleared on collection, restored on recycle
    pub visible: bool,
    /// Cosmetic rotation around the vertical axis (radians)
    pub spin: f32,
}

impl Star {
    /// A visible star at an explicit lane and depth
    pub fn new(lane: i32, lane_width: f32, depth: f32) -> Self {
        Self {
            pos: Vec3::new(crate::lane_to_x(lane, lane_width), STAR_Y, depth),
            lane,
            visible: true,
            spin: 0.0,
        }
    }
}

impl Default for Star {
    fn default() -> Self {
        Self::new(0, crate::consts::LANE_WIDTH, 0.0)
    }
}

impl FieldEntity for Star {
    fn depth(&self) -> f32 {
        self.pos.z
    }

    fn scroll(&mut self, delta: f32) {
        self.pos.z += delta;
    }

    fn position(&self) -> Vec3 {
        self.pos
    }

    fn visible(&self) -> bool {
        self.visible
    }
}

/// The player's scooter. The world scrolls past it; it never moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
}

impl Default for Player {
    fn default() -> Self {
        Self { pos: Vec3::ZERO }
    }
}

/// Events emitted for presentation collaborators (score display, pop effects)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// A star was picked up; `position` is where it was when hit
    StarCollected { index: usize, position: Vec3 },
    /// Score after an award
    ScoreChanged { score: u64 },
    /// Speed controller moved between phases
    SpeedPhaseChanged { from: SpeedPhase, to: SpeedPhase },
    /// Session restarted with a new seed
    Restarted { seed: u64 },
}

/// Per-field RNG streams, so fields never share a sequence
pub const ROAD_STREAM: u64 = 1;
pub const BUILDING_STREAM: u64 = 2;
pub const STAR_STREAM: u64 = 3;

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Everything that exists in the world for one session.
///
/// Only the simulator mutates it; everyone else reads through the getters,
/// so pools can never be swapped or resized from outside:
///
/// ```compile_fail
/// use scroll_runner::WorldConfig;
/// use scroll_runner::sim::{WorldSimulator, collectible_field};
///
/// let mut sim = WorldSimulator::with_seed(1);
/// sim.state_mut().stars = collectible_field(&WorldConfig::default(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct WorldState {
    pub(crate) road: RoadField,
    pub(crate) buildings: BuildingField,
    pub(crate) stars: CollectibleField,
    pub(crate) player: Player,
    /// Travel speed applied on the last tick
    pub(crate) speed: f32,
}

impl WorldState {
    pub fn road(&self) -> &RoadField {
        &self.road
    }

    pub fn buildings(&self) -> &BuildingField {
        &self.buildings
    }

    pub fn stars(&self) -> &CollectibleField {
        &self.stars
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

/// Serializable copy of every transform a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub score: u64,
    pub speed: f32,
    pub phase: SpeedPhase,
    pub player: Vec3,
    pub road: Vec<Vec3>,
    pub buildings: Vec<Vec3>,
    pub stars: Vec<Star>,
}
