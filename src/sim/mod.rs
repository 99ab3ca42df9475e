//! Deterministic simulation module
//!
//! All world logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, one stream per field
//! - Timers are elapsed-time bookkeeping inside `tick`
//! - Fixed pool sizes, stable entity indices
//! - No rendering or platform dependencies

pub mod city;
pub mod collision;
pub mod field;
pub mod road;
pub mod score;
pub mod speed;
pub mod stars;
pub mod state;
pub mod tick;

pub use city::{BuildingField, BuildingScatter, building_field};
pub use collision::CollisionSystem;
pub use field::{FieldEntity, RecyclingField, ResetPolicy};
pub use road::{RoadField, RoadWrap, road_field};
pub use score::ScoreTracker;
pub use speed::{SpeedController, SpeedPhase};
pub use stars::{CollectibleField, LanePlacement, collectible_field};
pub use state::{
    Building, Player, RngState, RoadSegment, Star, WorldEvent, WorldSnapshot, WorldState,
};
pub use tick::{MAX_PENDING_EVENTS, TickInput, WorldSimulator};
