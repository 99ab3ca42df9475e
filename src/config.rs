//! World configuration
//!
//! Every tunable constant of a session lives here. Values are fixed at
//! construction; there is no runtime reconfiguration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("pool `{0}` must hold at least one entity")]
    EmptyPool(&'static str),
    #[error("chunk size must be positive, got {0}")]
    ChunkSize(f32),
    #[error("speed range invalid: base {base} must be in [0, max {max}]")]
    SpeedRange { base: f32, max: f32 },
    #[error("max speed {max} must stay below chunk size {chunk} or the road shows seams")]
    SpeedExceedsChunk { max: f32, chunk: f32 },
    #[error("decay factor must be in (0, 1), got {0}")]
    DecayFactor(f32),
    #[error("`{0}` must be positive and finite, got {1}")]
    NonPositive(&'static str, f32),
    #[error("`{0}` must be finite, got {1}")]
    NonFinite(&'static str, f32),
    #[error("`{0}` must not be negative, got {1}")]
    Negative(&'static str, f32),
    #[error("lane count must be odd, got {0}")]
    LaneCount(u32),
    #[error("far window `{0}` must be finite, non-empty and start behind its recycle depth")]
    FarWindow(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A depth range `[near - span, near]` that recycled entities respawn in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FarWindow {
    /// Closest respawn depth (least negative)
    pub near: f32,
    /// How far beyond `near` the respawn may land
    pub span: f32,
}

impl FarWindow {
    pub fn new(near: f32, span: f32) -> Self {
        Self { near, span }
    }

    /// Depth for a unit sample `u` in `[0, 1)`
    #[inline]
    pub fn sample(&self, u: f32) -> f32 {
        self.near - u * self.span
    }

    pub fn far(&self) -> f32 {
        self.near - self.span
    }

    pub fn contains(&self, depth: f32) -> bool {
        depth <= self.near && depth >= self.far()
    }

    /// Finite, non-empty and entirely at or behind `recycle_depth`
    pub fn fits_behind(&self, recycle_depth: f32) -> bool {
        self.near.is_finite()
            && self.span.is_finite()
            && self.span > 0.0
            && self.far().is_finite()
            && self.near <= recycle_depth
    }
}

/// Session constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // === Pools ===
    pub road_segments: usize,
    pub buildings: usize,
    pub stars: usize,

    // === Road ===
    pub chunk_size: f32,

    // === City ===
    pub building_recycle_depth: f32,
    pub building_min_offset: f32,
    pub building_offset_span: f32,
    pub building_window: FarWindow,

    // === Stars ===
    pub star_recycle_depth: f32,
    pub star_window: FarWindow,
    pub lane_count: u32,
    pub lane_width: f32,
    pub star_spin: f32,

    // === Speed ===
    pub base_speed: f32,
    pub max_speed: f32,
    pub decay_factor: f32,
    pub speed_epsilon: f32,
    pub debounce_secs: f32,

    // === Scoring ===
    pub collision_half_width: f32,
    pub points_per_star: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            road_segments: ROAD_SEGMENTS,
            buildings: BUILDINGS,
            stars: STARS,

            chunk_size: CHUNK_SIZE,

            building_recycle_depth: BUILDING_RECYCLE_DEPTH,
            building_min_offset: BUILDING_MIN_OFFSET,
            building_offset_span: BUILDING_OFFSET_SPAN,
            building_window: FarWindow::new(BUILDING_FAR_NEAR, BUILDING_FAR_SPAN),

            star_recycle_depth: STAR_RECYCLE_DEPTH,
            star_window: FarWindow::new(STAR_FAR_NEAR, STAR_FAR_SPAN),
            lane_count: LANE_COUNT,
            lane_width: LANE_WIDTH,
            star_spin: STAR_SPIN,

            base_speed: BASE_SPEED,
            max_speed: MAX_SPEED,
            decay_factor: DECAY_FACTOR,
            speed_epsilon: SPEED_EPSILON,
            debounce_secs: DEBOUNCE_SECS,

            collision_half_width: COLLISION_HALF_WIDTH,
            points_per_star: POINTS_PER_STAR,
        }
    }
}

impl WorldConfig {
    /// Check every constraint the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.road_segments == 0 {
            return Err(ConfigError::EmptyPool("road_segments"));
        }
        if self.buildings == 0 {
            return Err(ConfigError::EmptyPool("buildings"));
        }
        if self.stars == 0 {
            return Err(ConfigError::EmptyPool("stars"));
        }
        if !(self.chunk_size.is_finite() && self.chunk_size > 0.0) {
            return Err(ConfigError::ChunkSize(self.chunk_size));
        }
        if !(self.base_speed.is_finite()
            && self.max_speed.is_finite()
            && self.base_speed >= 0.0
            && self.base_speed <= self.max_speed)
        {
            return Err(ConfigError::SpeedRange {
                base: self.base_speed,
                max: self.max_speed,
            });
        }
        if self.max_speed >= self.chunk_size {
            return Err(ConfigError::SpeedExceedsChunk {
                max: self.max_speed,
                chunk: self.chunk_size,
            });
        }
        if !(self.decay_factor > 0.0 && self.decay_factor < 1.0) {
            return Err(ConfigError::DecayFactor(self.decay_factor));
        }
        for (name, value) in [
            ("speed_epsilon", self.speed_epsilon),
            ("debounce_secs", self.debounce_secs),
            ("collision_half_width", self.collision_half_width),
            ("lane_width", self.lane_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive(name, value));
            }
        }
        if self.lane_count.is_multiple_of(2) {
            return Err(ConfigError::LaneCount(self.lane_count));
        }
        // serde_json reads out-of-range floats as inf; an infinite recycle
        // depth would keep collected stars hidden forever
        for (name, value) in [
            ("building_recycle_depth", self.building_recycle_depth),
            ("building_min_offset", self.building_min_offset),
            ("star_recycle_depth", self.star_recycle_depth),
            ("star_spin", self.star_spin),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name, value));
            }
        }
        if !(self.building_offset_span.is_finite() && self.building_offset_span >= 0.0) {
            return Err(ConfigError::Negative(
                "building_offset_span",
                self.building_offset_span,
            ));
        }
        // A respawn inside the recycle zone would recycle again next tick
        if !self.building_window.fits_behind(self.building_recycle_depth) {
            return Err(ConfigError::FarWindow("building_window"));
        }
        if !self.star_window.fits_behind(self.star_recycle_depth) {
            return Err(ConfigError::FarWindow("star_window"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded world config from {}", path.display());
        Ok(config)
    }

    /// Total depth covered by the road pool
    pub fn road_length(&self) -> f32 {
        self.road_segments as f32 * self.chunk_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.road_segments, 6);
        assert_eq!(config.buildings, 30);
        assert_eq!(config.stars, 10);
        assert_eq!(config.road_length(), 120.0);
    }

    #[test]
    fn test_rejects_bad_speeds() {
        let config = WorldConfig {
            base_speed: 2.0,
            max_speed: 1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::SpeedRange { .. })));

        let config = WorldConfig {
            max_speed: 25.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedExceedsChunk { .. })
        ));

        let config = WorldConfig {
            decay_factor: 1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::DecayFactor(_))));
    }

    #[test]
    fn test_rejects_bad_pools_and_lanes() {
        let config = WorldConfig {
            stars: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPool("stars"))));

        let config = WorldConfig {
            lane_count: 4,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::LaneCount(4))));

        let config = WorldConfig {
            collision_half_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive("collision_half_width", _))
        ));
    }

    #[test]
    fn test_rejects_window_inside_recycle_zone() {
        let config = WorldConfig {
            star_window: FarWindow::new(8.0, 10.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FarWindow("star_window"))
        ));
    }

    #[test]
    fn test_rejects_non_finite_depths() {
        // 1e39 overflows f32 and parses as inf
        assert!(matches!(
            WorldConfig::from_json(r#"{ "star_recycle_depth": 1e39 }"#),
            Err(ConfigError::NonFinite("star_recycle_depth", _))
        ));
        assert!(matches!(
            WorldConfig::from_json(r#"{ "building_recycle_depth": 1e39 }"#),
            Err(ConfigError::NonFinite("building_recycle_depth", _))
        ));
        assert!(matches!(
            WorldConfig::from_json(r#"{ "building_min_offset": -1e39 }"#),
            Err(ConfigError::NonFinite("building_min_offset", _))
        ));
        assert!(matches!(
            WorldConfig::from_json(r#"{ "star_spin": 1e39 }"#),
            Err(ConfigError::NonFinite("star_spin", _))
        ));
        assert!(matches!(
            WorldConfig::from_json(r#"{ "building_offset_span": 1e39 }"#),
            Err(ConfigError::Negative("building_offset_span", _))
        ));

        let config = WorldConfig {
            building_offset_span: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative("building_offset_span", _))
        ));
    }

    #[test]
    fn test_rejects_bad_far_windows() {
        assert!(matches!(
            WorldConfig::from_json(r#"{ "star_window": { "near": -20, "span": 1e39 } }"#),
            Err(ConfigError::FarWindow("star_window"))
        ));
        assert!(matches!(
            WorldConfig::from_json(r#"{ "star_window": { "near": -1e39, "span": 10 } }"#),
            Err(ConfigError::FarWindow("star_window"))
        ));
        assert!(matches!(
            WorldConfig::from_json(r#"{ "building_window": { "near": -20, "span": 0 } }"#),
            Err(ConfigError::FarWindow("building_window"))
        ));

        let config = WorldConfig {
            building_window: FarWindow::new(-20.0, -5.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FarWindow("building_window"))
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let config = WorldConfig::from_json(r#"{ "max_speed": 2.0, "stars": 4 }"#).unwrap();
        assert_eq!(config.max_speed, 2.0);
        assert_eq!(config.stars, 4);
        assert_eq!(config.buildings, BUILDINGS);

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(WorldConfig::from_json(&json).unwrap(), config);

        assert!(matches!(
            WorldConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_far_window_sampling() {
        let window = FarWindow::new(-20.0, 50.0);
        assert_eq!(window.sample(0.0), -20.0);
        assert_eq!(window.far(), -70.0);
        assert!(window.contains(window.sample(0.5)));
        assert!(!window.contains(-10.0));
    }
}
