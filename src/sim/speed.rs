//! Scroll-driven travel speed
//!
//! A scroll pulse kicks speed to the maximum. While pulses keep arriving
//! inside the debounce window the speed holds; once the window passes with
//! no pulse, speed coasts back to the base value on an exponential curve.

use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;

/// Phase of the speed curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedPhase {
    /// Cruising at base speed
    Base,
    /// Held at max speed while pulses arrive
    Boosted,
    /// Coasting back toward base speed
    Decaying,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedController {
    base_speed: f32,
    max_speed: f32,
    decay_factor: f32,
    epsilon: f32,
    debounce_secs: f32,
    speed: f32,
    phase: SpeedPhase,
    /// Seconds since the last pulse (only meaningful while boosted)
    since_pulse: f32,
}

impl SpeedController {
    pub fn new(
        base_speed: f32,
        max_speed: f32,
        decay_factor: f32,
        epsilon: f32,
        debounce_secs: f32,
    ) -> Self {
        Self {
            base_speed,
            max_speed,
            decay_factor,
            epsilon,
            debounce_secs,
            speed: base_speed,
            phase: SpeedPhase::Base,
            since_pulse: 0.0,
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(
            config.base_speed,
            config.max_speed,
            config.decay_factor,
            config.speed_epsilon,
            config.debounce_secs,
        )
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn phase(&self) -> SpeedPhase {
        self.phase
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Jump to max speed and restart the debounce window
    pub fn pulse(&mut self) {
        self.speed = self.max_speed;
        self.phase = SpeedPhase::Boosted;
        self.since_pulse = 0.0;
    }

    /// Advance the curve by one tick of `dt` seconds, after applying any
    /// pulses that arrived since the last tick. Returns the speed to travel.
    pub fn update(&mut self, dt: f32, pulses: u32) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if pulses > 0 {
            self.pulse();
            return self.speed;
        }

        if self.phase == SpeedPhase::Boosted {
            self.since_pulse += dt;
            if self.since_pulse >= self.debounce_secs {
                self.phase = SpeedPhase::Decaying;
            }
        }

        if self.phase == SpeedPhase::Decaying {
            self.decay_step();
        }

        self.speed
    }

    fn decay_step(&mut self) {
        let excess = (self.speed - self.base_speed) * self.decay_factor;
        if excess.abs() <= self.epsilon {
            self.speed = self.base_speed;
            self.phase = SpeedPhase::Base;
        } else {
            self.speed = self.base_speed + excess;
        }
    }

    /// Override the speed from outside the pulse path. Out-of-range values
    /// are clamped to `[0, max_speed]`; NaN falls back to base speed. The
    /// curve then settles back to base on its own.
    pub fn set_speed(&mut self, speed: f32) {
        let clamped = if speed.is_nan() {
            self.base_speed
        } else {
            speed.clamp(0.0, self.max_speed)
        };
        if clamped != speed {
            log::warn!("Speed {} out of range, clamped to {}", speed, clamped);
        }

        self.speed = clamped;
        self.since_pulse = 0.0;
        self.phase = if (clamped - self.base_speed).abs() <= self.epsilon {
            self.speed = self.base_speed;
            SpeedPhase::Base
        } else {
            SpeedPhase::Decaying
        };
    }

    /// Back to cruising at base speed
    pub fn reset(&mut self) {
        self.speed = self.base_speed;
        self.phase = SpeedPhase::Base;
        self.since_pulse = 0.0;
    }
}
