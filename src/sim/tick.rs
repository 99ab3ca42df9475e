//! Per-frame world update
//!
//! `WorldSimulator::tick` is the only entry point that mutates the world.
//! Given the same seed and the same input sequence it produces the same
//! world, tick for tick.

use super::city::building_field;
use super::collision::CollisionSystem;
use super::field::FieldEntity;
use super::road::road_field;
use super::score::ScoreTracker;
use super::speed::{SpeedController, SpeedPhase};
use super::stars::collectible_field;
use super::state::{Player, WorldEvent, WorldSnapshot, WorldState};
use crate::config::{ConfigError, WorldConfig};

/// Undrained events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Scroll pulses received (any non-zero count boosts once)
    pub pulses: u32,
}

impl TickInput {
    pub fn pulses(pulses: u32) -> Self {
        Self { pulses }
    }
}

/// Owns the world and advances it one frame at a time
#[derive(Debug, Clone)]
pub struct WorldSimulator {
    config: WorldConfig,
    seed: u64,
    state: WorldState,
    speed: SpeedController,
    collision: CollisionSystem,
    score: ScoreTracker,
    time_ticks: u64,
    elapsed_secs: f64,
    events: Vec<WorldEvent>,
}

impl WorldSimulator {
    /// Validate `config` and build a world seeded with `seed`
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// World with the default constants
    pub fn with_seed(seed: u64) -> Self {
        Self::build(WorldConfig::default(), seed)
    }

    fn build(config: WorldConfig, seed: u64) -> Self {
        log::info!(
            "Building world: seed={}, road={}, buildings={}, stars={}",
            seed,
            config.road_segments,
            config.buildings,
            config.stars
        );
        let speed = SpeedController::from_config(&config);
        Self {
            state: Self::fresh_state(&config, seed),
            collision: CollisionSystem::new(config.collision_half_width),
            speed,
            score: ScoreTracker::new(),
            time_ticks: 0,
            elapsed_secs: 0.0,
            events: Vec::new(),
            seed,
            config,
        }
    }

    fn fresh_state(config: &WorldConfig, seed: u64) -> WorldState {
        WorldState {
            road: road_field(config, seed),
            buildings: building_field(config, seed),
            stars: collectible_field(config, seed),
            player: Player::default(),
            speed: config.base_speed,
        }
    }

    /// Advance the world by one frame of `dt` seconds
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        // Speed first: the fields travel at this tick's speed
        let before = self.speed.phase();
        let speed = self.speed.update(dt, input.pulses);
        let after = self.speed.phase();
        if before != after {
            log::debug!("Speed phase {:?} -> {:?}", before, after);
            self.push_event(WorldEvent::SpeedPhaseChanged {
                from: before,
                to: after,
            });
        }
        self.state.speed = speed;

        self.state.road.advance(speed);
        self.state.buildings.advance(speed);
        self.state.stars.advance(speed);
        self.state.stars.spin(self.config.star_spin);

        let collected = self
            .collision
            .check(&self.state.player, self.state.stars.entities_mut());
        for index in collected {
            let position = self.state.stars.get(index).position();
            let score = self.score.award(self.config.points_per_star);
            log::debug!("Collected star {} at {:?}, score {}", index, position, score);
            self.push_event(WorldEvent::StarCollected { index, position });
            self.push_event(WorldEvent::ScoreChanged { score });
        }

        self.time_ticks += 1;
        if dt.is_finite() && dt > 0.0 {
            self.elapsed_secs += f64::from(dt);
        }
    }

    /// Start a new session: fresh fields from `seed`, score and speed reset
    pub fn restart(&mut self, seed: u64) {
        log::info!("Restarting session with seed {}", seed);
        self.seed = seed;
        self.state = Self::fresh_state(&self.config, seed);
        self.speed.reset();
        self.score.reset();
        self.time_ticks = 0;
        self.elapsed_secs = 0.0;
        self.push_event(WorldEvent::Restarted { seed });
        self.push_event(WorldEvent::ScoreChanged { score: 0 });
    }

    /// Queue an event, dropping the oldest once nobody has drained for a while
    fn push_event(&mut self, event: WorldEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            if self.events.len() == MAX_PENDING_EVENTS {
                log::warn!("Event queue full ({}), dropping oldest", MAX_PENDING_EVENTS);
            }
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Read-only view for renderers
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Scenario setup inside the crate: mutable access between ticks
    pub(crate) fn state_mut(&mut self) -> &mut WorldState {
        &mut self.state
    }

    pub fn speed_controller(&self) -> &SpeedController {
        &self.speed
    }

    /// Override the travel speed (clamped to `[0, max_speed]`)
    pub fn set_speed(&mut self, speed: f32) {
        self.speed.set_speed(speed);
        self.state.speed = self.speed.speed();
    }

    pub fn speed(&self) -> f32 {
        self.speed.speed()
    }

    pub fn phase(&self) -> SpeedPhase {
        self.speed.phase()
    }

    pub fn score(&self) -> u64 {
        self.score.current()
    }

    pub fn stars_collected(&self) -> u64 {
        self.score.awards()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Events not yet drained (at most `MAX_PENDING_EVENTS`)
    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    /// Take all pending events (score display, pop effects). Callers should
    /// drain once per frame; past `MAX_PENDING_EVENTS` the oldest are lost.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.time_ticks,
            score: self.score.current(),
            speed: self.state.speed,
            phase: self.speed.phase(),
            player: self.state.player.pos,
            road: self.state.road.positions(),
            buildings: self.state.buildings.positions(),
            stars: self.state.stars.entities().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::sim::state::Star;

    #[test]
    fn test_initial_world() {
        let sim = WorldSimulator::with_seed(12345);
        assert_eq!(sim.speed(), 0.3);
        assert_eq!(sim.phase(), SpeedPhase::Base);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.state().road().len(), 6);
        assert_eq!(sim.state().buildings().len(), 30);
        assert_eq!(sim.state().stars().len(), 10);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = WorldConfig {
            decay_factor: 1.5,
            ..Default::default()
        };
        assert!(WorldSimulator::new(config, 1).is_err());
    }

    #[test]
    fn test_pulse_drives_fields() {
        let mut sim = WorldSimulator::with_seed(1);
        let before = sim.state().road().get(1).depth();
        sim.tick(&TickInput::pulses(1), FRAME_DT);
        assert_eq!(sim.speed(), 1.2);
        assert_eq!(sim.state().road().get(1).depth(), before + 1.2);
        assert!(sim.events().contains(&WorldEvent::SpeedPhaseChanged {
            from: SpeedPhase::Base,
            to: SpeedPhase::Boosted,
        }));
    }

    #[test]
    fn test_star_under_player_scores_once() {
        let mut sim = WorldSimulator::with_seed(2);
        let lane_width = sim.config().lane_width;
        // Lands on the player after this tick's base-speed step
        sim.state_mut().stars.place(0, Star::new(0, lane_width, -0.3));

        sim.tick(&TickInput::default(), FRAME_DT);
        assert_eq!(sim.score(), 100);
        assert!(!sim.state().stars().get(0).visible);

        let events = sim.drain_events();
        assert!(matches!(
            events[0],
            WorldEvent::StarCollected { index: 0, .. }
        ));
        assert_eq!(events[1], WorldEvent::ScoreChanged { score: 100 });

        // Still overlapping next tick, but already hidden
        sim.tick(&TickInput::default(), FRAME_DT);
        assert_eq!(sim.score(), 100);
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn test_star_at_origin_is_collected() {
        let mut sim = WorldSimulator::with_seed(7);
        let lane_width = sim.config().lane_width;
        sim.state_mut().stars.place(3, Star::new(0, lane_width, 0.0));

        sim.tick(&TickInput::default(), FRAME_DT);
        assert_eq!(sim.score(), 100);
        assert_eq!(sim.stars_collected(), 1);
        assert!(!sim.state().stars().get(3).visible);

        let collected: Vec<_> = sim
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, WorldEvent::StarCollected { .. }))
            .collect();
        assert_eq!(collected.len(), 1);
        assert!(matches!(
            collected[0],
            WorldEvent::StarCollected { index: 3, .. }
        ));
    }

    #[test]
    fn test_collected_star_stays_hidden_until_recycle() {
        let mut sim = WorldSimulator::with_seed(11);
        let lane_width = sim.config().lane_width;
        sim.state_mut().stars.place(0, Star::new(0, lane_width, -0.3));

        let mut hidden_ticks = 0;
        sim.tick(&TickInput::default(), FRAME_DT);
        assert!(!sim.state().stars().get(0).visible);
        while !sim.state().stars().get(0).visible {
            // Hidden stars keep scrolling toward the recycle depth
            assert!(sim.state().stars().get(0).depth() <= sim.config().star_recycle_depth);
            sim.tick(&TickInput::default(), FRAME_DT);
            hidden_ticks += 1;
            assert!(hidden_ticks < 100, "collected star never recycled");
        }
        assert!(
            sim.config()
                .star_window
                .contains(sim.state().stars().get(0).depth())
        );
        assert_eq!(sim.score(), 100);
    }

    #[test]
    fn test_event_queue_is_bounded() {
        let mut sim = WorldSimulator::with_seed(8);
        for seed in 0..300 {
            sim.restart(seed);
        }
        assert_eq!(sim.events().len(), MAX_PENDING_EVENTS);
        assert_eq!(sim.events()[0], WorldEvent::Restarted { seed: 172 });
        assert_eq!(
            sim.events().last(),
            Some(&WorldEvent::ScoreChanged { score: 0 })
        );

        assert_eq!(sim.drain_events().len(), MAX_PENDING_EVENTS);
        assert!(sim.events().is_empty());
    }

    #[test]
    fn test_restart_resets_session() {
        let mut sim = WorldSimulator::with_seed(3);
        let lane_width = sim.config().lane_width;
        sim.state_mut().stars.place(0, Star::new(0, lane_width, -0.3));
        sim.tick(&TickInput::pulses(1), FRAME_DT);
        assert!(sim.score() > 0);

        sim.restart(3);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.speed(), 0.3);
        assert_eq!(sim.time_ticks(), 0);
        assert_eq!(sim.snapshot(), WorldSimulator::with_seed(3).snapshot());
    }

    #[test]
    fn test_determinism() {
        let mut a = WorldSimulator::with_seed(99999);
        let mut b = WorldSimulator::with_seed(99999);

        for i in 0..600u32 {
            let input = TickInput::pulses(u32::from(i % 45 == 0));
            a.tick(&input, FRAME_DT);
            b.tick(&input, FRAME_DT);
        }

        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.drain_events(), b.drain_events());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut sim = WorldSimulator::with_seed(4);
        sim.tick(&TickInput::default(), FRAME_DT);
        let json = serde_json::to_string(&sim.snapshot()).unwrap();
        let back: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.road.len(), 6);
        assert_eq!(back.tick, 1);
    }
}
