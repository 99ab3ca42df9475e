//! Fixed-size entity pools scrolled along the depth axis
//!
//! A field never grows or shrinks. Entities that scroll past the camera are
//! reset in place to the far end of the field, so index `i` always refers to
//! the same renderer object.

use glam::Vec3;
use rand_pcg::Pcg32;

/// An entity that lives in a [`RecyclingField`]
pub trait FieldEntity {
    /// Position on the scroll axis (grows toward and past the camera)
    fn depth(&self) -> f32;
    /// Move toward the camera by `delta`
    fn scroll(&mut self, delta: f32);
    fn position(&self) -> Vec3;
    fn visible(&self) -> bool {
        true
    }
}

/// How a field repositions an entity that crossed its recycle threshold
pub trait ResetPolicy<T> {
    /// Depth past which an entity is behind the camera
    fn threshold(&self) -> f32;
    /// Move `entity` back to the far boundary, restoring its defaults
    fn reset(&self, entity: &mut T, rng: &mut Pcg32);
}

/// Pool of entities that scroll and recycle each tick
#[derive(Debug, Clone)]
pub struct RecyclingField<T, P> {
    entities: Vec<T>,
    policy: P,
    rng: Pcg32,
}

impl<T: FieldEntity, P: ResetPolicy<T>> RecyclingField<T, P> {
    /// Field with entities already laid out by the caller
    pub fn new(entities: Vec<T>, policy: P, rng: Pcg32) -> Self {
        Self {
            entities,
            policy,
            rng,
        }
    }

    /// Field whose entities all start from a policy reset
    pub fn populate(count: usize, policy: P, mut rng: Pcg32) -> Self
    where
        T: Default,
    {
        let entities = (0..count)
            .map(|_| {
                let mut entity = T::default();
                policy.reset(&mut entity, &mut rng);
                entity
            })
            .collect();
        Self::new(entities, policy, rng)
    }

    /// Scroll every entity by `speed` and recycle the ones that passed the
    /// threshold. Each entity is checked once, after moving, so a step that
    /// jumps far past the threshold still recycles it exactly once.
    ///
    /// Returns how many entities were recycled.
    pub fn advance(&mut self, speed: f32) -> usize {
        debug_assert!(
            speed.is_finite() && speed >= 0.0,
            "field speed must be finite and non-negative, got {speed}"
        );
        let threshold = self.policy.threshold();
        let mut recycled = 0;
        for entity in &mut self.entities {
            entity.scroll(speed);
            if entity.depth() > threshold {
                self.policy.reset(entity, &mut self.rng);
                recycled += 1;
            }
        }
        if recycled > 0 {
            log::trace!("Recycled {} of {} entities", recycled, self.entities.len());
        }
        recycled
    }

    /// Recycle entity `index` if it is behind the camera. A second call
    /// straight after does nothing, since the reset moved it out of range.
    ///
    /// Panics if `index` is out of range.
    pub fn recycle(&mut self, index: usize) -> bool {
        let entity = &mut self.entities[index];
        if entity.depth() > self.policy.threshold() {
            self.policy.reset(entity, &mut self.rng);
            true
        } else {
            false
        }
    }

    /// Reset entity `index` unconditionally. Panics if `index` is out of range.
    pub fn reset(&mut self, index: usize) {
        self.policy.reset(&mut self.entities[index], &mut self.rng);
    }

    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> &T {
        &self.entities[index]
    }

    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.entities.iter().map(FieldEntity::position).collect()
    }

    /// Only the simulator mutates entities outside of advance/recycle
    pub(crate) fn entities_mut(&mut self) -> &mut [T] {
        &mut self.entities
    }
}
