//! Appearance strategies for the particle field.
//!
//! A style decides what an entity looks like, how it is spawned and what is
//! painted behind the entities. The field itself owns counting, links,
//! timing and regeneration, so both built-in looks share one renderer.

pub mod circles;
pub mod leaves;

use glam::Vec2;

use crate::api::config::FieldConfig;
use crate::api::types::Bounds;
use crate::core::rng::Rng;
use crate::surface::Surface;

pub use circles::{CircleStyle, Particle};
pub use leaves::{Leaf, LeafShape, LeafStyle};

/// A single animated entity.
pub trait FieldEntity {
    /// Current position in surface pixels.
    fn position(&self) -> Vec2;

    /// Advance one fixed step and wrap at the edges of `bounds`.
    fn update(&mut self, bounds: Bounds);

    fn draw(&self, surface: &mut dyn Surface);
}

/// The contract every field appearance fulfills.
pub trait FieldStyle {
    type Entity: FieldEntity;

    /// Counting, motion and link parameters for this look.
    fn config(&self) -> FieldConfig {
        FieldConfig::default()
    }

    /// Create one entity at a random spot inside `bounds`.
    fn spawn(&self, rng: &mut Rng, bounds: Bounds, config: &FieldConfig) -> Self::Entity;

    /// Paint behind the entities. Default: leave the cleared surface transparent.
    fn paint_background(&self, _surface: &mut dyn Surface, _bounds: Bounds) {}
}

/// Uniformly random point inside `bounds`.
pub(crate) fn random_point(rng: &mut Rng, bounds: Bounds) -> Vec2 {
    Vec2::new(rng.range(0.0, bounds.width), rng.range(0.0, bounds.height))
}

/// Random velocity with each component in `[-max_speed, max_speed)`.
pub(crate) fn random_velocity(rng: &mut Rng, max_speed: f32) -> Vec2 {
    Vec2::new(rng.symmetric(max_speed), rng.symmetric(max_speed))
}
