//! Circle particles over a dark green gradient.

use glam::Vec2;

use super::{random_point, random_velocity, FieldEntity, FieldStyle};
use crate::api::config::FieldConfig;
use crate::api::types::Bounds;
use crate::core::rng::Rng;
use crate::surface::{LinearGradient, Rgba, Surface};

/// A filled disc drifting at constant velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Disc radius in pixels.
    pub size: f32,
    pub color: Rgba,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, size: f32, color: Rgba) -> Self {
        Self { position, velocity, size, color }
    }
}

impl FieldEntity for Particle {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn update(&mut self, bounds: Bounds) {
        self.position = bounds.wrap(self.position + self.velocity, 0.0);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.position, self.size, self.color);
    }
}

/// Default look: green-tinted discs, linked when close.
#[derive(Debug, Clone)]
pub struct CircleStyle {
    pub background: LinearGradient,
}

impl CircleStyle {
    pub fn new() -> Self {
        Self {
            background: LinearGradient::new(&[
                (0.0, Rgba::rgb8(0x0b, 0x2e, 0x1c)),
                (0.5, Rgba::rgb8(0x14, 0x4d, 0x2f)),
                (1.0, Rgba::rgb8(0x09, 0x24, 0x16)),
            ]),
        }
    }
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldStyle for CircleStyle {
    type Entity = Particle;

    fn config(&self) -> FieldConfig {
        FieldConfig::circles()
    }

    fn spawn(&self, rng: &mut Rng, bounds: Bounds, config: &FieldConfig) -> Particle {
        let position = random_point(rng, bounds);
        let size = rng.range(config.size_range.0, config.size_range.1);
        let velocity = random_velocity(rng, config.max_speed);
        let color = Rgba::green_biased(rng, config.alpha_range);
        Particle::new(position, velocity, size, color)
    }

    fn paint_background(&self, surface: &mut dyn Surface, bounds: Bounds) {
        surface.fill_gradient(bounds, &self.background);
    }
}
