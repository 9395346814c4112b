//! Headless engine for the EcoViva animated background.
//!
//! A [`ParticleField`] owns a set of drifting entities, advances them on a
//! fixed timestep and draws them through a [`Surface`]. The look (circles
//! linked by lines, or rotating leaves) is a [`FieldStyle`] strategy.

pub mod api;
pub mod core;
pub mod styles;
pub mod surface;

// Re-export key types at crate root for convenience
pub use api::config::{FieldConfig, LinkConfig, MAX_ENTITIES};
pub use api::error::FieldError;
pub use api::types::Bounds;
pub use crate::core::field::ParticleField;
pub use crate::core::rng::Rng;
pub use crate::core::time::FixedTimestep;
pub use styles::{CircleStyle, FieldEntity, FieldStyle, Leaf, LeafShape, LeafStyle, Particle};
pub use surface::{
    DrawCommand, DrawList, GradientStop, LinearGradient, Outline, PathCommand, Rgba, Surface,
};
