//! Rotating leaves on a transparent background.
//!
//! Three procedural shapes: a bezier leaf outline, a pixel-grid disc and a
//! branching line fractal. Local geometry for the grid and the fractal is
//! built once at spawn; drawing only rotates and translates it.

use std::f32::consts::{FRAC_PI_6, TAU};

use glam::Vec2;

use super::{random_point, random_velocity, FieldEntity, FieldStyle};
use crate::api::config::FieldConfig;
use crate::api::types::Bounds;
use crate::core::rng::Rng;
use crate::surface::{Outline, Rgba, Surface};

/// Recursion depth of the branch fractal.
pub const BRANCH_DEPTH: u32 = 3;
/// Angle between a branch and each child.
const BRANCH_SPREAD: f32 = FRAC_PI_6;
/// Child length relative to its parent.
const BRANCH_SHRINK: f32 = 0.7;
/// Grid cells per leaf radius for the pixel disc.
const PIXEL_CELLS_PER_RADIUS: i32 = 4;
/// Max rotation speed, radians per step.
const MAX_SPIN: f32 = 0.02;

/// Procedural leaf shape with its cached local geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafShape {
    /// Two quadratic curves meeting at the tips, with a midrib.
    Outline,
    /// Square cells whose centers fall inside the leaf radius.
    PixelDisc { cell: f32, centers: Vec<Vec2> },
    /// Binary branching segments.
    Branches { segments: Vec<(Vec2, Vec2)> },
}

impl LeafShape {
    /// Build variant `index` (0-2) for a leaf of `size`.
    pub fn build(index: u32, size: f32) -> Self {
        match index % 3 {
            0 => LeafShape::Outline,
            1 => pixel_disc(size),
            _ => LeafShape::Branches { segments: branch_segments(size) },
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            LeafShape::Outline => 0,
            LeafShape::PixelDisc { .. } => 1,
            LeafShape::Branches { .. } => 2,
        }
    }
}

fn pixel_disc(size: f32) -> LeafShape {
    let cell = size / PIXEL_CELLS_PER_RADIUS as f32;
    let n = PIXEL_CELLS_PER_RADIUS;
    let mut centers = Vec::new();
    for j in -n..n {
        for i in -n..n {
            let c = Vec2::new((i as f32 + 0.5) * cell, (j as f32 + 0.5) * cell);
            if c.length() <= size {
                centers.push(c);
            }
        }
    }
    LeafShape::PixelDisc { cell, centers }
}

/// Trunk pointing up from below the center, split twice per level.
fn branch_segments(size: f32) -> Vec<(Vec2, Vec2)> {
    let mut segments = Vec::with_capacity((1 << (BRANCH_DEPTH + 1)) - 1);
    let trunk = size * 0.5;
    branch(Vec2::new(0.0, trunk), -std::f32::consts::FRAC_PI_2, trunk, BRANCH_DEPTH, &mut segments);
    segments
}

fn branch(start: Vec2, angle: f32, len: f32, depth: u32, out: &mut Vec<(Vec2, Vec2)>) {
    let end = start + Vec2::from_angle(angle) * len;
    out.push((start, end));
    if depth == 0 {
        return;
    }
    branch(end, angle - BRANCH_SPREAD, len * BRANCH_SHRINK, depth - 1, out);
    branch(end, angle + BRANCH_SPREAD, len * BRANCH_SHRINK, depth - 1, out);
}

/// A rotating leaf drifting at constant velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: Rgba,
    /// Radians.
    pub rotation: f32,
    /// Radians per step.
    pub rotation_speed: f32,
    pub shape: LeafShape,
}

impl Leaf {
    fn to_world(&self, local: Vec2) -> Vec2 {
        self.position + Vec2::from_angle(self.rotation).rotate(local)
    }

    fn draw_outline(&self, surface: &mut dyn Surface) {
        let s = self.size;
        let local = Outline::new()
            .move_to(Vec2::new(0.0, -s))
            .quad_to(Vec2::new(s, 0.0), Vec2::new(0.0, s))
            .quad_to(Vec2::new(-s, 0.0), Vec2::new(0.0, -s))
            .close();
        surface.fill_outline(&local.map_points(|p| self.to_world(p)), self.color);

        let rib = self.color.with_alpha(self.color.a * 0.6);
        surface.stroke_line(
            self.to_world(Vec2::new(0.0, -s)),
            self.to_world(Vec2::new(0.0, s)),
            1.0,
            rib,
        );
    }

    fn draw_pixels(&self, surface: &mut dyn Surface, cell: f32, centers: &[Vec2]) {
        let h = cell * 0.5;
        let corners = [
            Vec2::new(-h, -h),
            Vec2::new(h, -h),
            Vec2::new(h, h),
            Vec2::new(-h, h),
        ];
        for c in centers {
            let quad = corners.map(|k| self.to_world(*c + k));
            surface.fill_polygon(&quad, self.color);
        }
    }

    fn draw_branches(&self, surface: &mut dyn Surface, segments: &[(Vec2, Vec2)]) {
        let world: Vec<(Vec2, Vec2)> = segments
            .iter()
            .map(|(a, b)| (self.to_world(*a), self.to_world(*b)))
            .collect();
        surface.stroke_segments(&world, 1.0, self.color);
    }
}

impl FieldEntity for Leaf {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn update(&mut self, bounds: Bounds) {
        self.rotation = (self.rotation + self.rotation_speed).rem_euclid(TAU);
        // Wrap a full leaf-size outside the edge so leaves never pop in or out
        self.position = bounds.wrap(self.position + self.velocity, self.size);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        match &self.shape {
            LeafShape::Outline => self.draw_outline(surface),
            LeafShape::PixelDisc { cell, centers } => self.draw_pixels(surface, *cell, centers),
            LeafShape::Branches { segments } => self.draw_branches(surface, segments),
        }
    }
}

/// Leaf look: no background, no links.
#[derive(Debug, Clone, Default)]
pub struct LeafStyle;

impl LeafStyle {
    pub fn new() -> Self {
        Self
    }
}

impl FieldStyle for LeafStyle {
    type Entity = Leaf;

    fn config(&self) -> FieldConfig {
        FieldConfig::leaves()
    }

    fn spawn(&self, rng: &mut Rng, bounds: Bounds, config: &FieldConfig) -> Leaf {
        let position = random_point(rng, bounds);
        let size = rng.range(config.size_range.0, config.size_range.1);
        let velocity = random_velocity(rng, config.max_speed);
        let color = Rgba::green_biased(rng, config.alpha_range);
        let rotation = rng.range(0.0, TAU);
        let rotation_speed = rng.symmetric(MAX_SPIN);
        let shape = LeafShape::build(rng.next_int(3), size);
        Leaf { position, velocity, size, color, rotation, rotation_speed, shape }
    }
}
