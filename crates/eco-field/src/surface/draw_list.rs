use glam::Vec2;

use super::{LinearGradient, Outline, Rgba, Surface};
use crate::api::types::Bounds;

/// A recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Bounds),
    Gradient(Bounds, LinearGradient),
    Line { from: Vec2, to: Vec2, width: f32, color: Rgba },
    Circle { center: Vec2, radius: f32, color: Rgba },
    Polygon { points: Vec<Vec2>, color: Rgba },
    Outline { outline: Outline, color: Rgba },
}

/// Surface that records every call instead of rasterizing.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over recorded line segments.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Rgba)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { from, to, color, .. } => Some((*from, *to, *color)),
            _ => None,
        })
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, bounds: Bounds) {
        self.commands.push(DrawCommand::Clear(bounds));
    }

    fn fill_gradient(&mut self, bounds: Bounds, gradient: &LinearGradient) {
        self.commands.push(DrawCommand::Gradient(bounds, gradient.clone()));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::Polygon { points: points.to_vec(), color });
    }

    fn fill_outline(&mut self, outline: &Outline, color: Rgba) {
        self.commands.push(DrawCommand::Outline { outline: outline.clone(), color });
    }
}
