//! Drawing targets for the particle field.
//!
//! Styles draw through the [`Surface`] trait in world (pixel) coordinates.
//! Transforms such as leaf rotation are applied before the call, so a
//! surface never needs a transform stack.
//!
//! Implementations:
//! - [`DrawList`]: records commands; used by tests and for inspection.
//! - `CanvasSurface` in `eco-field-web`: Canvas 2D.

mod color;
mod draw_list;

use glam::Vec2;

use crate::api::types::Bounds;

pub use color::{GradientStop, LinearGradient, Rgba};
pub use draw_list::{DrawCommand, DrawList};

/// A single step of a filled outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    CubicTo { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
    Close,
}

/// Closed outline built from path commands (e.g. a bezier leaf).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub commands: Vec<PathCommand>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Vec2) -> Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Vec2) -> Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    pub fn quad_to(mut self, ctrl: Vec2, to: Vec2) -> Self {
        self.commands.push(PathCommand::QuadTo { ctrl, to });
        self
    }

    pub fn cubic_to(mut self, ctrl1: Vec2, ctrl2: Vec2, to: Vec2) -> Self {
        self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Apply `f` to every point, including control points.
    /// Affine maps keep bezier segments exact.
    pub fn map_points(&self, f: impl Fn(Vec2) -> Vec2) -> Self {
        let commands = self
            .commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(f(p)),
                PathCommand::LineTo(p) => PathCommand::LineTo(f(p)),
                PathCommand::QuadTo { ctrl, to } => PathCommand::QuadTo { ctrl: f(ctrl), to: f(to) },
                PathCommand::CubicTo { ctrl1, ctrl2, to } => PathCommand::CubicTo {
                    ctrl1: f(ctrl1),
                    ctrl2: f(ctrl2),
                    to: f(to),
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Self { commands }
    }
}

/// Drawing target contract.
pub trait Surface {
    /// Erase the whole surface to transparent.
    fn clear(&mut self, bounds: Bounds);

    /// Fill the whole surface with a vertical gradient.
    fn fill_gradient(&mut self, bounds: Bounds, gradient: &LinearGradient);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Fill a closed polygon. Fewer than 3 points draws nothing.
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);

    fn fill_outline(&mut self, outline: &Outline, color: Rgba);

    /// Stroke a sequence of disjoint segments in one call.
    fn stroke_segments(&mut self, segments: &[(Vec2, Vec2)], width: f32, color: Rgba) {
        for &(a, b) in segments {
            self.stroke_line(a, b, width, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_builder_records_commands() {
        let o = Outline::new()
            .move_to(Vec2::ZERO)
            .quad_to(Vec2::new(1.0, 1.0), Vec2::new(2.0, 0.0))
            .close();
        assert_eq!(o.commands.len(), 3);
        assert_eq!(o.commands[2], PathCommand::Close);
    }

    #[test]
    fn map_points_moves_control_points() {
        let o = Outline::new()
            .move_to(Vec2::ZERO)
            .cubic_to(Vec2::X, Vec2::Y, Vec2::ONE);
        let shifted = o.map_points(|p| p + Vec2::new(10.0, 0.0));
        assert_eq!(
            shifted.commands[1],
            PathCommand::CubicTo {
                ctrl1: Vec2::new(11.0, 0.0),
                ctrl2: Vec2::new(10.0, 1.0),
                to: Vec2::new(11.0, 1.0),
            }
        );
    }
}
