//! Canvas 2D implementation of [`Surface`].

use std::f64::consts::TAU;

use eco_field::{Bounds, LinearGradient, Outline, PathCommand, Rgba, Surface};
use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

/// Draws straight into a `CanvasRenderingContext2d`.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    fn trace_outline(&self, outline: &Outline) {
        for cmd in &outline.commands {
            match *cmd {
                PathCommand::MoveTo(p) => self.ctx.move_to(p.x as f64, p.y as f64),
                PathCommand::LineTo(p) => self.ctx.line_to(p.x as f64, p.y as f64),
                PathCommand::QuadTo { ctrl, to } => self.ctx.quadratic_curve_to(
                    ctrl.x as f64,
                    ctrl.y as f64,
                    to.x as f64,
                    to.y as f64,
                ),
                PathCommand::CubicTo { ctrl1, ctrl2, to } => self.ctx.bezier_curve_to(
                    ctrl1.x as f64,
                    ctrl1.y as f64,
                    ctrl2.x as f64,
                    ctrl2.y as f64,
                    to.x as f64,
                    to.y as f64,
                ),
                PathCommand::Close => self.ctx.close_path(),
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, bounds: Bounds) {
        self.ctx.clear_rect(0.0, 0.0, bounds.width as f64, bounds.height as f64);
    }

    fn fill_gradient(&mut self, bounds: Bounds, gradient: &LinearGradient) {
        let h = bounds.height as f64;
        let g = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        for stop in &gradient.stops {
            // Only fails on an offset outside [0, 1] or an unparsable color
            if g.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css()).is_err() {
                return;
            }
        }
        self.ctx.set_fill_style_canvas_gradient(&g);
        self.ctx.fill_rect(0.0, 0.0, bounds.width as f64, h);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        self.ctx.begin_path();
        self.ctx.move_to(points[0].x as f64, points[0].y as f64);
        for p in &points[1..] {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_outline(&mut self, outline: &Outline, color: Rgba) {
        if outline.commands.is_empty() {
            return;
        }
        self.ctx.begin_path();
        self.trace_outline(outline);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_segments(&mut self, segments: &[(Vec2, Vec2)], width: f32, color: Rgba) {
        if segments.is_empty() {
            return;
        }
        self.ctx.begin_path();
        for (a, b) in segments {
            self.ctx.move_to(a.x as f64, a.y as f64);
            self.ctx.line_to(b.x as f64, b.y as f64);
        }
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.stroke();
    }
}
