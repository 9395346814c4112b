use log::debug;

use crate::api::config::FieldConfig;
use crate::api::error::Result;
use crate::api::types::Bounds;
use crate::core::rng::Rng;
use crate::core::time::FixedTimestep;
use crate::styles::{FieldEntity, FieldStyle};
use crate::surface::Surface;

/// A fixed-size set of drifting entities drawn with style `S`.
///
/// Lifetime of the entity set is one viewport size: every resize throws the
/// set away and spawns a new one.
pub struct ParticleField<S: FieldStyle> {
    style: S,
    config: FieldConfig,
    bounds: Bounds,
    entities: Vec<S::Entity>,
    /// Lines attached to each entity during the current frame.
    link_counts: Vec<u8>,
    rng: Rng,
    timestep: FixedTimestep,
    /// Bumped every time the entity set is regenerated.
    generation: u32,
}

impl<S: FieldStyle> ParticleField<S> {
    /// Create an empty field using the style's own config. Call `resize` to populate.
    pub fn new(style: S, seed: u64) -> Self {
        let config = style.config();
        Self::with_config(style, config, seed)
    }

    pub fn with_config(style: S, config: FieldConfig, seed: u64) -> Self {
        let timestep = FixedTimestep::new(config.fixed_dt);
        Self {
            style,
            config,
            bounds: Bounds::default(),
            entities: Vec::new(),
            link_counts: Vec::new(),
            rng: Rng::new(seed),
            timestep,
            generation: 0,
        }
    }

    pub fn style(&self) -> &S {
        &self.style
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn entities(&self) -> &[S::Entity] {
        &self.entities
    }

    /// Mutable access for hosts that want to seed specific positions.
    pub fn entities_mut(&mut self) -> &mut [S::Entity] {
        &mut self.entities
    }

    /// Per-entity line counts from the most recent render.
    pub fn link_counts(&self) -> &[u8] {
        &self.link_counts
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Adopt new viewport dimensions and regenerate the whole entity set.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::sanitized(width, height);
        self.regenerate();
    }

    /// Replace the config after validating it, then regenerate.
    pub fn set_config(&mut self, config: FieldConfig) -> Result<()> {
        config.validate()?;
        self.timestep = FixedTimestep::new(config.fixed_dt);
        self.config = config;
        self.regenerate();
        Ok(())
    }

    /// Merge JSON overrides into the current config.
    pub fn configure_json(&mut self, json: &str) -> Result<()> {
        let merged = self.config.merged_with_json(json)?;
        self.set_config(merged)
    }

    fn regenerate(&mut self) {
        let count = self.config.count_for_width(self.bounds.width);
        self.entities.clear();
        if !self.bounds.is_empty() {
            for _ in 0..count {
                let entity = self.style.spawn(&mut self.rng, self.bounds, &self.config);
                self.entities.push(entity);
            }
        }
        self.link_counts.clear();
        self.link_counts.resize(self.entities.len(), 0);
        self.timestep.reset();
        self.generation = self.generation.wrapping_add(1);
        debug!(
            "field regenerated: {} entities for {}x{} (generation {})",
            self.entities.len(),
            self.bounds.width,
            self.bounds.height,
            self.generation
        );
    }

    /// Advance every entity by one fixed step.
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for entity in &mut self.entities {
            entity.update(bounds);
        }
    }

    /// Feed frame time into the fixed timestep and run the resulting steps.
    /// Returns the number of steps run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// Draw the current state: clear, background, links, entities.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        surface.clear(self.bounds);
        self.style.paint_background(surface, self.bounds);
        self.draw_links(surface);
        for entity in &self.entities {
            entity.draw(surface);
        }
    }

    /// One animation frame. Without a surface the simulation still advances
    /// and nothing is drawn.
    pub fn frame(&mut self, dt: f32, surface: Option<&mut dyn Surface>) -> u32 {
        let steps = self.advance(dt);
        if let Some(surface) = surface {
            self.render(surface);
        }
        steps
    }

    /// Pairwise pass: link every pair closer than the threshold while both
    /// have room under the per-frame cap. O(n^2), n is capped by the config.
    fn draw_links(&mut self, surface: &mut dyn Surface) {
        self.link_counts.iter_mut().for_each(|c| *c = 0);
        let links = match &self.config.links {
            Some(links) => links,
            None => return,
        };
        let max = links.max_per_particle;
        let max_dist_sq = links.max_distance * links.max_distance;

        let n = self.entities.len();
        for i in 0..n {
            if self.link_counts[i] >= max {
                continue;
            }
            let a = self.entities[i].position();
            for j in (i + 1)..n {
                if self.link_counts[i] >= max {
                    break;
                }
                if self.link_counts[j] >= max {
                    continue;
                }
                let b = self.entities[j].position();
                let dist_sq = a.distance_squared(b);
                if dist_sq >= max_dist_sq {
                    continue;
                }
                let fade = 1.0 - dist_sq.sqrt() / links.max_distance;
                let color = links.color.with_alpha(links.color.a * fade);
                surface.stroke_line(a, b, links.width, color);
                self.link_counts[i] += 1;
                self.link_counts[j] += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::{CircleStyle, LeafStyle, Particle};
    use crate::surface::{DrawCommand, DrawList, Rgba};
    use glam::Vec2;

    fn circles(width: f32, height: f32) -> ParticleField<CircleStyle> {
        let mut field = ParticleField::new(CircleStyle::new(), 42);
        field.resize(width, height);
        field
    }

    #[test]
    fn circle_count_for_1000px() {
        assert_eq!(circles(1000.0, 800.0).len(), 100);
    }

    #[test]
    fn circle_count_is_capped() {
        assert_eq!(circles(4000.0, 800.0).len(), 150);
    }

    #[test]
    fn leaf_count_for_2000px() {
        let mut field = ParticleField::new(LeafStyle::new(), 42);
        field.resize(2000.0, 900.0);
        assert_eq!(field.len(), 50);
    }

    #[test]
    fn resize_regenerates_with_new_count() {
        let mut field = circles(1000.0, 800.0);
        let before: Vec<Vec2> = field.entities().iter().map(|p| p.position).collect();
        let generation = field.generation();

        field.resize(500.0, 400.0);
        assert_eq!(field.len(), 50);
        assert_eq!(field.generation(), generation + 1);
        assert_eq!(field.bounds(), Bounds::new(500.0, 400.0));
        // Fresh set: nothing carried over from the old one
        let after: Vec<Vec2> = field.entities().iter().map(|p| p.position).collect();
        assert_ne!(before[..50], after[..]);
        assert!(after.iter().all(|p| field.bounds().contains(*p, 0.0)));
    }

    #[test]
    fn zero_or_garbage_viewport_is_empty() {
        assert!(circles(0.0, 0.0).is_empty());
        assert!(circles(f32::NAN, 600.0).is_empty());
        assert!(circles(1000.0, 0.0).is_empty());
    }

    #[test]
    fn circles_stay_in_bounds_over_many_steps() {
        let mut field = circles(300.0, 200.0);
        for _ in 0..5_000 {
            field.step();
            for p in field.entities() {
                assert!(field.bounds().contains(p.position, 0.0), "{:?}", p.position);
            }
        }
    }

    #[test]
    fn leaves_stay_in_margin_over_many_steps() {
        let mut field = ParticleField::new(LeafStyle::new(), 9);
        field.resize(400.0, 300.0);
        for _ in 0..5_000 {
            field.step();
            for leaf in field.entities() {
                assert!(field.bounds().contains(leaf.position, leaf.size), "{:?}", leaf.position);
            }
        }
    }

    #[test]
    fn single_step_wrap_scenario() {
        let mut field = circles(800.0, 600.0);
        let w = field.bounds().width;
        field.entities_mut()[0] = Particle::new(
            Vec2::new(w - 0.1, 100.0),
            Vec2::new(1.0, 0.0),
            2.0,
            Rgba::WHITE,
        );
        field.step();
        assert_eq!(field.entities()[0].position.x, 0.0);
    }

    #[test]
    fn link_counts_never_exceed_cap() {
        let mut field = circles(1500.0, 150.0);
        let mut list = DrawList::new();
        for _ in 0..60 {
            field.step();
            list.clear_commands();
            field.render(&mut list);
            assert!(field.link_counts().iter().all(|c| *c <= 3));
        }
    }

    #[test]
    fn clustered_particles_hit_the_cap() {
        let mut field = circles(100.0, 100.0);
        // Ten particles on top of each other: every one wants nine links
        for (i, p) in field.entities_mut().iter_mut().enumerate() {
            p.position = Vec2::new(50.0 + i as f32 * 0.1, 50.0);
        }
        let mut list = DrawList::new();
        field.render(&mut list);
        assert!(field.link_counts().iter().all(|c| *c <= 3));
        assert!(field.link_counts().iter().any(|c| *c == 3));
        assert_eq!(
            list.lines().count(),
            field.link_counts().iter().map(|c| *c as usize).sum::<usize>() / 2
        );
    }

    #[test]
    fn no_line_longer_than_threshold() {
        let mut field = circles(1200.0, 900.0);
        let mut list = DrawList::new();
        for _ in 0..30 {
            field.step();
            list.clear_commands();
            field.render(&mut list);
            for (a, b, color) in list.lines() {
                assert!(a.distance(b) < 100.0);
                assert!(color.a > 0.0 && color.a <= 1.0);
            }
        }
    }

    #[test]
    fn line_alpha_fades_with_distance() {
        let mut field = circles(20.0, 200.0);
        assert_eq!(field.len(), 2);
        field.entities_mut()[0].position = Vec2::new(10.0, 0.0);
        field.entities_mut()[1].position = Vec2::new(10.0, 75.0);
        let mut list = DrawList::new();
        field.render(&mut list);
        let (_, _, color) = list.lines().next().unwrap();
        let base = field.config().links.as_ref().unwrap().color.a;
        assert!((color.a - base * 0.25).abs() < 1e-5);
    }

    #[test]
    fn far_pair_is_not_linked() {
        let mut field = circles(20.0, 300.0);
        field.entities_mut()[0].position = Vec2::new(10.0, 0.0);
        field.entities_mut()[1].position = Vec2::new(10.0, 100.0);
        let mut list = DrawList::new();
        field.render(&mut list);
        assert_eq!(list.lines().count(), 0);
    }

    #[test]
    fn render_order_is_clear_background_then_entities() {
        let mut field = circles(300.0, 300.0);
        let mut list = DrawList::new();
        field.render(&mut list);
        assert!(matches!(list.commands()[0], DrawCommand::Clear(_)));
        assert!(matches!(list.commands()[1], DrawCommand::Gradient(..)));
        assert_eq!(list.circle_count(), field.len());
        assert!(matches!(list.commands().last(), Some(DrawCommand::Circle { .. })));
    }

    #[test]
    fn leaves_have_no_background_and_no_links() {
        let mut field = ParticleField::new(LeafStyle::new(), 3);
        field.resize(600.0, 600.0);
        let mut list = DrawList::new();
        field.render(&mut list);
        assert!(matches!(list.commands()[0], DrawCommand::Clear(_)));
        assert!(!list.commands().iter().any(|c| matches!(c, DrawCommand::Gradient(..))));
        assert!(field.link_counts().iter().all(|c| *c == 0));
    }

    #[test]
    fn frame_without_surface_still_moves() {
        let mut field = circles(500.0, 500.0);
        let before: Vec<Vec2> = field.entities().iter().map(|p| p.position).collect();
        let steps = field.frame(1.0 / 60.0, None);
        assert_eq!(steps, 1);
        let after: Vec<Vec2> = field.entities().iter().map(|p| p.position).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn frame_with_surface_draws() {
        let mut field = circles(500.0, 500.0);
        let mut list = DrawList::new();
        field.frame(1.0 / 60.0, Some(&mut list));
        assert_eq!(list.circle_count(), 50);
    }

    #[test]
    fn configure_json_regenerates() {
        let mut field = circles(1000.0, 500.0);
        field.configure_json(r#"{"max_count": 10, "links": false}"#).unwrap();
        assert_eq!(field.len(), 10);
        assert!(field.config().links.is_none());
    }

    #[test]
    fn rejected_config_leaves_field_untouched() {
        let mut field = circles(1000.0, 500.0);
        let generation = field.generation();
        assert!(field.configure_json(r#"{"spacing_factor": -1}"#).is_err());
        assert_eq!(field.len(), 100);
        assert_eq!(field.generation(), generation);
    }

    #[test]
    fn same_seed_same_field() {
        let a = circles(800.0, 600.0);
        let b = circles(800.0, 600.0);
        assert_eq!(a.entities(), b.entities());
    }
}
