use serde::Deserialize;

use crate::api::error::{FieldError, Result};
use crate::surface::Rgba;

/// Hard ceiling on `max_count`; the link pass is quadratic in the entity count.
pub const MAX_ENTITIES: usize = 1000;

/// Line drawing between nearby particles.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkConfig {
    /// Pairs closer than this (pixels) get a line.
    pub max_distance: f32,
    /// Lines attached to one particle per frame.
    pub max_per_particle: u8,
    /// Stroke width in pixels.
    pub width: f32,
    /// Line color; alpha is scaled by `1 - distance / max_distance`.
    pub color: Rgba,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_distance: 100.0,
            max_per_particle: 3,
            width: 1.0,
            color: Rgba::rgb8(173, 235, 179),
        }
    }
}

/// Field parameters, provided by the style.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// One entity per this many pixels of viewport width.
    pub spacing_factor: f32,
    /// Upper bound on the entity count.
    pub max_count: usize,
    /// Min/max entity size in pixels.
    pub size_range: (f32, f32),
    /// Each velocity component is drawn from `[-max_speed, max_speed)` pixels per step.
    pub max_speed: f32,
    /// Min/max color alpha.
    pub alpha_range: (f32, f32),
    /// Fixed step in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Connection lines; `None` disables the pairwise pass.
    pub links: Option<LinkConfig>,
}

impl FieldConfig {
    /// Circle particles over a gradient, linked when close.
    pub fn circles() -> Self {
        Self {
            spacing_factor: 10.0,
            max_count: 150,
            size_range: (1.0, 3.0),
            max_speed: 0.5,
            alpha_range: (0.2, 0.7),
            fixed_dt: 1.0 / 60.0,
            links: Some(LinkConfig::default()),
        }
    }

    /// Larger, sparser leaves on a transparent background.
    pub fn leaves() -> Self {
        Self {
            spacing_factor: 20.0,
            max_count: 50,
            size_range: (8.0, 20.0),
            max_speed: 0.5,
            alpha_range: (0.3, 0.8),
            fixed_dt: 1.0 / 60.0,
            links: None,
        }
    }

    // -- Builder pattern --

    pub fn with_spacing_factor(mut self, spacing: f32) -> Self {
        self.spacing_factor = spacing;
        self
    }

    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn with_size_range(mut self, min: f32, max: f32) -> Self {
        self.size_range = (min, max);
        self
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_links(mut self, links: Option<LinkConfig>) -> Self {
        self.links = links;
        self
    }

    /// Entity count for a viewport `width` pixels wide:
    /// `min(floor(width / spacing_factor), max_count)`.
    pub fn count_for_width(&self, width: f32) -> usize {
        if !width.is_finite() || width <= 0.0 || self.spacing_factor <= 0.0 {
            return 0;
        }
        ((width / self.spacing_factor).floor() as usize).min(self.max_count)
    }

    /// Apply a JSON object of overrides on top of `self`.
    ///
    /// Unknown keys are rejected, absent keys keep their current value.
    pub fn merged_with_json(&self, json: &str) -> Result<Self> {
        let overrides: ConfigOverrides = serde_json::from_str(json)?;
        let merged = overrides.apply(self.clone());
        merged.validate()?;
        Ok(merged)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(FieldError::InvalidConfig(msg));

        if !(self.spacing_factor.is_finite() && self.spacing_factor > 0.0) {
            return invalid(format!("spacing_factor must be positive, got {}", self.spacing_factor));
        }
        if self.max_count > MAX_ENTITIES {
            return invalid(format!("max_count must be at most {}, got {}", MAX_ENTITIES, self.max_count));
        }
        let (lo, hi) = self.size_range;
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo <= hi) {
            return invalid(format!("size_range must satisfy 0 < min <= max, got ({}, {})", lo, hi));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return invalid(format!("max_speed must be non-negative, got {}", self.max_speed));
        }
        let (a_lo, a_hi) = self.alpha_range;
        if !(0.0..=1.0).contains(&a_lo) || !(0.0..=1.0).contains(&a_hi) || a_lo > a_hi {
            return invalid(format!("alpha_range must lie in [0, 1] with min <= max, got ({}, {})", a_lo, a_hi));
        }
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return invalid(format!("fixed_dt must be positive, got {}", self.fixed_dt));
        }
        if let Some(links) = &self.links {
            if !(links.max_distance.is_finite() && links.max_distance > 0.0) {
                return invalid(format!("link max_distance must be positive, got {}", links.max_distance));
            }
        }
        Ok(())
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::circles()
    }
}

/// Partial config accepted from the host page.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverrides {
    spacing_factor: Option<f32>,
    max_count: Option<usize>,
    size_range: Option<(f32, f32)>,
    max_speed: Option<f32>,
    alpha_range: Option<(f32, f32)>,
    /// `false` turns links off, `true` turns them on with defaults.
    links: Option<bool>,
    link_distance: Option<f32>,
    max_links: Option<u8>,
}

impl ConfigOverrides {
    fn apply(self, mut config: FieldConfig) -> FieldConfig {
        if let Some(v) = self.spacing_factor {
            config.spacing_factor = v;
        }
        if let Some(v) = self.max_count {
            config.max_count = v;
        }
        if let Some(v) = self.size_range {
            config.size_range = v;
        }
        if let Some(v) = self.max_speed {
            config.max_speed = v;
        }
        if let Some(v) = self.alpha_range {
            config.alpha_range = v;
        }
        match self.links {
            Some(false) => config.links = None,
            Some(true) if config.links.is_none() => config.links = Some(LinkConfig::default()),
            _ => {}
        }
        if let Some(links) = config.links.as_mut() {
            if let Some(d) = self.link_distance {
                links.max_distance = d;
            }
            if let Some(n) = self.max_links {
                links.max_per_particle = n;
            }
        }
        config
    }
}
