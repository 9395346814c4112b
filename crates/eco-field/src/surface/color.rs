use crate::core::rng::Rng;

/// RGBA color, each channel in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Random color with the green channel pulled high and red/blue kept low.
    pub fn green_biased(rng: &mut Rng, alpha: (f32, f32)) -> Self {
        let r = rng.next_int(100) as u8;
        let g = 150 + rng.next_int(106) as u8;
        let b = rng.next_int(100) as u8;
        Self::rgb8(r, g, b).with_alpha(rng.range(alpha.0, alpha.1))
    }

    /// CSS `rgba()` string for Canvas 2D fill and stroke styles.
    pub fn to_css(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {:.3})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// One stop of a linear gradient; `offset` runs 0.0 (top) to 1.0 (bottom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Vertical linear gradient covering the whole surface.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn new(stops: &[(f32, Rgba)]) -> Self {
        Self {
            stops: stops
                .iter()
                .map(|&(offset, color)| GradientStop { offset, color })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_formatting() {
        let c = Rgba::rgb8(10, 200, 30).with_alpha(0.5);
        assert_eq!(c.to_css(), "rgba(10, 200, 30, 0.500)");
        assert_eq!(Rgba::new(2.0, -1.0, 0.0, 3.0).to_css(), "rgba(255, 0, 0, 1.000)");
    }

    #[test]
    fn green_bias_holds() {
        let mut rng = Rng::new(5);
        for _ in 0..500 {
            let c = Rgba::green_biased(&mut rng, (0.2, 0.7));
            assert!(c.g > c.r && c.g > c.b, "{:?}", c);
            assert!(c.a >= 0.2 && c.a < 0.7);
        }
    }
}
