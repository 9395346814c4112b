use glam::Vec2;

/// Pixel dimensions of the render target.
///
/// Passed into entity updates and draws; entities never hold on to it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Bounds with negative or non-finite dimensions collapsed to zero.
    pub fn sanitized(width: f32, height: f32) -> Self {
        let clean = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self::new(clean(width), clean(height))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Toroidal wrap of `pos` into `[-margin, extent + margin)` on both axes.
    pub fn wrap(&self, pos: Vec2, margin: f32) -> Vec2 {
        Vec2::new(
            wrap_axis(pos.x, self.width, margin),
            wrap_axis(pos.y, self.height, margin),
        )
    }

    /// Whether `pos` lies inside the half-open wrap range for `margin`.
    pub fn contains(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x < self.width + margin
            && pos.y >= -margin
            && pos.y < self.height + margin
    }
}

/// Leaving past the far edge re-enters at the near edge; leaving past the
/// near edge re-enters the same distance in from the far edge.
fn wrap_axis(v: f32, extent: f32, margin: f32) -> f32 {
    let lo = 0.0 - margin;
    let hi = extent + margin;
    if hi <= lo {
        return lo;
    }
    if v >= hi {
        lo
    } else if v < lo {
        let wrapped = v + (hi - lo);
        // Tiny overshoots can round back onto `hi`
        if wrapped >= hi || wrapped < lo { lo } else { wrapped }
    } else {
        v
    }
}
