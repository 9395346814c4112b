use eco_field::{FieldConfig, FieldError, FieldStyle, ParticleField, Surface};

/// Lifecycle of a mounted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Animating: frames and resizes are processed.
    Running,
    /// Unmounted: everything is ignored and the frame loop must not reschedule.
    Stopped,
}

/// Generic runner that wires a field to the browser frame loop.
///
/// Holds no web-sys types, so the whole lifecycle is testable off the browser.
/// The wasm side owns one of these behind `Rc<RefCell<..>>` and feeds it
/// animation-frame timestamps and viewport sizes.
pub struct FieldRunner<S: FieldStyle> {
    field: ParticleField<S>,
    state: FieldState,
    /// Timestamp (ms) of the previous animation frame.
    last_timestamp: Option<f64>,
    frame_count: u64,
}

impl<S: FieldStyle> FieldRunner<S> {
    pub fn new(style: S, seed: u64) -> Self {
        Self::from_field(ParticleField::new(style, seed))
    }

    pub fn with_config(style: S, config: FieldConfig, seed: u64) -> Self {
        Self::from_field(ParticleField::with_config(style, config, seed))
    }

    fn from_field(field: ParticleField<S>) -> Self {
        Self {
            field,
            state: FieldState::Running,
            last_timestamp: None,
            frame_count: 0,
        }
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == FieldState::Running
    }

    pub fn field(&self) -> &ParticleField<S> {
        &self.field
    }

    pub fn particle_count(&self) -> u32 {
        self.field.len() as u32
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Viewport changed: regenerate the field for the new size.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !self.is_running() {
            return;
        }
        self.field.resize(width, height);
    }

    /// Apply JSON overrides to the field config.
    pub fn configure(&mut self, json: &str) -> Result<(), FieldError> {
        self.field.configure_json(json)
    }

    /// Run one frame of `dt` seconds. Returns whether the loop should schedule another.
    pub fn frame(&mut self, dt: f32, surface: Option<&mut dyn Surface>) -> bool {
        if !self.is_running() {
            return false;
        }
        self.field.frame(dt, surface);
        self.frame_count += 1;
        true
    }

    /// Run one frame from an animation-frame timestamp in milliseconds.
    /// The first frame after mount advances nothing and only draws.
    pub fn frame_at(&mut self, timestamp_ms: f64, surface: Option<&mut dyn Surface>) -> bool {
        let dt = match self.last_timestamp {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);
        self.frame(dt, surface)
    }

    /// Unmount. Idempotent.
    pub fn stop(&mut self) {
        if self.state == FieldState::Stopped {
            return;
        }
        self.state = FieldState::Stopped;
        log::debug!("field runner stopped after {} frames", self.frame_count);
    }
}
