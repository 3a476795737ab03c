//! Repeating glitch emphasis oscillator.
//!
//! A free-running two-state oscillator owned by the element it emphasizes:
//! quiescent for most of each period, glitching for a short window at the
//! start of every period after the first. It is deliberately independent of
//! the timeline and trigger machinery - no queue, no backlog. Dropping the
//! owning value during a glitch window discards the pending revert with it.
//!
//! Call `update` each frame with the elapsed delta, the same way editable
//! controls step their caret blink.

use unveil_config::GlitchConfig;

/// Wall-clock period between glitch pulses, in milliseconds.
pub const GLITCH_INTERVAL_MS: f32 = 3000.0;

/// Duration of each glitch pulse, in milliseconds.
pub const GLITCH_WINDOW_MS: f32 = 300.0;

/// Free-running quiescent/glitching oscillator.
#[derive(Clone, Copy, Debug)]
pub struct GlitchPulse {
    interval_ms: f32,
    window_ms: f32,
    elapsed_ms: f32,
    glitching: bool,
}

impl Default for GlitchPulse {
    fn default() -> Self {
        Self::new()
    }
}

impl GlitchPulse {
    /// Create an oscillator with the stock 3000 ms period / 300 ms window.
    pub fn new() -> Self {
        Self::with_timing(GLITCH_INTERVAL_MS, GLITCH_WINDOW_MS)
    }

    /// Create an oscillator with explicit timing.
    ///
    /// The window is capped strictly below the interval so the oscillator
    /// always returns to quiescent within each period.
    pub fn with_timing(interval_ms: f32, window_ms: f32) -> Self {
        let interval_ms = interval_ms.max(1.0);
        Self {
            interval_ms,
            window_ms: window_ms.clamp(0.0, interval_ms * 0.5),
            elapsed_ms: 0.0,
            glitching: false,
        }
    }

    /// Create an oscillator from configuration.
    pub fn from_config(config: &GlitchConfig) -> Self {
        Self::with_timing(config.interval_ms, config.window_ms)
    }

    /// Advance the oscillator by a frame delta.
    pub fn update(&mut self, delta_ms: f32) {
        self.elapsed_ms += delta_ms.max(0.0);
        // The first pulse lands one full period after creation; each pulse
        // occupies the opening window of its period.
        self.glitching = self.elapsed_ms >= self.interval_ms
            && self.elapsed_ms % self.interval_ms < self.window_ms;
    }

    /// Whether the owning element should render its glitch state.
    pub fn is_glitching(&self) -> bool {
        self.glitching
    }

    /// Time since the oscillator was created, in milliseconds.
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }
}
