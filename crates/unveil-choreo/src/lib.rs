//! Entrance choreography for page content.
//!
//! This crate schedules how visual elements appear when a page mounts:
//! sequenced property transitions (offset, opacity, scale) with per-element
//! stagger, shared easing curves, and viewport-gated activation, advanced
//! cooperatively on the host's frame tick.
//!
//! This crate provides:
//! - **Timelines**: Ordered, time-offset schedules built from step
//!   declarations, with overlap and stagger
//! - **Triggers**: Immediate starts or one-shot viewport-entry gating
//! - **Easing Functions**: Standard CSS timing curves plus custom beziers
//! - **Lifecycle Events**: Callbacks for timeline start, end, and cancel
//! - **Glitch Pulses**: A free-running emphasis oscillator for accent text
//!
//! # Architecture
//!
//! ```text
//! Choreographer
//!   ├── Running timelines (per-frame interpolation)
//!   ├── Waiting timelines (parked behind ViewportTracker watches)
//!   └── EventQueue (lifecycle events for the owning page)
//!
//! VisualResolver
//!   └── Queries the choreographer for current values during rendering
//! ```
//!
//! The page owns every `ActiveHandle` it creates and must cancel them all in
//! its teardown path; cancellation is synchronous and idempotent.

pub mod choreographer;
pub mod easing;
pub mod error;
pub mod events;
pub mod glitch;
pub mod interpolate;
pub mod presets;
pub mod resolver;
pub mod step;
pub mod timeline;
pub mod types;
pub mod viewport;

pub use choreographer::{ActiveHandle, Choreographer, TriggerCondition};
pub use easing::EasingFunction;
pub use error::MalformedStepError;
pub use events::{EventQueue, TimelineEvent};
pub use glitch::{GLITCH_INTERVAL_MS, GLITCH_WINDOW_MS, GlitchPulse};
pub use interpolate::Interpolate;
pub use presets::{POWER2_OUT, POWER3_OUT};
pub use resolver::{ResolvedVisuals, VisualResolver};
pub use step::{AnimationStep, StepTarget};
pub use timeline::{Timeline, Track};
pub use types::{StageProperty, TimelineId, TimelineState, VisualState};
pub use viewport::{DEFAULT_ENTRY_THRESHOLD, ViewportSubscription, ViewportTracker};
