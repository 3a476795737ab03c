//! Step declarations for entrance timelines.
//!
//! An `AnimationStep` describes one from/to transition over one element or an
//! ordered group of elements. Steps are declarative data; `Timeline::build`
//! turns an ordered sequence of them into a schedule.

use serde::{Deserialize, Serialize};

use super::easing::EasingFunction;
use super::types::VisualState;

/// What a step animates: a single element or an ordered group.
///
/// Group order matters: stagger offsets are assigned in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepTarget {
    /// A single element.
    Element { id: String },
    /// An ordered group of elements sharing one step definition.
    Group { ids: Vec<String> },
}

impl StepTarget {
    /// The element ids this target covers, in declaration order.
    pub fn ids(&self) -> &[String] {
        match self {
            Self::Element { id } => std::slice::from_ref(id),
            Self::Group { ids } => ids,
        }
    }

    /// Number of elements this target expands into.
    pub fn len(&self) -> usize {
        self.ids().len()
    }

    /// Whether the target covers no elements (an empty group).
    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }
}

/// One from/to transition over a target, with timing and easing.
///
/// `delay_ms` is relative to the previous step's end and may be negative to
/// overlap with it; the timeline fold clamps the resulting absolute start at
/// zero. `stagger_ms` only applies to group targets.
///
/// # Usage
///
/// ```
/// use unveil_choreo::easing::EasingFunction;
/// use unveil_choreo::step::AnimationStep;
/// use unveil_choreo::types::VisualState;
///
/// let step = AnimationStep::element("title")
///     .from(VisualState::new().offset_y(100.0).opacity(0.0))
///     .to(VisualState::new().offset_y(0.0).opacity(1.0))
///     .duration_ms(1200.0)
///     .easing(EasingFunction::EaseOut);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationStep {
    /// The element or ordered group this step animates.
    pub target: StepTarget,
    /// Endpoint state at progress 0.
    pub from: VisualState,
    /// Endpoint state at progress 1.
    pub to: VisualState,
    /// Duration of the transition in milliseconds. Must be >= 0.
    pub duration_ms: f32,
    /// Offset from the previous step's end in milliseconds. May be negative.
    pub delay_ms: f32,
    /// Per-element start increment for group targets, in milliseconds.
    pub stagger_ms: f32,
    /// Easing curve shared by every element the step covers.
    pub easing: EasingFunction,
}

impl AnimationStep {
    /// Start a step over a single element.
    pub fn element(id: impl Into<String>) -> Self {
        Self::with_target(StepTarget::Element { id: id.into() })
    }

    /// Start a step over an ordered group of elements.
    pub fn group<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_target(StepTarget::Group {
            ids: ids.into_iter().map(Into::into).collect(),
        })
    }

    fn with_target(target: StepTarget) -> Self {
        Self {
            target,
            from: VisualState::new(),
            to: VisualState::new(),
            duration_ms: 0.0,
            delay_ms: 0.0,
            stagger_ms: 0.0,
            easing: EasingFunction::default(),
        }
    }

    /// Set the from-state endpoint.
    pub fn from(mut self, state: VisualState) -> Self {
        self.from = state;
        self
    }

    /// Set the to-state endpoint.
    pub fn to(mut self, state: VisualState) -> Self {
        self.to = state;
        self
    }

    /// Set the duration in milliseconds.
    pub fn duration_ms(mut self, duration: f32) -> Self {
        self.duration_ms = duration;
        self
    }

    /// Set the offset from the previous step's end. Negative values overlap.
    pub fn delay_ms(mut self, delay: f32) -> Self {
        self.delay_ms = delay;
        self
    }

    /// Set the per-element stagger increment for group targets.
    pub fn stagger_ms(mut self, stagger: f32) -> Self {
        self.stagger_ms = stagger;
        self
    }

    /// Set the easing curve.
    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }
}
