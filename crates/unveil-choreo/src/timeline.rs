//! Timeline construction and time-indexed sampling.
//!
//! `Timeline::build` turns an ordered sequence of `AnimationStep`s into a
//! schedule of per-element tracks with absolute start times:
//!
//! - Step starts fold over the sequence: a step starts at the previous step's
//!   end plus its own delay, clamped at zero. Negative delays overlap with
//!   the previous step but can never push a start before the timeline origin.
//! - Group targets expand into one track per element, each offset by the
//!   step's stagger increment in declaration order.
//! - A staggered step ends when its last track ends, so the following step's
//!   delay is measured from the end of the whole cascade.
//!
//! Building is pure: validation failures surface as `MalformedStepError` and
//! nothing is scheduled until the timeline is handed to the choreographer.

use serde::{Deserialize, Serialize};

use super::easing::EasingFunction;
use super::error::MalformedStepError;
use super::interpolate::Interpolate;
use super::step::AnimationStep;
use super::types::{StageProperty, VisualState};

/// One element's scheduled segment within a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// The element this track animates.
    pub element_id: String,
    /// Endpoint state at progress 0.
    pub from: VisualState,
    /// Endpoint state at progress 1.
    pub to: VisualState,
    /// Absolute start time within the timeline, in milliseconds.
    pub start_ms: f32,
    /// Duration in milliseconds.
    pub duration_ms: f32,
    /// Easing curve.
    pub easing: EasingFunction,
    /// Index of the declaring step, for event reporting and debugging.
    pub step_index: usize,
}

impl Track {
    /// Absolute end time within the timeline.
    pub fn end_ms(&self) -> f32 {
        self.start_ms + self.duration_ms
    }

    /// The track's state at an absolute timeline instant.
    ///
    /// Before the start this is the from-state; past the end, the to-state.
    pub fn state_at(&self, elapsed_ms: f32) -> VisualState {
        let local = elapsed_ms - self.start_ms;
        let progress = if self.duration_ms > 0.0 {
            (local / self.duration_ms).clamp(0.0, 1.0)
        } else if local < 0.0 {
            0.0
        } else {
            1.0
        };
        let eased = self.easing.evaluate(progress);
        self.from.interpolate(&self.to, eased)
    }

    /// Whether the track has begun at the given instant.
    pub fn has_begun(&self, elapsed_ms: f32) -> bool {
        elapsed_ms >= self.start_ms
    }
}

/// An ordered, time-offset schedule of visual transitions.
///
/// Built once per page mount from step declarations, then handed to the
/// choreographer to run. Never persisted or shared between mounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    tracks: Vec<Track>,
    duration_ms: f32,
}

impl Timeline {
    /// Build a timeline from an ordered step sequence.
    ///
    /// Fails with `MalformedStepError` if any step's endpoints animate
    /// different property sets or declare a negative duration. Pure: no side
    /// effects, nothing starts running.
    pub fn build(steps: Vec<AnimationStep>) -> Result<Self, MalformedStepError> {
        let mut tracks = Vec::new();
        let mut cursor_ms = 0.0_f32;
        let mut duration_ms = 0.0_f32;

        for (index, step) in steps.into_iter().enumerate() {
            if !step.from.matches_keys(&step.to) {
                let mut from_keys: Vec<StageProperty> = step.from.properties().collect();
                let mut to_keys: Vec<StageProperty> = step.to.properties().collect();
                from_keys.sort();
                to_keys.sort();
                return Err(MalformedStepError::MismatchedEndpoints {
                    index,
                    from_keys,
                    to_keys,
                });
            }
            if step.duration_ms < 0.0 {
                return Err(MalformedStepError::NegativeDuration {
                    index,
                    duration_ms: step.duration_ms,
                });
            }

            let step_start = (cursor_ms + step.delay_ms).max(0.0);
            // An empty group still occupies its duration, so sequencing does
            // not depend on how many elements a page happened to render.
            let mut step_end = step_start + step.duration_ms;

            for (k, element_id) in step.target.ids().iter().enumerate() {
                let start_ms = (step_start + k as f32 * step.stagger_ms).max(0.0);
                let track = Track {
                    element_id: element_id.clone(),
                    from: step.from.clone(),
                    to: step.to.clone(),
                    start_ms,
                    duration_ms: step.duration_ms,
                    easing: step.easing,
                    step_index: index,
                };
                step_end = step_end.max(track.end_ms());
                tracks.push(track);
            }

            cursor_ms = step_end;
            duration_ms = duration_ms.max(step_end);
        }

        Ok(Self {
            tracks,
            duration_ms,
        })
    }

    /// The scheduled tracks in declaration order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total duration in milliseconds (end of the latest track).
    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Whether the timeline schedules nothing.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// The first scheduled element, used as the anchor for viewport triggers.
    pub fn first_element(&self) -> Option<&str> {
        self.tracks.first().map(|t| t.element_id.as_str())
    }

    /// Whether any track animates the given element.
    pub fn animates(&self, element_id: &str) -> bool {
        self.tracks.iter().any(|t| t.element_id == element_id)
    }

    /// Sample one element property at an absolute timeline instant.
    ///
    /// Declaration order resolves overlap: the latest track that has begun
    /// wins. A track that has not begun contributes its from-state only when
    /// no earlier track already supplies the property, so elements sit in
    /// their hidden pose until their own segment starts.
    pub fn sample(
        &self,
        elapsed_ms: f32,
        element_id: &str,
        property: StageProperty,
    ) -> Option<f64> {
        let mut value: Option<f64> = None;
        for track in &self.tracks {
            if track.element_id != element_id {
                continue;
            }
            let Some(from_value) = track.from.get(property) else {
                continue;
            };
            if track.has_begun(elapsed_ms) {
                value = track.state_at(elapsed_ms).get(property);
            } else if value.is_none() {
                value = Some(from_value);
            }
        }
        value
    }

    /// Sample every animated property of one element at an instant.
    pub fn sample_all(&self, elapsed_ms: f32, element_id: &str) -> VisualState {
        let mut state = VisualState::new();
        for track in &self.tracks {
            if track.element_id != element_id {
                continue;
            }
            if track.has_begun(elapsed_ms) {
                for (property, v) in track.state_at(elapsed_ms).iter() {
                    state.set(property, v);
                }
            } else {
                for (property, v) in track.from.iter() {
                    if state.get(property).is_none() {
                        state.set(property, v);
                    }
                }
            }
        }
        state
    }
}
