//! Core choreography types and data structures.
//!
//! This module defines the fundamental types for the entrance engine:
//! - `StageProperty`: Enum of animatable visual properties
//! - `VisualState`: A partial property-to-value snapshot
//! - `TimelineId`: Unique identifier for timeline runs
//! - `TimelineState`: Current state of a running timeline

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a timeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimelineId(pub u64);

impl TimelineId {
    /// Generate a new unique timeline ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TimelineId {
    fn default() -> Self {
        Self::new()
    }
}

/// Current state of a timeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineState {
    /// Timeline is parked behind a trigger condition that has not fired yet.
    Waiting,
    /// Timeline is actively advancing.
    Running,
    /// Timeline has completed normally.
    Finished,
    /// Timeline was cancelled before completion and is frozen at its last
    /// sampled instant.
    Cancelled,
}

impl TimelineState {
    /// Whether this timeline still needs per-frame updates.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Waiting | Self::Running)
    }

    /// Whether this timeline has stopped for good.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }
}

/// Visual properties the choreographer can animate.
///
/// These are the only properties an entrance mutates: translation offsets,
/// opacity, and uniform scale. Offsets are relative to the element's laid-out
/// position, so a finished entrance always rests at offset zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageProperty {
    /// Horizontal offset from the element's resting position, in pixels.
    OffsetX,
    /// Vertical offset from the element's resting position, in pixels.
    OffsetY,
    /// Opacity from 0.0 (transparent) to 1.0 (opaque).
    Opacity,
    /// Uniform scale factor, 1.0 being natural size.
    Scale,
}

impl StageProperty {
    /// The value an element shows when nothing animates it.
    pub fn resting_value(&self) -> f64 {
        match self {
            Self::OffsetX | Self::OffsetY => 0.0,
            Self::Opacity | Self::Scale => 1.0,
        }
    }
}

/// A partial snapshot of visual property values.
///
/// Steps describe their endpoints with two of these; only the properties a
/// step actually animates are present. The builder-style setters make
/// endpoint construction read like the declaration it replaces:
///
/// ```
/// use unveil_choreo::types::VisualState;
///
/// let hidden = VisualState::new().offset_y(50.0).opacity(0.0);
/// let shown = VisualState::new().offset_y(0.0).opacity(1.0);
/// assert!(hidden.matches_keys(&shown));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisualState {
    values: HashMap<StageProperty, f64>,
}

impl VisualState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value.
    pub fn set(&mut self, property: StageProperty, value: f64) {
        self.values.insert(property, value);
    }

    /// Set the horizontal offset.
    pub fn offset_x(mut self, value: f64) -> Self {
        self.set(StageProperty::OffsetX, value);
        self
    }

    /// Set the vertical offset.
    pub fn offset_y(mut self, value: f64) -> Self {
        self.set(StageProperty::OffsetY, value);
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, value: f64) -> Self {
        self.set(StageProperty::Opacity, value);
        self
    }

    /// Set the uniform scale.
    pub fn scale(mut self, value: f64) -> Self {
        self.set(StageProperty::Scale, value);
        self
    }

    /// Get a property value.
    pub fn get(&self, property: StageProperty) -> Option<f64> {
        self.values.get(&property).copied()
    }

    /// Check if the state is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the number of properties in the state.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over all property-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (StageProperty, f64)> + '_ {
        self.values.iter().map(|(p, v)| (*p, *v))
    }

    /// Whether this state specifies exactly the same property keys as another.
    pub fn matches_keys(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self.values.keys().all(|k| other.values.contains_key(k))
    }

    /// The properties this state carries, in an unspecified order.
    pub fn properties(&self) -> impl Iterator<Item = StageProperty> + '_ {
        self.values.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_id_uniqueness() {
        let id1 = TimelineId::new();
        let id2 = TimelineId::new();
        let id3 = TimelineId::new();

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_timeline_state_predicates() {
        assert!(TimelineState::Waiting.is_live());
        assert!(TimelineState::Running.is_live());
        assert!(!TimelineState::Finished.is_live());
        assert!(TimelineState::Cancelled.is_settled());
        assert!(TimelineState::Finished.is_settled());
        assert!(!TimelineState::Running.is_settled());
    }

    #[test]
    fn test_resting_values() {
        assert_eq!(StageProperty::OffsetX.resting_value(), 0.0);
        assert_eq!(StageProperty::OffsetY.resting_value(), 0.0);
        assert_eq!(StageProperty::Opacity.resting_value(), 1.0);
        assert_eq!(StageProperty::Scale.resting_value(), 1.0);
    }

    #[test]
    fn test_visual_state_builder() {
        let state = VisualState::new().offset_y(50.0).opacity(0.0);

        assert_eq!(state.len(), 2);
        assert_eq!(state.get(StageProperty::OffsetY), Some(50.0));
        assert_eq!(state.get(StageProperty::Opacity), Some(0.0));
        assert_eq!(state.get(StageProperty::Scale), None);
    }

    #[test]
    fn test_matches_keys() {
        let a = VisualState::new().offset_y(30.0).opacity(0.0);
        let b = VisualState::new().offset_y(0.0).opacity(1.0);
        let c = VisualState::new().offset_y(0.0);
        let d = VisualState::new().offset_x(0.0).opacity(1.0);

        assert!(a.matches_keys(&b));
        assert!(b.matches_keys(&a));
        assert!(!a.matches_keys(&c));
        assert!(!a.matches_keys(&d));
    }

    #[test]
    fn test_serde_roundtrip() {
        let state = VisualState::new().scale(0.8).opacity(0.0);
        let json = serde_json::to_string(&state).unwrap();
        let parsed: VisualState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
