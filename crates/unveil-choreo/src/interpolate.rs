//! Interpolation for animatable values.
//!
//! This module provides the `Interpolate` trait and implementations for the
//! value types the choreographer animates. Interpolation is the core
//! mechanism that turns two endpoint states into a smooth transition.

use super::types::VisualState;

/// Trait for types that can be interpolated between two values.
///
/// # Arguments
/// * `to` - Target value to interpolate towards
/// * `t` - Interpolation factor (0.0 = self, 1.0 = to)
///
/// # Returns
/// Interpolated value between self and to at factor t.
pub trait Interpolate: Sized {
    /// Interpolate between self and another value.
    ///
    /// When t = 0.0, returns self.
    /// When t = 1.0, returns to.
    /// Values between 0.0 and 1.0 return intermediate values.
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

/// Linear interpolation helper for f64 values.
#[inline]
fn lerp_f64(from: f64, to: f64, t: f32) -> f64 {
    from + (to - from) * t as f64
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp_f64(*self, *to, t)
    }
}

impl Interpolate for VisualState {
    /// Interpolate per-property between two states.
    ///
    /// Properties present in both states are interpolated; properties present
    /// only in self are carried through unchanged. Timeline construction
    /// guarantees matching key sets, so the carry-through branch only matters
    /// for hand-built states.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        let mut out = VisualState::new();
        for (property, from_value) in self.iter() {
            let value = match to.get(property) {
                Some(to_value) => from_value.interpolate(&to_value, t),
                None => from_value,
            };
            out.set(property, value);
        }
        out
    }
}
