//! Resolved visual values for the rendering pass.
//!
//! The `VisualResolver` queries the `Choreographer` for current animated
//! values during rendering, falling back to each property's resting value
//! when nothing animates it.

use super::choreographer::Choreographer;
use super::types::StageProperty;

/// The full set of resolved visual properties for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedVisuals {
    /// Horizontal offset from the laid-out position, in pixels.
    pub offset_x: f64,
    /// Vertical offset from the laid-out position, in pixels.
    pub offset_y: f64,
    /// Opacity from 0.0 to 1.0.
    pub opacity: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Default for ResolvedVisuals {
    fn default() -> Self {
        Self {
            offset_x: StageProperty::OffsetX.resting_value(),
            offset_y: StageProperty::OffsetY.resting_value(),
            opacity: StageProperty::Opacity.resting_value(),
            scale: StageProperty::Scale.resting_value(),
        }
    }
}

/// Resolves animated property values for rendering.
///
/// # Usage
///
/// ```ignore
/// let resolver = VisualResolver::new(&choreographer);
///
/// // Resolve one property with an explicit base value
/// let opacity = resolver.resolve("hero-title", StageProperty::Opacity, 1.0);
///
/// // Or grab the whole resolved pose at once
/// let visuals = resolver.resolve_visuals("hero-title");
/// ```
pub struct VisualResolver<'a> {
    choreographer: &'a Choreographer,
}

impl<'a> VisualResolver<'a> {
    /// Create a resolver wrapping the given choreographer.
    pub fn new(choreographer: &'a Choreographer) -> Self {
        Self { choreographer }
    }

    /// Resolve a property, returning the animated value if one is live,
    /// otherwise the supplied base value.
    pub fn resolve(&self, element_id: &str, property: StageProperty, base: f64) -> f64 {
        self.choreographer
            .sample(element_id, property)
            .unwrap_or(base)
    }

    /// Resolve a property against its natural resting value.
    pub fn resolve_resting(&self, element_id: &str, property: StageProperty) -> f64 {
        self.resolve(element_id, property, property.resting_value())
    }

    /// Resolve the complete visual pose of an element.
    pub fn resolve_visuals(&self, element_id: &str) -> ResolvedVisuals {
        ResolvedVisuals {
            offset_x: self.resolve_resting(element_id, StageProperty::OffsetX),
            offset_y: self.resolve_resting(element_id, StageProperty::OffsetY),
            opacity: self.resolve_resting(element_id, StageProperty::Opacity),
            scale: self.resolve_resting(element_id, StageProperty::Scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreographer::TriggerCondition;
    use crate::easing::EasingFunction;
    use crate::step::AnimationStep;
    use crate::timeline::Timeline;
    use crate::types::VisualState;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn test_resolve_falls_back_to_base() {
        let ch = Choreographer::new();
        let resolver = VisualResolver::new(&ch);

        assert_eq!(resolver.resolve("nothing", StageProperty::Opacity, 0.7), 0.7);
        assert_eq!(resolver.resolve_resting("nothing", StageProperty::Scale), 1.0);
    }

    #[test]
    fn test_resolve_visuals_defaults_to_resting_pose() {
        let ch = Choreographer::new();
        let resolver = VisualResolver::new(&ch);
        assert_eq!(resolver.resolve_visuals("nothing"), ResolvedVisuals::default());
    }

    #[test]
    fn test_resolve_live_values() {
        let mut ch = Choreographer::new();
        let timeline = Timeline::build(vec![
            AnimationStep::element("card")
                .from(VisualState::new().offset_y(30.0).opacity(0.0))
                .to(VisualState::new().offset_y(0.0).opacity(1.0))
                .duration_ms(100.0)
                .easing(EasingFunction::Linear),
        ])
        .unwrap();
        ch.run(timeline, TriggerCondition::Immediate);
        ch.update(50.0);

        let resolver = VisualResolver::new(&ch);
        let visuals = resolver.resolve_visuals("card");
        assert!(approx_eq(visuals.offset_y, 15.0));
        assert!(approx_eq(visuals.opacity, 0.5));
        // Untouched properties read at rest
        assert!(approx_eq(visuals.scale, 1.0));
        assert!(approx_eq(visuals.offset_x, 0.0));
    }
}
