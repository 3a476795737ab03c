//! Stock entrance steps shared across pages.
//!
//! These cover the entrance vocabulary the site actually uses: headers that
//! rise in, card grids that pop in with a stagger, list rows that cascade
//! after a filter change, and the hero sequence on the landing page. Pages
//! compose them into timelines instead of hand-writing endpoint states.

use super::easing::EasingFunction;
use super::error::MalformedStepError;
use super::step::AnimationStep;
use super::timeline::Timeline;
use super::types::VisualState;

/// Decelerating cubic ease-out, the workhorse curve for list entrances.
pub const POWER2_OUT: EasingFunction = EasingFunction::CubicBezier {
    x1: 0.215,
    y1: 0.61,
    x2: 0.355,
    y2: 1.0,
};

/// Sharper decelerating quartic ease-out, used for headline entrances.
pub const POWER3_OUT: EasingFunction = EasingFunction::CubicBezier {
    x1: 0.165,
    y1: 0.84,
    x2: 0.44,
    y2: 1.0,
};

/// Rise distance in pixels for the standard fade-in-up entrance.
pub const FADE_IN_UP_RISE: f64 = 50.0;

/// Rise distance in pixels for staggered list entrances.
pub const CASCADE_RISE: f64 = 30.0;

/// A single element rising 50px into place while fading in. 800 ms.
pub fn fade_in_up(id: impl Into<String>, delay_ms: f32) -> AnimationStep {
    AnimationStep::element(id)
        .from(VisualState::new().offset_y(FADE_IN_UP_RISE).opacity(0.0))
        .to(VisualState::new().offset_y(0.0).opacity(1.0))
        .duration_ms(800.0)
        .delay_ms(delay_ms)
        .easing(POWER3_OUT)
}

/// An ordered group rising 30px into place with a per-element stagger. 600 ms.
pub fn stagger_fade_in<I, S>(ids: I, stagger_ms: f32) -> AnimationStep
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AnimationStep::group(ids)
        .from(VisualState::new().offset_y(CASCADE_RISE).opacity(0.0))
        .to(VisualState::new().offset_y(0.0).opacity(1.0))
        .duration_ms(600.0)
        .stagger_ms(stagger_ms)
        .easing(POWER2_OUT)
}

/// The page-header entrance shared by every secondary page. 1000 ms.
pub fn header_reveal(id: impl Into<String>) -> AnimationStep {
    AnimationStep::element(id)
        .from(VisualState::new().offset_y(FADE_IN_UP_RISE).opacity(0.0))
        .to(VisualState::new().offset_y(0.0).opacity(1.0))
        .duration_ms(1000.0)
        .easing(POWER3_OUT)
}

/// Card grids scaling up from 80% while fading in, 100 ms apart. 500 ms.
pub fn card_pop<I, S>(ids: I) -> AnimationStep
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AnimationStep::group(ids)
        .from(VisualState::new().scale(0.8).opacity(0.0))
        .to(VisualState::new().scale(1.0).opacity(1.0))
        .duration_ms(500.0)
        .stagger_ms(100.0)
        .easing(POWER2_OUT)
}

/// List rows cascading in after a search or filter change. 500 ms.
pub fn list_cascade<I, S>(ids: I) -> AnimationStep
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AnimationStep::group(ids)
        .from(VisualState::new().offset_y(CASCADE_RISE).opacity(0.0))
        .to(VisualState::new().offset_y(0.0).opacity(1.0))
        .duration_ms(500.0)
        .stagger_ms(100.0)
        .easing(POWER2_OUT)
}

/// The landing-page hero sequence: title, subtitle, description, buttons,
/// and social row, each step overlapping the previous one's tail.
pub fn hero_timeline(
    title: impl Into<String>,
    subtitle: impl Into<String>,
    description: impl Into<String>,
    buttons: impl Into<String>,
    social: impl Into<String>,
) -> Result<Timeline, MalformedStepError> {
    Timeline::build(vec![
        AnimationStep::element(title)
            .from(VisualState::new().offset_y(100.0).opacity(0.0))
            .to(VisualState::new().offset_y(0.0).opacity(1.0))
            .duration_ms(1200.0)
            .easing(POWER3_OUT),
        AnimationStep::element(subtitle)
            .from(VisualState::new().offset_y(50.0).opacity(0.0))
            .to(VisualState::new().offset_y(0.0).opacity(1.0))
            .duration_ms(800.0)
            .delay_ms(-600.0)
            .easing(POWER2_OUT),
        AnimationStep::element(description)
            .from(VisualState::new().offset_y(30.0).opacity(0.0))
            .to(VisualState::new().offset_y(0.0).opacity(1.0))
            .duration_ms(600.0)
            .delay_ms(-400.0)
            .easing(POWER2_OUT),
        AnimationStep::element(buttons)
            .from(VisualState::new().offset_y(30.0).opacity(0.0))
            .to(VisualState::new().offset_y(0.0).opacity(1.0))
            .duration_ms(600.0)
            .delay_ms(-300.0)
            .easing(POWER2_OUT),
        AnimationStep::element(social)
            .from(VisualState::new().offset_y(20.0).opacity(0.0))
            .to(VisualState::new().offset_y(0.0).opacity(1.0))
            .duration_ms(500.0)
            .delay_ms(-200.0)
            .easing(POWER2_OUT),
    ])
}

/// Collapse a step to an instant cut for reduced-motion rendering.
///
/// The endpoints stay intact so the element still lands in its final pose;
/// only the motion between them is removed.
pub fn instant(mut step: AnimationStep) -> AnimationStep {
    step.duration_ms = 0.0;
    step.stagger_ms = 0.0;
    if step.delay_ms < 0.0 {
        step.delay_ms = 0.0;
    }
    step
}
