//! Headless demo driver for the entrance choreography engine.
//!
//! Simulates a page visit at a fixed 60fps tick: the hero sequence plays on
//! mount, two sections animate in as the fake scroll position passes their
//! thresholds, and a glitch pulse accents the title throughout.

use anyhow::Result;
use tracing::info;

use unveil_choreo::presets::{self, POWER2_OUT, card_pop, header_reveal};
use unveil_choreo::{
    AnimationStep, Choreographer, GlitchPulse, Timeline, TriggerCondition, VisualResolver,
    VisualState,
};
use unveil_config::MotionConfig;

const FRAME_MS: f32 = 1000.0 / 60.0;
const VIEWPORT_HEIGHT: f32 = 900.0;
const SCROLL_SPEED_PX_PER_MS: f32 = 0.6;

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let config = MotionConfig::load();
    info!(reduced_motion = config.reduced_motion, "starting demo page visit");

    let mut choreographer = Choreographer::new();
    choreographer.set_viewport_metrics(VIEWPORT_HEIGHT, 0.0);

    // Layout the fake page: hero on screen, sections below the fold
    choreographer.update_element_bounds("hero-title", 120.0);
    choreographer.update_element_bounds("about-header", 1400.0);
    choreographer.update_element_bounds("card-0", 2300.0);
    choreographer.update_element_bounds("ack-row-0", 3200.0);

    let hero = presets::hero_timeline(
        "hero-title",
        "hero-subtitle",
        "hero-description",
        "hero-buttons",
        "hero-social",
    )?;

    let about = build_section(
        vec![header_reveal("about-header")],
        config.reduced_motion,
    )?;
    let cards = build_section(
        vec![card_pop(["card-0", "card-1", "card-2", "card-3"])],
        config.reduced_motion,
    )?;

    // The acknowledgment list cascades with timings taken from configuration
    let ack_rows = build_section(
        vec![
            AnimationStep::group(["ack-row-0", "ack-row-1", "ack-row-2"])
                .from(
                    VisualState::new()
                        .offset_y(config.entrance.rise_distance)
                        .opacity(0.0),
                )
                .to(VisualState::new().offset_y(0.0).opacity(1.0))
                .duration_ms(config.entrance.duration_ms)
                .stagger_ms(config.entrance.stagger_ms)
                .easing(POWER2_OUT),
        ],
        config.reduced_motion,
    )?;

    let mut handles = Vec::new();
    handles.push(choreographer.run(hero, TriggerCondition::Immediate));
    let threshold = config.entrance.entry_threshold;
    handles.push(choreographer.run(about, TriggerCondition::viewport_entry(threshold)));
    handles.push(choreographer.run(cards, TriggerCondition::viewport_entry(threshold)));
    handles.push(choreographer.run(ack_rows, TriggerCondition::viewport_entry(threshold)));

    let mut title_glitch = GlitchPulse::from_config(&config.glitch);
    let mut was_glitching = false;
    let mut scroll_y = 0.0_f32;

    // Ten simulated seconds is enough to scroll everything into view
    let total_frames = (10_000.0 / FRAME_MS) as usize;
    for frame in 0..total_frames {
        scroll_y += SCROLL_SPEED_PX_PER_MS * FRAME_MS;
        choreographer.set_scroll_y(scroll_y);
        choreographer.update(FRAME_MS);

        title_glitch.update(FRAME_MS);
        if title_glitch.is_glitching() != was_glitching {
            was_glitching = title_glitch.is_glitching();
            info!(glitching = was_glitching, "hero title glitch state changed");
        }

        for event in choreographer.drain_events() {
            info!(?event, scroll_y, "timeline lifecycle");
        }

        if frame % 30 == 0 && choreographer.has_active_runs() {
            let resolver = VisualResolver::new(&choreographer);
            let title = resolver.resolve_visuals("hero-title");
            let card = resolver.resolve_visuals("card-0");
            info!(
                t_ms = frame as f32 * FRAME_MS,
                title_opacity = title.opacity,
                title_offset_y = title.offset_y,
                card_scale = card.scale,
                "frame sample"
            );
        }

        choreographer.clear_dirty();
    }

    // Page teardown: cancel every handle we created
    for handle in handles {
        choreographer.cancel(handle);
    }
    info!("demo page visit finished");

    Ok(())
}

/// Build a section timeline, collapsing it to an instant cut when the
/// visitor prefers reduced motion.
fn build_section(
    steps: Vec<unveil_choreo::AnimationStep>,
    reduced_motion: bool,
) -> Result<Timeline, unveil_choreo::MalformedStepError> {
    let steps = if reduced_motion {
        steps.into_iter().map(presets::instant).collect()
    } else {
        steps
    };
    Timeline::build(steps)
}
