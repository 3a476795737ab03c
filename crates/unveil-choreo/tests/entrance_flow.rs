//! End-to-end choreography scenarios driven through the public API.

use unveil_choreo::presets::{card_pop, fade_in_up, header_reveal, stagger_fade_in};
use unveil_choreo::{
    Choreographer, StageProperty, Timeline, TimelineEvent, TimelineState, TriggerCondition,
    VisualResolver,
};

const FRAME_MS: f32 = 16.67;
const VIEWPORT_HEIGHT: f32 = 1000.0;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.001
}

/// A full page visit: the header animates on mount, the grid animates once
/// scrolled into view, and everything settles at the resting pose.
#[test]
fn page_scroll_through() {
    let mut ch = Choreographer::new();
    ch.set_viewport_metrics(VIEWPORT_HEIGHT, 0.0);
    ch.update_element_bounds("header", 100.0);
    ch.update_element_bounds("card-0", 1600.0);

    let header = ch.run(
        Timeline::build(vec![header_reveal("header")]).unwrap(),
        TriggerCondition::Immediate,
    );
    let cards = ch.run(
        Timeline::build(vec![card_pop(["card-0", "card-1", "card-2"])]).unwrap(),
        TriggerCondition::viewport_entry(0.8),
    );

    // Run out the header entrance with the grid still below the fold
    let mut elapsed = 0.0;
    while elapsed < 1200.0 {
        ch.update(FRAME_MS);
        elapsed += FRAME_MS;
    }
    assert_eq!(ch.state_of(header), Some(TimelineState::Finished));
    assert_eq!(ch.state_of(cards), Some(TimelineState::Waiting));
    assert_eq!(ch.sample("card-0", StageProperty::Scale), None);

    // Scroll the grid anchor past the threshold line
    ch.set_scroll_y(900.0);
    ch.update(FRAME_MS);
    assert_eq!(ch.state_of(cards), Some(TimelineState::Running));

    // Let the stagger cascade play out: 200ms of stagger + 500ms duration
    let mut elapsed = 0.0;
    while elapsed < 800.0 {
        ch.update(FRAME_MS);
        elapsed += FRAME_MS;
    }
    assert_eq!(ch.state_of(cards), Some(TimelineState::Finished));

    let resolver = VisualResolver::new(&ch);
    for card in ["card-0", "card-1", "card-2"] {
        let visuals = resolver.resolve_visuals(card);
        assert!(approx_eq(visuals.scale, 1.0));
        assert!(approx_eq(visuals.opacity, 1.0));
    }

    let events: Vec<TimelineEvent> = ch.drain_events().collect();
    assert_eq!(events.iter().filter(|e| e.is_started()).count(), 2);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, TimelineEvent::Ended { .. }))
            .count(),
        2
    );
}

/// The unmount race: a page mounts three section timelines and tears down
/// 50ms later. After the cancel calls return, nothing moves again.
#[test]
fn unmount_at_fifty_ms_stops_all_mutation() {
    let mut ch = Choreographer::new();
    ch.set_viewport_metrics(VIEWPORT_HEIGHT, 0.0);
    ch.update_element_bounds("hero", 0.0);
    ch.update_element_bounds("summary", 2500.0);
    ch.update_element_bounds("row-0", 3500.0);

    let handles = [
        ch.run(
            Timeline::build(vec![fade_in_up("hero", 0.0)]).unwrap(),
            TriggerCondition::Immediate,
        ),
        ch.run(
            Timeline::build(vec![fade_in_up("summary", 0.0)]).unwrap(),
            TriggerCondition::viewport_entry(0.8),
        ),
        ch.run(
            Timeline::build(vec![stagger_fade_in(["row-0", "row-1"], 200.0)]).unwrap(),
            TriggerCondition::viewport_entry(0.8),
        ),
    ];

    // Three frames is ~50ms
    for _ in 0..3 {
        ch.update(FRAME_MS);
    }

    // Teardown: the page cancels every handle it owns
    for handle in handles {
        ch.cancel(handle);
    }
    assert!(!ch.has_active_runs());

    // Snapshot everything a renderer could observe
    let elements = ["hero", "summary", "row-0", "row-1"];
    let frozen: Vec<_> = elements.iter().map(|e| ch.sample_all(e)).collect();

    // The in-flight hero froze mid-animation rather than snapping
    let hero_opacity = ch.sample("hero", StageProperty::Opacity).unwrap();
    assert!(hero_opacity > 0.0 && hero_opacity < 1.0);

    // The gated sections never began, so they were never touched
    assert_eq!(ch.sample("summary", StageProperty::Opacity), None);
    assert_eq!(ch.sample("row-0", StageProperty::Opacity), None);

    // Keep the world moving: scroll everything into range and run a second
    ch.set_scroll_y(4000.0);
    for _ in 0..60 {
        ch.update(FRAME_MS);
    }

    for (element, before) in elements.iter().zip(frozen) {
        assert_eq!(ch.sample_all(element), before, "{element} moved after unmount");
    }
}

/// Double-cancel produces the same observable state as a single cancel.
#[test]
fn double_cancel_matches_single_cancel() {
    let build = || Timeline::build(vec![fade_in_up("header", 0.0)]).unwrap();

    let run_scenario = |cancels: usize| {
        let mut ch = Choreographer::new();
        let handle = ch.run(build(), TriggerCondition::Immediate);
        ch.update(250.0);
        for _ in 0..cancels {
            ch.cancel(handle);
        }
        ch.update(250.0);
        (ch.sample_all("header"), ch.state_of(handle))
    };

    assert_eq!(run_scenario(1), run_scenario(2));
}
