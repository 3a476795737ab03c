//! Central coordinator for entrance timelines.
//!
//! The `Choreographer` owns every timeline run on a page. It handles:
//! - Starting timelines immediately or parking them behind viewport triggers
//! - Advancing running timelines each frame
//! - Providing current animated values for rendering
//! - Cooperative, idempotent cancellation at teardown
//!
//! # Usage
//!
//! ```ignore
//! use unveil_choreo::{Choreographer, Timeline, TriggerCondition};
//!
//! let mut choreographer = Choreographer::new();
//!
//! // Start a timeline as soon as the page mounts
//! let hero = choreographer.run(hero_timeline, TriggerCondition::Immediate);
//!
//! // Park another behind a scroll trigger
//! let cards = choreographer.run(card_timeline, TriggerCondition::viewport_entry(0.8));
//!
//! // Each frame: report scroll state, advance, then read values
//! choreographer.set_scroll_y(scroll_y);
//! choreographer.update(16.67);
//! let opacity = choreographer.sample("card-0", StageProperty::Opacity);
//!
//! // On unmount the page cancels everything it started
//! choreographer.cancel(hero);
//! choreographer.cancel(cards);
//! ```
//!
//! Each run exclusively owns the elements it animates for its lifetime; two
//! live timelines over the same element sample in unspecified order, so
//! callers serialize by cancelling before re-running.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use static_assertions::assert_impl_all;
use tracing::debug;

use super::events::{EventQueue, TimelineEvent};
use super::timeline::Timeline;
use super::types::{StageProperty, TimelineId, TimelineState, VisualState};
use super::viewport::{ViewportSubscription, ViewportTracker};

/// When a timeline is released to begin executing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerCondition {
    /// Begin on the next frame after `run` is called.
    Immediate,
    /// Begin the first time the timeline's anchor element crosses the given
    /// fraction of viewport height. Fires at most once per run.
    ViewportEntry {
        /// Fraction of viewport height, clamped to [0, 1] at registration.
        threshold: f32,
    },
}

impl TriggerCondition {
    /// Convenience constructor for a viewport-entry trigger.
    pub fn viewport_entry(threshold: f32) -> Self {
        Self::ViewportEntry { threshold }
    }
}

/// A live, cancellable timeline run.
///
/// Handles are cheap copies of the run's identity. The page component that
/// created a run owns its handle and must cancel it at teardown; cancelling
/// twice, or cancelling a finished run, is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveHandle(TimelineId);

assert_impl_all!(ActiveHandle: Copy, Send, Sync);

impl ActiveHandle {
    /// Wrap a timeline id in a handle.
    pub fn new(id: TimelineId) -> Self {
        Self(id)
    }

    /// The underlying timeline id.
    pub fn id(&self) -> TimelineId {
        self.0
    }
}

/// One timeline run and its scheduling state.
#[derive(Debug)]
struct TimelineRun {
    timeline: Timeline,
    state: TimelineState,
    /// Time the timeline has advanced, in milliseconds. Frozen on cancel.
    elapsed_ms: f32,
}

impl TimelineRun {
    /// Whether sampling this run may influence rendered values.
    ///
    /// Waiting runs have not begun and must not touch their elements;
    /// cancelled runs stay sampleable at their frozen instant.
    fn is_visible(&self) -> bool {
        !matches!(self.state, TimelineState::Waiting)
    }
}

/// Central manager for every timeline run on a page.
#[derive(Debug, Default)]
pub struct Choreographer {
    /// All runs indexed by their ID.
    runs: HashMap<TimelineId, TimelineRun>,

    /// Index from viewport subscription to the run it releases.
    pending_triggers: HashMap<ViewportSubscription, TimelineId>,

    /// Scroll observation source for viewport-gated runs.
    viewport: ViewportTracker,

    /// Flag indicating whether anything changed this frame.
    dirty: bool,

    /// Queue of lifecycle events emitted during updates.
    event_queue: EventQueue,
}

impl Choreographer {
    /// Create a new choreographer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a timeline run under the given trigger condition.
    ///
    /// `Immediate` runs start advancing on the next `update` tick.
    /// `ViewportEntry` runs park behind a watch on the timeline's first
    /// scheduled element; if that element is never laid out or is removed
    /// before the crossing, the run is discarded silently.
    pub fn run(&mut self, timeline: Timeline, trigger: TriggerCondition) -> ActiveHandle {
        let id = TimelineId::new();
        let handle = ActiveHandle::new(id);

        let state = match trigger {
            TriggerCondition::Immediate => {
                self.event_queue.push(TimelineEvent::Started { handle });
                TimelineState::Running
            }
            TriggerCondition::ViewportEntry { threshold } => match timeline.first_element() {
                Some(anchor) => {
                    let subscription = self.viewport.watch(anchor, threshold);
                    self.pending_triggers.insert(subscription, id);
                    TimelineState::Waiting
                }
                None => {
                    // An empty timeline has no anchor to observe; degrade to
                    // "never triggered" without an error.
                    debug!(?id, "viewport-gated timeline has no tracks; discarding");
                    self.event_queue.push(TimelineEvent::Discarded { handle });
                    return handle;
                }
            },
        };

        self.runs.insert(
            id,
            TimelineRun {
                timeline,
                state,
                elapsed_ms: 0.0,
            },
        );
        self.dirty = true;

        handle
    }

    /// Cancel a timeline run. Idempotent.
    ///
    /// A waiting run detaches its viewport watch and is dropped outright (it
    /// never touched its elements). A running run freezes at the value it is
    /// currently showing - no snap to either endpoint - and no further
    /// property mutation is scheduled once this returns. Cancelling a
    /// finished, cancelled, or unknown handle does nothing.
    pub fn cancel(&mut self, handle: ActiveHandle) {
        let id = handle.id();
        let Some(state) = self.runs.get(&id).map(|run| run.state) else {
            return;
        };

        match state {
            TimelineState::Waiting => {
                self.detach_trigger(id);
                self.runs.remove(&id);
                self.event_queue.push(TimelineEvent::Cancelled { handle });
                self.dirty = true;
            }
            TimelineState::Running => {
                if let Some(run) = self.runs.get_mut(&id) {
                    run.state = TimelineState::Cancelled;
                }
                self.event_queue.push(TimelineEvent::Cancelled { handle });
                self.dirty = true;
            }
            TimelineState::Finished | TimelineState::Cancelled => {}
        }
    }

    /// Cancel every live run. Teardown convenience for page unmount.
    pub fn cancel_all(&mut self) {
        let live: Vec<TimelineId> = self
            .runs
            .iter()
            .filter(|(_, run)| run.state.is_live())
            .map(|(id, _)| *id)
            .collect();
        for id in live {
            self.cancel(ActiveHandle::new(id));
        }
    }

    /// Advance every running timeline by the given frame delta and release
    /// any viewport-gated runs whose threshold was crossed.
    ///
    /// Call once per frame with the elapsed time in milliseconds. A run
    /// released by a crossing starts advancing on this same tick, so a
    /// gated timeline begins within one frame of its trigger firing.
    pub fn update(&mut self, delta_ms: f32) {
        // Release runs whose viewport trigger fired
        for subscription in self.viewport.poll_crossings() {
            if let Some(id) = self.pending_triggers.remove(&subscription) {
                if let Some(run) = self.runs.get_mut(&id) {
                    if run.state == TimelineState::Waiting {
                        run.state = TimelineState::Running;
                        run.elapsed_ms = 0.0;
                        self.event_queue
                            .push(TimelineEvent::Started { handle: ActiveHandle::new(id) });
                    }
                }
            }
        }

        // Advance running timelines
        let mut any_running = false;
        for (id, run) in self.runs.iter_mut() {
            if run.state != TimelineState::Running {
                continue;
            }
            run.elapsed_ms += delta_ms;
            if run.elapsed_ms >= run.timeline.duration_ms() {
                run.state = TimelineState::Finished;
                self.event_queue
                    .push(TimelineEvent::Ended { handle: ActiveHandle::new(*id) });
            } else {
                any_running = true;
            }
        }

        self.dirty = any_running || !self.event_queue.is_empty();
    }

    /// Get the current animated value for an element property.
    ///
    /// Returns `None` when no visible run animates this property, in which
    /// case the renderer uses the element's resting value.
    pub fn sample(&self, element_id: &str, property: StageProperty) -> Option<f64> {
        self.runs
            .values()
            .filter(|run| run.is_visible())
            .find_map(|run| run.timeline.sample(run.elapsed_ms, element_id, property))
    }

    /// Get every animated property of an element.
    pub fn sample_all(&self, element_id: &str) -> VisualState {
        let mut state = VisualState::new();
        for run in self.runs.values().filter(|run| run.is_visible()) {
            for (property, value) in run.timeline.sample_all(run.elapsed_ms, element_id).iter() {
                state.set(property, value);
            }
        }
        state
    }

    /// State of a run, if it is still known to the choreographer.
    pub fn state_of(&self, handle: ActiveHandle) -> Option<TimelineState> {
        self.runs.get(&handle.id()).map(|run| run.state)
    }

    /// Drop a settled run, releasing its frozen values.
    pub fn release(&mut self, handle: ActiveHandle) {
        if let Some(run) = self.runs.get(&handle.id()) {
            if run.state.is_settled() {
                self.runs.remove(&handle.id());
            }
        }
    }

    /// Drop every settled run.
    pub fn cleanup(&mut self) {
        self.runs.retain(|_, run| !run.state.is_settled());
    }

    /// Remove every run and pending trigger without emitting events.
    pub fn clear_all(&mut self) {
        for (subscription, _) in self.pending_triggers.drain() {
            self.viewport.unwatch(subscription);
        }
        self.runs.clear();
        self.event_queue.clear();
        self.dirty = true;
    }

    // ========================================================================
    // Viewport plumbing
    // ========================================================================

    /// Record the viewport height and current scroll offset.
    pub fn set_viewport_metrics(&mut self, viewport_height: f32, scroll_y: f32) {
        self.viewport.set_metrics(viewport_height, scroll_y);
    }

    /// Record the current scroll offset.
    pub fn set_scroll_y(&mut self, scroll_y: f32) {
        self.viewport.set_scroll_y(scroll_y);
    }

    /// Report an element's absolute top edge in page space.
    pub fn update_element_bounds(&mut self, element_id: impl Into<String>, top: f32) {
        self.viewport.update_bounds(element_id, top);
    }

    /// Forget an element. Runs still parked behind it are discarded silently.
    pub fn remove_element(&mut self, element_id: &str) {
        for subscription in self.viewport.remove_element(element_id) {
            if let Some(id) = self.pending_triggers.remove(&subscription) {
                if self.runs.remove(&id).is_some() {
                    self.event_queue
                        .push(TimelineEvent::Discarded { handle: ActiveHandle::new(id) });
                }
            }
        }
    }

    // ========================================================================
    // Bookkeeping
    // ========================================================================

    /// Number of runs still waiting or advancing.
    pub fn active_count(&self) -> usize {
        self.runs.values().filter(|run| run.state.is_live()).count()
    }

    /// Whether any run still needs per-frame updates.
    pub fn has_active_runs(&self) -> bool {
        self.runs.values().any(|run| run.state.is_live())
    }

    /// Whether anything changed since the dirty flag was last cleared.
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after rendering a frame.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Drain all pending lifecycle events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = TimelineEvent> + '_ {
        self.event_queue.drain()
    }

    /// Check if there are pending events.
    pub fn has_pending_events(&self) -> bool {
        !self.event_queue.is_empty()
    }

    /// Remove and return the oldest pending event.
    pub fn pop_event(&mut self) -> Option<TimelineEvent> {
        self.event_queue.pop()
    }

    fn detach_trigger(&mut self, id: TimelineId) {
        let subscription = self
            .pending_triggers
            .iter()
            .find(|(_, run_id)| **run_id == id)
            .map(|(sub, _)| *sub);
        if let Some(subscription) = subscription {
            self.pending_triggers.remove(&subscription);
            self.viewport.unwatch(subscription);
        }
    }
}
