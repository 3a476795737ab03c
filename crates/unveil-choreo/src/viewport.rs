//! Viewport-entry subscriptions for scroll-gated timelines.
//!
//! `ViewportTracker` is the subscription-based event source that decouples
//! the choreographer from any particular scroll-observation mechanism. The
//! page reports viewport metrics and element bounds as it learns them; the
//! tracker answers, once per subscription, "has this element crossed the
//! threshold line yet?".
//!
//! A watch fires when the element's top edge rises above the threshold
//! fraction of the viewport height:
//!
//! ```text
//! element_top - scroll_y <= threshold * viewport_height
//! ```
//!
//! Watches fire at most once; scrolling back out and in again does not
//! re-fire. Removing an element silently discards its pending watches - a
//! page tearing down before layout completes is a legitimate degenerate
//! case, not an error.

use std::collections::HashMap;

use tracing::debug;

/// Threshold used by entrance choreography when none is given, matching the
/// "start when the element top reaches 80% of the viewport" convention.
pub const DEFAULT_ENTRY_THRESHOLD: f32 = 0.8;

/// Identifier for a viewport watch registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportSubscription(u64);

#[derive(Debug, Clone)]
struct Watch {
    element_id: String,
    threshold: f32,
    fired: bool,
}

/// Tracks element bounds against the viewport and fires entry subscriptions.
#[derive(Debug)]
pub struct ViewportTracker {
    viewport_height: f32,
    scroll_y: f32,
    /// Absolute page-space top edge per element.
    bounds: HashMap<String, f32>,
    watches: HashMap<ViewportSubscription, Watch>,
    next_subscription: u64,
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportTracker {
    /// Create a tracker with no viewport metrics yet.
    pub fn new() -> Self {
        Self {
            viewport_height: 0.0,
            scroll_y: 0.0,
            bounds: HashMap::new(),
            watches: HashMap::new(),
            next_subscription: 1,
        }
    }

    /// Record the viewport height and current scroll offset.
    pub fn set_metrics(&mut self, viewport_height: f32, scroll_y: f32) {
        self.viewport_height = viewport_height;
        self.scroll_y = scroll_y;
    }

    /// Record the current scroll offset.
    pub fn set_scroll_y(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y;
    }

    /// Report an element's absolute top edge in page space.
    pub fn update_bounds(&mut self, element_id: impl Into<String>, top: f32) {
        self.bounds.insert(element_id.into(), top);
    }

    /// Forget an element. Pending watches on it are silently discarded and
    /// reported as dropped so owners can release parked timelines.
    pub fn remove_element(&mut self, element_id: &str) -> Vec<ViewportSubscription> {
        self.bounds.remove(element_id);
        let dropped: Vec<ViewportSubscription> = self
            .watches
            .iter()
            .filter(|(_, w)| !w.fired && w.element_id == element_id)
            .map(|(id, _)| *id)
            .collect();
        for id in &dropped {
            self.watches.remove(id);
        }
        if !dropped.is_empty() {
            debug!(element_id, count = dropped.len(), "discarded viewport watches");
        }
        dropped
    }

    /// Register a one-shot watch for an element crossing the threshold.
    ///
    /// The threshold is a fraction of viewport height and clamps to [0, 1];
    /// registration never fails, even for elements with no reported bounds.
    pub fn watch(&mut self, element_id: impl Into<String>, threshold: f32) -> ViewportSubscription {
        let id = ViewportSubscription(self.next_subscription);
        self.next_subscription += 1;
        self.watches.insert(
            id,
            Watch {
                element_id: element_id.into(),
                threshold: threshold.clamp(0.0, 1.0),
                fired: false,
            },
        );
        id
    }

    /// Detach a watch. Unknown or already-fired subscriptions are a no-op.
    pub fn unwatch(&mut self, subscription: ViewportSubscription) {
        self.watches.remove(&subscription);
    }

    /// Whether a subscription is still registered and waiting.
    pub fn is_pending(&self, subscription: ViewportSubscription) -> bool {
        self.watches
            .get(&subscription)
            .is_some_and(|w| !w.fired)
    }

    /// Evaluate every pending watch against the current metrics, returning
    /// the subscriptions that crossed their threshold this poll. Fired
    /// watches are consumed; they never fire again.
    pub fn poll_crossings(&mut self) -> Vec<ViewportSubscription> {
        if self.viewport_height <= 0.0 {
            return Vec::new();
        }

        let mut fired = Vec::new();
        for (id, watch) in self.watches.iter_mut() {
            if watch.fired {
                continue;
            }
            let Some(top) = self.bounds.get(&watch.element_id) else {
                continue;
            };
            if top - self.scroll_y <= watch.threshold * self.viewport_height {
                watch.fired = true;
                fired.push(*id);
            }
        }
        self.watches.retain(|_, w| !w.fired);
        fired
    }
}
