//! Timeline lifecycle events.
//!
//! This module provides event types and an event queue for tracking timeline
//! lifecycle changes (start, end, cancel, discard). Events can be polled
//! after each choreographer update to respond to state changes.
//!
//! # Usage
//!
//! ```ignore
//! use unveil_choreo::{Choreographer, TimelineEvent};
//!
//! let mut choreographer = Choreographer::new();
//!
//! // Start some timelines...
//! choreographer.run(timeline, TriggerCondition::Immediate);
//!
//! // Update per frame
//! choreographer.update(16.67);
//!
//! // Poll events
//! for event in choreographer.drain_events() {
//!     match event {
//!         TimelineEvent::Ended { handle } => {
//!             println!("Timeline {:?} finished", handle);
//!         }
//!         _ => {}
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::choreographer::ActiveHandle;

/// Event emitted when a timeline run changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEvent {
    /// The timeline began advancing (its trigger fired or it was immediate).
    Started {
        /// Handle of the timeline run.
        handle: ActiveHandle,
    },
    /// The timeline completed every track.
    Ended {
        /// Handle of the timeline run.
        handle: ActiveHandle,
    },
    /// The timeline was cancelled before completion.
    Cancelled {
        /// Handle of the timeline run.
        handle: ActiveHandle,
    },
    /// The timeline's watched element vanished before its trigger fired.
    /// A degenerate case, not an error: the timeline simply never ran.
    Discarded {
        /// Handle of the timeline run.
        handle: ActiveHandle,
    },
}

impl TimelineEvent {
    /// Get the handle for this event.
    pub fn handle(&self) -> ActiveHandle {
        match self {
            Self::Started { handle }
            | Self::Ended { handle }
            | Self::Cancelled { handle }
            | Self::Discarded { handle } => *handle,
        }
    }

    /// Check if this is a start event.
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }

    /// Check if this is a terminal event (ended, cancelled, or discarded).
    pub fn is_terminal(&self) -> bool {
        !self.is_started()
    }
}

/// Queue of timeline events awaiting consumption.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<TimelineEvent>,
}

impl EventQueue {
    /// Create a new empty event queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event to the queue.
    pub fn push(&mut self, event: TimelineEvent) {
        self.events.push_back(event);
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get the number of queued events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Remove and return the oldest event.
    pub fn pop(&mut self) -> Option<TimelineEvent> {
        self.events.pop_front()
    }

    /// Drain all events from the queue.
    pub fn drain(&mut self) -> impl Iterator<Item = TimelineEvent> + '_ {
        self.events.drain(..)
    }

    /// Look at the oldest event without removing it.
    pub fn peek(&self) -> Option<&TimelineEvent> {
        self.events.front()
    }

    /// Clear all events without processing them.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimelineId;

    fn handle() -> ActiveHandle {
        ActiveHandle::new(TimelineId::new())
    }

    #[test]
    fn test_queue_order() {
        let mut queue = EventQueue::new();
        let a = handle();
        let b = handle();

        queue.push(TimelineEvent::Started { handle: a });
        queue.push(TimelineEvent::Ended { handle: b });

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(TimelineEvent::Started { handle: a }));
        assert_eq!(queue.pop(), Some(TimelineEvent::Ended { handle: b }));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_drain() {
        let mut queue = EventQueue::new();
        queue.push(TimelineEvent::Started { handle: handle() });
        queue.push(TimelineEvent::Cancelled { handle: handle() });

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_peek_and_clear() {
        let mut queue = EventQueue::new();
        let a = handle();
        queue.push(TimelineEvent::Started { handle: a });

        assert_eq!(queue.peek(), Some(&TimelineEvent::Started { handle: a }));
        assert_eq!(queue.len(), 1);

        queue.clear();
        assert!(queue.peek().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_predicates() {
        let h = handle();
        assert!(TimelineEvent::Started { handle: h }.is_started());
        assert!(TimelineEvent::Ended { handle: h }.is_terminal());
        assert!(TimelineEvent::Cancelled { handle: h }.is_terminal());
        assert!(TimelineEvent::Discarded { handle: h }.is_terminal());
        assert_eq!(TimelineEvent::Ended { handle: h }.handle(), h);
    }
}
