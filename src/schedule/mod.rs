//! Virtual-time timer queue.
//!
//! The engine has two kinds of delayed work: the mismatch revert and the
//! auto-play step. Both are scheduled on a [`Timeline`], a single-threaded
//! clock that only moves when the driver advances it. Tests and headless
//! runs get exact, repeatable timing; a real UI advances it from its own
//! frame or timer callbacks.
//!
//! ## Ordering
//!
//! - Earliest deadline fires first
//! - Equal deadlines fire in scheduling order
//! - Firing a timer moves the clock to its deadline
//!
//! ```
//! use concentration::schedule::Timeline;
//!
//! let mut timeline = Timeline::new();
//! timeline.schedule_in(1000, "revert");
//! timeline.schedule_in(200, "step");
//!
//! assert_eq!(timeline.pop_due(500).map(|(_, t)| t), Some("step"));
//! assert_eq!(timeline.now(), 200);
//! assert!(timeline.pop_due(500).is_none());
//! assert_eq!(timeline.pop_due(1000).map(|(_, t)| t), Some("revert"));
//! ```

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Handle for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// Timer queue over a virtual millisecond clock.
#[derive(Clone, Debug)]
pub struct Timeline<T> {
    now: u64,
    next_id: u64,
    /// (deadline, id); ids grow monotonically so ties keep FIFO order.
    queue: BinaryHeap<Reverse<(u64, u64)>>,
    /// Pending tasks keyed by id.
    tasks: FxHashMap<u64, T>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 0,
            queue: BinaryHeap::new(),
            tasks: FxHashMap::default(),
        }
    }
}

impl<T> Timeline<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of live timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Schedule `task` to fire `delay_ms` from now.
    pub fn schedule_in(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        let deadline = self.now.saturating_add(delay_ms);
        self.queue.push(Reverse((deadline, id)));
        self.tasks.insert(id, task);
        log::trace!("timer {} scheduled for t={}", id, deadline);
        TimerId(id)
    }

    /// Deadline of the next timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse((deadline, _))| *deadline)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, T)> {
        let deadline = self.next_deadline()?;
        if deadline > until {
            return None;
        }
        let Reverse((deadline, id)) = self.queue.pop()?;
        let task = self.tasks.remove(&id)?;
        self.now = self.now.max(deadline);
        Some((TimerId(id), task))
    }

    /// Move the clock forward without firing anything. Never moves back.
    pub fn advance_to(&mut self, ms: u64) {
        self.now = self.now.max(ms);
    }

    /// Drop every timer. The clock keeps its value.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.tasks.clear();
    }
}
