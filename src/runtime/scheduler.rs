//! Deferred work: a next-turn queue plus one-shot timers.
//!
//! Nothing here runs on its own. The [`View`](crate::view::View) pulls ready
//! tasks with [`Scheduler::next_ready`] from `pump`, so every suspension point
//! is explicit and testable.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use super::clock::Clock;
use crate::dom::node::NodeId;

new_key_type! {
    /// Handle for a pending timer.
    pub struct TimerId;
}

/// Work the view performs when a task comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Tell a freshly attached widget that its insertion point is ready.
    Mount(NodeId),
    /// Render a lazy placeholder's deferred markup.
    Materialize(NodeId),
}

impl Task {
    /// The node this task targets.
    pub fn node(&self) -> NodeId {
        match *self {
            Task::Mount(id) | Task::Materialize(id) => id,
        }
    }
}

#[derive(Debug)]
struct Timer {
    deadline: Duration,
    seq: u64,
    task: Task,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Owns the clock, the next-turn queue and the timer table.
pub struct Scheduler {
    clock: Box<dyn Clock>,
    next_turn: VecDeque<Task>,
    timers: SlotMap<TimerId, Timer>,
    seq: u64,
}

impl Scheduler {
    /// Create a scheduler reading time from `clock`.
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            next_turn: VecDeque::new(),
            timers: SlotMap::with_key(),
            seq: 0,
        }
    }

    /// Queue `task` for the next turn.
    pub fn defer(&mut self, task: Task) {
        self.next_turn.push_back(task);
    }

    /// Run `task` once `delay` has elapsed from now.
    pub fn set_timeout(&mut self, delay: Duration, task: Task) -> TimerId {
        self.seq += 1;
        let deadline = self.clock.elapsed().saturating_add(delay);
        self.timers.insert(Timer {
            deadline,
            seq: self.seq,
            task,
        })
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    /// Drop next-turn tasks queued for a torn-down node.
    pub fn forget(&mut self, node: NodeId) {
        self.next_turn.retain(|task| task.node() != node);
    }

    /// Take the next task that may run now.
    ///
    /// Next-turn work goes first; then the earliest due timer, ties broken by
    /// the order the timers were set.
    pub fn next_ready(&mut self) -> Option<Task> {
        if let Some(task) = self.next_turn.pop_front() {
            return Some(task);
        }
        let now = self.clock.elapsed();
        let due = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .min_by_key(|(_, timer)| (timer.deadline, timer.seq))
            .map(|(id, _)| id)?;
        self.timers.remove(due).map(|timer| timer.task)
    }

    /// The earliest pending deadline, if any timer is set.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.values().map(|timer| timer.deadline).min()
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.clock.elapsed()
    }

    /// The underlying clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Number of timers still waiting.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of next-turn tasks still queued.
    pub fn queued(&self) -> usize {
        self.next_turn.len()
    }

    /// Whether any work at all is outstanding.
    pub fn is_idle(&self) -> bool {
        self.next_turn.is_empty() && self.timers.is_empty()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.clock.elapsed())
            .field("next_turn", &self.next_turn)
            .field("timers", &self.timers.len())
            .finish()
    }
}
