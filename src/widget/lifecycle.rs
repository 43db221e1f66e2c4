//! Widget lifecycle: attach, mount, update, release.
//!
//! The `LifecycleTracker` records which widgets are live and which have had
//! their mount turn, and accumulates [`LifecycleEvent`]s that a host (or a
//! test) drains with [`View::drain_lifecycle`](crate::view::View::drain_lifecycle).

use std::collections::HashSet;

use crate::dom::node::NodeId;

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Events that occur during a widget's life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A widget instance was attached to the tree.
    Attach { node_id: NodeId, tag: String },
    /// The widget's mount turn ran.
    Mount { node_id: NodeId },
    /// Attributes or owned markup of a live widget were replaced.
    Update { node_id: NodeId },
    /// The widget was released.
    Release { node_id: NodeId },
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// Tracks live and mounted widgets and queues lifecycle events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    live: HashSet<NodeId>,
    mounted: HashSet<NodeId>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    /// Create a new, empty lifecycle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a widget was attached.
    pub fn on_attach(&mut self, id: NodeId, tag: &str) {
        if self.live.insert(id) {
            self.pending.push(LifecycleEvent::Attach {
                node_id: id,
                tag: tag.to_owned(),
            });
        }
    }

    /// Record the mount turn. Returns `false` for unknown or already mounted
    /// widgets, which must not be mounted again.
    pub fn on_mount(&mut self, id: NodeId) -> bool {
        if !self.live.contains(&id) || !self.mounted.insert(id) {
            return false;
        }
        self.pending.push(LifecycleEvent::Mount { node_id: id });
        true
    }

    /// Record that a live widget was updated.
    pub fn on_update(&mut self, id: NodeId) {
        if self.live.contains(&id) {
            self.pending.push(LifecycleEvent::Update { node_id: id });
        }
    }

    /// Record that a widget was released. No-op for unknown widgets.
    pub fn on_release(&mut self, id: NodeId) {
        self.mounted.remove(&id);
        if self.live.remove(&id) {
            self.pending.push(LifecycleEvent::Release { node_id: id });
        }
    }

    /// Whether the widget is attached and not yet released.
    pub fn is_live(&self, id: NodeId) -> bool {
        self.live.contains(&id)
    }

    /// Whether the widget has had its mount turn.
    pub fn is_mounted(&self, id: NodeId) -> bool {
        self.mounted.contains(&id)
    }

    /// Number of live widgets.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of mounted widgets.
    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    /// Drain and return all pending lifecycle events.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Whether there are any pending events.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
