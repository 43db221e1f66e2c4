//! Visibility sources: who tells a lazy placeholder it entered the viewport.
//!
//! The controller only subscribes and unsubscribes; the host delivers the
//! actual "became visible" event through
//! [`View::notify_visible`](crate::view::View::notify_visible).

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::dom::node::NodeId;

/// Subscription surface for entering-viewport events.
pub trait VisibilitySource {
    /// Start watching `node`.
    fn observe(&mut self, node: NodeId);

    /// Stop watching `node`. Unknown nodes are ignored.
    fn unobserve(&mut self, node: NodeId);
}

/// A visibility source that just records which nodes are watched.
///
/// Clones share the same set, so a test or a host loop can keep a handle and
/// inspect or reveal the watched placeholders.
#[derive(Debug, Clone, Default)]
pub struct WatchList {
    watched: Rc<RefCell<BTreeSet<NodeId>>>,
}

impl WatchList {
    /// An empty watch list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently watched nodes, in key order.
    pub fn watched(&self) -> Vec<NodeId> {
        self.watched.borrow().iter().copied().collect()
    }

    /// Whether `node` is being watched.
    pub fn is_watched(&self, node: NodeId) -> bool {
        self.watched.borrow().contains(&node)
    }

    /// Number of active watches.
    pub fn len(&self) -> usize {
        self.watched.borrow().len()
    }

    /// Whether nothing is watched.
    pub fn is_empty(&self) -> bool {
        self.watched.borrow().is_empty()
    }
}

impl VisibilitySource for WatchList {
    fn observe(&mut self, node: NodeId) {
        self.watched.borrow_mut().insert(node);
    }

    fn unobserve(&mut self, node: NodeId) {
        self.watched.borrow_mut().remove(&node);
    }
}
