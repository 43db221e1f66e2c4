//! Signal dispatch: envelope queue and bubble path computation.
//!
//! [`EventDispatcher`] maintains a FIFO of [`Envelope`]s. The `bubble_path`
//! static method computes the traversal order from a node up to its host,
//! which the view uses to find the form enclosing a control.

use std::collections::VecDeque;

use super::message::Envelope;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// Queue-based signal dispatcher.
///
/// Envelopes are enqueued via `push` and taken one at a time via `pop`, so
/// signals emitted while routing an earlier one are delivered after it.
#[derive(Debug)]
pub struct EventDispatcher {
    queue: VecDeque<Envelope>,
}

impl EventDispatcher {
    /// Create a new, empty dispatcher.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Enqueue an envelope for later delivery.
    pub fn push(&mut self, envelope: Envelope) {
        self.queue.push_back(envelope);
    }

    /// Take the oldest pending envelope.
    pub fn pop(&mut self) -> Option<Envelope> {
        self.queue.pop_front()
    }

    /// Drain all pending envelopes.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    /// Drop pending envelopes from `sender`.
    pub fn discard_from(&mut self, sender: NodeId) {
        self.queue.retain(|env| env.sender != sender);
    }

    /// Number of pending envelopes.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Compute the bubble path from `start` up to its host (inclusive).
    ///
    /// Returns `[start, parent, grandparent, ..., host]`.
    /// If `start` does not exist in the tree, returns an empty vec.
    pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<NodeId> {
        if !dom.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        path.extend(dom.ancestors(start));
        path
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;
    use crate::event::message::Signal;
    use crate::markup::{AttrValue, AttributeBag};

    /// ```text
    ///     host
    ///      └ form
    ///         └ #slot
    ///            └ input
    /// ```
    fn build_tree() -> (Dom, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let host = dom.insert(NodeData::host());
        let form = dom.insert_child(host, NodeData::widget("form", AttributeBag::new()));
        let slot = dom.insert_child(form, NodeData::slot());
        let input = dom.insert_child(slot, NodeData::widget("input", AttributeBag::new()));
        (dom, host, form, slot, input)
    }

    fn changed(value: &str) -> Signal {
        Signal::Changed {
            name: None,
            value: AttrValue::from(value),
        }
    }

    // ── Push / Pop ───────────────────────────────────────────────────

    #[test]
    fn new_dispatcher_is_empty() {
        let disp = EventDispatcher::default();
        assert!(disp.is_empty());
        assert_eq!(disp.pending_count(), 0);
    }

    #[test]
    fn pop_preserves_order() {
        let (_, _, form, _, input) = build_tree();
        let mut disp = EventDispatcher::new();
        disp.push(Envelope::new(changed("a"), input));
        disp.push(Envelope::new(Signal::Clicked, form));

        assert_eq!(disp.pop().map(|e| e.sender), Some(input));
        assert_eq!(disp.pop().map(|e| e.signal), Some(Signal::Clicked));
        assert!(disp.pop().is_none());
    }

    #[test]
    fn drain_empties_queue() {
        let (_, host, ..) = build_tree();
        let mut disp = EventDispatcher::new();
        disp.push(Envelope::new(Signal::Clicked, host));
        disp.push(Envelope::new(Signal::Clicked, host));
        assert_eq!(disp.drain().len(), 2);
        assert!(disp.is_empty());
    }

    #[test]
    fn discard_from_sender() {
        let (_, _, form, _, input) = build_tree();
        let mut disp = EventDispatcher::new();
        disp.push(Envelope::new(changed("a"), input));
        disp.push(Envelope::new(Signal::Clicked, form));
        disp.discard_from(input);
        assert_eq!(disp.pending_count(), 1);
    }

    // ── Bubble path ──────────────────────────────────────────────────

    #[test]
    fn bubble_path_from_leaf() {
        let (dom, host, form, slot, input) = build_tree();
        assert_eq!(
            EventDispatcher::bubble_path(&dom, input),
            vec![input, slot, form, host]
        );
    }

    #[test]
    fn bubble_path_from_host() {
        let (dom, host, ..) = build_tree();
        assert_eq!(EventDispatcher::bubble_path(&dom, host), vec![host]);
    }

    #[test]
    fn bubble_path_nonexistent_node() {
        let (mut dom, ..) = build_tree();
        let stale = dom.insert(NodeData::host());
        dom.remove(stale);
        assert!(EventDispatcher::bubble_path(&dom, stale).is_empty());
    }
}
