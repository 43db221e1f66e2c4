//! Tree queries: by tag, by kind, generic predicate matching.

use super::node::{NodeData, NodeId, NodeKind};
use super::tree::Dom;

impl Dom {
    /// Find all widget nodes under `start` (inclusive) whose tag matches,
    /// in document order. Matching is case-insensitive.
    pub fn query_by_tag(&self, start: NodeId, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_lowercase();
        self.walk_depth_first(start)
            .into_iter()
            .filter(|&id| {
                self.get(id)
                    .is_some_and(|data| data.kind == NodeKind::Widget && data.tag == tag)
            })
            .collect()
    }

    /// Find all nodes of the given kind, in arena order.
    pub fn query_by_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        self.query_all(|data| data.kind == kind)
    }

    /// Find all nodes matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, data)| predicate(data))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// The nearest ancestor matching `predicate`, skipping `id` itself.
    pub fn closest(&self, id: NodeId, predicate: impl Fn(&NodeData) -> bool) -> Option<NodeId> {
        self.ancestors(id)
            .into_iter()
            .find(|&ancestor| self.get(ancestor).is_some_and(&predicate))
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::{NodeData, NodeKind};
    use crate::dom::tree::Dom;
    use crate::markup::AttributeBag;

    /// ```text
    ///   host
    ///    └ form
    ///       └ #slot
    ///          ├ input
    ///          └ card (atomic)
    ///             └ label
    /// ```
    fn build_query_tree() -> (Dom, crate::dom::NodeId) {
        let mut dom = Dom::new();
        let host = dom.insert(NodeData::host());
        let form = dom.insert_child(host, NodeData::widget("form", AttributeBag::new()));
        let slot = dom.insert_child(form, NodeData::slot());
        let _input = dom.insert_child(slot, NodeData::widget("input", AttributeBag::new()));
        let card = dom.insert_child(
            slot,
            NodeData::widget("card", AttributeBag::new()).atomic(true),
        );
        dom.insert_child(card, NodeData::widget("label", AttributeBag::new()));
        (dom, host)
    }

    #[test]
    fn query_by_tag_case_insensitive() {
        let (dom, host) = build_query_tree();
        assert_eq!(dom.query_by_tag(host, "INPUT").len(), 1);
        assert_eq!(dom.query_by_tag(host, "label").len(), 1);
        assert!(dom.query_by_tag(host, "select").is_empty());
    }

    #[test]
    fn query_by_kind_counts_slots() {
        let (dom, _) = build_query_tree();
        assert_eq!(dom.query_by_kind(NodeKind::Slot).len(), 1);
        assert_eq!(dom.query_by_kind(NodeKind::Host).len(), 1);
    }

    #[test]
    fn query_all_atomic() {
        let (dom, _) = build_query_tree();
        let atomic = dom.query_all(|data| data.atomic);
        assert_eq!(atomic.len(), 1);
    }

    #[test]
    fn closest_finds_enclosing_form() {
        let (dom, host) = build_query_tree();
        let label = dom.query_by_tag(host, "label")[0];
        let form = dom.query_by_tag(host, "form")[0];
        assert_eq!(dom.closest(label, |d| d.tag == "form"), Some(form));
        assert_eq!(dom.closest(form, |d| d.tag == "form"), None);
    }

    #[test]
    fn query_on_empty_dom() {
        let dom = Dom::new();
        assert!(dom.query_all(|_| true).is_empty());
    }
}
