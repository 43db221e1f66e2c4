//! Node types: NodeId, NodeKind, NodeData.

use slotmap::new_key_type;

use crate::engine::context::RenderContext;
use crate::markup::coerce::AttributeBag;

new_key_type! {
    /// Unique identifier for a composed node. Copy, lightweight (u64).
    ///
    /// Hosts and content slots double as insertion points.
    pub struct NodeId;
}

/// What a node stands for in the composed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A top-level render target.
    Host,
    /// A widget instance produced from a registry entry.
    Widget,
    /// A widget's declared child-insertion point.
    Slot,
    /// A lazy placeholder waiting to materialize its markup.
    Placeholder,
}

/// Data associated with a single composed node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Node kind.
    pub kind: NodeKind,
    /// Lowercase tag for widgets; a `#`-prefixed marker for the other kinds.
    pub tag: String,
    /// Coerced attributes the widget was built with.
    pub attrs: AttributeBag,
    /// Whether the widget owns and renders its own inner markup.
    pub atomic: bool,
    /// The widget's child-insertion point, when it declares one.
    pub content_host: Option<NodeId>,
    /// Caller context threaded from the render that created this node.
    pub context: RenderContext,
}

impl NodeData {
    fn with_kind(kind: NodeKind, tag: impl Into<String>) -> Self {
        Self {
            kind,
            tag: tag.into(),
            attrs: AttributeBag::new(),
            atomic: false,
            content_host: None,
            context: RenderContext::default(),
        }
    }

    /// A top-level render target.
    pub fn host() -> Self {
        Self::with_kind(NodeKind::Host, "#host")
    }

    /// A content slot belonging to a widget.
    pub fn slot() -> Self {
        Self::with_kind(NodeKind::Slot, "#slot")
    }

    /// A lazy placeholder.
    pub fn placeholder() -> Self {
        Self::with_kind(NodeKind::Placeholder, "#lazy")
    }

    /// A widget instance for `tag` with its attributes.
    pub fn widget(tag: impl Into<String>, attrs: AttributeBag) -> Self {
        Self {
            attrs,
            ..Self::with_kind(NodeKind::Widget, tag)
        }
    }

    /// Mark the node atomic (builder).
    pub fn atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Attach a render context (builder).
    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }

    /// Hosts and slots accept new children from the composition engine.
    pub fn is_insertion_point(&self) -> bool {
        matches!(self.kind, NodeKind::Host | NodeKind::Slot)
    }

    /// Widgets and placeholders carry a widget instance.
    pub fn has_instance(&self) -> bool {
        matches!(self.kind, NodeKind::Widget | NodeKind::Placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_defaults() {
        let data = NodeData::host();
        assert_eq!(data.kind, NodeKind::Host);
        assert!(data.attrs.is_empty());
        assert!(!data.atomic);
        assert!(data.content_host.is_none());
        assert!(data.is_insertion_point());
        assert!(!data.has_instance());
    }

    #[test]
    fn slot_is_insertion_point() {
        assert!(NodeData::slot().is_insertion_point());
    }

    #[test]
    fn widget_is_not_insertion_point() {
        let data = NodeData::widget("card", AttributeBag::new());
        assert!(!data.is_insertion_point());
        assert!(data.has_instance());
        assert_eq!(data.tag, "card");
    }

    #[test]
    fn placeholder_has_instance() {
        let data = NodeData::placeholder();
        assert_eq!(data.kind, NodeKind::Placeholder);
        assert!(data.has_instance());
        assert!(!data.is_insertion_point());
    }

    #[test]
    fn builder_atomic_and_attrs() {
        let attrs = AttributeBag::from_raw([("title", "t")]);
        let data = NodeData::widget("card", attrs.clone()).atomic(true);
        assert!(data.atomic);
        assert_eq!(data.attrs, attrs);
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
