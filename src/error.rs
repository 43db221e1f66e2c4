//! Error types surfaced by widgets and by the view's public operations.
//!
//! Markup errors live next to the parser ([`crate::markup::ParseError`]) and
//! are shown inline rather than returned.

use crate::dom::NodeId;

/// A widget could not take an attribute value.
///
/// The composition engine logs these and keeps going; they never abort a render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    #[error("attribute `{name}`: {reason}")]
    InvalidAttribute { name: String, reason: String },
}

impl WidgetError {
    /// Shorthand for [`WidgetError::InvalidAttribute`].
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Misuse of a [`View`](crate::view::View) handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    #[error("node {0:?} is not an insertion point")]
    NotAnInsertionPoint(NodeId),
    #[error("node {0:?} has no widget instance")]
    NoWidget(NodeId),
    #[error("widget at {0:?} is not atomic")]
    NotAtomic(NodeId),
    #[error("node {0:?} is a content slot; destroy its widget instead")]
    ContentSlot(NodeId),
    #[error("the root host cannot be destroyed")]
    RootHost,
}
