//! Node arena: slotmap-backed tree of hosts, widgets, slots and placeholders.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{NodeData, NodeId, NodeKind};
pub use tree::Dom;
