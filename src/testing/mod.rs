//! Headless testing helpers: Pilot, outline snapshots.
//!
//! Use the [`Pilot`] to drive a [`View`](crate::view::View) on a manual clock
//! with test-controlled visibility. Use [`tree_to_string`] to capture the
//! composed tree as an indented outline for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{node_line, subtree_to_string, tree_to_string};
