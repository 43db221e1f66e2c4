//! Composition engine: the recursive composer and the caller context it threads.

pub mod composer;
pub mod context;

pub use composer::UNKNOWN_TAG_COLOR;
pub use context::RenderContext;
