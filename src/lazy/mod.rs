//! Lazy deferral: placeholders that render their markup after becoming visible.

pub mod controller;
pub mod visibility;

pub use controller::{is_lazy, LazyConfig, LazyController, LazyState, LAZY_ATTRIBUTES};
pub use visibility::{VisibilitySource, WatchList};
