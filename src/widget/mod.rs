//! Widget system: capability trait, registry, lifecycle tracking.

pub mod lifecycle;
pub mod registry;
pub mod traits;

pub use lifecycle::{LifecycleEvent, LifecycleTracker};
pub use registry::{WidgetDescriptor, WidgetFactory, WidgetRegistry};
pub use traits::{Command, FormRoot, Interaction, Signals, Widget, WidgetContext};
