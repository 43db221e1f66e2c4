//! Event system: signals, dispatch queue, hooks, and the bridge to the caller.

pub mod bridge;
pub mod handler;
pub mod hooks;
pub mod message;

pub use bridge::EventBridge;
pub use handler::EventDispatcher;
pub use hooks::{FormEvent, Hooks, InputChangeEvent};
pub use message::{Envelope, FormValues, Signal};
