//! Runtime: clocks and the deferred-work scheduler.

pub mod clock;
pub mod scheduler;

pub use clock::{Clock, ManualClock, TokioClock};
pub use scheduler::{Scheduler, Task, TimerId};
