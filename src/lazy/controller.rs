//! Lazy deferral: visibility- and time-gated materialization of a subtree.
//!
//! Each placeholder moves through [`LazyState`]:
//!
//! ```text
//! Idle ──mount──▶ Observing ──visible──▶ Pending ──delay──▶ Materialized
//!   │                 │                     │
//!   └─────────────────┴──────teardown───────┘
//! ```
//!
//! Teardown from any state releases the watch and timer and drops the entry.
//! Blank markup skips straight to `Materialized` at mount. The first
//! visibility event wins; later ones are ignored, and leaving the viewport
//! never cancels a pending materialization.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use super::visibility::VisibilitySource;
use crate::dom::node::NodeId;
use crate::markup::{element_to_markup, AttributeBag, Element};
use crate::runtime::scheduler::{Scheduler, Task, TimerId};

/// Attributes that control lazy wrapping; stripped from the deferred markup.
pub const LAZY_ATTRIBUTES: &[&str] = &["lazy", "lazy-load", "lazyLoad", "lazy-delay", "lazyDelay"];

/// Whether a coerced attribute bag asks for lazy wrapping.
pub fn is_lazy(attrs: &AttributeBag) -> bool {
    attrs.is_truthy("lazy") || attrs.is_truthy("lazy-load")
}

// ---------------------------------------------------------------------------
// LazyConfig
// ---------------------------------------------------------------------------

/// What a placeholder will render and when.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyConfig {
    /// Delay between first visibility and materialization.
    pub delay: Duration,
    /// The element's own markup, lazy attributes removed.
    pub markup: String,
}

impl LazyConfig {
    /// Build a config from a lazy element.
    ///
    /// A non-negative numeric `lazy-delay` (milliseconds) overrides
    /// `default_delay`. Values too large for a [`Duration`] are ignored.
    pub fn from_element(element: &Element, attrs: &AttributeBag, default_delay: Duration) -> Self {
        let delay = attrs
            .get_number("lazy-delay")
            .filter(|ms| *ms >= 0.0)
            .and_then(|ms| Duration::try_from_secs_f64(ms / 1000.0).ok())
            .unwrap_or(default_delay);
        Self {
            delay,
            markup: element_to_markup(&element.without_attributes(LAZY_ATTRIBUTES)),
        }
    }
}

// ---------------------------------------------------------------------------
// LazyState
// ---------------------------------------------------------------------------

/// Lifecycle state of one lazy placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LazyState {
    Idle,
    Observing,
    Pending,
    Materialized,
}

#[derive(Debug)]
struct Entry {
    config: LazyConfig,
    state: LazyState,
    timer: Option<TimerId>,
}

// ---------------------------------------------------------------------------
// LazyController
// ---------------------------------------------------------------------------

/// Owns the state machine of every live placeholder.
///
/// Entries are removed on disposal, so a torn-down placeholder reports
/// `None` from [`state`](Self::state).
#[derive(Debug, Default)]
pub struct LazyController {
    entries: HashMap<NodeId, Entry>,
}

impl LazyController {
    /// An empty controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new placeholder in `Idle`.
    pub fn insert(&mut self, node: NodeId, config: LazyConfig) {
        self.entries.insert(
            node,
            Entry {
                config,
                state: LazyState::Idle,
                timer: None,
            },
        );
    }

    /// The placeholder's insertion point exists: start watching.
    ///
    /// Returns the new state, or `None` for an unknown or already mounted
    /// placeholder.
    pub fn mount(&mut self, node: NodeId, visibility: &mut dyn VisibilitySource) -> Option<LazyState> {
        let entry = self.entries.get_mut(&node)?;
        if entry.state != LazyState::Idle {
            return None;
        }
        entry.state = if entry.config.markup.trim().is_empty() {
            LazyState::Materialized
        } else {
            visibility.observe(node);
            LazyState::Observing
        };
        debug!(?node, state = ?entry.state, "lazy placeholder mounted");
        Some(entry.state)
    }

    /// First visibility event: arm the delay timer.
    ///
    /// Returns `true` only for the `Observing → Pending` transition.
    pub fn reveal(&mut self, node: NodeId, scheduler: &mut Scheduler) -> bool {
        let Some(entry) = self.entries.get_mut(&node) else {
            return false;
        };
        if entry.state != LazyState::Observing {
            return false;
        }
        entry.timer = Some(scheduler.set_timeout(entry.config.delay, Task::Materialize(node)));
        entry.state = LazyState::Pending;
        debug!(?node, delay = ?entry.config.delay, "lazy placeholder pending");
        true
    }

    /// The delay elapsed: release the watch and hand back the markup to render.
    ///
    /// Returns `None` unless the placeholder is `Pending`.
    pub fn materialize(
        &mut self,
        node: NodeId,
        visibility: &mut dyn VisibilitySource,
    ) -> Option<String> {
        let entry = self.entries.get_mut(&node)?;
        if entry.state != LazyState::Pending {
            return None;
        }
        visibility.unobserve(node);
        entry.timer = None;
        entry.state = LazyState::Materialized;
        debug!(?node, "lazy placeholder materialized");
        Some(entry.config.markup.clone())
    }

    /// Teardown: release any watch or timer and forget the placeholder.
    ///
    /// Returns the state it was in, or `None` if it was not tracked.
    pub fn dispose(
        &mut self,
        node: NodeId,
        visibility: &mut dyn VisibilitySource,
        scheduler: &mut Scheduler,
    ) -> Option<LazyState> {
        let entry = self.entries.remove(&node)?;
        if matches!(entry.state, LazyState::Observing | LazyState::Pending) {
            visibility.unobserve(node);
        }
        if let Some(timer) = entry.timer {
            scheduler.cancel(timer);
        }
        if entry.state != LazyState::Materialized {
            debug!(?node, from = ?entry.state, "lazy placeholder disposed");
        }
        Some(entry.state)
    }

    /// Current state of a tracked placeholder.
    pub fn state(&self, node: NodeId) -> Option<LazyState> {
        self.entries.get(&node).map(|entry| entry.state)
    }

    /// Config of a tracked placeholder.
    pub fn config(&self, node: NodeId) -> Option<&LazyConfig> {
        self.entries.get(&node).map(|entry| &entry.config)
    }

    /// Number of tracked placeholders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no placeholder is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
