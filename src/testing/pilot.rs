//! Pilot: drive a view deterministically in tests.
//!
//! The `Pilot` wires a [`View`] to a [`ManualClock`] and a [`WatchList`], so a
//! test decides when time passes and which placeholders are on screen.

use std::time::Duration;

use crate::dom::node::NodeId;
use crate::error::ViewError;
use crate::event::hooks::Hooks;
use crate::lazy::WatchList;
use crate::runtime::ManualClock;
use crate::view::{View, ViewConfig};
use crate::widget::registry::WidgetRegistry;
use crate::widget::traits::Interaction;

use super::snapshot::tree_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A deterministic view driver for testing.
///
/// # Examples
///
/// ```
/// use atomic_view::testing::Pilot;
///
/// let mut pilot = Pilot::new();
/// pilot.render("<card title='Hi'><button label='Go'/></card>").unwrap();
/// pilot.pump();
/// assert_eq!(pilot.snapshot(), "Card: Hi\n  Button: Go");
/// ```
pub struct Pilot {
    view: View,
    clock: ManualClock,
    watch: WatchList,
}

impl Pilot {
    /// A pilot over the built-in widgets with default config.
    pub fn new() -> Self {
        Self::with_registry(WidgetRegistry::with_defaults(), ViewConfig::default())
    }

    /// A pilot over a custom registry and config.
    pub fn with_registry(registry: WidgetRegistry, config: ViewConfig) -> Self {
        let clock = ManualClock::new();
        let watch = WatchList::new();
        let view = View::new(registry, config)
            .with_clock(clock.clone())
            .with_visibility(watch.clone());
        Self { view, clock, watch }
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render into the root host.
    pub fn render(&mut self, markup: &str) -> Result<(), ViewError> {
        let root = self.view.root();
        self.view.render(markup, root)
    }

    /// Install hooks and render into the root host.
    pub fn render_with_hooks(&mut self, markup: &str, hooks: Hooks) -> Result<(), ViewError> {
        let root = self.view.root();
        self.view.render_with_hooks(markup, root, hooks)
    }

    // ── Time and visibility ──────────────────────────────────────────

    /// Run every ready task.
    pub fn pump(&mut self) -> usize {
        self.view.pump()
    }

    /// Move the clock forward, then pump.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.clock.tick(by);
        self.view.pump()
    }

    /// Report every watched placeholder as visible. Returns how many started
    /// their delay.
    pub fn reveal_all(&mut self) -> usize {
        self.watch
            .watched()
            .into_iter()
            .filter(|&node| self.view.notify_visible(node))
            .count()
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Replace a control's text.
    pub fn type_into(&mut self, node: NodeId, text: &str) -> Result<bool, ViewError> {
        self.view.interact(node, Interaction::Input(text.to_owned()))
    }

    pub fn select(&mut self, node: NodeId, index: usize) -> Result<bool, ViewError> {
        self.view.interact(node, Interaction::Select(index))
    }

    pub fn submit(&mut self, node: NodeId) -> Result<bool, ViewError> {
        self.view.interact(node, Interaction::Submit)
    }

    pub fn click(&mut self, node: NodeId) -> Result<bool, ViewError> {
        self.view.interact(node, Interaction::Click)
    }

    // ── Query ────────────────────────────────────────────────────────

    /// The first widget with `tag`, in document order.
    pub fn find(&self, tag: &str) -> Option<NodeId> {
        self.view.find_by_tag(tag).into_iter().next()
    }

    /// Outline of the root host.
    pub fn snapshot(&self) -> String {
        tree_to_string(&self.view, self.view.root())
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// The placeholders currently being watched.
    pub fn watch_list(&self) -> &WatchList {
        &self.watch
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}
