//! View: the composed tree plus everything that drives it.
//!
//! [`View`] owns the node arena, widget instances, registry, scheduler, lazy
//! controller, event bridge and lifecycle tracker. Hosts call [`View::render`]
//! to compose markup at an insertion point, [`View::pump`] (or
//! [`View::settle`]) to run deferred work, and [`View::interact`] to feed
//! input into widgets.

use std::time::Duration;

use slotmap::SecondaryMap;

use crate::dom::node::{NodeData, NodeId, NodeKind};
use crate::dom::tree::Dom;
use crate::engine::context::RenderContext;
use crate::error::ViewError;
use crate::event::bridge::EventBridge;
use crate::event::handler::EventDispatcher;
use crate::event::hooks::Hooks;
use crate::event::message::FormValues;
use crate::lazy::{LazyController, LazyState, VisibilitySource, WatchList};
use crate::markup::AttributeBag;
use crate::runtime::clock::{Clock, TokioClock};
use crate::runtime::scheduler::Scheduler;
use crate::widget::lifecycle::{LifecycleEvent, LifecycleTracker};
use crate::widget::registry::WidgetRegistry;
use crate::widget::traits::{Interaction, Widget};

// ---------------------------------------------------------------------------
// ViewConfig
// ---------------------------------------------------------------------------

/// What the composer does with a tag the registry does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTagPolicy {
    /// Drop the element and compose its children in its place.
    #[default]
    Flatten,
    /// Render an inert warning label naming the tag.
    Annotate,
}

/// Configuration for a [`View`].
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Default wait between a lazy element becoming visible and materializing.
    pub lazy_delay: Duration,
    /// Unknown tag handling.
    pub unknown_tags: UnknownTagPolicy,
    /// Prepended to the parser message in the inline error display.
    pub error_prefix: String,
    /// Color of the inline error display.
    pub error_color: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            lazy_delay: Duration::from_millis(2000),
            unknown_tags: UnknownTagPolicy::Flatten,
            error_prefix: "Invalid markup: ".to_owned(),
            error_color: "#b91c1c".to_owned(),
        }
    }
}

impl ViewConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default lazy delay (builder).
    pub fn with_lazy_delay(mut self, delay: Duration) -> Self {
        self.lazy_delay = delay;
        self
    }

    /// Set the unknown tag policy (builder).
    pub fn with_unknown_tags(mut self, policy: UnknownTagPolicy) -> Self {
        self.unknown_tags = policy;
        self
    }

    /// Set the error display prefix (builder).
    pub fn with_error_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.error_prefix = prefix.into();
        self
    }

    /// Set the error display color (builder).
    pub fn with_error_color(mut self, color: impl Into<String>) -> Self {
        self.error_color = color.into();
        self
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// A composed widget tree and its runtime.
///
/// A view is created with one root host. More hosts can be added with
/// [`View::create_host`]; every widget's content slot is an insertion point
/// as well.
pub struct View {
    pub(crate) dom: Dom,
    pub(crate) widgets: SecondaryMap<NodeId, Box<dyn Widget>>,
    pub(crate) registry: WidgetRegistry,
    pub(crate) scheduler: Scheduler,
    pub(crate) lazy: LazyController,
    pub(crate) visibility: Box<dyn VisibilitySource>,
    pub(crate) bridge: EventBridge,
    pub(crate) dispatcher: EventDispatcher,
    pub(crate) lifecycle: LifecycleTracker,
    pub(crate) config: ViewConfig,
    pub(crate) delivering: bool,
    root: NodeId,
}

impl View {
    /// Create a view over `registry`, driven by the tokio clock.
    pub fn new(registry: WidgetRegistry, config: ViewConfig) -> Self {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::host());
        Self {
            dom,
            widgets: SecondaryMap::new(),
            registry,
            scheduler: Scheduler::new(TokioClock::new()),
            lazy: LazyController::new(),
            visibility: Box::new(WatchList::new()),
            bridge: EventBridge::new(),
            dispatcher: EventDispatcher::new(),
            lifecycle: LifecycleTracker::new(),
            config,
            delivering: false,
            root,
        }
    }

    /// A view with the built-in widget set and default config.
    pub fn with_defaults() -> Self {
        Self::new(WidgetRegistry::with_defaults(), ViewConfig::default())
    }

    /// Drive timers from `clock` (builder). Call before the first render:
    /// anything already scheduled is dropped.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.scheduler = Scheduler::new(clock);
        self
    }

    /// Report lazy placeholders to `source` (builder). Call before the first
    /// render.
    pub fn with_visibility(mut self, source: impl VisibilitySource + 'static) -> Self {
        self.visibility = Box::new(source);
        self
    }

    /// The root host.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Add another top-level host.
    pub fn create_host(&mut self) -> NodeId {
        self.dom.insert(NodeData::host())
    }

    /// The active config.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The widget registry used for new renders.
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Registry changes apply to subsequent renders only.
    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Replace the contents of `at` with the widgets described by `markup`.
    ///
    /// Malformed markup is not an error here: it renders a single inline
    /// error label instead.
    pub fn render(&mut self, markup: &str, at: NodeId) -> Result<(), ViewError> {
        self.render_with_context(markup, at, &RenderContext::default())
    }

    /// Like [`View::render`], threading `context` to every created widget.
    pub fn render_with_context(
        &mut self,
        markup: &str,
        at: NodeId,
        context: &RenderContext,
    ) -> Result<(), ViewError> {
        self.check_insertion_point(at)?;
        self.compose(markup, at, context);
        Ok(())
    }

    /// Install `hooks`, then render.
    pub fn render_with_hooks(
        &mut self,
        markup: &str,
        at: NodeId,
        hooks: Hooks,
    ) -> Result<(), ViewError> {
        self.check_insertion_point(at)?;
        self.set_hooks(hooks);
        self.compose(markup, at, &RenderContext::default());
        Ok(())
    }

    /// Replace the hook set. Also restarts synthesized form keys at `form_1`.
    pub fn set_hooks(&mut self, hooks: Hooks) {
        self.bridge.set_hooks(hooks);
    }

    /// Release everything at an insertion point.
    pub fn clear(&mut self, point: NodeId) -> Result<(), ViewError> {
        self.check_insertion_point(point)?;
        self.release_children(point);
        Ok(())
    }

    /// Remove a host, widget or placeholder together with everything below it.
    pub fn destroy(&mut self, node: NodeId) -> Result<(), ViewError> {
        if node == self.root {
            return Err(ViewError::RootHost);
        }
        let data = self.dom.get(node).ok_or(ViewError::UnknownNode(node))?;
        if data.kind == NodeKind::Slot {
            return Err(ViewError::ContentSlot(node));
        }
        for id in self.dom.remove(node) {
            self.release(id);
        }
        Ok(())
    }

    fn check_insertion_point(&self, id: NodeId) -> Result<(), ViewError> {
        let data = self.dom.get(id).ok_or(ViewError::UnknownNode(id))?;
        if !data.is_insertion_point() {
            return Err(ViewError::NotAnInsertionPoint(id));
        }
        Ok(())
    }

    fn check_widget(&self, id: NodeId) -> Result<(), ViewError> {
        if !self.dom.contains(id) {
            return Err(ViewError::UnknownNode(id));
        }
        if !self.widgets.contains_key(id) {
            return Err(ViewError::NoWidget(id));
        }
        Ok(())
    }

    // ── Scheduling ──────────────────────────────────────────────────────

    /// Run every task that is ready now, including tasks queued by them.
    /// Returns how many ran.
    pub fn pump(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.scheduler.next_ready() {
            self.run_task(task);
            ran += 1;
        }
        ran
    }

    /// Pump until no timer remains, waiting out each deadline.
    ///
    /// A clock that can jump ([`ManualClock`](crate::runtime::ManualClock))
    /// is advanced directly; otherwise this sleeps on tokio time. Placeholders
    /// that are still waiting to become visible hold no timer and do not keep
    /// this from returning.
    pub async fn settle(&mut self) -> usize {
        let mut ran = self.pump();
        while let Some(deadline) = self.scheduler.next_deadline() {
            let wait = deadline.saturating_sub(self.scheduler.now());
            if !self.scheduler.clock().advance(wait) {
                tokio::time::sleep(wait).await;
            }
            ran += self.pump();
        }
        ran
    }

    /// Report that a lazy placeholder entered the viewport. Only the first
    /// report counts; returns whether it started the delay.
    pub fn notify_visible(&mut self, node: NodeId) -> bool {
        self.lazy.reveal(node, &mut self.scheduler)
    }

    /// Number of timers still waiting.
    pub fn active_timers(&self) -> usize {
        self.scheduler.active_timers()
    }

    // ── Interaction ─────────────────────────────────────────────────────

    /// Deliver host input to a widget. Returns whether the widget used it.
    pub fn interact(&mut self, node: NodeId, interaction: Interaction) -> Result<bool, ViewError> {
        self.check_widget(node)?;
        Ok(self
            .with_widget(node, |widget, cx| widget.handle(&interaction, cx))
            .unwrap_or(false))
    }

    /// Re-apply a full attribute set to a live widget.
    ///
    /// Attribute failures are logged, like during composition.
    pub fn update_attrs(&mut self, node: NodeId, attrs: AttributeBag) -> Result<(), ViewError> {
        self.check_widget(node)?;
        if let Some(data) = self.dom.get_mut(node) {
            data.attrs = attrs.clone();
        }
        if let Some(Err(err)) = self.with_widget(node, |widget, cx| widget.apply_attrs(&attrs, cx)) {
            tracing::warn!(?node, %err, "attribute not applied");
        }
        self.join_form(node);
        self.lifecycle.on_update(node);
        Ok(())
    }

    /// Give an atomic widget new owned markup.
    pub fn replace_markup(&mut self, node: NodeId, markup: &str) -> Result<(), ViewError> {
        self.check_widget(node)?;
        if !self.dom.get(node).is_some_and(|data| data.atomic) {
            return Err(ViewError::NotAtomic(node));
        }
        let markup = markup.to_owned();
        self.with_widget(node, |widget, cx| widget.set_markup(markup, cx));
        self.lifecycle.on_update(node);
        Ok(())
    }

    // ── Inspection ──────────────────────────────────────────────────────

    /// The composed tree.
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Node data for `id`, if it is still in the tree.
    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.dom.get(id)
    }

    /// Direct children of any node, slots included.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.dom.children(id)
    }

    /// A widget's content slot.
    pub fn content_host(&self, id: NodeId) -> Option<NodeId> {
        self.dom.get(id).and_then(|data| data.content_host)
    }

    /// Downcast the widget at `id`.
    pub fn widget<T: Widget + 'static>(&self, id: NodeId) -> Option<&T> {
        self.widgets.get(id)?.as_any().downcast_ref::<T>()
    }

    /// The widget at `id` as a trait object.
    pub fn dyn_widget(&self, id: NodeId) -> Option<&dyn Widget> {
        self.widgets.get(id).map(|widget| &**widget)
    }

    /// Widget nodes with `tag` across every host, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.dom
            .top_level()
            .into_iter()
            .flat_map(|host| self.dom.query_by_tag(host, tag))
            .collect()
    }

    /// Current values of the form root at `id`.
    pub fn form_values(&mut self, id: NodeId) -> Option<FormValues> {
        self.widgets
            .get_mut(id)?
            .as_form_root()
            .map(|root| root.values())
    }

    /// The form key the bridge reports for a wired form root.
    pub fn form_key(&self, id: NodeId) -> Option<&str> {
        self.bridge.form_key(id)
    }

    /// Where a lazy placeholder is in its lifecycle; `None` once torn down.
    pub fn lazy_state(&self, node: NodeId) -> Option<LazyState> {
        self.lazy.state(node)
    }

    /// Take the lifecycle events recorded since the last call.
    pub fn drain_lifecycle(&mut self) -> Vec<LifecycleEvent> {
        self.lifecycle.pending_events()
    }

    /// Whether the widget at `id` has had its mount turn.
    pub fn is_mounted(&self, id: NodeId) -> bool {
        self.lifecycle.is_mounted(id)
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("root", &self.root)
            .field("nodes", &self.dom.len())
            .field("widgets", &self.widgets.len())
            .field("lazy", &self.lazy.len())
            .field("scheduler", &self.scheduler)
            .field("config", &self.config)
            .finish()
    }
}
