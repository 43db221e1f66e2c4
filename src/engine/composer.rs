//! The recursive composer: markup in, widget nodes out.
//!
//! Every render clears its insertion point first, then walks the parsed
//! document in order:
//!
//! - text becomes a label (blank text is dropped), comments are skipped;
//! - an element with a truthy `lazy`/`lazy-load` becomes a placeholder that
//!   owns the serialized element;
//! - an unregistered tag is flattened (or annotated, per config);
//! - an atomic widget receives its inner markup and is not descended into;
//! - any other widget has its children composed into its content host, or
//!   into the current insertion point when it declares none.
//!
//! Widgets only ever queue [`Command`]s; they are run here after each hook.

use tracing::{debug_span, trace, warn};

use super::context::RenderContext;
use crate::dom::node::{NodeData, NodeId, NodeKind};
use crate::event::handler::EventDispatcher;
use crate::event::message::{Envelope, Signal};
use crate::lazy::{is_lazy, LazyConfig, LazyState};
use crate::markup::{inner_markup, parse, AttributeBag, Element, MarkupNode, ParseError};
use crate::runtime::scheduler::Task;
use crate::view::{UnknownTagPolicy, View};
use crate::widget::registry::WidgetDescriptor;
use crate::widget::traits::{Command, Interaction, Widget, WidgetContext};
use crate::widgets::{Label, LazyPlaceholder};

/// Color of the label shown for an unregistered tag under
/// [`UnknownTagPolicy::Annotate`].
pub const UNKNOWN_TAG_COLOR: &str = "#b45309";

impl View {
    // -----------------------------------------------------------------------
    // Composition
    // -----------------------------------------------------------------------

    /// Replace everything at `at` with the widgets described by `markup`.
    pub(crate) fn compose(&mut self, markup: &str, at: NodeId, context: &RenderContext) {
        let _span = debug_span!("render", host = ?at).entered();
        self.release_children(at);
        if markup.trim().is_empty() {
            return;
        }
        match parse(markup) {
            Ok(document) => {
                for node in document.children() {
                    self.visit(node, at, context);
                }
            }
            Err(err) => {
                warn!(%err, "malformed markup");
                self.show_error(&err, at, context);
            }
        }
    }

    fn visit(&mut self, node: &MarkupNode, at: NodeId, context: &RenderContext) {
        match node {
            MarkupNode::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    self.spawn_label(AttributeBag::new().with("text", text), at, context);
                }
            }
            MarkupNode::Comment(_) => {}
            MarkupNode::Element(element) => self.visit_element(element, at, context),
        }
    }

    fn visit_element(&mut self, element: &Element, at: NodeId, context: &RenderContext) {
        let tag = element.tag();
        let attrs = AttributeBag::from_raw(
            element
                .attributes
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );

        if is_lazy(&attrs) {
            self.spawn_placeholder(element, &attrs, at, context);
            return;
        }

        let Some(descriptor) = self.registry.get(&tag).cloned() else {
            match self.config.unknown_tags {
                UnknownTagPolicy::Flatten => {
                    trace!(%tag, "flattening unknown tag");
                    for child in &element.children {
                        self.visit(child, at, context);
                    }
                }
                UnknownTagPolicy::Annotate => {
                    let note = AttributeBag::new()
                        .with("text", format!("unknown: <{tag}>"))
                        .with("color", UNKNOWN_TAG_COLOR);
                    self.spawn_label(note, at, context);
                }
            }
            return;
        };

        let id = self.instantiate(&descriptor, attrs, at, context);

        if descriptor.atomic {
            let inner = inner_markup(element);
            if !inner.trim().is_empty() {
                self.with_widget(id, |widget, cx| widget.set_markup(inner, cx));
            }
            return;
        }

        let target = self
            .dom
            .get(id)
            .and_then(|data| data.content_host)
            .unwrap_or(at);
        for child in &element.children {
            self.visit(child, target, context);
        }
    }

    fn show_error(&mut self, err: &ParseError, at: NodeId, context: &RenderContext) {
        let attrs = AttributeBag::new()
            .with("text", format!("{}{}", self.config.error_prefix, err))
            .with("color", self.config.error_color.as_str());
        self.spawn_label(attrs, at, context);
    }

    /// A label from the registry, or the built-in one if `label` was removed.
    fn spawn_label(&mut self, attrs: AttributeBag, at: NodeId, context: &RenderContext) -> NodeId {
        let descriptor = self.registry.get("label").cloned().unwrap_or_else(|| WidgetDescriptor {
            tag: "label".into(),
            factory: std::rc::Rc::new(|| Box::new(Label::default()) as Box<dyn Widget>),
            atomic: false,
        });
        self.instantiate(&descriptor, attrs, at, context)
    }

    // -----------------------------------------------------------------------
    // Instantiation
    // -----------------------------------------------------------------------

    fn instantiate(
        &mut self,
        descriptor: &WidgetDescriptor,
        attrs: AttributeBag,
        at: NodeId,
        context: &RenderContext,
    ) -> NodeId {
        let widget = descriptor.instantiate();
        let data = NodeData::widget(descriptor.tag.as_str(), attrs.clone())
            .atomic(descriptor.atomic)
            .with_context(context.clone());
        let id = self.attach(at, data, widget);

        if let Some(Err(err)) = self.with_widget(id, |widget, cx| widget.apply_attrs(&attrs, cx)) {
            warn!(node = ?id, tag = %descriptor.tag, %err, "attribute not applied");
        }

        if !descriptor.atomic {
            let signals = self.widgets.get(id).map(|w| w.signals()).unwrap_or_default();
            if let Some(data) = self.dom.get(id) {
                self.bridge.wire(id, data, signals);
            }
        }
        self.join_form(id);
        self.scheduler.defer(Task::Mount(id));
        id
    }

    fn spawn_placeholder(
        &mut self,
        element: &Element,
        attrs: &AttributeBag,
        at: NodeId,
        context: &RenderContext,
    ) -> NodeId {
        let config = LazyConfig::from_element(element, attrs, self.config.lazy_delay);
        let widget = Box::new(LazyPlaceholder::new(config.delay));
        let data = NodeData::placeholder().with_context(context.clone());
        let id = self.attach(at, data, widget);
        self.lazy.insert(id, config);
        self.scheduler.defer(Task::Mount(id));
        id
    }

    /// Insert the node, its content slot if declared, and the instance.
    fn attach(&mut self, at: NodeId, data: NodeData, widget: Box<dyn Widget>) -> NodeId {
        let tag = data.tag.clone();
        let id = self.dom.insert_child(at, data);
        if widget.has_content_host() {
            let slot = self.dom.insert_child(id, NodeData::slot());
            if let Some(data) = self.dom.get_mut(id) {
                data.content_host = Some(slot);
            }
        }
        self.widgets.insert(id, widget);
        self.lifecycle.on_attach(id, &tag);
        id
    }

    /// Register a control with the nearest enclosing form.
    pub(crate) fn join_form(&mut self, id: NodeId) {
        let Some((name, value)) = self.widgets.get(id).and_then(|w| w.form_control()) else {
            return;
        };
        let Some(form) = self.enclosing_form(id) else {
            return;
        };
        if let Some(root) = self.widgets.get_mut(form).and_then(|w| w.as_form_root()) {
            root.register_control(&name, value);
        }
    }

    /// The nearest ancestor with form-root capability.
    pub(crate) fn enclosing_form(&mut self, id: NodeId) -> Option<NodeId> {
        EventDispatcher::bubble_path(&self.dom, id)
            .into_iter()
            .skip(1)
            .find(|&ancestor| {
                self.widgets
                    .get_mut(ancestor)
                    .is_some_and(|w| w.as_form_root().is_some())
            })
    }

    // -----------------------------------------------------------------------
    // Widget hooks and commands
    // -----------------------------------------------------------------------

    /// Run a widget hook, then execute the commands it queued.
    pub(crate) fn with_widget<R>(
        &mut self,
        id: NodeId,
        hook: impl FnOnce(&mut dyn Widget, &mut WidgetContext) -> R,
    ) -> Option<R> {
        let data = self.dom.get(id)?;
        let mut cx = WidgetContext::new(id, data.content_host, data.context.clone());
        let widget = self.widgets.get_mut(id)?;
        let out = hook(&mut **widget, &mut cx);
        self.run_commands(id, cx.into_commands());
        Some(out)
    }

    fn run_commands(&mut self, id: NodeId, commands: Vec<Command>) {
        for command in commands {
            let Some(data) = self.dom.get(id) else {
                return;
            };
            let content_host = data.content_host;
            match command {
                Command::RenderMarkup(markup) => {
                    if let Some(host) = content_host {
                        let context = data.context.clone();
                        self.compose(&markup, host, &context);
                    }
                }
                Command::ClearContent => {
                    if let Some(host) = content_host {
                        self.release_children(host);
                    }
                }
                Command::Emit(signal) => {
                    self.dispatcher.push(Envelope::new(signal, id));
                    self.deliver();
                }
                Command::ActivateChildren(index) => {
                    if let Some(host) = content_host {
                        self.activate_children(host, index);
                    }
                }
            }
        }
    }

    fn activate_children(&mut self, host: NodeId, index: usize) {
        let panes: Vec<NodeId> = self
            .dom
            .children(host)
            .iter()
            .copied()
            .filter(|&child| self.widgets.get(child).is_some_and(|w| w.activatable()))
            .collect();
        for (position, pane) in panes.into_iter().enumerate() {
            self.with_widget(pane, |widget, cx| widget.set_active(position == index, cx));
        }
    }

    // -----------------------------------------------------------------------
    // Signal routing
    // -----------------------------------------------------------------------

    /// Route queued envelopes. Signals raised while routing are queued behind
    /// the current one.
    fn deliver(&mut self) {
        if self.delivering {
            return;
        }
        self.delivering = true;
        while let Some(envelope) = self.dispatcher.pop() {
            self.route(envelope);
        }
        self.delivering = false;
    }

    fn route(&mut self, envelope: Envelope) {
        let sender = envelope.sender;
        let Some(data) = self.dom.get(sender) else {
            return;
        };
        self.bridge.forward(sender, data, &envelope.signal);

        match envelope.signal {
            Signal::Changed { name, value } => {
                let name = name
                    .filter(|name| !name.is_empty())
                    .or_else(|| data.attrs.get_string("name"));
                let Some(name) = name else {
                    return;
                };
                if let Some(form) = self.enclosing_form(sender) {
                    self.with_widget(form, |widget, cx| {
                        if let Some(root) = widget.as_form_root() {
                            root.control_changed(&name, value, cx);
                        }
                    });
                }
            }
            Signal::Clicked => {
                let submits = data
                    .attrs
                    .get_str("type")
                    .is_some_and(|kind| kind.eq_ignore_ascii_case("submit"));
                if !submits {
                    return;
                }
                if let Some(form) = self.enclosing_form(sender) {
                    self.with_widget(form, |widget, cx| widget.handle(&Interaction::Submit, cx));
                }
            }
            Signal::Submitted(_) | Signal::ValueChanged(_) => {}
        }
    }

    // -----------------------------------------------------------------------
    // Scheduled work
    // -----------------------------------------------------------------------

    pub(crate) fn run_task(&mut self, task: Task) {
        match task {
            Task::Mount(id) => {
                if !self.lifecycle.on_mount(id) {
                    return;
                }
                let is_placeholder = self
                    .dom
                    .get(id)
                    .is_some_and(|data| data.kind == NodeKind::Placeholder);
                if is_placeholder {
                    if self.lazy.mount(id, &mut *self.visibility) == Some(LazyState::Materialized) {
                        self.finish_placeholder(id);
                    }
                } else {
                    self.with_widget(id, |widget, cx| widget.on_mount(cx));
                }
            }
            Task::Materialize(id) => {
                let Some(markup) = self.lazy.materialize(id, &mut *self.visibility) else {
                    return;
                };
                let target = self
                    .dom
                    .get(id)
                    .and_then(|data| Some((data.content_host?, data.context.clone())));
                if let Some((host, context)) = target {
                    self.compose(&markup, host, &context);
                }
                self.finish_placeholder(id);
            }
        }
    }

    fn finish_placeholder(&mut self, id: NodeId) {
        if let Some(placeholder) = self
            .widgets
            .get_mut(id)
            .and_then(|w| w.as_any_mut().downcast_mut::<LazyPlaceholder>())
        {
            placeholder.finish();
        }
    }

    // -----------------------------------------------------------------------
    // Teardown
    // -----------------------------------------------------------------------

    /// Release everything below `point`, keeping `point` itself.
    pub(crate) fn release_children(&mut self, point: NodeId) {
        for id in self.dom.remove_children(point) {
            self.release(id);
        }
    }

    /// Drop an already-detached node's instance and every resource it holds.
    pub(crate) fn release(&mut self, id: NodeId) {
        self.widgets.remove(id);
        self.lazy
            .dispose(id, &mut *self.visibility, &mut self.scheduler);
        self.scheduler.forget(id);
        self.bridge.unwire(id);
        self.dispatcher.discard_from(id);
        self.lifecycle.on_release(id);
    }
}
