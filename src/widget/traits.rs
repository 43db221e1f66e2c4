//! Widget trait: the capability contract between widgets and the engine.
//!
//! A widget receives coerced attributes, may declare a content host (a child
//! insertion point the engine creates for it), may own inner markup when
//! registered atomic, and may declare signals for the event bridge. Widgets
//! never touch the tree themselves: hooks get a [`WidgetContext`] and queue
//! [`Command`]s that the view runs once the hook returns.

use std::any::Any;

use bitflags::bitflags;

use crate::dom::node::NodeId;
use crate::engine::context::RenderContext;
use crate::error::WidgetError;
use crate::event::message::{FormValues, Signal};
use crate::markup::{AttrValue, AttributeBag};

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

bitflags! {
    /// Signals a widget may emit, declared up front so the bridge can wire it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Signals: u8 {
        /// Emits [`Signal::Submitted`]; marks a form root.
        const SUBMITTED = 1;
        /// Emits [`Signal::ValueChanged`].
        const VALUE_CHANGED = 1 << 1;
        /// Emits [`Signal::Changed`].
        const CHANGED = 1 << 2;
        /// Emits [`Signal::Clicked`].
        const CLICKED = 1 << 3;
    }
}

// ---------------------------------------------------------------------------
// Interaction
// ---------------------------------------------------------------------------

/// Host-side input delivered to a widget via
/// [`View::interact`](crate::view::View::interact).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Text typed into a control (replaces its value).
    Input(String),
    /// An option or tab picked by index.
    Select(usize),
    /// Submit a form.
    Submit,
    /// Press a button.
    Click,
}

// ---------------------------------------------------------------------------
// Command / WidgetContext
// ---------------------------------------------------------------------------

/// Deferred request from a widget to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Clear the widget's content host and compose this markup into it.
    RenderMarkup(String),
    /// Release everything in the widget's content host.
    ClearContent,
    /// Report a signal upwards.
    Emit(Signal),
    /// Activate the `n`-th activatable child in the content host and
    /// deactivate the rest.
    ActivateChildren(usize),
}

/// What a widget hook may see and ask for.
#[derive(Debug)]
pub struct WidgetContext {
    node: NodeId,
    content_host: Option<NodeId>,
    render_context: RenderContext,
    commands: Vec<Command>,
}

impl WidgetContext {
    /// Context for the widget at `node`.
    pub fn new(node: NodeId, content_host: Option<NodeId>, render_context: RenderContext) -> Self {
        Self {
            node,
            content_host,
            render_context,
            commands: Vec::new(),
        }
    }

    /// The widget's own node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The widget's content host, if it declared one.
    pub fn content_host(&self) -> Option<NodeId> {
        self.content_host
    }

    /// Caller context threaded from the render that created the widget.
    pub fn render_context(&self) -> &RenderContext {
        &self.render_context
    }

    /// Compose `markup` into the content host.
    pub fn render_markup(&mut self, markup: impl Into<String>) {
        self.commands.push(Command::RenderMarkup(markup.into()));
    }

    /// Release the content host's children.
    pub fn clear_content(&mut self) {
        self.commands.push(Command::ClearContent);
    }

    /// Emit a signal.
    pub fn emit(&mut self, signal: Signal) {
        self.commands.push(Command::Emit(signal));
    }

    /// Make the `index`-th activatable child active.
    pub fn activate_children(&mut self, index: usize) {
        self.commands.push(Command::ActivateChildren(index));
    }

    /// Commands queued so far.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Consume the context, yielding its queued commands in order.
    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by every widget kind.
///
/// Widget is object-safe; the registry stores factories producing
/// `Box<dyn Widget>`. Only `widget_type`, `apply_attrs` and the `Any` upcasts
/// are required.
pub trait Widget {
    /// Type name used in logs and test outlines (e.g. `"Card"`).
    fn widget_type(&self) -> &str;

    /// Take a (possibly updated) attribute bag.
    ///
    /// An error is logged by the engine and otherwise ignored; values
    /// accepted before the error stay applied.
    fn apply_attrs(&mut self, attrs: &AttributeBag, cx: &mut WidgetContext) -> Result<(), WidgetError>;

    /// Whether the engine should create a content host for this widget.
    fn has_content_host(&self) -> bool {
        false
    }

    /// Signals this widget may emit.
    fn signals(&self) -> Signals {
        Signals::empty()
    }

    /// Receive owned inner markup. Only called for atomic widgets.
    fn set_markup(&mut self, markup: String, cx: &mut WidgetContext) {
        let _ = (markup, cx);
    }

    /// The widget's insertion point is ready (runs one turn after attach).
    fn on_mount(&mut self, cx: &mut WidgetContext) {
        let _ = cx;
    }

    /// Handle host input. Returns `false` if the widget ignores it.
    fn handle(&mut self, interaction: &Interaction, cx: &mut WidgetContext) -> bool {
        let _ = (interaction, cx);
        false
    }

    /// Whether a container may toggle this widget with `set_active`.
    fn activatable(&self) -> bool {
        false
    }

    /// Become active or inactive.
    fn set_active(&mut self, active: bool, cx: &mut WidgetContext) {
        let _ = (active, cx);
    }

    /// `(name, current value)` for widgets that join an enclosing form.
    fn form_control(&self) -> Option<(String, AttrValue)> {
        None
    }

    /// Form-root capability.
    fn as_form_root(&mut self) -> Option<&mut dyn FormRoot> {
        None
    }

    /// Visible text, for outlines and queries.
    fn text(&self) -> Option<&str> {
        None
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A widget that collects the values of descendant controls.
pub trait FormRoot {
    /// Add (or replace) a control with its initial value.
    fn register_control(&mut self, name: &str, value: AttrValue);

    /// A registered control changed; emit the form's own signals via `cx`.
    fn control_changed(&mut self, name: &str, value: AttrValue, cx: &mut WidgetContext);

    /// Current values of all registered controls.
    fn values(&self) -> FormValues;
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn node() -> NodeId {
        let mut sm: SlotMap<NodeId, ()> = SlotMap::with_key();
        sm.insert(())
    }

    // -----------------------------------------------------------------------
    // Test widget
    // -----------------------------------------------------------------------

    #[derive(Debug, Default)]
    struct Badge {
        text: String,
        mounted: bool,
    }

    impl Widget for Badge {
        fn widget_type(&self) -> &str {
            "Badge"
        }

        fn apply_attrs(&mut self, attrs: &AttributeBag, _cx: &mut WidgetContext) -> Result<(), WidgetError> {
            match attrs.get("text") {
                None => Ok(()),
                Some(AttrValue::Text(text)) => {
                    self.text = text.clone();
                    Ok(())
                }
                Some(other) => Err(WidgetError::invalid("text", format!("expected text, got {other}"))),
            }
        }

        fn on_mount(&mut self, cx: &mut WidgetContext) {
            self.mounted = true;
            cx.emit(Signal::Clicked);
        }

        fn text(&self) -> Option<&str> {
            Some(&self.text)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    // -----------------------------------------------------------------------
    // Widget trait
    // -----------------------------------------------------------------------

    #[test]
    fn defaults_are_inert() {
        let mut badge = Badge::default();
        let mut cx = WidgetContext::new(node(), None, RenderContext::default());
        assert!(!badge.has_content_host());
        assert_eq!(badge.signals(), Signals::empty());
        assert!(!badge.activatable());
        assert!(badge.form_control().is_none());
        assert!(badge.as_form_root().is_none());
        assert!(!badge.handle(&Interaction::Click, &mut cx));
        badge.set_markup("<x/>".into(), &mut cx);
        assert!(cx.commands().is_empty());
    }

    #[test]
    fn apply_attrs_reports_wrong_type() {
        let mut badge = Badge::default();
        let mut cx = WidgetContext::new(node(), None, RenderContext::default());
        let ok = AttributeBag::from_raw([("text", "hi")]);
        assert!(badge.apply_attrs(&ok, &mut cx).is_ok());
        assert_eq!(badge.text(), Some("hi"));

        let bad = AttributeBag::from_raw([("text", "42")]);
        assert!(badge.apply_attrs(&bad, &mut cx).is_err());
        assert_eq!(badge.text(), Some("hi"));
    }

    #[test]
    fn hooks_queue_commands() {
        let mut badge = Badge::default();
        let mut cx = WidgetContext::new(node(), None, RenderContext::default());
        badge.on_mount(&mut cx);
        cx.render_markup("<label/>");
        cx.activate_children(2);
        cx.clear_content();
        assert!(badge.mounted);
        assert_eq!(
            cx.into_commands(),
            vec![
                Command::Emit(Signal::Clicked),
                Command::RenderMarkup("<label/>".into()),
                Command::ActivateChildren(2),
                Command::ClearContent,
            ]
        );
    }

    #[test]
    fn widget_as_any_downcast() {
        let mut boxed: Box<dyn Widget> = Box::new(Badge::default());
        boxed.as_any_mut().downcast_mut::<Badge>().unwrap().text = "x".into();
        assert_eq!(boxed.as_any().downcast_ref::<Badge>().unwrap().text, "x");
    }

    #[test]
    fn signals_flags_combine() {
        let form = Signals::SUBMITTED | Signals::VALUE_CHANGED;
        assert!(form.contains(Signals::SUBMITTED));
        assert!(form.intersects(Signals::CHANGED | Signals::VALUE_CHANGED));
        assert!(!Signals::CLICKED.intersects(Signals::CHANGED | Signals::VALUE_CHANGED));
    }

    #[test]
    fn context_exposes_ids() {
        let id = node();
        let cx = WidgetContext::new(id, Some(id), RenderContext::default());
        assert_eq!(cx.node(), id);
        assert_eq!(cx.content_host(), Some(id));
    }
}
