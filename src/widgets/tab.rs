//! Tab widget: an atomic pane that renders its markup on first activation.
//!
//! A tab composes nothing until it is both mounted and active. From then on
//! it stays rendered; replacing its markup re-renders it.

use std::any::Any;

use crate::error::WidgetError;
use crate::markup::{AttrValue, AttributeBag};
use crate::widget::traits::{Widget, WidgetContext};

/// One pane of a [`Tabs`](super::Tabs) group. Register it atomic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tab {
    label: String,
    active: bool,
    markup: String,
    mounted: bool,
    renders: usize,
}

impl Tab {
    /// The tab caption.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this tab is the active pane.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// How many times the tab composed its content.
    pub fn renders(&self) -> usize {
        self.renders
    }

    fn has_markup(&self) -> bool {
        !self.markup.trim().is_empty()
    }

    fn render(&mut self, cx: &mut WidgetContext) {
        cx.render_markup(self.markup.clone());
        self.renders += 1;
    }

    fn activate(&mut self, active: bool, cx: &mut WidgetContext) {
        let became_active = active && !self.active;
        self.active = active;
        if became_active && self.mounted && self.renders == 0 && self.has_markup() {
            self.render(cx);
        }
    }
}

impl Widget for Tab {
    fn widget_type(&self) -> &str {
        "Tab"
    }

    fn apply_attrs(&mut self, attrs: &AttributeBag, cx: &mut WidgetContext) -> Result<(), WidgetError> {
        if let Some(label) = attrs.get_string("label") {
            self.label = label;
        }
        match attrs.get("active") {
            None => Ok(()),
            Some(AttrValue::Bool(active)) => {
                self.activate(*active, cx);
                Ok(())
            }
            Some(other) => Err(WidgetError::invalid("active", format!("expected true or false, got `{other}`"))),
        }
    }

    fn has_content_host(&self) -> bool {
        true
    }

    fn set_markup(&mut self, markup: String, cx: &mut WidgetContext) {
        let changed = markup != self.markup;
        self.markup = markup;
        if !changed || !self.mounted {
            return;
        }
        if !self.has_markup() {
            cx.clear_content();
        } else if self.renders > 0 || self.active {
            self.render(cx);
        }
    }

    fn on_mount(&mut self, cx: &mut WidgetContext) {
        self.mounted = true;
        if self.active && self.renders == 0 && self.has_markup() {
            self.render(cx);
        }
    }

    fn activatable(&self) -> bool {
        true
    }

    fn set_active(&mut self, active: bool, cx: &mut WidgetContext) {
        self.activate(active, cx);
    }

    fn text(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::context::RenderContext;
    use crate::widget::traits::Command;
    use slotmap::SlotMap;

    fn cx() -> WidgetContext {
        let mut sm: SlotMap<crate::dom::NodeId, ()> = SlotMap::with_key();
        let node = sm.insert(());
        WidgetContext::new(node, Some(sm.insert(())), RenderContext::default())
    }

    fn tab_with(markup: &str, cx: &mut WidgetContext) -> Tab {
        let mut tab = Tab::default();
        tab.set_markup(markup.into(), cx);
        tab
    }

    #[test]
    fn inactive_tab_does_not_render_on_mount() {
        let mut cx = cx();
        let mut tab = tab_with("<label/>", &mut cx);
        tab.on_mount(&mut cx);
        assert!(cx.commands().is_empty());
    }

    #[test]
    fn active_before_mount_renders_on_mount() {
        let mut cx = cx();
        let mut tab = tab_with("<label/>", &mut cx);
        tab.set_active(true, &mut cx);
        assert!(cx.commands().is_empty());
        tab.on_mount(&mut cx);
        assert_eq!(cx.into_commands(), vec![Command::RenderMarkup("<label/>".into())]);
    }

    #[test]
    fn first_activation_after_mount_renders_once() {
        let mut cx = cx();
        let mut tab = tab_with("<label/>", &mut cx);
        tab.on_mount(&mut cx);
        tab.set_active(true, &mut cx);
        tab.set_active(false, &mut cx);
        tab.set_active(true, &mut cx);
        assert_eq!(tab.renders(), 1);
        assert!(tab.is_active());
    }

    #[test]
    fn markup_change_after_render_forces_rerender() {
        let mut cx = cx();
        let mut tab = tab_with("<a/>", &mut cx);
        tab.set_active(true, &mut cx);
        tab.on_mount(&mut cx);
        tab.set_active(false, &mut cx);
        tab.set_markup("<b/>".into(), &mut cx);
        assert_eq!(
            cx.into_commands(),
            vec![
                Command::RenderMarkup("<a/>".into()),
                Command::RenderMarkup("<b/>".into()),
            ]
        );
    }

    #[test]
    fn active_attribute_must_be_boolean() {
        let mut cx = cx();
        let mut tab = Tab::default();
        let attrs = AttributeBag::from_raw([("label", "One"), ("active", "yes")]);
        assert!(tab.apply_attrs(&attrs, &mut cx).is_err());
        assert_eq!(tab.label(), "One");
        assert!(!tab.is_active());
    }
}
