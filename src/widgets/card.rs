//! Card widget: an atomic container that renders its own inner markup.
//!
//! The card receives its children as a markup string and composes them into
//! its content host on its mount turn, once. Replacing the markup after that
//! re-renders; attribute updates never do.

use std::any::Any;

use crate::error::WidgetError;
use crate::markup::AttributeBag;
use crate::widget::traits::{Widget, WidgetContext};

/// A titled container. Register it atomic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Card {
    title: Option<String>,
    markup: String,
    mounted: bool,
    renders: usize,
}

impl Card {
    /// The card title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The owned inner markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// How many times the card composed its content.
    pub fn renders(&self) -> usize {
        self.renders
    }

    fn render(&mut self, cx: &mut WidgetContext) {
        if self.markup.trim().is_empty() {
            cx.clear_content();
        } else {
            cx.render_markup(self.markup.clone());
        }
        self.renders += 1;
    }
}

impl Widget for Card {
    fn widget_type(&self) -> &str {
        "Card"
    }

    fn apply_attrs(&mut self, attrs: &AttributeBag, _cx: &mut WidgetContext) -> Result<(), WidgetError> {
        if let Some(title) = attrs.get_string("title") {
            self.title = Some(title);
        }
        Ok(())
    }

    fn has_content_host(&self) -> bool {
        true
    }

    fn set_markup(&mut self, markup: String, cx: &mut WidgetContext) {
        if markup == self.markup {
            return;
        }
        self.markup = markup;
        if self.mounted {
            self.render(cx);
        }
    }

    fn on_mount(&mut self, cx: &mut WidgetContext) {
        self.mounted = true;
        if self.renders == 0 && !self.markup.trim().is_empty() {
            self.render(cx);
        }
    }

    fn text(&self) -> Option<&str> {
        self.title()
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

    #[test]
    fn nothing_renders_before_mount() {
        let mut card = Card::default();
        let mut cx = cx();
        card.set_markup("<button/>".into(), &mut cx);
        card.apply_attrs(&AttributeBag::from_raw([("title", "a")]), &mut cx)
            .unwrap();
        card.apply_attrs(&AttributeBag::from_raw([("title", "b")]), &mut cx)
            .unwrap();
        assert!(cx.commands().is_empty());
        assert_eq!(card.title(), Some("b"));
    }

    #[test]
    fn mount_renders_once() {
        let mut card = Card::default();
        let mut cx = cx();
        card.set_markup("<button/>".into(), &mut cx);
        card.on_mount(&mut cx);
        card.on_mount(&mut cx);
        assert_eq!(cx.into_commands(), vec![Command::RenderMarkup("<button/>".into())]);
        assert_eq!(card.renders(), 1);
    }

    #[test]
    fn markup_change_after_mount_rerenders() {
        let mut card = Card::default();
        let mut cx = cx();
        card.set_markup("<a/>".into(), &mut cx);
        card.on_mount(&mut cx);
        card.set_markup("<a/>".into(), &mut cx);
        card.set_markup("<b/>".into(), &mut cx);
        card.set_markup(String::new(), &mut cx);
        assert_eq!(
            cx.into_commands(),
            vec![
                Command::RenderMarkup("<a/>".into()),
                Command::RenderMarkup("<b/>".into()),
                Command::ClearContent,
            ]
        );
    }

    #[test]
    fn blank_markup_never_renders_on_mount() {
        let mut card = Card::default();
        let mut cx = cx();
        card.on_mount(&mut cx);
        assert!(cx.commands().is_empty());
        assert_eq!(card.renders(), 0);
    }
}
