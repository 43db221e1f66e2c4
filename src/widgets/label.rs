//! Label widget: inert text display.
//!
//! Also used by the engine for bare text nodes and for the inline error shown
//! when markup fails to parse.

use std::any::Any;

use crate::error::WidgetError;
use crate::markup::{AttrValue, AttributeBag};
use crate::widget::traits::{Widget, WidgetContext};

/// Displays `text`, optionally in `color`.
///
/// Any attribute type is accepted for `text` (`text="42"` shows `42`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    text: String,
    color: Option<String>,
}

impl Label {
    /// A label showing `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    /// Set the color (builder).
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Displayed text.
    pub fn content(&self) -> &str {
        &self.text
    }

    /// Text color, if set.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

impl Widget for Label {
    fn widget_type(&self) -> &str {
        "Label"
    }

    fn apply_attrs(&mut self, attrs: &AttributeBag, _cx: &mut WidgetContext) -> Result<(), WidgetError> {
        if let Some(text) = attrs.get_string("text") {
            self.text = text;
        }
        match attrs.get("color") {
            None => Ok(()),
            Some(AttrValue::Text(color)) => {
                self.color = Some(color.clone());
                Ok(())
            }
            Some(other) => Err(WidgetError::invalid("color", format!("expected a color, got `{other}`"))),
        }
    }

    fn has_content_host(&self) -> bool {
        true
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::context::RenderContext;
    use slotmap::SlotMap;

    fn cx() -> WidgetContext {
        let mut sm: SlotMap<crate::dom::NodeId, ()> = SlotMap::with_key();
        WidgetContext::new(sm.insert(()), None, RenderContext::default())
    }

    #[test]
    fn text_and_color() {
        let mut label = Label::default();
        let attrs = AttributeBag::from_raw([("text", "hello"), ("color", "#b91c1c")]);
        label.apply_attrs(&attrs, &mut cx()).unwrap();
        assert_eq!(label.content(), "hello");
        assert_eq!(label.color(), Some("#b91c1c"));
    }

    #[test]
    fn numeric_text_is_displayed() {
        let mut label = Label::default();
        label
            .apply_attrs(&AttributeBag::from_raw([("text", "42")]), &mut cx())
            .unwrap();
        assert_eq!(label.text(), Some("42"));
    }

    #[test]
    fn boolean_color_is_rejected_but_text_kept() {
        let mut label = Label::default();
        let attrs = AttributeBag::from_raw([("text", "x"), ("color", "true")]);
        assert!(label.apply_attrs(&attrs, &mut cx()).is_err());
        assert_eq!(label.content(), "x");
        assert_eq!(label.color(), None);
    }

    #[test]
    fn builder() {
        let label = Label::new("a").with_color("red");
        assert_eq!(label.content(), "a");
        assert_eq!(label.color(), Some("red"));
    }
}
