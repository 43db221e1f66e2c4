//! Button widget: a pressable action.
//!
//! Emits [`Signal::Clicked`] on [`Interaction::Click`]. A button with
//! `type="submit"` inside a form also submits that form.

use std::any::Any;

use crate::error::WidgetError;
use crate::event::message::Signal;
use crate::markup::{AttrValue, AttributeBag};
use crate::widget::traits::{Interaction, Signals, Widget, WidgetContext};

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// Default caption when no `label` attribute is given.
pub const DEFAULT_BUTTON_LABEL: &str = "Button";

/// A button with a caption, optional color and a `type`.
///
/// # Examples
///
/// ```
/// use atomic_view::widgets::Button;
///
/// let btn = Button::new("Save").submit(true);
/// assert!(btn.is_submit());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    label: String,
    color: Option<String>,
    submit: bool,
    clicks: usize,
}

impl Default for Button {
    fn default() -> Self {
        Self::new(DEFAULT_BUTTON_LABEL)
    }
}

impl Button {
    /// Create a new button with the given caption.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: None,
            submit: false,
            clicks: 0,
        }
    }

    /// Make this a submit button (builder).
    pub fn submit(mut self, submit: bool) -> Self {
        self.submit = submit;
        self
    }

    /// Return the button caption.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Button color, if set.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Whether `type="submit"`.
    pub fn is_submit(&self) -> bool {
        self.submit
    }

    /// How many times the button was pressed.
    pub fn clicks(&self) -> usize {
        self.clicks
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn apply_attrs(&mut self, attrs: &AttributeBag, _cx: &mut WidgetContext) -> Result<(), WidgetError> {
        if let Some(label) = attrs.get_string("label") {
            self.label = label;
        }
        if let Some(kind) = attrs.get_str("type") {
            self.submit = kind.eq_ignore_ascii_case("submit");
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

    fn signals(&self) -> Signals {
        Signals::CLICKED
    }

    fn handle(&mut self, interaction: &Interaction, cx: &mut WidgetContext) -> bool {
        if *interaction != Interaction::Click {
            return false;
        }
        self.clicks += 1;
        cx.emit(Signal::Clicked);
        true
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

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::context::RenderContext;
    use crate::widget::traits::Command;
    use slotmap::SlotMap;

    fn cx() -> WidgetContext {
        let mut sm: SlotMap<crate::dom::NodeId, ()> = SlotMap::with_key();
        WidgetContext::new(sm.insert(()), None, RenderContext::default())
    }

    #[test]
    fn default_label() {
        assert_eq!(Button::default().label(), DEFAULT_BUTTON_LABEL);
    }

    #[test]
    fn attrs_set_label_and_type() {
        let mut btn = Button::default();
        let attrs = AttributeBag::from_raw([("label", "ویرایش"), ("type", "SUBMIT"), ("color", "teal")]);
        btn.apply_attrs(&attrs, &mut cx()).unwrap();
        assert_eq!(btn.label(), "ویرایش");
        assert!(btn.is_submit());
        assert_eq!(btn.color(), Some("teal"));
    }

    #[test]
    fn click_emits_signal() {
        let mut btn = Button::new("Go");
        let mut cx = cx();
        assert!(btn.handle(&Interaction::Click, &mut cx));
        assert!(!btn.handle(&Interaction::Submit, &mut cx));
        assert_eq!(btn.clicks(), 1);
        assert_eq!(cx.into_commands(), vec![Command::Emit(Signal::Clicked)]);
    }

    #[test]
    fn declares_clicked() {
        assert_eq!(Button::default().signals(), Signals::CLICKED);
    }
}
