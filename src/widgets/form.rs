//! Form widget: a composite form root collecting control values.

use std::any::Any;

use crate::error::WidgetError;
use crate::event::message::{FormValues, Signal};
use crate::markup::{AttrValue, AttributeBag};
use crate::widget::traits::{FormRoot, Interaction, Signals, Widget, WidgetContext};

/// Collects the values of descendant controls.
///
/// Controls register with their nearest enclosing form when attached. Every
/// control change re-emits the full value map as [`Signal::ValueChanged`];
/// [`Interaction::Submit`] emits [`Signal::Submitted`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    submit_label: Option<String>,
    values: FormValues,
    submissions: usize,
}

impl Form {
    /// Caption of the built-in submit action, if any.
    pub fn submit_label(&self) -> Option<&str> {
        self.submit_label.as_deref()
    }

    /// Number of submissions so far.
    pub fn submissions(&self) -> usize {
        self.submissions
    }
}

impl FormRoot for Form {
    fn register_control(&mut self, name: &str, value: AttrValue) {
        if !name.is_empty() {
            self.values.insert(name.to_owned(), value);
        }
    }

    fn control_changed(&mut self, name: &str, value: AttrValue, cx: &mut WidgetContext) {
        if name.is_empty() {
            return;
        }
        self.values.insert(name.to_owned(), value);
        cx.emit(Signal::ValueChanged(self.values.clone()));
    }

    fn values(&self) -> FormValues {
        self.values.clone()
    }
}

impl Widget for Form {
    fn widget_type(&self) -> &str {
        "Form"
    }

    fn apply_attrs(&mut self, attrs: &AttributeBag, _cx: &mut WidgetContext) -> Result<(), WidgetError> {
        if let Some(label) = attrs.get_string("submitLabel") {
            self.submit_label = Some(label);
        }
        Ok(())
    }

    fn has_content_host(&self) -> bool {
        true
    }

    fn signals(&self) -> Signals {
        Signals::SUBMITTED | Signals::VALUE_CHANGED
    }

    fn handle(&mut self, interaction: &Interaction, cx: &mut WidgetContext) -> bool {
        if *interaction != Interaction::Submit {
            return false;
        }
        self.submissions += 1;
        cx.emit(Signal::Submitted(self.values.clone()));
        true
    }

    fn as_form_root(&mut self) -> Option<&mut dyn FormRoot> {
        Some(self)
    }

    fn text(&self) -> Option<&str> {
        self.submit_label()
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
        WidgetContext::new(sm.insert(()), None, RenderContext::default())
    }

    #[test]
    fn submit_label_from_kebab_attribute() {
        let mut form = Form::default();
        form.apply_attrs(&AttributeBag::from_raw([("submit-label", "Send")]), &mut cx())
            .unwrap();
        assert_eq!(form.submit_label(), Some("Send"));
    }

    #[test]
    fn control_change_emits_full_map() {
        let mut form = Form::default();
        let mut cx = cx();
        form.register_control("email", AttrValue::from(""));
        form.register_control("age", AttrValue::from(""));
        form.control_changed("email", AttrValue::from("a@b.c"), &mut cx);

        let mut expected = FormValues::new();
        expected.insert("age".into(), AttrValue::from(""));
        expected.insert("email".into(), AttrValue::from("a@b.c"));
        assert_eq!(cx.into_commands(), vec![Command::Emit(Signal::ValueChanged(expected))]);
    }

    #[test]
    fn unnamed_controls_are_ignored() {
        let mut form = Form::default();
        let mut cx = cx();
        form.register_control("", AttrValue::from("x"));
        form.control_changed("", AttrValue::from("y"), &mut cx);
        assert!(form.values().is_empty());
        assert!(cx.commands().is_empty());
    }

    #[test]
    fn submit_emits_values() {
        let mut form = Form::default();
        let mut cx = cx();
        form.register_control("q", AttrValue::from("rust"));
        assert!(form.handle(&Interaction::Submit, &mut cx));
        assert!(!form.handle(&Interaction::Click, &mut cx));
        assert_eq!(form.submissions(), 1);
        assert_eq!(
            cx.into_commands(),
            vec![Command::Emit(Signal::Submitted(form.values()))]
        );
    }

    #[test]
    fn is_a_form_root() {
        let mut form = Form::default();
        assert!(form.as_form_root().is_some());
        assert!(form.signals().contains(Signals::SUBMITTED));
    }
}
