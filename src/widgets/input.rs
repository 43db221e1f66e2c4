//! Input widget: a named text control with validation.
//!
//! The control joins its enclosing form under `name`. Typing replaces the
//! value, marks the control dirty and emits [`Signal::Changed`]. Validation
//! errors are only shown once the control is dirty.

use std::any::Any;

use crate::error::WidgetError;
use crate::event::message::Signal;
use crate::markup::{AttrValue, AttributeBag};
use crate::widget::traits::{Interaction, Signals, Widget, WidgetContext};

/// Default message shown for an invalid value.
pub const DEFAULT_INPUT_ERROR: &str = "Invalid input";

/// Attribute keys that carry an initial value, in priority order.
const INITIAL_VALUE_KEYS: &[&str] = &["value", "defaultValue"];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A failed validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Required,
    MinLength(usize),
    MaxLength(usize),
}

fn length_attr(attrs: &AttributeBag, key: &str) -> Result<Option<usize>, WidgetError> {
    match attrs.get(key) {
        None => Ok(None),
        Some(AttrValue::Number(n)) if n.fract() == 0.0 && *n >= 0.0 => Ok(Some(*n as usize)),
        Some(other) => Err(WidgetError::invalid(
            key,
            format!("expected a non-negative integer, got `{other}`"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A text input control.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    label: String,
    name: String,
    kind: String,
    placeholder: String,
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    error_text: String,
    value: AttrValue,
    initial_value_set: bool,
    dirty: bool,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            label: String::new(),
            name: String::new(),
            kind: "text".into(),
            placeholder: String::new(),
            required: false,
            min_length: None,
            max_length: None,
            error_text: DEFAULT_INPUT_ERROR.into(),
            value: AttrValue::from(""),
            initial_value_set: false,
            dirty: false,
        }
    }
}

impl Input {
    /// Field caption.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Control name (empty when unnamed).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `type` attribute (`text` by default).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Current value.
    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    /// Whether the user has typed into the control.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Every rule the current value breaks.
    pub fn violations(&self) -> Vec<Violation> {
        let text = self.value.to_string();
        let len = text.chars().count();
        let mut out = Vec::new();
        if self.required && text.is_empty() {
            out.push(Violation::Required);
        }
        // Length rules only apply to non-empty values.
        if len > 0 {
            if let Some(min) = self.min_length.filter(|min| len < *min) {
                out.push(Violation::MinLength(min));
            }
        }
        if let Some(max) = self.max_length.filter(|max| len > *max) {
            out.push(Violation::MaxLength(max));
        }
        out
    }

    /// Whether the value passes validation.
    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }

    /// The error message to display, once dirty and invalid.
    pub fn visible_error(&self) -> Option<&str> {
        (self.dirty && !self.is_valid()).then_some(self.error_text.as_str())
    }
}

impl Widget for Input {
    fn widget_type(&self) -> &str {
        "Input"
    }

    fn apply_attrs(&mut self, attrs: &AttributeBag, _cx: &mut WidgetContext) -> Result<(), WidgetError> {
        if let Some(label) = attrs.get_string("label") {
            self.label = label;
        }
        if let Some(name) = attrs.get_string("name") {
            self.name = name;
        }
        if let Some(kind) = attrs.get_string("type") {
            self.kind = kind;
        }
        if let Some(placeholder) = attrs.get_string("placeholder") {
            self.placeholder = placeholder;
        }
        if let Some(text) = attrs.get_string("errorText") {
            self.error_text = text;
        }
        if !self.initial_value_set {
            if let Some(value) = attrs.first_of(INITIAL_VALUE_KEYS) {
                self.value = value.clone();
                self.initial_value_set = true;
            }
        }
        if let Some(required) = attrs.get("required") {
            self.required = required.is_truthy();
        }
        self.min_length = length_attr(attrs, "minLength")?.or(self.min_length);
        self.max_length = length_attr(attrs, "maxLength")?.or(self.max_length);
        Ok(())
    }

    fn signals(&self) -> Signals {
        Signals::CHANGED
    }

    fn handle(&mut self, interaction: &Interaction, cx: &mut WidgetContext) -> bool {
        let Interaction::Input(text) = interaction else {
            return false;
        };
        self.value = AttrValue::Text(text.clone());
        self.dirty = true;
        cx.emit(Signal::Changed {
            name: (!self.name.is_empty()).then(|| self.name.clone()),
            value: self.value.clone(),
        });
        true
    }

    fn form_control(&self) -> Option<(String, AttrValue)> {
        (!self.name.is_empty()).then(|| (self.name.clone(), self.value.clone()))
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
