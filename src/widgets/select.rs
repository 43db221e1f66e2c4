//! Select widget: a named choice among options.
//!
//! `options` is either a JSON array of `{"label", "value"}` objects or a
//! `label:value|label:value` list (a bare `label` uses itself as value).

use std::any::Any;

use serde::Deserialize;

use crate::error::WidgetError;
use crate::event::message::Signal;
use crate::markup::{AttrValue, AttributeBag};
use crate::widget::traits::{Interaction, Signals, Widget, WidgetContext};

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

#[derive(Deserialize)]
struct RawOption {
    #[serde(default)]
    label: String,
    #[serde(default)]
    value: Option<serde_json::Value>,
}

impl From<RawOption> for SelectOption {
    fn from(raw: RawOption) -> Self {
        let value = match raw.value {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Null) | None => raw.label.clone(),
            Some(other) => other.to_string(),
        };
        Self {
            label: raw.label,
            value,
        }
    }
}

/// Parse an `options` attribute.
pub fn parse_options(raw: &str) -> Result<Vec<SelectOption>, serde_json::Error> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    if raw.starts_with('[') {
        let parsed: Vec<RawOption> = serde_json::from_str(raw)?;
        return Ok(parsed.into_iter().map(SelectOption::from).collect());
    }
    Ok(raw
        .split('|')
        .map(|pair| {
            let (label, value) = pair.split_once(':').unwrap_or((pair, pair));
            SelectOption {
                label: label.trim().to_owned(),
                value: value.trim().to_owned(),
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Select
// ---------------------------------------------------------------------------

/// A choice control.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    label: String,
    name: String,
    required: bool,
    options: Vec<SelectOption>,
    value: AttrValue,
    initial_value_set: bool,
}

impl Default for Select {
    fn default() -> Self {
        Self {
            label: String::new(),
            name: String::new(),
            required: false,
            options: Vec::new(),
            value: AttrValue::from(""),
            initial_value_set: false,
        }
    }
}

impl Select {
    /// Field caption.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Control name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Available options.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Current value.
    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    /// Whether a required select still has no value.
    pub fn is_valid(&self) -> bool {
        !(self.required && self.value.to_string().is_empty())
    }
}

impl Widget for Select {
    fn widget_type(&self) -> &str {
        "Select"
    }

    fn apply_attrs(&mut self, attrs: &AttributeBag, _cx: &mut WidgetContext) -> Result<(), WidgetError> {
        if let Some(label) = attrs.get_string("label") {
            self.label = label;
        }
        if let Some(name) = attrs.get_string("name") {
            self.name = name;
        }
        if let Some(required) = attrs.get("required") {
            self.required = required.is_truthy();
        }
        if !self.initial_value_set {
            if let Some(value) = attrs.first_of(&["value", "defaultValue"]) {
                self.value = value.clone();
                self.initial_value_set = true;
            }
        }
        if let Some(raw) = attrs.get_string("options") {
            match parse_options(&raw) {
                Ok(options) => self.options = options,
                Err(err) => {
                    self.options.clear();
                    return Err(WidgetError::invalid("options", err.to_string()));
                }
            }
        }
        Ok(())
    }

    fn signals(&self) -> Signals {
        Signals::CHANGED
    }

    fn handle(&mut self, interaction: &Interaction, cx: &mut WidgetContext) -> bool {
        let Interaction::Select(index) = *interaction else {
            return false;
        };
        let Some(option) = self.options.get(index) else {
            return false;
        };
        self.value = AttrValue::Text(option.value.clone());
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
