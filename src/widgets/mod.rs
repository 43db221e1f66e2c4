//! Built-in widgets: Label, Button, Card, Tabs, Tab, Form, Input, Select,
//! and the lazy placeholder.

pub mod button;
pub mod card;
pub mod form;
pub mod input;
pub mod label;
pub mod placeholder;
pub mod select;
pub mod tab;
pub mod tabs;

pub use button::Button;
pub use card::Card;
pub use form::Form;
pub use input::{Input, Violation};
pub use label::Label;
pub use placeholder::LazyPlaceholder;
pub use select::{Select, SelectOption};
pub use tab::Tab;
pub use tabs::Tabs;

use crate::widget::registry::WidgetRegistry;

/// Register the baseline tag set: `card` and `tab` atomic, the rest composite.
pub fn register_defaults(registry: &mut WidgetRegistry) {
    registry.register("label", || Box::new(Label::default()));
    registry.register("button", || Box::new(Button::default()));
    registry.register_atomic("card", || Box::new(Card::default()));
    registry.register("tabs", || Box::new(Tabs::default()));
    registry.register_atomic("tab", || Box::new(Tab::default()));
    registry.register("form", || Box::new(Form::default()));
    registry.register("input", || Box::new(Input::default()));
    registry.register("select", || Box::new(Select::default()));
}
