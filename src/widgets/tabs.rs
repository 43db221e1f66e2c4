//! Tabs widget: a composite group that activates one child tab at a time.

use std::any::Any;

use crate::error::WidgetError;
use crate::markup::{AttrValue, AttributeBag};
use crate::widget::traits::{Interaction, Widget, WidgetContext};

/// Container for [`Tab`](super::Tab) panes.
///
/// Children are expanded into the content host by the engine. On its mount
/// turn (which runs after the children were attached) the group activates
/// the pane at `activeIndex`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tabs {
    active_index: usize,
    mounted: bool,
}

impl Tabs {
    /// Index of the active pane.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    fn select(&mut self, index: usize, cx: &mut WidgetContext) {
        self.active_index = index;
        if self.mounted {
            cx.activate_children(index);
        }
    }
}

impl Widget for Tabs {
    fn widget_type(&self) -> &str {
        "Tabs"
    }

    fn apply_attrs(&mut self, attrs: &AttributeBag, cx: &mut WidgetContext) -> Result<(), WidgetError> {
        match attrs.get("activeIndex") {
            None => Ok(()),
            Some(AttrValue::Number(n)) if n.fract() == 0.0 && *n >= 0.0 && *n <= usize::MAX as f64 => {
                self.select(*n as usize, cx);
                Ok(())
            }
            Some(other) => Err(WidgetError::invalid(
                "activeIndex",
                format!("expected a non-negative integer, got `{other}`"),
            )),
        }
    }

    fn has_content_host(&self) -> bool {
        true
    }

    fn on_mount(&mut self, cx: &mut WidgetContext) {
        self.mounted = true;
        cx.activate_children(self.active_index);
    }

    fn handle(&mut self, interaction: &Interaction, cx: &mut WidgetContext) -> bool {
        match *interaction {
            Interaction::Select(index) => {
                self.select(index, cx);
                true
            }
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
