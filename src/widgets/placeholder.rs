//! Lazy placeholder: stands in for a deferred subtree.
//!
//! Created by the engine, never registered under a tag. Its content host
//! receives the deferred markup once the lazy controller materializes it.

use std::any::Any;
use std::time::Duration;

use crate::error::WidgetError;
use crate::markup::AttributeBag;
use crate::widget::traits::{Widget, WidgetContext};

/// Placeholder widget with a loading flag.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyPlaceholder {
    delay: Duration,
    loading: bool,
}

impl LazyPlaceholder {
    /// A loading placeholder that will wait `delay` after becoming visible.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            loading: true,
        }
    }

    /// Whether the deferred content has not arrived yet.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Clear the loading flag.
    pub fn finish(&mut self) {
        self.loading = false;
    }
}

impl Widget for LazyPlaceholder {
    fn widget_type(&self) -> &str {
        "Lazy"
    }

    fn apply_attrs(&mut self, _attrs: &AttributeBag, _cx: &mut WidgetContext) -> Result<(), WidgetError> {
        Ok(())
    }

    fn has_content_host(&self) -> bool {
        true
    }

    fn text(&self) -> Option<&str> {
        self.loading.then_some("loading")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
