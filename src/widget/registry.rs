//! Widget registry: lowercase tag to factory plus atomic flag.
//!
//! Owned by the [`View`](crate::view::View) rather than held in a global. It is
//! seeded by [`WidgetRegistry::with_defaults`] and changed only through
//! explicit calls; registering an existing tag replaces it.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::traits::Widget;

/// Builds a fresh widget instance.
pub type WidgetFactory = Rc<dyn Fn() -> Box<dyn Widget>>;

/// One registry entry.
#[derive(Clone)]
pub struct WidgetDescriptor {
    /// Lowercase tag.
    pub tag: String,
    /// Instance factory.
    pub factory: WidgetFactory,
    /// Whether instances own and render their inner markup themselves.
    pub atomic: bool,
}

impl WidgetDescriptor {
    /// Build a new instance.
    pub fn instantiate(&self) -> Box<dyn Widget> {
        (self.factory)()
    }
}

impl fmt::Debug for WidgetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetDescriptor")
            .field("tag", &self.tag)
            .field("atomic", &self.atomic)
            .finish_non_exhaustive()
    }
}

/// Tag-keyed widget registry. All lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    entries: BTreeMap<String, WidgetDescriptor>,
}

impl WidgetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the built-in tags.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        crate::widgets::register_defaults(&mut registry);
        registry
    }

    /// Register a composite widget, replacing any entry for `tag`.
    pub fn register<F>(&mut self, tag: &str, factory: F)
    where
        F: Fn() -> Box<dyn Widget> + 'static,
    {
        self.insert(tag, Rc::new(factory), false);
    }

    /// Register an atomic widget, replacing any entry for `tag`.
    pub fn register_atomic<F>(&mut self, tag: &str, factory: F)
    where
        F: Fn() -> Box<dyn Widget> + 'static,
    {
        self.insert(tag, Rc::new(factory), true);
    }

    /// Register with an explicit atomic flag.
    pub fn insert(&mut self, tag: &str, factory: WidgetFactory, atomic: bool) {
        let tag = tag.to_lowercase();
        self.entries.insert(
            tag.clone(),
            WidgetDescriptor {
                tag,
                factory,
                atomic,
            },
        );
    }

    /// Look up a tag.
    pub fn get(&self, tag: &str) -> Option<&WidgetDescriptor> {
        self.entries.get(&tag.to_lowercase())
    }

    /// Whether `tag` is registered atomic. Unknown tags are not atomic.
    pub fn is_atomic(&self, tag: &str) -> bool {
        self.get(tag).is_some_and(|desc| desc.atomic)
    }

    /// Whether `tag` is registered.
    pub fn has(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Remove one tag. Returns the old entry.
    pub fn unregister(&mut self, tag: &str) -> Option<WidgetDescriptor> {
        self.entries.remove(&tag.to_lowercase())
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries in tag order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &WidgetDescriptor)> {
        self.entries.iter().map(|(tag, desc)| (tag.as_str(), desc))
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tag is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
