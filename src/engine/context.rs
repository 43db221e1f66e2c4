//! Caller context threaded through every render.
//!
//! The engine never looks inside; it only clones the handle into each node it
//! creates so nested widgets (and renders they trigger later) see the same
//! values.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// An immutable, cheaply cloned type map of caller values.
///
/// ```
/// use atomic_view::engine::RenderContext;
///
/// #[derive(Debug, PartialEq)]
/// struct Locale(&'static str);
///
/// let cx = RenderContext::new().with(Locale("fa-IR"));
/// assert_eq!(cx.get::<Locale>(), Some(&Locale("fa-IR")));
/// assert!(cx.get::<u32>().is_none());
/// ```
#[derive(Clone, Default)]
pub struct RenderContext {
    values: Rc<HashMap<TypeId, Rc<dyn Any>>>,
}

impl RenderContext {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of this context with `value` added (replacing any value of the
    /// same type).
    pub fn with<T: Any>(&self, value: T) -> Self {
        let mut values = (*self.values).clone();
        values.insert(TypeId::of::<T>(), Rc::new(value));
        Self {
            values: Rc::new(values),
        }
    }

    /// The value of type `T`, if present.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether two handles share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.values, &other.values)
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("values", &self.values.len())
            .finish()
    }
}
