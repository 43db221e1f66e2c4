//! The caller's hook set and the payloads it receives.

use std::fmt;

use super::message::FormValues;
use crate::markup::{AttrValue, AttributeBag};

/// Payload of `on_form_submit` and `on_form_change`.
#[derive(Debug, Clone, PartialEq)]
pub struct FormEvent {
    /// Tag of the form widget.
    pub tag: String,
    /// The form's coerced attributes.
    pub attrs: AttributeBag,
    /// Current control values.
    pub value: FormValues,
    /// The form's `id` or `name`, or a synthesized `form_<n>`.
    pub key: String,
}

/// Payload of `on_input_change`.
#[derive(Debug, Clone, PartialEq)]
pub struct InputChangeEvent {
    /// Tag of the emitting widget.
    pub tag: String,
    /// Its coerced attributes.
    pub attrs: AttributeBag,
    /// Control name from the signal, else from the `name` attribute.
    pub name: Option<String>,
    /// The new value.
    pub value: AttrValue,
}

type FormHook = Box<dyn FnMut(&FormEvent)>;
type InputHook = Box<dyn FnMut(&InputChangeEvent)>;

/// Callbacks for form and input events. Every hook is optional.
///
/// ```
/// use atomic_view::event::Hooks;
///
/// let hooks = Hooks::new()
///     .on_form_submit(|ev| println!("{} submitted {:?}", ev.key, ev.value))
///     .on_input_change(|ev| println!("{:?} = {}", ev.name, ev.value));
/// assert!(hooks.has_any());
/// ```
#[derive(Default)]
pub struct Hooks {
    form_submit: Option<FormHook>,
    form_change: Option<FormHook>,
    input_change: Option<InputHook>,
}

impl Hooks {
    /// An empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the submit hook (builder).
    pub fn on_form_submit(mut self, hook: impl FnMut(&FormEvent) + 'static) -> Self {
        self.form_submit = Some(Box::new(hook));
        self
    }

    /// Set the form value-change hook (builder).
    pub fn on_form_change(mut self, hook: impl FnMut(&FormEvent) + 'static) -> Self {
        self.form_change = Some(Box::new(hook));
        self
    }

    /// Set the input-change hook (builder).
    pub fn on_input_change(mut self, hook: impl FnMut(&InputChangeEvent) + 'static) -> Self {
        self.input_change = Some(Box::new(hook));
        self
    }

    /// Whether at least one hook is set.
    pub fn has_any(&self) -> bool {
        self.form_submit.is_some() || self.form_change.is_some() || self.input_change.is_some()
    }

    pub(crate) fn form_submit(&mut self, event: &FormEvent) -> bool {
        self.form_submit.as_mut().map(|hook| hook(event)).is_some()
    }

    pub(crate) fn form_change(&mut self, event: &FormEvent) -> bool {
        self.form_change.as_mut().map(|hook| hook(event)).is_some()
    }

    pub(crate) fn input_change(&mut self, event: &InputChangeEvent) -> bool {
        self.input_change.as_mut().map(|hook| hook(event)).is_some()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_form_submit", &self.form_submit.is_some())
            .field("on_form_change", &self.form_change.is_some())
            .field("on_input_change", &self.input_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn form_event(key: &str) -> FormEvent {
        FormEvent {
            tag: "form".into(),
            attrs: AttributeBag::new(),
            value: FormValues::new(),
            key: key.into(),
        }
    }

    #[test]
    fn empty_hooks_report_nothing_called() {
        let mut hooks = Hooks::new();
        assert!(!hooks.has_any());
        assert!(!hooks.form_submit(&form_event("a")));
    }

    #[test]
    fn submit_hook_receives_event() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut hooks = Hooks::new().on_form_submit(move |ev| sink.borrow_mut().push(ev.key.clone()));
        assert!(hooks.form_submit(&form_event("login")));
        assert!(!hooks.form_change(&form_event("login")));
        assert_eq!(*seen.borrow(), vec!["login".to_owned()]);
    }

    #[test]
    fn debug_shows_presence() {
        let hooks = Hooks::new().on_form_change(|_| {});
        let text = format!("{hooks:?}");
        assert!(text.contains("on_form_change: true"));
        assert!(text.contains("on_form_submit: false"));
    }
}
