//! Event bridge: forwards widget signals to the caller's hooks.
//!
//! Widgets are wired once, when instantiated. A form root (a widget that
//! declares `SUBMITTED`) gets a key from its `id` or `name` attribute, else a
//! synthesized `form_<n>`; its submission and value changes go to the form
//! hooks. Any other widget declaring `CHANGED` or `VALUE_CHANGED` forwards to
//! `on_input_change`.

use std::collections::HashMap;

use tracing::trace;

use super::hooks::{FormEvent, Hooks, InputChangeEvent};
use super::message::Signal;
use crate::dom::node::{NodeData, NodeId};
use crate::widget::traits::Signals;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Subscription {
    Form { key: String },
    Input,
}

/// Active hook set, the form-key counter, and per-widget subscriptions.
#[derive(Debug, Default)]
pub struct EventBridge {
    hooks: Hooks,
    counter: u64,
    subscriptions: HashMap<NodeId, Subscription>,
}

impl EventBridge {
    /// A bridge with no hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the hook set and restart form-key synthesis at `form_1`.
    pub fn set_hooks(&mut self, hooks: Hooks) {
        self.hooks = hooks;
        self.counter = 0;
    }

    /// The next synthesized form key.
    pub fn next_form_key(&mut self) -> String {
        self.counter += 1;
        format!("form_{}", self.counter)
    }

    /// Subscribe `node` according to the signals it declares.
    ///
    /// Returns the form key for form roots.
    pub fn wire(&mut self, node: NodeId, data: &NodeData, signals: Signals) -> Option<String> {
        if signals.contains(Signals::SUBMITTED) {
            let key = data
                .attrs
                .first_of(&["id", "name"])
                .map(ToString::to_string)
                .filter(|key| !key.is_empty())
                .unwrap_or_else(|| self.next_form_key());
            self.subscriptions
                .insert(node, Subscription::Form { key: key.clone() });
            return Some(key);
        }
        if signals.intersects(Signals::CHANGED | Signals::VALUE_CHANGED) {
            self.subscriptions.insert(node, Subscription::Input);
        }
        None
    }

    /// Drop the subscription of a torn-down node.
    pub fn unwire(&mut self, node: NodeId) {
        self.subscriptions.remove(&node);
    }

    /// The key a form root was wired with.
    pub fn form_key(&self, node: NodeId) -> Option<&str> {
        match self.subscriptions.get(&node)? {
            Subscription::Form { key } => Some(key),
            Subscription::Input => None,
        }
    }

    /// Whether `node` has any subscription.
    pub fn is_wired(&self, node: NodeId) -> bool {
        self.subscriptions.contains_key(&node)
    }

    /// Deliver `signal` from `sender` to the matching hook.
    ///
    /// Returns how many hook calls were made.
    pub fn forward(&mut self, sender: NodeId, data: &NodeData, signal: &Signal) -> usize {
        let Some(subscription) = self.subscriptions.get(&sender) else {
            return 0;
        };
        let called = match (subscription, signal) {
            (Subscription::Form { key }, Signal::Submitted(values)) => {
                let event = form_event(data, key, values);
                usize::from(self.hooks.form_submit(&event))
            }
            (Subscription::Form { key }, Signal::ValueChanged(values)) => {
                let event = form_event(data, key, values);
                usize::from(self.hooks.form_change(&event))
            }
            (Subscription::Input, Signal::Changed { name, value }) => {
                let name = name
                    .clone()
                    .filter(|name| !name.is_empty())
                    .or_else(|| data.attrs.get_string("name"));
                let event = InputChangeEvent {
                    tag: data.tag.clone(),
                    attrs: data.attrs.clone(),
                    name,
                    value: value.clone(),
                };
                usize::from(self.hooks.input_change(&event))
            }
            (Subscription::Input, Signal::ValueChanged(values)) => values
                .iter()
                .map(|(name, value)| InputChangeEvent {
                    tag: data.tag.clone(),
                    attrs: data.attrs.clone(),
                    name: Some(name.clone()),
                    value: value.clone(),
                })
                .map(|event| usize::from(self.hooks.input_change(&event)))
                .sum(),
            _ => 0,
        };
        if called > 0 {
            trace!(node = ?sender, tag = %data.tag, signal = %signal, "hook dispatched");
        }
        called
    }
}

fn form_event(data: &NodeData, key: &str, values: &super::message::FormValues) -> FormEvent {
    FormEvent {
        tag: data.tag.clone(),
        attrs: data.attrs.clone(),
        value: values.clone(),
        key: key.to_owned(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
