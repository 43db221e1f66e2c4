//! Signals and envelopes.
//!
//! Widgets talk upwards through a small fixed vocabulary of [`Signal`]s. The
//! view wraps each one in an [`Envelope`] carrying the sender and routes it to
//! the enclosing form and to the caller's hooks.

use std::collections::BTreeMap;
use std::fmt;

use crate::dom::node::NodeId;
use crate::markup::AttrValue;

/// Control values of a form, keyed by control name.
pub type FormValues = BTreeMap<String, AttrValue>;

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// Something a widget reports upwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// A form was submitted with these values.
    Submitted(FormValues),
    /// A form's values changed.
    ValueChanged(FormValues),
    /// A single control changed. `name` is the control's own name, if any.
    Changed {
        name: Option<String>,
        value: AttrValue,
    },
    /// A button was activated.
    Clicked,
}

impl Signal {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Submitted(_) => "submitted",
            Signal::ValueChanged(_) => "valueChanged",
            Signal::Changed { .. } => "changed",
            Signal::Clicked => "clicked",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// A signal plus the node that emitted it.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// The payload.
    pub signal: Signal,
    /// The emitting widget.
    pub sender: NodeId,
}

impl Envelope {
    /// Wrap `signal` as sent by `sender`.
    pub fn new(signal: Signal, sender: NodeId) -> Self {
        Self { signal, sender }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn signal_names() {
        assert_eq!(Signal::Clicked.name(), "clicked");
        assert_eq!(Signal::Submitted(FormValues::new()).to_string(), "submitted");
        assert_eq!(
            Signal::Changed {
                name: None,
                value: AttrValue::from("x")
            }
            .name(),
            "changed"
        );
    }

    #[test]
    fn envelope_keeps_sender() {
        let mut sm: SlotMap<NodeId, ()> = SlotMap::with_key();
        let id = sm.insert(());
        let env = Envelope::new(Signal::Clicked, id);
        assert_eq!(env.sender, id);
        assert_eq!(env.signal, Signal::Clicked);
    }
}
