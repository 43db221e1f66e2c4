//! # atomic-view
//!
//! Runtime composition of widget trees from markup.
//!
//! A caller hands a [`View`] a markup string; every element becomes a widget
//! resolved through a [`WidgetRegistry`], with attribute strings coerced to
//! typed values. Widgets registered *atomic* receive their inner markup and
//! render it themselves. Elements marked `lazy` stand behind a placeholder
//! until they have been visible for a delay. Form and input widgets are
//! wired to caller [`Hooks`](event::Hooks).
//!
//! ## Core Systems
//!
//! - **[`markup`]**: parser, attribute coercion, serialization
//! - **[`dom`]**: slotmap-backed node arena and queries
//! - **[`widget`]**: widget trait, registry, lifecycle tracking
//! - **[`widgets`]**: built-in widgets (Label, Button, Card, Tabs, Tab, Form, Input, Select)
//! - **[`engine`]**: the recursive composer and render context
//! - **[`lazy`]**: lazy placeholders and visibility sources
//! - **[`event`]**: signals, dispatch queue, caller hooks, event bridge
//! - **[`runtime`]**: clocks and the deferred-work scheduler
//! - **[`view`]**: the view that owns all of the above
//! - **[`testing`]**: headless pilot and outline snapshots

// Foundation
pub mod error;
pub mod markup;

// Core systems
pub mod dom;
pub mod engine;
pub mod runtime;

// Widget system
pub mod widget;
pub mod widgets;

// Deferral and events
pub mod event;
pub mod lazy;

// View
pub mod view;

pub mod testing;

pub use engine::RenderContext;
pub use error::{ViewError, WidgetError};
pub use markup::{AttrValue, AttributeBag, ParseError};
pub use view::{UnknownTagPolicy, View, ViewConfig};
pub use widget::{Interaction, Widget, WidgetRegistry};
