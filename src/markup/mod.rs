//! Markup: parsing, serialization, attribute coercion.

pub mod coerce;
pub mod parser;
pub mod serialize;

pub use coerce::{coerce, kebab_to_camel, AttrValue, AttributeBag};
pub use parser::{parse, Document, Element, MarkupNode, ParseError};
pub use serialize::{element_to_markup, inner_markup, to_markup};
