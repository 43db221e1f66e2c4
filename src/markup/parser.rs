//! Markup parser: quick-xml events folded into an owned node tree.
//!
//! The input is wrapped in a synthetic root element before parsing, so several
//! top-level siblings and bare text are both legal. Malformed input comes back
//! as a [`ParseError`]; nothing panics past this boundary.

use std::borrow::Cow;
use std::fmt::Display;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// Name of the synthetic element that wraps every parsed document.
pub const SYNTHETIC_ROOT: &str = "root";

/// Errors from markup parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },
    #[error("element <{name}> is never closed")]
    UnclosedElement { name: String },
    #[error("unexpected closing tag </{found}>, expected </{expected}>")]
    UnexpectedClosingTag { expected: String, found: String },
    #[error("invalid entity reference: {message}")]
    Entity { message: String },
    #[error("invalid attribute: {message}")]
    Attribute { message: String },
    #[error("content after the end of the document")]
    TrailingContent,
}

// ---------------------------------------------------------------------------
// Node tree
// ---------------------------------------------------------------------------

/// One parsed markup node.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    /// An element with attributes and children.
    Element(Element),
    /// Character data (entities resolved, CDATA merged in).
    Text(String),
    /// A comment; never rendered.
    Comment(String),
}

/// A parsed element. Attribute order and name casing are preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag name as written.
    pub name: String,
    /// Raw `(name, value)` pairs, values unescaped.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<MarkupNode>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The tag name lowercased, as used for registry lookups.
    pub fn tag(&self) -> String {
        self.name.to_lowercase()
    }

    /// Raw value of an attribute by exact name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// A copy of this element without the named attributes.
    pub fn without_attributes(&self, names: &[&str]) -> Self {
        Self {
            name: self.name.clone(),
            attributes: self
                .attributes
                .iter()
                .filter(|(k, _)| !names.contains(&k.as_str()))
                .cloned()
                .collect(),
            children: self.children.clone(),
        }
    }
}

/// A successfully parsed document: the synthetic root and its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// The synthetic root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The top-level nodes to render, in document order.
    pub fn children(&self) -> &[MarkupNode] {
        &self.root.children
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a markup string into a [`Document`].
///
/// Blank input yields an empty document; the engine short-circuits before
/// calling this, but the parser tolerates it too.
pub fn parse(markup: &str) -> Result<Document, ParseError> {
    let wrapped = format!("<{SYNTHETIC_ROOT}>{markup}</{SYNTHETIC_ROOT}>");
    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                flush_text(&mut stack, &mut text)?;
                if root.is_some() {
                    return Err(ParseError::TrailingContent);
                }
                stack.push(element_from_start(&reader, &e)?);
            }
            Ok(Event::Empty(e)) => {
                flush_text(&mut stack, &mut text)?;
                let element = element_from_start(&reader, &e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(MarkupNode::Element(element)),
                    None => return Err(ParseError::TrailingContent),
                }
            }
            Ok(Event::End(e)) => {
                flush_text(&mut stack, &mut text)?;
                let found = decode(&reader, e.name().as_ref())?.into_owned();
                let Some(element) = stack.pop() else {
                    return Err(ParseError::TrailingContent);
                };
                if element.name != found {
                    return Err(ParseError::UnexpectedClosingTag {
                        expected: element.name,
                        found,
                    });
                }
                match stack.last_mut() {
                    Some(parent) => parent.children.push(MarkupNode::Element(element)),
                    None => root = Some(element),
                }
            }
            Ok(Event::Text(e)) => {
                let decoded = e.decode().map_err(|err| syntax(&reader, err))?;
                text.push_str(&decoded);
            }
            Ok(Event::CData(e)) => {
                let decoded = reader.decoder().decode(&e).map_err(|err| syntax(&reader, err))?;
                text.push_str(&decoded);
            }
            Ok(Event::GeneralRef(e)) => {
                let name = e.decode().map_err(|err| syntax(&reader, err))?;
                let reference = format!("&{name};");
                let resolved = quick_xml::escape::unescape(&reference).map_err(|err| {
                    ParseError::Entity {
                        message: err.to_string(),
                    }
                })?;
                text.push_str(&resolved);
            }
            Ok(Event::Comment(e)) => {
                flush_text(&mut stack, &mut text)?;
                let body = reader.decoder().decode(&e).map_err(|err| syntax(&reader, err))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(MarkupNode::Comment(body.into_owned())),
                    None => return Err(ParseError::TrailingContent),
                }
            }
            Ok(Event::Eof) => break,
            // Declarations, processing instructions and doctypes carry nothing to render.
            Ok(_) => {}
            Err(err) => return Err(syntax(&reader, err)),
        }
    }

    flush_text(&mut stack, &mut text)?;
    if let Some(open) = stack.pop() {
        return Err(ParseError::UnclosedElement { name: open.name });
    }
    root.map(|root| Document { root })
        .ok_or_else(|| ParseError::UnclosedElement {
            name: SYNTHETIC_ROOT.to_owned(),
        })
}

/// Move pending character data into the innermost open element.
fn flush_text(stack: &mut [Element], text: &mut String) -> Result<(), ParseError> {
    if text.is_empty() {
        return Ok(());
    }
    let pending = std::mem::take(text);
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(MarkupNode::Text(pending));
            Ok(())
        }
        None if pending.trim().is_empty() => Ok(()),
        None => Err(ParseError::TrailingContent),
    }
}

fn element_from_start(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Result<Element, ParseError> {
    let mut element = Element::new(decode(reader, e.name().as_ref())?.into_owned());
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ParseError::Attribute {
            message: err.to_string(),
        })?;
        let key = decode(reader, attr.key.as_ref())?.into_owned();
        let raw = decode(reader, &attr.value)?;
        let value = quick_xml::escape::unescape(&raw).map_err(|err| ParseError::Entity {
            message: err.to_string(),
        })?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn decode<'b>(reader: &Reader<&[u8]>, raw: &'b [u8]) -> Result<Cow<'b, str>, ParseError> {
    reader.decoder().decode(raw).map_err(|err| syntax(reader, err))
}

fn syntax(reader: &Reader<&[u8]>, err: impl Display) -> ParseError {
    ParseError::Syntax {
        position: reader.buffer_position(),
        message: err.to_string(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn element(node: &MarkupNode) -> &Element {
        match node {
            MarkupNode::Element(el) => el,
            other => panic!("expected element, got {other:?}"),
        }
    }

    #[test]
    fn parses_multiple_top_level_siblings() {
        let doc = parse(r#"<label text="a"/><button label="b"/>"#).unwrap();
        assert_eq!(doc.children().len(), 2);
        assert_eq!(element(&doc.children()[0]).name, "label");
        assert_eq!(element(&doc.children()[1]).name, "button");
    }

    #[test]
    fn root_is_synthetic() {
        let doc = parse("<a/>").unwrap();
        assert_eq!(doc.root().name, SYNTHETIC_ROOT);
    }

    #[test]
    fn bare_text_is_legal() {
        let doc = parse("hello world").unwrap();
        assert_eq!(doc.children(), &[MarkupNode::Text("hello world".into())]);
    }

    #[test]
    fn blank_input_is_empty_document() {
        let doc = parse("").unwrap();
        assert!(doc.children().is_empty());
    }

    #[test]
    fn nested_children_in_order() {
        let doc = parse("<card><label/>text<button/></card>").unwrap();
        let card = element(&doc.children()[0]);
        assert_eq!(card.children.len(), 3);
        assert_eq!(element(&card.children[0]).name, "label");
        assert_eq!(card.children[1], MarkupNode::Text("text".into()));
        assert_eq!(element(&card.children[2]).name, "button");
    }

    #[test]
    fn attributes_keep_order_and_case() {
        let doc = parse(r#"<tabs activeIndex="1" data-x="y"/>"#).unwrap();
        let tabs = element(&doc.children()[0]);
        assert_eq!(
            tabs.attributes,
            vec![
                ("activeIndex".to_owned(), "1".to_owned()),
                ("data-x".to_owned(), "y".to_owned()),
            ]
        );
    }

    #[test]
    fn attribute_entities_unescaped() {
        let doc = parse(r#"<label text="a &amp; b &lt;c&gt;"/>"#).unwrap();
        assert_eq!(element(&doc.children()[0]).attribute("text"), Some("a & b <c>"));
    }

    #[test]
    fn text_entities_resolved_and_merged() {
        let doc = parse("<p>fish &amp; chips</p>").unwrap();
        let p = element(&doc.children()[0]);
        assert_eq!(p.children, vec![MarkupNode::Text("fish & chips".into())]);
    }

    #[test]
    fn cdata_becomes_text() {
        let doc = parse("<p><![CDATA[<raw>]]></p>").unwrap();
        let p = element(&doc.children()[0]);
        assert_eq!(p.children, vec![MarkupNode::Text("<raw>".into())]);
    }

    #[test]
    fn comments_are_kept_as_nodes() {
        let doc = parse("<!-- note --><a/>").unwrap();
        assert_eq!(doc.children()[0], MarkupNode::Comment(" note ".into()));
    }

    #[test]
    fn non_ascii_text_survives() {
        let doc = parse(r#"<button label="ویرایش"/>"#).unwrap();
        assert_eq!(element(&doc.children()[0]).attribute("label"), Some("ویرایش"));
    }

    #[test]
    fn tag_is_lowercased() {
        let el = Element::new("Card");
        assert_eq!(el.tag(), "card");
    }

    #[test]
    fn without_attributes_strips_named() {
        let doc = parse(r#"<card lazy="true" title="t" lazy-load="1"/>"#).unwrap();
        let stripped = element(&doc.children()[0]).without_attributes(&["lazy", "lazy-load"]);
        assert_eq!(stripped.attributes, vec![("title".to_owned(), "t".to_owned())]);
    }

    // ── malformed input ──────────────────────────────────────────────

    #[test]
    fn mismatched_closing_tag_is_error() {
        assert!(parse("<card><label></card>").is_err());
    }

    #[test]
    fn unclosed_element_is_error() {
        assert!(parse("<card>").is_err());
    }

    #[test]
    fn stray_closing_tag_is_error() {
        assert!(parse("</card>").is_err());
    }

    #[test]
    fn unknown_entity_is_error() {
        assert!(parse("<p>&nope;</p>").is_err());
    }

    #[test]
    fn duplicate_attribute_is_error() {
        assert!(parse(r#"<a x="1" x="2"/>"#).is_err());
    }

    #[test]
    fn error_message_is_displayable() {
        let err = parse("<card>").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
