//! Markup serialization: node trees back to strings.
//!
//! Atomic widgets receive their inner markup as a string and lazy placeholders
//! keep the whole element; both go through here.

use quick_xml::escape::{escape, partial_escape};

use super::parser::{Element, MarkupNode};

/// Serialize one node.
pub fn to_markup(node: &MarkupNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

/// Serialize an element including its own tag.
pub fn element_to_markup(element: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, element);
    out
}

/// Serialize only the children of an element.
pub fn inner_markup(element: &Element) -> String {
    let mut out = String::new();
    for child in &element.children {
        write_node(&mut out, child);
    }
    out
}

fn write_node(out: &mut String, node: &MarkupNode) {
    match node {
        MarkupNode::Element(el) => write_element(out, el),
        MarkupNode::Text(text) => out.push_str(&partial_escape(text.as_str())),
        MarkupNode::Comment(body) => {
            out.push_str("<!--");
            out.push_str(body);
            out.push_str("-->");
        }
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }
    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &element.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parser::parse;

    fn first_element(markup: &str) -> Element {
        match &parse(markup).unwrap().children()[0] {
            MarkupNode::Element(el) => el.clone(),
            other => panic!("expected element, got {other:?}"),
        }
    }

    #[test]
    fn empty_element_self_closes() {
        let el = first_element(r#"<button label="ok"></button>"#);
        assert_eq!(element_to_markup(&el), r#"<button label="ok"/>"#);
    }

    #[test]
    fn inner_markup_excludes_own_tag() {
        let el = first_element(r#"<card title="t"><label text="x"/> hi </card>"#);
        assert_eq!(inner_markup(&el), r#"<label text="x"/> hi "#);
    }

    #[test]
    fn escapes_attribute_values_and_text() {
        let el = first_element(r#"<p q="a &quot;b&quot; &amp; c">1 &lt; 2</p>"#);
        assert_eq!(
            element_to_markup(&el),
            r#"<p q="a &quot;b&quot; &amp; c">1 &lt; 2</p>"#
        );
    }

    #[test]
    fn comments_survive() {
        let el = first_element("<div><!--x--><a/></div>");
        assert_eq!(inner_markup(&el), "<!--x--><a/>");
    }

    #[test]
    fn serialized_markup_reparses_to_same_tree() {
        let el = first_element(r#"<tabs activeIndex="1"><tab label="ا"><label text="b"/></tab></tabs>"#);
        let again = first_element(&element_to_markup(&el));
        assert_eq!(el, again);
    }

    #[test]
    fn to_markup_on_text_node() {
        assert_eq!(to_markup(&MarkupNode::Text("a & b".into())), "a &amp; b");
    }
}
