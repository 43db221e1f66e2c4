//! Outline snapshots of a composed tree.
//!
//! [`tree_to_string`] prints one line per widget, indented by nesting depth:
//! `Type` or `Type: text`. Content slots are transparent, so a widget's
//! children appear one level below it no matter how its slot is wired.
//! Two subtrees with equal outlines hold the same widgets in the same order.

use crate::dom::node::{NodeId, NodeKind};
use crate::view::View;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Outline everything below `point` (the point itself is not printed).
///
/// # Examples
///
/// ```
/// use atomic_view::testing::tree_to_string;
/// use atomic_view::View;
///
/// let mut view = View::with_defaults();
/// let root = view.root();
/// view.render("<form><input label='Name'/></form>", root).unwrap();
/// assert_eq!(tree_to_string(&view, root), "Form\n  Input: Name");
/// ```
pub fn tree_to_string(view: &View, point: NodeId) -> String {
    let mut lines = Vec::new();
    for &child in view.children(point) {
        outline(view, child, 0, &mut lines);
    }
    lines.join("\n")
}

/// Outline `node` and everything below it.
pub fn subtree_to_string(view: &View, node: NodeId) -> String {
    let mut lines = Vec::new();
    outline(view, node, 0, &mut lines);
    lines.join("\n")
}

/// The single-line label of a widget node, or its marker tag otherwise.
pub fn node_line(view: &View, node: NodeId) -> String {
    let Some(widget) = view.dyn_widget(node) else {
        return view
            .node(node)
            .map(|data| data.tag.clone())
            .unwrap_or_default();
    };
    match widget.text().filter(|text| !text.is_empty()) {
        Some(text) => format!("{}: {}", widget.widget_type(), text),
        None => widget.widget_type().to_owned(),
    }
}

fn outline(view: &View, node: NodeId, depth: usize, lines: &mut Vec<String>) {
    let Some(data) = view.node(node) else {
        return;
    };
    if matches!(data.kind, NodeKind::Slot | NodeKind::Host) {
        for &child in view.children(node) {
            outline(view, child, depth, lines);
        }
        return;
    }
    lines.push(format!("{}{}", "  ".repeat(depth), node_line(view, node)));
    for &child in view.children(node) {
        outline(view, child, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ManualClock;

    fn view() -> View {
        View::with_defaults().with_clock(ManualClock::new())
    }

    #[test]
    fn empty_point_is_empty_string() {
        let view = view();
        assert_eq!(tree_to_string(&view, view.root()), "");
    }

    #[test]
    fn nested_widgets_indent() {
        let mut view = view();
        let root = view.root();
        view.render(
            "<form submitLabel='Send'><input label='Name'/><button label='Go'/></form><label text='after'/>",
            root,
        )
        .unwrap();
        assert_eq!(
            tree_to_string(&view, root),
            "Form: Send\n  Input: Name\n  Button: Go\nLabel: after"
        );
    }

    #[test]
    fn subtree_includes_node() {
        let mut view = view();
        let root = view.root();
        view.render("<form><label text='x'/></form>", root).unwrap();
        let form = view.find_by_tag("form")[0];
        assert_eq!(subtree_to_string(&view, form), "Form\n  Label: x");
    }

    #[test]
    fn node_line_for_host_is_marker() {
        let view = view();
        assert_eq!(node_line(&view, view.root()), "#host");
    }
}
