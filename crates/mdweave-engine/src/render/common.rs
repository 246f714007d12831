//! Rendering rules both dialects agree on.

use crate::ast::{CellAlign, ListData, ListKind, Node, NodeKind, NodeType};

use super::base::{BaseRenderer, escape_html};

const HEADING_TAGS: [(&str, &str); 6] = [
    ("h1", "/h1"),
    ("h2", "/h2"),
    ("h3", "/h3"),
    ("h4", "/h4"),
    ("h5", "/h5"),
    ("h6", "/h6"),
];

/// Opening and closing tag names for a heading node.
///
/// # Panics
///
/// Panics on a non-heading node or a level outside 1..=6.
pub(crate) fn heading_tags(node: Node<'_>) -> (&'static str, &'static str) {
    let NodeKind::Heading { level } = *node.kind() else {
        panic!("heading handler invoked on {:?}", node.node_type());
    };
    assert!(
        (1..=6).contains(&level),
        "heading level {level} out of range 1..=6"
    );
    HEADING_TAGS[usize::from(level) - 1]
}

/// Whether a paragraph sits directly in an item of a tight list and so
/// renders without `<p>` tags.
pub(crate) fn in_tight_list(node: Node<'_>) -> bool {
    node.parent()
        .and_then(|item| item.parent())
        .is_some_and(|list| matches!(list.kind(), NodeKind::List(data) if data.tight))
}

fn list_data(node: Node<'_>) -> ListData {
    match node.kind() {
        NodeKind::List(data) | NodeKind::ListItem(data) => *data,
        other => panic!("list handler invoked on {other:?}"),
    }
}

pub(crate) fn list(base: &mut BaseRenderer, node: Node<'_>, entering: bool) {
    let data = list_data(node);
    let tag = data.tag();
    if !entering {
        base.tag(&format!("/{tag}"), &[], false);
        return;
    }
    match data.start_attr() {
        Some(start) => base.tag(tag, &[("start", start.to_string().as_str())], false),
        None => base.tag(tag, &[], false),
    }
}

pub(crate) fn list_item(base: &mut BaseRenderer, node: Node<'_>, entering: bool) {
    if !entering {
        base.tag("/li", &[], false);
        return;
    }
    let data = list_data(node);
    let class = escape_html(&base.options().task_list_item_class).into_owned();
    if data.kind == ListKind::Task && !class.is_empty() {
        base.tag("li", &[("class", class.as_str())], false);
    } else {
        base.tag("li", &[], false);
    }
}

/// A disabled checkbox reflecting the stored flag.
pub(crate) fn task_list_item_marker(base: &mut BaseRenderer, node: Node<'_>) {
    let NodeKind::TaskListItemMarker { checked } = *node.kind() else {
        return;
    };
    let mut attrs = Vec::with_capacity(3);
    if checked {
        attrs.push(("checked", ""));
    }
    attrs.extend([("disabled", ""), ("type", "checkbox")]);
    base.tag("input", &attrs, true);
}

/// `th` inside a table head, `td` everywhere else.
pub(crate) fn table_cell_tag(node: Node<'_>) -> &'static str {
    match node.parent().map(|p| p.node_type()) {
        Some(NodeType::TableHead) => "th",
        _ => "td",
    }
}

pub(crate) fn table_cell(base: &mut BaseRenderer, node: Node<'_>, entering: bool) {
    let tag = table_cell_tag(node);
    if !entering {
        base.tag(&format!("/{tag}"), &[], false);
        return;
    }
    let align = match node.kind() {
        NodeKind::TableCell { align } => *align,
        _ => CellAlign::None,
    };
    match align.attr() {
        Some(value) => base.tag(tag, &[("align", value)], false),
        None => base.tag(tag, &[], false),
    }
}

/// Writes `<pre><code>`, with a `language-*` class when a language is known,
/// then the escaped code and the closing tags.
pub(crate) fn code_block(base: &mut BaseRenderer, language: Option<&str>, code: &str) {
    base.tag("pre", &[], false);
    match language {
        Some(lang) => {
            let class = format!("language-{}", escape_html(lang));
            base.tag("code", &[("class", class.as_str())], false);
        }
        None => base.tag("code", &[], false),
    }
    base.write_escaped(code);
    base.tag("/code", &[], false);
    base.tag("/pre", &[], false);
}

pub(crate) fn math(base: &mut BaseRenderer, tag: &str, source: &str) {
    base.tag(tag, &[("class", "language-math")], false);
    base.write_escaped(source);
    base.tag(&format!("/{tag}"), &[], false);
}

/// Identifier and optional title of an annotation reference.
pub(crate) fn annotation_ref_parts<'t>(node: Node<'t>) -> (&'t str, Option<&'t str>) {
    let id = node
        .child_by_type(NodeType::AnnotationRefId)
        .map_or("", |n| n.tokens());
    let title = node
        .child_by_type(NodeType::AnnotationRefText)
        .map(|n| n.tokens());
    (id, title)
}

/// Writes the `<img src="..." alt="` prefix on the outermost image and
/// enters a suppressed context so nested markup only contributes text.
pub(crate) fn image_enter(base: &mut BaseRenderer, destination: &str) {
    if !base.is_suppressed() {
        base.write("<img src=\"");
        base.write_escaped(destination);
        base.write("\" alt=\"");
    }
    base.push_suppression();
}

/// Leaves the suppressed context and closes the outermost image.
pub(crate) fn image_exit(base: &mut BaseRenderer, title: Option<&str>) {
    if !base.pop_suppression() {
        return;
    }
    base.write("\"");
    if let Some(title) = title {
        base.write(" title=\"");
        base.write_escaped(title);
        base.write("\"");
    }
    base.write(" />");
}
