//! Speculative recognizer for `<<identifier "title">>` annotation references.

use crate::ast::{NodeId, NodeKind, Tree};

use super::cursor::Cursor;
use super::kinds::{AnnotationRef, Caret};
use super::lex::{is_whitespace, parse_link_title, spnl};
use super::types::Span;

/// A recognized annotation reference, not yet attached to any tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRefMatch {
    /// The whole construct, brackets included.
    pub full: Span,
    pub id: String,
    /// Present only when non-empty.
    pub title: Option<String>,
}

impl AnnotationRefMatch {
    /// Appends the reference subtree under `parent` in one step: one node
    /// per bracket character, the identifier, and the separator plus title
    /// when there is one.
    pub fn append_to(&self, tree: &mut Tree, parent: NodeId, source: &str) -> NodeId {
        let node = tree.append_with_tokens(parent, NodeKind::AnnotationRef, source);
        for _ in AnnotationRef::OPEN {
            tree.append_with_tokens(node, NodeKind::Less, "<");
        }
        tree.append_with_tokens(node, NodeKind::AnnotationRefId, self.id.as_str());
        if let Some(title) = &self.title {
            tree.append_with_tokens(node, NodeKind::AnnotationRefSpace, " ");
            tree.append_with_tokens(node, NodeKind::AnnotationRefText, title.as_str());
        }
        for _ in AnnotationRef::CLOSE {
            tree.append_with_tokens(node, NodeKind::Greater, ">");
        }
        node
    }
}

/// Attempts to recognize an annotation reference at the cursor.
///
/// On success the cursor ends just past the closing `>>`. On failure the
/// cursor is restored to where it was on entry and `None` is returned; the
/// caller then treats the `<<` as literal text.
pub fn try_parse_annotation_ref(cur: &mut Cursor<'_>) -> Option<AnnotationRefMatch> {
    if cur.remaining() < AnnotationRef::MIN_LEN || !cur.starts_with(AnnotationRef::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let found = scan(cur, saved.pos());
    if found.is_none() {
        log::trace!(
            "abandoned annotation reference at byte {} (stopped at {})",
            saved.pos(),
            cur.pos()
        );
        *cur = saved;
    }
    found
}

/// One forward pass over the construct. Every `None` is an abandonment;
/// the cursor is left wherever the scan stopped.
fn scan(cur: &mut Cursor<'_>, start: usize) -> Option<AnnotationRefMatch> {
    cur.bump_n(AnnotationRef::OPEN.len());
    if !spnl(cur) {
        return None;
    }

    let id = scan_identifier(cur)?;
    let matched = |cur: &mut Cursor<'_>, title: Option<String>| {
        cur.bump_n(AnnotationRef::CLOSE.len());
        Some(AnnotationRefMatch {
            full: Span {
                start,
                end: cur.pos(),
            },
            id: id.to_string(),
            title: title.filter(|t| !t.is_empty()),
        })
    };

    if cur.starts_with(AnnotationRef::CLOSE) {
        return matched(cur, None);
    }
    if !cur.peek().is_some_and(is_whitespace) || !spnl(cur) {
        return None;
    }
    if cur.starts_with(AnnotationRef::CLOSE) {
        return matched(cur, None);
    }

    let title = parse_link_title(cur)?;
    if !spnl(cur) || !cur.starts_with(AnnotationRef::CLOSE) {
        return None;
    }
    matched(cur, Some(title))
}

/// Scans up to a `>` or a space followed by `"`. Caret placeholders are
/// stepped over whole. Fails on an empty identifier or when too little
/// input is left to close the construct.
fn scan_identifier<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    let start = cur.pos();
    while !cur.eof() {
        if cur.starts_with(Caret::TOKENS.as_bytes()) {
            cur.bump_n(Caret::TOKENS.len());
            continue;
        }
        if cur.starts_with(b" \"") || cur.peek() == Some(b'>') {
            break;
        }
        cur.bump_char();
    }

    let id = cur.slice(start, cur.pos()).trim_end();
    if id.is_empty() || cur.remaining() < AnnotationRef::MIN_TRAILING {
        return None;
    }
    Some(id)
}
