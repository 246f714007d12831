use crate::parsing::options::ParseOptions;

use super::annotation_ref::try_parse_annotation_ref;
use super::cursor::Cursor;
use super::emoji::try_parse_emoji;
use super::kinds::{AnnotationRef, Emoji};
use super::types::{InlineNode, Span};

/// Splits a text run into literal text and the inline constructs enabled in
/// `options`. Constructs that fail to match stay part of the surrounding
/// text; adjacent text pieces are merged.
pub fn parse_inline(text: &str, options: &ParseOptions) -> Vec<InlineNode> {
    let mut cur = Cursor::new(text);
    let mut nodes = Vec::new();
    let mut text_start = 0;

    let flush = |nodes: &mut Vec<InlineNode>, start: usize, end: usize| {
        if start < end {
            nodes.push(InlineNode::Text(Span { start, end }));
        }
    };

    while !cur.eof() {
        let at = cur.pos();

        if options.annotation_ref && cur.starts_with(AnnotationRef::OPEN) {
            if let Some(found) = try_parse_annotation_ref(&mut cur) {
                flush(&mut nodes, text_start, at);
                nodes.push(InlineNode::AnnotationRef(found));
                text_start = cur.pos();
            } else {
                // Both brackets are literal; a second try at the next `<`
                // would only rescan the same input.
                cur.bump_n(AnnotationRef::OPEN.len());
            }
            continue;
        }

        if options.emoji && cur.peek() == Some(Emoji::DELIM) {
            if let Some(found) = try_parse_emoji(&mut cur, options) {
                flush(&mut nodes, text_start, at);
                nodes.push(InlineNode::Emoji(found));
                text_start = cur.pos();
                continue;
            }
        }

        cur.bump_char();
    }

    flush(&mut nodes, text_start, text.len());
    nodes
}
