//! # Parsing
//!
//! Turns Markdown source into a [`Tree`].
//!
//! Block structure and core inlines come from pulldown-cmark; the builder
//! converts its event stream into arena nodes, adding the marker sub-nodes
//! the editor dialect needs. Annotation references and emoji shortcodes are
//! recognized afterwards over each run of text.
//!
//! ## Modules
//!
//! - **`options`**: `ParseOptions` grammar switches
//! - **`builder`**: event stream to tree conversion
//! - **`inline`**: the extension recognizers and their cursor

mod builder;
pub mod inline;
pub mod options;

use pulldown_cmark::Parser;

use crate::ast::Tree;

pub use options::ParseOptions;

use builder::{TreeBuilder, extensions};

/// Parse Markdown source into a document tree.
pub fn parse(source: &str, options: &ParseOptions) -> Tree {
    let mut builder = TreeBuilder::new(source, options);
    for (event, range) in Parser::new_ext(source, extensions(options)).into_offset_iter() {
        builder.process_event(event, range);
    }
    let tree = builder.finish();
    log::debug!("parsed {} bytes into {} nodes", source.len(), tree.len());
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        CellAlign, CodeBlockData, EmphasisMarker, ListKind, Node, NodeKind, NodeType, TildeMarker,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse_default(source: &str) -> Tree {
        parse(source, &ParseOptions::default())
    }

    /// Children of `node` as (type, tokens) pairs.
    fn shape<'t>(node: Node<'t>) -> Vec<(NodeType, &'t str)> {
        node.children().map(|c| (c.node_type(), c.tokens())).collect()
    }

    fn first_paragraph(tree: &Tree) -> Node<'_> {
        tree.root()
            .child_by_type(NodeType::Paragraph)
            .expect("paragraph")
    }

    #[test]
    fn atx_heading_keeps_marker() {
        let tree = parse_default("## Getting *started*\n");
        let heading = tree.root().first_child().unwrap();
        assert_eq!(heading.kind(), &NodeKind::Heading { level: 2 });
        assert_eq!(heading.first_child().unwrap().tokens(), "##");
        assert_eq!(heading.text(), "Getting started");
    }

    #[test]
    fn setext_heading_has_no_marker() {
        let tree = parse_default("Title\n=====\n");
        let heading = tree.root().first_child().unwrap();
        assert_eq!(heading.kind(), &NodeKind::Heading { level: 1 });
        assert!(heading.child_by_type(NodeType::HeadingMarker).is_none());
    }

    #[rstest]
    #[case("*a*", EmphasisMarker::Asterisk)]
    #[case("_a_", EmphasisMarker::Underscore)]
    fn emphasis_records_marker(#[case] source: &str, #[case] marker: EmphasisMarker) {
        let tree = parse_default(source);
        let em = first_paragraph(&tree).first_child().unwrap();
        assert_eq!(em.kind(), &NodeKind::Emphasis(marker));
        let delimiter = marker.delimiter(true);
        assert_eq!(
            shape(em),
            [
                (NodeType::EmphasisOpenMarker, delimiter),
                (NodeType::Text, "a"),
                (NodeType::EmphasisCloseMarker, delimiter),
            ]
        );
    }

    #[test]
    fn strikethrough_records_width() {
        let tree = parse_default("~~a~~");
        let del = first_paragraph(&tree).first_child().unwrap();
        assert_eq!(del.kind(), &NodeKind::Strikethrough(TildeMarker::Double));
        assert_eq!(del.first_child().unwrap().tokens(), "~~");
    }

    #[test]
    fn code_span_keeps_backtick_run() {
        let tree = parse_default("``a`b``");
        let span = first_paragraph(&tree).first_child().unwrap();
        assert_eq!(span.tokens(), "a`b");
        assert_eq!(
            shape(span),
            [
                (NodeType::CodeSpanOpenMarker, "``"),
                (NodeType::CodeSpanContent, "a`b"),
                (NodeType::CodeSpanCloseMarker, "``"),
            ]
        );
    }

    #[test]
    fn fenced_code_block_shape() {
        let tree = parse_default("~~~rust ignore\nfn f() {}\n~~~\n");
        let block = tree.root().first_child().unwrap();
        assert_eq!(
            block.kind(),
            &NodeKind::CodeBlock(CodeBlockData {
                fenced: true,
                info: Some("rust ignore".to_string()),
            })
        );
        assert_eq!(block.tokens(), "fn f() {}\n");
        assert_eq!(
            shape(block),
            [
                (NodeType::CodeBlockFenceOpenMarker, "~~~"),
                (NodeType::CodeBlockFenceInfoMarker, "rust ignore"),
                (NodeType::CodeBlockCode, "fn f() {}\n"),
                (NodeType::CodeBlockFenceCloseMarker, "~~~"),
            ]
        );
    }

    #[test]
    fn indented_code_block_has_no_children() {
        let tree = parse_default("    let x = 1;\n");
        let block = tree.root().first_child().unwrap();
        assert_eq!(block.kind(), &NodeKind::CodeBlock(CodeBlockData::default()));
        assert_eq!(block.tokens(), "let x = 1;\n");
        assert!(!block.has_children());
    }

    #[test]
    fn link_gets_marker_nodes() {
        let tree = parse_default(r#"[go](https://x.y "T")"#);
        let link = first_paragraph(&tree).first_child().unwrap();
        assert_eq!(
            shape(link),
            [
                (NodeType::OpenBracket, "["),
                (NodeType::Text, "go"),
                (NodeType::CloseBracket, "]"),
                (NodeType::OpenParen, "("),
                (NodeType::LinkDest, "https://x.y"),
                (NodeType::LinkSpace, " "),
                (NodeType::LinkTitle, "T"),
                (NodeType::CloseParen, ")"),
            ]
        );
    }

    #[test]
    fn image_starts_with_bang() {
        let tree = parse_default("![alt](a.png)");
        let image = first_paragraph(&tree).first_child().unwrap();
        let types: Vec<_> = image.children().map(|c| c.node_type()).collect();
        assert_eq!(
            types,
            [
                NodeType::Bang,
                NodeType::OpenBracket,
                NodeType::Text,
                NodeType::CloseBracket,
                NodeType::OpenParen,
                NodeType::LinkDest,
                NodeType::CloseParen,
            ]
        );
    }

    #[test]
    fn tight_list_items_get_paragraphs() {
        let tree = parse_default("- a\n- b\n");
        let list = tree.root().first_child().unwrap();
        let NodeKind::List(data) = list.kind() else {
            panic!("expected list, got {list:?}");
        };
        assert!(data.tight);
        assert_eq!(data.bullet_char, Some(b'-'));
        for item in list.children() {
            let NodeKind::ListItem(data) = item.kind() else {
                panic!("expected item, got {item:?}");
            };
            assert!(data.tight);
            assert_eq!(item.first_child().unwrap().node_type(), NodeType::Paragraph);
        }
    }

    #[test]
    fn blank_line_between_items_makes_list_loose() {
        let tree = parse_default("* a\n\n* b\n");
        let list = tree.root().first_child().unwrap();
        let NodeKind::List(data) = list.kind() else {
            panic!("expected list, got {list:?}");
        };
        assert!(!data.tight);
        assert_eq!(data.bullet_char, Some(b'*'));
        assert!(list.children().all(|item| matches!(
            item.kind(),
            NodeKind::ListItem(data) if !data.tight
        )));
    }

    #[test]
    fn ordered_list_start() {
        let tree = parse_default("3. a\n4. b\n");
        let list = tree.root().first_child().unwrap();
        let NodeKind::List(data) = list.kind() else {
            panic!("expected list, got {list:?}");
        };
        assert_eq!(data.kind, ListKind::Ordered);
        assert_eq!(data.start, 3);
        assert_eq!(data.bullet_char, None);
    }

    #[test]
    fn nested_list_follows_item_text() {
        let tree = parse_default("- a\n  - b\n");
        let item = tree.root().first_child().unwrap().first_child().unwrap();
        let types: Vec<_> = item.children().map(|c| c.node_type()).collect();
        assert_eq!(types, [NodeType::Paragraph, NodeType::List]);
    }

    #[test]
    fn task_item_marker_precedes_paragraph() {
        let tree = parse_default("- [x] done\n- [ ] todo\n");
        let list = tree.root().first_child().unwrap();
        let markers: Vec<_> = list
            .children()
            .map(|item| {
                assert!(matches!(item.kind(), NodeKind::ListItem(d) if d.kind == ListKind::Task));
                item.first_child().unwrap().kind().clone()
            })
            .collect();
        assert_eq!(
            markers,
            [
                NodeKind::TaskListItemMarker { checked: true },
                NodeKind::TaskListItemMarker { checked: false },
            ]
        );
    }

    #[test]
    fn table_head_holds_cells_with_alignment() {
        let tree = parse_default("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
        let table = tree.root().first_child().unwrap();
        let sections: Vec<_> = table.children().map(|c| c.node_type()).collect();
        assert_eq!(sections, [NodeType::TableHead, NodeType::TableRow]);

        let head = table.first_child().unwrap();
        let aligns: Vec<_> = head.children().map(|c| c.kind().clone()).collect();
        assert_eq!(
            aligns,
            [
                NodeKind::TableCell {
                    align: CellAlign::Left
                },
                NodeKind::TableCell {
                    align: CellAlign::Right
                },
            ]
        );
    }

    #[test]
    fn block_quote_has_marker() {
        let tree = parse_default("> quoted\n");
        let quote = tree.root().first_child().unwrap();
        let types: Vec<_> = quote.children().map(|c| c.node_type()).collect();
        assert_eq!(types, [NodeType::BlockQuoteMarker, NodeType::Paragraph]);
    }

    #[test]
    fn inline_math_with_leading_digit_stays_text() {
        let tree = parse_default("cost $1$ today");
        let para = first_paragraph(&tree);
        assert!(para.child_by_type(NodeType::InlineMath).is_none());
        assert_eq!(para.text(), "cost $1$ today");
    }

    #[test]
    fn inline_math_with_leading_digit_when_allowed() {
        let options = ParseOptions {
            inline_math_allow_digit_after_open: true,
            ..ParseOptions::default()
        };
        let tree = parse("cost $1$ today", &options);
        let math = first_paragraph(&tree)
            .child_by_type(NodeType::InlineMath)
            .unwrap();
        assert_eq!(math.tokens(), "1");
    }

    #[test]
    fn inline_math() {
        let tree = parse_default("$x^2$");
        let math = first_paragraph(&tree).first_child().unwrap();
        assert_eq!((math.node_type(), math.tokens()), (NodeType::InlineMath, "x^2"));
    }

    #[test]
    fn display_math_is_a_block() {
        let tree = parse_default("$$\nx^2\n$$\n");
        let math = tree.root().first_child().unwrap();
        assert_eq!(math.node_type(), NodeType::MathBlock);
        assert_eq!(math.tokens(), "x^2");
        assert!(tree.root().child_by_type(NodeType::Paragraph).is_none());
    }

    #[test]
    fn display_math_inside_text_stays_in_the_paragraph() {
        let tree = parse_default("lu$$x^2$$te");
        assert_eq!(tree.root().children().count(), 1);
        assert_eq!(
            shape(first_paragraph(&tree)),
            [
                (NodeType::Text, "lu"),
                (NodeType::MathBlock, "x^2"),
                (NodeType::Text, "te"),
            ]
        );
    }

    #[test]
    fn leading_display_math_opens_the_paragraph_for_later_text() {
        let tree = parse_default("$$x$$te");
        assert_eq!(
            shape(first_paragraph(&tree)),
            [(NodeType::MathBlock, "x"), (NodeType::Text, "te")]
        );
    }

    #[rstest]
    #[case::lone_opener("$$\n", "")]
    #[case::opener_with_body("$$\nx^2\n", "x^2")]
    fn unclosed_display_math_is_a_block(#[case] source: &str, #[case] math: &str) {
        let tree = parse_default(source);
        assert_eq!(shape(tree.root()), [(NodeType::MathBlock, math)]);
    }

    #[test]
    fn inline_math_followed_by_a_digit_stays_text() {
        let tree = parse_default("lu$x$1te");
        let para = first_paragraph(&tree);
        assert!(para.child_by_type(NodeType::InlineMath).is_none());
        assert_eq!(para.text(), "lu$x$1te");

        let options = ParseOptions {
            inline_math_allow_digit_after_open: true,
            ..ParseOptions::default()
        };
        let tree = parse("lu$x$1te", &options);
        assert!(
            first_paragraph(&tree)
                .child_by_type(NodeType::InlineMath)
                .is_some()
        );
    }

    #[test]
    fn math_disabled_is_text() {
        let options = ParseOptions {
            math: false,
            ..ParseOptions::default()
        };
        let tree = parse("$x$", &options);
        assert_eq!(first_paragraph(&tree).text(), "$x$");
    }

    #[test]
    fn annotation_ref_across_html_events() {
        let tree = parse_default("see <<foo>> now");
        let para = first_paragraph(&tree);
        assert_eq!(
            shape(para),
            [
                (NodeType::Text, "see "),
                (NodeType::AnnotationRef, "<<foo>>"),
                (NodeType::Text, " now"),
            ]
        );
    }

    #[test]
    fn annotation_ref_with_title() {
        let tree = parse_default(r#"<<foo "bar">>"#);
        let node = first_paragraph(&tree).first_child().unwrap();
        assert_eq!(node.node_type(), NodeType::AnnotationRef);
        assert_eq!(
            node.child_by_type(NodeType::AnnotationRefText).map(|n| n.tokens()),
            Some("bar")
        );
    }

    #[rstest]
    #[case("<<>>")]
    #[case("<<foo")]
    #[case("<<\n\nfoo>>")]
    fn malformed_annotation_ref_has_no_node(#[case] source: &str) {
        let tree = parse_default(source);
        let mut found = false;
        crate::ast::walk(&tree, tree.root_id(), |node, _| {
            found |= node.node_type() == NodeType::AnnotationRef;
            crate::ast::WalkStatus::Continue
        });
        assert!(!found, "{source:?}");
    }

    #[test]
    fn annotation_ref_inside_html_attribute_is_left_alone() {
        let tree = parse_default(r#"<span title="<<x>>">a</span>"#);
        let para = first_paragraph(&tree);
        assert!(para.child_by_type(NodeType::AnnotationRef).is_none());
        let html: String = para
            .children()
            .filter(|c| c.node_type() == NodeType::InlineHtml)
            .map(|c| c.tokens())
            .collect();
        assert_eq!(html, r#"<span title="<<x>>"></span>"#);
    }

    #[test]
    fn annotation_ref_disabled() {
        let options = ParseOptions {
            annotation_ref: false,
            ..ParseOptions::default()
        };
        let tree = parse("<<foo>>", &options);
        assert!(
            first_paragraph(&tree)
                .child_by_type(NodeType::AnnotationRef)
                .is_none()
        );
    }

    #[test]
    fn emoji_shortcode() {
        let tree = parse_default("ship it :rocket:");
        let emoji = first_paragraph(&tree).last_child().unwrap();
        assert_eq!(
            shape(emoji),
            [
                (NodeType::EmojiUnicode, "🚀"),
                (NodeType::EmojiAlias, ":rocket:"),
            ]
        );
    }

    #[test]
    fn code_span_content_is_not_scanned() {
        let tree = parse_default("`<<foo>> :rocket:`");
        let span = first_paragraph(&tree).first_child().unwrap();
        assert_eq!(span.node_type(), NodeType::CodeSpan);
        assert_eq!(span.tokens(), "<<foo>> :rocket:");
    }
}
