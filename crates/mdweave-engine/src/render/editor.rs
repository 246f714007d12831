//! Round-trip HTML for a WYSIWYG editor host.
//!
//! Composite inlines are rendered through their marker sub-nodes, and the
//! original marker characters are kept in `data-marker` attributes so the
//! editor can serialize back to the same source. No layout newlines are
//! written; the host reflows the markup itself.

use std::borrow::Cow;

use crate::ast::{EmphasisMarker, Node, NodeKind, NodeType, TildeMarker, WalkStatus};

use super::base::{BaseRenderer, escape_html};
use super::common;
use super::dispatch::DispatchTableBuilder;
use super::options::RenderOptions;
use super::renderer::Dialect;
use super::text;

const ANCHOR_SVG: &str = r#"<svg viewBox="0 0 16 16" version="1.1" width="16" height="16"><path fill-rule="evenodd" d="M4 9h1v1H4c-1.5 0-3-1.69-3-3.5S2.55 3 4 3h4c1.45 0 3 1.69 3 3.5 0 1.41-.91 2.72-2 3.25V8.59c.58-.45 1-1.27 1-2.09C10 5.22 8.98 4 8 4H4c-.98 0-2 1.22-2 2.5S3 9 4 9zm9-3h-1v1h1c1 0 2 1.22 2 2.5S13.98 12 13 12H9c-.98 0-2-1.22-2-2.5 0-.83.42-1.64 1-2.09V6.25c-1.09.53-2 1.84-2 3.25C6 11.31 7.55 13 9 13h4c1.45 0 3-1.69 3-3.5S14.5 6 13 6z"></path></svg>"#;

/// Replaces spaces in heading text when deriving an anchor id.
const ANCHOR_SPACE: &str = "-";

pub struct EditorDialect {
    base: BaseRenderer,
}

impl Dialect for EditorDialect {
    const NAME: &'static str = "editor";

    fn new(options: &RenderOptions) -> Self {
        Self {
            base: BaseRenderer::new(options.clone()),
        }
    }

    fn register(builder: DispatchTableBuilder<Self>) -> DispatchTableBuilder<Self> {
        use NodeType as T;

        builder
            .on(T::Document, Self::container)
            .on(T::Paragraph, Self::paragraph)
            .on(T::Heading, Self::heading)
            .on(T::HeadingMarker, Self::skip)
            .on(T::ThematicBreak, Self::thematic_break)
            .on(T::BlockQuote, Self::block_quote)
            .on(T::BlockQuoteMarker, Self::skip)
            .on(T::List, Self::list)
            .on(T::ListItem, Self::list_item)
            .on(T::TaskListItemMarker, Self::task_list_item_marker)
            .on(T::CodeBlock, Self::code_block)
            .on(T::CodeBlockFenceOpenMarker, Self::skip)
            .on(T::CodeBlockFenceInfoMarker, Self::skip)
            .on(T::CodeBlockCode, Self::code_block_code)
            .on(T::CodeBlockFenceCloseMarker, Self::skip)
            .on(T::HtmlBlock, Self::raw)
            .on(T::MathBlock, Self::math_block)
            .on(T::Table, Self::table)
            .on(T::TableHead, Self::table_head)
            .on(T::TableRow, Self::table_row)
            .on(T::TableCell, Self::table_cell)
            .on(T::Text, Self::text)
            .on(T::CodeSpan, Self::container)
            .on(T::CodeSpanOpenMarker, Self::code_span_open_marker)
            .on(T::CodeSpanContent, Self::escaped)
            .on(T::CodeSpanCloseMarker, Self::code_span_close_marker)
            .on(T::Emphasis, Self::container)
            .on(T::EmphasisOpenMarker, Self::emphasis_open_marker)
            .on(T::EmphasisCloseMarker, Self::emphasis_close_marker)
            .on(T::Strong, Self::container)
            .on(T::StrongOpenMarker, Self::strong_open_marker)
            .on(T::StrongCloseMarker, Self::strong_close_marker)
            .on(T::Strikethrough, Self::container)
            .on(T::StrikethroughOpenMarker, Self::strikethrough_open_marker)
            .on(T::StrikethroughCloseMarker, Self::strikethrough_close_marker)
            .on(T::Link, Self::link)
            .on(T::Image, Self::image)
            .on(T::Bang, Self::skip)
            .on(T::OpenBracket, Self::skip)
            .on(T::CloseBracket, Self::skip)
            .on(T::OpenParen, Self::skip)
            .on(T::CloseParen, Self::skip)
            .on(T::LinkDest, Self::skip)
            .on(T::LinkSpace, Self::skip)
            .on(T::LinkTitle, Self::skip)
            .on(T::InlineHtml, Self::raw)
            .on(T::InlineMath, Self::inline_math)
            .on(T::HardBreak, Self::hard_break)
            .on(T::SoftBreak, Self::soft_break)
            .on(T::Emoji, Self::container)
            .on(T::EmojiUnicode, Self::raw)
            .on(T::EmojiImg, Self::emoji_img)
            .on(T::EmojiAlias, Self::skip)
            .on(T::AnnotationRef, Self::annotation_ref)
            .on(T::AnnotationRefId, Self::escaped)
            .on(T::AnnotationRefSpace, Self::raw)
            .on(T::AnnotationRefText, Self::annotation_ref_text)
            .on(T::Less, Self::less)
            .on(T::Greater, Self::greater)
    }

    fn base(&self) -> &BaseRenderer {
        &self.base
    }

    fn into_base(self) -> BaseRenderer {
        self.base
    }
}

impl EditorDialect {
    fn skip(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        WalkStatus::SkipChildren
    }

    fn container(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        WalkStatus::Continue
    }

    fn raw(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.write(node.tokens());
        WalkStatus::SkipChildren
    }

    fn escaped(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.write_escaped(node.tokens());
        WalkStatus::SkipChildren
    }

    fn text(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        let options = self.base.options();
        let mut tokens = Cow::Borrowed(node.tokens());
        if options.auto_space {
            tokens = Cow::Owned(text::auto_space(&tokens).into_owned());
        }
        if options.fix_term_typo {
            tokens = Cow::Owned(text::fix_term_typo(&tokens).into_owned());
        }
        self.base.write_escaped(&tokens);
        WalkStatus::SkipChildren
    }

    fn paragraph(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        if !common::in_tight_list(node) {
            self.base.tag(if entering { "p" } else { "/p" }, &[], false);
        }
        WalkStatus::Continue
    }

    fn heading(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        let (open, close) = common::heading_tags(node);
        if !entering {
            self.base.tag(close, &[], false);
            return WalkStatus::Continue;
        }

        self.base.tag(open, &[], false);
        if self.base.options().heading_anchor {
            let anchor = escape_html(&node.text().replace(' ', ANCHOR_SPACE)).into_owned();
            let id = format!("editor-anchor-{anchor}");
            let href = format!("#{anchor}");
            self.base.tag(
                "a",
                &[
                    ("id", id.as_str()),
                    ("class", "editor-anchor"),
                    ("href", href.as_str()),
                ],
                false,
            );
            self.base.write(ANCHOR_SVG);
            self.base.tag("/a", &[], false);
        }
        WalkStatus::Continue
    }

    fn thematic_break(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.tag("hr", &[], true);
        WalkStatus::SkipChildren
    }

    fn block_quote(&mut self, _node: Node<'_>, entering: bool) -> WalkStatus {
        self.base
            .tag(if entering { "blockquote" } else { "/blockquote" }, &[], false);
        WalkStatus::Continue
    }

    fn list(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        common::list(&mut self.base, node, entering);
        WalkStatus::Continue
    }

    fn list_item(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        common::list_item(&mut self.base, node, entering);
        WalkStatus::Continue
    }

    fn task_list_item_marker(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        common::task_list_item_marker(&mut self.base, node);
        WalkStatus::SkipChildren
    }

    /// Indented blocks render whole; fenced blocks render through their
    /// code sub-node.
    fn code_block(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        match node.kind() {
            NodeKind::CodeBlock(data) if data.fenced => WalkStatus::Continue,
            _ => {
                common::code_block(&mut self.base, None, node.tokens());
                WalkStatus::SkipChildren
            }
        }
    }

    fn code_block_code(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        let language = node.parent().and_then(|block| match block.kind() {
            NodeKind::CodeBlock(data) => data.language(),
            _ => None,
        });
        common::code_block(&mut self.base, language, node.tokens());
        WalkStatus::SkipChildren
    }

    fn math_block(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        common::math(&mut self.base, "div", node.tokens());
        WalkStatus::SkipChildren
    }

    fn inline_math(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        common::math(&mut self.base, "span", node.tokens());
        WalkStatus::SkipChildren
    }

    fn table(&mut self, _node: Node<'_>, entering: bool) -> WalkStatus {
        self.base
            .tag(if entering { "table" } else { "/table" }, &[], false);
        WalkStatus::Continue
    }

    fn table_head(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        if entering {
            self.base.tag("thead", &[], false);
            self.base.tag("tr", &[], false);
        } else {
            self.base.tag("/tr", &[], false);
            self.base.tag("/thead", &[], false);
            if node.next().is_some() {
                self.base.tag("tbody", &[], false);
            }
        }
        WalkStatus::Continue
    }

    fn table_row(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        if entering {
            self.base.tag("tr", &[], false);
        } else {
            self.base.tag("/tr", &[], false);
            if node.is_last_child() {
                self.base.tag("/tbody", &[], false);
            }
        }
        WalkStatus::Continue
    }

    fn table_cell(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        common::table_cell(&mut self.base, node, entering);
        WalkStatus::Continue
    }

    fn code_span_open_marker(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        let marker = escape_html(node.tokens());
        self.base.tag("code", &[("data-marker", &*marker)], false);
        WalkStatus::SkipChildren
    }

    fn code_span_close_marker(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.tag("/code", &[], false);
        WalkStatus::SkipChildren
    }

    fn emphasis_open_marker(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        let marker = emphasis_marker(node).delimiter(true);
        self.base.tag("em", &[("data-marker", marker)], false);
        WalkStatus::SkipChildren
    }

    fn emphasis_close_marker(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.tag("/em", &[], false);
        WalkStatus::SkipChildren
    }

    fn strong_open_marker(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        let marker = emphasis_marker(node).delimiter(false);
        self.base.tag("strong", &[("data-marker", marker)], false);
        WalkStatus::SkipChildren
    }

    fn strong_close_marker(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.tag("/strong", &[], false);
        WalkStatus::SkipChildren
    }

    fn strikethrough_open_marker(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        let marker = match node.parent().map(|p| p.kind()) {
            Some(NodeKind::Strikethrough(tilde)) => *tilde,
            _ => TildeMarker::Double,
        };
        self.base
            .tag("del", &[("data-marker", marker.delimiter())], false);
        WalkStatus::SkipChildren
    }

    fn strikethrough_close_marker(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.tag("/del", &[], false);
        WalkStatus::SkipChildren
    }

    fn link(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        if !entering {
            self.base.tag("/a", &[], false);
            return WalkStatus::Continue;
        }
        let href = escape_html(child_tokens(node, NodeType::LinkDest).unwrap_or_default());
        match child_tokens(node, NodeType::LinkTitle) {
            Some(title) => {
                let title = escape_html(title);
                self.base
                    .tag("a", &[("href", &*href), ("title", &*title)], false);
            }
            None => self.base.tag("a", &[("href", &*href)], false),
        }
        WalkStatus::Continue
    }

    fn image(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        if entering {
            let dest = child_tokens(node, NodeType::LinkDest).unwrap_or_default();
            common::image_enter(&mut self.base, dest);
        } else {
            common::image_exit(&mut self.base, child_tokens(node, NodeType::LinkTitle));
        }
        WalkStatus::Continue
    }

    fn hard_break(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.tag("br", &[], true);
        WalkStatus::SkipChildren
    }

    fn soft_break(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        if self.base.options().soft_break_to_hard_break {
            self.base.tag("br", &[], true);
        } else {
            self.base.newline();
        }
        WalkStatus::SkipChildren
    }

    fn emoji_img(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        if !self.base.is_suppressed() {
            self.base.write(node.tokens());
        }
        WalkStatus::SkipChildren
    }

    fn annotation_ref(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        if !entering {
            self.base.tag("/span", &[], false);
            return WalkStatus::Continue;
        }
        let (id, _) = common::annotation_ref_parts(node);
        let data_id = escape_html(id);
        self.base.tag(
            "span",
            &[("data-type", "annotation-ref"), ("data-id", &*data_id)],
            false,
        );
        WalkStatus::Continue
    }

    fn annotation_ref_text(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.write("&quot;");
        self.base.write_escaped(node.tokens());
        self.base.write("&quot;");
        WalkStatus::SkipChildren
    }

    fn less(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.write("&lt;");
        WalkStatus::SkipChildren
    }

    fn greater(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.write("&gt;");
        WalkStatus::SkipChildren
    }
}

/// Marker family of the emphasis or strong node owning a marker.
fn emphasis_marker(marker: Node<'_>) -> EmphasisMarker {
    match marker.parent().map(|p| p.kind()) {
        Some(NodeKind::Emphasis(m) | NodeKind::Strong(m)) => *m,
        _ => EmphasisMarker::Asterisk,
    }
}

fn child_tokens<'t>(node: Node<'t>, ty: NodeType) -> Option<&'t str> {
    node.child_by_type(ty).map(|child| child.tokens())
}
