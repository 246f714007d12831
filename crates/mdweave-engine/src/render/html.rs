//! Plain HTML output.
//!
//! Composite inlines are atomic here: code spans write their whole content
//! and every marker sub-node renders nothing. Block tags are separated by
//! layout newlines.

use crate::ast::{CodeBlockData, LinkData, Node, NodeKind, NodeType, WalkStatus};

use super::base::{BaseRenderer, escape_html};
use super::common;
use super::dispatch::DispatchTableBuilder;
use super::options::RenderOptions;
use super::renderer::Dialect;

pub struct HtmlDialect {
    base: BaseRenderer,
}

impl Dialect for HtmlDialect {
    const NAME: &'static str = "html";

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
            .on(T::ThematicBreak, Self::thematic_break)
            .on(T::BlockQuote, Self::block_quote)
            .on(T::List, Self::list)
            .on(T::ListItem, Self::list_item)
            .on(T::TaskListItemMarker, Self::task_list_item_marker)
            .on(T::CodeBlock, Self::code_block)
            .on(T::HtmlBlock, Self::html_block)
            .on(T::MathBlock, Self::math_block)
            .on(T::Table, Self::table)
            .on(T::TableHead, Self::table_head)
            .on(T::TableRow, Self::table_row)
            .on(T::TableCell, Self::table_cell)
            .on(T::Text, Self::text)
            .on(T::CodeSpan, Self::code_span)
            .on(T::Emphasis, Self::emphasis)
            .on(T::Strong, Self::strong)
            .on(T::Strikethrough, Self::strikethrough)
            .on(T::Link, Self::link)
            .on(T::Image, Self::image)
            .on(T::InlineHtml, Self::raw)
            .on(T::InlineMath, Self::inline_math)
            .on(T::HardBreak, Self::hard_break)
            .on(T::SoftBreak, Self::soft_break)
            .on(T::Emoji, Self::container)
            .on(T::EmojiUnicode, Self::raw)
            .on(T::EmojiImg, Self::emoji_img)
            .on(T::AnnotationRef, Self::annotation_ref)
            // Marker sub-nodes carry nothing this dialect shows.
            .on(T::HeadingMarker, Self::skip)
            .on(T::BlockQuoteMarker, Self::skip)
            .on(T::CodeBlockFenceOpenMarker, Self::skip)
            .on(T::CodeBlockFenceInfoMarker, Self::skip)
            .on(T::CodeBlockCode, Self::skip)
            .on(T::CodeBlockFenceCloseMarker, Self::skip)
            .on(T::CodeSpanOpenMarker, Self::skip)
            .on(T::CodeSpanContent, Self::skip)
            .on(T::CodeSpanCloseMarker, Self::skip)
            .on(T::EmphasisOpenMarker, Self::skip)
            .on(T::EmphasisCloseMarker, Self::skip)
            .on(T::StrongOpenMarker, Self::skip)
            .on(T::StrongCloseMarker, Self::skip)
            .on(T::StrikethroughOpenMarker, Self::skip)
            .on(T::StrikethroughCloseMarker, Self::skip)
            .on(T::Bang, Self::skip)
            .on(T::OpenBracket, Self::skip)
            .on(T::CloseBracket, Self::skip)
            .on(T::OpenParen, Self::skip)
            .on(T::CloseParen, Self::skip)
            .on(T::LinkDest, Self::skip)
            .on(T::LinkSpace, Self::skip)
            .on(T::LinkTitle, Self::skip)
            .on(T::EmojiAlias, Self::skip)
            .on(T::AnnotationRefId, Self::skip)
            .on(T::AnnotationRefSpace, Self::skip)
            .on(T::AnnotationRefText, Self::skip)
            .on(T::Less, Self::skip)
            .on(T::Greater, Self::skip)
    }

    fn base(&self) -> &BaseRenderer {
        &self.base
    }

    fn into_base(self) -> BaseRenderer {
        self.base
    }
}

impl HtmlDialect {
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

    fn text(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.write_escaped(node.tokens());
        WalkStatus::SkipChildren
    }

    fn paragraph(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        if common::in_tight_list(node) {
            return WalkStatus::Continue;
        }
        if entering {
            self.base.newline();
            self.base.tag("p", &[], false);
        } else {
            self.base.tag("/p", &[], false);
            self.base.newline();
        }
        WalkStatus::Continue
    }

    fn heading(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        let (open, close) = common::heading_tags(node);
        if entering {
            self.base.newline();
            self.base.tag(open, &[], false);
        } else {
            self.base.tag(close, &[], false);
            self.base.newline();
        }
        WalkStatus::Continue
    }

    fn thematic_break(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.newline();
        self.base.tag("hr", &[], true);
        self.base.newline();
        WalkStatus::SkipChildren
    }

    fn block_quote(&mut self, _node: Node<'_>, entering: bool) -> WalkStatus {
        self.base.newline();
        let tag = if entering { "blockquote" } else { "/blockquote" };
        self.base.tag(tag, &[], false);
        self.base.newline();
        WalkStatus::Continue
    }

    fn list(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        self.base.newline();
        common::list(&mut self.base, node, entering);
        self.base.newline();
        WalkStatus::Continue
    }

    fn list_item(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        common::list_item(&mut self.base, node, entering);
        if !entering {
            self.base.newline();
        }
        WalkStatus::Continue
    }

    fn task_list_item_marker(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        common::task_list_item_marker(&mut self.base, node);
        WalkStatus::SkipChildren
    }

    fn code_block(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        let language = match node.kind() {
            NodeKind::CodeBlock(data @ CodeBlockData { fenced: true, .. }) => data.language(),
            _ => None,
        };
        self.base.newline();
        common::code_block(&mut self.base, language, node.tokens());
        self.base.newline();
        WalkStatus::SkipChildren
    }

    fn html_block(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.newline();
        self.base.write(node.tokens());
        self.base.newline();
        WalkStatus::SkipChildren
    }

    fn math_block(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.newline();
        common::math(&mut self.base, "div", node.tokens());
        self.base.newline();
        WalkStatus::SkipChildren
    }

    fn inline_math(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        common::math(&mut self.base, "span", node.tokens());
        WalkStatus::SkipChildren
    }

    fn table(&mut self, _node: Node<'_>, entering: bool) -> WalkStatus {
        self.base
            .tag(if entering { "table" } else { "/table" }, &[], false);
        self.base.newline();
        WalkStatus::Continue
    }

    fn table_head(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        if entering {
            self.base.tag("thead", &[], false);
            self.base.newline();
            self.base.tag("tr", &[], false);
            self.base.newline();
        } else {
            self.base.tag("/tr", &[], false);
            self.base.newline();
            self.base.tag("/thead", &[], false);
            self.base.newline();
            if node.next().is_some() {
                self.base.tag("tbody", &[], false);
                self.base.newline();
            }
        }
        WalkStatus::Continue
    }

    fn table_row(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        if entering {
            self.base.tag("tr", &[], false);
            self.base.newline();
        } else {
            self.base.tag("/tr", &[], false);
            self.base.newline();
            if node.is_last_child() {
                self.base.tag("/tbody", &[], false);
                self.base.newline();
            }
        }
        WalkStatus::Continue
    }

    fn table_cell(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        common::table_cell(&mut self.base, node, entering);
        if !entering {
            self.base.newline();
        }
        WalkStatus::Continue
    }

    fn code_span(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.tag("code", &[], false);
        self.base.write_escaped(node.tokens());
        self.base.tag("/code", &[], false);
        WalkStatus::SkipChildren
    }

    fn emphasis(&mut self, _node: Node<'_>, entering: bool) -> WalkStatus {
        self.base.tag(if entering { "em" } else { "/em" }, &[], false);
        WalkStatus::Continue
    }

    fn strong(&mut self, _node: Node<'_>, entering: bool) -> WalkStatus {
        self.base
            .tag(if entering { "strong" } else { "/strong" }, &[], false);
        WalkStatus::Continue
    }

    fn strikethrough(&mut self, _node: Node<'_>, entering: bool) -> WalkStatus {
        self.base.tag(if entering { "del" } else { "/del" }, &[], false);
        WalkStatus::Continue
    }

    fn link(&mut self, node: Node<'_>, entering: bool) -> WalkStatus {
        if !entering {
            self.base.tag("/a", &[], false);
            return WalkStatus::Continue;
        }
        let NodeKind::Link(LinkData { destination, title }) = node.kind() else {
            return WalkStatus::Continue;
        };
        let href = escape_html(destination);
        match title {
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
        let NodeKind::Image(LinkData { destination, title }) = node.kind() else {
            return WalkStatus::Continue;
        };
        if entering {
            common::image_enter(&mut self.base, destination);
        } else {
            common::image_exit(&mut self.base, title.as_deref());
        }
        WalkStatus::Continue
    }

    fn hard_break(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        self.base.tag("br", &[], true);
        self.base.newline();
        WalkStatus::SkipChildren
    }

    fn soft_break(&mut self, _node: Node<'_>, _entering: bool) -> WalkStatus {
        if self.base.options().soft_break_to_hard_break {
            self.base.tag("br", &[], true);
        }
        self.base.newline();
        WalkStatus::SkipChildren
    }

    fn emoji_img(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        if !self.base.is_suppressed() {
            self.base.write(node.tokens());
        }
        WalkStatus::SkipChildren
    }

    /// `<span class="annotation-ref" data-id="ID">TITLE</span>`, falling
    /// back to the identifier when there is no title.
    fn annotation_ref(&mut self, node: Node<'_>, _entering: bool) -> WalkStatus {
        let (id, title) = common::annotation_ref_parts(node);
        let data_id = escape_html(id);
        self.base.tag(
            "span",
            &[("class", "annotation-ref"), ("data-id", &*data_id)],
            false,
        );
        self.base.write_escaped(title.unwrap_or(id));
        self.base.tag("/span", &[], false);
        WalkStatus::SkipChildren
    }
}
