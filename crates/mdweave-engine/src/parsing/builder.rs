//! Converts the pulldown-cmark event stream into a [`Tree`].

use std::ops::Range;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Tag};

use crate::ast::{
    CellAlign, CodeBlockData, EmphasisMarker, LinkData, ListData, ListKind, NodeId, NodeKind,
    Tree, TildeMarker,
};

use super::inline::{InlineNode, Span, parse_inline};
use super::options::ParseOptions;

/// pulldown-cmark extensions matching the grammar switches.
pub(crate) fn extensions(options: &ParseOptions) -> Options {
    let mut extensions = Options::empty();
    if options.gfm {
        extensions.insert(Options::ENABLE_TABLES);
        extensions.insert(Options::ENABLE_STRIKETHROUGH);
        extensions.insert(Options::ENABLE_TASKLISTS);
    }
    if options.math {
        extensions.insert(Options::ENABLE_MATH);
    }
    extensions
}

/// Text and inline HTML collected between two structural events.
///
/// pulldown-cmark splits text at every character that might start markup,
/// and reads `<foo>` inside `<<foo>>` as an HTML tag. The inline extensions
/// run over the joined run instead, with the HTML ranges remembered so
/// they can be restored around whatever the extensions do not claim.
#[derive(Debug, Default)]
struct TextRun {
    text: String,
    html: Vec<Span>,
}

impl TextRun {
    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn push_html(&mut self, html: &str) {
        let start = self.text.len();
        self.text.push_str(html);
        self.html.push(Span {
            start,
            end: self.text.len(),
        });
    }

    fn overlaps_html(&self, span: Span) -> bool {
        self.html.iter().any(|html| html.overlaps(span))
    }

    fn in_html(&self, pos: usize) -> bool {
        self.html.iter().any(|html| html.contains(pos))
    }
}

/// Extra state carried by an open frame.
#[derive(Debug)]
enum Role {
    /// Receives children as they come.
    Container,
    /// Opened on its first inline content. Display math seen before that is
    /// held back, so a paragraph that only holds display math leaves no
    /// trace.
    Paragraph {
        parent: NodeId,
        math: Option<String>,
    },
    /// A `$$` line with no closer. Everything up to the end of the
    /// paragraph is already in the math node's tokens.
    UnclosedMath,
    /// Inline content of a tight item goes into a paragraph of its own.
    Item { para: Option<NodeId> },
    List { loose: bool },
    CodeBlock { code: String, fence: Option<String> },
    HtmlBlock { html: String },
    /// Marker sub-nodes appended when the element closes.
    Wrapped { closing: Vec<(NodeKind, String)> },
    /// A tag with no node of its own; its content goes to the enclosing frame.
    Transparent,
}

#[derive(Debug)]
struct Frame {
    /// Node receiving children, `None` for a paragraph not opened yet.
    node: Option<NodeId>,
    role: Role,
}

/// Builds the tree one event at a time.
///
/// Every `Start` event pushes exactly one frame and every `End` pops one,
/// so frames mirror the nesting pulldown-cmark reports. Text and inline
/// HTML are buffered in a [`TextRun`] and flushed before any other event is
/// handled, which means the flush always lands in the frame the text
/// belonged to.
///
/// ## Tight list items
///
/// ```markdown
/// - one
/// - two
/// ```
///
/// pulldown-cmark emits no paragraph events for tight items:
/// `Start(Item)`, `Text("one")`, `End(Item)`. The builder gives such text a
/// synthetic paragraph so both tight and loose items have the same shape,
/// and records tightness on the list and its items instead. A list is
/// loose as soon as one of its items contains a real `Start(Paragraph)`.
pub(crate) struct TreeBuilder<'s> {
    source: &'s str,
    options: &'s ParseOptions,
    tree: Tree,
    stack: Vec<Frame>,
    run: TextRun,
    alignments: Vec<CellAlign>,
    column: usize,
}

impl<'s> TreeBuilder<'s> {
    pub(crate) fn new(source: &'s str, options: &'s ParseOptions) -> Self {
        let tree = Tree::new();
        let root = tree.root_id();
        Self {
            source,
            options,
            tree,
            stack: vec![Frame {
                node: Some(root),
                role: Role::Container,
            }],
            run: TextRun::default(),
            alignments: Vec::new(),
            column: 0,
        }
    }

    /// Process a single event with its source range.
    pub(crate) fn process_event(&mut self, event: Event<'_>, range: Range<usize>) {
        if self.in_unclosed_math() {
            match event {
                Event::Start(_) => self.stack.push(Frame {
                    node: None,
                    role: Role::Transparent,
                }),
                Event::End(_) => self.end(),
                _ => {}
            }
            return;
        }

        match &event {
            Event::Text(text) => {
                if let Some(Frame {
                    role: Role::CodeBlock { code, .. },
                    ..
                }) = self.stack.last_mut()
                {
                    code.push_str(text);
                } else {
                    self.run.push_text(text);
                }
                return;
            }
            Event::InlineHtml(html) => {
                self.run.push_html(html);
                return;
            }
            Event::InlineMath(math) if self.inline_math_is_text(math, &range) => {
                log::trace!("inline math {math:?} at byte {} kept as text", range.start);
                self.run.push_text(&self.source[range]);
                return;
            }
            _ => {}
        }

        self.flush_text();
        match event {
            Event::Start(tag) => self.start(tag, range),
            Event::End(_) => self.end(),
            Event::Code(code) => self.code_span(&code, range),
            Event::InlineMath(math) => {
                let parent = self.inline_parent();
                self.tree
                    .append_with_tokens(parent, NodeKind::InlineMath, &*math);
            }
            Event::DisplayMath(math) => self.display_math(&math),
            Event::Html(html) => {
                if let Some(Frame {
                    role: Role::HtmlBlock { html: buf },
                    ..
                }) = self.stack.last_mut()
                {
                    buf.push_str(&html);
                } else {
                    let parent = self.block_parent();
                    self.tree
                        .append_with_tokens(parent, NodeKind::HtmlBlock, &*html);
                }
            }
            Event::SoftBreak => {
                let parent = self.inline_parent();
                self.tree.append_with_tokens(parent, NodeKind::SoftBreak, "\n");
            }
            Event::HardBreak => {
                let parent = self.inline_parent();
                self.tree.append(parent, NodeKind::HardBreak);
            }
            Event::Rule => {
                let parent = self.block_parent();
                self.tree.append(parent, NodeKind::ThematicBreak);
            }
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(_) => {
                // Footnotes are not enabled; keep whatever was written.
                self.run.push_text(&self.source[range]);
            }
            _ => {}
        }
    }

    /// Flushes pending text and hands over the finished tree.
    pub(crate) fn finish(mut self) -> Tree {
        self.flush_text();
        debug_assert_eq!(self.stack.len(), 1, "unbalanced start/end events");
        self.tree
    }

    /// Inline math the grammar leaves as literal text: blank content, or a
    /// digit right inside the opener or right after the closer.
    fn inline_math_is_text(&self, math: &str, range: &Range<usize>) -> bool {
        if math.trim().is_empty() {
            return true;
        }
        if self.options.inline_math_allow_digit_after_open {
            return false;
        }
        let is_digit = |c: char| c.is_ascii_digit();
        math.starts_with(is_digit) || self.source[range.end..].starts_with(is_digit)
    }

    fn in_unclosed_math(&self) -> bool {
        self.stack
            .iter()
            .any(|frame| matches!(frame.role, Role::UnclosedMath))
    }

    fn start(&mut self, tag: Tag<'_>, range: Range<usize>) {
        let source = self.source;
        let raw = &source[range];
        let frame = match tag {
            Tag::Paragraph => {
                if matches!(self.stack.last(), Some(Frame { role: Role::Item { .. }, .. })) {
                    self.mark_list_loose();
                }
                let parent = self.block_parent();
                match self.options.math.then(|| unclosed_math(raw)).flatten() {
                    Some(math) => {
                        log::trace!("unclosed $$ block with {} bytes of math", math.len());
                        let block = self
                            .tree
                            .append_with_tokens(parent, NodeKind::MathBlock, math);
                        Frame {
                            node: Some(block),
                            role: Role::UnclosedMath,
                        }
                    }
                    None => Frame {
                        node: None,
                        role: Role::Paragraph { parent, math: None },
                    },
                }
            }
            Tag::Heading { level, .. } => {
                let parent = self.block_parent();
                let heading = self.tree.append(parent, NodeKind::Heading { level: level as u8 });
                if let Some(marker) = atx_marker(raw) {
                    self.tree
                        .append_with_tokens(heading, NodeKind::HeadingMarker, marker);
                }
                container(heading)
            }
            Tag::BlockQuote(_) => {
                let parent = self.block_parent();
                let quote = self.tree.append(parent, NodeKind::BlockQuote);
                self.tree
                    .append_with_tokens(quote, NodeKind::BlockQuoteMarker, ">");
                container(quote)
            }
            Tag::CodeBlock(kind) => {
                let (data, fence) = match kind {
                    CodeBlockKind::Fenced(info) => {
                        let data = CodeBlockData {
                            fenced: true,
                            info: (!info.trim().is_empty()).then(|| info.trim().to_string()),
                        };
                        (data, Some(fence_marker(raw).to_string()))
                    }
                    CodeBlockKind::Indented => (CodeBlockData::default(), None),
                };
                let parent = self.block_parent();
                let block = self.tree.append(parent, NodeKind::CodeBlock(data));
                Frame {
                    node: Some(block),
                    role: Role::CodeBlock {
                        code: String::new(),
                        fence,
                    },
                }
            }
            Tag::HtmlBlock => {
                let parent = self.block_parent();
                let block = self.tree.append(parent, NodeKind::HtmlBlock);
                Frame {
                    node: Some(block),
                    role: Role::HtmlBlock {
                        html: String::new(),
                    },
                }
            }
            Tag::List(start) => {
                let data = match start {
                    Some(start) => ListData::ordered(start),
                    None => {
                        let marker = raw.trim_start().bytes().next();
                        ListData::bullet(marker.filter(|b| b"-*+".contains(b)).unwrap_or(b'-'))
                    }
                };
                let parent = self.block_parent();
                let list = self.tree.append(parent, NodeKind::List(data));
                Frame {
                    node: Some(list),
                    role: Role::List { loose: false },
                }
            }
            Tag::Item => {
                let parent = self.block_parent();
                let data = match self.tree.get(parent).kind() {
                    NodeKind::List(data) => *data,
                    _ => ListData::bullet(b'-'),
                };
                let item = self.tree.append(parent, NodeKind::ListItem(data));
                Frame {
                    node: Some(item),
                    role: Role::Item { para: None },
                }
            }
            Tag::Table(alignments) => {
                self.alignments = alignments.into_iter().map(cell_align).collect();
                let parent = self.block_parent();
                container(self.tree.append(parent, NodeKind::Table))
            }
            Tag::TableHead => {
                self.column = 0;
                let table = self.inline_parent();
                container(self.tree.append(table, NodeKind::TableHead))
            }
            Tag::TableRow => {
                self.column = 0;
                let table = self.inline_parent();
                container(self.tree.append(table, NodeKind::TableRow))
            }
            Tag::TableCell => {
                let align = self.alignments.get(self.column).copied().unwrap_or_default();
                self.column += 1;
                let row = self.inline_parent();
                container(self.tree.append(row, NodeKind::TableCell { align }))
            }
            Tag::Emphasis => {
                let marker = raw
                    .bytes()
                    .next()
                    .and_then(EmphasisMarker::from_byte)
                    .unwrap_or(EmphasisMarker::Asterisk);
                let delimiter = marker.delimiter(true);
                self.wrapped(
                    NodeKind::Emphasis(marker),
                    vec![(NodeKind::EmphasisOpenMarker, delimiter.to_string())],
                    vec![(NodeKind::EmphasisCloseMarker, delimiter.to_string())],
                )
            }
            Tag::Strong => {
                let marker = raw
                    .bytes()
                    .next()
                    .and_then(EmphasisMarker::from_byte)
                    .unwrap_or(EmphasisMarker::Asterisk);
                let delimiter = marker.delimiter(false);
                self.wrapped(
                    NodeKind::Strong(marker),
                    vec![(NodeKind::StrongOpenMarker, delimiter.to_string())],
                    vec![(NodeKind::StrongCloseMarker, delimiter.to_string())],
                )
            }
            Tag::Strikethrough => {
                let marker = if raw.starts_with("~~") {
                    TildeMarker::Double
                } else {
                    TildeMarker::Single
                };
                let delimiter = marker.delimiter();
                self.wrapped(
                    NodeKind::Strikethrough(marker),
                    vec![(NodeKind::StrikethroughOpenMarker, delimiter.to_string())],
                    vec![(NodeKind::StrikethroughCloseMarker, delimiter.to_string())],
                )
            }
            Tag::Link {
                dest_url, title, ..
            } => {
                let data = link_data(&dest_url, &title);
                let closing = link_closing(&data);
                self.wrapped(
                    NodeKind::Link(data),
                    vec![(NodeKind::OpenBracket, "[".to_string())],
                    closing,
                )
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let data = link_data(&dest_url, &title);
                let closing = link_closing(&data);
                self.wrapped(
                    NodeKind::Image(data),
                    vec![
                        (NodeKind::Bang, "!".to_string()),
                        (NodeKind::OpenBracket, "[".to_string()),
                    ],
                    closing,
                )
            }
            _ => Frame {
                node: None,
                role: Role::Transparent,
            },
        };
        self.stack.push(frame);
    }

    fn end(&mut self) {
        // The document frame is never popped.
        if self.stack.len() <= 1 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let Some(node) = frame.node else {
            if let Role::Paragraph {
                parent,
                math: Some(math),
            } = frame.role
            {
                self.tree
                    .append_with_tokens(parent, NodeKind::MathBlock, math);
            }
            return;
        };

        match frame.role {
            Role::List { loose: true } => {
                let items: Vec<NodeId> = self.tree.get(node).children().map(|c| c.id()).collect();
                for id in std::iter::once(node).chain(items) {
                    if let NodeKind::List(data) | NodeKind::ListItem(data) = self.tree.kind_mut(id) {
                        data.tight = false;
                    }
                }
            }
            Role::CodeBlock { code, fence } => self.finish_code_block(node, code, fence),
            Role::HtmlBlock { html } => *self.tree.tokens_mut(node) = html,
            Role::Wrapped { closing } => {
                for (kind, tokens) in closing {
                    self.tree.append_with_tokens(node, kind, tokens);
                }
            }
            _ => {}
        }
    }

    /// Appends an inline element with its opening markers and keeps the
    /// closing ones for [`end`](Self::end).
    fn wrapped(
        &mut self,
        kind: NodeKind,
        opening: Vec<(NodeKind, String)>,
        closing: Vec<(NodeKind, String)>,
    ) -> Frame {
        let parent = self.inline_parent();
        let node = self.tree.append(parent, kind);
        for (kind, tokens) in opening {
            self.tree.append_with_tokens(node, kind, tokens);
        }
        Frame {
            node: Some(node),
            role: Role::Wrapped { closing },
        }
    }

    /// Fenced blocks get `open, [info], code, close` sub-nodes; both the
    /// block and its code node carry the code text.
    fn finish_code_block(&mut self, node: NodeId, code: String, fence: Option<String>) {
        if let Some(fence) = fence {
            let info = match self.tree.get(node).kind() {
                NodeKind::CodeBlock(data) => data.info.clone(),
                _ => None,
            };
            self.tree.append_with_tokens(
                node,
                NodeKind::CodeBlockFenceOpenMarker,
                fence.as_str(),
            );
            if let Some(info) = info {
                self.tree
                    .append_with_tokens(node, NodeKind::CodeBlockFenceInfoMarker, info);
            }
            self.tree
                .append_with_tokens(node, NodeKind::CodeBlockCode, code.as_str());
            self.tree
                .append_with_tokens(node, NodeKind::CodeBlockFenceCloseMarker, fence);
        }
        *self.tree.tokens_mut(node) = code;
    }

    fn code_span(&mut self, code: &str, range: Range<usize>) {
        let source = self.source;
        let raw = &source[range];
        let ticks = raw.len() - raw.trim_start_matches('`').len();
        let marker = if ticks == 0 { "`" } else { &raw[..ticks] };

        let parent = self.inline_parent();
        let span = self.tree.append_with_tokens(parent, NodeKind::CodeSpan, code);
        self.tree
            .append_with_tokens(span, NodeKind::CodeSpanOpenMarker, marker);
        self.tree
            .append_with_tokens(span, NodeKind::CodeSpanContent, code);
        self.tree
            .append_with_tokens(span, NodeKind::CodeSpanCloseMarker, marker);
    }

    /// Display math stays inside the paragraph it appears in. At the very
    /// start of a paragraph it is held back until more content shows up,
    /// and becomes a block of its own if none does.
    fn display_math(&mut self, math: &str) {
        let math = math.trim();
        let frame = self
            .stack
            .iter_mut()
            .rev()
            .find(|frame| !matches!(frame.role, Role::Transparent));
        if let Some(frame) = frame {
            match (frame.node, &mut frame.role) {
                (None, Role::Paragraph { math: pending, .. }) if pending.is_none() => {
                    *pending = Some(math.to_string());
                    return;
                }
                (Some(item), Role::Item { para: None }) => {
                    self.tree
                        .append_with_tokens(item, NodeKind::MathBlock, math);
                    return;
                }
                _ => {}
            }
        }
        let parent = self.inline_parent();
        self.tree
            .append_with_tokens(parent, NodeKind::MathBlock, math);
    }

    fn task_list_marker(&mut self, checked: bool) {
        let item = self.stack.iter().rev().find_map(|frame| match frame.role {
            Role::Item { .. } => frame.node,
            _ => None,
        });
        let Some(item) = item else {
            log::warn!("task list marker outside of a list item");
            return;
        };
        if let NodeKind::ListItem(data) = self.tree.kind_mut(item) {
            data.kind = ListKind::Task;
        }
        self.tree
            .append(item, NodeKind::TaskListItemMarker { checked });
    }

    fn mark_list_loose(&mut self) {
        if let Some(Role::List { loose }) = self
            .stack
            .iter_mut()
            .rev()
            .map(|frame| &mut frame.role)
            .find(|role| matches!(role, Role::List { .. }))
        {
            *loose = true;
        }
    }

    /// Where inline content goes, opening a pending paragraph if needed.
    fn inline_parent(&mut self) -> NodeId {
        let Self { stack, tree, .. } = self;
        for frame in stack.iter_mut().rev() {
            match &mut frame.role {
                Role::Transparent => continue,
                Role::Paragraph { parent, math } => {
                    if let Some(node) = frame.node {
                        return node;
                    }
                    let para = tree.append(*parent, NodeKind::Paragraph);
                    if let Some(math) = math.take() {
                        tree.append_with_tokens(para, NodeKind::MathBlock, math);
                    }
                    frame.node = Some(para);
                    return para;
                }
                Role::Item { para } => {
                    if let Some(item) = frame.node {
                        return *para
                            .get_or_insert_with(|| tree.append(item, NodeKind::Paragraph));
                    }
                }
                _ => {
                    if let Some(node) = frame.node {
                        return node;
                    }
                }
            }
        }
        tree.root_id()
    }

    /// Where a new block goes. Closes the synthetic paragraph of a tight
    /// item, so later text starts a fresh one.
    fn block_parent(&mut self) -> NodeId {
        for frame in self.stack.iter_mut().rev() {
            match &mut frame.role {
                Role::Transparent => continue,
                Role::Item { para } => *para = None,
                Role::Paragraph { parent, .. } => return *parent,
                _ => {}
            }
            if let Some(node) = frame.node {
                return node;
            }
        }
        self.tree.root_id()
    }

    /// Runs the inline extensions over the buffered text and appends the
    /// result to the current inline parent.
    fn flush_text(&mut self) {
        if self.run.text.is_empty() {
            return;
        }
        let run = std::mem::take(&mut self.run);
        let parent = self.inline_parent();

        let mut pieces: Vec<InlineNode> = Vec::new();
        for piece in parse_inline(&run.text, self.options) {
            let piece = match piece {
                InlineNode::Emoji(m) if run.overlaps_html(m.full) => InlineNode::Text(m.full),
                InlineNode::AnnotationRef(m) if run.in_html(m.full.start) => {
                    InlineNode::Text(m.full)
                }
                other => other,
            };
            if let (Some(InlineNode::Text(prev)), InlineNode::Text(span)) =
                (pieces.last_mut(), &piece)
            {
                if prev.end == span.start {
                    prev.end = span.end;
                    continue;
                }
            }
            pieces.push(piece);
        }

        for piece in pieces {
            let span = piece.span();
            let source = &run.text[span.start..span.end];
            match piece {
                InlineNode::Text(span) => self.append_text(&run, parent, span),
                InlineNode::AnnotationRef(m) => {
                    m.append_to(&mut self.tree, parent, source);
                }
                InlineNode::Emoji(m) => {
                    m.append_to(&mut self.tree, parent, source);
                }
            }
        }
    }

    /// Appends a text piece, restoring the inline HTML it contains.
    fn append_text(&mut self, run: &TextRun, parent: NodeId, span: Span) {
        let mut pos = span.start;
        for html in run.html.iter().filter(|html| html.overlaps(span)) {
            let start = html.start.max(span.start);
            let end = html.end.min(span.end);
            if pos < start {
                self.tree
                    .append_with_tokens(parent, NodeKind::Text, &run.text[pos..start]);
            }
            self.tree
                .append_with_tokens(parent, NodeKind::InlineHtml, &run.text[start..end]);
            pos = end;
        }
        if pos < span.end {
            self.tree
                .append_with_tokens(parent, NodeKind::Text, &run.text[pos..span.end]);
        }
    }
}

/// The `#` run of an ATX heading, `None` for setext headings.
fn atx_marker(raw: &str) -> Option<&str> {
    let trimmed = raw.trim_start_matches(' ');
    let hashes = trimmed.len() - trimmed.trim_start_matches('#').len();
    let after = trimmed[hashes..].chars().next();
    ((1..=6).contains(&hashes) && after.is_none_or(char::is_whitespace)).then(|| &trimmed[..hashes])
}

/// Contents of a paragraph that opens with a lone `$$` line and never
/// closes it.
fn unclosed_math(raw: &str) -> Option<&str> {
    let (first, rest) = raw.split_once('\n').unwrap_or((raw, ""));
    (first.trim() == "$$" && !rest.contains("$$")).then(|| rest.trim())
}

/// The opening fence of a fenced code block.
fn fence_marker(raw: &str) -> &str {
    let trimmed = raw.trim_start_matches(' ');
    let Some(fence_char) = trimmed.chars().next().filter(|c| matches!(c, '`' | '~')) else {
        return "```";
    };
    let len = trimmed.len() - trimmed.trim_start_matches(fence_char).len();
    &trimmed[..len]
}

fn container(node: NodeId) -> Frame {
    Frame {
        node: Some(node),
        role: Role::Container,
    }
}

fn cell_align(alignment: Alignment) -> CellAlign {
    match alignment {
        Alignment::None => CellAlign::None,
        Alignment::Left => CellAlign::Left,
        Alignment::Center => CellAlign::Center,
        Alignment::Right => CellAlign::Right,
    }
}

fn link_data(destination: &str, title: &str) -> LinkData {
    LinkData {
        destination: destination.to_string(),
        title: (!title.is_empty()).then(|| title.to_string()),
    }
}

/// `](dest "title")` as marker sub-nodes.
fn link_closing(data: &LinkData) -> Vec<(NodeKind, String)> {
    let mut closing = vec![
        (NodeKind::CloseBracket, "]".to_string()),
        (NodeKind::OpenParen, "(".to_string()),
        (NodeKind::LinkDest, data.destination.clone()),
    ];
    if let Some(title) = &data.title {
        closing.push((NodeKind::LinkSpace, " ".to_string()));
        closing.push((NodeKind::LinkTitle, title.clone()));
    }
    closing.push((NodeKind::CloseParen, ")".to_string()));
    closing
}
