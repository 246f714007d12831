//! Node kinds and their variant-specific attributes.
//!
//! [`NodeKind`] carries the attributes that only make sense for some node
//! categories (heading level, list metadata, link destination...).
//! [`NodeType`] is the bare tag used to key the render dispatch table.

use serde::Serialize;

/// Marker character family for emphasis and strong emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EmphasisMarker {
    /// `*em*` / `**strong**`
    Asterisk,
    /// `_em_` / `__strong__`
    Underscore,
}

impl EmphasisMarker {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'*' => Some(Self::Asterisk),
            b'_' => Some(Self::Underscore),
            _ => None,
        }
    }

    /// The delimiter run as written in source, `single` for emphasis,
    /// doubled for strong.
    pub fn delimiter(self, single: bool) -> &'static str {
        match (self, single) {
            (Self::Asterisk, true) => "*",
            (Self::Asterisk, false) => "**",
            (Self::Underscore, true) => "_",
            (Self::Underscore, false) => "__",
        }
    }
}

/// Strikethrough delimiter width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TildeMarker {
    Single,
    Double,
}

impl TildeMarker {
    pub fn delimiter(self) -> &'static str {
        match self {
            Self::Single => "~",
            Self::Double => "~~",
        }
    }
}

/// Table cell alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum CellAlign {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl CellAlign {
    /// Value of the `align` attribute, `None` when the attribute is omitted.
    pub fn attr(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
        }
    }
}

/// List flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ListKind {
    Bullet,
    Ordered,
    /// Item carrying a task-list checkbox. Only ever set on list items.
    Task,
}

/// List metadata shared by lists and their items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ListData {
    pub kind: ListKind,
    pub start: u64,
    pub tight: bool,
    /// `-`, `*` or `+` for bullet lists, `None` for ordered lists.
    pub bullet_char: Option<u8>,
}

impl ListData {
    pub fn bullet(bullet_char: u8) -> Self {
        Self {
            kind: ListKind::Bullet,
            start: 1,
            tight: true,
            bullet_char: Some(bullet_char),
        }
    }

    pub fn ordered(start: u64) -> Self {
        Self {
            kind: ListKind::Ordered,
            start,
            tight: true,
            bullet_char: None,
        }
    }

    pub fn loose(mut self) -> Self {
        self.tight = false;
        self
    }

    pub fn tag(&self) -> &'static str {
        match self.kind {
            ListKind::Ordered => "ol",
            ListKind::Bullet | ListKind::Task => "ul",
        }
    }

    /// The `start` attribute value, present only for numbered lists that
    /// do not begin at 1 and carry no bullet character.
    pub fn start_attr(&self) -> Option<u64> {
        (self.kind == ListKind::Ordered && self.bullet_char.is_none() && self.start != 1)
            .then_some(self.start)
    }
}

/// Code block attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CodeBlockData {
    pub fenced: bool,
    /// Info string of a fenced block.
    pub info: Option<String>,
}

impl CodeBlockData {
    /// First whitespace-delimited word of the info string.
    pub fn language(&self) -> Option<&str> {
        self.info
            .as_deref()
            .and_then(|info| info.split_whitespace().next())
    }
}

/// Link and image attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct LinkData {
    pub destination: String,
    pub title: Option<String>,
}

/// Syntactic category of a node plus its variant-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading { level: u8 },
    /// ATX `#` run.
    HeadingMarker,
    ThematicBreak,
    BlockQuote,
    BlockQuoteMarker,
    List(ListData),
    ListItem(ListData),
    TaskListItemMarker { checked: bool },
    CodeBlock(CodeBlockData),
    CodeBlockFenceOpenMarker,
    CodeBlockFenceInfoMarker,
    CodeBlockCode,
    CodeBlockFenceCloseMarker,
    HtmlBlock,
    MathBlock,
    Table,
    TableHead,
    TableRow,
    TableCell { align: CellAlign },
    Text,
    CodeSpan,
    CodeSpanOpenMarker,
    CodeSpanContent,
    CodeSpanCloseMarker,
    Emphasis(EmphasisMarker),
    EmphasisOpenMarker,
    EmphasisCloseMarker,
    Strong(EmphasisMarker),
    StrongOpenMarker,
    StrongCloseMarker,
    Strikethrough(TildeMarker),
    StrikethroughOpenMarker,
    StrikethroughCloseMarker,
    Link(LinkData),
    Image(LinkData),
    Bang,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    LinkDest,
    LinkSpace,
    LinkTitle,
    InlineHtml,
    InlineMath,
    HardBreak,
    SoftBreak,
    Emoji,
    EmojiUnicode,
    EmojiImg,
    EmojiAlias,
    AnnotationRef,
    AnnotationRefId,
    AnnotationRefSpace,
    AnnotationRefText,
    /// One `<` of an annotation-reference opener.
    Less,
    /// One `>` of an annotation-reference closer.
    Greater,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Document => NodeType::Document,
            Self::Paragraph => NodeType::Paragraph,
            Self::Heading { .. } => NodeType::Heading,
            Self::HeadingMarker => NodeType::HeadingMarker,
            Self::ThematicBreak => NodeType::ThematicBreak,
            Self::BlockQuote => NodeType::BlockQuote,
            Self::BlockQuoteMarker => NodeType::BlockQuoteMarker,
            Self::List(_) => NodeType::List,
            Self::ListItem(_) => NodeType::ListItem,
            Self::TaskListItemMarker { .. } => NodeType::TaskListItemMarker,
            Self::CodeBlock(_) => NodeType::CodeBlock,
            Self::CodeBlockFenceOpenMarker => NodeType::CodeBlockFenceOpenMarker,
            Self::CodeBlockFenceInfoMarker => NodeType::CodeBlockFenceInfoMarker,
            Self::CodeBlockCode => NodeType::CodeBlockCode,
            Self::CodeBlockFenceCloseMarker => NodeType::CodeBlockFenceCloseMarker,
            Self::HtmlBlock => NodeType::HtmlBlock,
            Self::MathBlock => NodeType::MathBlock,
            Self::Table => NodeType::Table,
            Self::TableHead => NodeType::TableHead,
            Self::TableRow => NodeType::TableRow,
            Self::TableCell { .. } => NodeType::TableCell,
            Self::Text => NodeType::Text,
            Self::CodeSpan => NodeType::CodeSpan,
            Self::CodeSpanOpenMarker => NodeType::CodeSpanOpenMarker,
            Self::CodeSpanContent => NodeType::CodeSpanContent,
            Self::CodeSpanCloseMarker => NodeType::CodeSpanCloseMarker,
            Self::Emphasis(_) => NodeType::Emphasis,
            Self::EmphasisOpenMarker => NodeType::EmphasisOpenMarker,
            Self::EmphasisCloseMarker => NodeType::EmphasisCloseMarker,
            Self::Strong(_) => NodeType::Strong,
            Self::StrongOpenMarker => NodeType::StrongOpenMarker,
            Self::StrongCloseMarker => NodeType::StrongCloseMarker,
            Self::Strikethrough(_) => NodeType::Strikethrough,
            Self::StrikethroughOpenMarker => NodeType::StrikethroughOpenMarker,
            Self::StrikethroughCloseMarker => NodeType::StrikethroughCloseMarker,
            Self::Link(_) => NodeType::Link,
            Self::Image(_) => NodeType::Image,
            Self::Bang => NodeType::Bang,
            Self::OpenBracket => NodeType::OpenBracket,
            Self::CloseBracket => NodeType::CloseBracket,
            Self::OpenParen => NodeType::OpenParen,
            Self::CloseParen => NodeType::CloseParen,
            Self::LinkDest => NodeType::LinkDest,
            Self::LinkSpace => NodeType::LinkSpace,
            Self::LinkTitle => NodeType::LinkTitle,
            Self::InlineHtml => NodeType::InlineHtml,
            Self::InlineMath => NodeType::InlineMath,
            Self::HardBreak => NodeType::HardBreak,
            Self::SoftBreak => NodeType::SoftBreak,
            Self::Emoji => NodeType::Emoji,
            Self::EmojiUnicode => NodeType::EmojiUnicode,
            Self::EmojiImg => NodeType::EmojiImg,
            Self::EmojiAlias => NodeType::EmojiAlias,
            Self::AnnotationRef => NodeType::AnnotationRef,
            Self::AnnotationRefId => NodeType::AnnotationRefId,
            Self::AnnotationRefSpace => NodeType::AnnotationRefSpace,
            Self::AnnotationRefText => NodeType::AnnotationRefText,
            Self::Less => NodeType::Less,
            Self::Greater => NodeType::Greater,
        }
    }
}

/// Attribute-free tag for a [`NodeKind`], used to key dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NodeType {
    Document,
    Paragraph,
    Heading,
    HeadingMarker,
    ThematicBreak,
    BlockQuote,
    BlockQuoteMarker,
    List,
    ListItem,
    TaskListItemMarker,
    CodeBlock,
    CodeBlockFenceOpenMarker,
    CodeBlockFenceInfoMarker,
    CodeBlockCode,
    CodeBlockFenceCloseMarker,
    HtmlBlock,
    MathBlock,
    Table,
    TableHead,
    TableRow,
    TableCell,
    Text,
    CodeSpan,
    CodeSpanOpenMarker,
    CodeSpanContent,
    CodeSpanCloseMarker,
    Emphasis,
    EmphasisOpenMarker,
    EmphasisCloseMarker,
    Strong,
    StrongOpenMarker,
    StrongCloseMarker,
    Strikethrough,
    StrikethroughOpenMarker,
    StrikethroughCloseMarker,
    Link,
    Image,
    Bang,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    LinkDest,
    LinkSpace,
    LinkTitle,
    InlineHtml,
    InlineMath,
    HardBreak,
    SoftBreak,
    Emoji,
    EmojiUnicode,
    EmojiImg,
    EmojiAlias,
    AnnotationRef,
    AnnotationRefId,
    AnnotationRefSpace,
    AnnotationRefText,
    Less,
    Greater,
}

impl NodeType {
    /// Every node type, in declaration order.
    pub const ALL: [NodeType; 59] = [
        Self::Document,
        Self::Paragraph,
        Self::Heading,
        Self::HeadingMarker,
        Self::ThematicBreak,
        Self::BlockQuote,
        Self::BlockQuoteMarker,
        Self::List,
        Self::ListItem,
        Self::TaskListItemMarker,
        Self::CodeBlock,
        Self::CodeBlockFenceOpenMarker,
        Self::CodeBlockFenceInfoMarker,
        Self::CodeBlockCode,
        Self::CodeBlockFenceCloseMarker,
        Self::HtmlBlock,
        Self::MathBlock,
        Self::Table,
        Self::TableHead,
        Self::TableRow,
        Self::TableCell,
        Self::Text,
        Self::CodeSpan,
        Self::CodeSpanOpenMarker,
        Self::CodeSpanContent,
        Self::CodeSpanCloseMarker,
        Self::Emphasis,
        Self::EmphasisOpenMarker,
        Self::EmphasisCloseMarker,
        Self::Strong,
        Self::StrongOpenMarker,
        Self::StrongCloseMarker,
        Self::Strikethrough,
        Self::StrikethroughOpenMarker,
        Self::StrikethroughCloseMarker,
        Self::Link,
        Self::Image,
        Self::Bang,
        Self::OpenBracket,
        Self::CloseBracket,
        Self::OpenParen,
        Self::CloseParen,
        Self::LinkDest,
        Self::LinkSpace,
        Self::LinkTitle,
        Self::InlineHtml,
        Self::InlineMath,
        Self::HardBreak,
        Self::SoftBreak,
        Self::Emoji,
        Self::EmojiUnicode,
        Self::EmojiImg,
        Self::EmojiAlias,
        Self::AnnotationRef,
        Self::AnnotationRefId,
        Self::AnnotationRefSpace,
        Self::AnnotationRefText,
        Self::Less,
        Self::Greater,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Dense index into per-type tables.
    pub fn index(self) -> usize {
        self as usize
    }
}
