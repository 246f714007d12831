use super::annotation_ref::AnnotationRefMatch;
use super::emoji::EmojiMatch;

/// A byte range `[start, end)` into the scanned text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Whether the two ranges share at least one byte.
    #[must_use]
    pub fn overlaps(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    #[must_use]
    pub fn contains(self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}

/// One piece of a scanned text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Literal text, including any construct that failed to match.
    Text(Span),
    AnnotationRef(AnnotationRefMatch),
    Emoji(EmojiMatch),
}

impl InlineNode {
    pub fn span(&self) -> Span {
        match self {
            Self::Text(span) => *span,
            Self::AnnotationRef(m) => m.full,
            Self::Emoji(m) => m.full,
        }
    }
}
