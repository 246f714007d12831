//! `:alias:` emoji shortcodes.

use crate::ast::{NodeId, NodeKind, Tree};
use crate::parsing::options::ParseOptions;
use crate::render::escape_html;

use super::cursor::Cursor;
use super::kinds::Emoji;
use super::types::Span;

/// Built-in aliases, sorted by alias for binary search.
const BUILTIN: &[(&str, &str)] = &[
    ("+1", "👍"),
    ("-1", "👎"),
    ("100", "💯"),
    ("angry", "😠"),
    ("arrow_down", "⬇️"),
    ("arrow_left", "⬅️"),
    ("arrow_right", "➡️"),
    ("arrow_up", "⬆️"),
    ("art", "🎨"),
    ("beer", "🍺"),
    ("bell", "🔔"),
    ("blush", "😊"),
    ("book", "📖"),
    ("books", "📚"),
    ("broken_heart", "💔"),
    ("bug", "🐛"),
    ("bulb", "💡"),
    ("calendar", "📆"),
    ("cat", "🐱"),
    ("checkered_flag", "🏁"),
    ("clap", "👏"),
    ("cloud", "☁️"),
    ("coffee", "☕"),
    ("construction", "🚧"),
    ("cry", "😢"),
    ("dog", "🐶"),
    ("exclamation", "❗"),
    ("eyes", "👀"),
    ("fire", "🔥"),
    ("gear", "⚙️"),
    ("gift", "🎁"),
    ("grin", "😁"),
    ("hammer", "🔨"),
    ("heart", "❤️"),
    ("heavy_check_mark", "✔️"),
    ("joy", "😂"),
    ("key", "🔑"),
    ("laughing", "😆"),
    ("link", "🔗"),
    ("lipstick", "💄"),
    ("lock", "🔒"),
    ("mag", "🔍"),
    ("memo", "📝"),
    ("muscle", "💪"),
    ("ok_hand", "👌"),
    ("package", "📦"),
    ("paperclip", "📎"),
    ("pizza", "🍕"),
    ("point_left", "👈"),
    ("point_right", "👉"),
    ("pray", "🙏"),
    ("pushpin", "📌"),
    ("question", "❓"),
    ("recycle", "♻️"),
    ("rocket", "🚀"),
    ("rofl", "🤣"),
    ("see_no_evil", "🙈"),
    ("smile", "😄"),
    ("smiley", "😃"),
    ("snowflake", "❄️"),
    ("sob", "😭"),
    ("sparkles", "✨"),
    ("star", "⭐"),
    ("sunglasses", "😎"),
    ("sunny", "☀️"),
    ("sweat_smile", "😅"),
    ("tada", "🎉"),
    ("thinking", "🤔"),
    ("triangular_flag_on_post", "🚩"),
    ("trophy", "🏆"),
    ("umbrella", "☂️"),
    ("warning", "⚠️"),
    ("wave", "👋"),
    ("white_check_mark", "✅"),
    ("wink", "😉"),
    ("wrench", "🔧"),
    ("x", "❌"),
    ("zap", "⚡"),
];

/// Looks up a built-in alias.
pub fn builtin(alias: &str) -> Option<&'static str> {
    BUILTIN
        .binary_search_by_key(&alias, |&(a, _)| a)
        .ok()
        .map(|i| BUILTIN[i].1)
}

/// What an alias resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiValue {
    Unicode(&'static str),
    /// URL of a custom image.
    Image(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiMatch {
    /// The whole shortcode, colons included.
    pub full: Span,
    pub alias: String,
    pub value: EmojiValue,
}

impl EmojiMatch {
    /// Appends `Emoji > [EmojiUnicode | EmojiImg, EmojiAlias]` under `parent`.
    pub fn append_to(&self, tree: &mut Tree, parent: NodeId, source: &str) -> NodeId {
        let node = tree.append_with_tokens(parent, NodeKind::Emoji, source);
        match &self.value {
            EmojiValue::Unicode(glyph) => {
                tree.append_with_tokens(node, NodeKind::EmojiUnicode, *glyph);
            }
            EmojiValue::Image(url) => {
                let alias = escape_html(&self.alias);
                let img = format!(
                    r#"<img alt="{alias}" class="emoji" src="{}" title="{alias}" />"#,
                    escape_html(url)
                );
                tree.append_with_tokens(node, NodeKind::EmojiImg, img);
            }
        }
        tree.append_with_tokens(node, NodeKind::EmojiAlias, source);
        node
    }
}

/// Attempts to recognize a known `:alias:` at the cursor. Custom aliases
/// take precedence over built-in ones. The cursor is untouched on failure.
pub fn try_parse_emoji(cur: &mut Cursor<'_>, options: &ParseOptions) -> Option<EmojiMatch> {
    if cur.peek() != Some(Emoji::DELIM) {
        return None;
    }

    let start = cur.pos();
    let len = cur.rest()[1..]
        .iter()
        .take_while(|&&b| Emoji::is_alias_byte(b))
        .count();
    if len == 0 || cur.peek_at(len + 1) != Some(Emoji::DELIM) {
        return None;
    }

    let alias = cur.slice(start + 1, start + 1 + len);
    let value = match options.custom_emoji.get(alias) {
        Some(url) => EmojiValue::Image(url.clone()),
        None => EmojiValue::Unicode(builtin(alias)?),
    };

    cur.bump_n(len + 2);
    Some(EmojiMatch {
        full: Span {
            start,
            end: cur.pos(),
        },
        alias: alias.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeType;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_table_is_sorted() {
        assert!(BUILTIN.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn recognizes_builtin_alias() {
        let mut cur = Cursor::new(":tada: done");
        let found = try_parse_emoji(&mut cur, &ParseOptions::default()).unwrap();
        assert_eq!(found.alias, "tada");
        assert_eq!(found.value, EmojiValue::Unicode("🎉"));
        assert_eq!(found.full, Span { start: 0, end: 6 });
        assert_eq!(cur.pos(), 6);
    }

    #[test]
    fn custom_alias_wins() {
        let mut options = ParseOptions::default();
        options
            .custom_emoji
            .insert("tada".to_string(), "https://x/tada.png".to_string());
        let mut cur = Cursor::new(":tada:");
        let found = try_parse_emoji(&mut cur, &options).unwrap();
        assert_eq!(found.value, EmojiValue::Image("https://x/tada.png".to_string()));
    }

    #[test]
    fn unknown_or_malformed_leaves_cursor() {
        let options = ParseOptions::default();
        for input in [":nope:", "::", ":tada", ": tada:", "tada:"] {
            let mut cur = Cursor::new(input);
            assert_eq!(try_parse_emoji(&mut cur, &options), None, "{input:?}");
            assert_eq!(cur.pos(), 0);
        }
    }

    #[test]
    fn image_subtree() {
        let found = EmojiMatch {
            full: Span { start: 0, end: 7 },
            alias: "party".to_string(),
            value: EmojiValue::Image("p.png".to_string()),
        };
        let mut tree = Tree::new();
        let root = tree.root_id();
        let node = found.append_to(&mut tree, root, ":party:");
        let children: Vec<_> = tree
            .get(node)
            .children()
            .map(|c| (c.node_type(), c.tokens().to_string()))
            .collect();
        assert_eq!(
            children,
            [
                (
                    NodeType::EmojiImg,
                    r#"<img alt="party" class="emoji" src="p.png" title="party" />"#.to_string()
                ),
                (NodeType::EmojiAlias, ":party:".to_string()),
            ]
        );
    }
}
