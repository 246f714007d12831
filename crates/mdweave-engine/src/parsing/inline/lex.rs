//! Shared lexical rules for inline recognizers.

use super::cursor::Cursor;

/// Space, tab, line feed, line tabulation, form feed or carriage return.
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Skips optional whitespace containing at most one line ending.
///
/// Returns `false` when a second line ending is reached; the cursor is then
/// left on it.
pub fn spnl(cur: &mut Cursor<'_>) -> bool {
    let mut newlines = 0;
    while let Some(b) = cur.peek() {
        if b == b'\n' {
            newlines += 1;
            if newlines > 1 {
                return false;
            }
        } else if !is_whitespace(b) {
            break;
        }
        cur.bump();
    }
    true
}

/// Parses a link title delimited by `"…"`, `'…'` or `(…)`.
///
/// A backslash before ASCII punctuation escapes it. Returns the unescaped
/// title and leaves the cursor after the closing delimiter, or `None` with
/// the cursor somewhere inside the attempt.
pub fn parse_link_title(cur: &mut Cursor<'_>) -> Option<String> {
    let close = match cur.peek()? {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };
    let open = cur.bump()?;

    let mut title = String::new();
    let mut run_start = cur.pos();
    loop {
        let b = cur.peek()?;
        if b == close {
            title.push_str(cur.slice(run_start, cur.pos()));
            cur.bump();
            return Some(title);
        }
        if open == b'(' && b == b'(' {
            return None;
        }
        if b == b'\\' && cur.peek_at(1).is_some_and(|n| n.is_ascii_punctuation()) {
            title.push_str(cur.slice(run_start, cur.pos()));
            cur.bump();
            run_start = cur.pos();
            cur.bump();
            continue;
        }
        cur.bump_char();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("  x", true, 2)]
    #[case(" \n x", true, 3)]
    #[case(" \n\n x", false, 2)]
    #[case("x", true, 0)]
    #[case("", true, 0)]
    fn spnl_allows_one_line_ending(#[case] input: &str, #[case] ok: bool, #[case] pos: usize) {
        let mut cur = Cursor::new(input);
        assert_eq!(spnl(&mut cur), ok);
        assert_eq!(cur.pos(), pos);
    }

    #[rstest]
    #[case(r#""bar">>"#, Some("bar"), 5)]
    #[case("'bar' x", Some("bar"), 5)]
    #[case("(bar)", Some("bar"), 5)]
    #[case(r#""a\"b""#, Some("a\"b"), 6)]
    #[case(r#""über""#, Some("über"), 7)]
    #[case(r#""unterminated"#, None, 0)]
    #[case("(a(b))", None, 0)]
    #[case("bare", None, 0)]
    fn link_titles(#[case] input: &str, #[case] expected: Option<&str>, #[case] pos: usize) {
        let mut cur = Cursor::new(input);
        let title = parse_link_title(&mut cur);
        assert_eq!(title.as_deref(), expected);
        if expected.is_some() {
            assert_eq!(cur.pos(), pos);
        }
    }

    #[test]
    fn whitespace_bytes() {
        for b in [b' ', b'\t', b'\n', b'\r', 0x0b, 0x0c] {
            assert!(is_whitespace(b));
        }
        assert!(!is_whitespace(b'x'));
        assert!(!is_whitespace(b'>'));
    }
}
