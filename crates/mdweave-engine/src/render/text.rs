//! Text post-processing hooks applied by the editor dialect before escaping.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Canonical spellings for common technical terms, keyed by lowercase form.
const TERMS: &[(&str, &str)] = &[
    ("android", "Android"),
    ("chrome", "Chrome"),
    ("css", "CSS"),
    ("docker", "Docker"),
    ("firefox", "Firefox"),
    ("git", "Git"),
    ("github", "GitHub"),
    ("gitlab", "GitLab"),
    ("golang", "Golang"),
    ("html", "HTML"),
    ("http", "HTTP"),
    ("https", "HTTPS"),
    ("ios", "iOS"),
    ("javascript", "JavaScript"),
    ("json", "JSON"),
    ("linux", "Linux"),
    ("macos", "macOS"),
    ("markdown", "Markdown"),
    ("mysql", "MySQL"),
    ("nodejs", "Node.js"),
    ("postgresql", "PostgreSQL"),
    ("python", "Python"),
    ("sql", "SQL"),
    ("typescript", "TypeScript"),
    ("ubuntu", "Ubuntu"),
    ("url", "URL"),
    ("windows", "Windows"),
];

fn term_regex() -> &'static Regex {
    static TERM_REGEX: OnceLock<Regex> = OnceLock::new();
    TERM_REGEX.get_or_init(|| {
        let alternation = TERMS
            .iter()
            .map(|(term, _)| regex::escape(term))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("Invalid term regex")
    })
}

/// Rewrites well-known technical terms to their canonical casing.
///
/// Matching is case-insensitive and on word boundaries, so `github` and
/// `GITHUB` both become `GitHub` while `githubber` is left alone.
pub fn fix_term_typo(text: &str) -> Cow<'_, str> {
    term_regex().replace_all(text, |caps: &Captures<'_>| {
        let found = &caps[0];
        let lower = found.to_ascii_lowercase();
        TERMS
            .iter()
            .find(|(term, _)| *term == lower)
            .map_or_else(|| found.to_string(), |(_, canonical)| canonical.to_string())
    })
}

/// Han, kana and hangul.
fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{F900}'..='\u{FAFF}')
}

fn needs_space(prev: char, next: char) -> bool {
    (is_cjk(prev) && next.is_ascii_alphanumeric()) || (prev.is_ascii_alphanumeric() && is_cjk(next))
}

/// Inserts a single space wherever CJK text meets ASCII letters or digits.
pub fn auto_space(text: &str) -> Cow<'_, str> {
    let mut chars = text.chars();
    let Some(mut prev) = chars.next() else {
        return Cow::Borrowed(text);
    };
    if !text
        .chars()
        .zip(text.chars().skip(1))
        .any(|(a, b)| needs_space(a, b))
    {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    out.push(prev);
    for c in chars {
        if needs_space(prev, c) {
            out.push(' ');
        }
        out.push(c);
        prev = c;
    }
    Cow::Owned(out)
}
