//! Output substrate shared by every dialect.

use std::borrow::Cow;

use super::options::RenderOptions;

/// Escapes `&`, `<`, `>` and `"` so the result is safe both as element
/// text and inside a double-quoted attribute.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

/// Append-only output buffer plus the tag-suppression counter.
///
/// While the suppression depth is non-zero [`tag`](Self::tag) writes
/// nothing, so nested markup walked inside an attribute context (image
/// alt text) contributes only its text.
#[derive(Debug)]
pub struct BaseRenderer {
    out: String,
    suppress_depth: usize,
    options: RenderOptions,
}

impl BaseRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            out: String::with_capacity(4096),
            suppress_depth: 0,
            options,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Writes raw text.
    pub fn write(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Writes text with HTML escaping.
    pub fn write_escaped(&mut self, s: &str) {
        html_escape::encode_double_quoted_attribute_to_string(s, &mut self.out);
    }

    /// Writes `\n` unless the buffer is empty or already ends with one.
    pub fn newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    /// Writes `<name attr="value"...>`, or `<name ... />` when self-closing.
    ///
    /// Attribute values are written as given: escaping is the caller's
    /// job, so raw passthrough content is never escaped twice. Closing
    /// tags are written by passing `/name`. No-op while suppressed.
    pub fn tag(&mut self, name: &str, attrs: &[(&str, &str)], self_closing: bool) {
        if self.is_suppressed() {
            return;
        }

        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in attrs {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            self.out.push_str(value);
            self.out.push('"');
        }
        if self_closing {
            self.out.push_str(" /");
        }
        self.out.push('>');
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppress_depth > 0
    }

    pub fn suppress_depth(&self) -> usize {
        self.suppress_depth
    }

    /// Enters a suppressed context. Returns `true` for the outermost one.
    pub fn push_suppression(&mut self) -> bool {
        self.suppress_depth += 1;
        self.suppress_depth == 1
    }

    /// Leaves a suppressed context. Returns `true` when tag emission is
    /// live again. Saturates at zero.
    pub fn pop_suppression(&mut self) -> bool {
        match self.suppress_depth {
            0 => false,
            depth => {
                self.suppress_depth = depth - 1;
                self.suppress_depth == 0
            }
        }
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn into_output(self) -> String {
        self.out
    }
}
