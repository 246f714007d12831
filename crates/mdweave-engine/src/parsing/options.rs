use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Grammar switches for [`parse`](super::parse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Tables, strikethrough and task lists.
    pub gfm: bool,
    /// `$inline$` and `$$display$$` math.
    pub math: bool,
    /// Accept inline math whose content starts with a digit (`$1$`).
    /// Off by default so prices like `$5 and $10` stay text.
    pub inline_math_allow_digit_after_open: bool,
    /// `<<id "title">>` annotation references.
    pub annotation_ref: bool,
    /// `:alias:` emoji shortcodes.
    pub emoji: bool,
    /// Extra shortcodes rendered as images, alias to image URL.
    pub custom_emoji: BTreeMap<String, String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            math: true,
            inline_math_allow_digit_after_open: false,
            annotation_ref: true,
            emoji: true,
            custom_emoji: BTreeMap::new(),
        }
    }
}
