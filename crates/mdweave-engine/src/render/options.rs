use serde::{Deserialize, Serialize};

/// Render-time switches. All are independent and default to off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Render soft line breaks as `<br />` instead of a bare newline.
    pub soft_break_to_hard_break: bool,
    /// Editor dialect: emit an anchor link and icon before heading text.
    pub heading_anchor: bool,
    /// Non-empty value becomes the `class` of task-list `<li>` elements.
    pub task_list_item_class: String,
    /// Editor dialect: space out CJK / ASCII alphanumeric boundaries in text.
    pub auto_space: bool,
    /// Editor dialect: normalise the casing of well-known technical terms.
    pub fix_term_typo: bool,
}
