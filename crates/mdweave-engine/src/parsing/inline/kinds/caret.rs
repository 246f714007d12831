/// Placeholder the editor host inserts at the caret position.
pub struct Caret;

impl Caret {
    pub const TOKENS: &'static str = "\u{2038}";
}
