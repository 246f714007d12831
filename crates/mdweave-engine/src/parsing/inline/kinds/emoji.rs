/// `:alias:` shortcodes.
pub struct Emoji;

impl Emoji {
    pub const DELIM: u8 = b':';

    pub fn is_alias_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || matches!(b, b'_' | b'+' | b'-')
    }
}
