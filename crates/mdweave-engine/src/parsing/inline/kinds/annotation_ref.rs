/// `<<identifier "optional title">>`
pub struct AnnotationRef;

impl AnnotationRef {
    pub const OPEN: &'static [u8; 2] = b"<<";
    pub const CLOSE: &'static [u8; 2] = b">>";
    /// Shortest complete construct, `<<a>>`.
    pub const MIN_LEN: usize = 5;
    /// Context that must follow an identifier: at least the closer.
    pub const MIN_TRAILING: usize = Self::CLOSE.len();
}
