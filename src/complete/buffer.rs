/// The editing surface the completion engine needs from a text widget.
///
/// Counts and offsets are bytes into the unwrapped content and always fall
/// on char boundaries when they come from the engine.
pub trait TextBuffer {
    /// Delete `n` bytes before the cursor.
    fn delete_backward(&mut self, n: usize);
    /// Delete `n` bytes after the cursor.
    fn delete_forward(&mut self, n: usize);
    /// Insert `text` at the cursor and move the cursor past it.
    fn insert(&mut self, text: &str);
    fn cursor_byte_offset(&self) -> usize;
    /// Canonical content, free of soft-wrap newlines.
    fn unwrapped_content(&self) -> String;
}
