/// Whitespace that ends a completion token.
pub fn is_token_break(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// Snap `pos` into `0..=content.len()` and down to a char boundary.
pub fn clamp_offset(content: &str, pos: usize) -> usize {
    let mut pos = pos.min(content.len());
    while !content.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// The whitespace-delimited token ending at `cursor`, and the byte offset
/// where it starts. A cursor right after whitespace yields an empty token.
pub fn extract_token_at_cursor(content: &str, cursor: usize) -> (&str, usize) {
    let cursor = clamp_offset(content, cursor);
    let start = content[..cursor]
        .char_indices()
        .rev()
        .find(|(_, c)| is_token_break(*c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    (&content[start..cursor], start)
}
