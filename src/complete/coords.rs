//! Cursor coordinates: (column, row) positions, byte offsets, and the
//! translation between soft-wrapped and canonical text.

use crate::util::{unicode, wrap};

use super::token::clamp_offset;

/// Byte offset of (`x`, `y`) in `content`, where `x` is a byte column within
/// line `y`. The column is clamped to the line's length; a row past the last
/// line clamps to the end of the content.
pub fn cursor_byte_pos(content: &str, x: usize, y: usize) -> usize {
    let mut offset = 0;
    for (row, line) in content.split('\n').enumerate() {
        if row == y {
            return offset + clamp_offset(line, x);
        }
        offset += line.len() + 1;
    }
    content.len()
}

/// Inverse of [`cursor_byte_pos`]: the (byte column, row) of `offset`.
pub fn byte_pos_to_cursor(content: &str, offset: usize) -> (usize, usize) {
    let offset = clamp_offset(content, offset);
    let head = &content[..offset];
    let row = head.matches('\n').count();
    let col = head.rfind('\n').map_or(offset, |nl| offset - nl - 1);
    (col, row)
}

/// Canonical text with a `\n` inserted at every soft wrap point. Whitespace
/// at a wrap point stays at the end of the upper row, so removing the
/// inserted newlines gives back `content` exactly.
pub fn soft_wrap(content: &str, width: usize) -> String {
    let mut out = String::with_capacity(content.len() + content.len() / width.max(1));
    for (idx, line) in content.split('\n').enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let rows = wrap::wrap_line(line, width, idx);
        for (k, row) in rows.iter().enumerate() {
            let end = rows.get(k + 1).map_or(line.len(), |next| next.start);
            if k > 0 {
                out.push('\n');
            }
            out.push_str(&line[row.start..end]);
        }
    }
    out
}

/// Translate an offset in `wrapped` back to `canonical`.
///
/// Both strings are walked in lockstep; a byte that does not match is a
/// wrap-inserted newline and only advances the wrapped side.
pub fn unwrap_offset(wrapped: &str, canonical: &str, wrapped_offset: usize) -> usize {
    let w = wrapped.as_bytes();
    let c = canonical.as_bytes();
    let target = wrapped_offset.min(w.len());
    let mut j = 0;
    for &byte in &w[..target] {
        if j < c.len() && byte == c[j] {
            j += 1;
        }
    }
    clamp_offset(canonical, j)
}

/// Translate a canonical offset into `wrapped`. An offset sitting exactly at
/// a soft wrap point lands at the start of the lower row.
pub fn wrap_offset(wrapped: &str, canonical: &str, canonical_offset: usize) -> usize {
    let w = wrapped.as_bytes();
    let c = canonical.as_bytes();
    let target = clamp_offset(canonical, canonical_offset);
    let (mut i, mut j) = (0, 0);
    while j < target && i < w.len() {
        if w[i] == c[j] {
            j += 1;
        }
        i += 1;
    }
    if i < w.len() && w[i] == b'\n' && c.get(j) != Some(&b'\n') {
        i += 1;
    }
    i
}

/// Canonical byte offset under a screen cell of the wrapped rendering.
/// `x` is a display column, `y` a wrapped row.
pub fn screen_to_offset(canonical: &str, width: usize, x: usize, y: usize) -> usize {
    let wrapped = soft_wrap(canonical, width);
    let row = wrapped.split('\n').nth(y).unwrap_or("");
    let col = unicode::display_col_to_byte_offset(row, x);
    let offset = cursor_byte_pos(&wrapped, col, y);
    unwrap_offset(&wrapped, canonical, offset)
}

/// Screen cell (display column, wrapped row) of a canonical offset. Inside
/// whitespace hanging past the wrap width the column stays on the last cell.
pub fn offset_to_screen(canonical: &str, width: usize, offset: usize) -> (usize, usize) {
    let wrapped = soft_wrap(canonical, width);
    let (col, row) = byte_pos_to_cursor(&wrapped, wrap_offset(&wrapped, canonical, offset));
    let line = wrapped.split('\n').nth(row).unwrap_or("");
    let col = unicode::byte_offset_to_display_col(line, col);
    if width > 0 {
        (col.min(width - 1), row)
    } else {
        (col, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_is_zero() {
        assert_eq!(cursor_byte_pos("", 0, 0), 0);
        assert_eq!(cursor_byte_pos("", 5, 3), 0);
    }

    #[test]
    fn sums_previous_lines() {
        let s = "ab\ncde\nf";
        assert_eq!(cursor_byte_pos(s, 0, 0), 0);
        assert_eq!(cursor_byte_pos(s, 1, 1), 4);
        assert_eq!(cursor_byte_pos(s, 1, 2), 8);
    }

    #[test]
    fn clamps_column_and_row() {
        let s = "ab\ncde";
        assert_eq!(cursor_byte_pos(s, 9, 0), 2);
        assert_eq!(cursor_byte_pos(s, 0, 7), s.len());
    }

    #[test]
    fn mapping_round_trips_on_same_line() {
        let s = "one\n\ntwo three\nfour";
        let lines: Vec<&str> = s.split('\n').collect();
        for (y, line) in lines.iter().enumerate() {
            for x in 0..line.len() + 3 {
                let (bx, by) = byte_pos_to_cursor(s, cursor_byte_pos(s, x, y));
                assert_eq!(by, y);
                assert!(bx <= x);
            }
        }
    }

    #[test]
    fn soft_wrap_only_inserts_newlines() {
        let s = "hello world foo bar\nsecond line here";
        let wrapped = soft_wrap(s, 7);
        assert_eq!(wrapped, "hello \nworld \nfoo bar\nsecond \nline \nhere");
        assert_eq!(wrapped.replace('\n', ""), s.replace('\n', ""));
    }

    #[test]
    fn unwrap_skips_synthetic_newlines() {
        let s = "hello world";
        let wrapped = soft_wrap(s, 7);
        assert_eq!(wrapped, "hello \nworld");
        // 'w' is at wrapped offset 7, canonical offset 6
        assert_eq!(unwrap_offset(&wrapped, s, 7), 6);
        assert_eq!(unwrap_offset(&wrapped, s, wrapped.len()), s.len());
        assert_eq!(unwrap_offset(&wrapped, s, 0), 0);
    }

    #[test]
    fn unwrap_keeps_real_newlines() {
        let s = "ab\ncd";
        assert_eq!(unwrap_offset(s, s, 4), 4);
    }

    #[test]
    fn wrap_offset_prefers_lower_row_at_wrap_point() {
        let s = "hello world";
        let wrapped = soft_wrap(s, 7);
        assert_eq!(wrap_offset(&wrapped, s, 6), 7);
        assert_eq!(wrap_offset(&wrapped, s, 3), 3);
        assert_eq!(wrap_offset(&wrapped, s, s.len()), wrapped.len());
    }

    #[test]
    fn wrap_offset_at_real_newline_stays_on_line() {
        let s = "ab\ncd";
        assert_eq!(wrap_offset(s, s, 2), 2);
    }

    #[test]
    fn screen_positions_round_trip() {
        let s = "hello world foo\nbar";
        for offset in 0..=s.len() {
            let (x, y) = offset_to_screen(s, 7, offset);
            assert_eq!(screen_to_offset(s, 7, x, y), offset, "offset {}", offset);
        }
    }

    #[test]
    fn hanging_whitespace_before_real_newline() {
        let s = "hello \nabc";
        assert_eq!(soft_wrap(s, 5), s);
        // the space after "hello" overflows the row but stays on it
        assert_eq!(offset_to_screen(s, 5, 5), (4, 0));
        assert_eq!(offset_to_screen(s, 5, 6), (4, 0));
        assert_eq!(screen_to_offset(s, 5, 0, 1), 7);
        for offset in (0..5).chain(7..=s.len()) {
            let (x, y) = offset_to_screen(s, 5, offset);
            assert!(x < 5);
            assert_eq!(screen_to_offset(s, 5, x, y), offset, "offset {}", offset);
        }
    }

    #[test]
    fn screen_click_past_row_end_clamps_to_row() {
        let s = "hello world";
        // row 0 is "hello " (6 bytes); clicking far right lands before 'w'
        assert_eq!(screen_to_offset(s, 7, 40, 0), 6);
        assert_eq!(screen_to_offset(s, 7, 2, 1), 8);
    }
}
