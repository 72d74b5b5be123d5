use unicode_segmentation::UnicodeSegmentation;

use super::unicode;

/// One screen row produced by soft-wrapping a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    /// Index of the logical line
    pub line: usize,
    /// Byte offset within the logical line where the row starts
    pub start: usize,
    /// Byte offset (exclusive) of the row's visible end. Whitespace at a
    /// wrap point lies between one row's `end` and the next row's `start`.
    pub end: usize,
}

struct Cell {
    offset: usize,
    width: usize,
    blank: bool,
}

fn cells(line: &str) -> Vec<Cell> {
    line.grapheme_indices(true)
        .map(|(offset, g)| Cell {
            offset,
            width: unicode::grapheme_width(g),
            blank: g.chars().all(char::is_whitespace),
        })
        .collect()
}

/// End (exclusive) of the wrap token starting at cell `i`: a run of
/// whitespace, or a word that also breaks after an inner hyphen.
fn token_end(line: &str, cells: &[Cell], mut i: usize) -> usize {
    let blank = cells[i].blank;
    while i < cells.len() && cells[i].blank == blank {
        let hyphen = !blank && line[cells[i].offset..].starts_with('-');
        i += 1;
        if hyphen && cells.get(i).is_some_and(|c| !c.blank) {
            break;
        }
    }
    i
}

/// Wrap one logical line to `width` cells.
///
/// Breaks after whitespace first, then after hyphens, and falls back to
/// grapheme wrapping for tokens wider than the row. When a word does not fit
/// but more than half the row is still empty, the word is split to fill the
/// row instead of leaving a large gap.
pub fn wrap_line(line: &str, width: usize, line_idx: usize) -> Vec<Row> {
    if width == 0 || unicode::display_width(line) <= width {
        return vec![Row {
            line: line_idx,
            start: 0,
            end: line.len(),
        }];
    }

    let cells = cells(line);
    let byte_at = |k: usize| cells.get(k).map_or(line.len(), |c| c.offset);
    let mut rows = Vec::new();
    let mut emit = |start: usize, end: usize| {
        rows.push(Row {
            line: line_idx,
            start,
            end,
        })
    };

    let mut row_start = 0;
    let mut col = 0;
    let mut i = 0;
    while i < cells.len() {
        let tok = i;
        i = token_end(line, &cells, i);
        let tok_width: usize = cells[tok..i].iter().map(|c| c.width).sum();

        if col + tok_width <= width {
            col += tok_width;
            continue;
        }

        if cells[tok].blank {
            emit(byte_at(row_start), byte_at(tok));
            if i == cells.len() {
                // trailing whitespace hangs off the last row
                return rows;
            }
            row_start = i;
            col = 0;
            continue;
        }

        let room = width.saturating_sub(col);
        if col > 0 && room * 2 <= width {
            emit(byte_at(row_start), byte_at(tok));
            row_start = tok;
            col = 0;
        }

        for (j, cell) in cells.iter().enumerate().take(i).skip(tok) {
            if col + cell.width > width && col > 0 {
                emit(byte_at(row_start), byte_at(j));
                row_start = j;
                col = 0;
            }
            col += cell.width;
        }
    }

    emit(byte_at(row_start), line.len());
    rows
}
