use std::rc::Rc;

use crate::complete::{self, CompletionState, TextBuffer, TriggerSet, coords};
use crate::complete::providers::{Surface, triggers_for};
use crate::model::snapshot::Snapshot;
use crate::util::unicode;

/// Text plus a byte cursor, single- or multi-line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    content: String,
    /// Byte offset, always on a char boundary
    cursor: usize,
    multiline: bool,
    /// Display column kept across vertical moves
    goal_col: Option<usize>,
}

impl EditBuffer {
    /// A buffer holding `text` with the cursor at the end.
    pub fn new(text: &str, multiline: bool) -> Self {
        let content = if multiline {
            text.to_string()
        } else {
            single_line(text)
        };
        EditBuffer {
            cursor: content.len(),
            content,
            multiline,
            goal_col: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Move the cursor to `pos`, clamped and snapped down to a char boundary.
    pub fn set_cursor(&mut self, pos: usize) {
        let mut pos = pos.min(self.content.len());
        while !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        self.cursor = pos;
        self.goal_col = None;
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.content, self.cursor) {
            self.content.replace_range(prev..self.cursor, "");
            self.set_cursor(prev);
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.content, self.cursor) {
            self.content.replace_range(self.cursor..next, "");
            self.goal_col = None;
        }
    }

    pub fn delete_word_back(&mut self) {
        let start = unicode::word_boundary_left(&self.content, self.cursor);
        self.content.replace_range(start..self.cursor, "");
        self.set_cursor(start);
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.content, self.cursor) {
            self.set_cursor(prev);
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.content, self.cursor) {
            self.set_cursor(next);
        }
    }

    pub fn word_left(&mut self) {
        self.set_cursor(unicode::word_boundary_left(&self.content, self.cursor));
    }

    pub fn word_right(&mut self) {
        self.set_cursor(unicode::word_boundary_right(&self.content, self.cursor));
    }

    /// Start of the current logical line
    pub fn home(&mut self) {
        let start = self.content[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
        self.set_cursor(start);
    }

    /// End of the current logical line
    pub fn end(&mut self) {
        let end = self.content[self.cursor..]
            .find('\n')
            .map_or(self.content.len(), |i| self.cursor + i);
        self.set_cursor(end);
    }

    /// Move one screen row up (`-1`) or down (`1`) in the text wrapped to
    /// `width` (`0` for no wrapping). Returns false at the first/last row.
    pub fn move_rows(&mut self, delta: isize, width: usize) -> bool {
        let (col, row) = coords::offset_to_screen(&self.content, width, self.cursor);
        let Some(target) = row.checked_add_signed(delta) else {
            return false;
        };
        let rows = coords::soft_wrap(&self.content, width).split('\n').count();
        if target >= rows {
            return false;
        }
        let goal = self.goal_col.unwrap_or(col);
        self.cursor = coords::screen_to_offset(&self.content, width, goal, target);
        self.goal_col = Some(goal);
        true
    }

    /// Place the cursor under a click at screen cell (`x`, `y`) of the text
    /// wrapped to `width`.
    pub fn click(&mut self, x: usize, y: usize, width: usize) {
        let offset = coords::screen_to_offset(&self.content, width, x, y);
        self.set_cursor(offset);
    }

    /// Screen cell of the cursor in the text wrapped to `width`.
    pub fn cursor_screen(&self, width: usize) -> (usize, usize) {
        coords::offset_to_screen(&self.content, width, self.cursor)
    }
}

fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

impl TextBuffer for EditBuffer {
    fn delete_backward(&mut self, n: usize) {
        let mut start = self.cursor.saturating_sub(n);
        while !self.content.is_char_boundary(start) {
            start -= 1;
        }
        self.content.replace_range(start..self.cursor, "");
        self.set_cursor(start);
    }

    fn delete_forward(&mut self, n: usize) {
        let mut end = (self.cursor + n).min(self.content.len());
        while !self.content.is_char_boundary(end) {
            end += 1;
        }
        self.content.replace_range(self.cursor..end, "");
        self.goal_col = None;
    }

    fn insert(&mut self, text: &str) {
        let text = if self.multiline {
            text.to_string()
        } else {
            single_line(text)
        };
        self.content.insert_str(self.cursor, &text);
        self.set_cursor(self.cursor + text.len());
    }

    fn cursor_byte_offset(&self) -> usize {
        self.cursor
    }

    fn unwrapped_content(&self) -> String {
        self.content.clone()
    }
}

/// An edit buffer with completion attached, as used by every popup input.
#[derive(Debug)]
pub struct Editor {
    /// None for plain inputs without completion
    pub surface: Option<Surface>,
    pub buffer: EditBuffer,
    pub completion: CompletionState,
    pub triggers: TriggerSet,
    /// Wrap width of the last render; `0` means no wrapping
    pub wrap_width: usize,
    /// First visible wrapped row
    pub scroll: usize,
}

impl Editor {
    pub fn new(surface: Surface, text: &str, snapshot: &Rc<Snapshot>) -> Self {
        Editor {
            surface: Some(surface),
            buffer: EditBuffer::new(text, surface.multiline()),
            completion: CompletionState::new(),
            triggers: triggers_for(surface, snapshot),
            wrap_width: 0,
            scroll: 0,
        }
    }

    /// A single-line input with no triggers.
    pub fn plain(text: &str) -> Self {
        Editor {
            surface: None,
            buffer: EditBuffer::new(text, false),
            completion: CompletionState::new(),
            triggers: TriggerSet::new(),
            wrap_width: 0,
            scroll: 0,
        }
    }

    /// Re-run trigger matching after the buffer or cursor changed.
    pub fn refresh(&mut self) {
        complete::update(
            self.buffer.content(),
            self.buffer.cursor(),
            &self.triggers,
            &mut self.completion,
        );
    }

    /// Swap in triggers built over a newer snapshot. The buffer and the
    /// completion state are left as they are; the next keystroke re-matches.
    pub fn rebuild_triggers(&mut self, snapshot: &Rc<Snapshot>) {
        if let Some(surface) = self.surface {
            self.triggers = triggers_for(surface, snapshot);
        }
    }

    /// Keep the cursor row inside a viewport `height` rows tall.
    pub fn scroll_to_cursor(&mut self, height: usize) {
        let (_, row) = self.buffer.cursor_screen(self.wrap_width);
        if row < self.scroll {
            self.scroll = row;
        } else if height > 0 && row >= self.scroll + height {
            self.scroll = row + 1 - height;
        }
    }

    pub fn text(&self) -> &str {
        self.buffer.content()
    }
}
