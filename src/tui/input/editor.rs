use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::complete::{self, CompletionItem, TextBuffer};
use crate::tui::editor::Editor;

/// What a keystroke meant to the popup owning the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    /// Consumed; buffer, cursor or dropdown may have changed
    Handled,
    /// Enter with no dropdown in a single-line input
    Submit,
    /// Esc with no dropdown
    Cancel,
    /// Ctrl+S
    Save,
    /// A candidate went into the buffer
    Accepted(CompletionItem),
    Ignored,
}

/// Shared key handling for every popup input: dropdown navigation first,
/// then editing.
pub(super) fn handle_editor_key(editor: &mut Editor, key: KeyEvent) -> EditorOutcome {
    if editor.completion.active
        && let Some(outcome) = handle_dropdown_key(editor, key)
    {
        return outcome;
    }

    let multiline = editor.buffer.is_multiline();
    let width = editor.wrap_width;
    match (key.modifiers, key.code) {
        (m, KeyCode::Char('s')) if m.contains(KeyModifiers::CONTROL) => return EditorOutcome::Save,
        (_, KeyCode::Esc) => return EditorOutcome::Cancel,
        (_, KeyCode::Enter) if multiline => editor.buffer.insert("\n"),
        (_, KeyCode::Enter) => return EditorOutcome::Submit,
        (_, KeyCode::Tab) if multiline => editor.buffer.insert("\t"),

        // movement
        (m, KeyCode::Left) if m.contains(KeyModifiers::ALT) => editor.buffer.word_left(),
        (m, KeyCode::Right) if m.contains(KeyModifiers::ALT) => editor.buffer.word_right(),
        (m, KeyCode::Char('b')) if m.contains(KeyModifiers::ALT) => editor.buffer.word_left(),
        (m, KeyCode::Char('f')) if m.contains(KeyModifiers::ALT) => editor.buffer.word_right(),
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => editor.buffer.home(),
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => editor.buffer.end(),
        (_, KeyCode::Left) => editor.buffer.move_left(),
        (_, KeyCode::Right) => editor.buffer.move_right(),
        (_, KeyCode::Home) => editor.buffer.home(),
        (_, KeyCode::End) => editor.buffer.end(),
        (_, KeyCode::Up) if multiline => {
            editor.buffer.move_rows(-1, width);
        }
        (_, KeyCode::Down) if multiline => {
            editor.buffer.move_rows(1, width);
        }

        // deletion
        (m, KeyCode::Backspace)
            if m.contains(KeyModifiers::ALT) || m.contains(KeyModifiers::CONTROL) =>
        {
            editor.buffer.delete_word_back()
        }
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => {
            editor.buffer.delete_word_back()
        }
        (_, KeyCode::Backspace) => editor.buffer.backspace(),
        (_, KeyCode::Delete) => editor.buffer.delete(),

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            if (c == '/' || c == '#')
                && complete::descend(
                    &mut editor.buffer,
                    &mut editor.completion,
                    &editor.triggers,
                    c,
                )
            {
                return EditorOutcome::Handled;
            }
            let mut tmp = [0u8; 4];
            editor.buffer.insert(c.encode_utf8(&mut tmp));
        }
        _ => return EditorOutcome::Ignored,
    }
    editor.refresh();
    EditorOutcome::Handled
}

/// Keys the open dropdown takes over. None lets the key fall through to
/// editing (descend keys, typing).
fn handle_dropdown_key(editor: &mut Editor, key: KeyEvent) -> Option<EditorOutcome> {
    match key.code {
        KeyCode::Up => editor.completion.move_selection(-1),
        KeyCode::Down => editor.completion.move_selection(1),
        KeyCode::Tab | KeyCode::Enter => {
            let item =
                complete::accept(&mut editor.buffer, &mut editor.completion, &editor.triggers)?;
            return Some(EditorOutcome::Accepted(item));
        }
        KeyCode::Esc => editor.completion.dismiss(),
        _ => return None,
    }
    Some(EditorOutcome::Handled)
}

/// Place the cursor under a click at (`x`, `y`) relative to the editor's
/// text area.
pub(super) fn click_editor(editor: &mut Editor, x: usize, y: usize) {
    let row = y + editor.scroll;
    editor.buffer.click(x, row, editor.wrap_width);
    editor.refresh();
}

/// Insert pasted text at the cursor. Single-line inputs flatten newlines.
pub(super) fn paste_into_editor(editor: &mut Editor, text: &str) {
    editor.buffer.insert(text);
    editor.refresh();
}
