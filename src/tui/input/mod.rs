mod editor;
mod navigate;
mod note;
mod parent;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use super::app::{App, Mode};

// Submodules reach each other's handlers through `use super::*;`
#[allow(unused_imports)]
use editor::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use note::*;
#[allow(unused_imports)]
use parent::*;
#[allow(unused_imports)]
use search::*;

pub use editor::EditorOutcome;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search_key(app, key),
        Mode::EditNote => handle_note_key(app, key),
        Mode::NewNote => handle_new_note_key(app, key),
        Mode::PickParent => handle_parent_key(app, key),
    }
}

/// Left clicks: in the open editor they move the cursor, on the notes list
/// they select a row.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    use crossterm::event::{MouseButton, MouseEventKind};

    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if app.mode == Mode::Navigate {
        click_list(app, mouse.column, mouse.row);
        return;
    }
    let (Some(area), Some(editor)) = (app.editor_area, app.editor.as_mut()) else {
        return;
    };
    if mouse.column < area.x
        || mouse.row < area.y
        || mouse.column >= area.x + area.width
        || mouse.row >= area.y + area.height
    {
        return;
    }
    click_editor(
        editor,
        (mouse.column - area.x) as usize,
        (mouse.row - area.y) as usize,
    );
}

/// Bracketed paste goes into whichever editor is open.
pub fn handle_paste(app: &mut App, text: &str) {
    if let Some(editor) = app.editor.as_mut()
        && !text.is_empty()
    {
        paste_into_editor(editor, text);
    }
}

/// Map a base key to its US-layout shifted symbol.
fn shift_symbol(c: char) -> Option<char> {
    let pairs = "`~1!2@3#4$5%6^7&8*9(0)-_=+[{]}\\|;:'\",<.>/?";
    let chars: Vec<char> = pairs.chars().collect();
    chars
        .chunks(2)
        .find(|pair| pair[0] == c)
        .map(|pair| pair[1])
}

/// Kitty keyboard protocol terminals send `Shift + base key`; fold those into
/// the characters traditional terminals send so `#` and `>` match the same way.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        } else if let Some(shifted) = shift_symbol(c) {
            key.code = KeyCode::Char(shifted);
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    key
}
