use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::complete::providers::Surface;
use crate::ops::search::SearchQuery;
use crate::tui::app::{App, Mode};
use crate::tui::editor::Editor;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.clear_status();
    match (key.modifiers, key.code) {
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        (_, KeyCode::Char('q')) => app.should_quit = true,

        (_, KeyCode::Char('j') | KeyCode::Down) => move_cursor(app, 1),
        (_, KeyCode::Char('k') | KeyCode::Up) => move_cursor(app, -1),
        (_, KeyCode::PageDown) => move_cursor(app, 10),
        (_, KeyCode::PageUp) => move_cursor(app, -10),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.visible.len().saturating_sub(1);
        }

        (_, KeyCode::Char('/')) => open_search(app),
        (_, KeyCode::Esc) if !app.query.is_empty() => {
            app.query = SearchQuery::default();
            app.refresh_visible();
        }
        (_, KeyCode::Char('e') | KeyCode::Enter) => open_note_editor(app),
        (_, KeyCode::Char('n')) => open_new_note(app),
        (_, KeyCode::Char('p')) => open_parent_picker(app),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let last = app.visible.len().saturating_sub(1);
    app.cursor = app.cursor.saturating_add_signed(delta).min(last);
}

/// Select the list row under a click.
pub(super) fn click_list(app: &mut App, column: u16, row: u16) {
    let Some(area) = app.list_area else {
        return;
    };
    if column < area.x || column >= area.x + area.width || row < area.y || row >= area.y + area.height {
        return;
    }
    let idx = app.scroll + (row - area.y) as usize;
    if idx < app.visible.len() {
        app.cursor = idx;
    }
}

fn open_search(app: &mut App) {
    app.editor = Some(Editor::new(Surface::Search, &app.query.text, &app.snapshot));
    app.mode = Mode::Search;
}

fn open_note_editor(app: &mut App) {
    let Some(note) = app.selected_note() else {
        return;
    };
    let id = note.id.clone();
    let mut editor = Editor::new(Surface::Note, &note.body, &app.snapshot);
    editor.buffer.set_cursor(0);
    app.editor = Some(editor);
    app.target_id = Some(id);
    app.mode = Mode::EditNote;
}

fn open_new_note(app: &mut App) {
    app.editor = Some(Editor::plain(""));
    app.target_id = None;
    app.mode = Mode::NewNote;
}

fn open_parent_picker(app: &mut App) {
    let Some(note) = app.selected_note() else {
        return;
    };
    let id = note.id.clone();
    let mut editor = Editor::new(Surface::Parent, ">", &app.snapshot);
    editor.refresh();
    app.editor = Some(editor);
    app.target_id = Some(id);
    app.mode = Mode::PickParent;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tui::input::handle_key;
    use crate::tui::render::test_helpers::{key, sample_app};

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut app = sample_app();
        handle_key(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.cursor, 0);
        handle_key(&mut app, key(KeyCode::Char('G')));
        assert_eq!(app.cursor, app.visible.len() - 1);
        handle_key(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.cursor, app.visible.len() - 1);
        handle_key(&mut app, key(KeyCode::Char('g')));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn q_quits() {
        let mut app = sample_app();
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn slash_opens_search_with_current_query() {
        let mut app = sample_app();
        app.query = SearchQuery::parse("#work", app.today);
        handle_key(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.mode, Mode::Search);
        assert_eq!(app.editor.as_ref().unwrap().text(), "#work");
    }

    #[test]
    fn esc_clears_the_filter() {
        let mut app = sample_app();
        app.query = SearchQuery::parse("#personal", app.today);
        app.refresh_visible();
        assert_eq!(app.visible.len(), 1);
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.visible.len(), app.snapshot.notes.len());
    }

    #[test]
    fn parent_picker_opens_with_root_candidates() {
        let mut app = sample_app();
        handle_key(&mut app, key(KeyCode::Char('p')));
        assert_eq!(app.mode, Mode::PickParent);
        let editor = app.editor.as_ref().unwrap();
        assert!(editor.completion.active);
        assert_eq!(editor.completion.items.len(), 3);
    }

    #[test]
    fn clicks_select_rows() {
        let mut app = sample_app();
        app.list_area = Some(ratatui::layout::Rect::new(0, 1, 80, 20));
        click_list(&mut app, 5, 3);
        assert_eq!(app.cursor, 2);
        click_list(&mut app, 5, 19);
        assert_eq!(app.cursor, 2);
    }
}
