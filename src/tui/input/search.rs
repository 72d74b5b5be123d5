use crossterm::event::KeyEvent;
use tracing::debug;

use crate::ops::search::SearchQuery;
use crate::tui::app::App;

use super::*;

/// Search bar: Enter applies the typed filter to the notes list, Esc closes
/// without changing it.
pub(super) fn handle_search_key(app: &mut App, key: KeyEvent) {
    let Some(editor) = app.editor.as_mut() else {
        app.close_editor();
        return;
    };
    match handle_editor_key(editor, key) {
        EditorOutcome::Submit => {
            let text = editor.text().to_string();
            app.query = SearchQuery::parse(&text, app.today);
            debug!(query = %text, terms = app.query.terms.len(), "search applied");
            app.close_editor();
            app.refresh_visible();
            if app.visible.is_empty() {
                app.set_status("no matching notes");
            }
        }
        EditorOutcome::Cancel => app.close_editor(),
        _ => {}
    }
}
