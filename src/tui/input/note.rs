use crossterm::event::KeyEvent;
use tracing::warn;

use crate::ops::note_ops::{create_note, update_body};
use crate::tui::app::App;

use super::*;

/// Body editor. Ctrl+S writes the note and closes; Esc discards.
pub(super) fn handle_note_key(app: &mut App, key: KeyEvent) {
    let Some(editor) = app.editor.as_mut() else {
        app.close_editor();
        return;
    };
    match handle_editor_key(editor, key) {
        EditorOutcome::Save => {
            let body = editor.text().to_string();
            save_body(app, &body);
        }
        EditorOutcome::Cancel => {
            app.close_editor();
            app.set_status("edit discarded");
        }
        _ => {}
    }
}

fn save_body(app: &mut App, body: &str) {
    let Some(id) = app.target_id.clone() else {
        app.close_editor();
        return;
    };
    match update_body(&mut app.notebook, &id, body, app.today) {
        Ok(()) => {
            app.close_editor();
            app.install_snapshot();
            app.set_status(format!("saved {}", id));
        }
        Err(e) => {
            // keep the editor open so nothing typed is lost
            warn!(id = %id, error = %e, "save failed");
            app.set_error(format!("save failed: {}", e));
        }
    }
}

/// Title input for `n`. Enter creates the note and selects it.
pub(super) fn handle_new_note_key(app: &mut App, key: KeyEvent) {
    let Some(editor) = app.editor.as_mut() else {
        app.close_editor();
        return;
    };
    match handle_editor_key(editor, key) {
        EditorOutcome::Submit => {
            let title = editor.text().trim().to_string();
            if title.is_empty() {
                app.close_editor();
                return;
            }
            match create_note(&mut app.notebook, &title, None, app.today) {
                Ok(id) => {
                    app.close_editor();
                    app.install_snapshot();
                    app.select_id(&id);
                    app.set_status(format!("created {}", id));
                }
                Err(e) => {
                    warn!(error = %e, "create failed");
                    app.set_error(format!("create failed: {}", e));
                }
            }
        }
        EditorOutcome::Cancel => app.close_editor(),
        _ => {}
    }
}
