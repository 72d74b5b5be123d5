use crossterm::event::KeyEvent;
use tracing::warn;

use crate::ops::note_ops::set_parent;
use crate::tui::app::App;

use super::*;

/// Parent picker. Accepting a candidate files the note under it; Enter on an
/// emptied input (or a bare `>`) moves the note to the root.
pub(super) fn handle_parent_key(app: &mut App, key: KeyEvent) {
    let Some(editor) = app.editor.as_mut() else {
        app.close_editor();
        return;
    };
    match handle_editor_key(editor, key) {
        EditorOutcome::Accepted(item) => {
            if let Some(parent) = item.value {
                apply_parent(app, Some(&parent));
            }
        }
        EditorOutcome::Submit => {
            let typed = editor.text().trim().trim_start_matches('>').trim().to_string();
            if typed.is_empty() {
                apply_parent(app, None);
                return;
            }
            // a typed path: the last segment names the note
            let title = typed.rsplit('/').next().unwrap_or("").trim().to_string();
            let Some(parent) = app.snapshot.find_by_title(&title).map(|n| n.id.clone()) else {
                app.set_error(format!("no note titled \"{}\"", title));
                return;
            };
            apply_parent(app, Some(&parent));
        }
        EditorOutcome::Cancel => app.close_editor(),
        _ => {}
    }
}

fn apply_parent(app: &mut App, parent: Option<&str>) {
    let Some(id) = app.target_id.clone() else {
        app.close_editor();
        return;
    };
    match set_parent(&mut app.notebook, &id, parent, app.today) {
        Ok(()) => {
            app.close_editor();
            app.install_snapshot();
            let label = match parent {
                Some(p) => app.snapshot.path_label(p),
                None => "top level".to_string(),
            };
            app.set_status(format!("{} moved under {}", id, label));
        }
        Err(e) => {
            warn!(id = %id, error = %e, "reparent failed");
            app.set_error(e.to_string());
        }
    }
}
