use chrono::NaiveDate;
use tracing::info;

use crate::io::notebook_io::{Notebook, NotebookError, new_note_path, save_note};
use crate::model::note::Note;
use crate::parse::parse_note;
use crate::parse::serialize_note;

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("note not found: {0}")]
    NotFound(String),
    #[error("{child} cannot be filed under {parent}: it would become its own ancestor")]
    ParentCycle { child: String, parent: String },
    #[error("note title cannot be empty")]
    EmptyTitle,
    #[error(transparent)]
    Notebook(#[from] NotebookError),
}

fn find_note_mut<'a>(notebook: &'a mut Notebook, id: &str) -> Result<&'a mut Note, NoteError> {
    notebook
        .notes
        .iter_mut()
        .find(|n| n.id == id)
        .ok_or_else(|| NoteError::NotFound(id.to_string()))
}

/// Replace a note's body, re-derive its tags and headings, stamp `modified`
/// and write it.
pub fn update_body(
    notebook: &mut Notebook,
    id: &str,
    body: &str,
    today: NaiveDate,
) -> Result<(), NoteError> {
    let note = find_note_mut(notebook, id)?;
    note.body = body.to_string();
    note.modified = Some(today);
    // reparse so tags and headings follow the new body
    let mut reparsed = parse_note(&note.id, &serialize_note(note));
    reparsed.path = note.path.clone();
    *note = reparsed;
    save_note(note)?;
    Ok(())
}

/// File `id` under `parent` (or at the root for `None`).
pub fn set_parent(
    notebook: &mut Notebook,
    id: &str,
    parent: Option<&str>,
    today: NaiveDate,
) -> Result<(), NoteError> {
    if let Some(parent) = parent {
        if notebook.note(parent).is_none() {
            return Err(NoteError::NotFound(parent.to_string()));
        }
        if would_cycle(notebook, id, parent) {
            return Err(NoteError::ParentCycle {
                child: id.to_string(),
                parent: parent.to_string(),
            });
        }
    }
    let note = find_note_mut(notebook, id)?;
    note.parent = parent.map(String::from);
    note.modified = Some(today);
    save_note(note)?;
    info!(id, parent = parent.unwrap_or("(root)"), "parent changed");
    Ok(())
}

/// True when `parent` is `id` itself or sits below it.
fn would_cycle(notebook: &Notebook, id: &str, parent: &str) -> bool {
    let mut current = Some(parent);
    let mut steps = 0;
    while let Some(p) = current {
        if p == id {
            return true;
        }
        steps += 1;
        if steps > notebook.notes.len() {
            // an existing cycle that does not involve `id`
            return false;
        }
        current = notebook.note(p).and_then(|n| n.parent.as_deref());
    }
    false
}

/// Create and write a new note. Returns its id.
pub fn create_note(
    notebook: &mut Notebook,
    title: &str,
    parent: Option<&str>,
    today: NaiveDate,
) -> Result<String, NoteError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(NoteError::EmptyTitle);
    }
    if let Some(parent) = parent
        && notebook.note(parent).is_none()
    {
        return Err(NoteError::NotFound(parent.to_string()));
    }
    let dir = notebook.notes_dir();
    std::fs::create_dir_all(&dir).map_err(NotebookError::from)?;
    let (id, path) = new_note_path(&dir, title);
    let note = Note {
        parent: parent.map(String::from),
        created: Some(today),
        modified: Some(today),
        path,
        ..Note::new(id.clone(), title)
    };
    save_note(&note)?;
    notebook.notes.push(note);
    notebook.notes.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(id)
}
