use crate::model::note::Note;

/// Serialize a note back to its markdown file form.
pub fn serialize_note(note: &Note) -> String {
    let mut out = format!("# {}\n", note.title);
    if let Some(parent) = &note.parent {
        out.push_str(&format!("parent: {}\n", parent));
    }
    if let Some(created) = note.created {
        out.push_str(&format!("created: {}\n", created.format("%Y-%m-%d")));
    }
    if let Some(modified) = note.modified {
        out.push_str(&format!("modified: {}\n", modified.format("%Y-%m-%d")));
    }
    for (key, value) in &note.extra {
        out.push_str(&format!("{}: {}\n", key, value));
    }

    if !note.body.is_empty() {
        out.push('\n');
        out.push_str(&note.body);
        if !note.body.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
