use serde::Serialize;

use crate::complete::{CompletionItem, CompletionState};
use crate::model::note::Note;
use crate::model::snapshot::Snapshot;
use crate::util::unicode;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct NoteJson {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Title path of the parent, e.g. "Projects/Web"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_path: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

#[derive(Serialize)]
pub struct TagJson {
    pub tag: String,
    pub count: usize,
}

#[derive(Serialize)]
pub struct CompletionJson {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    pub trigger_start: usize,
    pub filter: String,
    pub selected: usize,
    pub items: Vec<CompletionItem>,
    /// Buffer text after accepting the selected item, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

pub fn note_to_json(note: &Note, snapshot: &Snapshot) -> NoteJson {
    NoteJson {
        id: note.id.clone(),
        title: note.title.clone(),
        parent: note.parent.clone(),
        parent_path: note.parent.as_deref().map(|p| snapshot.path_label(p)),
        tags: note.tags.clone(),
        created: note.created.map(|d| d.to_string()),
        modified: note.modified.map(|d| d.to_string()),
    }
}

pub fn completion_to_json(
    state: &CompletionState,
    trigger: Option<&str>,
    accepted: Option<String>,
) -> CompletionJson {
    CompletionJson {
        active: state.active,
        trigger: trigger.map(String::from),
        trigger_start: state.trigger_start,
        filter: state.filter.clone(),
        selected: state.selected,
        items: state.items.clone(),
        accepted,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// `id  Title  (Parent/Path)  #tag #tag`
pub fn format_note_line(note: &Note, snapshot: &Snapshot, id_width: usize) -> String {
    let mut line = format!("{:<width$}  {}", note.id, note.title, width = id_width);
    if let Some(parent) = note.parent.as_deref() {
        line.push_str(&format!("  ({})", snapshot.path_label(parent)));
    }
    if !note.tags.is_empty() {
        let tags: Vec<String> = note.tags.iter().map(|t| format!("#{}", t)).collect();
        line.push_str("  ");
        line.push_str(&tags.join(" "));
    }
    line
}

/// One line per candidate: a `>` marker on the selected row, the label, and
/// the first line of the detail, right-padded to align.
pub fn format_completion(state: &CompletionState) -> Vec<String> {
    let label_w = state
        .items
        .iter()
        .map(|i| unicode::display_width(&i.label))
        .max()
        .unwrap_or(0);
    state
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if i == state.selected { ">" } else { " " };
            let detail = item.detail.lines().next().unwrap_or("");
            let pad = label_w - unicode::display_width(&item.label);
            let mut line = format!("{} {}", marker, item.label);
            if !detail.is_empty() || item.drillable {
                line.push_str(&" ".repeat(pad));
                if !detail.is_empty() {
                    line.push_str("  ");
                    line.push_str(detail);
                }
                if item.drillable {
                    line.push_str("  \u{203A}");
                }
            }
            line
        })
        .collect()
}
