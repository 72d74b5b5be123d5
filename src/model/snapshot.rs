use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use indexmap::IndexMap;

use super::config::Config;
use super::note::Note;

/// Read-only view of a loaded notebook, shared by the completion providers.
///
/// Rebuilt wholesale when the notebook reloads; nothing mutates it in place.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub today: NaiveDate,
    pub notes: Vec<Note>,
    /// (tag, number of notes using it), most used first
    pub tags: Vec<(String, usize)>,
    pub abbreviations: IndexMap<String, String>,
    pub date_format: String,
}

impl Snapshot {
    pub fn new(notes: Vec<Note>, config: &Config, today: NaiveDate) -> Self {
        let tags = count_tags(&notes, &config.ui.default_tags);
        Snapshot {
            today,
            notes,
            tags,
            abbreviations: config.abbreviations.clone(),
            date_format: config.dates.format.clone(),
        }
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Case-insensitive exact title lookup
    pub fn find_by_title(&self, title: &str) -> Option<&Note> {
        self.notes
            .iter()
            .find(|n| n.title.eq_ignore_ascii_case(title.trim()))
    }

    /// Direct children of `parent`, sorted by title. `None` means the root
    /// level, which also takes notes whose parent does not exist.
    pub fn children_of(&self, parent: Option<&str>) -> Vec<&Note> {
        let mut children: Vec<&Note> = self
            .notes
            .iter()
            .filter(|n| match parent {
                Some(id) => n.parent.as_deref() == Some(id),
                None => n.parent.as_deref().is_none_or(|p| self.note(p).is_none()),
            })
            .collect();
        sort_by_title(&mut children);
        children
    }

    pub fn has_children(&self, id: &str) -> bool {
        self.notes.iter().any(|n| n.parent.as_deref() == Some(id))
    }

    /// Every note below `parent` at any depth, sorted by title. `None` returns
    /// the whole notebook.
    pub fn descendants_of(&self, parent: Option<&str>) -> Vec<&Note> {
        let Some(root) = parent else {
            let mut all: Vec<&Note> = self.notes.iter().collect();
            sort_by_title(&mut all);
            return all;
        };

        let mut seen: HashSet<&str> = HashSet::from([root]);
        let mut out = Vec::new();
        let mut queue = vec![root];
        while let Some(id) = queue.pop() {
            for child in self.notes.iter().filter(|n| n.parent.as_deref() == Some(id)) {
                if seen.insert(child.id.as_str()) {
                    out.push(child);
                    queue.push(child.id.as_str());
                }
            }
        }
        sort_by_title(&mut out);
        out
    }

    /// Ancestors of `id` from the root down, ending with the note itself.
    /// Parent cycles are cut at the first repeated note.
    pub fn path_of(&self, id: &str) -> Vec<&Note> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.note(id);
        while let Some(note) = current {
            if !seen.insert(note.id.as_str()) {
                break;
            }
            path.push(note);
            current = note.parent.as_deref().and_then(|p| self.note(p));
        }
        path.reverse();
        path
    }

    /// `Parent/Child/Note` titles for display
    pub fn path_label(&self, id: &str) -> String {
        self.path_of(id)
            .iter()
            .map(|n| n.title.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn sort_by_title(notes: &mut [&Note]) {
    notes.sort_by(|a, b| {
        a.title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn count_tags(notes: &[Note], default_tags: &[String]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for note in notes {
        for tag in &note.tags {
            *counts.entry(tag.clone()).or_default() += 1;
        }
    }
    for tag in default_tags {
        counts.entry(tag.trim_start_matches('#').to_string()).or_default();
    }
    let mut tags: Vec<(String, usize)> = counts.into_iter().collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tags
}
