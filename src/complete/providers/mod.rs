//! Concrete candidate providers over a notebook [`Snapshot`], and the
//! trigger sets each input surface registers.

pub mod abbrev;
pub mod dates;
pub mod links;
pub mod parents;
pub mod snippets;
pub mod tags;

use std::rc::Rc;

use crate::model::snapshot::Snapshot;

use super::trigger::{CompletionTrigger, Descend, TriggerSet, WIKI_PREFIX};

pub use abbrev::AbbrevProvider;
pub use dates::DateProvider;
pub use links::LinkProvider;
pub use parents::ParentProvider;
pub use snippets::SnippetProvider;
pub use tags::TagProvider;

/// The input surfaces that carry completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Single-line search bar over the notes list
    Search,
    /// Multi-line note body editor
    Note,
    /// Single-line parent picker
    Parent,
}

impl Surface {
    pub fn parse(s: &str) -> Option<Surface> {
        match s {
            "search" => Some(Surface::Search),
            "note" => Some(Surface::Note),
            "parent" => Some(Surface::Parent),
            _ => None,
        }
    }

    pub fn multiline(self) -> bool {
        self == Surface::Note
    }
}

/// Triggers registered on `surface`, in precedence order.
pub fn triggers_for(surface: Surface, snapshot: &Rc<Snapshot>) -> TriggerSet {
    match surface {
        Surface::Search => search_triggers(snapshot),
        Surface::Note => note_triggers(snapshot),
        Surface::Parent => parent_triggers(snapshot),
    }
}

pub fn search_triggers(snapshot: &Rc<Snapshot>) -> TriggerSet {
    TriggerSet::new()
        .with(date_trigger("created:", snapshot))
        .with(date_trigger("modified:", snapshot))
        .with(CompletionTrigger::new("#", TagProvider::new(snapshot.clone())))
        .with(parent_trigger(snapshot))
        .with(abbrev_trigger(snapshot))
}

pub fn note_triggers(snapshot: &Rc<Snapshot>) -> TriggerSet {
    TriggerSet::new()
        .with(
            CompletionTrigger::new(WIKI_PREFIX, LinkProvider::new(snapshot.clone()))
                .multi_word()
                .descend(Descend::Header),
        )
        .with(CompletionTrigger::new("#", TagProvider::new(snapshot.clone())))
        .with(CompletionTrigger::new("/", SnippetProvider::new(snapshot.clone())))
        .with(abbrev_trigger(snapshot))
}

pub fn parent_triggers(snapshot: &Rc<Snapshot>) -> TriggerSet {
    TriggerSet::new().with(parent_trigger(snapshot))
}

fn date_trigger(prefix: &str, snapshot: &Rc<Snapshot>) -> CompletionTrigger {
    CompletionTrigger::new(prefix, DateProvider::new(prefix, snapshot.today)).multi_word()
}

fn parent_trigger(snapshot: &Rc<Snapshot>) -> CompletionTrigger {
    CompletionTrigger::new(">", ParentProvider::new(">", snapshot.clone()))
        .multi_word()
        .descend(Descend::Path)
}

fn abbrev_trigger(snapshot: &Rc<Snapshot>) -> CompletionTrigger {
    CompletionTrigger::new("@", AbbrevProvider::new(snapshot.clone())).multi_word()
}

/// 0 for a prefix match, 1 for a substring match, case-insensitive.
/// An empty filter matches everything as a prefix.
pub(crate) fn match_rank(candidate: &str, filter: &str) -> Option<u8> {
    let candidate = candidate.to_lowercase();
    let filter = filter.to_lowercase();
    if candidate.starts_with(&filter) {
        Some(0)
    } else if candidate.contains(&filter) {
        Some(1)
    } else {
        None
    }
}

/// Stable sort by rank, dropping the ranks.
pub(crate) fn ranked<T>(mut scored: Vec<(u8, T)>) -> Vec<T> {
    scored.sort_by_key(|(rank, _)| *rank);
    scored.into_iter().map(|(_, item)| item).collect()
}
