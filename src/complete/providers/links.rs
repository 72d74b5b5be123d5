use std::rc::Rc;

use crate::complete::item::CompletionItem;
use crate::complete::state::DrillEntry;
use crate::complete::trigger::CandidateProvider;
use crate::model::snapshot::Snapshot;

use super::{match_rank, ranked};

/// `[[Title]]` wiki-link candidates, and `[[Title#Heading]]` once the filter
/// holds a `#`.
pub struct LinkProvider {
    snapshot: Rc<Snapshot>,
}

impl LinkProvider {
    pub fn new(snapshot: Rc<Snapshot>) -> Self {
        LinkProvider { snapshot }
    }

    fn titles(&self, filter: &str) -> Vec<CompletionItem> {
        let scored = self
            .snapshot
            .notes
            .iter()
            .filter_map(|note| {
                let rank = match_rank(&note.title, filter)?;
                let parent = note
                    .parent
                    .as_deref()
                    .map(|p| self.snapshot.path_label(p))
                    .unwrap_or_default();
                let item = CompletionItem::new(note.title.clone())
                    .insert(format!("[[{}]]", note.title))
                    .detail(parent)
                    .value(note.id.clone())
                    .drillable(!note.headings.is_empty());
                Some((rank, item))
            })
            .collect();
        ranked(scored)
    }

    fn headings(&self, title: &str, filter: &str) -> Vec<CompletionItem> {
        let Some(note) = self.snapshot.find_by_title(title) else {
            return Vec::new();
        };
        let scored = note
            .headings
            .iter()
            .filter_map(|heading| {
                let rank = match_rank(heading, filter)?;
                let item = CompletionItem::new(heading.clone())
                    .insert(format!("[[{}#{}]]", note.title, heading))
                    .detail(note.title.clone())
                    .value(note.id.clone());
                Some((rank, item))
            })
            .collect();
        ranked(scored)
    }
}

impl CandidateProvider for LinkProvider {
    fn candidates(&self, filter: &str, _drill: &[DrillEntry]) -> Vec<CompletionItem> {
        if filter.contains("]]") {
            return Vec::new();
        }
        match filter.split_once('#') {
            Some((title, heading)) => self.headings(title, heading),
            None => self.titles(filter),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::snapshot::fixtures::sample;

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn titles_ranked_prefix_first() {
        let provider = LinkProvider::new(Rc::new(sample()));
        let items = provider.candidates("e", &[]);
        // no title starts with "e"; all substring matches keep notebook order
        assert_eq!(
            labels(&items),
            vec!["Projects", "Web", "Mobile", "Frontend", "Setup guide"]
        );
        let items = provider.candidates("web", &[]);
        assert_eq!(items[0].insert_text, "[[Web]]");
        assert_eq!(items[0].detail, "Projects");
        assert_eq!(items[0].value.as_deref(), Some("web"));
    }

    #[test]
    fn notes_with_headings_are_drillable() {
        let provider = LinkProvider::new(Rc::new(sample()));
        let items = provider.candidates("setup", &[]);
        assert_eq!(labels(&items), vec!["Setup guide"]);
        assert!(items[0].drillable);
        assert!(!provider.candidates("journal", &[])[0].drillable);
    }

    #[test]
    fn header_mode() {
        let provider = LinkProvider::new(Rc::new(sample()));
        let items = provider.candidates("setup guide#", &[]);
        assert_eq!(labels(&items), vec!["Install", "Configure", "Usage"]);
        let items = provider.candidates("Setup guide#u", &[]);
        assert_eq!(labels(&items), vec!["Usage", "Configure"]);
        assert_eq!(items[0].insert_text, "[[Setup guide#Usage]]");
    }

    #[test]
    fn header_mode_unknown_note() {
        let provider = LinkProvider::new(Rc::new(sample()));
        assert!(provider.candidates("Nope#", &[]).is_empty());
    }

    #[test]
    fn closed_link_offers_nothing() {
        let provider = LinkProvider::new(Rc::new(sample()));
        assert!(provider.candidates("Web]] and", &[]).is_empty());
    }
}
