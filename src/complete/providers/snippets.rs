use std::rc::Rc;

use crate::complete::item::CompletionItem;
use crate::complete::state::DrillEntry;
use crate::complete::trigger::CandidateProvider;
use crate::model::snapshot::Snapshot;

use super::{match_rank, ranked};

#[derive(Clone, Copy)]
enum Placement {
    /// Rebuild the line with the snippet in front
    Line,
    /// Splice in and keep completing
    Chain,
    /// Splice in and finish
    Plain,
}

const SNIPPETS: &[(&str, &str, Placement)] = &[
    ("heading 1", "#", Placement::Line),
    ("heading 2", "##", Placement::Line),
    ("heading 3", "###", Placement::Line),
    ("bullet", "-", Placement::Line),
    ("numbered", "1.", Placement::Line),
    ("checkbox", "- [ ]", Placement::Line),
    ("quote", ">", Placement::Line),
    ("bold", "**", Placement::Chain),
    ("italic", "_", Placement::Chain),
    ("strike", "~~", Placement::Chain),
    ("code", "`", Placement::Chain),
    ("fence", "```", Placement::Chain),
    ("rule", "---", Placement::Plain),
    ("link", "[]()", Placement::Plain),
];

/// Markdown snippets behind `/` in the note editor.
pub struct SnippetProvider {
    snapshot: Rc<Snapshot>,
}

impl SnippetProvider {
    pub fn new(snapshot: Rc<Snapshot>) -> Self {
        SnippetProvider { snapshot }
    }

    fn today(&self) -> String {
        self.snapshot
            .today
            .format(&self.snapshot.date_format)
            .to_string()
    }
}

impl CandidateProvider for SnippetProvider {
    fn candidates(&self, filter: &str, _drill: &[DrillEntry]) -> Vec<CompletionItem> {
        let date = self.today();
        let mut scored: Vec<(u8, CompletionItem)> = SNIPPETS
            .iter()
            .filter_map(|&(label, text, placement)| {
                let rank = match_rank(label, filter)?;
                let item = CompletionItem::new(label).insert(text).detail(text);
                let item = match placement {
                    Placement::Line => item.prepend(),
                    Placement::Chain => item.chaining(),
                    Placement::Plain => item,
                };
                Some((rank, item))
            })
            .collect();
        if let Some(rank) = match_rank("date", filter) {
            scored.push((rank, CompletionItem::new("date").insert(date.clone()).detail(date)));
        }
        ranked(scored)
    }
}
