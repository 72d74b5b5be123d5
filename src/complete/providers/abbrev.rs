use std::rc::Rc;

use crate::complete::item::CompletionItem;
use crate::complete::state::DrillEntry;
use crate::complete::trigger::CandidateProvider;
use crate::model::snapshot::Snapshot;

/// `@name` expands to the configured text.
pub struct AbbrevProvider {
    snapshot: Rc<Snapshot>,
}

impl AbbrevProvider {
    pub fn new(snapshot: Rc<Snapshot>) -> Self {
        AbbrevProvider { snapshot }
    }
}

impl CandidateProvider for AbbrevProvider {
    fn candidates(&self, filter: &str, _drill: &[DrillEntry]) -> Vec<CompletionItem> {
        let filter = filter.to_lowercase();
        self.snapshot
            .abbreviations
            .iter()
            .filter(|(name, _)| name.to_lowercase().starts_with(&filter))
            .map(|(name, expansion)| {
                let first_line = expansion.lines().next().unwrap_or("");
                CompletionItem::new(format!("@{}", name))
                    .insert(expansion.clone())
                    .detail(first_line)
            })
            .collect()
    }
}
