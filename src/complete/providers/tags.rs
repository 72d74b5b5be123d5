use std::rc::Rc;

use crate::complete::item::CompletionItem;
use crate::complete::state::DrillEntry;
use crate::complete::trigger::CandidateProvider;
use crate::model::snapshot::Snapshot;

use super::{match_rank, ranked};

/// `#tag` candidates from the tags used across the notebook.
pub struct TagProvider {
    snapshot: Rc<Snapshot>,
}

impl TagProvider {
    pub fn new(snapshot: Rc<Snapshot>) -> Self {
        TagProvider { snapshot }
    }
}

impl CandidateProvider for TagProvider {
    fn candidates(&self, filter: &str, _drill: &[DrillEntry]) -> Vec<CompletionItem> {
        let scored = self
            .snapshot
            .tags
            .iter()
            .filter_map(|(tag, count)| {
                let rank = match_rank(tag, filter)?;
                let detail = match count {
                    0 => String::new(),
                    1 => "1 note".to_string(),
                    n => format!("{} notes", n),
                };
                Some((rank, CompletionItem::new(format!("#{}", tag)).detail(detail)))
            })
            .collect();
        ranked(scored)
    }
}
