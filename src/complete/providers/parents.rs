use std::rc::Rc;

use crate::complete::item::CompletionItem;
use crate::complete::state::DrillEntry;
use crate::complete::trigger::CandidateProvider;
use crate::model::snapshot::Snapshot;

use super::{match_rank, ranked};

/// Hierarchical note picker behind `>`.
///
/// The filter is `Segment/Segment/leaf`: committed segments live on the drill
/// stack, so only the last segment filters. With a doubled prefix (`>>`) the
/// search covers every descendant of the drilled scope instead of its direct
/// children.
pub struct ParentProvider {
    prefix: String,
    snapshot: Rc<Snapshot>,
}

impl ParentProvider {
    pub fn new(prefix: impl Into<String>, snapshot: Rc<Snapshot>) -> Self {
        ParentProvider {
            prefix: prefix.into(),
            snapshot,
        }
    }
}

impl CandidateProvider for ParentProvider {
    fn candidates(&self, filter: &str, drill: &[DrillEntry]) -> Vec<CompletionItem> {
        let doubled = filter.starts_with(self.prefix.as_str());
        let leaf = filter
            .rsplit('/')
            .next()
            .unwrap_or("")
            .trim_start_matches(self.prefix.as_str());
        let scope = drill.last().map(|d| d.id.as_str());

        let pool = if doubled {
            self.snapshot.descendants_of(scope)
        } else {
            self.snapshot.children_of(scope)
        };

        let mut path = if doubled {
            self.prefix.repeat(2)
        } else {
            self.prefix.clone()
        };
        for entry in drill {
            path.push_str(&entry.name);
            path.push('/');
        }

        let scored = pool
            .into_iter()
            .filter_map(|note| {
                let rank = match_rank(&note.title, leaf)?;
                let parent = note
                    .parent
                    .as_deref()
                    .map(|p| self.snapshot.path_label(p))
                    .unwrap_or_default();
                let item = CompletionItem::new(note.title.clone())
                    .insert(format!("{}{}", path, note.title))
                    .detail(parent)
                    .value(note.id.clone())
                    .drillable(self.snapshot.has_children(&note.id));
                Some((rank, item))
            })
            .collect();
        ranked(scored)
    }
}
