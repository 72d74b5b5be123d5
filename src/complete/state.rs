use super::item::CompletionItem;

/// One committed level of a hierarchical completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillEntry {
    pub name: String,
    pub id: String,
}

/// Completion session owned by a single editor.
///
/// `selected < items.len()` whenever `active`, and `parent_drill` always has
/// as many entries as there are committed `/` segments in the visible token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionState {
    pub active: bool,
    /// Index of the active trigger in its `TriggerSet`
    pub trigger: Option<usize>,
    /// Byte offset where the active token begins
    pub trigger_start: usize,
    /// Filter text seen by the provider on the last pass
    pub filter: String,
    pub items: Vec<CompletionItem>,
    pub selected: usize,
    pub parent_drill: Vec<DrillEntry>,
}

impl CompletionState {
    pub fn new() -> Self {
        CompletionState::default()
    }

    /// Full reset, including the drill stack.
    pub fn dismiss(&mut self) {
        *self = CompletionState::default();
    }

    /// Go inactive but keep the drill stack (used between drill steps).
    pub fn clear_selection(&mut self) {
        self.active = false;
        self.trigger = None;
        self.items.clear();
        self.selected = 0;
    }

    /// Install a fresh candidate list. Selection resets when the token moved
    /// or the trigger changed, and is clamped when the same token narrows.
    pub(crate) fn activate(
        &mut self,
        trigger: usize,
        trigger_start: usize,
        filter: String,
        items: Vec<CompletionItem>,
    ) {
        let same_token =
            self.active && self.trigger == Some(trigger) && self.trigger_start == trigger_start;
        self.selected = if same_token {
            self.selected.min(items.len().saturating_sub(1))
        } else {
            0
        };
        self.active = !items.is_empty();
        self.trigger = Some(trigger);
        self.trigger_start = trigger_start;
        self.filter = filter;
        self.items = items;
    }

    /// Move the selection by `delta`, clamped at both ends.
    pub fn move_selection(&mut self, delta: isize) {
        if !self.active || self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    pub fn selected_item(&self) -> Option<&CompletionItem> {
        if self.active {
            self.items.get(self.selected)
        } else {
            None
        }
    }

    /// Drop drill entries the visible path no longer contains.
    pub(crate) fn sync_drill(&mut self, filter: &str) {
        let segments = filter.matches('/').count();
        self.parent_drill.truncate(segments);
    }
}
