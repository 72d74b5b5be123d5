//! Context-sensitive completion for plain text inputs.
//!
//! On every buffer change the editor calls [`update`]: the token under the
//! cursor is matched against the registered triggers, the matching provider
//! produces candidates, and the [`CompletionState`] is refreshed. Accepting a
//! candidate ([`accept`]) or stepping into one ([`descend`]) edits the buffer
//! through [`TextBuffer`] and runs the same pass again, so chained and drilled
//! triggers re-activate on the same keystroke.

pub mod accept;
pub mod buffer;
pub mod coords;
pub mod item;
pub mod providers;
pub mod state;
pub mod token;
pub mod trigger;

use tracing::debug;

pub use accept::{accept, descend};
pub use buffer::TextBuffer;
pub use item::CompletionItem;
pub use state::{CompletionState, DrillEntry};
pub use token::extract_token_at_cursor;
pub use trigger::{CandidateProvider, CompletionTrigger, Descend, TriggerMatch, TriggerSet};

/// Refresh `state` for `content` with the cursor at byte `cursor`.
pub fn update(content: &str, cursor: usize, triggers: &TriggerSet, state: &mut CompletionState) {
    let Some(m) = triggers.detect(content, cursor) else {
        if state.active {
            debug!("completion dismissed: no trigger at cursor");
        }
        state.dismiss();
        return;
    };
    let Some(trigger) = triggers.get(m.index) else {
        state.dismiss();
        return;
    };

    if trigger.descend == Some(Descend::Path) && m.token_start == state.trigger_start {
        state.sync_drill(&m.filter);
    } else {
        state.parent_drill.clear();
    }

    let items = trigger.candidates(&m.filter, &state.parent_drill);
    debug!(
        prefix = %trigger.prefix,
        filter = %m.filter,
        drill = state.parent_drill.len(),
        candidates = items.len(),
        "completion update"
    );
    state.activate(m.index, m.token_start, m.filter, items);
}
