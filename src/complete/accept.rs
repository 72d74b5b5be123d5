use tracing::debug;

use super::buffer::TextBuffer;
use super::item::CompletionItem;
use super::state::{CompletionState, DrillEntry};
use super::trigger::{Descend, TriggerSet};
use super::update;

/// Apply the selected candidate to `buffer`.
///
/// Returns the accepted item so the caller can act on its `value`, or None
/// when nothing is selected.
pub fn accept<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    state: &mut CompletionState,
    triggers: &TriggerSet,
) -> Option<CompletionItem> {
    let item = state.selected_item()?.clone();
    let cursor = buffer.cursor_byte_offset();
    let start = state.trigger_start.min(cursor);

    if item.prepend_to_line {
        prepend_to_line(buffer, start, cursor, &item.insert_text);
        state.dismiss();
    } else {
        buffer.delete_backward(cursor - start);
        buffer.insert(&item.insert_text);
        if item.continue_completing {
            state.clear_selection();
            let content = buffer.unwrapped_content();
            update(&content, buffer.cursor_byte_offset(), triggers, state);
        } else {
            buffer.insert(" ");
            state.dismiss();
        }
    }

    debug!(
        label = %item.label,
        chained = item.continue_completing,
        prepend = item.prepend_to_line,
        "completion accepted"
    );
    Some(item)
}

/// Replace the whole line holding the token with `insert` followed by the
/// rest of the line's content.
fn prepend_to_line<B: TextBuffer + ?Sized>(buffer: &mut B, start: usize, cursor: usize, insert: &str) {
    let content = buffer.unwrapped_content();
    let line_start = content[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = content[cursor..]
        .find('\n')
        .map_or(content.len(), |i| cursor + i);

    let before = content[line_start..start].trim();
    let after = content[cursor..line_end].trim();
    let rest = match (before.is_empty(), after.is_empty()) {
        (true, true) => String::new(),
        (false, true) => before.to_string(),
        (true, false) => after.to_string(),
        (false, false) => format!("{} {}", before, after),
    };

    buffer.delete_backward(cursor - start);
    buffer.delete_forward(line_end - cursor);
    buffer.delete_backward(start - line_start);
    if rest.is_empty() {
        buffer.insert(&format!("{} ", insert));
    } else {
        buffer.insert(&format!("{} {}", insert, rest));
    }
}

/// Step into the selected candidate in response to the descend key `key`.
///
/// Returns false when the active trigger does not descend on `key` or the
/// selection is not drillable; the caller then inserts `key` as plain text.
pub fn descend<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    state: &mut CompletionState,
    triggers: &TriggerSet,
    key: char,
) -> bool {
    let Some(trigger) = state.trigger.and_then(|i| triggers.get(i)) else {
        return false;
    };
    let Some(kind) = trigger.descend.filter(|d| d.key() == key) else {
        return false;
    };
    let Some(item) = state.selected_item().filter(|i| i.drillable).cloned() else {
        return false;
    };

    let cursor = buffer.cursor_byte_offset();
    let start = state.trigger_start.min(cursor);
    let content = buffer.unwrapped_content();
    let token = content.get(start..cursor).unwrap_or("");

    let retyped = match kind {
        Descend::Path => {
            state.parent_drill.push(DrillEntry {
                name: item.label.clone(),
                id: item.value.clone().unwrap_or_else(|| item.label.clone()),
            });
            path_token(&trigger.prefix, token, &state.parent_drill)
        }
        Descend::Header => format!("{}{}#", trigger.prefix, item.label),
    };
    debug!(token = %retyped, depth = state.parent_drill.len(), "completion descend");

    buffer.delete_backward(cursor - start);
    buffer.insert(&retyped);
    state.clear_selection();
    let content = buffer.unwrapped_content();
    update(&content, buffer.cursor_byte_offset(), triggers, state);
    true
}

/// `prefix` (doubled when `token` was typed with a doubled prefix) followed
/// by every drilled name and a `/`.
fn path_token(prefix: &str, token: &str, drill: &[DrillEntry]) -> String {
    let doubled = prefix.repeat(2);
    let mut out = if token.starts_with(&doubled) {
        doubled
    } else {
        prefix.to_string()
    };
    for entry in drill {
        out.push_str(&entry.name);
        out.push('/');
    }
    out
}
