use chrono::NaiveDate;
use tracing::warn;

use crate::model::note::Note;

/// Parse a note file. `id` is the file stem.
///
/// Format: a `# Title` line, then `key: value` metadata lines up to the first
/// blank line, then the body. A file without a title line is all body and
/// takes its id as title.
pub fn parse_note(id: &str, source: &str) -> Note {
    let mut note = Note::new(id, id);
    let text = source.trim_start_matches(['\n', '\r']);

    let (first, mut rest) = split_line(text);
    let Some(title) = first.strip_prefix("# ") else {
        note.body = text.to_string();
        collect_body_fields(&mut note);
        return note;
    };
    note.title = title.trim().to_string();

    loop {
        let (line, after) = split_line(rest);
        if rest.is_empty() || line.trim().is_empty() {
            // blank separator belongs to neither part
            if !rest.is_empty() {
                rest = after;
            }
            break;
        }
        let Some((key, value)) = metadata_line(line) else {
            break;
        };
        apply_metadata(&mut note, key, value);
        rest = after;
    }

    note.body = rest.to_string();
    collect_body_fields(&mut note);
    note
}

/// Split off the first line, dropping its line ending.
fn split_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(i) => (s[..i].trim_end_matches('\r'), &s[i + 1..]),
        None => (s, ""),
    }
}

fn metadata_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '_' || c == '-')
    {
        return None;
    }
    Some((key, value.trim()))
}

fn apply_metadata(note: &mut Note, key: &str, value: &str) {
    match key {
        "parent" if !value.is_empty() => note.parent = Some(value.to_string()),
        "created" | "modified" => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) if key == "created" => note.created = Some(date),
            Ok(date) => note.modified = Some(date),
            Err(e) => {
                warn!(note = %note.id, key, value, error = %e, "unreadable date kept as-is");
                note.extra.push((key.to_string(), value.to_string()));
            }
        },
        _ => note.extra.push((key.to_string(), value.to_string())),
    }
}

/// ATX heading text (`## Setup` -> `Setup`), levels 1 through 6
pub fn heading_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let level = trimmed.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if rest.is_empty() {
        return Some("");
    }
    rest.strip_prefix(' ').map(str::trim)
}

/// Tag name from a `#word` token, without the `#`
pub fn tag_from_word(word: &str) -> Option<&str> {
    let body = word.strip_prefix('#')?;
    let end = body
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '-' || c == '_' || c == '/'))
        .map_or(body.len(), |(i, _)| i);
    let tag = &body[..end];
    tag.chars()
        .next()
        .filter(|c| c.is_alphanumeric())
        .map(|_| tag)
}

fn collect_body_fields(note: &mut Note) {
    let mut in_fence = false;
    let mut tags: Vec<String> = Vec::new();
    let mut headings = Vec::new();

    for line in note.body.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(heading) = heading_text(line) {
            if !heading.is_empty() {
                headings.push(heading.to_string());
            }
            continue;
        }
        for word in line.split_whitespace() {
            if let Some(tag) = tag_from_word(word)
                && !tags.iter().any(|t| t == tag)
            {
                tags.push(tag.to_string());
            }
        }
    }

    note.tags = tags;
    note.headings = headings;
}
