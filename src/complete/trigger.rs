use std::fmt;

use super::item::CompletionItem;
use super::state::DrillEntry;
use super::token::{clamp_offset, extract_token_at_cursor};

/// Prefix of the wiki-link trigger; the bracket fallback only looks for this one.
pub const WIKI_PREFIX: &str = "[[";

/// Produces candidates for a trigger's filter text.
///
/// Providers are called on every keystroke with no caching, so they must be
/// cheap and pure with respect to `filter` and `drill` for a given snapshot
/// of application data.
pub trait CandidateProvider {
    fn candidates(&self, filter: &str, drill: &[DrillEntry]) -> Vec<CompletionItem>;
}

impl<F> CandidateProvider for F
where
    F: Fn(&str, &[DrillEntry]) -> Vec<CompletionItem>,
{
    fn candidates(&self, filter: &str, drill: &[DrillEntry]) -> Vec<CompletionItem> {
        self(filter, drill)
    }
}

/// How a trigger steps into the selected candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
    /// `/` pushes the selected node onto the drill stack
    Path,
    /// `#` rewrites `[[Title` into `[[Title#` to search that note's headings
    Header,
}

impl Descend {
    /// The keystroke that triggers this kind of descent.
    pub fn key(self) -> char {
        match self {
            Descend::Path => '/',
            Descend::Header => '#',
        }
    }
}

/// A registered prefix and the provider behind it.
pub struct CompletionTrigger {
    pub prefix: String,
    /// The filter may contain spaces (found by the fallback scans)
    pub multi_word: bool,
    pub descend: Option<Descend>,
    provider: Box<dyn CandidateProvider>,
}

impl CompletionTrigger {
    pub fn new(prefix: impl Into<String>, provider: impl CandidateProvider + 'static) -> Self {
        CompletionTrigger {
            prefix: prefix.into(),
            multi_word: false,
            descend: None,
            provider: Box::new(provider),
        }
    }

    pub fn multi_word(mut self) -> Self {
        self.multi_word = true;
        self
    }

    pub fn descend(mut self, descend: Descend) -> Self {
        self.descend = Some(descend);
        self
    }

    pub fn candidates(&self, filter: &str, drill: &[DrillEntry]) -> Vec<CompletionItem> {
        self.provider.candidates(filter, drill)
    }

    /// The prefix as a char when it is exactly one character long.
    fn single_char(&self) -> Option<char> {
        let mut chars = self.prefix.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Debug for CompletionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionTrigger")
            .field("prefix", &self.prefix)
            .field("multi_word", &self.multi_word)
            .field("descend", &self.descend)
            .finish_non_exhaustive()
    }
}

/// The trigger active at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatch {
    /// Index into the `TriggerSet`
    pub index: usize,
    /// Text after the prefix, up to the cursor
    pub filter: String,
    /// Byte offset where the prefix starts
    pub token_start: usize,
}

/// Ordered trigger registrations. Earlier registrations win, so longer or
/// more specific prefixes must come before shorter overlapping ones.
#[derive(Debug, Default)]
pub struct TriggerSet {
    triggers: Vec<CompletionTrigger>,
}

impl TriggerSet {
    pub fn new() -> Self {
        TriggerSet::default()
    }

    pub fn with(mut self, trigger: CompletionTrigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn get(&self, index: usize) -> Option<&CompletionTrigger> {
        self.triggers.get(index)
    }

    /// Find the trigger active at `cursor`.
    ///
    /// The whitespace token under the cursor is tried first. When no prefix
    /// matches it, the fallbacks run:
    /// 1. bracket: an unclosed `[[` anywhere before the cursor
    /// 2. line scans: a single-character multi-word trigger at a word
    ///    boundary, or a multi-character multi-word prefix such as
    ///    `created:`. Whichever starts nearer the cursor wins.
    pub fn detect(&self, content: &str, cursor: usize) -> Option<TriggerMatch> {
        let cursor = clamp_offset(content, cursor);
        let (token, token_start) = extract_token_at_cursor(content, cursor);
        if let Some(m) = self.match_token(token, token_start) {
            return Some(m);
        }
        let before = &content[..cursor];
        if let Some(m) = self.bracket_fallback(before) {
            return Some(m);
        }
        match (
            self.word_boundary_fallback(before),
            self.keyword_fallback(before),
        ) {
            (Some(word), Some(keyword)) if keyword.token_start > word.token_start => Some(keyword),
            (Some(word), _) => Some(word),
            (None, keyword) => keyword,
        }
    }

    fn match_token(&self, token: &str, token_start: usize) -> Option<TriggerMatch> {
        self.triggers.iter().enumerate().find_map(|(index, t)| {
            token.strip_prefix(t.prefix.as_str()).map(|rest| TriggerMatch {
                index,
                filter: rest.to_string(),
                token_start,
            })
        })
    }

    fn bracket_fallback(&self, before: &str) -> Option<TriggerMatch> {
        let index = self.triggers.iter().position(|t| t.prefix == WIKI_PREFIX)?;
        let open = before.rfind(WIKI_PREFIX)?;
        let inside = &before[open + WIKI_PREFIX.len()..];
        if inside.contains("]]") {
            return None;
        }
        Some(TriggerMatch {
            index,
            filter: inside.to_string(),
            token_start: open,
        })
    }

    fn word_boundary_fallback(&self, before: &str) -> Option<TriggerMatch> {
        let line_start = line_start(before);
        let line = &before[line_start..];
        for (i, c) in line.char_indices().rev() {
            let Some(index) = self
                .triggers
                .iter()
                .position(|t| t.multi_word && t.single_char() == Some(c))
            else {
                continue;
            };
            if !at_word_boundary(line, i) {
                continue;
            }
            let after = &line[i + c.len_utf8()..];
            // "> " is a markdown blockquote, not a parent reference
            if c == '>' && after.starts_with(' ') {
                return None;
            }
            return Some(TriggerMatch {
                index,
                filter: after.to_string(),
                token_start: line_start + i,
            });
        }
        None
    }

    fn keyword_fallback(&self, before: &str) -> Option<TriggerMatch> {
        let line_start = line_start(before);
        let line = &before[line_start..];
        let mut best: Option<(usize, usize)> = None;
        for (index, t) in self.triggers.iter().enumerate() {
            if !t.multi_word || t.single_char().is_some() || t.prefix == WIKI_PREFIX {
                continue;
            }
            let found = line
                .match_indices(t.prefix.as_str())
                .map(|(pos, _)| pos)
                .filter(|&pos| at_word_boundary(line, pos))
                .last();
            if let Some(pos) = found
                && best.is_none_or(|(best_pos, _)| pos > best_pos)
            {
                best = Some((pos, index));
            }
        }
        let (pos, index) = best?;
        let prefix_len = self.triggers[index].prefix.len();
        Some(TriggerMatch {
            index,
            filter: line[pos + prefix_len..].to_string(),
            token_start: line_start + pos,
        })
    }
}

fn line_start(before: &str) -> usize {
    before.rfind('\n').map_or(0, |i| i + 1)
}

/// True when byte `pos` of `line` is at line start or follows a space/tab.
fn at_word_boundary(line: &str, pos: usize) -> bool {
    line[..pos]
        .chars()
        .next_back()
        .is_none_or(|prev| prev == ' ' || prev == '\t')
}
