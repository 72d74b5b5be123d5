use chrono::NaiveDate;
use regex::Regex;

use crate::complete::providers::dates::{DateRange, resolve};
use crate::model::note::Note;
use crate::model::snapshot::Snapshot;

/// One whitespace-separated part of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Lowercased word matched against title and body
    Word(String),
    /// `#tag`
    Tag(String),
    /// `>Path/Fragment` (or `>>Fragment`), lowercased, without the `>`s
    Parent(String),
    Created(DateRange),
    Modified(DateRange),
}

/// A parsed search bar query. Every term must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub terms: Vec<Term>,
}

impl SearchQuery {
    pub fn parse(text: &str, today: NaiveDate) -> SearchQuery {
        let terms = text
            .split_whitespace()
            .map(|word| parse_term(word, today))
            .collect();
        SearchQuery {
            text: text.trim().to_string(),
            terms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, note: &Note, snapshot: &Snapshot) -> bool {
        self.terms.iter().all(|term| term_matches(term, note, snapshot))
    }

    /// Case-insensitive regex over the plain words, for highlighting hits.
    pub fn highlight_re(&self) -> Option<Regex> {
        let words: Vec<String> = self
            .terms
            .iter()
            .filter_map(|t| match t {
                Term::Word(w) => Some(regex::escape(w)),
                _ => None,
            })
            .collect();
        if words.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", words.join("|"))).ok()
    }
}

fn parse_term(word: &str, today: NaiveDate) -> Term {
    let date = |value: &str| DateRange::parse_query(value).or_else(|| resolve(value, today));
    if let Some(value) = word.strip_prefix("created:")
        && let Some(range) = date(value)
    {
        return Term::Created(range);
    }
    if let Some(value) = word.strip_prefix("modified:")
        && let Some(range) = date(value)
    {
        return Term::Modified(range);
    }
    if let Some(tag) = crate::parse::tag_from_word(word) {
        return Term::Tag(tag.to_string());
    }
    if word.starts_with('>') {
        let fragment = word.trim_start_matches('>');
        if !fragment.is_empty() {
            return Term::Parent(fragment.to_lowercase());
        }
    }
    Term::Word(word.to_lowercase())
}

fn term_matches(term: &Term, note: &Note, snapshot: &Snapshot) -> bool {
    match term {
        Term::Word(w) => {
            note.title.to_lowercase().contains(w) || note.body.to_lowercase().contains(w)
        }
        Term::Tag(tag) => note.has_tag(tag),
        Term::Parent(fragment) => {
            let path = snapshot.path_label(&note.id).to_lowercase();
            path.starts_with(fragment.as_str()) || path.contains(&format!("/{}", fragment))
        }
        Term::Created(range) => note.created.is_some_and(|d| range.contains(d)),
        Term::Modified(range) => note.modified.is_some_and(|d| range.contains(d)),
    }
}

/// Indices into `snapshot.notes` of the notes matching `query`, in
/// notebook order.
pub fn filter_notes(snapshot: &Snapshot, query: &SearchQuery) -> Vec<usize> {
    snapshot
        .notes
        .iter()
        .enumerate()
        .filter(|(_, note)| query.matches(note, snapshot))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::snapshot::fixtures::sample;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn hits(text: &str) -> Vec<String> {
        let mut snap = sample();
        snap.notes[0].created = NaiveDate::from_ymd_opt(2026, 10, 13);
        snap.notes[1].body = "Morning pages about the garden".into();
        let query = SearchQuery::parse(text, today());
        filter_notes(&snap, &query)
            .into_iter()
            .map(|i| snap.notes[i].id.clone())
            .collect()
    }

    #[test]
    fn parses_each_kind() {
        let query = SearchQuery::parse("plan #work >Projects/ created:yesterday", today());
        let day = NaiveDate::from_ymd_opt(2026, 10, 13).unwrap();
        assert_eq!(
            query.terms,
            vec![
                Term::Word("plan".into()),
                Term::Tag("work".into()),
                Term::Parent("projects/".into()),
                Term::Created(DateRange { start: day, end: day }),
            ]
        );
    }

    #[test]
    fn unreadable_date_is_a_word() {
        let query = SearchQuery::parse("created:someday", today());
        assert_eq!(query.terms, vec![Term::Word("created:someday".into())]);
    }

    #[test]
    fn empty_query_matches_all() {
        assert_eq!(hits("").len(), 6);
    }

    #[test]
    fn tags_and_words() {
        assert_eq!(hits("#frontend"), vec!["web", "frontend"]);
        assert_eq!(hits("GARDEN"), vec!["journal"]);
        assert_eq!(hits("#work mob"), vec!["mobile"]);
    }

    #[test]
    fn parent_paths() {
        assert_eq!(hits(">Projects/"), vec!["web", "mobile", "frontend"]);
        assert_eq!(hits(">>web"), vec!["web", "frontend"]);
    }

    #[test]
    fn date_ranges() {
        assert_eq!(hits("created:2026-10-12..2026-10-18"), vec!["projects"]);
        assert_eq!(hits("created:last week"), Vec::<String>::new());
        assert!(hits("modified:today").is_empty());
    }

    #[test]
    fn highlight_covers_words_only() {
        let query = SearchQuery::parse("#work web", today());
        let re = query.highlight_re().unwrap();
        assert!(re.is_match("The WEB team"));
        assert!(SearchQuery::parse("#work", today()).highlight_re().is_none());
    }
}
