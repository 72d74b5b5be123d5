use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::complete::item::CompletionItem;
use crate::complete::state::DrillEntry;
use crate::complete::trigger::CandidateProvider;

/// Inclusive date range; a single day has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    fn day(date: NaiveDate) -> Self {
        DateRange {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// `YYYY-MM-DD` or `YYYY-MM-DD..YYYY-MM-DD`
    pub fn to_query(self) -> String {
        if self.start == self.end {
            self.start.format("%Y-%m-%d").to_string()
        } else {
            format!(
                "{}..{}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }

    /// Inverse of [`DateRange::to_query`]
    pub fn parse_query(s: &str) -> Option<DateRange> {
        let parse = |d: &str| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok();
        match s.split_once("..") {
            Some((a, b)) => {
                let (start, end) = (parse(a)?, parse(b)?);
                (start <= end).then_some(DateRange { start, end })
            }
            None => parse(s).map(DateRange::day),
        }
    }
}

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

const NAMED: [&str; 8] = [
    "today",
    "yesterday",
    "tomorrow",
    "this week",
    "last week",
    "next week",
    "this month",
    "last month",
];

/// Resolve a shortcut such as `last week`, `friday` or `3 days ago`
/// relative to `today`.
pub fn resolve(shortcut: &str, today: NaiveDate) -> Option<DateRange> {
    let shortcut = normalize(shortcut);
    match shortcut.as_str() {
        "today" => Some(DateRange::day(today)),
        "yesterday" => today.checked_sub_days(Days::new(1)).map(DateRange::day),
        "tomorrow" => today.checked_add_days(Days::new(1)).map(DateRange::day),
        "this week" => week_of(today),
        "last week" => today.checked_sub_days(Days::new(7)).and_then(week_of),
        "next week" => today.checked_add_days(Days::new(7)).and_then(week_of),
        "this month" => month_of(today),
        "last month" => today
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(1)))
            .and_then(month_of),
        other => {
            if let Some((_, wd)) = WEEKDAYS.iter().find(|(name, _)| *name == other) {
                let back = (7 + today.weekday().num_days_from_monday() - wd.num_days_from_monday()) % 7;
                return today
                    .checked_sub_days(Days::new(back as u64))
                    .map(DateRange::day);
            }
            let (n, unit) = parse_ago(other)?;
            today.checked_sub_days(Days::new(n * unit)).map(DateRange::day)
        }
    }
}

/// `N days ago` / `N weeks ago` as (N, days per unit)
fn parse_ago(s: &str) -> Option<(u64, u64)> {
    let mut words = s.split(' ');
    let n: u64 = words.next()?.parse().ok()?;
    let unit = match words.next()? {
        "day" | "days" => 1,
        "week" | "weeks" => 7,
        _ => return None,
    };
    (words.next()? == "ago" && words.next().is_none()).then_some((n, unit))
}

fn week_of(date: NaiveDate) -> Option<DateRange> {
    let offset = date.weekday().num_days_from_monday() as u64;
    let start = date.checked_sub_days(Days::new(offset))?;
    let end = start.checked_add_days(Days::new(6))?;
    Some(DateRange { start, end })
}

fn month_of(date: NaiveDate) -> Option<DateRange> {
    let start = date.with_day(1)?;
    let end = start
        .checked_add_months(Months::new(1))?
        .checked_sub_days(Days::new(1))?;
    Some(DateRange { start, end })
}

/// Lowercase with runs of whitespace collapsed to one space.
fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Date shortcuts after a `created:` / `modified:` style prefix.
pub struct DateProvider {
    prefix: String,
    today: NaiveDate,
}

impl DateProvider {
    pub fn new(prefix: impl Into<String>, today: NaiveDate) -> Self {
        DateProvider {
            prefix: prefix.into(),
            today,
        }
    }

    fn shortcut_names(&self, filter: &str) -> Vec<String> {
        let mut names: Vec<String> = NAMED
            .iter()
            .copied()
            .chain(WEEKDAYS.iter().map(|(name, _)| *name))
            .filter(|name| name.starts_with(filter))
            .map(String::from)
            .collect();

        // "3" offers "3 days ago" and "3 weeks ago"
        if let Some(n) = filter.split(' ').next().and_then(|w| w.parse::<u64>().ok()) {
            for unit in ["days", "weeks"] {
                let name = format!("{} {} ago", n, unit);
                if name.starts_with(filter) {
                    names.push(name);
                }
            }
        }
        names
    }

    fn item(&self, label: &str, range: DateRange) -> CompletionItem {
        let query = range.to_query();
        CompletionItem::new(label)
            .insert(format!("{}{}", self.prefix, query))
            .detail(query)
    }
}

impl CandidateProvider for DateProvider {
    fn candidates(&self, filter: &str, _drill: &[DrillEntry]) -> Vec<CompletionItem> {
        let filter = normalize(filter);
        let mut items: Vec<CompletionItem> = self
            .shortcut_names(&filter)
            .iter()
            .filter_map(|name| resolve(name, self.today).map(|range| self.item(name, range)))
            .collect();

        if let Some(range) = DateRange::parse_query(&filter) {
            items.push(self.item(&range.to_query(), range));
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // a Wednesday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(a: NaiveDate, b: NaiveDate) -> Option<DateRange> {
        Some(DateRange { start: a, end: b })
    }

    #[test]
    fn relative_days() {
        assert_eq!(resolve("today", today()), range(ymd(2026, 10, 14), ymd(2026, 10, 14)));
        assert_eq!(resolve("Yesterday", today()), range(ymd(2026, 10, 13), ymd(2026, 10, 13)));
        assert_eq!(resolve("tomorrow", today()), range(ymd(2026, 10, 15), ymd(2026, 10, 15)));
        assert_eq!(resolve("3 days ago", today()), range(ymd(2026, 10, 11), ymd(2026, 10, 11)));
        assert_eq!(resolve("2  weeks ago", today()), range(ymd(2026, 9, 30), ymd(2026, 9, 30)));
    }

    #[test]
    fn weeks_run_monday_to_sunday() {
        assert_eq!(resolve("this week", today()), range(ymd(2026, 10, 12), ymd(2026, 10, 18)));
        assert_eq!(resolve("last week", today()), range(ymd(2026, 10, 5), ymd(2026, 10, 11)));
        assert_eq!(resolve("next week", today()), range(ymd(2026, 10, 19), ymd(2026, 10, 25)));
    }

    #[test]
    fn months() {
        assert_eq!(resolve("this month", today()), range(ymd(2026, 10, 1), ymd(2026, 10, 31)));
        assert_eq!(resolve("last month", today()), range(ymd(2026, 9, 1), ymd(2026, 9, 30)));
        let jan = ymd(2027, 1, 20);
        assert_eq!(resolve("last month", jan), range(ymd(2026, 12, 1), ymd(2026, 12, 31)));
    }

    #[test]
    fn weekday_is_most_recent_occurrence() {
        assert_eq!(resolve("monday", today()), range(ymd(2026, 10, 12), ymd(2026, 10, 12)));
        assert_eq!(resolve("thursday", today()), range(ymd(2026, 10, 8), ymd(2026, 10, 8)));
        assert_eq!(resolve("wednesday", today()), range(ymd(2026, 10, 14), ymd(2026, 10, 14)));
    }

    #[test]
    fn unknown_shortcuts() {
        assert_eq!(resolve("someday", today()), None);
        assert_eq!(resolve("3 days", today()), None);
        assert_eq!(resolve("3 months ago", today()), None);
    }

    #[test]
    fn queries_round_trip() {
        let r = DateRange {
            start: ymd(2026, 10, 12),
            end: ymd(2026, 10, 18),
        };
        assert_eq!(r.to_query(), "2026-10-12..2026-10-18");
        assert_eq!(DateRange::parse_query(&r.to_query()), Some(r));
        assert_eq!(DateRange::parse_query("2026-10-18..2026-10-12"), None);
        assert!(r.contains(ymd(2026, 10, 12)));
        assert!(!r.contains(ymd(2026, 10, 19)));
    }

    #[test]
    fn provider_filters_by_prefix() {
        let provider = DateProvider::new("created:", today());
        let items = provider.candidates("t", &[]);
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["today", "tomorrow", "this week", "this month", "tuesday", "thursday"]
        );
        assert_eq!(items[0].insert_text, "created:2026-10-14");
        assert_eq!(items[2].insert_text, "created:2026-10-12..2026-10-18");
    }

    #[test]
    fn provider_multi_word_filter() {
        let provider = DateProvider::new("modified:", today());
        let items = provider.candidates("last  w", &[]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "last week");
        assert_eq!(items[0].detail, "2026-10-05..2026-10-11");
    }

    #[test]
    fn provider_numbers_and_literals() {
        let provider = DateProvider::new("created:", today());
        let labels: Vec<String> = provider
            .candidates("5", &[])
            .into_iter()
            .map(|i| i.label)
            .collect();
        assert_eq!(labels, vec!["5 days ago", "5 weeks ago"]);

        let items = provider.candidates("2026-01-02", &[]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].insert_text, "created:2026-01-02");
    }
}
