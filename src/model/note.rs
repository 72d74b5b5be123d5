use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

/// A single markdown note. The id is the file stem.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Id of the parent note, if any
    pub parent: Option<String>,
    pub created: Option<NaiveDate>,
    pub modified: Option<NaiveDate>,
    /// Metadata lines this crate does not interpret, kept in file order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
    /// `#tags` found in the body, without the `#`, first occurrence order
    pub tags: Vec<String>,
    /// Headings below the title
    pub headings: Vec<String>,
    #[serde(skip)]
    pub body: String,
    #[serde(skip)]
    pub path: PathBuf,
}

impl Note {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Note {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
