use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Configuration from `.notedeck/config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notebook: NotebookInfo,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub dates: DateConfig,
    /// Name → expansion, in the order they appear in the file.
    #[serde(default)]
    pub abbreviations: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookInfo {
    #[serde(default)]
    pub name: String,
    /// Directory holding the notes, relative to the notebook root.
    #[serde(default = "default_notes_dir")]
    pub notes_dir: String,
}

impl Default for NotebookInfo {
    fn default() -> Self {
        NotebookInfo {
            name: String::new(),
            notes_dir: default_notes_dir(),
        }
    }
}

fn default_notes_dir() -> String {
    ".".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub colors: HashMap<String, String>,
    #[serde(default)]
    pub tag_colors: HashMap<String, String>,
    /// Tags always offered by completion, even if no note uses them yet.
    #[serde(default)]
    pub default_tags: Vec<String>,
    #[serde(default = "default_true")]
    pub soft_wrap: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            colors: HashMap::new(),
            tag_colors: HashMap::new(),
            default_tags: Vec::new(),
            soft_wrap: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateConfig {
    /// chrono format string used when a date is written into text.
    #[serde(default = "default_date_format")]
    pub format: String,
}

impl Default for DateConfig {
    fn default() -> Self {
        DateConfig {
            format: default_date_format(),
        }
    }
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}
