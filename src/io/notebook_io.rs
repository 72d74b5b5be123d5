use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::model::config::Config;
use crate::model::note::Note;
use crate::model::snapshot::Snapshot;
use crate::parse::{parse_note, serialize_note};

/// Directory marking a notebook root
pub const META_DIR: &str = ".notedeck";
pub const CONFIG_FILE: &str = "config.toml";

/// Error type for notebook I/O operations
#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    #[error("not a notedeck notebook: no .notedeck/config.toml found")]
    NotANotebook,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    ConfigEditError(#[from] toml_edit::TomlError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A loaded notebook: its location, config and notes.
#[derive(Debug, Clone)]
pub struct Notebook {
    pub root: PathBuf,
    pub meta_dir: PathBuf,
    pub config: Config,
    /// Sorted by id
    pub notes: Vec<Note>,
}

impl Notebook {
    pub fn notes_dir(&self) -> PathBuf {
        self.root.join(&self.config.notebook.notes_dir)
    }

    pub fn snapshot(&self, today: NaiveDate) -> Snapshot {
        Snapshot::new(self.notes.clone(), &self.config, today)
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Display name: the configured name, else the root directory name
    pub fn name(&self) -> String {
        if !self.config.notebook.name.is_empty() {
            return self.config.notebook.name.clone();
        }
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Discover the notebook by walking up from the given directory, looking for
/// `.notedeck/config.toml`.
pub fn discover_notebook(start: &Path) -> Result<PathBuf, NotebookError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(META_DIR).join(CONFIG_FILE).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(NotebookError::NotANotebook);
        }
    }
}

const CONFIG_TEMPLATE: &str = r##"[notebook]
name = {name}
# directory holding the notes, relative to the notebook root
notes_dir = "."

[ui]
soft_wrap = true
# tags offered by # completion before any note uses them
default_tags = []
#
# [ui.colors]
# background = "#0C001B"
# text = "#A09BFE"
# highlight = "#FB4196"
#
# [ui.tag_colors]
# todo = "#FFD700"

[dates]
# format of the /date snippet
format = "%Y-%m-%d"

# @name expands to the text on the right
[abbreviations]
# sig = "Best regards"
"##;

/// Create `.notedeck/config.toml` under `root`. An existing config is left
/// untouched.
pub fn init_notebook(root: &Path, name: &str) -> Result<PathBuf, NotebookError> {
    let meta_dir = root.join(META_DIR);
    if !meta_dir.join(CONFIG_FILE).exists() {
        write_default_config(&meta_dir, name)?;
    }
    Ok(meta_dir)
}

/// Write the commented default config, replacing any existing one.
pub fn write_default_config(meta_dir: &Path, name: &str) -> Result<(), NotebookError> {
    fs::create_dir_all(meta_dir)?;
    let config_path = meta_dir.join(CONFIG_FILE);
    let text = CONFIG_TEMPLATE.replace("{name}", &toml_edit::Value::from(name).to_string());
    atomic_write(&config_path, text.as_bytes())?;
    info!(path = %config_path.display(), "notebook initialized");
    Ok(())
}

pub fn read_config_file(meta_dir: &Path) -> Result<(Config, String), NotebookError> {
    let config_path = meta_dir.join(CONFIG_FILE);
    let text = fs::read_to_string(&config_path).map_err(|e| NotebookError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: Config = toml::from_str(&text)?;
    Ok((config, text))
}

/// Load the notebook rooted at `root`.
pub fn load_notebook(root: &Path) -> Result<Notebook, NotebookError> {
    let meta_dir = root.join(META_DIR);
    if !meta_dir.is_dir() {
        return Err(NotebookError::NotANotebook);
    }
    let (config, _) = read_config_file(&meta_dir)?;
    let notes = load_notes(&root.join(&config.notebook.notes_dir))?;
    info!(root = %root.display(), notes = notes.len(), "notebook loaded");

    Ok(Notebook {
        root: root.to_path_buf(),
        meta_dir,
        config,
        notes,
    })
}

/// Parse every `*.md` file directly inside `dir`.
pub fn load_notes(dir: &Path) -> Result<Vec<Note>, NotebookError> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "notes directory missing");
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(dir).map_err(|e| NotebookError::ReadError {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut notes = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() || path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let text = fs::read_to_string(&path).map_err(|e| NotebookError::ReadError {
            path: path.clone(),
            source: e,
        })?;
        let mut note = parse_note(id, &text);
        note.path = path;
        notes.push(note);
    }
    notes.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(notes)
}

/// Write a note to its `path`.
pub fn save_note(note: &Note) -> Result<(), NotebookError> {
    let content = serialize_note(note);
    atomic_write(&note.path, content.as_bytes()).map_err(|e| NotebookError::ReadError {
        path: note.path.clone(),
        source: e,
    })?;
    info!(id = %note.id, path = %note.path.display(), "note saved");
    Ok(())
}

/// File id and path for a new note titled `title`, unique within `dir`.
pub fn new_note_path(dir: &Path, title: &str) -> (String, PathBuf) {
    let base = slugify(title);
    let mut id = base.clone();
    let mut n = 2;
    while dir.join(format!("{}.md", id)).exists() {
        id = format!("{}-{}", base, n);
        n += 1;
    }
    let path = dir.join(format!("{}.md", id));
    (id, path)
}

fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "note".to_string()
    } else {
        slug.to_string()
    }
}

/// Write via a temp file in the same directory, then rename over `path`.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
