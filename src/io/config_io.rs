use std::path::Path;

use tracing::info;

use crate::io::notebook_io::{CONFIG_FILE, NotebookError, atomic_write, read_config_file};
use crate::model::config::Config;

/// Read the notebook config, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe editing.
pub fn read_config(meta_dir: &Path) -> Result<(Config, toml_edit::DocumentMut), NotebookError> {
    let (config, text) = read_config_file(meta_dir)?;
    let doc: toml_edit::DocumentMut = text.parse()?;
    Ok((config, doc))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(meta_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), NotebookError> {
    let config_path = meta_dir.join(CONFIG_FILE);
    atomic_write(&config_path, doc.to_string().as_bytes()).map_err(|e| {
        NotebookError::ReadError {
            path: config_path,
            source: e,
        }
    })?;
    Ok(())
}

/// Set `name = expansion` in `[abbreviations]`, creating the table if needed.
/// Returns the previous expansion when the name already existed.
pub fn set_abbreviation(
    doc: &mut toml_edit::DocumentMut,
    name: &str,
    expansion: &str,
) -> Option<String> {
    if !doc.contains_key("abbreviations") {
        doc["abbreviations"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    let previous = doc["abbreviations"]
        .get(name)
        .and_then(|v| v.as_str())
        .map(String::from);
    doc["abbreviations"][name] = toml_edit::value(expansion);
    previous
}

/// Read, edit and write back in one step.
pub fn add_abbreviation(
    meta_dir: &Path,
    name: &str,
    expansion: &str,
) -> Result<Option<String>, NotebookError> {
    let (_, mut doc) = read_config(meta_dir)?;
    let previous = set_abbreviation(&mut doc, name, expansion);
    write_config(meta_dir, &doc)?;
    info!(name, replaced = previous.is_some(), "abbreviation saved");
    Ok(previous)
}
