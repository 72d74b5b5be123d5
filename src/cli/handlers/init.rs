use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::notebook_io::{self, CONFIG_FILE, META_DIR};

/// Infer a notebook name from a directory name: hyphens and underscores
/// become spaces, each word title-cased.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn cmd_init(args: InitArgs, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let meta_dir = dir.join(META_DIR);
    if meta_dir.join(CONFIG_FILE).is_file() && !args.force {
        return Err(format!(
            "notebook already exists in {} (use --force to reset its config)",
            dir.display()
        )
        .into());
    }

    if let Some(parent) = dir.parent()
        && let Ok(outer) = notebook_io::discover_notebook(parent)
    {
        eprintln!("Note: enclosing notebook found at {}", outer.display());
    }

    let name = args.name.unwrap_or_else(|| {
        dir.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Notes".to_string())
    });
    notebook_io::write_default_config(&meta_dir, &name)?;
    println!("Initialized notebook: {}", name);
    Ok(())
}
