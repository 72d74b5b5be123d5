use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::warn;

use super::notebook_io::CONFIG_FILE;

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug)]
pub enum FileEvent {
    /// Notes or the config changed on disk.
    Changed(Vec<PathBuf>),
}

/// Watches a notebook's notes directory and its config file.
pub struct NotebookWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

/// Notes are `.md` files; the only other file that matters is the config.
fn is_relevant(path: &Path) -> bool {
    if path.file_name().and_then(|n| n.to_str()) == Some(CONFIG_FILE) {
        return true;
    }
    path.extension().and_then(|e| e.to_str()) == Some("md")
}

impl NotebookWatcher {
    /// Start watching. `poll()` should be called each tick.
    pub fn start(notes_dir: &Path, meta_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(e) => {
                        warn!(error = %e, "file watcher error");
                        return;
                    }
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                let relevant: Vec<PathBuf> =
                    event.paths.into_iter().filter(|p| is_relevant(p)).collect();
                if !relevant.is_empty() {
                    let _ = tx.send(FileEvent::Changed(relevant));
                }
            },
            Config::default(),
        )?;

        watcher.watch(notes_dir, RecursiveMode::NonRecursive)?;
        if meta_dir != notes_dir {
            watcher.watch(meta_dir, RecursiveMode::NonRecursive)?;
        }
        Ok(NotebookWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending file events.
    pub fn poll(&self) -> Vec<FileEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_notes_and_config_are_relevant() {
        assert!(is_relevant(Path::new("/nb/plan.md")));
        assert!(is_relevant(Path::new("/nb/.notedeck/config.toml")));
        assert!(!is_relevant(Path::new("/nb/.notedeck/notedeck.log")));
        assert!(!is_relevant(Path::new("/nb/.tmpA1b2C3")));
        assert!(!is_relevant(Path::new("/nb/other.toml")));
    }
}
