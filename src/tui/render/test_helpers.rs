use std::fs;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::notebook_io::{Notebook, init_notebook, load_notebook};
use crate::model::snapshot::fixtures::{sample_config, sample_notes, today};
use crate::tui::app::App;
use crate::tui::input::handle_key;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app at `TERM_W` x `TERM_H`.
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Feed `text` to the app one keystroke at a time.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        handle_key(app, key(KeyCode::Char(c)));
    }
}

/// An app over the in-memory sample notebook. Nothing is on disk.
pub fn sample_app() -> App {
    let notebook = Notebook {
        root: PathBuf::from("/tmp/notedeck-sample"),
        meta_dir: PathBuf::from("/tmp/notedeck-sample/.notedeck"),
        config: sample_config(),
        notes: {
            let mut notes = sample_notes();
            notes.sort_by(|a, b| a.id.cmp(&b.id));
            notes
        },
    };
    App::new(notebook, today())
}

/// The sample notebook written to a temp dir, for tests that save.
pub fn disk_app() -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    init_notebook(tmp.path(), "Sample").unwrap();
    let files = [
        ("projects.md", "# Projects\n\nPlans #work\n"),
        ("journal.md", "# Journal\n"),
        ("web.md", "# Web\nparent: projects\n\n#work #frontend\n"),
        ("mobile.md", "# Mobile\nparent: projects\n\n#work\n"),
        ("frontend.md", "# Frontend\nparent: web\n\n#work #frontend\n"),
        (
            "guide.md",
            "# Setup guide\n\n#docs\n\n## Install\n\n## Configure\n\n## Usage\n",
        ),
    ];
    for (name, text) in files {
        fs::write(tmp.path().join(name), text).unwrap();
    }
    let notebook = load_notebook(tmp.path()).unwrap();
    let app = App::new(notebook, today());
    (tmp, app)
}
