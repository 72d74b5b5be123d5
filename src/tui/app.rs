use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::io::notebook_io::{Notebook, discover_notebook, load_notebook};
use crate::io::watcher::NotebookWatcher;
use crate::model::note::Note;
use crate::model::snapshot::Snapshot;
use crate::ops::search::{SearchQuery, filter_notes};

use super::editor::Editor;
use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode. Every mode but `Navigate` owns `App::editor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Search bar popup
    Search,
    /// Body editor for `App::target_id`
    EditNote,
    /// Parent picker for `App::target_id`
    PickParent,
    /// Title input for a new note
    NewNote,
}

/// Main application state
pub struct App {
    pub notebook: Notebook,
    pub snapshot: Rc<Snapshot>,
    pub today: NaiveDate,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Indices into `snapshot.notes` passing the current filter
    pub visible: Vec<usize>,
    /// Index into `visible`
    pub cursor: usize,
    pub scroll: usize,
    /// Filter applied to the notes list
    pub query: SearchQuery,
    pub editor: Option<Editor>,
    /// Note the open editor acts on
    pub target_id: Option<String>,
    pub status_message: Option<String>,
    pub status_is_error: bool,
    /// Text area of the open editor popup, recorded at render time
    pub editor_area: Option<Rect>,
    /// Notes list area, recorded at render time
    pub list_area: Option<Rect>,
}

impl App {
    pub fn new(notebook: Notebook, today: NaiveDate) -> Self {
        let snapshot = Rc::new(notebook.snapshot(today));
        let theme = Theme::from_config(&notebook.config.ui);
        let mut app = App {
            notebook,
            snapshot,
            today,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            visible: Vec::new(),
            cursor: 0,
            scroll: 0,
            query: SearchQuery::default(),
            editor: None,
            target_id: None,
            status_message: None,
            status_is_error: false,
            editor_area: None,
            list_area: None,
        };
        app.refresh_visible();
        app
    }

    pub fn selected_note(&self) -> Option<&Note> {
        let idx = *self.visible.get(self.cursor)?;
        self.snapshot.notes.get(idx)
    }

    /// Re-run the filter, keeping the selected note selected when it is
    /// still visible.
    pub fn refresh_visible(&mut self) {
        let selected = self.selected_note().map(|n| n.id.clone());
        self.visible = filter_notes(&self.snapshot, &self.query);
        self.cursor = selected
            .and_then(|id| {
                self.visible
                    .iter()
                    .position(|&i| self.snapshot.notes[i].id == id)
            })
            .unwrap_or(self.cursor)
            .min(self.visible.len().saturating_sub(1));
    }

    pub fn select_id(&mut self, id: &str) {
        if let Some(pos) = self
            .visible
            .iter()
            .position(|&i| self.snapshot.notes[i].id == id)
        {
            self.cursor = pos;
        }
    }

    /// Rebuild the snapshot after the notebook changed. An open editor keeps
    /// its text and completion state; only its triggers are replaced.
    pub fn install_snapshot(&mut self) {
        self.snapshot = Rc::new(self.notebook.snapshot(self.today));
        self.theme = Theme::from_config(&self.notebook.config.ui);
        if let Some(editor) = &mut self.editor {
            editor.rebuild_triggers(&self.snapshot);
        }
        self.refresh_visible();
    }

    /// Reload everything from disk.
    pub fn reload(&mut self) {
        match load_notebook(&self.notebook.root) {
            Ok(notebook) => {
                self.notebook = notebook;
                self.install_snapshot();
            }
            Err(e) => {
                warn!(error = %e, "reload failed");
                self.set_error(format!("reload failed: {}", e));
            }
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = true;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }

    /// Close any popup and return to the notes list.
    pub fn close_editor(&mut self) {
        self.editor = None;
        self.target_id = None;
        self.editor_area = None;
        self.mode = Mode::Navigate;
    }
}

/// Send tracing output to `.notedeck/notedeck.log`. Stderr would draw over
/// the alternate screen.
fn init_file_logging(meta_dir: &Path) {
    let path = meta_dir.join("notedeck.log");
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_env("NOTEDECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

/// Run the TUI on the notebook containing `dir` (or the working directory).
pub fn run(dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let root = discover_notebook(&start)?;
    let notebook = load_notebook(&root)?;
    init_file_logging(&notebook.meta_dir);
    info!(root = %root.display(), "starting tui");

    let watcher = match NotebookWatcher::start(&notebook.notes_dir(), &notebook.meta_dir) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "file watcher unavailable");
            None
        }
    };
    let mut app = App::new(notebook, Local::now().date_naive());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&NotebookWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if let Some(watcher) = watcher
            && !watcher.poll().is_empty()
        {
            app.reload();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
