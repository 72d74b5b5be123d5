mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::complete::{self, CompletionState};
use crate::complete::providers::{Surface, triggers_for};
use crate::io::config_io;
use crate::io::notebook_io::{self, Notebook, NotebookError};
use crate::ops::note_ops;
use crate::ops::search::{SearchQuery, filter_notes};
use crate::tui::editor::EditBuffer;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Where a command runs: the starting directory for notebook discovery and
/// the day relative dates resolve against.
pub struct Context {
    pub start: PathBuf,
    pub today: NaiveDate,
    pub json: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, Box<dyn std::error::Error>> {
        let start = match cli.notebook_dir.as_deref() {
            Some(dir) => std::fs::canonicalize(dir)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
            None => std::env::current_dir()?,
        };
        Ok(Context {
            start,
            today: cli.today.unwrap_or_else(|| Local::now().date_naive()),
            json: cli.json,
        })
    }

    fn load(&self) -> Result<Notebook, NotebookError> {
        let root = notebook_io::discover_notebook(&self.start)?;
        notebook_io::load_notebook(&root)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, ctx: &Context) -> CmdResult {
    match command {
        Commands::Init(args) => cmd_init(args, &ctx.start),
        Commands::Complete(args) => cmd_complete(args, ctx),
        Commands::Tags => cmd_tags(ctx),
        Commands::Notes(args) => cmd_notes(args, ctx),
        Commands::New(args) => cmd_new(args, ctx),
        Commands::Abbrev(cmd) => match cmd.action {
            AbbrevAction::List => cmd_abbrev_list(ctx),
            AbbrevAction::Add { name, expansion } => cmd_abbrev_add(&name, &expansion, ctx),
        },
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_complete(args: CompleteArgs, ctx: &Context) -> CmdResult {
    let surface = Surface::parse(&args.surface).ok_or_else(|| {
        format!(
            "unknown surface \"{}\" (expected search, note or parent)",
            args.surface
        )
    })?;
    let notebook = ctx.load()?;
    let snapshot = Rc::new(notebook.snapshot(ctx.today));
    let triggers = triggers_for(surface, &snapshot);

    let mut buffer = EditBuffer::new(&args.text, surface.multiline());
    if let Some(cursor) = args.cursor {
        buffer.set_cursor(cursor);
    }
    let mut state = CompletionState::new();
    complete::update(buffer.content(), buffer.cursor(), &triggers, &mut state);
    let trigger = state
        .trigger
        .and_then(|i| triggers.get(i))
        .map(|t| t.prefix.clone());
    debug!(surface = %args.surface, items = state.items.len(), "completion computed");

    if args.accept {
        // the listing describes what was offered, not what follows the accept
        let offered = state.clone();
        let accepted = complete::accept(&mut buffer, &mut state, &triggers)
            .map(|_| buffer.content().to_string());
        if ctx.json {
            let json = completion_to_json(&offered, trigger.as_deref(), accepted);
            println!("{}", serde_json::to_string_pretty(&json)?);
        } else {
            match accepted {
                Some(text) => println!("{}", text),
                None => return Err("nothing to accept at the cursor".into()),
            }
        }
        return Ok(());
    }

    if ctx.json {
        let json = completion_to_json(&state, trigger.as_deref(), None);
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else if state.active {
        for line in format_completion(&state) {
            println!("{}", line);
        }
    } else {
        eprintln!("no completions");
    }
    Ok(())
}

fn cmd_tags(ctx: &Context) -> CmdResult {
    let notebook = ctx.load()?;
    let snapshot = notebook.snapshot(ctx.today);

    if ctx.json {
        let tags: Vec<TagJson> = snapshot
            .tags
            .iter()
            .map(|(tag, count)| TagJson {
                tag: tag.clone(),
                count: *count,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&tags)?);
    } else {
        let width = snapshot.tags.iter().map(|(t, _)| t.len()).max().unwrap_or(0);
        for (tag, count) in &snapshot.tags {
            println!("#{:<width$}  {}", tag, count, width = width);
        }
    }
    Ok(())
}

fn cmd_notes(args: NotesArgs, ctx: &Context) -> CmdResult {
    let notebook = ctx.load()?;
    let snapshot = notebook.snapshot(ctx.today);
    let query = SearchQuery::parse(args.query.as_deref().unwrap_or(""), ctx.today);
    let hits = filter_notes(&snapshot, &query);

    if ctx.json {
        let notes: Vec<NoteJson> = hits
            .iter()
            .map(|&i| note_to_json(&snapshot.notes[i], &snapshot))
            .collect();
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else {
        let id_width = hits
            .iter()
            .map(|&i| snapshot.notes[i].id.len())
            .max()
            .unwrap_or(0);
        for &i in &hits {
            println!("{}", format_note_line(&snapshot.notes[i], &snapshot, id_width));
        }
    }
    Ok(())
}

fn cmd_abbrev_list(ctx: &Context) -> CmdResult {
    let notebook = ctx.load()?;
    let abbreviations = &notebook.config.abbreviations;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(abbreviations)?);
    } else {
        for (name, expansion) in abbreviations {
            let first = expansion.lines().next().unwrap_or("");
            println!("@{}  {}", name, first);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_new(args: NewArgs, ctx: &Context) -> CmdResult {
    let mut notebook = ctx.load()?;
    let id = note_ops::create_note(&mut notebook, &args.title, args.parent.as_deref(), ctx.today)?;
    println!("{}", id);
    Ok(())
}

fn cmd_abbrev_add(name: &str, expansion: &str, ctx: &Context) -> CmdResult {
    let name = name.trim_start_matches('@');
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(format!("invalid abbreviation name \"{}\"", name).into());
    }
    let root = notebook_io::discover_notebook(&ctx.start)?;
    let expansion = unescape_newlines(expansion);
    let previous = config_io::add_abbreviation(&meta_dir(&root), name, &expansion)?;
    match previous {
        Some(_) => println!("@{} replaced", name),
        None => println!("@{} added", name),
    }
    Ok(())
}

fn meta_dir(root: &Path) -> PathBuf {
    root.join(notebook_io::META_DIR)
}

/// `\n` in a shell argument stands for a line break; `\\` keeps a backslash.
fn unescape_newlines(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
