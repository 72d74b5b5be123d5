use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nd", about = concat!("notedeck v", env!("CARGO_PKG_VERSION"), " - markdown notes with completion"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different notebook directory
    #[arg(short = 'C', long = "notebook-dir", global = true)]
    pub notebook_dir: Option<String>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Resolve relative dates against this day instead of the system date
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a notebook in the current directory
    Init(InitArgs),
    /// Show the completions offered at a cursor position
    Complete(CompleteArgs),
    /// List tags with their usage counts
    Tags,
    /// List notes, optionally filtered by a search query
    Notes(NotesArgs),
    /// Create a note
    New(NewArgs),
    /// Manage abbreviations
    Abbrev(AbbrevCmd),
}

#[derive(Args)]
pub struct InitArgs {
    /// Notebook name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Overwrite an existing config with the defaults
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct CompleteArgs {
    /// Input text
    #[arg(allow_hyphen_values = true)]
    pub text: String,
    /// Cursor byte offset (default: end of text)
    #[arg(long)]
    pub cursor: Option<usize>,
    /// Input surface whose triggers apply: search, note, parent
    #[arg(long, default_value = "note")]
    pub surface: String,
    /// Accept the selected candidate and print the resulting text
    #[arg(long)]
    pub accept: bool,
}

#[derive(Args)]
pub struct NotesArgs {
    /// Search query, same syntax as the search bar
    pub query: Option<String>,
}

#[derive(Args)]
pub struct NewArgs {
    /// Note title
    pub title: String,
    /// Parent note id
    #[arg(long)]
    pub parent: Option<String>,
}

#[derive(Args)]
pub struct AbbrevCmd {
    #[command(subcommand)]
    pub action: AbbrevAction,
}

#[derive(Subcommand)]
pub enum AbbrevAction {
    /// List configured abbreviations
    List,
    /// Add or replace an abbreviation
    Add {
        /// Name typed after @
        name: String,
        /// Expansion text (\n for a line break)
        expansion: String,
    },
}
