use std::path::Path;

use clap::Parser;
use notedeck::cli::commands::Cli;
use notedeck::cli::handlers::{self, Context};
use tracing_subscriber::EnvFilter;

/// CLI logging goes to stderr. `NOTEDECK_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("NOTEDECK_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn main() {
    let mut cli = Cli::parse();

    let result = match cli.command.take() {
        // No subcommand → launch TUI
        None => notedeck::tui::run(cli.notebook_dir.as_deref().map(Path::new)),
        Some(command) => {
            init_logging(cli.verbose);
            Context::from_cli(&cli).and_then(|ctx| handlers::dispatch(command, &ctx))
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
