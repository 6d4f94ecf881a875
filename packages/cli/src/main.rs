mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{edit, export, init, sanitize, EditArgs, ExportArgs, InitArgs, SanitizeArgs};
use tracing_subscriber::EnvFilter;

/// Poster CLI - sanitize, edit and export single-page HTML posters
#[derive(Parser, Debug)]
#[command(name = "poster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor activity to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new poster project
    Init(InitArgs),

    /// Strip unsafe markup from poster files
    Sanitize(SanitizeArgs),

    /// Export a poster as a standalone HTML file
    Export(ExportArgs),

    /// Replay a script of editor events against a poster
    Edit(EditArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Sanitize(args) => sanitize(args, &cwd),
                Command::Export(args) => export(args, &cwd),
                Command::Edit(args) => edit(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
