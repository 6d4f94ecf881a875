use super::export::emit;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use poster_editor::{read_html, EditSession, EditorEvent, Outcome};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Poster .html file to edit
    pub input: PathBuf,

    /// JSON file with an array of editor events to replay
    #[arg(short, long)]
    pub script: PathBuf,

    /// Output file (defaults to <outDir>/<exportFile>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = read_html(&args.input)
        .with_context(|| format!("Cannot read {}", args.input.display()))?;
    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read {}", args.script.display()))?;
    let events: Vec<EditorEvent> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid event script {}", args.script.display()))?;

    let mut session = EditSession::new(config.editor.clone());
    session.mount(&source);

    if !args.stdout {
        println!(
            "{} {} events on {}",
            "✏️  Replaying".bright_blue().bold(),
            events.len(),
            args.input.display()
        );
    }

    let mut ignored = 0;
    for (index, event) in events.into_iter().enumerate() {
        let label = event_label(&event);
        let outcome = session.dispatch(event);
        if outcome.is_noop() {
            ignored += 1;
        }
        if !args.stdout {
            print_outcome(index, &label, &outcome);
        }
    }

    if !args.stdout {
        println!();
        println!(
            "{} {} undo levels, {} ignored events",
            "✅".green(),
            session.history().undo_levels(),
            ignored
        );
    }

    let html = session
        .export_document()
        .context("Poster did not mount")?;
    emit(&html, args.output, args.stdout, &config, cwd)
}

fn event_label(event: &EditorEvent) -> String {
    serde_json::to_value(event)
        .ok()
        .and_then(|value| value.get("type").and_then(|t| t.as_str()).map(str::to_string))
        .unwrap_or_else(|| "event".to_string())
}

fn print_outcome(index: usize, label: &str, outcome: &Outcome) {
    let target = outcome
        .target()
        .map(|id| format!(" {}", id.bright_white()))
        .unwrap_or_default();

    match outcome {
        Outcome::Committed { version, .. } => println!(
            "  {} {:>3} {}{} (committed v{})",
            "✓".green(),
            index,
            label,
            target,
            version
        ),
        Outcome::Applied { version, .. } => println!(
            "  {} {:>3} {}{} (v{})",
            "·".cyan(),
            index,
            label,
            target,
            version
        ),
        Outcome::Noop { reason } => println!(
            "  {} {:>3} {} ignored: {:?}",
            "-".yellow(),
            index,
            label,
            reason
        ),
    }
}
