use super::write_output;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use poster_editor::{read_html, EditSession};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Poster .html file to export
    pub input: PathBuf,

    /// Output file (defaults to <outDir>/<exportFile>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = read_html(&args.input)
        .with_context(|| format!("Cannot read {}", args.input.display()))?;

    let mut session = EditSession::new(config.editor.clone());
    session.mount(&source);
    let html = session
        .export_document()
        .context("Poster did not mount")?;

    emit(&html, args.output, args.stdout, &config, cwd)
}

/// Write exported markup to stdout, an explicit file, or the configured
/// export location
pub(crate) fn emit(
    html: &str,
    output: Option<PathBuf>,
    stdout: bool,
    config: &Config,
    cwd: &str,
) -> Result<()> {
    if stdout {
        println!("{}", html);
        return Ok(());
    }

    let output_file = output
        .unwrap_or_else(|| config.get_out_dir(cwd, None).join(&config.export_file));
    write_output(&output_file, html)?;
    println!("  {} Exported → {}", "✓".green(), output_file.display());
    Ok(())
}
