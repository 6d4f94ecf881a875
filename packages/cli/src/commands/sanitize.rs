use super::{find_html_files, write_output};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use poster_sanitizer::{Removal, Sanitizer};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct SanitizeArgs {
    /// File or directory to sanitize (defaults to the configured source directory)
    pub path: Option<PathBuf>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// List every removed element and attribute
    #[arg(short, long)]
    pub report: bool,

    /// Output format for the report (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn sanitize(args: SanitizeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = args.path.clone().unwrap_or_else(|| config.get_src_dir(cwd));

    let (root, files) = if input.is_file() {
        let root = input.parent().map(Path::to_path_buf).unwrap_or_default();
        (root, vec![input.clone()])
    } else if input.is_dir() {
        let files = find_html_files(&input)?;
        (input.clone(), files)
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    if !args.stdout {
        println!("{}", "🧹 Sanitizing posters...".bright_blue().bold());
    }
    if files.is_empty() {
        println!("{}", "⚠️  No .html files found".yellow());
        return Ok(());
    }

    let sanitizer = Sanitizer::new();
    let out_dir = config.get_out_dir(cwd, args.out_dir.as_deref());
    let mut total_removals = 0;

    for file in &files {
        let relative_path = file.strip_prefix(&root).unwrap_or(file);
        let source = fs::read_to_string(file)
            .with_context(|| format!("Cannot read {}", file.display()))?;
        let sanitized = sanitizer.sanitize_with_report(&source);
        total_removals += sanitized.removals.len();

        if args.stdout {
            println!("{}", sanitized.html);
        } else {
            let output_file = out_dir.join(relative_path);
            write_output(&output_file, &sanitized.html)?;
            println!(
                "  {} {} → {} ({} removed)",
                "✓".green(),
                relative_path.display(),
                output_file.display(),
                sanitized.removals.len()
            );
        }

        if args.report {
            print_report(&sanitized.removals, &args.format)?;
        }
    }

    if !args.stdout {
        println!();
        println!(
            "{} Sanitized {} files, {} removals",
            "✅".green(),
            files.len(),
            total_removals
        );
    }

    Ok(())
}

fn print_report(removals: &[Removal], format: &str) -> Result<()> {
    match format {
        "json" => {
            eprintln!("{}", serde_json::to_string_pretty(removals)?);
        }
        "text" => {
            for removal in removals {
                let subject = match &removal.attribute {
                    Some(attribute) => format!("<{} {}>", removal.tag, attribute),
                    None => format!("<{}>", removal.tag),
                };
                eprintln!(
                    "    {} {} {} ({})",
                    "-".red(),
                    subject.bright_white(),
                    removal.message,
                    removal.rule.dimmed()
                );
            }
        }
        other => return Err(anyhow!("Unknown report format: {}", other)),
    }
    Ok(())
}
