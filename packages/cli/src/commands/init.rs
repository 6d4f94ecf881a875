use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use poster_editor::{EditSession, STARTER_POSTER};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for poster files
    #[arg(short, long, default_value = "posters")]
    pub src_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing poster project...".bright_blue().bold());

    let config = Config {
        src_dir: args.src_dir.clone(),
        ..Config::default()
    };

    // Create source directory if it doesn't exist
    let src_dir = config.get_src_dir(cwd);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)
            .with_context(|| format!("Cannot create {}", src_dir.display()))?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    // Starter poster, exported the way the editor saves it
    let starter_file = src_dir.join(&config.export_file);
    if !starter_file.exists() {
        let mut session = EditSession::new(config.editor.clone());
        session.mount(STARTER_POSTER);
        let html = session
            .export_document()
            .context("Starter poster did not mount")?;
        fs::write(&starter_file, html)?;
        println!("  {} Created {}", "✓".green(), config.export_file);
    }

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Open {}/{} in the editor", args.src_dir, config.export_file);
    println!("  2. Run: poster sanitize");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}
