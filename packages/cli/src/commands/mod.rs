pub mod edit;
pub mod export;
pub mod init;
pub mod sanitize;

pub use edit::{edit, EditArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use sanitize::{sanitize, SanitizeArgs};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find .html/.htm files under `dir`
pub(crate) fn find_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Cannot walk {}", dir.display()))?;
        let path = entry.path();
        let is_html = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("html" | "htm")
        );
        if entry.file_type().is_file() && is_html {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Write `contents` to `path`, creating parent directories
pub(crate) fn write_output(path: &Path, contents: &str) -> Result<()> {
    poster_editor::write_export(path, contents)
        .with_context(|| format!("Cannot write {}", path.display()))
}
