//! Export and file helpers

use crate::EditorError;
use poster_parser::ast::{Document, Element, Node};
use poster_parser::Serializer;
use std::fs;
use std::path::Path;

/// File name offered for downloads
pub const DEFAULT_EXPORT_FILE: &str = "poster.html";

/// Attribute of the provenance meta tag added on export
pub const GENERATOR_ATTR: &str = "data-generated-by";

/// Full standalone document: `<!doctype html>`, a newline, then the
/// document's outer HTML with a provenance meta tag appended to `<head>`.
/// The live document is not modified.
pub fn export_document(doc: &Document, generator: &str) -> String {
    let mut exported = doc.clone();
    exported
        .head
        .children
        .push(Node::Element(Element::new("meta").with_attr(GENERATOR_ATTR, generator)));

    format!("<!doctype html>\n{}", Serializer::new().serialize_html(&exported))
}

pub fn read_html(path: &Path) -> Result<String, EditorError> {
    Ok(fs::read_to_string(path)?)
}

/// Write exported markup, creating parent directories as needed
pub fn write_export(path: &Path, html: &str) -> Result<(), EditorError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, html)?;
    Ok(())
}
