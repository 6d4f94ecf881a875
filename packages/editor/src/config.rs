//! Editor configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use crate::EditorError;
use poster_parser::ast::is_raw_text_element;
use serde::{Deserialize, Serialize};

/// Tunables for an editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Tags that enter inline text editing on double-click
    #[serde(default = "default_text_tags")]
    pub text_tags: Vec<String>,

    /// Outline declaration applied to the clicked element
    #[serde(default = "default_outline")]
    pub outline: String,

    /// Value of the `data-generated-by` meta tag added on export
    #[serde(default = "default_generator")]
    pub generator: String,

    /// Maximum undo levels (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    /// Image source used when a new image block has none
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,

    /// Text of a new text block when none is given
    #[serde(default = "default_block_text")]
    pub default_block_text: String,
}

fn default_text_tags() -> Vec<String> {
    ["p", "h1", "h2", "h3", "div", "span", "strong", "em"]
        .iter()
        .map(|tag| tag.to_string())
        .collect()
}

fn default_outline() -> String {
    "3px solid rgba(59,130,246,0.6)".to_string()
}

fn default_generator() -> String {
    "editable-html-poster".to_string()
}

fn default_placeholder_image() -> String {
    "/placeholder.png".to_string()
}

fn default_block_text() -> String {
    "New Text".to_string()
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Raw-text tags never qualify, whatever the config lists
    pub fn is_text_tag(&self, tag: &str) -> bool {
        if is_raw_text_element(&tag.to_ascii_lowercase()) {
            return false;
        }
        self.text_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            text_tags: default_text_tags(),
            outline: default_outline(),
            generator: default_generator(),
            history_limit: 0,
            placeholder_image: default_placeholder_image(),
            default_block_text: default_block_text(),
        }
    }
}
