//! # Toolbar Mutations
//!
//! Structural operations requested by the properties panel and toolbar.
//!
//! ## Mutation Semantics
//!
//! ### AddTextBlock / AddImageBlock
//! - Appends an absolutely positioned block at the end of the body
//! - The new element gets a fresh identity immediately
//!
//! ### RemoveElement
//! - Removes the element and all descendants
//! - The body itself cannot be removed
//!
//! ### PatchElement
//! - `text` replaces the inner markup (sanitized) of non-void elements;
//!   raw-text elements (`style`, `script`) keep their content
//! - `src`/`alt` are set as attributes; unsafe URLs are skipped

use crate::config::EditorConfig;
use crate::document::EditableDocument;
use crate::identity::{next_free_id, IDENTITY_ATTR};
use poster_parser::ast::{is_raw_text_element, Attribute, Element, Node};
use poster_parser::parse_fragment;
use poster_sanitizer::Sanitizer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const TEXT_BLOCK_STYLE: &str =
    "position: absolute; left: 40px; top: 40px; font-size: 16px; color: #111827; cursor: move;";

const IMAGE_BLOCK_STYLE: &str =
    "position: absolute; left: 60px; top: 60px; width: 200px; height: 200px; object-fit: cover;";

/// Content and attribute changes for one element
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    /// New inner markup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ElementPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn image(src: Option<String>, alt: Option<String>) -> Self {
        Self {
            text: None,
            src,
            alt,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.src.is_none() && self.alt.is_none()
    }
}

/// Toolbar operations on the live document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a text block
    AddTextBlock { text: String },

    /// Append an image block
    AddImageBlock { src: String },

    /// Remove an element and its subtree
    RemoveElement { id: String },

    /// Change an element's content or image attributes
    PatchElement { id: String, patch: ElementPatch },
}

/// What a successful mutation touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationResult {
    Inserted { id: String },
    Removed { id: String },
    Updated { id: String },
}

impl MutationResult {
    /// Identity of the affected element
    pub fn id(&self) -> &str {
        match self {
            MutationResult::Inserted { id }
            | MutationResult::Removed { id }
            | MutationResult::Updated { id } => id,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("The document body cannot be removed")]
    CannotRemoveBody,
}

impl Mutation {
    /// Apply to `doc`. The caller commits the result to history.
    pub fn apply(
        &self,
        doc: &mut EditableDocument,
        sanitizer: &Sanitizer,
    ) -> Result<MutationResult, MutationError> {
        let result = match self {
            Mutation::AddTextBlock { text } => {
                let block = Element::new("div")
                    .with_attr("style", TEXT_BLOCK_STYLE)
                    .with_text(text.as_str());
                append_block(doc, block)
            }

            Mutation::AddImageBlock { src } => {
                let mut block = Element::new("img");
                let src = Attribute::new("src", src.as_str());
                if sanitizer.allows_attribute("img", &src) {
                    block.attributes.push(src);
                }
                block.set_attr("style", IMAGE_BLOCK_STYLE);
                append_block(doc, block)
            }

            Mutation::RemoveElement { id } => {
                if doc.is_body(id) {
                    return Err(MutationError::CannotRemoveBody);
                }
                let path = doc
                    .find(id)
                    .ok_or_else(|| MutationError::ElementNotFound(id.clone()))?;
                match doc.body_mut().remove_at(&path) {
                    Some(Node::Element(_)) => MutationResult::Removed { id: id.clone() },
                    _ => return Err(MutationError::ElementNotFound(id.clone())),
                }
            }

            Mutation::PatchElement { id, patch } => {
                let element = doc
                    .element_mut(id)
                    .ok_or_else(|| MutationError::ElementNotFound(id.clone()))?;
                apply_patch(element, patch, sanitizer);
                doc.assign_identities();
                MutationResult::Updated { id: id.clone() }
            }
        };

        doc.mark_edited();
        Ok(result)
    }

    /// Default text block from configuration
    pub fn text_block(config: &EditorConfig, text: Option<&str>) -> Self {
        Mutation::AddTextBlock {
            text: text.unwrap_or(config.default_block_text.as_str()).to_string(),
        }
    }

    /// Default image block from configuration
    pub fn image_block(config: &EditorConfig, src: Option<&str>) -> Self {
        Mutation::AddImageBlock {
            src: src.unwrap_or(config.placeholder_image.as_str()).to_string(),
        }
    }
}

fn append_block(doc: &mut EditableDocument, mut block: Element) -> MutationResult {
    let id = next_free_id(doc.body());
    block.set_attr(IDENTITY_ATTR, id.as_str());
    doc.body_mut().children.push(Node::Element(block));
    MutationResult::Inserted { id }
}

fn apply_patch(element: &mut Element, patch: &ElementPatch, sanitizer: &Sanitizer) {
    if let Some(text) = &patch.text {
        if element.is_void() || is_raw_text_element(&element.tag) {
            tracing::debug!(tag = %element.tag, "ignoring text for element without markup content");
        } else {
            element.children = sanitizer.clean_nodes(parse_fragment(text), &mut Vec::new());
        }
    }

    for (name, value) in [("src", &patch.src), ("alt", &patch.alt)] {
        let Some(value) = value else {
            continue;
        };
        let attr = Attribute::new(name, value.as_str());
        if sanitizer.allows_attribute(&element.tag, &attr) {
            element.set_attr(attr.name, attr.value);
        } else {
            tracing::debug!(tag = %element.tag, attribute = name, "skipping unsafe attribute");
        }
    }
}
