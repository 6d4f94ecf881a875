//! Inline text editing
//!
//! A double-click on a text-bearing element marks it editable. Typed markup
//! replaces its children; losing focus clears the marker and commits.

use poster_parser::ast::{is_raw_text_element, Element};
use poster_parser::parse_fragment;
use poster_sanitizer::Sanitizer;

/// Marker attribute toggled while an element is being edited
pub const EDITABLE_ATTR: &str = "contenteditable";

/// An active inline text edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditState {
    /// Identity of the element being edited
    pub id: String,
}

impl TextEditState {
    /// Mark `element` editable
    pub fn begin(element: &mut Element, id: impl Into<String>) -> Self {
        element.set_attr(EDITABLE_ATTR, "true");
        Self { id: id.into() }
    }

    /// Replace the element's content with sanitized `html`. Raw-text
    /// elements (`style`, `script`) are left untouched and yield false.
    pub fn set_content(element: &mut Element, sanitizer: &Sanitizer, html: &str) -> bool {
        if is_raw_text_element(&element.tag) {
            return false;
        }
        element.children = sanitizer.clean_nodes(parse_fragment(html), &mut Vec::new());
        true
    }

    /// Clear the editable marker
    pub fn finish(element: &mut Element) {
        element.set_attr(EDITABLE_ATTR, "false");
    }
}
