//! # Editable Document
//!
//! The live poster: a parsed HTML document whose body is the editing
//! surface.
//!
//! ## Lifecycle
//!
//! ```text
//! Import → Sanitize → Assign ids → Edit → Commit → Export
//!    ↓         ↓           ↓          ↓       ↓        ↓
//!  Markup   Fragment    Body tree   Live   Snapshot  Markup
//! ```
//!
//! Every element of the body carries a unique `data-id` after any full
//! replacement of the body (mount, import, undo, redo).

use crate::history::{Snapshot, SnapshotTarget};
use crate::identity::{assign_identities, IDENTITY_ATTR};
use poster_parser::ast::{Document, Element, NodePath};
use poster_parser::{inner_html, parse_fragment};
use poster_sanitizer::Sanitizer;

/// Live editing surface
#[derive(Debug, Clone)]
pub struct EditableDocument {
    /// Rendered document (body is the editable content)
    document: Document,

    /// Current version number (increments on each change)
    version: u64,

    /// Live changes made since the last commit
    dirty: bool,
}

impl EditableDocument {
    /// Build a document from untrusted body markup
    pub fn from_html(sanitizer: &Sanitizer, html: &str) -> Self {
        let mut doc = Self {
            document: Document::new(),
            version: 0,
            dirty: false,
        };
        doc.load_html(sanitizer, html);
        doc.version = 0;
        doc
    }

    /// Replace the whole body with sanitized `html`
    pub fn load_html(&mut self, sanitizer: &Sanitizer, html: &str) {
        let children = sanitizer.clean_nodes(parse_fragment(html), &mut Vec::new());
        self.document = Document::with_body(children);
        self.assign_identities();
        self.version += 1;
        self.dirty = false;
    }

    /// Replace the body's children with trusted markup (a snapshot)
    pub fn replace_body(&mut self, html: &str) {
        self.document.body.children = parse_fragment(html);
        self.assign_identities();
        self.version += 1;
        self.dirty = false;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn body(&self) -> &Element {
        &self.document.body
    }

    /// Mutable body. Callers report the change with one of the `mark_*`
    /// methods.
    pub fn body_mut(&mut self) -> &mut Element {
        &mut self.document.body
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Check if there are changes not yet committed to history
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Serialized children of the body
    pub fn body_html(&self) -> String {
        inner_html(&self.document.body)
    }

    /// Record a content change that should reach history on commit
    pub fn mark_edited(&mut self) {
        self.version += 1;
        self.dirty = true;
    }

    /// Record a presentational change (selection outline)
    pub fn mark_changed(&mut self) {
        self.version += 1;
    }

    /// The live state now matches the latest snapshot
    pub fn mark_committed(&mut self) {
        self.dirty = false;
    }

    /// Give identities to elements that lack one. Returns how many were
    /// assigned.
    pub fn assign_identities(&mut self) -> usize {
        assign_identities(&mut self.document.body)
    }

    /// Path of the element with identity `id`
    pub fn find(&self, id: &str) -> Option<NodePath> {
        self.document
            .body
            .find_path(|el| el.attr(IDENTITY_ATTR) == Some(id))
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        let path = self.find(id)?;
        self.document.body.element_at(&path)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        let path = self.find(id)?;
        self.document.body.element_at_mut(&path)
    }

    /// Check if `id` names the body itself
    pub fn is_body(&self, id: &str) -> bool {
        self.document.body.attr(IDENTITY_ATTR) == Some(id)
    }
}

impl SnapshotTarget for EditableDocument {
    fn capture(&self) -> Snapshot {
        Snapshot::new(self.body_html())
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        self.replace_body(snapshot.as_str());
    }

    fn has_uncommitted_changes(&self, _committed: &Snapshot) -> bool {
        self.dirty
    }
}
