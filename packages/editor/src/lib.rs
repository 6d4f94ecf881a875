//! # Poster Editor
//!
//! Headless editing engine for single-page HTML posters.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: markup → element tree → markup      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ sanitizer: strip scripts, handlers, URLs    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: live document + edit session        │
//! │  - Identity assignment (data-id)            │
//! │  - Selection, drag, inline text editing     │
//! │  - Toolbar mutations                        │
//! │  - Snapshot undo/redo                       │
//! │  - Export as standalone HTML                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Markup is the state**: history snapshots and exports are plain HTML
//! 2. **Untrusted input**: imported and typed markup is always sanitized
//! 3. **Identity addressing**: elements are found by `data-id`, never held
//! 4. **One gateway**: hosts only talk to [`EditSession`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use poster_editor::{EditSession, EditorConfig, NodePath};
//!
//! let mut session = EditSession::new(EditorConfig::default());
//! session.mount(STARTER_POSTER);
//!
//! // Drag the headline 60px right
//! session.pointer_down(&NodePath(vec![0, 0]), 100.0, 100.0);
//! session.pointer_move(160.0, 100.0);
//! session.pointer_up();
//!
//! session.undo();
//! let html = session.export_document();
//! ```

mod config;
mod document;
mod drag;
mod errors;
mod events;
mod history;
mod hit_test;
mod identity;
mod io;
mod mutations;
mod selection;
mod session;
mod text_edit;

pub use config::EditorConfig;
pub use document::EditableDocument;
pub use drag::{format_px, position_mode, DragState};
pub use errors::EditorError;
pub use events::{EditorEvent, KeyCommand, KeyEvent, KeyResponse, NoopReason, Outcome};
pub use history::{History, Snapshot, SnapshotTarget};
pub use hit_test::{apply_outline, nearest_identified, target_element};
pub use identity::{assign_identities, next_free_id, IdGenerator, IDENTITY_ATTR};
pub use io::{export_document, read_html, write_export, DEFAULT_EXPORT_FILE, GENERATOR_ATTR};
pub use mutations::{ElementPatch, Mutation, MutationError, MutationResult};
pub use selection::SelectionState;
pub use session::{EditSession, ElementInfo, Gesture};
pub use text_edit::{TextEditState, EDITABLE_ATTR};

// Re-export common types for convenience
pub use poster_parser::ast::{Document, Element, NodePath};

/// Poster loaded when a host has nothing else to show
pub const STARTER_POSTER: &str = r#"<div class="poster" style="width:720px;height:720px;position:relative;background:#f3f4f6;font-family:sans-serif;"><h1 style="position:absolute;top:80px;left:40px;font-size:48px;font-weight:bold;color:#111827">Summer Sale</h1><p style="position:absolute;top:160px;left:40px;font-size:20px;color:#374151">Up to <strong>50% off</strong> on select items!</p><img style="position:absolute;bottom:0;right:0;width:380px;height:380px;object-fit:cover;border-top-left-radius:16px" src="https://images.unsplash.com/photo-1520975922284-7bcd4290b0e1?q=80&w=1200&auto=format&fit=crop"/></div>"#;
