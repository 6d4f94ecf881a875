//! # Edit Session
//!
//! The single gateway between a host (browser binding, CLI script) and the
//! live poster. Every input goes through one method here and yields an
//! [`Outcome`].
//!
//! ## Gestures
//!
//! ```text
//!          pointer_down(identified)            pointer_up
//!   Idle ─────────────────────────▶ Dragging ─────────────▶ Idle + commit
//!    │
//!    │ double_click(text tag)                    blur
//!    └────────────────────────────▶ Editing ──────────────▶ Idle + commit
//! ```
//!
//! Only one gesture is active at a time. Starting a drag or a toolbar
//! operation while text editing first finishes the text edit, as losing
//! focus would in a browser. Undo, redo and import reset the gesture.
//!
//! Elements are tracked by identity, never by reference, so a gesture
//! survives structural edits elsewhere in the tree.

use crate::config::EditorConfig;
use crate::document::EditableDocument;
use crate::drag::DragState;
use crate::events::{EditorEvent, KeyCommand, KeyEvent, KeyResponse, NoopReason, Outcome};
use crate::history::{History, SnapshotTarget};
use crate::hit_test::{apply_outline, nearest_identified, target_element};
use crate::identity::IDENTITY_ATTR;
use crate::io::export_document;
use crate::mutations::{ElementPatch, Mutation, MutationError};
use crate::selection::SelectionState;
use crate::text_edit::TextEditState;
use poster_parser::ast::NodePath;
use poster_parser::inner_html;
use poster_sanitizer::Sanitizer;
use serde::Serialize;
use tracing::{debug, info};

/// Pointer or keyboard interaction in progress
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragState),
    Editing(TextEditState),
}

/// What the properties panel shows for one element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    pub id: String,
    pub tag_name: String,
    /// Inner markup, absent for images
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Editing state for one mounted poster
#[derive(Debug)]
pub struct EditSession {
    config: EditorConfig,
    sanitizer: Sanitizer,

    /// Live document (None until mounted)
    surface: Option<EditableDocument>,

    selection: SelectionState,
    history: History,
    gesture: Gesture,
}

fn noop(reason: NoopReason) -> Outcome {
    debug!(?reason, "event ignored");
    Outcome::Noop { reason }
}

impl EditSession {
    pub fn new(config: EditorConfig) -> Self {
        let history = History::with_max_levels(config.history_limit);
        Self {
            config,
            sanitizer: Sanitizer::new(),
            surface: None,
            selection: SelectionState::new(),
            history,
            gesture: Gesture::Idle,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn document(&self) -> Option<&EditableDocument> {
        self.surface.as_ref()
    }

    /// Current body markup
    pub fn body_html(&self) -> Option<String> {
        self.surface.as_ref().map(EditableDocument::body_html)
    }

    pub fn version(&self) -> Option<u64> {
        self.surface.as_ref().map(EditableDocument::version)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    // ---- Lifecycle -------------------------------------------------------

    /// Sanitize `html` into a fresh editing surface and record the baseline
    pub fn mount(&mut self, html: &str) -> Outcome {
        let surface = EditableDocument::from_html(&self.sanitizer, html);
        info!(elements = count_identified(&surface), "mounted poster");
        self.surface = Some(surface);
        self.reset();
        self.commit_with(None)
    }

    pub fn unmount(&mut self) {
        self.surface = None;
        self.reset();
    }

    /// Replace the body of the mounted document with sanitized `html`.
    /// Clears selection and history; the imported state is the new baseline.
    pub fn import_document(&mut self, html: &str) -> Outcome {
        let Some(surface) = self.surface.as_mut() else {
            return noop(NoopReason::NotMounted);
        };
        surface.load_html(&self.sanitizer, html);
        info!(version = surface.version(), "imported poster");
        self.reset();
        self.commit_with(None)
    }

    /// Standalone HTML file for the current state, or None before mount
    pub fn export_document(&self) -> Option<String> {
        let surface = self.surface.as_ref()?;
        info!(version = surface.version(), "exporting poster");
        Some(export_document(surface.document(), &self.config.generator))
    }

    /// Record the live state as a snapshot
    pub fn commit(&mut self) -> Outcome {
        self.commit_with(None)
    }

    fn commit_with(&mut self, target: Option<String>) -> Outcome {
        let Some(surface) = self.surface.as_mut() else {
            return noop(NoopReason::NotMounted);
        };
        surface.mark_committed();
        self.history.push(surface.capture());

        let version = surface.version();
        debug!(version, undo_levels = self.history.undo_levels(), "snapshot committed");
        Outcome::Committed { version, target }
    }

    fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.selection.clear();
        self.history.clear();
    }

    // ---- Selection -------------------------------------------------------

    /// Select `id` (or nothing) and move the outline to it
    pub fn select(&mut self, id: Option<String>) -> Outcome {
        let Some(surface) = self.surface.as_mut() else {
            return noop(NoopReason::NotMounted);
        };
        self.selection.select(id);
        apply_outline(surface.body_mut(), self.selection.current(), &self.config.outline);
        surface.mark_changed();

        Outcome::Applied {
            version: surface.version(),
            target: self.selection.current().map(str::to_string),
        }
    }

    /// Select the nearest identified element at or above `target`
    pub fn click(&mut self, target: &NodePath) -> Outcome {
        let Some(surface) = self.surface.as_ref() else {
            return noop(NoopReason::NotMounted);
        };
        if target_element(surface.body(), target).is_none() {
            return noop(NoopReason::MissingTarget);
        }
        let id = nearest_identified(surface.body(), target).map(|(_, id)| id);
        debug!(?id, "click");
        self.select(id)
    }

    // ---- Drag ------------------------------------------------------------

    /// Start dragging `target`, which must itself carry an identity
    pub fn pointer_down(&mut self, target: &NodePath, x: f64, y: f64) -> Outcome {
        let Some(surface) = self.surface.as_ref() else {
            return noop(NoopReason::NotMounted);
        };
        if !x.is_finite() || !y.is_finite() {
            return noop(NoopReason::InvalidPointer);
        }
        let Some(path) = target_element(surface.body(), target) else {
            return noop(NoopReason::MissingTarget);
        };
        let Some(id) = surface
            .body()
            .element_at(&path)
            .and_then(|el| el.attr(IDENTITY_ATTR))
            .map(str::to_string)
        else {
            return noop(NoopReason::NotIdentified);
        };

        if let Gesture::Editing(edit) = &self.gesture {
            let inside = surface
                .find(&edit.id)
                .map_or(false, |edited| path.0.starts_with(&edited.0));
            if inside {
                return noop(NoopReason::EditingText);
            }
            self.blur();
        }
        if let Gesture::Dragging(previous) = &self.gesture {
            debug!(id = %previous.id, "abandoning unfinished drag");
        }

        let Some(surface) = self.surface.as_mut() else {
            return noop(NoopReason::NotMounted);
        };
        let Some(element) = surface.body_mut().element_at_mut(&path) else {
            return noop(NoopReason::MissingTarget);
        };
        let drag = DragState::begin(element, id.as_str(), x, y);
        surface.mark_edited();
        let version = surface.version();

        debug!(id = %id, x, y, "drag started");
        self.gesture = Gesture::Dragging(drag);
        Outcome::Applied {
            version,
            target: Some(id),
        }
    }

    /// Move the dragged element by the pointer delta since pointer down
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Outcome {
        if self.surface.is_none() {
            return noop(NoopReason::NotMounted);
        }
        let Gesture::Dragging(drag) = &self.gesture else {
            return noop(NoopReason::NoActiveGesture);
        };
        let drag = drag.clone();
        if !x.is_finite() || !y.is_finite() {
            return noop(NoopReason::InvalidPointer);
        }

        let Some(surface) = self.surface.as_mut() else {
            return noop(NoopReason::NotMounted);
        };
        let Some(element) = surface.element_mut(&drag.id) else {
            self.gesture = Gesture::Idle;
            return noop(NoopReason::MissingTarget);
        };
        let (left, top) = drag.update(element, x, y);
        surface.mark_edited();

        debug!(id = %drag.id, left, top, "dragging");
        Outcome::Applied {
            version: surface.version(),
            target: Some(drag.id),
        }
    }

    /// Finish the drag and commit
    pub fn pointer_up(&mut self) -> Outcome {
        if self.surface.is_none() {
            return noop(NoopReason::NotMounted);
        }
        match std::mem::take(&mut self.gesture) {
            Gesture::Dragging(drag) => {
                debug!(id = %drag.id, "drag finished");
                self.commit_with(Some(drag.id))
            }
            other => {
                self.gesture = other;
                noop(NoopReason::NoActiveGesture)
            }
        }
    }

    // ---- Inline text -----------------------------------------------------

    /// Enter text editing on `target` when its tag takes inline text
    pub fn double_click(&mut self, target: &NodePath) -> Outcome {
        let Some(surface) = self.surface.as_ref() else {
            return noop(NoopReason::NotMounted);
        };
        let Some(path) = target_element(surface.body(), target) else {
            return noop(NoopReason::MissingTarget);
        };
        let Some(element) = surface.body().element_at(&path) else {
            return noop(NoopReason::MissingTarget);
        };
        if !self.config.is_text_tag(&element.tag) {
            return noop(NoopReason::NotTextBearing);
        }
        let Some(id) = element.attr(IDENTITY_ATTR).map(str::to_string) else {
            return noop(NoopReason::NotIdentified);
        };

        if let Gesture::Editing(edit) = &self.gesture {
            if edit.id == id {
                return noop(NoopReason::EditingText);
            }
            self.blur();
        }
        if let Gesture::Dragging(previous) = &self.gesture {
            debug!(id = %previous.id, "abandoning unfinished drag");
        }

        let Some(surface) = self.surface.as_mut() else {
            return noop(NoopReason::NotMounted);
        };
        let Some(element) = surface.body_mut().element_at_mut(&path) else {
            return noop(NoopReason::MissingTarget);
        };
        let edit = TextEditState::begin(element, id.as_str());
        surface.mark_edited();
        let version = surface.version();

        debug!(id = %id, "text edit started");
        self.gesture = Gesture::Editing(edit);
        Outcome::Applied {
            version,
            target: Some(id),
        }
    }

    /// Replace the content of the element being edited
    pub fn input(&mut self, html: &str) -> Outcome {
        if self.surface.is_none() {
            return noop(NoopReason::NotMounted);
        }
        let Gesture::Editing(edit) = &self.gesture else {
            return noop(NoopReason::NoActiveGesture);
        };
        let id = edit.id.clone();

        let Some(surface) = self.surface.as_mut() else {
            return noop(NoopReason::NotMounted);
        };
        let Some(element) = surface.element_mut(&id) else {
            self.gesture = Gesture::Idle;
            return noop(NoopReason::MissingTarget);
        };
        if !TextEditState::set_content(element, &self.sanitizer, html) {
            return noop(NoopReason::NotTextBearing);
        }
        surface.assign_identities();
        surface.mark_edited();

        Outcome::Applied {
            version: surface.version(),
            target: Some(id),
        }
    }

    /// Leave text editing and commit
    pub fn blur(&mut self) -> Outcome {
        if self.surface.is_none() {
            return noop(NoopReason::NotMounted);
        }
        let id = match &self.gesture {
            Gesture::Editing(edit) => edit.id.clone(),
            _ => return noop(NoopReason::NoActiveGesture),
        };
        self.gesture = Gesture::Idle;

        let Some(surface) = self.surface.as_mut() else {
            return noop(NoopReason::NotMounted);
        };
        let Some(element) = surface.element_mut(&id) else {
            return noop(NoopReason::MissingTarget);
        };
        TextEditState::finish(element);
        surface.mark_edited();

        debug!(id = %id, "text edit finished");
        self.commit_with(Some(id))
    }

    // ---- Toolbar ---------------------------------------------------------

    pub fn add_text_block(&mut self, text: Option<&str>) -> Outcome {
        let mutation = Mutation::text_block(&self.config, text);
        self.apply_mutation(mutation)
    }

    pub fn add_image_block(&mut self, src: Option<&str>) -> Outcome {
        let mutation = Mutation::image_block(&self.config, src);
        self.apply_mutation(mutation)
    }

    /// Remove the selected element and clear the selection
    pub fn delete_selected(&mut self) -> Outcome {
        if self.surface.is_none() {
            return noop(NoopReason::NotMounted);
        }
        let Some(id) = self.selection.current().map(str::to_string) else {
            return noop(NoopReason::NothingSelected);
        };
        let outcome = self.apply_mutation(Mutation::RemoveElement { id });
        if !outcome.is_noop() {
            self.selection.clear();
        }
        outcome
    }

    pub fn set_attributes(&mut self, id: &str, patch: ElementPatch) -> Outcome {
        self.apply_mutation(Mutation::PatchElement {
            id: id.to_string(),
            patch,
        })
    }

    fn apply_mutation(&mut self, mutation: Mutation) -> Outcome {
        if self.surface.is_none() {
            return noop(NoopReason::NotMounted);
        }
        if matches!(self.gesture, Gesture::Editing(_)) {
            self.blur();
        }

        let Some(surface) = self.surface.as_mut() else {
            return noop(NoopReason::NotMounted);
        };
        match mutation.apply(surface, &self.sanitizer) {
            Ok(result) => {
                debug!(id = result.id(), ?mutation, "mutation applied");
                self.forget_missing_targets();
                self.commit_with(Some(result.id().to_string()))
            }
            Err(MutationError::ElementNotFound(id)) => {
                debug!(id = %id, "mutation target not found");
                noop(NoopReason::MissingTarget)
            }
            Err(MutationError::CannotRemoveBody) => noop(NoopReason::BodyNotRemovable),
        }
    }

    /// Drop a gesture or selection whose element is gone
    fn forget_missing_targets(&mut self) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };

        let gesture_id = match &self.gesture {
            Gesture::Dragging(drag) => Some(drag.id.as_str()),
            Gesture::Editing(edit) => Some(edit.id.as_str()),
            Gesture::Idle => None,
        };
        if let Some(id) = gesture_id {
            if surface.find(id).is_none() {
                debug!(id, "gesture target removed");
                self.gesture = Gesture::Idle;
            }
        }

        if let Some(id) = self.selection.current() {
            if surface.find(id).is_none() {
                debug!(id, "selected element removed");
                self.selection.clear();
            }
        }
    }

    /// Properties of the element with identity `id`
    pub fn inspect(&self, id: &str) -> Option<ElementInfo> {
        let element = self.surface.as_ref()?.element(id)?;
        let is_image = element.tag == "img";

        Some(ElementInfo {
            id: id.to_string(),
            tag_name: element.tag.clone(),
            html: (!is_image).then(|| inner_html(element)),
            src: element.attr("src").map(str::to_string),
            alt: element.attr("alt").map(str::to_string),
        })
    }

    /// Properties of the selected element
    pub fn selected_info(&self) -> Option<ElementInfo> {
        self.inspect(self.selection.current()?)
    }

    // ---- History ---------------------------------------------------------

    pub fn undo(&mut self) -> Outcome {
        self.navigate(KeyCommand::Undo)
    }

    pub fn redo(&mut self) -> Outcome {
        self.navigate(KeyCommand::Redo)
    }

    fn navigate(&mut self, command: KeyCommand) -> Outcome {
        if self.surface.is_none() {
            return noop(NoopReason::NotMounted);
        }
        if matches!(self.gesture, Gesture::Editing(_)) {
            self.blur();
        }
        if let Gesture::Dragging(drag) = &self.gesture {
            debug!(id = %drag.id, "abandoning unfinished drag");
        }
        self.gesture = Gesture::Idle;

        let Some(surface) = self.surface.as_mut() else {
            return noop(NoopReason::NotMounted);
        };
        let moved = match command {
            KeyCommand::Undo => self.history.undo(surface),
            KeyCommand::Redo => self.history.redo(surface),
        };
        if !moved {
            return noop(NoopReason::EmptyHistory);
        }

        let version = surface.version();
        debug!(
            ?command,
            version,
            undo_levels = self.history.undo_levels(),
            redo_levels = self.history.redo_levels(),
            "history navigation"
        );
        Outcome::Applied {
            version,
            target: None,
        }
    }

    /// Handle a key press. Undo/redo shortcuts ask the host to suppress the
    /// default action even when there is nothing to undo.
    pub fn key(&mut self, event: &KeyEvent) -> KeyResponse {
        if self.surface.is_none() {
            return KeyResponse {
                prevent_default: false,
                outcome: noop(NoopReason::NotMounted),
            };
        }
        match event.command() {
            Some(command) => KeyResponse {
                prevent_default: true,
                outcome: self.navigate(command),
            },
            None => KeyResponse {
                prevent_default: false,
                outcome: noop(NoopReason::UnhandledKey),
            },
        }
    }

    /// Route one event to its handler
    pub fn dispatch(&mut self, event: EditorEvent) -> Outcome {
        match event {
            EditorEvent::Click { target } => self.click(&target),
            EditorEvent::PointerDown { target, x, y } => self.pointer_down(&target, x, y),
            EditorEvent::PointerMove { x, y } => self.pointer_move(x, y),
            EditorEvent::PointerUp => self.pointer_up(),
            EditorEvent::DoubleClick { target } => self.double_click(&target),
            EditorEvent::Input { html } => self.input(&html),
            EditorEvent::Blur => self.blur(),
            EditorEvent::Key(key) => self.key(&key).outcome,
            EditorEvent::Select { id } => self.select(id),
            EditorEvent::AddTextBlock { text } => self.add_text_block(text.as_deref()),
            EditorEvent::AddImageBlock { src } => self.add_image_block(src.as_deref()),
            EditorEvent::DeleteSelected => self.delete_selected(),
            EditorEvent::SetAttributes { id, patch } => self.set_attributes(&id, patch),
            EditorEvent::Undo => self.undo(),
            EditorEvent::Redo => self.redo(),
            EditorEvent::Commit => self.commit(),
            EditorEvent::Import { html } => self.import_document(&html),
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

fn count_identified(surface: &EditableDocument) -> usize {
    let mut count = 0;
    surface.body().walk(&mut |el| {
        if el.has_attr(IDENTITY_ATTR) {
            count += 1;
        }
    });
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(html: &str) -> EditSession {
        let mut session = EditSession::default();
        session.mount(html);
        session
    }

    #[test]
    fn test_mount_records_baseline() {
        let session = mounted("<p>x</p>");

        assert!(session.is_mounted());
        assert_eq!(session.history().undo_levels(), 1);
        assert_eq!(session.body_html().unwrap(), r#"<p data-id="el-1">x</p>"#);
    }

    #[test]
    fn test_pointer_down_inside_text_edit_places_caret() {
        let mut session = mounted("<p>Up to <strong>50%</strong></p><h1>Sale</h1>");
        session.double_click(&NodePath(vec![0]));

        let outcome = session.pointer_down(&NodePath(vec![0, 1]), 5.0, 5.0);
        assert_eq!(
            outcome,
            Outcome::Noop {
                reason: NoopReason::EditingText
            }
        );
        assert!(matches!(session.gesture(), Gesture::Editing(_)));
    }

    #[test]
    fn test_pointer_down_elsewhere_commits_text_edit() {
        let mut session = mounted("<p>a</p><h1>b</h1>");
        session.double_click(&NodePath(vec![0]));

        let outcome = session.pointer_down(&NodePath(vec![1]), 0.0, 0.0);
        assert_eq!(outcome.target(), Some("el-2"));
        assert!(matches!(session.gesture(), Gesture::Dragging(_)));
        assert_eq!(session.history().undo_levels(), 2);
        assert_eq!(
            session.document().unwrap().element("el-1").unwrap().attr("contenteditable"),
            Some("false")
        );
    }

    #[test]
    fn test_double_click_requires_text_tag() {
        let mut session = mounted(r#"<img src="/a.png">"#);

        assert_eq!(
            session.double_click(&NodePath(vec![0])),
            Outcome::Noop {
                reason: NoopReason::NotTextBearing
            }
        );
        assert_eq!(session.gesture(), &Gesture::Idle);
    }

    #[test]
    fn test_invalid_pointer_is_ignored() {
        let mut session = mounted("<p>a</p>");

        assert_eq!(
            session.pointer_down(&NodePath(vec![0]), f64::NAN, 0.0),
            Outcome::Noop {
                reason: NoopReason::InvalidPointer
            }
        );
    }

    #[test]
    fn test_body_cannot_be_deleted() {
        let mut session = mounted("<p>a</p>");
        session.click(&NodePath::root());
        assert_eq!(session.selected_id(), Some("el-0"));

        assert_eq!(
            session.delete_selected(),
            Outcome::Noop {
                reason: NoopReason::BodyNotRemovable
            }
        );
        assert_eq!(session.selected_id(), Some("el-0"));
    }
}
