//! Host input events and session outcomes
//!
//! Events are plain data so hosts (the CLI's edit scripts, the wasm
//! binding) can feed them as JSON:
//!
//! ```json
//! {"type": "pointerDown", "target": [0, 1], "x": 100, "y": 100}
//! {"type": "key", "key": "z", "ctrl": true}
//! ```

use crate::mutations::ElementPatch;
use poster_parser::ast::NodePath;
use serde::{Deserialize, Serialize};

/// One input to an editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    Click {
        target: NodePath,
    },
    PointerDown {
        target: NodePath,
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    DoubleClick {
        target: NodePath,
    },
    /// New inner markup of the element being text-edited
    Input {
        html: String,
    },
    Blur,
    Key(KeyEvent),
    Select {
        #[serde(default)]
        id: Option<String>,
    },
    AddTextBlock {
        #[serde(default)]
        text: Option<String>,
    },
    AddImageBlock {
        #[serde(default)]
        src: Option<String>,
    },
    DeleteSelected,
    SetAttributes {
        id: String,
        patch: ElementPatch,
    },
    Undo,
    Redo,
    Commit,
    Import {
        html: String,
    },
}

/// A key press with its modifier state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub shift: bool,
}

/// History shortcut bound to a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyCommand {
    Undo,
    Redo,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl/Cmd+Z undoes, Ctrl/Cmd+Y redoes. Letter case is ignored.
    pub fn command(&self) -> Option<KeyCommand> {
        if !(self.ctrl || self.meta) {
            return None;
        }
        match self.key.to_ascii_lowercase().as_str() {
            "z" => Some(KeyCommand::Undo),
            "y" => Some(KeyCommand::Redo),
            _ => None,
        }
    }
}

/// Why an event changed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoopReason {
    /// No document is mounted
    NotMounted,
    /// The target does not exist in the live document
    MissingTarget,
    /// The target carries no identity
    NotIdentified,
    /// Double-click on an element that does not take inline text
    NotTextBearing,
    /// Pointer or text input with no gesture in progress
    NoActiveGesture,
    /// Pointer down inside the element being text-edited
    EditingText,
    /// Non-finite pointer coordinates
    InvalidPointer,
    /// Nothing to undo or redo
    EmptyHistory,
    /// Delete with no selection
    NothingSelected,
    /// The body is the editing surface and cannot be deleted
    BodyNotRemovable,
    /// Key press without a bound shortcut
    UnhandledKey,
}

/// Result of one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Outcome {
    /// The live document changed and a snapshot was recorded
    Committed {
        version: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
    /// The live document or session state changed without a snapshot
    Applied {
        version: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
    Noop {
        reason: NoopReason,
    },
}

impl Outcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, Outcome::Noop { .. })
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed { .. })
    }

    /// Identity of the element the event acted on
    pub fn target(&self) -> Option<&str> {
        match self {
            Outcome::Committed { target, .. } | Outcome::Applied { target, .. } => {
                target.as_deref()
            }
            Outcome::Noop { .. } => None,
        }
    }
}

/// Outcome of a key press plus whether the host should suppress its
/// default handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResponse {
    pub prevent_default: bool,
    pub outcome: Outcome,
}
