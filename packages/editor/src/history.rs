//! # Snapshot History
//!
//! Linear undo/redo over whole-body markup snapshots.
//!
//! ## Design
//!
//! - A snapshot is recorded after every commit, so the top of the undo
//!   stack mirrors the committed live state
//! - Undo with uncommitted edits discards them (onto the redo stack) and
//!   re-applies the last commit
//! - Undo of a clean state steps back to the previous commit; the oldest
//!   snapshot is the baseline and is never undone past
//! - Redo re-applies the most recently undone state
//! - A new push clears the redo stack (no branching)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//! history.push(doc.capture());   // baseline
//!
//! // ... edit and commit
//! history.push(doc.capture());
//!
//! history.undo(&mut doc);        // back to baseline
//! history.redo(&mut doc);        // forward again
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable markup of the whole document body at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Snapshot {
    fn from(markup: String) -> Self {
        Self(markup)
    }
}

/// Something whose state can be captured as and restored from a snapshot
pub trait SnapshotTarget {
    /// Serialize the current state
    fn capture(&self) -> Snapshot;

    /// Replace the current state wholesale
    fn restore(&mut self, snapshot: &Snapshot);

    /// Whether the live state has edits not yet recorded as `committed`
    fn has_uncommitted_changes(&self, committed: &Snapshot) -> bool {
        self.capture() != *committed
    }
}

/// Undo/redo stacks of document snapshots
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Committed states (most recent last)
    undo_stack: Vec<Snapshot>,

    /// Undone states (most recent last)
    redo_stack: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl History {
    /// Create a history without a level limit
    pub fn new() -> Self {
        Self::with_max_levels(0)
    }

    /// Create a history keeping at most `max_levels` snapshots (0 = unlimited)
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record a committed state
    pub fn push(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New commit invalidates the undone future
        self.redo_stack.clear();
    }

    /// Step back. Returns false when there is nothing to undo.
    pub fn undo(&mut self, target: &mut impl SnapshotTarget) -> bool {
        let Some(top) = self.undo_stack.last() else {
            return false;
        };

        if target.has_uncommitted_changes(top) {
            self.redo_stack.push(target.capture());
            target.restore(top);
            return true;
        }

        if self.undo_stack.len() < 2 {
            return false;
        }

        if let Some(current) = self.undo_stack.pop() {
            self.redo_stack.push(current);
        }
        if let Some(previous) = self.undo_stack.last() {
            target.restore(previous);
        }
        true
    }

    /// Step forward. Returns false when there is nothing to redo.
    pub fn redo(&mut self, target: &mut impl SnapshotTarget) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };

        // Keep uncommitted edits reachable by undo
        if let Some(top) = self.undo_stack.last() {
            if target.has_uncommitted_changes(top) {
                let live = target.capture();
                if live != next {
                    self.undo_stack.push(live);
                }
            }
        }

        // Every undone commit comes back as its own level, even when it
        // matches the one below it
        self.undo_stack.push(next.clone());
        target.restore(&next);
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of snapshots on the undo stack
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of snapshots on the redo stack
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_stack(&self) -> &[Snapshot] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Snapshot] {
        &self.redo_stack
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
