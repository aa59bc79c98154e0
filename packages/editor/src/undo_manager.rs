//! # Undo/Redo manager
//!
//! Linear history over [`Command`]s: two stacks, strict LIFO, no
//! branching. Any new edit after an undo permanently discards the
//! abandoned redo branch, matching conventional editor semantics.
//!
//! ## Design
//!
//! - `enqueue` records an already-executed command and clears the redo
//!   stack
//! - Consecutive commands sharing a discard-key **replace** the stack top
//!   instead of stacking, so dragging a color wheel leaves one undo entry
//! - Undo pops, reverses, and moves the command to the redo stack; redo
//!   is symmetric
//! - A save-point marker makes "has the document changed since the last
//!   save" a single id comparison

use crate::command::{Command, CommandId};
use crate::context::CommandContext;
use crate::errors::EditorError;

/// Undo/redo stacks for one editing session.
#[derive(Debug)]
pub struct UndoManager {
    /// Applied commands, most recent last.
    undo_stack: Vec<Command>,

    /// Undone commands, most recent last.
    redo_stack: Vec<Command>,

    /// Maximum undo depth (0 = unlimited).
    max_levels: usize,

    /// Id of the stack top at the last save point; `None` for an empty
    /// stack.
    base_id: Option<CommandId>,
}

impl UndoManager {
    /// Default maximum depth matches what interactive editing needs
    /// without letting one session grow without bound.
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            base_id: None,
        }
    }

    /// Record an executed command. When its discard-key matches the
    /// current stack top the command replaces that entry: exactly one
    /// undo step per contiguous run of same-key edits.
    pub fn enqueue(&mut self, command: Command) {
        let coalesce = match (command.discard_key(), self.undo_stack.last()) {
            (Some(key), Some(top)) => top.discard_key() == Some(key),
            _ => false,
        };

        if coalesce {
            if let Some(top) = self.undo_stack.last_mut() {
                *top = command;
            }
        } else {
            self.undo_stack.push(command);
            if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
                self.undo_stack.remove(0);
            }
        }

        // New edits invalidate the abandoned future.
        self.redo_stack.clear();
    }

    /// Reverse the most recent command. Returns `false` when there is
    /// nothing to undo. On failure the command stays on the undo stack
    /// and the error propagates; history is never silently dropped.
    pub fn exec_undo(&mut self, ctx: &mut CommandContext) -> Result<bool, EditorError> {
        let Some(mut command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.undo_execute(ctx) {
            self.undo_stack.push(command);
            return Err(err);
        }
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Re-apply the most recently undone command. Symmetric with
    /// [`Self::exec_undo`].
    pub fn exec_redo(&mut self, ctx: &mut CommandContext) -> Result<bool, EditorError> {
        let Some(mut command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.execute(ctx) {
            self.redo_stack.push(command);
            return Err(err);
        }
        self.undo_stack.push(command);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_steps(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_steps(&self) -> usize {
        self.redo_stack.len()
    }

    /// Record the current position as the save point.
    pub fn mark_as_change_base(&mut self) {
        self.base_id = self.undo_stack.last().map(|c| c.id());
    }

    /// Dirty iff the current stack top differs from the save point.
    /// Undoing past the save point or editing after it both flip this.
    pub fn has_been_changed(&self) -> bool {
        self.undo_stack.last().map(|c| c.id()) != self.base_id
    }

    /// Drop all history, e.g. on session teardown.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.base_id = None;
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}
