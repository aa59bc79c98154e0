//! # Action runner
//!
//! Executes commands through the undo manager and tells collaborators
//! about it. This is the only component that calls
//! `UndoManager::{enqueue, exec_undo, exec_redo}`; every execute/undo/redo
//! cycle ends by asking for a re-layout and publishing the new stack
//! depths, so UI affordances track history without seeing command
//! internals.

use crate::command::Command;
use crate::context::CommandContext;
use crate::errors::EditorError;
use crate::undo_manager::UndoManager;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stack depths published after every mutation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub undo_steps: usize,
    pub redo_steps: usize,
}

/// Collaborator notified after every execute/undo/redo.
pub trait EditorListener {
    /// The document changed; the counts say what undo/redo can offer.
    fn model_updated(&mut self, event: ChangeEvent);

    /// Geometry is stale; the layout pass should run.
    fn layout_requested(&mut self);
}

/// Runs commands against the context, records them for undo, and fires
/// notifications.
#[derive(Default)]
pub struct ActionRunner {
    undo_manager: UndoManager,
    listeners: Vec<Box<dyn EditorListener>>,
}

impl ActionRunner {
    pub fn new() -> Self {
        Self {
            undo_manager: UndoManager::new(),
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn EditorListener>) {
        self.listeners.push(listener);
    }

    /// Execute a command and record it. A failed command is not recorded:
    /// enqueueing something the document does not reflect would poison
    /// every later undo.
    pub fn execute(
        &mut self,
        ctx: &mut CommandContext,
        mut command: Command,
    ) -> Result<(), EditorError> {
        debug!(command = command.name(), id = %command.id(), "executing command");
        command.execute(ctx)?;
        self.undo_manager.enqueue(command);
        self.notify_all();
        Ok(())
    }

    /// Undo one step. `Ok(false)` when the undo stack is empty.
    pub fn undo(&mut self, ctx: &mut CommandContext) -> Result<bool, EditorError> {
        let did_undo = self.undo_manager.exec_undo(ctx)?;
        debug!(did_undo, undo_steps = self.undo_manager.undo_steps(), "undo");
        self.notify_all();
        Ok(did_undo)
    }

    /// Redo one step. `Ok(false)` when the redo stack is empty.
    pub fn redo(&mut self, ctx: &mut CommandContext) -> Result<bool, EditorError> {
        let did_redo = self.undo_manager.exec_redo(ctx)?;
        debug!(did_redo, redo_steps = self.undo_manager.redo_steps(), "redo");
        self.notify_all();
        Ok(did_redo)
    }

    pub fn undo_steps(&self) -> usize {
        self.undo_manager.undo_steps()
    }

    pub fn redo_steps(&self) -> usize {
        self.undo_manager.redo_steps()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_manager.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_manager.can_redo()
    }

    /// Record the current history position as the save point.
    pub fn mark_saved(&mut self) {
        self.undo_manager.mark_as_change_base();
    }

    /// Whether the document has changed since the last save point.
    pub fn has_unsaved_changes(&self) -> bool {
        self.undo_manager.has_been_changed()
    }

    fn notify_all(&mut self) {
        let event = ChangeEvent {
            undo_steps: self.undo_manager.undo_steps(),
            redo_steps: self.undo_manager.redo_steps(),
        };
        for listener in &mut self.listeners {
            listener.layout_requested();
            listener.model_updated(event);
        }
    }
}
