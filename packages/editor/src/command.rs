//! # Reversible commands
//!
//! Every edit is a [`Command`]: a value object that can apply itself to
//! the document through the [`CommandContext`] and reverse itself later.
//! Concrete commands are tagged variants of [`CommandKind`], dispatched by
//! pattern matching; the [`Command`] wrapper owns the state machine that
//! makes double application a hard error instead of silent corruption.
//!
//! ## State machine
//!
//! ```text
//! Created ──execute──▶ Applied ──undo_execute──▶ Undone
//!                        ▲                          │
//!                        └────────execute───────────┘
//! ```
//!
//! `Created → Undone` is impossible, and `Applied → Applied` (a second
//! `execute` without an undo in between) fails with
//! [`EditorError::CommandAlreadyApplied`].

use crate::commands::{
    AddRelationship, AddTopics, ChangeField, DeleteEntities, DragTopic, FeatureEdit,
    MoveControlPoint,
};
use crate::context::CommandContext;
use crate::errors::EditorError;
use std::fmt;

/// Id of a command within one editing session. Used by the undo manager's
/// save-point marker; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(pub u64);

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential command id allocator, owned by the dispatcher.
#[derive(Debug, Default)]
pub struct CommandIdGenerator {
    next: u64,
}

impl CommandIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> CommandId {
        let id = CommandId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    Created,
    Applied,
    Undone,
}

/// One concrete command per editing intent.
#[derive(Debug)]
pub enum CommandKind {
    AddTopics(AddTopics),
    DeleteEntities(DeleteEntities),
    DragTopic(DragTopic),
    ChangeField(ChangeField),
    MoveControlPoint(MoveControlPoint),
    FeatureEdit(FeatureEdit),
    AddRelationship(AddRelationship),
}

impl CommandKind {
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::AddTopics(_) => "AddTopics",
            CommandKind::DeleteEntities(_) => "DeleteEntities",
            CommandKind::DragTopic(_) => "DragTopic",
            CommandKind::ChangeField(_) => "ChangeField",
            CommandKind::MoveControlPoint(_) => "MoveControlPoint",
            CommandKind::FeatureEdit(_) => "FeatureEdit",
            CommandKind::AddRelationship(_) => "AddRelationship",
        }
    }

    /// Key used to coalesce semantically-duplicate consecutive edits.
    fn discard_key(&self) -> Option<&str> {
        match self {
            CommandKind::ChangeField(cmd) => cmd.discard_key(),
            _ => None,
        }
    }

    fn execute(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        match self {
            CommandKind::AddTopics(cmd) => cmd.execute(ctx),
            CommandKind::DeleteEntities(cmd) => cmd.execute(ctx),
            CommandKind::DragTopic(cmd) => cmd.toggle_state(ctx),
            CommandKind::ChangeField(cmd) => cmd.execute(ctx),
            CommandKind::MoveControlPoint(cmd) => cmd.execute(ctx),
            CommandKind::FeatureEdit(cmd) => cmd.execute(ctx),
            CommandKind::AddRelationship(cmd) => cmd.execute(ctx),
        }
    }

    fn undo(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        match self {
            CommandKind::AddTopics(cmd) => cmd.undo(ctx),
            CommandKind::DeleteEntities(cmd) => cmd.undo(ctx),
            // Self-invertible: the two-slot buffer makes undo the same
            // toggle as execute.
            CommandKind::DragTopic(cmd) => cmd.toggle_state(ctx),
            CommandKind::ChangeField(cmd) => cmd.undo(ctx),
            CommandKind::MoveControlPoint(cmd) => cmd.undo(ctx),
            CommandKind::FeatureEdit(cmd) => cmd.undo(ctx),
            CommandKind::AddRelationship(cmd) => cmd.undo(ctx),
        }
    }
}

/// A reversible unit of mutation.
#[derive(Debug)]
pub struct Command {
    id: CommandId,
    state: CommandState,
    kind: CommandKind,
}

impl Command {
    pub fn new(id: CommandId, kind: CommandKind) -> Self {
        Self {
            id,
            state: CommandState::Created,
            kind,
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn discard_key(&self) -> Option<&str> {
        self.kind.discard_key()
    }

    /// Apply the command. Valid from `Created` (first application) and
    /// `Undone` (redo); applying an already-applied command is a fatal
    /// caller bug.
    pub fn execute(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        if self.state == CommandState::Applied {
            return Err(EditorError::CommandAlreadyApplied);
        }
        self.kind.execute(ctx)?;
        self.state = CommandState::Applied;
        Ok(())
    }

    /// Reverse the command. Valid only from `Applied`; undoing twice
    /// without a re-execute in between is a fatal caller bug.
    pub fn undo_execute(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        if self.state != CommandState::Applied {
            return Err(EditorError::CommandNotApplied);
        }
        self.kind.undo(ctx)?;
        self.state = CommandState::Undone;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{ChangeField, FieldValue};
    use crate::context::NullRenderBridge;
    use mindweave_model::{Mindmap, TopicId, TopicModel};

    fn context_with_topic() -> (CommandContext, TopicId) {
        let (map, root) = Mindmap::with_central_topic("Central").unwrap();
        (CommandContext::new(map, Box::new(NullRenderBridge)), root)
    }

    fn color_command(target: TopicId) -> Command {
        Command::new(
            CommandId(1),
            CommandKind::ChangeField(ChangeField::new(
                vec![target],
                FieldValue::FontColor(Some("red".to_string())),
                None,
            )),
        )
    }

    #[test]
    fn test_double_execute_is_fatal() {
        let (mut ctx, root) = context_with_topic();
        let mut command = color_command(root);

        command.execute(&mut ctx).unwrap();
        assert_eq!(command.state(), CommandState::Applied);

        let err = command.execute(&mut ctx).unwrap_err();
        assert_eq!(err, EditorError::CommandAlreadyApplied);
        assert_eq!(err.to_string(), "command can not be applied two times in a row");
    }

    #[test]
    fn test_undo_before_execute_is_fatal() {
        let (mut ctx, root) = context_with_topic();
        let mut command = color_command(root);

        assert_eq!(
            command.undo_execute(&mut ctx).unwrap_err(),
            EditorError::CommandNotApplied
        );
    }

    #[test]
    fn test_double_undo_is_fatal() {
        let (mut ctx, root) = context_with_topic();
        let mut command = color_command(root);

        command.execute(&mut ctx).unwrap();
        command.undo_execute(&mut ctx).unwrap();
        assert_eq!(command.state(), CommandState::Undone);

        assert_eq!(
            command.undo_execute(&mut ctx).unwrap_err(),
            EditorError::CommandNotApplied
        );
    }

    #[test]
    fn test_redo_cycle_toggles_states() {
        let (mut ctx, root) = context_with_topic();
        let mut command = color_command(root);

        command.execute(&mut ctx).unwrap();
        command.undo_execute(&mut ctx).unwrap();
        command.execute(&mut ctx).unwrap();
        assert_eq!(command.state(), CommandState::Applied);
        assert_eq!(
            ctx.topic(root).unwrap().font_color.as_deref(),
            Some("red")
        );
    }

    #[test]
    fn test_command_ids_are_sequential() {
        let mut ids = CommandIdGenerator::new();
        assert_eq!(ids.next_id(), CommandId(0));
        assert_eq!(ids.next_id(), CommandId(1));
        assert_eq!(ids.next_id(), CommandId(2));
    }
}
