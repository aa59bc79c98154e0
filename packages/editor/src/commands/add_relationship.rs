//! Create a relationship edge between two topics.

use crate::context::CommandContext;
use crate::errors::EditorError;
use mindweave_model::RelationshipModel;

/// Forward: add the edge to the document and the rendering graph.
/// Reverse: capture the current model while removing it, so redo replays
/// any styling applied after creation.
#[derive(Debug)]
pub struct AddRelationship {
    model: RelationshipModel,
}

impl AddRelationship {
    pub fn new(model: RelationshipModel) -> Self {
        Self { model }
    }

    pub fn execute(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        ctx.add_relationship(self.model.clone())?;
        Ok(())
    }

    pub fn undo(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        self.model = ctx.remove_relationship(self.model.id)?;
        Ok(())
    }
}
