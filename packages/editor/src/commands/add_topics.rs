//! Create one or more topics, optionally connecting each to a parent.

use crate::context::CommandContext;
use crate::errors::EditorError;
use mindweave_model::{TopicId, TopicModel};

/// Forward: create and connect each model, focusing the last created
/// topic. Reverse: capture each topic's **post-edit** model before
/// deleting it, so a later redo recreates the edited content (typed text,
/// picked colors) rather than the models this command was built with.
#[derive(Debug)]
pub struct AddTopics {
    models: Vec<TopicModel>,
    parents: Option<Vec<TopicId>>,
    /// Order values captured at undo time so redo can restore them.
    orders: Vec<Option<i32>>,
}

impl AddTopics {
    /// `parents`, when present, must be the same length as `models`;
    /// the dispatcher validates that before construction.
    pub fn new(models: Vec<TopicModel>, parents: Option<Vec<TopicId>>) -> Self {
        Self {
            models,
            parents,
            orders: Vec::new(),
        }
    }

    pub fn execute(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        // Resolve every parent before creating anything, so a stale id
        // fails the command without leaving half the batch behind.
        if let Some(parents) = &self.parents {
            for &parent in parents {
                if !self.models.iter().any(|m| m.id == parent) {
                    ctx.topic(parent)?;
                }
            }
        }

        let mut last = None;
        for (index, model) in self.models.iter().enumerate() {
            let id = ctx.create_topic(model.clone())?;
            if let Some(parents) = &self.parents {
                ctx.connect(id, parents[index])?;
            }
            if let Some(&order) = self.orders.get(index) {
                ctx.set_order(id, order)?;
            }
            last = Some(id);
        }
        ctx.set_focus(last)?;
        Ok(())
    }

    pub fn undo(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        // Swap in post-edit clones before deleting.
        let mut captured = Vec::with_capacity(self.models.len());
        let mut orders = Vec::with_capacity(self.models.len());
        for model in &self.models {
            captured.push(ctx.topic(model.id)?.clone());
            orders.push(ctx.order(model.id)?);
        }

        // Delete in reverse creation order; within a batch a model may be
        // parented under an earlier one.
        for model in self.models.iter().rev() {
            if ctx.parent(model.id)?.is_some() {
                ctx.disconnect(model.id)?;
            }
            ctx.delete_topic(model.id)?;
        }

        self.models = captured;
        self.orders = orders;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NullRenderBridge;
    use mindweave_model::{Mindmap, ModelError};

    fn context() -> (CommandContext, TopicId) {
        let (map, root) = Mindmap::with_central_topic("Central").unwrap();
        (CommandContext::new(map, Box::new(NullRenderBridge)), root)
    }

    #[test]
    fn test_add_connects_and_focuses_last() {
        let (mut ctx, root) = context();
        let a = TopicModel::with_text(TopicId(10), "A");
        let b = TopicModel::with_text(TopicId(11), "B");
        let mut cmd = AddTopics::new(vec![a, b], Some(vec![root, root]));

        cmd.execute(&mut ctx).unwrap();

        assert_eq!(ctx.mindmap().topic_count(), 3);
        assert_eq!(ctx.parent(TopicId(10)).unwrap(), Some(root));
        assert_eq!(ctx.parent(TopicId(11)).unwrap(), Some(root));
        assert_eq!(ctx.focused(), Some(TopicId(11)));
    }

    #[test]
    fn test_undo_removes_everything() {
        let (mut ctx, root) = context();
        let mut cmd = AddTopics::new(
            vec![
                TopicModel::with_text(TopicId(10), "A"),
                TopicModel::with_text(TopicId(11), "B"),
            ],
            Some(vec![root, root]),
        );

        cmd.execute(&mut ctx).unwrap();
        cmd.undo(&mut ctx).unwrap();

        assert_eq!(ctx.mindmap().topic_count(), 1);
        assert!(ctx.try_topic(TopicId(10)).is_none());
        assert!(ctx.try_topic(TopicId(11)).is_none());
        assert_eq!(ctx.focused(), None);
    }

    #[test]
    fn test_redo_recreates_post_edit_content() {
        let (mut ctx, root) = context();
        let mut cmd = AddTopics::new(
            vec![TopicModel::with_text(TopicId(10), "draft")],
            Some(vec![root]),
        );
        cmd.execute(&mut ctx).unwrap();

        // The user types new text after the topic was created
        ctx.topic_mut(TopicId(10)).unwrap().text = "final".to_string();

        cmd.undo(&mut ctx).unwrap();
        cmd.execute(&mut ctx).unwrap();

        assert_eq!(ctx.topic(TopicId(10)).unwrap().text, "final");
    }

    #[test]
    fn test_batch_may_parent_under_its_own_models() {
        let (mut ctx, root) = context();
        let mut cmd = AddTopics::new(
            vec![
                TopicModel::with_text(TopicId(10), "branch"),
                TopicModel::with_text(TopicId(11), "leaf"),
            ],
            Some(vec![root, TopicId(10)]),
        );

        cmd.execute(&mut ctx).unwrap();
        assert_eq!(ctx.parent(TopicId(11)).unwrap(), Some(TopicId(10)));

        cmd.undo(&mut ctx).unwrap();
        assert_eq!(ctx.mindmap().topic_count(), 1);
    }

    #[test]
    fn test_stale_parent_fails_before_creating() {
        let (mut ctx, _root) = context();
        let mut cmd = AddTopics::new(
            vec![TopicModel::with_text(TopicId(10), "A")],
            Some(vec![TopicId(99)]),
        );

        let err = cmd.execute(&mut ctx).unwrap_err();
        assert_eq!(
            err,
            EditorError::Model(ModelError::TopicNotFound(TopicId(99)))
        );
        assert_eq!(ctx.mindmap().topic_count(), 1);
    }
}
