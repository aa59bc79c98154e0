//! Add, remove or change a feature (icon, note, link) on a topic.

use crate::context::CommandContext;
use crate::errors::EditorError;
use mindweave_model::{FeatureContent, FeatureId, FeatureModel, ModelError, TopicId};

/// The three feature edits share capture plumbing, so they live in one
/// command with an operation tag.
#[derive(Debug)]
pub enum FeatureOp {
    Add {
        content: FeatureContent,
        /// Id allocated on first execute; redo reuses it so undo history
        /// stays valid.
        created: Option<FeatureId>,
    },
    Remove {
        feature: FeatureId,
        captured: Option<FeatureModel>,
    },
    Change {
        feature: FeatureId,
        /// Two-slot buffer: swaps with the live content on every apply.
        content: FeatureContent,
    },
}

#[derive(Debug)]
pub struct FeatureEdit {
    topic: TopicId,
    op: FeatureOp,
}

impl FeatureEdit {
    pub fn add(topic: TopicId, content: FeatureContent) -> Self {
        Self {
            topic,
            op: FeatureOp::Add {
                content,
                created: None,
            },
        }
    }

    pub fn remove(topic: TopicId, feature: FeatureId) -> Self {
        Self {
            topic,
            op: FeatureOp::Remove {
                feature,
                captured: None,
            },
        }
    }

    pub fn change(topic: TopicId, feature: FeatureId, content: FeatureContent) -> Self {
        Self {
            topic,
            op: FeatureOp::Change { feature, content },
        }
    }

    pub fn execute(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        let topic = self.topic;
        match &mut self.op {
            FeatureOp::Add { content, created } => {
                ctx.topic(topic)?;
                let id = match *created {
                    Some(id) => id,
                    None => ctx.new_feature_id(),
                };
                ctx.topic_mut(topic)?
                    .add_feature(FeatureModel::new(id, content.clone()));
                *created = Some(id);
                Ok(())
            }
            FeatureOp::Remove { feature, captured } => {
                let model = ctx
                    .topic_mut(topic)?
                    .remove_feature(*feature)
                    .ok_or(ModelError::FeatureNotFound {
                        topic,
                        feature: *feature,
                    })?;
                *captured = Some(model);
                Ok(())
            }
            FeatureOp::Change { feature, content } => {
                swap_content(ctx, topic, *feature, content)
            }
        }
    }

    pub fn undo(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        let topic = self.topic;
        match &mut self.op {
            FeatureOp::Add { created, .. } => {
                let id = created.ok_or(EditorError::CommandNotApplied)?;
                ctx.topic_mut(topic)?
                    .remove_feature(id)
                    .ok_or(ModelError::FeatureNotFound { topic, feature: id })?;
                Ok(())
            }
            FeatureOp::Remove { captured, .. } => {
                let model = captured.clone().ok_or(EditorError::CommandNotApplied)?;
                ctx.topic_mut(topic)?.add_feature(model);
                Ok(())
            }
            // Symmetric swap
            FeatureOp::Change { feature, content } => {
                swap_content(ctx, topic, *feature, content)
            }
        }
    }
}

/// Swap the command's content buffer with the feature's live content.
/// Changing a feature's kind is a caller bug: an icon stays an icon.
fn swap_content(
    ctx: &mut CommandContext,
    topic: TopicId,
    feature: FeatureId,
    content: &mut FeatureContent,
) -> Result<(), EditorError> {
    let model = ctx.topic_mut(topic)?;
    let live = model
        .feature_mut(feature)
        .ok_or(ModelError::FeatureNotFound { topic, feature })?;
    if live.content.kind() != content.kind() {
        return Err(EditorError::Validation(format!(
            "feature {} is a {:?}, not a {:?}",
            feature,
            live.content.kind(),
            content.kind()
        )));
    }
    std::mem::swap(&mut live.content, content);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NullRenderBridge;
    use mindweave_model::{FeatureKind, Mindmap};

    fn fixture() -> (CommandContext, TopicId) {
        let (map, root) = Mindmap::with_central_topic("Central").unwrap();
        (CommandContext::new(map, Box::new(NullRenderBridge)), root)
    }

    #[test]
    fn test_add_then_undo_then_redo_keeps_id() {
        let (mut ctx, root) = fixture();
        let mut cmd = FeatureEdit::add(
            root,
            FeatureContent::Note {
                text: "remember".to_string(),
            },
        );

        cmd.execute(&mut ctx).unwrap();
        let id = ctx.topic(root).unwrap().features[0].id;

        cmd.undo(&mut ctx).unwrap();
        assert!(ctx.topic(root).unwrap().features.is_empty());

        cmd.execute(&mut ctx).unwrap();
        assert_eq!(ctx.topic(root).unwrap().features[0].id, id);
    }

    #[test]
    fn test_remove_captures_for_replay() {
        let (mut ctx, root) = fixture();
        let feature = ctx.new_feature_id();
        ctx.topic_mut(root).unwrap().add_feature(FeatureModel::new(
            feature,
            FeatureContent::Icon {
                icon: "flag-red".to_string(),
            },
        ));

        let mut cmd = FeatureEdit::remove(root, feature);
        cmd.execute(&mut ctx).unwrap();
        assert!(ctx.topic(root).unwrap().feature(feature).is_none());

        cmd.undo(&mut ctx).unwrap();
        let restored = ctx.topic(root).unwrap().feature(feature).unwrap();
        assert_eq!(restored.kind(), FeatureKind::Icon);
    }

    #[test]
    fn test_change_swaps_and_swaps_back() {
        let (mut ctx, root) = fixture();
        let feature = ctx.new_feature_id();
        ctx.topic_mut(root).unwrap().add_feature(FeatureModel::new(
            feature,
            FeatureContent::Link {
                url: "https://old.example".to_string(),
            },
        ));

        let mut cmd = FeatureEdit::change(
            root,
            feature,
            FeatureContent::Link {
                url: "https://new.example".to_string(),
            },
        );

        cmd.execute(&mut ctx).unwrap();
        assert_eq!(
            ctx.topic(root).unwrap().feature(feature).unwrap().content,
            FeatureContent::Link {
                url: "https://new.example".to_string()
            }
        );

        cmd.undo(&mut ctx).unwrap();
        assert_eq!(
            ctx.topic(root).unwrap().feature(feature).unwrap().content,
            FeatureContent::Link {
                url: "https://old.example".to_string()
            }
        );
    }

    #[test]
    fn test_change_rejects_kind_mismatch() {
        let (mut ctx, root) = fixture();
        let feature = ctx.new_feature_id();
        ctx.topic_mut(root).unwrap().add_feature(FeatureModel::new(
            feature,
            FeatureContent::Note {
                text: "n".to_string(),
            },
        ));

        let mut cmd = FeatureEdit::change(
            root,
            feature,
            FeatureContent::Icon {
                icon: "star".to_string(),
            },
        );
        assert!(matches!(
            cmd.execute(&mut ctx),
            Err(EditorError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_feature_propagates() {
        let (mut ctx, root) = fixture();
        let mut cmd = FeatureEdit::remove(root, FeatureId(9));
        assert_eq!(
            cmd.execute(&mut ctx).unwrap_err(),
            EditorError::Model(ModelError::FeatureNotFound {
                topic: root,
                feature: FeatureId(9)
            })
        );
    }
}
