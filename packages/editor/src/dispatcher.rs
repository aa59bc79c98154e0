//! # Action dispatcher
//!
//! The public face of the editing core: one method per editing intent.
//! Each method validates its arguments, builds the matching command, and
//! hands it to the [`ActionRunner`]. This is the seam every UI-triggered
//! mutation funnels through; no other code path mutates the document.

use crate::command::{Command, CommandIdGenerator, CommandKind};
use crate::commands::{
    AddRelationship, AddTopics, ChangeField, DeleteEntities, DragTopic, FeatureEdit,
    FieldValue, MoveControlPoint,
};
use crate::context::{CommandContext, RenderBridge};
use crate::errors::EditorError;
use crate::layout::Placement;
use crate::runner::{ActionRunner, EditorListener};
use mindweave_model::{
    ControlPointIndex, FeatureContent, FeatureId, FontStyle, FontWeight, Mindmap, Point,
    RelationshipId, RelationshipModel, TopicId, TopicModel, TopicShape,
};
use tracing::debug;

/// Intent-level editing API over one document.
pub struct ActionDispatcher {
    context: CommandContext,
    runner: ActionRunner,
    ids: CommandIdGenerator,
}

impl ActionDispatcher {
    pub fn new(mindmap: Mindmap, render: Box<dyn RenderBridge>) -> Self {
        Self {
            context: CommandContext::new(mindmap, render),
            runner: ActionRunner::new(),
            ids: CommandIdGenerator::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn EditorListener>) {
        self.runner.add_listener(listener);
    }

    // --- structural intents --------------------------------------------

    /// Add topics, optionally each under a parent. `parents`, when given,
    /// must pair up with `models` one to one.
    pub fn add_topics(
        &mut self,
        models: Vec<TopicModel>,
        parents: Option<Vec<TopicId>>,
    ) -> Result<(), EditorError> {
        if models.is_empty() {
            return Err(EditorError::Argument("models"));
        }
        if let Some(parents) = &parents {
            if parents.len() != models.len() {
                return Err(EditorError::Validation(format!(
                    "{} models but {} parent ids",
                    models.len(),
                    parents.len()
                )));
            }
        }
        debug!("[AddTopics] {} models, parents={:?}", models.len(), parents);
        self.run(CommandKind::AddTopics(AddTopics::new(models, parents)))
    }

    /// Convenience: create one topic with fresh id under a parent.
    /// Returns the new topic's id.
    pub fn add_topic_under(
        &mut self,
        text: impl Into<String>,
        parent: TopicId,
    ) -> Result<TopicId, EditorError> {
        let id = self.context.new_topic_id();
        self.add_topics(vec![TopicModel::with_text(id, text)], Some(vec![parent]))?;
        Ok(id)
    }

    /// Delete topics (with their subtrees) and/or relationships.
    pub fn delete_entities(
        &mut self,
        topics: Vec<TopicId>,
        relationships: Vec<RelationshipId>,
    ) -> Result<(), EditorError> {
        if topics.is_empty() && relationships.is_empty() {
            return Err(EditorError::Argument("topics or relationships"));
        }
        debug!(
            "[DeleteEntities] topics={:?} relationships={:?}",
            topics, relationships
        );
        self.run(CommandKind::DeleteEntities(DeleteEntities::new(
            topics,
            relationships,
        )))
    }

    /// Move a topic to a resolved placement, possibly under a new parent.
    /// The placement comes from the caller, either explicit or resolved
    /// through the layout provider; the core never calls layout itself.
    pub fn drag_topic(
        &mut self,
        topic: TopicId,
        placement: Placement,
        parent: Option<TopicId>,
    ) -> Result<(), EditorError> {
        debug!(
            "[DragTopic] topic={} order={:?} parent={:?}",
            topic, placement.order, parent
        );
        self.run(CommandKind::DragTopic(DragTopic::new(
            topic,
            placement.position,
            placement.order,
            parent,
        )))
    }

    // --- cosmetic intents ----------------------------------------------

    pub fn change_text(
        &mut self,
        topics: Vec<TopicId>,
        text: impl Into<String>,
    ) -> Result<(), EditorError> {
        self.change_field(topics, FieldValue::Text(text.into()), false)
    }

    pub fn change_font_family(
        &mut self,
        topics: Vec<TopicId>,
        family: Option<String>,
    ) -> Result<(), EditorError> {
        self.change_field(topics, FieldValue::FontFamily(family), false)
    }

    /// Coalesced: repeated size picks while a slider drags collapse into
    /// one undo step.
    pub fn change_font_size(
        &mut self,
        topics: Vec<TopicId>,
        size: Option<f64>,
    ) -> Result<(), EditorError> {
        self.change_field(topics, FieldValue::FontSize(size), true)
    }

    /// Coalesced: repeated picks while a color wheel drags collapse into
    /// one undo step.
    pub fn change_font_color(
        &mut self,
        topics: Vec<TopicId>,
        color: Option<String>,
    ) -> Result<(), EditorError> {
        self.change_field(topics, FieldValue::FontColor(color), true)
    }

    pub fn change_font_weight(
        &mut self,
        topics: Vec<TopicId>,
        weight: Option<FontWeight>,
    ) -> Result<(), EditorError> {
        self.change_field(topics, FieldValue::FontWeight(weight), false)
    }

    pub fn change_font_style(
        &mut self,
        topics: Vec<TopicId>,
        style: Option<FontStyle>,
    ) -> Result<(), EditorError> {
        self.change_field(topics, FieldValue::FontStyle(style), false)
    }

    pub fn change_shape(
        &mut self,
        topics: Vec<TopicId>,
        shape: Option<TopicShape>,
    ) -> Result<(), EditorError> {
        self.change_field(topics, FieldValue::Shape(shape), false)
    }

    /// Coalesced like the other color pickers.
    pub fn change_background_color(
        &mut self,
        topics: Vec<TopicId>,
        color: Option<String>,
    ) -> Result<(), EditorError> {
        self.change_field(topics, FieldValue::BackgroundColor(color), true)
    }

    /// Coalesced like the other color pickers.
    pub fn change_border_color(
        &mut self,
        topics: Vec<TopicId>,
        color: Option<String>,
    ) -> Result<(), EditorError> {
        self.change_field(topics, FieldValue::BorderColor(color), true)
    }

    /// Collapse or expand whole branches.
    pub fn shrink_branch(
        &mut self,
        topics: Vec<TopicId>,
        shrunken: bool,
    ) -> Result<(), EditorError> {
        self.change_field(topics, FieldValue::Shrink(shrunken), false)
    }

    fn change_field(
        &mut self,
        topics: Vec<TopicId>,
        value: FieldValue,
        coalesce: bool,
    ) -> Result<(), EditorError> {
        if topics.is_empty() {
            return Err(EditorError::Argument("topics"));
        }
        let discard_key = coalesce.then(|| format!("{}:{:?}", value.field(), topics));
        debug!("[ChangeField] field={} topics={:?}", value.field(), topics);
        self.run(CommandKind::ChangeField(ChangeField::new(
            topics,
            value,
            discard_key,
        )))
    }

    // --- feature intents -----------------------------------------------

    pub fn add_feature(
        &mut self,
        topic: TopicId,
        content: FeatureContent,
    ) -> Result<(), EditorError> {
        debug!("[AddFeature] topic={} kind={:?}", topic, content.kind());
        self.run(CommandKind::FeatureEdit(FeatureEdit::add(topic, content)))
    }

    pub fn remove_feature(
        &mut self,
        topic: TopicId,
        feature: FeatureId,
    ) -> Result<(), EditorError> {
        debug!("[RemoveFeature] topic={} feature={}", topic, feature);
        self.run(CommandKind::FeatureEdit(FeatureEdit::remove(topic, feature)))
    }

    pub fn change_feature(
        &mut self,
        topic: TopicId,
        feature: FeatureId,
        content: FeatureContent,
    ) -> Result<(), EditorError> {
        debug!("[ChangeFeature] topic={} feature={}", topic, feature);
        self.run(CommandKind::FeatureEdit(FeatureEdit::change(
            topic, feature, content,
        )))
    }

    // --- relationship intents ------------------------------------------

    /// Create a relationship between two distinct topics. Returns its id.
    pub fn add_relationship(
        &mut self,
        source: TopicId,
        target: TopicId,
    ) -> Result<RelationshipId, EditorError> {
        if source == target {
            return Err(EditorError::Validation(format!(
                "relationship endpoints must differ, both are {source}"
            )));
        }
        self.context.topic(source)?;
        self.context.topic(target)?;

        let id = self.context.new_relationship_id();
        debug!("[AddRelationship] {} -> {} as {}", source, target, id);
        self.run(CommandKind::AddRelationship(AddRelationship::new(
            RelationshipModel::new(id, source, target),
        )))?;
        Ok(id)
    }

    /// Place a relationship control point by hand (`Some`) or reset it to
    /// auto (`None`).
    pub fn move_control_point(
        &mut self,
        relationship: RelationshipId,
        index: ControlPointIndex,
        point: Option<Point>,
    ) -> Result<(), EditorError> {
        debug!(
            "[MoveControlPoint] relationship={} index={:?}",
            relationship, index
        );
        self.run(CommandKind::MoveControlPoint(MoveControlPoint::new(
            relationship,
            index,
            point,
        )))
    }

    // --- history -------------------------------------------------------

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.runner.undo(&mut self.context)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.runner.redo(&mut self.context)
    }

    pub fn can_undo(&self) -> bool {
        self.runner.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.runner.can_redo()
    }

    pub fn mark_saved(&mut self) {
        self.runner.mark_saved();
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.runner.has_unsaved_changes()
    }

    // --- read access ---------------------------------------------------

    pub fn mindmap(&self) -> &Mindmap {
        self.context.mindmap()
    }

    pub fn focused(&self) -> Option<TopicId> {
        self.context.focused()
    }

    fn run(&mut self, kind: CommandKind) -> Result<(), EditorError> {
        let command = Command::new(self.ids.next_id(), kind);
        self.runner.execute(&mut self.context, command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NullRenderBridge;
    use mindweave_model::ErrorKind;

    fn dispatcher() -> (ActionDispatcher, TopicId) {
        let (map, root) = Mindmap::with_central_topic("Central").unwrap();
        (
            ActionDispatcher::new(map, Box::new(NullRenderBridge)),
            root,
        )
    }

    #[test]
    fn test_empty_target_lists_are_argument_errors() {
        let (mut dispatcher, _root) = dispatcher();
        assert_eq!(
            dispatcher.add_topics(vec![], None).unwrap_err().kind(),
            ErrorKind::Argument
        );
        assert_eq!(
            dispatcher
                .change_text(vec![], "x")
                .unwrap_err()
                .kind(),
            ErrorKind::Argument
        );
        assert_eq!(
            dispatcher.delete_entities(vec![], vec![]).unwrap_err().kind(),
            ErrorKind::Argument
        );
    }

    #[test]
    fn test_mismatched_parent_list_is_validation_error() {
        let (mut dispatcher, root) = dispatcher();
        let id = TopicId(10);
        let err = dispatcher
            .add_topics(vec![TopicModel::new(id)], Some(vec![root, root]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_self_relationship_is_validation_error() {
        let (mut dispatcher, root) = dispatcher();
        let err = dispatcher.add_relationship(root, root).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_add_topic_under_and_undo() {
        let (mut dispatcher, root) = dispatcher();
        let child = dispatcher.add_topic_under("Child", root).unwrap();

        assert_eq!(dispatcher.mindmap().topic_count(), 2);
        assert_eq!(
            dispatcher.mindmap().forest().parent(child).unwrap(),
            Some(root)
        );
        assert_eq!(dispatcher.focused(), Some(child));

        assert!(dispatcher.undo().unwrap());
        assert_eq!(dispatcher.mindmap().topic_count(), 1);
    }

    #[test]
    fn test_color_gesture_coalesces_via_dispatcher() {
        let (mut dispatcher, root) = dispatcher();
        for color in ["#100", "#200", "#300"] {
            dispatcher
                .change_font_color(vec![root], Some(color.to_string()))
                .unwrap();
        }

        // One entry for the whole gesture; a single undo clears history
        assert!(dispatcher.undo().unwrap());
        assert!(!dispatcher.can_undo());
    }

    #[test]
    fn test_distinct_fields_do_not_coalesce() {
        let (mut dispatcher, root) = dispatcher();
        dispatcher
            .change_font_color(vec![root], Some("#100".to_string()))
            .unwrap();
        dispatcher
            .change_background_color(vec![root], Some("#fff".to_string()))
            .unwrap();

        assert!(dispatcher.undo().unwrap());
        assert!(dispatcher.can_undo());
    }

    #[test]
    fn test_failed_intent_leaves_history_untouched() {
        let (mut dispatcher, _root) = dispatcher();
        let err = dispatcher
            .change_text(vec![TopicId(55)], "ghost")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!dispatcher.can_undo());
    }
}
