//! # Command context
//!
//! The only bridge between commands and the live document. Commands never
//! touch the [`Mindmap`] or the rendering graph directly; every mutation
//! goes through this type, which keeps the canonical model and the visual
//! layer applied in lockstep.
//!
//! The rendering graph itself is out of scope and reached through the
//! [`RenderBridge`] trait. Production wires a real renderer in;
//! [`NullRenderBridge`] serves headless use and [`RecordingRenderBridge`]
//! lets tests assert on the exact sequence of visual operations.

use crate::errors::EditorError;
use mindweave_model::{
    ControlPointIndex, FeatureId, Mindmap, Point, RelationshipId, RelationshipModel, TopicId,
    TopicModel,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Operations the rendering graph must support. Invoked only from
/// [`CommandContext`], keyed by the same ids as the document.
pub trait RenderBridge {
    fn create_topic(&mut self, model: &TopicModel);
    fn delete_topic(&mut self, id: TopicId);
    fn connect_to(&mut self, child: TopicId, parent: TopicId);
    fn disconnect(&mut self, id: TopicId);
    fn add_relationship(&mut self, model: &RelationshipModel);
    fn remove_relationship(&mut self, id: RelationshipId);
    fn update_relationship(&mut self, model: &RelationshipModel);
}

/// Rendering bridge that does nothing; for headless sessions.
#[derive(Debug, Default)]
pub struct NullRenderBridge;

impl RenderBridge for NullRenderBridge {
    fn create_topic(&mut self, _model: &TopicModel) {}
    fn delete_topic(&mut self, _id: TopicId) {}
    fn connect_to(&mut self, _child: TopicId, _parent: TopicId) {}
    fn disconnect(&mut self, _id: TopicId) {}
    fn add_relationship(&mut self, _model: &RelationshipModel) {}
    fn remove_relationship(&mut self, _id: RelationshipId) {}
    fn update_relationship(&mut self, _model: &RelationshipModel) {}
}

/// One visual operation observed by [`RecordingRenderBridge`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    TopicCreated(TopicId),
    TopicDeleted(TopicId),
    Connected { child: TopicId, parent: TopicId },
    Disconnected(TopicId),
    RelationshipAdded(RelationshipId),
    RelationshipRemoved(RelationshipId),
    RelationshipUpdated(RelationshipId),
}

/// Test double that records every bridge call. The event log is shared
/// through an `Rc` handle so tests keep access after the bridge moves
/// into the context; the subsystem runs on one thread.
#[derive(Debug, Default)]
pub struct RecordingRenderBridge {
    events: Rc<RefCell<Vec<RenderEvent>>>,
}

impl RecordingRenderBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle onto the event log.
    pub fn events(&self) -> Rc<RefCell<Vec<RenderEvent>>> {
        Rc::clone(&self.events)
    }
}

impl RenderBridge for RecordingRenderBridge {
    fn create_topic(&mut self, model: &TopicModel) {
        self.events
            .borrow_mut()
            .push(RenderEvent::TopicCreated(model.id));
    }

    fn delete_topic(&mut self, id: TopicId) {
        self.events.borrow_mut().push(RenderEvent::TopicDeleted(id));
    }

    fn connect_to(&mut self, child: TopicId, parent: TopicId) {
        self.events
            .borrow_mut()
            .push(RenderEvent::Connected { child, parent });
    }

    fn disconnect(&mut self, id: TopicId) {
        self.events.borrow_mut().push(RenderEvent::Disconnected(id));
    }

    fn add_relationship(&mut self, model: &RelationshipModel) {
        self.events
            .borrow_mut()
            .push(RenderEvent::RelationshipAdded(model.id));
    }

    fn remove_relationship(&mut self, id: RelationshipId) {
        self.events
            .borrow_mut()
            .push(RenderEvent::RelationshipRemoved(id));
    }

    fn update_relationship(&mut self, model: &RelationshipModel) {
        self.events
            .borrow_mut()
            .push(RenderEvent::RelationshipUpdated(model.id));
    }
}

/// Bridge between commands and the live topology/rendering graph.
pub struct CommandContext {
    mindmap: Mindmap,
    render: Box<dyn RenderBridge>,
    focused: Option<TopicId>,
}

impl CommandContext {
    pub fn new(mindmap: Mindmap, render: Box<dyn RenderBridge>) -> Self {
        Self {
            mindmap,
            render,
            focused: None,
        }
    }

    pub fn mindmap(&self) -> &Mindmap {
        &self.mindmap
    }

    // --- topics --------------------------------------------------------

    /// Create a topic in the document and the rendering graph.
    pub fn create_topic(&mut self, model: TopicModel) -> Result<TopicId, EditorError> {
        let id = self.mindmap.add_topic(model)?;
        self.render.create_topic(self.mindmap.topic(id)?);
        Ok(id)
    }

    /// Delete a disconnected, childless topic from both layers, returning
    /// its model for capture. Clears focus if the topic held it.
    pub fn delete_topic(&mut self, id: TopicId) -> Result<TopicModel, EditorError> {
        let model = self.mindmap.remove_topic(id)?;
        self.render.delete_topic(id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        Ok(model)
    }

    pub fn connect(&mut self, child: TopicId, parent: TopicId) -> Result<(), EditorError> {
        self.mindmap.connect(child, parent)?;
        self.render.connect_to(child, parent);
        Ok(())
    }

    pub fn disconnect(&mut self, id: TopicId) -> Result<(), EditorError> {
        self.mindmap.disconnect(id)?;
        self.render.disconnect(id);
        Ok(())
    }

    pub fn topic(&self, id: TopicId) -> Result<&TopicModel, EditorError> {
        Ok(self.mindmap.topic(id)?)
    }

    pub fn topic_mut(&mut self, id: TopicId) -> Result<&mut TopicModel, EditorError> {
        Ok(self.mindmap.topic_mut(id)?)
    }

    pub fn try_topic(&self, id: TopicId) -> Option<&TopicModel> {
        self.mindmap.try_topic(id)
    }

    pub fn parent(&self, id: TopicId) -> Result<Option<TopicId>, EditorError> {
        Ok(self.mindmap.forest().parent(id)?)
    }

    pub fn ancestors(&self, id: TopicId) -> Result<Vec<TopicId>, EditorError> {
        Ok(self.mindmap.forest().ancestors(id)?)
    }

    pub fn descendants(&self, id: TopicId) -> Result<Vec<TopicId>, EditorError> {
        Ok(self.mindmap.forest().descendants(id)?)
    }

    pub fn order(&self, id: TopicId) -> Result<Option<i32>, EditorError> {
        Ok(self.mindmap.forest().order(id)?)
    }

    pub fn set_order(&mut self, id: TopicId, order: Option<i32>) -> Result<(), EditorError> {
        Ok(self.mindmap.set_order(id, order)?)
    }

    /// Write the layout position back onto the topic model.
    pub fn set_position(&mut self, id: TopicId, position: Point) -> Result<(), EditorError> {
        self.mindmap.topic_mut(id)?.position = position;
        Ok(())
    }

    // --- relationships -------------------------------------------------

    pub fn add_relationship(
        &mut self,
        model: RelationshipModel,
    ) -> Result<RelationshipId, EditorError> {
        let id = self.mindmap.add_relationship(model)?;
        self.render.add_relationship(self.mindmap.relationship(id)?);
        Ok(id)
    }

    pub fn remove_relationship(
        &mut self,
        id: RelationshipId,
    ) -> Result<RelationshipModel, EditorError> {
        let model = self.mindmap.remove_relationship(id)?;
        self.render.remove_relationship(id);
        Ok(model)
    }

    pub fn relationship(&self, id: RelationshipId) -> Result<&RelationshipModel, EditorError> {
        Ok(self.mindmap.relationship(id)?)
    }

    pub fn relationships_touching(&self, topics: &[TopicId]) -> Vec<RelationshipId> {
        self.mindmap.relationships_touching(topics)
    }

    /// Write a control point into the persisted model and the live
    /// geometry, returning the displaced value (with its auto/custom
    /// state intact).
    pub fn set_control_point(
        &mut self,
        id: RelationshipId,
        index: ControlPointIndex,
        point: Option<Point>,
    ) -> Result<Option<Point>, EditorError> {
        let relationship = self.mindmap.relationship_mut(id)?;
        let previous = std::mem::replace(relationship.control_point_mut(index), point);
        self.render.update_relationship(self.mindmap.relationship(id)?);
        Ok(previous)
    }

    // --- id allocation -------------------------------------------------

    pub fn new_topic_id(&mut self) -> TopicId {
        self.mindmap.new_topic_id()
    }

    pub fn new_feature_id(&mut self) -> FeatureId {
        self.mindmap.new_feature_id()
    }

    pub fn new_relationship_id(&mut self) -> RelationshipId {
        self.mindmap.new_relationship_id()
    }

    // --- focus ---------------------------------------------------------

    /// Move keyboard focus. The target must exist; `None` clears focus.
    pub fn set_focus(&mut self, id: Option<TopicId>) -> Result<(), EditorError> {
        if let Some(id) = id {
            self.mindmap.topic(id)?;
        }
        self.focused = id;
        Ok(())
    }

    pub fn focused(&self) -> Option<TopicId> {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> (CommandContext, Rc<RefCell<Vec<RenderEvent>>>) {
        let bridge = RecordingRenderBridge::new();
        let events = bridge.events();
        (
            CommandContext::new(Mindmap::new(), Box::new(bridge)),
            events,
        )
    }

    #[test]
    fn test_create_and_connect_drive_the_bridge() {
        let (mut ctx, events) = context();
        let root = ctx.create_topic(TopicModel::with_text(TopicId(0), "Central")).unwrap();
        let child = ctx.create_topic(TopicModel::with_text(TopicId(1), "Child")).unwrap();
        ctx.connect(child, root).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                RenderEvent::TopicCreated(root),
                RenderEvent::TopicCreated(child),
                RenderEvent::Connected {
                    child,
                    parent: root
                },
            ]
        );
    }

    #[test]
    fn test_delete_clears_focus() {
        let (mut ctx, _events) = context();
        let id = ctx.create_topic(TopicModel::new(TopicId(0))).unwrap();
        ctx.set_focus(Some(id)).unwrap();
        ctx.delete_topic(id).unwrap();
        assert_eq!(ctx.focused(), None);
    }

    #[test]
    fn test_focus_target_must_exist() {
        let (mut ctx, _events) = context();
        let err = ctx.set_focus(Some(TopicId(9))).unwrap_err();
        assert_eq!(
            err,
            EditorError::Model(mindweave_model::ModelError::TopicNotFound(TopicId(9)))
        );
    }

    #[test]
    fn test_control_point_write_reports_previous_value() {
        let (mut ctx, events) = context();
        let a = ctx.create_topic(TopicModel::new(TopicId(0))).unwrap();
        let b = ctx.create_topic(TopicModel::new(TopicId(1))).unwrap();
        let rel = ctx
            .add_relationship(RelationshipModel::new(RelationshipId(0), a, b))
            .unwrap();

        let previous = ctx
            .set_control_point(rel, ControlPointIndex::Start, Some(Point::new(4.0, 2.0)))
            .unwrap();
        assert_eq!(previous, None);

        let previous = ctx
            .set_control_point(rel, ControlPointIndex::Start, None)
            .unwrap();
        assert_eq!(previous, Some(Point::new(4.0, 2.0)));
        assert!(events
            .borrow()
            .iter()
            .any(|e| *e == RenderEvent::RelationshipUpdated(rel)));
    }
}
