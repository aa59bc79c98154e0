//! Reparent and reposition a topic by drag.

use crate::context::CommandContext;
use crate::errors::EditorError;
use mindweave_model::{Point, TopicId};

/// The two-slot buffer: one placement lives in the document, the other
/// here; [`DragTopic::toggle_state`] swaps them.
#[derive(Debug, Clone, PartialEq)]
struct DragState {
    position: Point,
    order: Option<i32>,
    parent: Option<TopicId>,
}

/// Self-invertible drag command.
///
/// Applying the command swaps the stored placement with the topic's
/// current placement, so executing twice returns to the starting state.
/// Undo and redo are both the same `toggle_state` call; the state-machine
/// bookkeeping in [`crate::command::Command`] keeps the `Applied`/`Undone`
/// transitions auditable even though the data flow is symmetric.
#[derive(Debug)]
pub struct DragTopic {
    topic: TopicId,
    slot: DragState,
}

impl DragTopic {
    /// `order` comes from the caller, either explicit or derived from the
    /// drop position by the layout provider. `parent` of `None` leaves
    /// the topic as a root.
    pub fn new(
        topic: TopicId,
        position: Point,
        order: Option<i32>,
        parent: Option<TopicId>,
    ) -> Self {
        Self {
            topic,
            slot: DragState {
                position,
                order,
                parent,
            },
        }
    }

    /// Swap the buffered placement with the live one. The parent edge is
    /// only touched when the parent actually changes; pure repositioning
    /// under the same parent never churns the forest.
    pub fn toggle_state(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        if let Some(parent) = self.slot.parent {
            ctx.topic(parent)?;
        }
        let current = DragState {
            position: ctx.topic(self.topic)?.position,
            order: ctx.order(self.topic)?,
            parent: ctx.parent(self.topic)?,
        };

        if self.slot.parent != current.parent {
            if current.parent.is_some() {
                ctx.disconnect(self.topic)?;
            }
            if let Some(parent) = self.slot.parent {
                ctx.connect(self.topic, parent)?;
            }
        }
        ctx.set_order(self.topic, self.slot.order)?;
        ctx.set_position(self.topic, self.slot.position)?;

        self.slot = current;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{RecordingRenderBridge, RenderEvent};
    use mindweave_model::{Mindmap, TopicModel};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fixture() -> (CommandContext, Rc<RefCell<Vec<RenderEvent>>>) {
        let (mut map, root) = Mindmap::with_central_topic("Central").unwrap();
        for raw in [1, 2] {
            let id = map.add_topic(TopicModel::new(TopicId(raw))).unwrap();
            map.connect(id, root).unwrap();
            map.set_order(id, Some(raw as i32)).unwrap();
        }
        let bridge = RecordingRenderBridge::new();
        let events = bridge.events();
        (CommandContext::new(map, Box::new(bridge)), events)
    }

    #[test]
    fn test_drag_to_new_parent_and_back() {
        let (mut ctx, _events) = fixture();
        ctx.set_position(TopicId(2), Point::new(150.0, 80.0)).unwrap();

        let mut cmd = DragTopic::new(
            TopicId(2),
            Point::new(300.0, 10.0),
            Some(0),
            Some(TopicId(1)),
        );

        cmd.toggle_state(&mut ctx).unwrap();
        assert_eq!(ctx.parent(TopicId(2)).unwrap(), Some(TopicId(1)));
        assert_eq!(ctx.order(TopicId(2)).unwrap(), Some(0));
        assert_eq!(ctx.topic(TopicId(2)).unwrap().position, Point::new(300.0, 10.0));

        // The same call is the undo: the buffer now holds the old state
        cmd.toggle_state(&mut ctx).unwrap();
        assert_eq!(ctx.parent(TopicId(2)).unwrap(), Some(TopicId(0)));
        assert_eq!(ctx.order(TopicId(2)).unwrap(), Some(2));
        assert_eq!(ctx.topic(TopicId(2)).unwrap().position, Point::new(150.0, 80.0));
    }

    #[test]
    fn test_reorder_under_same_parent_keeps_edge() {
        let (mut ctx, events) = fixture();
        let mut cmd = DragTopic::new(
            TopicId(2),
            Point::new(150.0, -60.0),
            Some(0),
            Some(TopicId(0)),
        );

        cmd.toggle_state(&mut ctx).unwrap();

        assert_eq!(ctx.order(TopicId(2)).unwrap(), Some(0));
        assert_eq!(
            ctx.mindmap().forest().children(TopicId(0)).unwrap(),
            vec![TopicId(2), TopicId(1)]
        );
        // No disconnect/reconnect happened on the render side
        assert!(!events
            .borrow()
            .iter()
            .any(|e| matches!(e, RenderEvent::Disconnected(_))));
    }

    #[test]
    fn test_missing_new_parent_fails_before_detaching() {
        let (mut ctx, _events) = fixture();
        let mut cmd = DragTopic::new(TopicId(2), Point::default(), None, Some(TopicId(42)));

        assert!(cmd.toggle_state(&mut ctx).is_err());
        assert_eq!(ctx.parent(TopicId(2)).unwrap(), Some(TopicId(0)));
    }
}
