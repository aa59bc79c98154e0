//! Drag a relationship curve's control point.

use crate::context::CommandContext;
use crate::errors::EditorError;
use mindweave_model::{ControlPointIndex, Point, RelationshipId};

/// Forward: write the new control point into the relationship model and
/// its live geometry. Reverse: restore the displaced value, including
/// whether the point was **auto** (layout-computed, `None`) or **custom**
/// (user-placed, `Some`), not just the coordinate.
#[derive(Debug)]
pub struct MoveControlPoint {
    relationship: RelationshipId,
    index: ControlPointIndex,
    /// `Some` places the point by hand; `None` resets it to auto.
    point: Option<Point>,
    previous: Option<Option<Point>>,
}

impl MoveControlPoint {
    pub fn new(
        relationship: RelationshipId,
        index: ControlPointIndex,
        point: Option<Point>,
    ) -> Self {
        Self {
            relationship,
            index,
            point,
            previous: None,
        }
    }

    pub fn execute(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        let displaced = ctx.set_control_point(self.relationship, self.index, self.point)?;
        self.previous = Some(displaced);
        Ok(())
    }

    pub fn undo(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        let previous = self.previous.take().ok_or(EditorError::CommandNotApplied)?;
        ctx.set_control_point(self.relationship, self.index, previous)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NullRenderBridge;
    use mindweave_model::{Mindmap, RelationshipModel, TopicId, TopicModel};

    fn fixture() -> (CommandContext, RelationshipId) {
        let (mut map, root) = Mindmap::with_central_topic("Central").unwrap();
        let other = map.add_topic(TopicModel::with_text(TopicId(1), "B")).unwrap();
        map.connect(other, root).unwrap();
        let rel = map.new_relationship_id();
        map.add_relationship(RelationshipModel::new(rel, root, other))
            .unwrap();
        (CommandContext::new(map, Box::new(NullRenderBridge)), rel)
    }

    #[test]
    fn test_undo_restores_auto_state() {
        let (mut ctx, rel) = fixture();
        let mut cmd = MoveControlPoint::new(
            rel,
            ControlPointIndex::Start,
            Some(Point::new(33.0, -12.0)),
        );

        cmd.execute(&mut ctx).unwrap();
        let model = ctx.relationship(rel).unwrap();
        assert!(model.is_control_point_custom(ControlPointIndex::Start));

        cmd.undo(&mut ctx).unwrap();
        let model = ctx.relationship(rel).unwrap();
        // Back to auto, not to a custom point at the old coordinate
        assert!(!model.is_control_point_custom(ControlPointIndex::Start));
    }

    #[test]
    fn test_undo_restores_custom_coordinate() {
        let (mut ctx, rel) = fixture();
        ctx.set_control_point(rel, ControlPointIndex::End, Some(Point::new(5.0, 5.0)))
            .unwrap();

        let mut cmd =
            MoveControlPoint::new(rel, ControlPointIndex::End, Some(Point::new(90.0, 0.0)));
        cmd.execute(&mut ctx).unwrap();
        cmd.undo(&mut ctx).unwrap();

        assert_eq!(
            ctx.relationship(rel).unwrap().control_point(ControlPointIndex::End),
            Some(Point::new(5.0, 5.0))
        );
    }

    #[test]
    fn test_missing_relationship_propagates() {
        let (mut ctx, _rel) = fixture();
        let mut cmd =
            MoveControlPoint::new(RelationshipId(77), ControlPointIndex::Start, None);
        assert!(cmd.execute(&mut ctx).is_err());
    }
}
