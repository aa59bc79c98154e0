//! Relationship edges.
//!
//! A relationship is a non-tree edge between two existing topics. It is
//! independent of the parent/child forest (deleting it never changes
//! topology) and carries its own line styling and curve control points.

use crate::geometry::Point;
use crate::topic::TopicId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable id of a relationship within a document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RelationshipId(pub u32);

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineType {
    Simple,
    Polyline,
    Curved,
}

/// Which end of the relationship curve a control point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlPointIndex {
    /// Control point nearest the source topic.
    Start,
    /// Control point nearest the target topic.
    End,
}

/// A non-hierarchical edge between two topics.
///
/// A control point of `None` is **auto**: the layout pass computes it from
/// the endpoints. `Some(point)` is **custom**: the user dragged it there,
/// and that placement must survive undo/redo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipModel {
    pub id: RelationshipId,
    pub source: TopicId,
    pub target: TopicId,
    pub line_type: LineType,
    pub start_arrow: bool,
    pub end_arrow: bool,
    pub start_control: Option<Point>,
    pub end_control: Option<Point>,
}

impl RelationshipModel {
    pub fn new(id: RelationshipId, source: TopicId, target: TopicId) -> Self {
        Self {
            id,
            source,
            target,
            line_type: LineType::Curved,
            start_arrow: false,
            end_arrow: true,
            start_control: None,
            end_control: None,
        }
    }

    /// Whether this edge touches the given topic at either end.
    pub fn touches(&self, topic: TopicId) -> bool {
        self.source == topic || self.target == topic
    }

    pub fn control_point(&self, index: ControlPointIndex) -> Option<Point> {
        match index {
            ControlPointIndex::Start => self.start_control,
            ControlPointIndex::End => self.end_control,
        }
    }

    pub fn control_point_mut(&mut self, index: ControlPointIndex) -> &mut Option<Point> {
        match index {
            ControlPointIndex::Start => &mut self.start_control,
            ControlPointIndex::End => &mut self.end_control,
        }
    }

    /// True when the user has placed this control point by hand.
    pub fn is_control_point_custom(&self, index: ControlPointIndex) -> bool {
        self.control_point(index).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touches_either_end() {
        let rel = RelationshipModel::new(RelationshipId(1), TopicId(2), TopicId(5));
        assert!(rel.touches(TopicId(2)));
        assert!(rel.touches(TopicId(5)));
        assert!(!rel.touches(TopicId(9)));
    }

    #[test]
    fn test_control_points_default_to_auto() {
        let mut rel = RelationshipModel::new(RelationshipId(1), TopicId(1), TopicId(2));
        assert!(!rel.is_control_point_custom(ControlPointIndex::Start));

        *rel.control_point_mut(ControlPointIndex::Start) = Some(Point::new(10.0, -4.0));
        assert!(rel.is_control_point_custom(ControlPointIndex::Start));
        assert!(!rel.is_control_point_custom(ControlPointIndex::End));
    }
}
