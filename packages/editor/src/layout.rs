//! Layout provider contract.
//!
//! Geometry is an external collaborator: given a topic and the position
//! the user asked for, it answers with the order value and final position
//! the topic should take. The core consumes the answer and never calls
//! into layout itself. Callers resolve a [`Placement`] first, then pass it
//! to [`crate::ActionDispatcher::drag_topic`].
//!
//! The provider is expected to lean on the forest's directional queries
//! (`siblings_in_vertical_direction`, `branches_in_vertical_direction`)
//! to find the neighbor above or below a dragged topic.

use mindweave_model::{Mindmap, Point, TopicId};
use serde::{Deserialize, Serialize};

/// Where a topic should land: its sibling order and final position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Point,
    pub order: Option<i32>,
}

impl Placement {
    pub fn new(position: Point, order: Option<i32>) -> Self {
        Self { position, order }
    }

    /// A position-only placement; the order value is left untouched.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            order: None,
        }
    }
}

/// The geometric layout collaborator.
pub trait LayoutEngine {
    /// Resolve the placement for `topic` were it dropped at `requested`.
    fn place(&self, mindmap: &Mindmap, topic: TopicId, requested: Point) -> Placement;
}
