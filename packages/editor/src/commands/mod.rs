//! Concrete command implementations, one module per editing intent.

mod add_relationship;
mod add_topics;
mod change_field;
mod delete_entities;
mod drag_topic;
mod feature_edit;
mod move_control_point;

pub use add_relationship::AddRelationship;
pub use add_topics::AddTopics;
pub use change_field::{ChangeField, FieldValue};
pub use delete_entities::DeleteEntities;
pub use drag_topic::DragTopic;
pub use feature_edit::{FeatureEdit, FeatureOp};
pub use move_control_point::MoveControlPoint;
