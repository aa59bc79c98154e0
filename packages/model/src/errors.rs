//! Error types for the document model.
//!
//! Lookup failures and invariant violations are hard errors everywhere;
//! the only soft lookups are the explicit `try_*` variants. Swallowing a
//! failure here would let the undo history drift away from the live
//! document, which is strictly worse than surfacing the failure.

use crate::relationship::RelationshipId;
use crate::topic::{FeatureId, TopicId};
use thiserror::Error;

/// Broad classification of an error, matching the editor-wide taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced id is absent from the document.
    NotFound,
    /// An operation would break a structural invariant.
    InvariantViolation,
    /// A caller-supplied value fails a precondition.
    Validation,
    /// A required argument is missing or degenerate.
    Argument,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("topic {0} not found")]
    TopicNotFound(TopicId),

    #[error("relationship {0} not found")]
    RelationshipNotFound(RelationshipId),

    #[error("feature {feature} not found on topic {topic}")]
    FeatureNotFound { topic: TopicId, feature: FeatureId },

    #[error("topic {0} already exists in the forest")]
    DuplicateId(TopicId),

    #[error("topic {0} is already attached to a parent")]
    AlreadyAttached(TopicId),

    #[error("topic {0} already has a parent; disconnect it first")]
    AlreadyConnected(TopicId),

    #[error("topic {0} has no parent to disconnect from")]
    NotConnected(TopicId),

    #[error("connecting {child} under {parent} would create a cycle")]
    CycleDetected { parent: TopicId, child: TopicId },

    #[error("topic {0} is still connected; disconnect it before removal")]
    StillConnected(TopicId),

    #[error("topic {0} still has children; remove them first")]
    HasChildren(TopicId),

    #[error("topic {0} still has relationships; remove them first")]
    HasRelationships(TopicId),

    #[error("relationship {0} already exists")]
    DuplicateRelationship(RelationshipId),

    #[error("invalid argument: {0}")]
    Argument(&'static str),
}

impl ModelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::TopicNotFound(_)
            | ModelError::RelationshipNotFound(_)
            | ModelError::FeatureNotFound { .. } => ErrorKind::NotFound,

            ModelError::DuplicateId(_)
            | ModelError::AlreadyAttached(_)
            | ModelError::AlreadyConnected(_)
            | ModelError::NotConnected(_)
            | ModelError::CycleDetected { .. }
            | ModelError::StillConnected(_)
            | ModelError::HasChildren(_)
            | ModelError::HasRelationships(_)
            | ModelError::DuplicateRelationship(_) => ErrorKind::InvariantViolation,

            ModelError::Argument(_) => ErrorKind::Argument,
        }
    }
}
