//! Error types for the editor

use mindweave_model::{ErrorKind, ModelError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("command can not be applied two times in a row")]
    CommandAlreadyApplied,

    #[error("command has not been applied; there is nothing to undo")]
    CommandNotApplied,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("missing required argument: {0}")]
    Argument(&'static str),
}

impl EditorError {
    /// Classification into the editor-wide taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditorError::Model(err) => err.kind(),
            EditorError::CommandAlreadyApplied | EditorError::CommandNotApplied => {
                ErrorKind::InvariantViolation
            }
            EditorError::Validation(_) => ErrorKind::Validation,
            EditorError::Argument(_) => ErrorKind::Argument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindweave_model::TopicId;

    #[test]
    fn test_model_errors_keep_their_kind() {
        let err: EditorError = ModelError::TopicNotFound(TopicId(3)).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_command_state_errors_are_invariant_violations() {
        assert_eq!(
            EditorError::CommandAlreadyApplied.kind(),
            ErrorKind::InvariantViolation
        );
        assert_eq!(
            EditorError::CommandNotApplied.kind(),
            ErrorKind::InvariantViolation
        );
    }
}
