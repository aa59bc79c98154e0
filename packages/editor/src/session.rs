//! # Edit session
//!
//! One editing client's view of a document: the dispatcher plus current
//! selection and the save-prompt surface. There is no ambient dispatcher
//! singleton; whoever needs to issue intents is handed this session (or
//! its dispatcher) explicitly.

use crate::context::RenderBridge;
use crate::dispatcher::ActionDispatcher;
use crate::errors::EditorError;
use mindweave_model::{Mindmap, TopicId};

/// A single-user editing session. History lives for the lifetime of the
/// session and is discarded wholesale with it.
pub struct EditSession {
    dispatcher: ActionDispatcher,
    selection: Vec<TopicId>,
}

impl EditSession {
    pub fn new(mindmap: Mindmap, render: Box<dyn RenderBridge>) -> Self {
        Self {
            dispatcher: ActionDispatcher::new(mindmap, render),
            selection: Vec::new(),
        }
    }

    /// The intent API for this session's document.
    pub fn dispatcher(&mut self) -> &mut ActionDispatcher {
        &mut self.dispatcher
    }

    pub fn mindmap(&self) -> &Mindmap {
        self.dispatcher.mindmap()
    }

    // --- selection -----------------------------------------------------

    /// Replace the selection. Every id must resolve; selections of stale
    /// ids are how intents get dispatched against deleted topics.
    pub fn set_selection(&mut self, topics: Vec<TopicId>) -> Result<(), EditorError> {
        for &topic in &topics {
            self.dispatcher.mindmap().topic(topic)?;
        }
        self.selection = topics;
        Ok(())
    }

    pub fn selection(&self) -> &[TopicId] {
        &self.selection
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The precondition behind single-target intents ("select exactly one
    /// topic"): checked before any command is constructed.
    pub fn single_selection(&self) -> Result<TopicId, EditorError> {
        match self.selection.as_slice() {
            [only] => Ok(*only),
            other => Err(EditorError::Validation(format!(
                "exactly one topic must be selected, found {}",
                other.len()
            ))),
        }
    }

    /// Delete everything selected, clearing the selection first so no
    /// stale ids survive the command.
    pub fn delete_selection(&mut self) -> Result<(), EditorError> {
        let topics = std::mem::take(&mut self.selection);
        self.dispatcher.delete_entities(topics, Vec::new())
    }

    // --- save prompts --------------------------------------------------

    pub fn is_dirty(&self) -> bool {
        self.dispatcher.has_unsaved_changes()
    }

    pub fn mark_saved(&mut self) {
        self.dispatcher.mark_saved();
    }
}
