//! Delete topics (with their subtrees) and relationships.

use crate::context::CommandContext;
use crate::errors::EditorError;
use mindweave_model::{RelationshipId, RelationshipModel, TopicId, TopicModel};
use std::collections::HashSet;

/// Topology captured for one removed topic, recorded parents-first so
/// undo can replay creation in a valid order.
#[derive(Debug, Clone)]
struct CapturedTopic {
    model: TopicModel,
    parent: Option<TopicId>,
    order: Option<i32>,
}

/// Forward: drop any topic whose ancestor is also being deleted, remove
/// every relationship touching the affected subtrees (plus the ones named
/// explicitly), then delete the subtrees leaves-first. Reverse: recreate
/// every captured topic, reconnect it, replay every captured relationship,
/// and focus the first recreated topic.
#[derive(Debug)]
pub struct DeleteEntities {
    topics: Vec<TopicId>,
    relationships: Vec<RelationshipId>,
    captured_topics: Vec<CapturedTopic>,
    captured_relationships: Vec<RelationshipModel>,
}

impl DeleteEntities {
    pub fn new(topics: Vec<TopicId>, relationships: Vec<RelationshipId>) -> Self {
        Self {
            topics,
            relationships,
            captured_topics: Vec::new(),
            captured_relationships: Vec::new(),
        }
    }

    pub fn execute(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        self.captured_topics.clear();
        self.captured_relationships.clear();

        // Resolve everything up front: deleting against stale ids must
        // fail before any state changes.
        for &topic in &self.topics {
            ctx.topic(topic)?;
        }
        for &relationship in &self.relationships {
            ctx.relationship(relationship)?;
        }

        // Keep only subtree roots: a topic whose ancestor is also in the
        // set would already be gone by the time its own turn came.
        let requested: HashSet<TopicId> = self.topics.iter().copied().collect();
        let mut seen = HashSet::new();
        let mut subtree_roots = Vec::new();
        for &topic in &self.topics {
            if !seen.insert(topic) {
                continue;
            }
            let has_doomed_ancestor = ctx
                .ancestors(topic)?
                .iter()
                .any(|a| requested.contains(a));
            if !has_doomed_ancestor {
                subtree_roots.push(topic);
            }
        }

        // Preorder per subtree: parents before children.
        let mut affected = Vec::new();
        for &root in &subtree_roots {
            affected.extend(ctx.descendants(root)?);
        }

        // Relationships: explicit ones first, then everything touching an
        // affected topic, each id once.
        let mut doomed_relationships = Vec::new();
        for &id in self
            .relationships
            .iter()
            .chain(ctx.relationships_touching(&affected).iter())
        {
            if !doomed_relationships.contains(&id) {
                doomed_relationships.push(id);
            }
        }
        for id in doomed_relationships {
            self.captured_relationships
                .push(ctx.remove_relationship(id)?);
        }

        for &topic in &affected {
            self.captured_topics.push(CapturedTopic {
                model: ctx.topic(topic)?.clone(),
                parent: ctx.parent(topic)?,
                order: ctx.order(topic)?,
            });
        }

        // Leaves first: reverse preorder guarantees children go before
        // their parents.
        for &topic in affected.iter().rev() {
            if ctx.parent(topic)?.is_some() {
                ctx.disconnect(topic)?;
            }
            ctx.delete_topic(topic)?;
        }
        Ok(())
    }

    pub fn undo(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        for captured in &self.captured_topics {
            let id = ctx.create_topic(captured.model.clone())?;
            if let Some(parent) = captured.parent {
                ctx.connect(id, parent)?;
            }
            ctx.set_order(id, captured.order)?;
        }
        for relationship in &self.captured_relationships {
            ctx.add_relationship(relationship.clone())?;
        }
        if let Some(first) = self.captured_topics.first() {
            ctx.set_focus(Some(first.model.id))?;
        }
        Ok(())
    }
}
