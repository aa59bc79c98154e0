//! # Mindmap document
//!
//! The canonical document: topic models, the rooted forest joining them,
//! and the relationship set. Everything the command layer edits goes
//! through this type, which keeps the three collections in sync: a topic
//! id present in the forest is always present in the model map and vice
//! versa, and no relationship may outlive either of its endpoints.

use crate::errors::ModelError;
use crate::forest::RootedForest;
use crate::geometry::Point;
use crate::relationship::{RelationshipId, RelationshipModel};
use crate::topic::{FeatureId, TopicId, TopicModel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An editable mind-map document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mindmap {
    topics: HashMap<TopicId, TopicModel>,
    forest: RootedForest,
    relationships: Vec<RelationshipModel>,
    next_topic_id: u32,
    next_feature_id: u32,
    next_relationship_id: u32,
}

impl Mindmap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor: a document seeded with one central topic.
    pub fn with_central_topic(text: impl Into<String>) -> Result<(Self, TopicId), ModelError> {
        let mut map = Self::new();
        let id = map.new_topic_id();
        map.add_topic(TopicModel::with_text(id, text))?;
        Ok((map, id))
    }

    // --- id allocation -------------------------------------------------

    /// Next free topic id. Monotonic; never reuses an id, including ids
    /// of deleted topics, so undo replay can recreate topics verbatim.
    pub fn new_topic_id(&mut self) -> TopicId {
        let id = TopicId(self.next_topic_id);
        self.next_topic_id += 1;
        id
    }

    pub fn new_feature_id(&mut self) -> FeatureId {
        let id = FeatureId(self.next_feature_id);
        self.next_feature_id += 1;
        id
    }

    pub fn new_relationship_id(&mut self) -> RelationshipId {
        let id = RelationshipId(self.next_relationship_id);
        self.next_relationship_id += 1;
        id
    }

    // --- topics --------------------------------------------------------

    /// Insert a topic as a new forest root. Rejects duplicate ids.
    pub fn add_topic(&mut self, model: TopicModel) -> Result<TopicId, ModelError> {
        let id = model.id;
        self.forest.add(id)?;
        self.next_topic_id = self.next_topic_id.max(id.0 + 1);
        self.next_feature_id = model
            .features
            .iter()
            .fold(self.next_feature_id, |next, f| next.max(f.id.0 + 1));
        self.topics.insert(id, model);
        Ok(id)
    }

    /// Remove a disconnected, childless topic. Fails while any
    /// relationship still touches it, so edges can never dangle.
    pub fn remove_topic(&mut self, id: TopicId) -> Result<TopicModel, ModelError> {
        if self.relationships.iter().any(|r| r.touches(id)) {
            return Err(ModelError::HasRelationships(id));
        }
        self.forest.remove(id)?;
        self.topics.remove(&id).ok_or(ModelError::TopicNotFound(id))
    }

    pub fn topic(&self, id: TopicId) -> Result<&TopicModel, ModelError> {
        self.topics.get(&id).ok_or(ModelError::TopicNotFound(id))
    }

    pub fn topic_mut(&mut self, id: TopicId) -> Result<&mut TopicModel, ModelError> {
        self.topics
            .get_mut(&id)
            .ok_or(ModelError::TopicNotFound(id))
    }

    pub fn try_topic(&self, id: TopicId) -> Option<&TopicModel> {
        self.topics.get(&id)
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn topic_ids(&self) -> impl Iterator<Item = TopicId> + '_ {
        self.topics.keys().copied()
    }

    // --- topology ------------------------------------------------------

    /// Read access to the forest. Mutation goes through the document so
    /// the model map and the forest cannot drift apart.
    pub fn forest(&self) -> &RootedForest {
        &self.forest
    }

    pub fn connect(&mut self, child: TopicId, parent: TopicId) -> Result<(), ModelError> {
        self.forest.connect(child, parent)
    }

    pub fn disconnect(&mut self, id: TopicId) -> Result<(), ModelError> {
        self.forest.disconnect(id)
    }

    pub fn set_order(&mut self, id: TopicId, order: Option<i32>) -> Result<(), ModelError> {
        self.forest.set_order(id, order)
    }

    /// Position accessor for the forest's directional queries; reads the
    /// layout write-back stored on the topic models.
    fn position_of(&self) -> impl Fn(TopicId) -> Point + '_ {
        // The forest and the topic map are kept in sync by construction;
        // the default only covers the unreachable miss.
        move |id| self.try_topic(id).map(|t| t.position).unwrap_or_default()
    }

    pub fn siblings_in_vertical_direction(
        &self,
        id: TopicId,
        signed_offset: i32,
    ) -> Result<Vec<TopicId>, ModelError> {
        self.forest
            .siblings_in_vertical_direction(id, signed_offset, self.position_of())
    }

    pub fn branches_in_vertical_direction(
        &self,
        id: TopicId,
        signed_offset: i32,
    ) -> Result<Vec<TopicId>, ModelError> {
        self.forest
            .branches_in_vertical_direction(id, signed_offset, self.position_of())
    }

    // --- relationships -------------------------------------------------

    /// Add a relationship edge. Both endpoints must exist and the id must
    /// be fresh.
    pub fn add_relationship(
        &mut self,
        model: RelationshipModel,
    ) -> Result<RelationshipId, ModelError> {
        self.topic(model.source)?;
        self.topic(model.target)?;
        if self.relationships.iter().any(|r| r.id == model.id) {
            return Err(ModelError::DuplicateRelationship(model.id));
        }
        let id = model.id;
        self.next_relationship_id = self.next_relationship_id.max(id.0 + 1);
        self.relationships.push(model);
        Ok(id)
    }

    /// Detach a relationship, returning it so callers can replay it.
    pub fn remove_relationship(
        &mut self,
        id: RelationshipId,
    ) -> Result<RelationshipModel, ModelError> {
        let index = self
            .relationships
            .iter()
            .position(|r| r.id == id)
            .ok_or(ModelError::RelationshipNotFound(id))?;
        Ok(self.relationships.remove(index))
    }

    pub fn relationship(&self, id: RelationshipId) -> Result<&RelationshipModel, ModelError> {
        self.relationships
            .iter()
            .find(|r| r.id == id)
            .ok_or(ModelError::RelationshipNotFound(id))
    }

    pub fn relationship_mut(
        &mut self,
        id: RelationshipId,
    ) -> Result<&mut RelationshipModel, ModelError> {
        self.relationships
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ModelError::RelationshipNotFound(id))
    }

    pub fn relationships(&self) -> &[RelationshipModel] {
        &self.relationships
    }

    /// Ids of every relationship touching any of the given topics, in
    /// document order, each listed once.
    pub fn relationships_touching(&self, topics: &[TopicId]) -> Vec<RelationshipId> {
        self.relationships
            .iter()
            .filter(|r| topics.iter().any(|&t| r.touches(t)))
            .map(|r| r.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_with_children() -> (Mindmap, TopicId, TopicId, TopicId) {
        let (mut map, root) = Mindmap::with_central_topic("Central").unwrap();
        let a = map.new_topic_id();
        map.add_topic(TopicModel::with_text(a, "A")).unwrap();
        map.connect(a, root).unwrap();
        let b = map.new_topic_id();
        map.add_topic(TopicModel::with_text(b, "B")).unwrap();
        map.connect(b, root).unwrap();
        (map, root, a, b)
    }

    #[test]
    fn test_topic_ids_never_reused() {
        let (mut map, _root, a, _b) = map_with_children();
        map.disconnect(a).unwrap();
        map.remove_topic(a).unwrap();
        let fresh = map.new_topic_id();
        assert_ne!(fresh, a);
    }

    #[test]
    fn test_add_topic_rejects_duplicates() {
        let (mut map, root, _a, _b) = map_with_children();
        let err = map.add_topic(TopicModel::new(root)).unwrap_err();
        assert_eq!(err, ModelError::DuplicateId(root));
    }

    #[test]
    fn test_remove_topic_guards_relationships() {
        let (mut map, _root, a, b) = map_with_children();
        let rel_id = map.new_relationship_id();
        map.add_relationship(RelationshipModel::new(rel_id, a, b))
            .unwrap();

        map.disconnect(a).unwrap();
        assert_eq!(map.remove_topic(a), Err(ModelError::HasRelationships(a)));

        map.remove_relationship(rel_id).unwrap();
        map.remove_topic(a).unwrap();
        assert!(map.try_topic(a).is_none());
        assert!(!map.forest().contains(a));
    }

    #[test]
    fn test_relationship_endpoints_must_exist() {
        let (mut map, _root, a, _b) = map_with_children();
        let rel_id = map.new_relationship_id();
        let err = map
            .add_relationship(RelationshipModel::new(rel_id, a, TopicId(99)))
            .unwrap_err();
        assert_eq!(err, ModelError::TopicNotFound(TopicId(99)));
    }

    #[test]
    fn test_relationships_touching_deduplicates_by_document_order() {
        let (mut map, root, a, b) = map_with_children();
        let r1 = map.new_relationship_id();
        map.add_relationship(RelationshipModel::new(r1, a, b)).unwrap();
        let r2 = map.new_relationship_id();
        map.add_relationship(RelationshipModel::new(r2, b, root))
            .unwrap();

        // Both a and b listed: r1 touches both but appears once
        assert_eq!(map.relationships_touching(&[a, b]), vec![r1, r2]);
        assert_eq!(map.relationships_touching(&[a]), vec![r1]);
        assert_eq!(map.relationships_touching(&[root]), vec![r2]);
    }

    #[test]
    fn test_document_serialization_round_trip() {
        let (mut map, _root, a, b) = map_with_children();
        let rel_id = map.new_relationship_id();
        map.add_relationship(RelationshipModel::new(rel_id, a, b))
            .unwrap();

        let json = serde_json::to_string(&map).unwrap();
        let restored: Mindmap = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.topic_count(), map.topic_count());
        assert_eq!(restored.relationships().len(), 1);
        assert_eq!(restored.forest().children(TopicId(0)).unwrap().len(), 2);
    }
}
