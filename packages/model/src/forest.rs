//! # Rooted forest
//!
//! Single source of truth for "who is connected to whom". The forest is an
//! arena keyed by [`TopicId`]: every entry stores its parent and children as
//! ids, never as references, so there are no ownership cycles to manage and
//! traversal is plain map lookups.
//!
//! ## Invariants
//!
//! - The parent relation is single-valued: a node must be disconnected
//!   before it can be connected again.
//! - The parent relation is acyclic; `connect` rejects attaching a node
//!   underneath its own subtree.
//! - At any point the forest is the disjoint union of all root-reachable
//!   trees: disconnecting re-roots the node, it never orphans it.
//!
//! The forest is purely structural. Side (left/right of the central topic)
//! and vertical ordering are read from positions supplied by the caller
//! through a position accessor: the geometry read-back written by the
//! external layout pass.

use crate::errors::ModelError;
use crate::geometry::{Point, Side};
use crate::topic::TopicId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single forest entry. Fields are ids into the owning arena.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    parent: Option<TopicId>,
    children: Vec<TopicId>,
    order: Option<i32>,
}

impl Node {
    pub fn parent(&self) -> Option<TopicId> {
        self.parent
    }

    pub fn order(&self) -> Option<i32> {
        self.order
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// In-memory forest of topic nodes. Pure topology, no geometry, no
/// rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootedForest {
    nodes: HashMap<TopicId, Node>,
    roots: Vec<TopicId>,
}

impl RootedForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: TopicId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Ids of every root, in insertion order.
    pub fn roots(&self) -> &[TopicId] {
        &self.roots
    }

    /// Insert a node as a new root.
    pub fn add(&mut self, id: TopicId) -> Result<(), ModelError> {
        if let Some(existing) = self.nodes.get(&id) {
            return Err(if existing.parent.is_some() {
                ModelError::AlreadyAttached(id)
            } else {
                ModelError::DuplicateId(id)
            });
        }
        self.nodes.insert(id, Node::default());
        self.roots.push(id);
        Ok(())
    }

    /// Attach `child` under `parent`. The child must currently be a root.
    pub fn connect(&mut self, child: TopicId, parent: TopicId) -> Result<(), ModelError> {
        self.find(parent)?;
        if self.find(child)?.parent.is_some() {
            return Err(ModelError::AlreadyConnected(child));
        }
        // The child is a root, so a cycle is only possible when the parent
        // lives inside the child's own tree.
        if parent == child || self.ancestors(parent)?.contains(&child) {
            return Err(ModelError::CycleDetected { parent, child });
        }

        self.nodes
            .get_mut(&parent)
            .ok_or(ModelError::TopicNotFound(parent))?
            .children
            .push(child);
        self.nodes
            .get_mut(&child)
            .ok_or(ModelError::TopicNotFound(child))?
            .parent = Some(parent);
        self.roots.retain(|&r| r != child);
        Ok(())
    }

    /// Detach a node from its parent, re-adding it to the root list.
    pub fn disconnect(&mut self, id: TopicId) -> Result<(), ModelError> {
        let parent = self
            .find(id)?
            .parent
            .ok_or(ModelError::NotConnected(id))?;

        self.nodes
            .get_mut(&parent)
            .ok_or(ModelError::TopicNotFound(parent))?
            .children
            .retain(|&c| c != id);
        self.nodes
            .get_mut(&id)
            .ok_or(ModelError::TopicNotFound(id))?
            .parent = None;
        self.roots.push(id);
        Ok(())
    }

    /// Delete a root node. Never recursive: callers disconnect and remove
    /// descendants explicitly, so the command layer decides cascade order.
    pub fn remove(&mut self, id: TopicId) -> Result<(), ModelError> {
        let node = self.find(id)?;
        if node.parent.is_some() {
            return Err(ModelError::StillConnected(id));
        }
        if !node.children.is_empty() {
            return Err(ModelError::HasChildren(id));
        }
        self.nodes.remove(&id);
        self.roots.retain(|&r| r != id);
        Ok(())
    }

    /// Look a node up, failing hard when it is absent.
    pub fn find(&self, id: TopicId) -> Result<&Node, ModelError> {
        self.nodes.get(&id).ok_or(ModelError::TopicNotFound(id))
    }

    /// Speculative lookup for callers that expect absence, e.g. checking
    /// whether a just-deleted node still exists during undo replay.
    pub fn try_find(&self, id: TopicId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn parent(&self, id: TopicId) -> Result<Option<TopicId>, ModelError> {
        Ok(self.find(id)?.parent)
    }

    /// Children of a node, sorted by their order values. Nodes without an
    /// order sort after ordered siblings, keeping insertion order among
    /// themselves.
    pub fn children(&self, id: TopicId) -> Result<Vec<TopicId>, ModelError> {
        let mut children = self.find(id)?.children.clone();
        children.sort_by_key(|c| {
            self.nodes
                .get(c)
                .and_then(|n| n.order)
                .unwrap_or(i32::MAX)
        });
        Ok(children)
    }

    pub fn order(&self, id: TopicId) -> Result<Option<i32>, ModelError> {
        Ok(self.find(id)?.order)
    }

    pub fn set_order(&mut self, id: TopicId, order: Option<i32>) -> Result<(), ModelError> {
        self.find(id)?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.order = order;
        }
        Ok(())
    }

    /// Ancestors from the immediate parent up to the root.
    pub fn ancestors(&self, id: TopicId) -> Result<Vec<TopicId>, ModelError> {
        let mut ancestors = Vec::new();
        let mut current = self.find(id)?.parent;
        while let Some(ancestor) = current {
            ancestors.push(ancestor);
            current = self.find(ancestor)?.parent;
        }
        Ok(ancestors)
    }

    /// All children of the same parent, excluding the node itself. A root
    /// has no siblings.
    pub fn siblings(&self, id: TopicId) -> Result<Vec<TopicId>, ModelError> {
        match self.find(id)?.parent {
            Some(parent) => Ok(self
                .children(parent)?
                .into_iter()
                .filter(|&c| c != id)
                .collect()),
            None => Ok(Vec::new()),
        }
    }

    /// Root of the tree containing this node.
    pub fn root_of(&self, id: TopicId) -> Result<TopicId, ModelError> {
        Ok(self.ancestors(id)?.last().copied().unwrap_or(id))
    }

    pub fn is_leaf(&self, id: TopicId) -> Result<bool, ModelError> {
        Ok(self.find(id)?.children.is_empty())
    }

    /// Preorder listing of the subtree rooted at `id`, including `id`
    /// itself. Children are visited in order-value order.
    pub fn descendants(&self, id: TopicId) -> Result<Vec<TopicId>, ModelError> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            result.push(current);
            let mut children = self.children(current)?;
            children.reverse();
            stack.extend(children);
        }
        Ok(result)
    }

    /// True iff following single-child chains from this node always
    /// reaches exactly one leaf. The layout pass uses this to decide
    /// whether a sub-branch can be drawn as a simple line.
    pub fn has_single_path_to_single_leaf(&self, id: TopicId) -> Result<bool, ModelError> {
        let mut current = id;
        loop {
            let node = self.find(current)?;
            match node.children.as_slice() {
                [] => return Ok(true),
                [only] => current = *only,
                _ => return Ok(false),
            }
        }
    }

    /// A branching point: the node has siblings but exactly one child.
    pub fn is_start_of_sub_branch(&self, id: TopicId) -> Result<bool, ModelError> {
        Ok(!self.siblings(id)?.is_empty() && self.find(id)?.child_count() == 1)
    }

    /// Siblings on the same side of the parent as `id`, strictly beyond it
    /// in the vertical direction of `signed_offset` (positive is downward),
    /// nearest first. Positions are read through `position_of`, the
    /// geometry read-back supplied by the layout pass.
    pub fn siblings_in_vertical_direction<F>(
        &self,
        id: TopicId,
        signed_offset: i32,
        position_of: F,
    ) -> Result<Vec<TopicId>, ModelError>
    where
        F: Fn(TopicId) -> Point,
    {
        if signed_offset == 0 {
            return Err(ModelError::Argument("signed_offset must be non-zero"));
        }
        let parent = match self.find(id)?.parent {
            Some(parent) => parent,
            None => return Ok(Vec::new()),
        };
        let reference = position_of(parent);
        let own = position_of(id);
        let side = Side::of(own, reference);

        let mut candidates: Vec<TopicId> = self
            .siblings(id)?
            .into_iter()
            .filter(|&s| Side::of(position_of(s), reference) == side)
            .filter(|&s| {
                let y = position_of(s).y;
                if signed_offset > 0 {
                    y > own.y
                } else {
                    y < own.y
                }
            })
            .collect();
        sort_by_vertical_distance(&mut candidates, signed_offset, &position_of);
        Ok(candidates)
    }

    /// Top-level branches on the same side of the common ancestor as `id`,
    /// strictly beyond `id`'s own branch in the vertical direction of
    /// `signed_offset`, nearest first.
    pub fn branches_in_vertical_direction<F>(
        &self,
        id: TopicId,
        signed_offset: i32,
        position_of: F,
    ) -> Result<Vec<TopicId>, ModelError>
    where
        F: Fn(TopicId) -> Point,
    {
        if signed_offset == 0 {
            return Err(ModelError::Argument("signed_offset must be non-zero"));
        }
        let ancestors = self.ancestors(id)?;
        let root = match ancestors.last() {
            Some(&root) => root,
            None => return Err(ModelError::Argument("node is a root and has no branch")),
        };
        // The branch is the ancestor-or-self hanging directly off the root.
        let branch = if ancestors.len() == 1 {
            id
        } else {
            ancestors[ancestors.len() - 2]
        };

        let reference = position_of(root);
        let side = Side::of(position_of(id), reference);
        let branch_y = position_of(branch).y;

        let mut candidates: Vec<TopicId> = self
            .children(root)?
            .into_iter()
            .filter(|&b| b != branch)
            .filter(|&b| Side::of(position_of(b), reference) == side)
            .filter(|&b| {
                let y = position_of(b).y;
                if signed_offset > 0 {
                    y > branch_y
                } else {
                    y < branch_y
                }
            })
            .collect();
        sort_by_vertical_distance(&mut candidates, signed_offset, &position_of);
        Ok(candidates)
    }
}

fn sort_by_vertical_distance<F>(candidates: &mut [TopicId], signed_offset: i32, position_of: &F)
where
    F: Fn(TopicId) -> Point,
{
    if signed_offset > 0 {
        candidates.sort_by(|a, b| position_of(*a).y.total_cmp(&position_of(*b).y));
    } else {
        candidates.sort_by(|a, b| position_of(*b).y.total_cmp(&position_of(*a).y));
    }
}
