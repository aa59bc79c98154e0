//! # Mindweave Model
//!
//! Canonical data model for the mindweave editing core.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Mindmap: document state                     │
//! │  - TopicModel per topic (content + style)   │
//! │  - RootedForest (pure topology)             │
//! │  - RelationshipModel set (non-tree edges)   │
//! └─────────────────────────────────────────────┘
//!                     ↑
//! ┌─────────────────────────────────────────────┐
//! │ editor: reversible commands mutate the      │
//! │ document through a single funnel            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The document is source of truth**: rendering and layout are
//!    derived views and never hold their own parent pointers
//! 2. **Topology is separate from content**: the forest stores ids, the
//!    topic models store everything visible
//! 3. **Fail fast**: lookups error on absent ids unless a `try_` variant
//!    is called; silent nulls are how undo stacks rot

pub mod errors;
pub mod forest;
pub mod geometry;
pub mod mindmap;
pub mod relationship;
pub mod topic;

pub use errors::{ErrorKind, ModelError};
pub use forest::{Node, RootedForest};
pub use geometry::{Point, Side};
pub use mindmap::Mindmap;
pub use relationship::{ControlPointIndex, LineType, RelationshipId, RelationshipModel};
pub use topic::{
    FeatureContent, FeatureId, FeatureKind, FeatureModel, FontStyle, FontWeight, TopicId,
    TopicModel, TopicShape,
};
