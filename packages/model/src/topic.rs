//! Topic content model.
//!
//! A `TopicModel` carries everything a topic shows except its place in the
//! hierarchy: text, shape, fonts, colors, the shrink (collapsed-branch)
//! flag, and attached features (icons, notes, links). Topology lives in
//! [`crate::forest::RootedForest`]; the two are joined by `TopicId`.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable integer id of a topic, unique across the forest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TopicId(pub u32);

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual shape of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicShape {
    Line,
    RoundedRectangle,
    Rectangle,
    Ellipse,
    /// No border or fill at all.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    Normal,
    Italic,
}

/// Stable id of a feature within a document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct FeatureId(pub u32);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of feature is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Icon,
    Note,
    Link,
}

/// Feature payload; the variant fixes the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureContent {
    /// Gallery identifier of the icon, e.g. `"flag-red"`.
    Icon { icon: String },
    Note { text: String },
    Link { url: String },
}

impl FeatureContent {
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureContent::Icon { .. } => FeatureKind::Icon,
            FeatureContent::Note { .. } => FeatureKind::Note,
            FeatureContent::Link { .. } => FeatureKind::Link,
        }
    }
}

/// An icon, note or link attached to a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureModel {
    pub id: FeatureId,
    pub content: FeatureContent,
}

impl FeatureModel {
    pub fn new(id: FeatureId, content: FeatureContent) -> Self {
        Self { id, content }
    }

    pub fn kind(&self) -> FeatureKind {
        self.content.kind()
    }
}

/// Content of a single topic.
///
/// Styling fields are `None` when the topic inherits the theme default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicModel {
    pub id: TopicId,
    pub text: String,
    pub shape: Option<TopicShape>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_color: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    /// Collapsed-branch flag; a shrunken topic hides its subtree.
    pub shrunken: bool,
    /// Last position written back by the layout pass.
    pub position: Point,
    pub features: Vec<FeatureModel>,
}

impl TopicModel {
    pub fn new(id: TopicId) -> Self {
        Self {
            id,
            text: String::new(),
            shape: None,
            font_family: None,
            font_size: None,
            font_color: None,
            font_weight: None,
            font_style: None,
            background_color: None,
            border_color: None,
            shrunken: false,
            position: Point::default(),
            features: Vec::new(),
        }
    }

    pub fn with_text(id: TopicId, text: impl Into<String>) -> Self {
        let mut model = Self::new(id);
        model.text = text.into();
        model
    }

    pub fn feature(&self, id: FeatureId) -> Option<&FeatureModel> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn feature_mut(&mut self, id: FeatureId) -> Option<&mut FeatureModel> {
        self.features.iter_mut().find(|f| f.id == id)
    }

    pub fn add_feature(&mut self, feature: FeatureModel) {
        self.features.push(feature);
    }

    /// Detach a feature, returning it so callers can replay it later.
    pub fn remove_feature(&mut self, id: FeatureId) -> Option<FeatureModel> {
        let index = self.features.iter().position(|f| f.id == id)?;
        Some(self.features.remove(index))
    }
}
