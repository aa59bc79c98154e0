//! Generic field edits: every getter/setter pair on the topic model goes
//! through one command shape.

use crate::context::CommandContext;
use crate::errors::EditorError;
use mindweave_model::{FontStyle, FontWeight, TopicId, TopicModel, TopicShape};
use serde::{Deserialize, Serialize};
use std::mem::replace;

/// A field together with its new value. The variant fixes which field is
/// written, so applying a value can never hit the wrong field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    FontFamily(Option<String>),
    FontSize(Option<f64>),
    FontColor(Option<String>),
    FontWeight(Option<FontWeight>),
    FontStyle(Option<FontStyle>),
    Shape(Option<TopicShape>),
    BackgroundColor(Option<String>),
    BorderColor(Option<String>),
    Shrink(bool),
}

impl FieldValue {
    pub fn field(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::FontFamily(_) => "font-family",
            FieldValue::FontSize(_) => "font-size",
            FieldValue::FontColor(_) => "font-color",
            FieldValue::FontWeight(_) => "font-weight",
            FieldValue::FontStyle(_) => "font-style",
            FieldValue::Shape(_) => "shape",
            FieldValue::BackgroundColor(_) => "background-color",
            FieldValue::BorderColor(_) => "border-color",
            FieldValue::Shrink(_) => "shrink",
        }
    }

    /// Write the value into the model, returning the displaced value.
    pub fn apply(self, model: &mut TopicModel) -> FieldValue {
        match self {
            FieldValue::Text(v) => FieldValue::Text(replace(&mut model.text, v)),
            FieldValue::FontFamily(v) => {
                FieldValue::FontFamily(replace(&mut model.font_family, v))
            }
            FieldValue::FontSize(v) => FieldValue::FontSize(replace(&mut model.font_size, v)),
            FieldValue::FontColor(v) => FieldValue::FontColor(replace(&mut model.font_color, v)),
            FieldValue::FontWeight(v) => {
                FieldValue::FontWeight(replace(&mut model.font_weight, v))
            }
            FieldValue::FontStyle(v) => FieldValue::FontStyle(replace(&mut model.font_style, v)),
            FieldValue::Shape(v) => FieldValue::Shape(replace(&mut model.shape, v)),
            FieldValue::BackgroundColor(v) => {
                FieldValue::BackgroundColor(replace(&mut model.background_color, v))
            }
            FieldValue::BorderColor(v) => {
                FieldValue::BorderColor(replace(&mut model.border_color, v))
            }
            FieldValue::Shrink(v) => FieldValue::Shrink(replace(&mut model.shrunken, v)),
        }
    }
}

/// Forward: apply the value to every target, storing each target's
/// previous value. Reverse: re-apply the stored values.
#[derive(Debug)]
pub struct ChangeField {
    targets: Vec<TopicId>,
    value: FieldValue,
    discard_key: Option<String>,
    previous: Vec<(TopicId, FieldValue)>,
}

impl ChangeField {
    /// `discard_key` marks this edit as part of a continuous gesture
    /// (color wheel, size slider): consecutive commands with equal keys
    /// collapse to one undo entry.
    pub fn new(targets: Vec<TopicId>, value: FieldValue, discard_key: Option<String>) -> Self {
        Self {
            targets,
            value,
            discard_key,
            previous: Vec::new(),
        }
    }

    pub fn discard_key(&self) -> Option<&str> {
        self.discard_key.as_deref()
    }

    pub fn execute(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        // All targets must resolve before any of them is written.
        for &target in &self.targets {
            ctx.topic(target)?;
        }
        let mut previous = Vec::with_capacity(self.targets.len());
        for &target in &self.targets {
            let displaced = self.value.clone().apply(ctx.topic_mut(target)?);
            previous.push((target, displaced));
        }
        self.previous = previous;
        Ok(())
    }

    pub fn undo(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        for (target, value) in std::mem::take(&mut self.previous) {
            value.apply(ctx.topic_mut(target)?);
        }
        Ok(())
    }
}
