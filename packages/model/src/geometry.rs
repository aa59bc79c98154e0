//! Minimal geometry carried by the model.
//!
//! The core never computes layout; it only stores positions written back by
//! the external layout pass and compares them when answering directional
//! queries.

use serde::{Deserialize, Serialize};

/// A position in the diagram's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which side of a reference point a position falls on.
///
/// Topics to the left of the central topic hang leftward, topics to the
/// right hang rightward; the distinction is read from geometry, never
/// stored as a topology flag. A position exactly on the reference line
/// counts as `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Side of `position` relative to `reference`, by horizontal sign.
    pub fn of(position: Point, reference: Point) -> Self {
        if position.x < reference.x {
            Side::Left
        } else {
            Side::Right
        }
    }
}
