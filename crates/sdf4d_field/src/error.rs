//! Error types for scene construction and field evaluation
//!
//! Library code never panics on malformed input: structural mistakes are
//! reported through these enums, while per-shape data problems (an
//! out-of-range kind in a wire record) degrade to the far sentinel so one bad
//! shape cannot abort a whole scene fold.

use crate::scene::ShapeKey;

/// Error evaluating a flat shape-record list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// A record claims more children than the list holds
    ChildOverrun {
        /// Index of the offending parent record
        index: usize,
        /// Its claimed child count
        num_children: i32,
        /// Total record count
        len: usize,
    },
    /// A record carries a negative child count
    NegativeChildCount {
        /// Index of the offending record
        index: usize,
        /// The negative count
        num_children: i32,
    },
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::ChildOverrun { index, num_children, len } => write!(
                f,
                "record {} claims {} children but the list has {} records",
                index, num_children, len
            ),
            FieldError::NegativeChildCount { index, num_children } => write!(
                f,
                "record {} has negative child count {}",
                index, num_children
            ),
        }
    }
}

impl std::error::Error for FieldError {}

/// Error mutating a scene arena or exporting it to wire records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The referenced shape key is stale or foreign to this scene
    MissingShape(ShapeKey),
    /// The hierarchy is deeper than the target representation allows
    DepthExceeded {
        /// Depth found (roots are depth 0)
        depth: usize,
        /// Maximum representable depth
        max: usize,
    },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::MissingShape(key) => write!(f, "no shape for key {:?}", key),
            SceneError::DepthExceeded { depth, max } => write!(
                f,
                "hierarchy depth {} exceeds the maximum of {}",
                depth, max
            ),
        }
    }
}

impl std::error::Error for SceneError {}
