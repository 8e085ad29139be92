//! 4D signed-distance-field scene engine
//!
//! This crate evaluates scenes of 4D SDF primitives sliced into 3D:
//!
//! - [`ShapeKind`] and the primitive distance functions - per-shape fields
//! - [`Operation`] and [`combine`] - the boolean/blend combination algebra
//! - [`Shape4D`] - authored shape parameters and the local-space transform
//! - [`Scene`] - arena tree of shapes with generational [`ShapeKey`]s
//! - [`SceneSnapshot`] - immutable per-frame flattening with the fold
//!   evaluator and the [`FieldSample`] shading query
//! - [`ShapeRecord`] - the 84-byte wire record for external shading stages,
//!   with [`evaluate_records`] as the record-level legacy walk
//! - [`SliceState`] - the W offset/hyper-rotation lifting 3D points to 4D
//! - [`SceneFile`] - RON scene authoring format
//!
//! Evaluation is pure: a snapshot plus a sample point in, a distance out.
//! Snapshots are `Send + Sync` and meant to be queried from many threads
//! while the next frame's scene is edited.

mod buffer;
mod combine;
mod error;
mod primitives;
mod scene;
mod scene_file;
mod shape;
mod slice;
mod snapshot;

pub use buffer::{evaluate_records, ShapeRecord};
pub use combine::{combine, combine_weight, smooth_min, Operation};
pub use error::{FieldError, SceneError};
pub use primitives::{
    sd_cone, sd_duo_cylinder, sd_five_cell, sd_hypercube, sd_hypersphere, sd_plane,
    sd_sixteen_cell, shape_distance, ShapeKind,
};
pub use scene::{Scene, SceneDirty, ShapeKey};
pub use scene_file::{SceneFile, SceneLoadError, SceneSaveError, ShapeTemplate};
pub use shape::{to_local_space, Shape4D, BLEND_STRENGTH_SCALE};
pub use slice::SliceState;
pub use snapshot::{FieldSample, ResolvedShape, SceneSnapshot, FAR_DISTANCE};

// Re-export commonly used types from sdf4d_math for convenience
pub use sdf4d_math::{Rot2, Vec3, Vec4};
