//! sdf4d - 4D signed-distance-field scene engine
//!
//! Scenes of 4D SDF primitives, merged through a boolean/blend algebra and
//! sliced into 3D by a movable W hyperplane. The engine is split across two
//! crates re-exported here:
//!
//! - [`sdf4d_math`] - vectors and planar rotations
//! - [`sdf4d_field`] - primitives, combination algebra, scene arena,
//!   snapshot evaluator, wire records, and the slice transform

pub mod config;

pub use config::{AppConfig, ConfigError};

// Re-export the engine surface for convenience
pub use sdf4d_field::{
    combine, combine_weight, evaluate_records, sd_cone, sd_duo_cylinder, sd_five_cell,
    sd_hypercube, sd_hypersphere, sd_plane, sd_sixteen_cell, shape_distance, smooth_min,
    to_local_space, FieldError, FieldSample, Operation, ResolvedShape, Scene, SceneDirty,
    SceneError, SceneFile, SceneLoadError, SceneSaveError, SceneSnapshot, Shape4D, ShapeKey,
    ShapeKind, ShapeRecord, ShapeTemplate, SliceState, BLEND_STRENGTH_SCALE, FAR_DISTANCE,
};
pub use sdf4d_math::{Rot2, Vec3, Vec4};
