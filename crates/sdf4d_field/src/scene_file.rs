//! Scene serialization
//!
//! Scenes are authored as RON files: a named list of shape templates, each
//! optionally nesting its children, plus an optional starting slice state
//! and far distance. Loading instantiates a [`Scene`] arena; depth is not
//! restricted at load time (only the wire-record export checks it).

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;

use sdf4d_math::{Vec3, Vec4};

use crate::combine::Operation;
use crate::primitives::ShapeKind;
use crate::scene::{Scene, ShapeKey};
use crate::shape::Shape4D;
use crate::slice::SliceState;

/// A serializable shape node with nested children
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeTemplate {
    /// Optional name (for display/debugging)
    #[serde(default)]
    pub name: Option<String>,
    /// Primitive kind
    pub kind: ShapeKind,
    /// Merge operator
    #[serde(default)]
    pub operation: Operation,
    /// 4D position
    #[serde(default)]
    pub position: Vec4,
    /// Spatial Euler rotation in radians
    #[serde(default)]
    pub rotation: Vec3,
    /// W-plane rotation in radians (xw, yw, zw)
    #[serde(default)]
    pub rotation_w: Vec3,
    /// Local 4D scale
    #[serde(default = "default_scale")]
    pub scale: Vec4,
    /// Smoothing radius, 0..=1
    #[serde(default)]
    pub smooth_radius: f32,
    /// Surface color
    #[serde(default = "default_color")]
    pub color: Vec3,
    /// Fold priority
    #[serde(default)]
    pub order: i32,
    /// Nested child shapes
    #[serde(default)]
    pub children: Vec<ShapeTemplate>,
}

fn default_scale() -> Vec4 {
    Vec4::ONE
}

fn default_color() -> Vec3 {
    Vec3::ONE
}

impl ShapeTemplate {
    /// Create a template of the given kind with identity transform
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            name: None,
            kind,
            operation: Operation::Union,
            position: Vec4::ZERO,
            rotation: Vec3::ZERO,
            rotation_w: Vec3::ZERO,
            scale: Vec4::ONE,
            smooth_radius: 0.0,
            color: Vec3::ONE,
            order: 0,
            children: Vec::new(),
        }
    }

    /// The shape parameters of this template (children excluded)
    pub fn to_shape(&self) -> Shape4D {
        Shape4D::new(self.kind)
            .with_operation(self.operation)
            .with_position(self.position)
            .with_rotation(self.rotation)
            .with_rotation_w(self.rotation_w)
            .with_scale(self.scale)
            .with_smooth_radius(self.smooth_radius)
            .with_color(self.color)
            .with_order(self.order)
    }
}

/// A loadable/saveable scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Starting slice state
    #[serde(default)]
    pub slice: Option<SliceState>,
    /// Far sentinel override
    #[serde(default)]
    pub far: Option<f32>,
    /// Top-level shape templates
    pub shapes: Vec<ShapeTemplate>,
}

impl SceneFile {
    /// Create a new empty scene file
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slice: None,
            far: None,
            shapes: Vec::new(),
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(&path)?;
        let scene: SceneFile = ron::from_str(&contents)?;
        log::info!(
            "loaded scene '{}' ({} top-level shapes)",
            scene.name,
            scene.shapes.len()
        );
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add a top-level shape template
    pub fn add_shape(&mut self, shape: ShapeTemplate) {
        self.shapes.push(shape);
    }

    /// Instantiate the templates into a scene arena
    pub fn to_scene(&self) -> Scene {
        let mut scene = Scene::new();
        for template in &self.shapes {
            instantiate_into(&mut scene, None, template);
        }
        scene
    }
}

fn instantiate_into(scene: &mut Scene, parent: Option<ShapeKey>, template: &ShapeTemplate) {
    let key = match parent {
        None => scene.add_root(template.to_shape()),
        Some(parent) => match scene.add_child(parent, template.to_shape()) {
            Ok(key) => key,
            // Parent keys here were created a moment ago; a miss would mean
            // arena corruption, and dropping the subtree beats panicking.
            Err(e) => {
                log::error!("skipping subtree: {}", e);
                return;
            }
        },
    };
    for child in &template.children {
        instantiate_into(scene, Some(key), child);
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}
