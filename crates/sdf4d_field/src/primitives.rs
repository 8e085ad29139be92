//! Primitive distance functions
//!
//! Pure functions mapping a 4D point plus primitive parameters to a signed
//! distance: negative inside, positive outside. All arithmetic is f32 so CPU
//! queries agree with a 32-bit GPU port of the same field.
//!
//! Parameters arrive as the shape's effective 4D scale; which components a
//! primitive reads is part of its contract (see [`shape_distance`]).

use sdf4d_math::Vec4;

/// The available 4D primitives
///
/// Declaration order is load-bearing: the integer value of each kind is the
/// `kind` field of the wire record consumed by external shading stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    HyperSphere,
    HyperCube,
    DuoCylinder,
    Plane,
    Cone,
    FiveCell,
    SixteenCell,
}

impl ShapeKind {
    /// Integer value used in the shape parameter buffer
    #[inline]
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Decode a buffer integer back into a kind
    ///
    /// Returns `None` for out-of-range values; callers substitute the far
    /// sentinel distance rather than failing the evaluation.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::HyperSphere),
            1 => Some(Self::HyperCube),
            2 => Some(Self::DuoCylinder),
            3 => Some(Self::Plane),
            4 => Some(Self::Cone),
            5 => Some(Self::FiveCell),
            6 => Some(Self::SixteenCell),
            _ => None,
        }
    }
}

/// Hypersphere of radius `s`
#[inline]
pub fn sd_hypersphere(p: Vec4, s: f32) -> f32 {
    p.length() - s
}

/// Axis-aligned 4D box with half-extents `b`
#[inline]
pub fn sd_hypercube(p: Vec4, b: Vec4) -> f32 {
    let d = p.abs() - b;
    d.max_component().min(0.0) + d.positive_part().length()
}

/// Duocylinder with radii `r1` (xz circle) and `r2` (yw circle)
///
/// The two planar radii act as an independent 2D pair, combined box-style.
#[inline]
pub fn sd_duo_cylinder(p: Vec4, r1: f32, r2: f32) -> f32 {
    let dx = p.length_xz() - r1;
    let dy = p.length_yw() - r2;
    let outside = (dx.max(0.0) * dx.max(0.0) + dy.max(0.0) * dy.max(0.0)).sqrt();
    dx.max(dy).min(0.0) + outside
}

/// Cone field with parameters `h`
///
/// Not a true SDF: the trailing `h.x * p.y` term is linear and unclamped.
/// Kept bit-for-bit because authored scenes depend on its shape.
#[inline]
pub fn sd_cone(p: Vec4, h: Vec4) -> f32 {
    (p.length_xzw() - h.x).max(p.y.abs() - h.y) - h.x * p.y
}

/// 5-cell (4-simplex) with parameters `a`
#[inline]
pub fn sd_five_cell(p: Vec4, a: Vec4) -> f32 {
    let pw = p.w / a.w;
    let d = ((p.x + p.y + pw).abs() - p.z)
        .max((p.x - p.y + pw).abs() + p.z)
        .max((p.x - p.y - pw).abs() + p.z)
        .max((p.x + p.y - pw).abs() - p.z);
    (d - a.x) / 3.0_f32.sqrt()
}

/// 16-cell (4D cross-polytope) of size `s`
#[inline]
pub fn sd_sixteen_cell(p: Vec4, s: f32) -> f32 {
    let p = p.abs();
    (p.component_sum() - s) * 0.577_350_27
}

/// Rippled ground plane with wave parameters `s`
///
/// The base plane faces +y; the three sine terms superimpose ripples driven
/// by x, z, and w, with `s.y` as the inverse ripple amplitude.
#[inline]
pub fn sd_plane(p: Vec4, s: Vec4) -> f32 {
    let up = Vec4::Y;
    let ripple = (p.x * s.x + p.w).sin()
        + (p.z * s.z).sin()
        + ((0.34 * p.x + 0.21 * p.z) * s.w).sin();
    p.dot(up) - ripple / s.y
}

/// Evaluate a primitive against a point already in shape-local space
///
/// Routes the effective 4D scale into each primitive's parameter slots:
/// spheres and 16-cells read only `scale.x`, the duocylinder reads
/// `(scale.x, scale.y)`, the rest consume the full vector.
#[inline]
pub fn shape_distance(kind: ShapeKind, p: Vec4, scale: Vec4) -> f32 {
    match kind {
        ShapeKind::HyperSphere => sd_hypersphere(p, scale.x),
        ShapeKind::HyperCube => sd_hypercube(p, scale),
        ShapeKind::DuoCylinder => sd_duo_cylinder(p, scale.x, scale.y),
        ShapeKind::Plane => sd_plane(p, scale),
        ShapeKind::Cone => sd_cone(p, scale),
        ShapeKind::FiveCell => sd_five_cell(p, scale),
        ShapeKind::SixteenCell => sd_sixteen_cell(p, scale.x),
    }
}
