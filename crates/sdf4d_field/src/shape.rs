//! Authored shape parameters and the point-space transform pipeline
//!
//! A [`Shape4D`] holds everything an author sets on one node: primitive kind,
//! merge operator, 4D position, the six planar rotation angles (three spatial
//! Euler angles plus three W-plane angles), 4D scale, smoothing radius, color,
//! and an explicit fold-order key.
//!
//! The transform pipeline maps a world-space sample point into shape-local
//! space before the primitive is evaluated. The plane order and the choice of
//! matrix layout per plane are a compatibility contract with existing scenes;
//! see [`to_local_space`].

use serde::{Serialize, Deserialize};
use sdf4d_math::{Rot2, Vec3, Vec4};

use crate::combine::Operation;
use crate::primitives::{shape_distance, ShapeKind};

/// Ratio between the authored smoothing radius (0..=1) and the blend
/// strength consumed by the combination algebra and the wire record.
pub const BLEND_STRENGTH_SCALE: f32 = 3.0;

/// One authored shape node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape4D {
    /// Primitive evaluated for this node
    pub kind: ShapeKind,
    /// How this node merges into its parent group (or the global field for
    /// root shapes)
    pub operation: Operation,
    /// 4D position; w is the offset along the hidden axis
    pub position: Vec4,
    /// Euler rotation in radians (x, y, z), applied in the spatial planes
    pub rotation: Vec3,
    /// Rotation in radians in the xw, yw, zw planes respectively
    pub rotation_w: Vec3,
    /// Local 4D scale; composes multiplicatively down the hierarchy
    pub scale: Vec4,
    /// Smoothing radius in 0..=1, used only by [`Operation::Blend`]
    pub smooth_radius: f32,
    /// Surface color handed to shading consumers
    pub color: Vec3,
    /// Fold priority among siblings and roots; lower folds first, ties keep
    /// insertion order
    pub order: i32,
}

impl Shape4D {
    /// Create a shape of the given kind with identity transform
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            operation: Operation::Union,
            position: Vec4::ZERO,
            rotation: Vec3::ZERO,
            rotation_w: Vec3::ZERO,
            scale: Vec4::ONE,
            smooth_radius: 0.0,
            color: Vec3::ONE,
            order: 0,
        }
    }

    /// Set the merge operator
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    /// Set the 4D position
    pub fn with_position(mut self, position: Vec4) -> Self {
        self.position = position;
        self
    }

    /// Set the spatial Euler rotation (radians)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the W-plane rotation (radians, xw/yw/zw)
    pub fn with_rotation_w(mut self, rotation_w: Vec3) -> Self {
        self.rotation_w = rotation_w;
        self
    }

    /// Set the local 4D scale
    pub fn with_scale(mut self, scale: Vec4) -> Self {
        self.scale = scale;
        self
    }

    /// Set the smoothing radius, clamped to 0..=1
    pub fn with_smooth_radius(mut self, radius: f32) -> Self {
        self.smooth_radius = radius.clamp(0.0, 1.0);
        self
    }

    /// Set the surface color
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Set the fold priority
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Blend strength consumed by the combination algebra and exported in
    /// the wire record: `smooth_radius * 3`
    #[inline]
    pub fn blend_strength(&self) -> f32 {
        self.smooth_radius * BLEND_STRENGTH_SCALE
    }

    /// Map a world-space point into this shape's local space
    #[inline]
    pub fn to_local_space(&self, p: Vec4) -> Vec4 {
        to_local_space(p, self.position, self.rotation, self.rotation_w)
    }

    /// Distance from `p` to this shape, using an externally resolved
    /// (ancestor-composed) effective scale
    #[inline]
    pub fn local_distance(&self, p: Vec4, effective_scale: Vec4) -> f32 {
        shape_distance(self.kind, self.to_local_space(p), effective_scale)
    }
}

/// The point-space transform applied before a primitive is evaluated
///
/// Subtracts the shape position, then rotates six planes in fixed order:
/// spatial planes xz (by the y angle), yz (x angle), xy (z angle), followed
/// by hyper planes xw, zw, yw. The xz and xw planes use [`Rot2::rotate`],
/// the other four [`Rot2::rotate_inv`]; this per-plane split of the two
/// matrix layouts is what existing scene content was authored against, so
/// it must not be "fixed" for uniformity.
pub fn to_local_space(p: Vec4, position: Vec4, rotation: Vec3, rotation_w: Vec3) -> Vec4 {
    let mut p = p - position;

    let r = Rot2::from_angle(rotation.y);
    (p.x, p.z) = r.rotate(p.x, p.z);
    let r = Rot2::from_angle(rotation.x);
    (p.y, p.z) = r.rotate_inv(p.y, p.z);
    let r = Rot2::from_angle(rotation.z);
    (p.x, p.y) = r.rotate_inv(p.x, p.y);

    let r = Rot2::from_angle(rotation_w.x);
    (p.x, p.w) = r.rotate(p.x, p.w);
    let r = Rot2::from_angle(rotation_w.z);
    (p.z, p.w) = r.rotate_inv(p.z, p.w);
    let r = Rot2::from_angle(rotation_w.y);
    (p.y, p.w) = r.rotate_inv(p.y, p.w);

    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec4, b: Vec4) -> bool {
        (a.x - b.x).abs() < EPSILON
            && (a.y - b.y).abs() < EPSILON
            && (a.z - b.z).abs() < EPSILON
            && (a.w - b.w).abs() < EPSILON
    }

    #[test]
    fn test_builder_defaults() {
        let s = Shape4D::new(ShapeKind::HyperSphere);
        assert_eq!(s.operation, Operation::Union);
        assert_eq!(s.position, Vec4::ZERO);
        assert_eq!(s.scale, Vec4::ONE);
        assert_eq!(s.smooth_radius, 0.0);
        assert_eq!(s.order, 0);
    }

    #[test]
    fn test_smooth_radius_clamped() {
        let s = Shape4D::new(ShapeKind::HyperSphere).with_smooth_radius(2.5);
        assert_eq!(s.smooth_radius, 1.0);
        assert_eq!(s.blend_strength(), 3.0);
    }

    #[test]
    fn test_translation_only() {
        let s = Shape4D::new(ShapeKind::HyperSphere)
            .with_position(Vec4::new(1.0, 2.0, 3.0, 4.0));
        let local = s.to_local_space(Vec4::new(1.0, 2.0, 3.0, 4.0));
        assert!(vec_approx_eq(local, Vec4::ZERO));
    }

    #[test]
    fn test_y_rotation_convention() {
        // xz plane, rotate variant: +x goes to +z after a quarter turn
        let s = Shape4D::new(ShapeKind::HyperSphere)
            .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let local = s.to_local_space(Vec4::X);
        assert!(vec_approx_eq(local, Vec4::Z), "got {:?}", local);
    }

    #[test]
    fn test_x_rotation_convention() {
        // yz plane, inverse variant: +y goes to -z after a quarter turn
        let s = Shape4D::new(ShapeKind::HyperSphere)
            .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        let local = s.to_local_space(Vec4::Y);
        assert!(vec_approx_eq(local, -Vec4::Z), "got {:?}", local);
    }

    #[test]
    fn test_z_rotation_convention() {
        // xy plane, inverse variant: +x goes to -y after a quarter turn
        let s = Shape4D::new(ShapeKind::HyperSphere)
            .with_rotation(Vec3::new(0.0, 0.0, FRAC_PI_2));
        let local = s.to_local_space(Vec4::X);
        assert!(vec_approx_eq(local, -Vec4::Y), "got {:?}", local);
    }

    #[test]
    fn test_xw_rotation_convention() {
        // xw plane, rotate variant: +x goes to +w after a quarter turn
        let s = Shape4D::new(ShapeKind::HyperSphere)
            .with_rotation_w(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        let local = s.to_local_space(Vec4::X);
        assert!(vec_approx_eq(local, Vec4::W), "got {:?}", local);
    }

    #[test]
    fn test_yw_zw_rotation_conventions() {
        // yw and zw planes use the inverse variant: +y and +z go to -w
        let s = Shape4D::new(ShapeKind::HyperSphere)
            .with_rotation_w(Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert!(vec_approx_eq(s.to_local_space(Vec4::Y), -Vec4::W));

        let s = Shape4D::new(ShapeKind::HyperSphere)
            .with_rotation_w(Vec3::new(0.0, 0.0, FRAC_PI_2));
        assert!(vec_approx_eq(s.to_local_space(Vec4::Z), -Vec4::W));
    }

    #[test]
    fn test_rotation_does_not_move_sphere_distance() {
        // A hypersphere is rotation-invariant; the pipeline must not change
        // its field regardless of angles.
        let plain = Shape4D::new(ShapeKind::HyperSphere);
        let rotated = Shape4D::new(ShapeKind::HyperSphere)
            .with_rotation(Vec3::new(0.3, 0.7, 1.1))
            .with_rotation_w(Vec3::new(0.2, 0.4, 0.6));
        let p = Vec4::new(1.0, 2.0, -1.0, 0.5);
        let a = plain.local_distance(p, Vec4::ONE);
        let b = rotated.local_distance(p, Vec4::ONE);
        assert!((a - b).abs() < EPSILON);
    }

    #[test]
    fn test_local_distance_uses_external_scale() {
        // The caller passes the ancestor-composed scale; the shape's own
        // scale field is not consulted here.
        let s = Shape4D::new(ShapeKind::HyperSphere).with_scale(Vec4::ONE * 100.0);
        let d = s.local_distance(Vec4::new(2.0, 0.0, 0.0, 0.0), Vec4::ONE);
        assert!((d - 1.0).abs() < EPSILON);
    }
}
