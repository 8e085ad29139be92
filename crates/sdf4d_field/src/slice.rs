//! Global 4D slice transform
//!
//! A [`SliceState`] describes where the visible 3D slice sits in 4D space:
//! an offset along the W axis and a rotation of the slicing hyperplane in
//! the xw, yw, and zw planes. It is an explicit value passed into every
//! query rather than process-wide state, so evaluation stays pure and
//! parallel-safe; a host reads its UI controls into one `SliceState` per
//! frame and hands it to all probes.

use serde::{Serialize, Deserialize};
use sdf4d_math::{Rot2, Vec3, Vec4};

/// W offset and hyper-rotation of the 3D slice
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliceState {
    /// Offset of the slice along the W axis
    pub w_offset: f32,
    /// Rotation of the slicing hyperplane in radians (xw, yw, zw)
    pub w_rotation: Vec3,
}

impl Default for SliceState {
    fn default() -> Self {
        Self {
            w_offset: 0.0,
            w_rotation: Vec3::ZERO,
        }
    }
}

impl SliceState {
    /// Create a slice state
    pub fn new(w_offset: f32, w_rotation: Vec3) -> Self {
        Self { w_offset, w_rotation }
    }

    /// Lift a 3D sample point into 4D through this slice
    ///
    /// Forms `(x, y, z, w_offset)` and, when the rotation vector is
    /// non-zero, rotates the xw, yw, and zw planes in that order. The
    /// exact-zero check is a documented fast path: the unrotated slice is
    /// the common case and skips six trig calls per sample.
    pub fn project(&self, p: Vec3) -> Vec4 {
        let mut p4 = Vec4::new(p.x, p.y, p.z, self.w_offset);

        if self.w_rotation.length() != 0.0 {
            let r = Rot2::from_angle(self.w_rotation.x);
            (p4.x, p4.w) = r.rotate_inv(p4.x, p4.w);
            let r = Rot2::from_angle(self.w_rotation.y);
            (p4.y, p4.w) = r.rotate_inv(p4.y, p4.w);
            let r = Rot2::from_angle(self.w_rotation.z);
            (p4.z, p4.w) = r.rotate_inv(p4.z, p4.w);
        }

        p4
    }
}
