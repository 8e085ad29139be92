//! Shape parameter buffer
//!
//! The flat array-of-structs layout consumed by an external shading stage:
//! one 84-byte record per shape, in snapshot order. Field order and packing
//! are frozen; producers and consumers must agree byte for byte.
//!
//! This module also carries the record-level evaluator, the same walk a
//! data-parallel kernel performs over this buffer: an outer index advancing
//! by `1 + num_children`, children merged with their own operator, groups
//! merged with the top-level record's operator. It exists so CPU consumers of
//! the exported buffer (collision probes, tests) see exactly the field the
//! shading stage sees.

use bytemuck::{Pod, Zeroable};

use sdf4d_math::{Vec3, Vec4};

use crate::combine::{combine, Operation};
use crate::error::{FieldError, SceneError};
use crate::primitives::{shape_distance, ShapeKind};
use crate::shape::to_local_space;
use crate::snapshot::{ResolvedShape, SceneSnapshot};

/// One shape in the parameter buffer
///
/// 84 bytes: 17 floats + kind + operation + blend strength + child count.
/// The `scale` field is the effective (ancestor-composed) scale, and
/// `blend_strength` is the authored smoothing radius already scaled by 3.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ShapeRecord {
    /// 4D position (x, y, z, w)
    pub position: [f32; 4],
    /// Effective 4D scale
    pub scale: [f32; 4],
    /// Spatial Euler rotation in radians
    pub rotation: [f32; 3],
    /// W-plane rotation in radians (xw, yw, zw)
    pub rotation_w: [f32; 3],
    /// Surface color (RGB)
    pub color: [f32; 3],
    /// Shape kind as an integer enum
    pub kind: i32,
    /// Merge operator as an integer enum
    pub operation: i32,
    /// Blend strength (= smoothing radius x 3)
    pub blend_strength: f32,
    /// Direct child count; children follow immediately in the buffer
    pub num_children: i32,
}

impl ShapeRecord {
    /// Build a record from a snapshot entry
    pub fn from_resolved(entry: &ResolvedShape) -> Self {
        Self {
            position: entry.shape.position.to_array(),
            scale: entry.effective_scale.to_array(),
            rotation: entry.shape.rotation.to_array(),
            rotation_w: entry.shape.rotation_w.to_array(),
            color: entry.shape.color.to_array(),
            kind: entry.shape.kind.index(),
            operation: entry.shape.operation.index(),
            blend_strength: entry.shape.blend_strength(),
            num_children: entry.num_children as i32,
        }
    }

    /// Distance from `p` to this record's shape alone
    ///
    /// An out-of-range `kind` yields the `far` sentinel so one bad record
    /// cannot abort the scene fold.
    pub fn distance(&self, p: Vec4, far: f32) -> f32 {
        let Some(kind) = ShapeKind::from_index(self.kind) else {
            return far;
        };
        let local = to_local_space(
            p,
            Vec4::new(self.position[0], self.position[1], self.position[2], self.position[3]),
            Vec3::from(self.rotation),
            Vec3::from(self.rotation_w),
        );
        let scale = Vec4::new(self.scale[0], self.scale[1], self.scale[2], self.scale[3]);
        shape_distance(kind, local, scale)
    }
}

impl SceneSnapshot {
    /// Export the snapshot as a shape parameter buffer
    ///
    /// Fails with [`SceneError::DepthExceeded`] if any shape sits deeper
    /// than one level below a root: the record format expresses hierarchy
    /// only through the skip-counter convention, which cannot encode
    /// grandchildren.
    pub fn to_records(&self) -> Result<Vec<ShapeRecord>, SceneError> {
        for entry in self.entries() {
            if entry.depth > 1 {
                return Err(SceneError::DepthExceeded {
                    depth: entry.depth,
                    max: 1,
                });
            }
        }
        Ok(self.entries().iter().map(ShapeRecord::from_resolved).collect())
    }
}

/// Evaluate a shape parameter buffer at a 4D point
///
/// The documented legacy walk: for each top-level record, fold its
/// `num_children` successors into it using each child's own operator and
/// blend strength, fold the group into the global distance using the
/// top-level record's operator, then skip past the children. Malformed child
/// counts fail fast instead of reading out of range; an out-of-range
/// `operation` leaves the running distance unchanged.
pub fn evaluate_records(records: &[ShapeRecord], p: Vec4, far: f32) -> Result<f32, FieldError> {
    let mut global = far;
    let mut i = 0;
    while i < records.len() {
        let record = &records[i];
        if record.num_children < 0 {
            return Err(FieldError::NegativeChildCount {
                index: i,
                num_children: record.num_children,
            });
        }
        let num_children = record.num_children as usize;
        if i + num_children >= records.len() {
            return Err(FieldError::ChildOverrun {
                index: i,
                num_children: record.num_children,
                len: records.len(),
            });
        }

        let mut local = record.distance(p, far);
        for j in 0..num_children {
            let child = &records[i + j + 1];
            let child_distance = child.distance(p, far);
            local = combine_indexed(local, child_distance, child.operation, child.blend_strength);
        }

        global = combine_indexed(global, local, record.operation, record.blend_strength);
        i += num_children + 1;
    }
    Ok(global)
}

/// Combine with a raw operator index; unknown operators keep `a`
#[inline]
fn combine_indexed(a: f32, b: f32, operation: i32, k: f32) -> f32 {
    match Operation::from_index(operation) {
        Some(op) => combine(a, b, op, k),
        None => a,
    }
}
