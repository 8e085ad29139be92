//! Frame snapshot and scene distance-field evaluator
//!
//! A [`SceneSnapshot`] is the immutable, flattened form of a scene for one
//! evaluation frame: plain data, `Send + Sync`, safe to query from any number
//! of threads at once. Every query is a pure function of the snapshot and the
//! sample point, so screen pixels and collision probes parallelize freely.
//!
//! The fold is an explicit post-order walk: each shape's children merge into
//! it left-to-right using **each child's own** operator and blend strength,
//! then the finished group merges into the global distance using the
//! top-level shape's operator. Subtract and Intersect are order-sensitive, so
//! this two-stage fold order is a semantic contract, not an implementation
//! detail.

use sdf4d_math::{Vec3, Vec4};

use crate::combine::{combine, combine_weight};
use crate::shape::Shape4D;
use crate::slice::SliceState;

/// Default far sentinel: the distance reported by an empty scene, and the
/// stand-in for an external renderer's far clip distance.
pub const FAR_DISTANCE: f32 = 1000.0;

/// One flattened shape with its frame-resolved data
#[derive(Clone, Debug)]
pub struct ResolvedShape {
    /// The authored shape parameters
    pub shape: Shape4D,
    /// Ancestor-composed 4D scale for this frame
    pub effective_scale: Vec4,
    /// Number of direct children
    pub num_children: usize,
    /// Total entries following this one that belong to its subtree
    pub descendants: usize,
    /// Nesting depth; roots are 0
    pub depth: usize,
}

impl ResolvedShape {
    /// Distance from `p` to this shape alone
    #[inline]
    pub fn distance(&self, p: Vec4) -> f32 {
        self.shape.local_distance(p, self.effective_scale)
    }
}

/// A distance query result with the data a shading consumer needs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSample {
    /// Signed distance to the nearest surface
    pub distance: f32,
    /// Color of the governing shape(s) at that surface
    pub color: Vec3,
}

/// Immutable flattened scene for one evaluation frame
#[derive(Clone, Debug)]
pub struct SceneSnapshot {
    entries: Vec<ResolvedShape>,
    far: f32,
}

impl SceneSnapshot {
    pub(crate) fn new(entries: Vec<ResolvedShape>) -> Self {
        Self {
            entries,
            far: FAR_DISTANCE,
        }
    }

    /// Override the far sentinel (e.g. to match a renderer's far clip)
    pub fn with_far(mut self, far: f32) -> Self {
        self.far = far;
        self
    }

    /// The far sentinel distance
    #[inline]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Flattened entries, each parent immediately followed by its subtree
    pub fn entries(&self) -> &[ResolvedShape] {
        &self.entries
    }

    /// Number of shapes in the snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot holds no shapes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Signed distance from a 4D point to the scene
    pub fn distance(&self, p: Vec4) -> f32 {
        let mut global = self.far;
        let mut i = 0;
        while i < self.entries.len() {
            let root = &self.entries[i];
            let group = self.subtree_distance(i, p);
            global = combine(global, group, root.shape.operation, root.shape.blend_strength());
            i += 1 + root.descendants;
        }
        global
    }

    /// Signed distance plus shading data from a 4D point to the scene
    pub fn sample(&self, p: Vec4) -> FieldSample {
        let mut global = FieldSample {
            distance: self.far,
            color: Vec3::ZERO,
        };
        let mut i = 0;
        while i < self.entries.len() {
            let root = &self.entries[i];
            let group = self.subtree_sample(i, p);
            let (distance, h) = combine_weight(
                global.distance,
                group.distance,
                root.shape.operation,
                root.shape.blend_strength(),
            );
            global = FieldSample {
                distance,
                color: group.color.lerp(global.color, h),
            };
            i += 1 + root.descendants;
        }
        global
    }

    /// Signed distance from a 3D point through the given W slice
    ///
    /// This is the query interface for external collision and render
    /// consumers: project into 4D, then evaluate.
    #[inline]
    pub fn distance_at(&self, p: Vec3, slice: &SliceState) -> f32 {
        self.distance(slice.project(p))
    }

    /// [`SceneSnapshot::sample`] through the given W slice
    #[inline]
    pub fn sample_at(&self, p: Vec3, slice: &SliceState) -> FieldSample {
        self.sample(slice.project(p))
    }

    fn subtree_distance(&self, index: usize, p: Vec4) -> f32 {
        let entry = &self.entries[index];
        let mut local = entry.distance(p);
        let mut j = index + 1;
        for _ in 0..entry.num_children {
            let child = &self.entries[j];
            let child_distance = self.subtree_distance(j, p);
            local = combine(
                local,
                child_distance,
                child.shape.operation,
                child.shape.blend_strength(),
            );
            j += 1 + child.descendants;
        }
        local
    }

    fn subtree_sample(&self, index: usize, p: Vec4) -> FieldSample {
        let entry = &self.entries[index];
        let mut local = FieldSample {
            distance: entry.distance(p),
            color: entry.shape.color,
        };
        let mut j = index + 1;
        for _ in 0..entry.num_children {
            let child = &self.entries[j];
            let child_sample = self.subtree_sample(j, p);
            let (distance, h) = combine_weight(
                local.distance,
                child_sample.distance,
                child.shape.operation,
                child.shape.blend_strength(),
            );
            local = FieldSample {
                distance,
                color: child_sample.color.lerp(local.color, h),
            };
            j += 1 + child.descendants;
        }
        local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::Operation;
    use crate::primitives::ShapeKind;
    use crate::scene::Scene;

    const EPSILON: f32 = 0.0001;

    /// Unit hypersphere at the given center
    fn sphere_at(x: f32, y: f32, z: f32, w: f32) -> Shape4D {
        Shape4D::new(ShapeKind::HyperSphere).with_position(Vec4::new(x, y, z, w))
    }

    #[test]
    fn test_empty_scene_is_far() {
        let snapshot = Scene::new().snapshot();
        assert_eq!(snapshot.distance(Vec4::ZERO), FAR_DISTANCE);
        assert_eq!(snapshot.with_far(250.0).distance(Vec4::ZERO), 250.0);
    }

    #[test]
    fn test_single_sphere() {
        let mut scene = Scene::new();
        scene.add_root(sphere_at(0.0, 0.0, 0.0, 0.0));
        let snapshot = scene.snapshot();

        let d = snapshot.distance(Vec4::new(3.0, 0.0, 0.0, 0.0));
        assert!((d - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_union_of_two_roots_takes_nearest() {
        let mut scene = Scene::new();
        scene.add_root(sphere_at(-3.0, 0.0, 0.0, 0.0));
        scene.add_root(sphere_at(3.0, 0.0, 0.0, 0.0));
        let snapshot = scene.snapshot();

        let d = snapshot.distance(Vec4::new(2.5, 0.0, 0.0, 0.0));
        // Nearest is the +x sphere: |2.5 - 3| - 1 = -0.5
        assert!((d - (-0.5)).abs() < EPSILON);
    }

    #[test]
    fn test_child_operator_governs_child_merge() {
        // Root A with one Subtract child B, then the same scene with a Union
        // child: the child's own operator decides the group result.
        let p = Vec4::new(1.5, 0.0, 0.0, 0.0);

        // distA = 0.5 (sphere at origin radius 1, |p| = 1.5)
        // distB = -0.5 (sphere at x=2, |p - c| = 0.5)
        let mut scene = Scene::new();
        let a = scene.add_root(sphere_at(0.0, 0.0, 0.0, 0.0));
        scene
            .add_child(a, sphere_at(2.0, 0.0, 0.0, 0.0).with_operation(Operation::Subtract))
            .unwrap();
        let d = scene.snapshot().distance(p);
        // max(0.5, -(-0.5)) = 0.5
        assert!((d - 0.5).abs() < EPSILON);

        let mut scene = Scene::new();
        let a = scene.add_root(sphere_at(0.0, 0.0, 0.0, 0.0));
        scene
            .add_child(a, sphere_at(2.0, 0.0, 0.0, 0.0).with_operation(Operation::Union))
            .unwrap();
        let d = scene.snapshot().distance(p);
        // min(0.5, -0.5) = -0.5
        assert!((d - (-0.5)).abs() < EPSILON);
    }

    #[test]
    fn test_root_operator_governs_global_merge() {
        // A Subtract root carves nothing out of the far sentinel directly:
        // global = max(far, -group)
        let mut scene = Scene::new();
        scene.add_root(sphere_at(0.0, 0.0, 0.0, 0.0).with_operation(Operation::Subtract));
        let snapshot = scene.snapshot();

        let d = snapshot.distance(Vec4::ZERO);
        // group = -1 (inside), global = max(FAR, 1) = FAR
        assert_eq!(d, FAR_DISTANCE);
    }

    #[test]
    fn test_fold_is_left_to_right_over_children() {
        // Children fold in sibling order; an Intersect after a Union sees
        // the already-merged running distance.
        let p = Vec4::ZERO;
        let mut scene = Scene::new();
        let a = scene.add_root(sphere_at(0.0, 0.0, 0.0, 0.0));
        // Union child far away: running stays -1
        scene
            .add_child(a, sphere_at(10.0, 0.0, 0.0, 0.0).with_operation(Operation::Union))
            .unwrap();
        // Intersect child at +0.5: max(-1, |0.5|-1) = -0.5
        scene
            .add_child(a, sphere_at(0.5, 0.0, 0.0, 0.0).with_operation(Operation::Intersect))
            .unwrap();

        let d = scene.snapshot().distance(p);
        assert!((d - (-0.5)).abs() < EPSILON);
    }

    #[test]
    fn test_blend_child_smooths_group() {
        let p = Vec4::new(1.0, 0.0, 0.0, 0.0);
        let mut scene = Scene::new();
        let a = scene.add_root(sphere_at(0.0, 0.0, 0.0, 0.0));
        scene
            .add_child(
                a,
                sphere_at(2.0, 0.0, 0.0, 0.0)
                    .with_operation(Operation::Blend)
                    .with_smooth_radius(0.5),
            )
            .unwrap();

        // Both spheres are at distance 0 from p; smooth-min dips below min.
        let d = scene.snapshot().distance(p);
        assert!(d < 0.0);
        // k = 0.5 * 3 = 1.5; penalty at h = 0.5 is k/4
        assert!((d - (-1.5 / 4.0)).abs() < EPSILON);
    }

    #[test]
    fn test_sample_reports_winning_color() {
        let red = Vec3::new(1.0, 0.0, 0.0);
        let blue = Vec3::new(0.0, 0.0, 1.0);
        let mut scene = Scene::new();
        scene.add_root(sphere_at(-3.0, 0.0, 0.0, 0.0).with_color(red));
        scene.add_root(sphere_at(3.0, 0.0, 0.0, 0.0).with_color(blue));
        let snapshot = scene.snapshot();

        let s = snapshot.sample(Vec4::new(2.5, 0.0, 0.0, 0.0));
        assert_eq!(s.color, blue);
        let s = snapshot.sample(Vec4::new(-2.5, 0.0, 0.0, 0.0));
        assert_eq!(s.color, red);
    }

    #[test]
    fn test_sample_blend_mixes_colors() {
        let red = Vec3::new(1.0, 0.0, 0.0);
        let blue = Vec3::new(0.0, 0.0, 1.0);
        let mut scene = Scene::new();
        let a = scene.add_root(sphere_at(0.0, 0.0, 0.0, 0.0).with_color(red));
        scene
            .add_child(
                a,
                sphere_at(2.0, 0.0, 0.0, 0.0)
                    .with_operation(Operation::Blend)
                    .with_smooth_radius(0.5)
                    .with_color(blue),
            )
            .unwrap();

        // Midpoint between the spheres: equal distances, h = 0.5
        let s = scene.snapshot().sample(Vec4::new(1.0, 0.0, 0.0, 0.0));
        assert!((s.color.x - 0.5).abs() < EPSILON);
        assert!((s.color.z - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_distance_matches_sample_distance() {
        let mut scene = Scene::new();
        let a = scene.add_root(sphere_at(0.0, 0.0, 0.0, 0.0));
        scene
            .add_child(a, sphere_at(1.0, 1.0, 0.0, 0.0).with_operation(Operation::Subtract))
            .unwrap();
        scene.add_root(sphere_at(0.0, -2.0, 0.0, 1.0).with_operation(Operation::Intersect));
        let snapshot = scene.snapshot();

        for &p in &[
            Vec4::ZERO,
            Vec4::new(0.5, 0.5, 0.0, 0.0),
            Vec4::new(-1.0, 2.0, 0.5, 0.25),
        ] {
            let d = snapshot.distance(p);
            let s = snapshot.sample(p);
            assert!((d - s.distance).abs() < EPSILON);
        }
    }

    #[test]
    fn test_snapshot_is_shareable_across_threads() {
        let mut scene = Scene::new();
        scene.add_root(sphere_at(0.0, 0.0, 0.0, 0.0));
        let snapshot = scene.snapshot();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let snapshot = &snapshot;
                    s.spawn(move || snapshot.distance(Vec4::new(i as f32, 0.0, 0.0, 0.0)))
                })
                .collect();
            for (i, handle) in handles.into_iter().enumerate() {
                let d = handle.join().unwrap();
                assert!((d - (i as f32 - 1.0).max(-1.0)).abs() < EPSILON);
            }
        });
    }
}
