//! Scene arena
//!
//! Shapes live in a slotmap arena as a true tree: every node records its
//! parent and its ordered children, and nesting depth is unrestricted. Each
//! evaluation frame the host asks for a [`SceneSnapshot`](crate::SceneSnapshot),
//! an immutable flattened copy with ancestor scales resolved in one top-down
//! pass, and evaluates against that while the arena stays free for editing.
//! The snapshot boundary is the synchronization point: nothing in the arena
//! is read during evaluation.

use bitflags::bitflags;
use slotmap::{new_key_type, SlotMap};

use sdf4d_math::Vec4;

use crate::error::SceneError;
use crate::shape::Shape4D;
use crate::snapshot::{ResolvedShape, SceneSnapshot};

new_key_type! {
    /// Generational key to a shape in a [`Scene`]
    pub struct ShapeKey;
}

bitflags! {
    /// What changed since the last snapshot was taken
    ///
    /// Hosts use this to skip snapshot (and wire-buffer) rebuilds on idle
    /// frames.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SceneDirty: u8 {
        /// No changes
        const NONE = 0;
        /// Shapes were added, removed, or reordered
        const TOPOLOGY = 1 << 0;
        /// Shape parameters were touched through `get_mut`
        const SHAPES = 1 << 1;
    }
}

struct ShapeNode {
    shape: Shape4D,
    parent: Option<ShapeKey>,
    children: Vec<ShapeKey>,
}

/// A tree of authored shapes
pub struct Scene {
    nodes: SlotMap<ShapeKey, ShapeNode>,
    roots: Vec<ShapeKey>,
    dirty: SceneDirty,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            dirty: SceneDirty::NONE,
        }
    }

    /// Add a top-level shape
    pub fn add_root(&mut self, shape: Shape4D) -> ShapeKey {
        let key = self.nodes.insert(ShapeNode {
            shape,
            parent: None,
            children: Vec::new(),
        });
        self.roots.push(key);
        self.dirty |= SceneDirty::TOPOLOGY;
        key
    }

    /// Add a shape under an existing parent
    pub fn add_child(&mut self, parent: ShapeKey, shape: Shape4D) -> Result<ShapeKey, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::MissingShape(parent));
        }
        let key = self.nodes.insert(ShapeNode {
            shape,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(key);
        self.dirty |= SceneDirty::TOPOLOGY;
        Ok(key)
    }

    /// Remove a shape and its whole subtree
    pub fn remove(&mut self, key: ShapeKey) -> Result<(), SceneError> {
        let parent = self.nodes.get(key).ok_or(SceneError::MissingShape(key))?.parent;
        match parent {
            Some(parent) => {
                self.nodes[parent].children.retain(|&k| k != key);
            }
            None => {
                self.roots.retain(|&k| k != key);
            }
        }

        // Depth-first removal of the subtree
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.remove(k) {
                stack.extend(node.children);
            }
        }

        self.dirty |= SceneDirty::TOPOLOGY;
        Ok(())
    }

    /// Read a shape
    pub fn get(&self, key: ShapeKey) -> Option<&Shape4D> {
        self.nodes.get(key).map(|n| &n.shape)
    }

    /// Mutate a shape; marks the scene dirty
    pub fn get_mut(&mut self, key: ShapeKey) -> Option<&mut Shape4D> {
        let node = self.nodes.get_mut(key)?;
        self.dirty |= SceneDirty::SHAPES;
        Some(&mut node.shape)
    }

    /// Keys of the top-level shapes, in insertion order
    pub fn roots(&self) -> &[ShapeKey] {
        &self.roots
    }

    /// Keys of a shape's direct children, in insertion order
    pub fn children(&self, key: ShapeKey) -> &[ShapeKey] {
        self.nodes
            .get(key)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of shapes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds no shapes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove every shape
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.dirty |= SceneDirty::TOPOLOGY;
    }

    /// Accumulated change flags since the last [`Scene::take_dirty`]
    pub fn dirty(&self) -> SceneDirty {
        self.dirty
    }

    /// Return and clear the change flags
    pub fn take_dirty(&mut self) -> SceneDirty {
        std::mem::take(&mut self.dirty)
    }

    /// Flatten the tree into an immutable evaluation snapshot
    ///
    /// Roots and siblings are ordered by their `order` field (stable, so
    /// ties keep insertion order), each parent is immediately followed by
    /// its subtree, and every entry carries its ancestor-composed effective
    /// scale, resolved here in a single parent-before-child pass.
    pub fn snapshot(&self) -> SceneSnapshot {
        let mut entries = Vec::with_capacity(self.nodes.len());
        for &root in &self.sorted(&self.roots) {
            self.flatten_into(&mut entries, root, Vec4::ONE, 0);
        }
        log::debug!("scene snapshot: {} shapes", entries.len());
        SceneSnapshot::new(entries)
    }

    fn sorted(&self, keys: &[ShapeKey]) -> Vec<ShapeKey> {
        let mut sorted = keys.to_vec();
        sorted.sort_by_key(|&k| self.nodes[k].shape.order);
        sorted
    }

    fn flatten_into(
        &self,
        entries: &mut Vec<ResolvedShape>,
        key: ShapeKey,
        parent_scale: Vec4,
        depth: usize,
    ) {
        let node = &self.nodes[key];
        let effective_scale = node.shape.scale.component_mul(parent_scale);
        let index = entries.len();
        entries.push(ResolvedShape {
            shape: node.shape.clone(),
            effective_scale,
            num_children: node.children.len(),
            descendants: 0,
            depth,
        });
        for &child in &self.sorted(&node.children) {
            self.flatten_into(entries, child, effective_scale, depth + 1);
        }
        entries[index].descendants = entries.len() - index - 1;
    }
}
