//! Transform hierarchy stored as an arena of nodes
//!
//! Nodes are addressed by generational [`NodeId`] handles. Each node owns a
//! local 4x4 matrix, a parent handle and an ordered child list. Global
//! matrices are never cached: every read walks the ancestor chain, so a
//! mutation is visible to all descendants on the next access.

use glam::{Mat3, Mat4, Vec3};

use crate::try_direction;

/// Stable handle to a node in a [`SceneGraph`]
///
/// A handle goes stale when its node is destroyed; stale handles resolve to
/// `None` instead of aliasing a recycled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Coordinate space an operation is applied in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Space {
    /// Post-multiply: relative to the node's own axes
    #[default]
    Local,
    /// Pre-multiply: relative to the parent's axes
    Global,
}

/// A single node of the hierarchy
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    local: Mat4,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            local: Mat4::IDENTITY,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn local_matrix(&self) -> Mat4 {
        self.local
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena owning every transform node of a scene
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Create a detached root node with an identity transform
    pub fn create(&mut self, name: &str) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(Node::new(name));
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(Node::new(name)),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Create a node already attached under `parent`
    pub fn create_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        let child = self.create(name);
        self.add_child(parent, child);
        child
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Attach `child` under `parent`, detaching it from any previous parent
    ///
    /// Returns false (and changes nothing) if either handle is stale or the
    /// attachment would create a cycle.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Refusing to parent {:?} under its own descendant", child);
            return false;
        }
        self.detach(child);
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        true
    }

    /// Remove `child` from its parent's child list; it becomes a root
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
    }

    /// Destroy a node and its whole subtree. Stale handles are a no-op.
    pub fn destroy(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.detach(id);
        for node_id in self.descendants(id) {
            let slot = &mut self.slots[node_id.index as usize];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(node_id.index);
            self.live -= 1;
        }
        true
    }

    /// True if `ancestor` appears on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// The node followed by all of its descendants, depth first, parents
    /// before children and siblings in insertion order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            out.push(node_id);
            stack.extend(self.children(node_id).iter().rev().copied());
        }
        out
    }

    pub fn local_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.get(id).map(|n| n.local)
    }

    pub fn set_local_matrix(&mut self, id: NodeId, matrix: Mat4) {
        if let Some(node) = self.get_mut(id) {
            node.local = matrix;
        }
    }

    /// Composed transform from the root down to this node
    pub fn global_matrix(&self, id: NodeId) -> Option<Mat4> {
        let node = self.get(id)?;
        let mut matrix = node.local;
        let mut current = node.parent;
        while let Some(p) = current {
            let parent = self.get(p)?;
            matrix = parent.local * matrix;
            current = parent.parent;
        }
        Some(matrix)
    }

    /// World position (translation column of the global matrix)
    pub fn global_position(&self, id: NodeId) -> Option<Vec3> {
        self.global_matrix(id).map(|m| m.w_axis.truncate())
    }

    /// Rotation/scale block of the global matrix
    pub fn global_orientation(&self, id: NodeId) -> Option<Mat3> {
        self.global_matrix(id).map(Mat3::from_mat4)
    }

    /// Position relative to the parent
    pub fn local_position(&self, id: NodeId) -> Option<Vec3> {
        self.get(id).map(|n| n.local.w_axis.truncate())
    }

    pub fn apply_matrix(&mut self, id: NodeId, matrix: Mat4, space: Space) {
        if let Some(node) = self.get_mut(id) {
            node.local = match space {
                Space::Local => node.local * matrix,
                Space::Global => matrix * node.local,
            };
        }
    }

    pub fn translate(&mut self, id: NodeId, offset: Vec3, space: Space) {
        self.apply_matrix(id, Mat4::from_translation(offset), space);
    }

    pub fn rotate_x(&mut self, id: NodeId, angle: f32, space: Space) {
        self.apply_matrix(id, Mat4::from_rotation_x(angle), space);
    }

    pub fn rotate_y(&mut self, id: NodeId, angle: f32, space: Space) {
        self.apply_matrix(id, Mat4::from_rotation_y(angle), space);
    }

    pub fn rotate_z(&mut self, id: NodeId, angle: f32, space: Space) {
        self.apply_matrix(id, Mat4::from_rotation_z(angle), space);
    }

    /// Non-uniform scale in local space
    pub fn scale(&mut self, id: NodeId, factors: Vec3) {
        self.apply_matrix(id, Mat4::from_scale(factors), Space::Local);
    }

    pub fn scale_uniform(&mut self, id: NodeId, factor: f32) {
        self.scale(id, Vec3::splat(factor));
    }

    /// Overwrite the translation column only; rotation and scale are kept
    pub fn set_position(&mut self, id: NodeId, position: Vec3) {
        if let Some(node) = self.get_mut(id) {
            node.local.w_axis = position.extend(1.0);
        }
    }

    /// Replace the rotation/scale block with a pure yaw, keeping translation
    pub fn set_rotation_y(&mut self, id: NodeId, angle: f32) {
        if let Some(node) = self.get_mut(id) {
            let translation = node.local.w_axis;
            node.local = Mat4::from_rotation_y(angle);
            node.local.w_axis = translation;
        }
    }

    /// Rebuild the local matrix so -Z points from the node toward `target`
    ///
    /// Keeps the current global position as translation and drops any scale.
    /// Only consistent for root nodes (or nodes under an identity parent).
    /// Returns false when the node is stale or sits on the target.
    pub fn look_at(&mut self, id: NodeId, target: Vec3) -> bool {
        let Some(position) = self.global_position(id) else {
            return false;
        };
        match make_look_at(position, target) {
            Some(matrix) => {
                self.set_local_matrix(id, matrix);
                true
            }
            None => {
                log::warn!("look_at skipped: node {:?} coincides with target", id);
                false
            }
        }
    }
}

/// Matrix at `position` whose -Z axis faces `target` with +Y kept up
pub fn make_look_at(position: Vec3, target: Vec3) -> Option<Mat4> {
    let forward = try_direction(target - position)?;
    // Looking straight up or down: any horizontal right axis will do
    let right = try_direction(forward.cross(Vec3::Y)).unwrap_or(Vec3::X);
    let up = right.cross(forward);
    Some(Mat4::from_cols(
        right.extend(0.0),
        up.extend(0.0),
        (-forward).extend(0.0),
        position.extend(1.0),
    ))
}
