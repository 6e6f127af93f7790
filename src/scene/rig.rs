//! Movement rig: a transform node with an inner look attachment
//!
//! The rig root handles translation and yaw; the look attachment handles
//! pitch. Meshes and cameras are parented to the look attachment so body
//! yaw and head tilt compose without disturbing each other.

use glam::Vec3;

use super::node::{NodeId, SceneGraph, Space};
use crate::try_direction;

/// Vertical jump state of a rig
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpState {
    pub airborne: bool,
    /// Vertical velocity (units/s, positive up)
    pub velocity: f32,
}

/// A movable, turnable transform with a separate look attachment
#[derive(Debug, Clone)]
pub struct MovementRig {
    root: NodeId,
    look: NodeId,
    /// Translation rate (units/second)
    pub units_per_second: f32,
    /// Turn rate (degrees/second)
    pub degrees_per_second: f32,
    pub jump: JumpState,
}

impl MovementRig {
    pub fn new(
        graph: &mut SceneGraph,
        name: &str,
        units_per_second: f32,
        degrees_per_second: f32,
    ) -> Self {
        let root = graph.create(name);
        let look = graph.create_child(root, "look_attachment");
        Self {
            root,
            look,
            units_per_second,
            degrees_per_second,
            jump: JumpState::default(),
        }
    }

    /// Rig root node (position and yaw)
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Inner node that owns attached meshes/cameras
    pub fn look_attachment(&self) -> NodeId {
        self.look
    }

    /// Attach a mesh or camera to the look attachment
    pub fn attach(&self, graph: &mut SceneGraph, child: NodeId) -> bool {
        graph.add_child(self.look, child)
    }

    pub fn detach(&self, graph: &mut SceneGraph, child: NodeId) {
        if graph.parent(child) == Some(self.look) {
            graph.detach(child);
        }
    }

    pub fn position(&self, graph: &SceneGraph) -> Option<Vec3> {
        graph.global_position(self.root)
    }

    /// Distance a full-throttle move covers in `dt`
    pub fn move_step(&self, dt: f32) -> f32 {
        self.units_per_second * dt
    }

    /// Yaw (radians) a full turn input covers in `dt`
    pub fn turn_step(&self, dt: f32) -> f32 {
        self.degrees_per_second.to_radians() * dt
    }

    /// Move along the local forward axis (-X) and yaw about local +Y
    pub fn apply_planar_move(&self, graph: &mut SceneGraph, forward_amount: f32, turn_amount: f32) {
        if forward_amount != 0.0 {
            graph.translate(self.root, Vec3::new(-forward_amount, 0.0, 0.0), Space::Local);
        }
        if turn_amount != 0.0 {
            graph.rotate_y(self.root, turn_amount, Space::Local);
        }
    }

    /// Pitch the look attachment only
    pub fn tilt(&self, graph: &mut SceneGraph, angle: f32) {
        graph.rotate_x(self.look, angle, Space::Local);
    }

    /// Start a jump. No-op while already airborne.
    pub fn jump(&mut self, strength: f32) -> bool {
        if self.jump.airborne {
            return false;
        }
        self.jump = JumpState {
            airborne: true,
            velocity: strength,
        };
        true
    }

    /// Advance an active jump; lands exactly on `ground`
    pub fn integrate_jump(&mut self, graph: &mut SceneGraph, dt: f32, gravity: f32, ground: f32) {
        if !self.jump.airborne {
            return;
        }
        let Some(mut position) = graph.local_position(self.root) else {
            return;
        };
        position.y += self.jump.velocity * dt;
        self.jump.velocity += gravity * dt;
        if position.y <= ground {
            position.y = ground;
            self.jump = JumpState::default();
        }
        graph.set_position(self.root, position);
    }

    /// Rigid chase placement: `target + orientation(target) * offset`,
    /// looking at the target raised by `look_bias`
    pub fn follow_target(
        &self,
        graph: &mut SceneGraph,
        target: NodeId,
        offset: Vec3,
        look_bias: f32,
    ) -> bool {
        let Some(matrix) = graph.global_matrix(target) else {
            return false;
        };
        let target_position = matrix.w_axis.truncate();
        let position = target_position + matrix.transform_vector3(offset);
        graph.set_position(self.root, position);
        graph.look_at(self.root, target_position + Vec3::Y * look_bias)
    }

    /// Cinematic placement: `distance` behind `target` on the line from
    /// `look_at_target` through the raised target, facing `look_at_target`
    ///
    /// Skipped (returns false, rig untouched) when the two points coincide.
    pub fn follow_target_look_at(
        &self,
        graph: &mut SceneGraph,
        target: NodeId,
        look_at_target: NodeId,
        elevation: f32,
        distance: f32,
    ) -> bool {
        let (Some(target_position), Some(focus)) = (
            graph.global_position(target),
            graph.global_position(look_at_target),
        ) else {
            return false;
        };
        let anchor = target_position + Vec3::Y * elevation;
        let Some(direction) = try_direction(focus - anchor) else {
            log::warn!("Cinematic camera skipped: target and focus coincide");
            return false;
        };
        graph.set_position(self.root, anchor - direction * distance);
        graph.look_at(self.root, focus)
    }
}
