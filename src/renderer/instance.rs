//! Per-instance data handed to the graphics backend

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::registry::MeshKind;

/// One drawable instance: world matrix, tint and mesh selector
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub mesh: u32,
    pub _pad: [u32; 3],
}

impl InstanceRaw {
    pub fn new(model: Mat4, mesh: MeshKind) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: mesh.color(),
            mesh: mesh as u32,
            _pad: [0; 3],
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// Byte stride for a vertex-buffer layout
    pub const STRIDE: usize = std::mem::size_of::<InstanceRaw>();
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.9, 0.2, 0.2, 1.0];
    pub const OPPONENT: [f32; 4] = [0.2, 0.3, 0.9, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SHADOW: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
    pub const BOOST_PICKUP: [f32; 4] = [1.0, 0.8, 0.1, 1.0];
    pub const BOOST_PARTICLE: [f32; 4] = [0.0, 0.0, 0.6, 1.0];
    pub const WALL: [f32; 4] = [0.8, 0.75, 0.6, 1.0];
    pub const GOAL: [f32; 4] = [0.3, 0.9, 0.4, 0.5];
}
