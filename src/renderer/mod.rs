//! Renderer boundary
//!
//! The graphics backend lives outside this crate. It consumes a [`FrameView`]
//! each frame: GPU-ready instance data for every visible node plus the few
//! gameplay values the HUD shows.

pub mod instance;
pub mod registry;

pub use instance::InstanceRaw;
pub use registry::{EntityFactory, MeshKind, RenderList, Renderable};

use glam::Mat4;

use crate::sim::GameState;

/// Read-only snapshot of what to draw this frame
#[derive(Debug, Clone)]
pub struct FrameView {
    pub instances: Vec<InstanceRaw>,
    /// Inverse of the camera's global matrix
    pub view: Mat4,
    /// Boost bar fill, 0..=1
    pub boost_fraction: f32,
    pub player_score: u32,
    pub opponent_score: u32,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let view = state
            .graph
            .global_matrix(state.camera.camera_node())
            .map(|m| m.inverse())
            .unwrap_or(Mat4::IDENTITY);
        Self {
            instances: state.render_list.instances(&state.graph),
            view,
            boost_fraction: state.boost.fraction(),
            player_score: state.score.player,
            opponent_score: state.score.opponent,
        }
    }

    /// Boost bar quad in normalized device coordinates, matching the
    /// classic bottom-of-screen bar: x from -0.9 to -0.9 + 1.8 * fill
    pub fn boost_bar_vertices(&self) -> [[f32; 3]; 6] {
        let left = -0.9;
        let right = left + 1.8 * self.boost_fraction.clamp(0.0, 1.0);
        let (bottom, top) = (-0.9, -0.8);
        [
            [left, bottom, 0.0],
            [right, bottom, 0.0],
            [right, top, 0.0],
            [right, top, 0.0],
            [left, top, 0.0],
            [left, bottom, 0.0],
        ]
    }
}
