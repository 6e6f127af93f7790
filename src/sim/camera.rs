//! Camera rig and its two follow modes

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::{MovementRig, NodeId, SceneGraph};
use crate::tuning::Tuning;

/// How the camera frames the action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Rigid third-person chase behind the player
    #[default]
    Chase,
    /// Behind the player on the line toward the ball, facing the ball
    Cinematic,
}

impl CameraMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMode::Chase => "Chase",
            CameraMode::Cinematic => "Cinematic",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Chase => CameraMode::Cinematic,
            CameraMode::Cinematic => CameraMode::Chase,
        }
    }
}

/// Camera node carried by a movement rig
#[derive(Debug, Clone)]
pub struct CameraRig {
    rig: MovementRig,
    camera: NodeId,
    pub mode: CameraMode,
}

impl CameraRig {
    pub fn new(graph: &mut SceneGraph, start: Vec3, mode: CameraMode) -> Self {
        let rig = MovementRig::new(graph, "camera_rig", 0.0, 0.0);
        let camera = graph.create("camera");
        rig.attach(graph, camera);
        graph.set_position(rig.root(), start);
        Self { rig, camera, mode }
    }

    pub fn rig(&self) -> &MovementRig {
        &self.rig
    }

    /// Node whose global matrix is the camera's world transform
    pub fn camera_node(&self) -> NodeId {
        self.camera
    }

    pub fn toggle(&mut self) -> CameraMode {
        self.mode = self.mode.toggled();
        log::info!("Camera mode: {}", self.mode.as_str());
        self.mode
    }

    /// Reposition for this frame. False when the update was skipped.
    pub fn update(
        &self,
        graph: &mut SceneGraph,
        player: NodeId,
        ball: NodeId,
        tuning: &Tuning,
    ) -> bool {
        match self.mode {
            CameraMode::Chase => self.rig.follow_target(
                graph,
                player,
                Vec3::from(tuning.camera_offset),
                tuning.camera_look_bias,
            ),
            CameraMode::Cinematic => self.rig.follow_target_look_at(
                graph,
                player,
                ball,
                tuning.cinematic_elevation,
                tuning.cinematic_distance,
            ),
        }
    }
}
