//! Scene graph
//!
//! Positions everything in the game. What gets drawn is tracked separately by
//! [`crate::renderer::RenderList`].

pub mod node;
pub mod rig;

pub use node::{Node, NodeId, SceneGraph, Space, make_look_at};
pub use rig::{JumpState, MovementRig};
