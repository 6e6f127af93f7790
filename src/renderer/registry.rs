//! Renderable registry
//!
//! The scene graph positions everything; this registry says which nodes are
//! drawn and with what mesh. A graphics backend reads it (plus the graph's
//! global matrices) and never touches simulation state.

use std::collections::BTreeMap;

use glam::Mat4;

use super::instance::{InstanceRaw, colors};
use crate::scene::{NodeId, SceneGraph};

/// Visual representation requested for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MeshKind {
    PlayerJetSki = 0,
    OpponentJetSki = 1,
    Ball = 2,
    BallShadow = 3,
    BoostPickup = 4,
    BoostParticle = 5,
    Wall = 6,
    Goal = 7,
}

impl MeshKind {
    pub fn color(&self) -> [f32; 4] {
        match self {
            MeshKind::PlayerJetSki => colors::PLAYER,
            MeshKind::OpponentJetSki => colors::OPPONENT,
            MeshKind::Ball => colors::BALL,
            MeshKind::BallShadow => colors::SHADOW,
            MeshKind::BoostPickup => colors::BOOST_PICKUP,
            MeshKind::BoostParticle => colors::BOOST_PARTICLE,
            MeshKind::Wall => colors::WALL,
            MeshKind::Goal => colors::GOAL,
        }
    }
}

/// Creation/removal of visuals for spawned and despawned entities
///
/// Implemented by whatever owns meshes; the simulation only deals in node
/// handles and [`MeshKind`]s.
pub trait EntityFactory {
    fn spawn_visual(&mut self, node: NodeId, kind: MeshKind);
    fn despawn_visual(&mut self, node: NodeId);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    pub kind: MeshKind,
    pub visible: bool,
}

/// Node handle → renderable, iterated in handle order
#[derive(Debug, Clone, Default)]
pub struct RenderList {
    entries: BTreeMap<NodeId, Renderable>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, node: NodeId) -> Option<&Renderable> {
        self.entries.get(&node)
    }

    pub fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(entry) = self.entries.get_mut(&node) {
            entry.visible = visible;
        }
    }

    pub fn count(&self, kind: MeshKind) -> usize {
        self.entries.values().filter(|r| r.kind == kind).count()
    }

    /// Drop entries whose nodes no longer exist
    pub fn prune(&mut self, graph: &SceneGraph) {
        self.entries.retain(|node, _| graph.contains(*node));
    }

    /// Instance data for every visible renderable whose node is alive
    pub fn instances(&self, graph: &SceneGraph) -> Vec<InstanceRaw> {
        self.entries
            .iter()
            .filter(|(_, r)| r.visible)
            .filter_map(|(node, r)| {
                graph
                    .global_matrix(*node)
                    .map(|m: Mat4| InstanceRaw::new(m, r.kind))
            })
            .collect()
    }
}

impl EntityFactory for RenderList {
    fn spawn_visual(&mut self, node: NodeId, kind: MeshKind) {
        self.entries.insert(
            node,
            Renderable {
                kind,
                visible: true,
            },
        );
    }

    fn despawn_visual(&mut self, node: NodeId) {
        self.entries.remove(&node);
    }
}
