//! Boost exhaust particles
//!
//! Purely decorative. Each particle is a child node of the system's root so
//! the renderer picks them up like any other node; expired particles are
//! collected first and destroyed afterwards.

use glam::Vec3;
use rand::Rng;

use crate::renderer::{EntityFactory, MeshKind};
use crate::scene::{NodeId, SceneGraph, Space};

/// A single exhaust puff
#[derive(Debug, Clone)]
pub struct Particle {
    pub node: NodeId,
    pub velocity: Vec3,
    /// Seconds the particle lives
    pub lifespan: f32,
    pub age: f32,
}

impl Particle {
    pub fn is_expired(&self) -> bool {
        self.age >= self.lifespan
    }
}

/// Owner of every live particle
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    root: NodeId,
    particles: Vec<Particle>,
    max: usize,
}

impl ParticleSystem {
    pub fn new(graph: &mut SceneGraph, max: usize) -> Self {
        Self {
            root: graph.create("particle_system"),
            particles: Vec::new(),
            max,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Emit up to `count` particles at `origin`, never exceeding the cap.
    /// Returns how many were emitted.
    pub fn emit<R: Rng>(
        &mut self,
        graph: &mut SceneGraph,
        factory: &mut impl EntityFactory,
        rng: &mut R,
        origin: Vec3,
        count: usize,
    ) -> usize {
        let count = count.min(self.max.saturating_sub(self.particles.len()));
        for _ in 0..count {
            let node = graph.create_child(self.root, "particle");
            graph.set_position(node, origin);
            graph.scale_uniform(node, rng.random_range(0.03..=0.07));
            factory.spawn_visual(node, MeshKind::BoostParticle);
            self.particles.push(Particle {
                node,
                velocity: Vec3::new(
                    rng.random_range(-0.5..=0.0),
                    rng.random_range(0.0..=0.5),
                    rng.random_range(-0.5..=0.0),
                ),
                lifespan: rng.random_range(1.0..=3.0),
                age: 0.0,
            });
        }
        count
    }

    /// Drift and age every particle, then remove the expired ones.
    /// Returns how many were removed.
    pub fn update(
        &mut self,
        graph: &mut SceneGraph,
        factory: &mut impl EntityFactory,
        dt: f32,
    ) -> usize {
        for particle in &mut self.particles {
            graph.translate(particle.node, particle.velocity * dt, Space::Global);
            particle.age += dt;
        }

        let (expired, alive): (Vec<Particle>, Vec<Particle>) =
            self.particles.drain(..).partition(Particle::is_expired);
        self.particles = alive;
        for particle in &expired {
            factory.despawn_visual(particle.node);
            graph.destroy(particle.node);
        }
        expired.len()
    }

    pub fn clear(&mut self, graph: &mut SceneGraph, factory: &mut impl EntityFactory) {
        for particle in self.particles.drain(..) {
            factory.despawn_visual(particle.node);
            graph.destroy(particle.node);
        }
    }
}
