//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit `dt`, explicit-Euler integration, no sub-stepping
//! - Seeded RNG only
//! - Stable iteration order (walls, jet-skis and pickups in creation order)
//! - No rendering or platform state beyond the input seam

pub mod camera;
pub mod collision;
pub mod field;
pub mod opponent;
pub mod particles;
pub mod pickups;
pub mod state;
pub mod tick;

pub use camera::{CameraMode, CameraRig};
pub use collision::{
    Vertical, WallContact, apply_attrition, contact_impulse, goal_scored_by, vertical_step,
    wall_contact, within_reach,
};
pub use field::{Aabb, Field, GoalMouth, Side, Wall, WallOrientation};
pub use opponent::{hit_point, steer_opponent};
pub use particles::{Particle, ParticleSystem};
pub use pickups::{BoostPickup, Pickups, collect_pickups, spawn_pickup, update_pickups};
pub use state::{Ball, Boost, GameEvent, GamePhase, GameState, JetSki, Score};
pub use tick::{TickInput, tick};
