//! Rocket Water - jet-ski ball arcade game core
//!
//! Core modules:
//! - `scene`: Transform hierarchy (node arena) and movement rigs
//! - `sim`: Per-frame simulation (physics, collisions, opponent, scoring)
//! - `renderer`: Renderable registry and read-only frame data for a graphics backend
//! - `platform`: Input and clock providers
//! - `settings` / `tuning`: Player preferences and data-driven game balance

pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Difficulty, QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep (60 Hz) used by the headless driver and tests
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Downward acceleration (units/s²), shared by ball and jumping jet-skis
    pub const GRAVITY: f32 = -9.8;
    /// Resting height of the ball centre
    pub const BALL_GROUND: f32 = 0.3;
    /// Resting height of a jet-ski
    pub const JETSKI_GROUND: f32 = 0.3;
    /// Fraction of vertical speed kept after a ground bounce
    pub const RESTITUTION: f32 = 0.6;
    /// Rebounds slower than this settle the ball on the ground
    pub const BALL_REST_SPEED: f32 = 0.25;
    /// Per-frame velocity decay
    pub const ATTRITION: f32 = 0.99;

    /// Contact distance for every entity-to-entity test
    pub const HITBOX_RADIUS: f32 = 1.0;
    /// Ball speed after a jet-ski contact
    pub const IMPACT_SPEED: f32 = 8.0;

    /// Jet-ski defaults
    pub const JETSKI_SPEED: f32 = 4.0;
    pub const JETSKI_SPEED_BOOST: f32 = 1.8;
    pub const AIR_SPEED_BONUS: f32 = 1.5;
    pub const JETSKI_TURN_RATE: f32 = 120.0; // degrees per second
    pub const JETSKI_JUMP_STRENGTH: f32 = 4.5;
    /// Jet-skis are kept this far inside the walls
    pub const JETSKI_RADIUS: f32 = 0.5;

    /// Boost resource
    pub const MAX_BOOST: f32 = 100.0;
    pub const BOOST_DRAIN: f32 = 25.0; // per second while boosting
    pub const PICKUP_BOOST: f32 = 30.0;
    pub const POST_GOAL_BOOST: f32 = 50.0;

    /// Boost pickups
    pub const MAX_PICKUPS: usize = 3;
    pub const PICKUP_SPAWN_INTERVAL: f32 = 4.0; // seconds
    pub const PICKUP_RADIUS: f32 = 1.0;
    pub const PICKUP_MARGIN: f32 = 2.0;
    pub const PICKUP_HEIGHT: f32 = 0.6;
    pub const PICKUP_BOB_AMPLITUDE: f32 = 0.15;
    pub const PICKUP_BOB_MIN_FREQ: f32 = 1.0;
    pub const PICKUP_BOB_MAX_FREQ: f32 = 3.0;

    /// Opponent defaults
    pub const OPPONENT_SPEED: f32 = 3.0;
    pub const OPPONENT_HIT_OFFSET: f32 = 0.8;
    /// Yaw applied after look-at so the model's -X nose faces the target
    pub const OPPONENT_YAW_CORRECTION_DEG: f32 = -90.0;

    /// Camera defaults
    pub const CAMERA_OFFSET: [f32; 3] = [3.0, 1.2, 0.0];
    pub const CAMERA_LOOK_BIAS: f32 = 1.0;
    pub const CINEMATIC_ELEVATION: f32 = 1.5;
    pub const CINEMATIC_DISTANCE: f32 = 4.0;

    /// Field geometry (world X/Z)
    pub const FIELD_MIN_X: f32 = -9.5;
    pub const FIELD_MAX_X: f32 = 10.5;
    pub const FIELD_MIN_Z: f32 = -15.0;
    pub const FIELD_MAX_Z: f32 = 15.0;
    pub const WALL_THICKNESS: f32 = 0.5;
    pub const WALL_EXTENSION: f32 = 0.5;
    pub const GOAL_WIDTH: f32 = 5.0;
    pub const GOAL_DEPTH: f32 = 3.0;
    pub const GOAL_DEPTH_BIAS: f32 = 0.25;

    /// Canonical kickoff layout
    pub const BALL_START: [f32; 3] = [0.5, 0.5, -4.0];
    pub const PLAYER_START: [f32; 3] = [0.5, 0.3, 5.0];
    pub const OPPONENT_START: [f32; 3] = [0.5, 0.3, -13.0];
    pub const CAMERA_START: [f32; 3] = [0.5, 0.9, 5.8];

    /// Boost particles
    pub const PARTICLES_PER_EMIT: usize = 4;
    pub const PARTICLE_DROP: f32 = 0.2;

    /// Ball shadow marker height
    pub const SHADOW_HEIGHT: f32 = 0.1;
}

/// Below this length a direction is treated as degenerate
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Normalize `v`, or `None` when it is too short to carry a direction
#[inline]
pub fn try_direction(v: Vec3) -> Option<Vec3> {
    let len = v.length();
    if len <= DEGENERATE_EPSILON || !len.is_finite() {
        None
    } else {
        Some(v / len)
    }
}

/// Distance between two points projected onto the X/Z plane
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}
