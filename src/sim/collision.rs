//! Collision detection and response
//!
//! Collision is special-cased per pair: ball vs. jet-ski hitbox sphere,
//! ball vs. ground plane, ball vs. axis-aligned wall slab, ball vs. goal
//! mouth. Every function here is pure; the tick decides what to do with
//! the results.

use glam::Vec3;

use super::field::{Field, Side};
use crate::consts::BALL_REST_SPEED;
use crate::try_direction;

/// Ball velocity after a jet-ski contact, or `None` if there is no contact
///
/// The new velocity overwrites the old one: unit direction from the jet-ski
/// to the ball scaled to `impact_speed`. An exact overlap has no direction
/// and is skipped.
pub fn contact_impulse(
    ball_pos: Vec3,
    jetski_pos: Vec3,
    hitbox_radius: f32,
    impact_speed: f32,
) -> Option<Vec3> {
    let offset = ball_pos - jetski_pos;
    if offset.length() >= hitbox_radius {
        return None;
    }
    try_direction(offset).map(|dir| dir * impact_speed)
}

/// Result of the vertical step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    /// Above ground, gravity applied
    Airborne,
    /// Hit the ground this frame and bounced
    Bounced,
    /// On the ground, not moving down
    Resting,
}

/// Gravity while above `ground`; snap-and-bounce once at/below it and
/// descending (`v_y' = -v_y * restitution`). A rebound slower than
/// `BALL_REST_SPEED` settles the ball instead.
pub fn vertical_step(
    pos: &mut Vec3,
    vel: &mut Vec3,
    dt: f32,
    gravity: f32,
    ground: f32,
    restitution: f32,
) -> Vertical {
    if pos.y > ground {
        vel.y += gravity * dt;
        return Vertical::Airborne;
    }
    pos.y = ground;
    if vel.y >= 0.0 {
        return Vertical::Resting;
    }
    vel.y = -vel.y * restitution;
    if vel.y < BALL_REST_SPEED {
        vel.y = 0.0;
        return Vertical::Resting;
    }
    Vertical::Bounced
}

/// Uniform per-frame drag
#[inline]
pub fn apply_attrition(vel: Vec3, attrition: f32) -> Vec3 {
    vel * attrition
}

/// Which velocity components the walls want inverted this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// A side wall was hit (constrains X)
    pub invert_x: bool,
    /// An end wall was hit (constrains Z)
    pub invert_z: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.invert_x || self.invert_z
    }

    /// Reflect `vel`. A corner hit inverts both X and Z.
    pub fn apply(&self, mut vel: Vec3) -> Vec3 {
        if self.invert_x {
            vel.x = -vel.x;
        }
        if self.invert_z {
            vel.z = -vel.z;
        }
        vel
    }
}

/// Test the predicted next position against every wall
///
/// A wall only registers while the ball heads out through it, so a ball
/// that is already turning back is never flipped outward again.
pub fn wall_contact(field: &Field, next: Vec3, vel: Vec3, extension: f32) -> WallContact {
    use super::field::WallOrientation;

    let mut contact = WallContact::default();
    for wall in &field.walls {
        if !wall.is_crossed_by(next, extension) || !wall.is_heading_out(vel) {
            continue;
        }
        match wall.orientation {
            WallOrientation::Vertical => contact.invert_x = true,
            WallOrientation::Horizontal => contact.invert_z = true,
        }
    }
    contact
}

/// Side credited with a goal if the predicted position is inside a mouth
pub fn goal_scored_by(field: &Field, next: Vec3, depth_bias: f32) -> Option<Side> {
    field
        .goals
        .iter()
        .find(|goal| goal.is_entered(next, depth_bias))
        .map(|goal| goal.scorer())
}

/// Contact test used for pickups and other planar proximity checks
#[inline]
pub fn within_reach(a: Vec3, b: Vec3, radius: f32) -> bool {
    crate::planar_distance(a, b) < radius
}
