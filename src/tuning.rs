//! Data-driven game balance
//!
//! Every physics and gameplay constant the simulation reads. Defaults come
//! from [`crate::consts`]; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball ===
    pub gravity: f32,
    pub ball_ground: f32,
    pub restitution: f32,
    pub attrition: f32,
    pub hitbox_radius: f32,
    pub impact_speed: f32,

    // === Jet-skis ===
    pub jetski_ground: f32,
    pub jetski_speed: f32,
    pub boost_multiplier: f32,
    pub air_speed_bonus: f32,
    /// Degrees per second
    pub turn_rate: f32,
    pub jump_strength: f32,
    pub jetski_radius: f32,

    // === Boost ===
    pub max_boost: f32,
    pub boost_drain: f32,
    pub pickup_boost: f32,
    pub post_goal_boost: f32,

    // === Pickups ===
    pub max_pickups: usize,
    /// Seconds between spawns
    pub pickup_spawn_interval: f32,
    pub pickup_radius: f32,
    pub pickup_margin: f32,
    pub pickup_height: f32,
    pub pickup_bob_amplitude: f32,
    pub pickup_bob_min_freq: f32,
    pub pickup_bob_max_freq: f32,

    // === Opponent ===
    pub opponent_speed: f32,
    pub opponent_hit_offset: f32,
    pub opponent_yaw_correction_deg: f32,

    // === Camera ===
    pub camera_offset: [f32; 3],
    pub camera_look_bias: f32,
    pub cinematic_elevation: f32,
    pub cinematic_distance: f32,

    // === Field ===
    pub field_min_x: f32,
    pub field_max_x: f32,
    pub field_min_z: f32,
    pub field_max_z: f32,
    pub wall_thickness: f32,
    pub wall_extension: f32,
    pub goal_width: f32,
    pub goal_depth: f32,
    pub goal_depth_bias: f32,

    // === Kickoff ===
    pub ball_start: [f32; 3],
    pub player_start: [f32; 3],
    pub opponent_start: [f32; 3],
    pub camera_start: [f32; 3],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            ball_ground: BALL_GROUND,
            restitution: RESTITUTION,
            attrition: ATTRITION,
            hitbox_radius: HITBOX_RADIUS,
            impact_speed: IMPACT_SPEED,

            jetski_ground: JETSKI_GROUND,
            jetski_speed: JETSKI_SPEED,
            boost_multiplier: JETSKI_SPEED_BOOST,
            air_speed_bonus: AIR_SPEED_BONUS,
            turn_rate: JETSKI_TURN_RATE,
            jump_strength: JETSKI_JUMP_STRENGTH,
            jetski_radius: JETSKI_RADIUS,

            max_boost: MAX_BOOST,
            boost_drain: BOOST_DRAIN,
            pickup_boost: PICKUP_BOOST,
            post_goal_boost: POST_GOAL_BOOST,

            max_pickups: MAX_PICKUPS,
            pickup_spawn_interval: PICKUP_SPAWN_INTERVAL,
            pickup_radius: PICKUP_RADIUS,
            pickup_margin: PICKUP_MARGIN,
            pickup_height: PICKUP_HEIGHT,
            pickup_bob_amplitude: PICKUP_BOB_AMPLITUDE,
            pickup_bob_min_freq: PICKUP_BOB_MIN_FREQ,
            pickup_bob_max_freq: PICKUP_BOB_MAX_FREQ,

            opponent_speed: OPPONENT_SPEED,
            opponent_hit_offset: OPPONENT_HIT_OFFSET,
            opponent_yaw_correction_deg: OPPONENT_YAW_CORRECTION_DEG,

            camera_offset: CAMERA_OFFSET,
            camera_look_bias: CAMERA_LOOK_BIAS,
            cinematic_elevation: CINEMATIC_ELEVATION,
            cinematic_distance: CINEMATIC_DISTANCE,

            field_min_x: FIELD_MIN_X,
            field_max_x: FIELD_MAX_X,
            field_min_z: FIELD_MIN_Z,
            field_max_z: FIELD_MAX_Z,
            wall_thickness: WALL_THICKNESS,
            wall_extension: WALL_EXTENSION,
            goal_width: GOAL_WIDTH,
            goal_depth: GOAL_DEPTH,
            goal_depth_bias: GOAL_DEPTH_BIAS,

            ball_start: BALL_START,
            player_start: PLAYER_START,
            opponent_start: OPPONENT_START,
            camera_start: CAMERA_START,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.attrition > 0.0 && self.attrition < 1.0) {
            return invalid("attrition", "must be strictly between 0 and 1");
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return invalid("restitution", "must be within [0, 1]");
        }
        if self.hitbox_radius <= 0.0 {
            return invalid("hitbox_radius", "must be positive");
        }
        if self.impact_speed <= 0.0 {
            return invalid("impact_speed", "must be positive");
        }
        if self.jetski_speed <= 0.0 || self.opponent_speed < 0.0 {
            return invalid("jetski_speed", "speeds must be positive");
        }
        if self.max_boost <= 0.0 {
            return invalid("max_boost", "must be positive");
        }
        if !(0.0..=self.max_boost).contains(&self.post_goal_boost) {
            return invalid("post_goal_boost", "must be within [0, max_boost]");
        }
        if self.pickup_spawn_interval < 0.0 || self.pickup_radius <= 0.0 {
            return invalid("pickup_radius", "pickup radius and interval must be positive");
        }
        if self.pickup_bob_min_freq > self.pickup_bob_max_freq {
            return invalid("pickup_bob_min_freq", "must not exceed pickup_bob_max_freq");
        }
        if self.field_min_x >= self.field_max_x || self.field_min_z >= self.field_max_z {
            return invalid("field_min_x", "field bounds are empty");
        }
        let half_width = (self.field_max_x - self.field_min_x) * 0.5;
        let half_depth = (self.field_max_z - self.field_min_z) * 0.5;
        if self.pickup_margin >= half_width.min(half_depth) {
            return invalid("pickup_margin", "must be smaller than half the field");
        }
        if self.goal_width <= 0.0 || self.goal_width >= self.field_max_x - self.field_min_x {
            return invalid("goal_width", "must fit inside the end wall");
        }
        if self.goal_depth <= self.goal_depth_bias {
            return invalid("goal_depth", "must exceed goal_depth_bias");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "attrition": 0.95, "max_pickups": 5 }"#).unwrap();
        assert_eq!(tuning.attrition, 0.95);
        assert_eq!(tuning.max_pickups, 5);
        assert_eq!(tuning.gravity, GRAVITY);
    }

    #[test]
    fn test_invalid_attrition() {
        let err = Tuning::from_json(r#"{ "attrition": 1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "attrition",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_post_goal_boost() {
        let tuning = Tuning {
            post_goal_boost: MAX_BOOST + 1.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Tuning::load("/definitely/not/here.json"),
            Err(TuningError::Io(_))
        ));
    }
}
