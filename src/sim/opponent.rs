//! Opponent steering
//!
//! Purely reactive: every frame the opponent turns toward the spot behind
//! the ball (as seen from the player's goal) and drives forward. There is no
//! prediction or path planning, and difficulty only scales the speed.

use glam::Vec3;

use super::collision::contact_impulse;
use super::field::Side;
use super::state::GameState;
use crate::scene::Space;
use crate::try_direction;

/// Point `offset` behind the ball on the line from the goal through the
/// ball, at the given height. `None` if the ball sits on the goal point.
pub fn hit_point(ball: Vec3, goal: Vec3, offset: f32, height: f32) -> Option<Vec3> {
    let flat_ball = Vec3::new(ball.x, height, ball.z);
    let flat_goal = Vec3::new(goal.x, height, goal.z);
    let toward_goal = try_direction(flat_goal - flat_ball)?;
    Some(flat_ball - toward_goal * offset)
}

/// Turn, advance and (on contact) strike the ball. Returns true on contact.
pub fn steer_opponent(state: &mut GameState, dt: f32) -> bool {
    let root = state.opponent.root();
    let (Some(ball), Some(mut position)) = (state.ball_position(), state.graph.local_position(root))
    else {
        return false;
    };

    let ground = state.tuning.jetski_ground;
    position.y = ground;
    state.graph.set_position(root, position);

    let goal = state.field.goal_defended_by(Side::Player).line_center();
    if let Some(target) = hit_point(ball, goal, state.tuning.opponent_hit_offset, ground) {
        // look_at aims -Z; the yaw correction swings the -X nose onto the target
        if state.graph.look_at(root, target) {
            state.graph.rotate_y(
                root,
                state.tuning.opponent_yaw_correction_deg.to_radians(),
                Space::Local,
            );
        }
    }

    let step = state.opponent_speed() * dt;
    state.opponent.rig.apply_planar_move(&mut state.graph, step, 0.0);

    let Some(position) = state.graph.global_position(root) else {
        return false;
    };
    match contact_impulse(
        ball,
        position,
        state.tuning.hitbox_radius,
        state.tuning.impact_speed,
    ) {
        Some(velocity) => {
            state.ball.velocity = velocity;
            log::debug!("Opponent struck the ball: {:?}", velocity);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::settings::Difficulty;
    use crate::tuning::Tuning;

    #[test]
    fn test_hit_point_is_behind_ball() {
        let p = hit_point(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 0.0, 10.0), 1.0, 0.3).unwrap();
        assert!((p - Vec3::new(0.0, 0.3, -1.0)).length() < 1e-5);
        assert!(hit_point(Vec3::new(1.0, 3.0, 1.0), Vec3::new(1.0, 0.0, 1.0), 1.0, 0.3).is_none());
    }

    #[test]
    fn test_opponent_closes_on_hit_point() {
        let mut state = GameState::new(3);
        let ball = state.ball_position().unwrap();
        let goal = state.field.goal_defended_by(Side::Player).line_center();
        let target = hit_point(ball, goal, state.tuning.opponent_hit_offset, 0.3).unwrap();

        let before = state.graph.global_position(state.opponent.root()).unwrap();
        steer_opponent(&mut state, 0.1);
        let after = state.graph.global_position(state.opponent.root()).unwrap();

        assert!(after.distance(target) < before.distance(target));
        assert!((after.distance(before) - state.opponent_speed() * 0.1).abs() < 1e-4);
        assert!((after.y - state.tuning.jetski_ground).abs() < 1e-6);
    }

    #[test]
    fn test_opponent_contact_overwrites_velocity() {
        let mut state = GameState::new(3);
        let opponent = state.graph.global_position(state.opponent.root()).unwrap();
        let ball = opponent + Vec3::new(0.0, 0.2, 0.5);
        state.graph.set_position(state.ball.root(), ball);
        state.ball.velocity = Vec3::new(-40.0, 9.0, 3.0);

        assert!(steer_opponent(&mut state, 0.0));
        let expected = (ball - opponent).normalize() * state.tuning.impact_speed;
        assert!((state.ball.velocity - expected).length() < 1e-4);
    }

    #[test]
    fn test_difficulty_scales_speed_only() {
        let settings = Settings {
            difficulty: Difficulty::Hard,
            ..Default::default()
        };
        let state = GameState::with_config(3, Tuning::default(), &settings);
        assert_eq!(
            state.opponent_speed(),
            state.tuning.opponent_speed * Difficulty::Hard.speed_multiplier()
        );
    }
}
