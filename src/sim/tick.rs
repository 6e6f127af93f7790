//! Frame orchestrator
//!
//! Advances the match by one frame in a fixed order:
//! 1. Leave the post-goal reset phase (nothing else runs that frame)
//! 2. Camera toggle, player driving, jet-skis kept inside the walls
//! 3. Opponent steering
//! 4. Ball physics, walls and goal detection (a goal ends the frame)
//! 5. Pickups, particles, shadow marker and camera follow

use glam::Vec3;

use super::collision::{
    Vertical, apply_attrition, contact_impulse, goal_scored_by, vertical_step, wall_contact,
};
use super::field::Side;
use super::opponent::steer_opponent;
use super::pickups::update_pickups;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{PARTICLE_DROP, PARTICLES_PER_EMIT, SHADOW_HEIGHT};
use crate::platform::{Action, InputProvider};

/// Player commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// -1 (reverse) ..= 1 (forward)
    pub throttle: f32,
    /// -1 (right) ..= 1 (left)
    pub steer: f32,
    pub boost: bool,
    pub jump: bool,
    /// Reverse is held, even if forward cancels it out
    pub reverse: bool,
    /// Switch camera mode (edge-triggered)
    pub toggle_camera: bool,
}

impl TickInput {
    pub fn from_provider(input: &impl InputProvider) -> Self {
        let axis = |positive: Action, negative: Action| {
            input.is_pressed(positive) as i8 as f32 - input.is_pressed(negative) as i8 as f32
        };
        Self {
            throttle: axis(Action::Forward, Action::Back),
            steer: axis(Action::TurnLeft, Action::TurnRight),
            boost: input.is_pressed(Action::Boost),
            jump: input.is_pressed(Action::Jump),
            reverse: input.is_pressed(Action::Back),
            toggle_camera: input.is_down(Action::ToggleCamera),
        }
    }
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;

    if state.phase == GamePhase::Reset {
        state.phase = GamePhase::Playing;
        return;
    }
    state.elapsed += dt;

    if input.toggle_camera {
        let mode = state.camera.toggle();
        state.events.push(GameEvent::CameraModeChanged(mode));
    }
    drive_player(state, input, dt);
    confine_jetskis(state);

    steer_opponent(state, dt);

    if step_ball(state, dt) {
        return;
    }

    update_pickups(state);
    state
        .particles
        .update(&mut state.graph, &mut state.render_list, dt);
    update_shadow(state);
    state.camera.update(
        &mut state.graph,
        state.player.root(),
        state.ball.root(),
        &state.tuning,
    );
}

/// Boost drain, planar move, jump and exhaust for the player jet-ski
fn drive_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let tuning = &state.tuning;
    let throttle = input.throttle.clamp(-1.0, 1.0);
    let steer = input.steer.clamp(-1.0, 1.0);

    let boosting = input.boost && throttle != 0.0 && !state.boost.is_empty();
    if boosting {
        state.boost.consume(tuning.boost_drain * dt);
    }

    let rig = &mut state.player.rig;
    let mut rate = rig.units_per_second;
    if boosting {
        rate *= tuning.boost_multiplier;
    }
    if rig.jump.airborne {
        rate += tuning.air_speed_bonus;
    }
    // Reversing swaps the steering, like backing up a vehicle
    let turn_sign = if input.reverse || throttle < 0.0 {
        -1.0
    } else {
        1.0
    };
    rig.apply_planar_move(
        &mut state.graph,
        throttle * rate * dt,
        steer * turn_sign * rig.turn_step(dt),
    );

    if input.jump && rig.jump(tuning.jump_strength) {
        log::debug!("Player jump");
    }
    rig.integrate_jump(&mut state.graph, dt, tuning.gravity, tuning.jetski_ground);

    if !boosting {
        return;
    }
    if let Some(position) = state.graph.global_position(rig.root()) {
        state.particles.emit(
            &mut state.graph,
            &mut state.render_list,
            &mut state.rng,
            position - Vec3::Y * PARTICLE_DROP,
            PARTICLES_PER_EMIT,
        );
    }
}

/// Keep both jet-skis inside the field
fn confine_jetskis(state: &mut GameState) {
    for root in [state.player.root(), state.opponent.root()] {
        let Some(position) = state.graph.local_position(root) else {
            continue;
        };
        let confined = state.field.confine(position, state.tuning.jetski_radius);
        if confined != position {
            state.graph.set_position(root, confined);
        }
    }
}

/// Ball physics and collision. Returns true if a goal was scored.
fn step_ball(state: &mut GameState, dt: f32) -> bool {
    let Some(mut position) = state.ball_position() else {
        return false;
    };
    let tuning = &state.tuning;
    let mut velocity = state.ball.velocity;

    for side in [Side::Player, Side::Opponent] {
        let Some(jetski) = state.graph.global_position(state.jetski(side).root()) else {
            continue;
        };
        if let Some(impulse) =
            contact_impulse(position, jetski, tuning.hitbox_radius, tuning.impact_speed)
        {
            velocity = impulse;
            state.events.push(GameEvent::BallContact { by: side });
            log::debug!("{:?} hit the ball", side);
        }
    }

    let vertical = vertical_step(
        &mut position,
        &mut velocity,
        dt,
        tuning.gravity,
        tuning.ball_ground,
        tuning.restitution,
    );
    if vertical == Vertical::Bounced {
        state.events.push(GameEvent::GroundBounce);
    }

    velocity = apply_attrition(velocity, tuning.attrition);

    position += velocity * dt;
    state.graph.set_position(state.ball.root(), position);

    let next = position + velocity * dt;
    let contact = wall_contact(&state.field, next, velocity, tuning.wall_extension);
    if contact.any() {
        velocity = contact.apply(velocity);
        state.events.push(GameEvent::WallBounce {
            corner: contact.invert_x && contact.invert_z,
        });
    }
    state.ball.velocity = velocity;

    match goal_scored_by(&state.field, next, tuning.goal_depth_bias) {
        Some(scorer) => {
            state.goal_scored(scorer);
            true
        }
        None => false,
    }
}

fn update_shadow(state: &mut GameState) {
    let (Some(shadow), Some(ball)) = (state.shadow, state.ball_position()) else {
        return;
    };
    state
        .graph
        .set_position(shadow, Vec3::new(ball.x, SHADOW_HEIGHT, ball.z));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::platform::KeyState;
    use crate::sim::CameraMode;
    use glam::Mat4;
    use std::f32::consts::PI;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_first_tick_ball_falls() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default(), 0.016);

        let ball = state.ball_position().unwrap();
        assert!(ball.y < 0.5);
        assert!(
            !state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::BallContact { .. }))
        );
        assert_eq!(state.score.player, 0);
        assert_eq!(state.score.opponent, 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_goal_fires_once_and_resets() {
        let mut state = GameState::new(12345);
        state.ball.velocity = Vec3::new(0.0, 0.0, 650.0);

        tick(&mut state, &TickInput::default(), 0.016);
        let goals = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GoalScored { .. }))
            .count();
        assert_eq!(goals, 1);
        // The +Z goal belongs to the player, so the opponent scores
        assert_eq!(state.score.opponent, 1);
        assert_eq!(state.score.player, 0);
        assert_eq!(state.ball_position().unwrap(), Vec3::new(0.5, 0.5, -4.0));
        assert_eq!(state.ball.velocity, Vec3::ZERO);
        assert_eq!(state.phase, GamePhase::Reset);

        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), 0.016);
            assert!(
                !state
                    .events
                    .iter()
                    .any(|e| matches!(e, GameEvent::GoalScored { .. }))
            );
        }
        assert_eq!(state.score.opponent, 1);
    }

    #[test]
    fn test_reset_frame_only_resumes_play() {
        let mut state = GameState::new(1);
        state.goal_scored(Side::Player);
        let ball_before = state.ball_position().unwrap();
        let elapsed = state.elapsed;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball_position().unwrap(), ball_before);
        assert_eq!(state.elapsed, elapsed);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_player_contact_strikes_ball() {
        let mut state = GameState::new(1);
        let player = state.graph.global_position(state.player.root()).unwrap();
        state
            .graph
            .set_position(state.ball.root(), Vec3::new(player.x, 0.3, player.z - 0.5));
        state.ball.velocity = Vec3::new(3.0, 0.0, 3.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.events.contains(&GameEvent::BallContact { by: Side::Player }));
        let expected = Vec3::new(0.0, 0.0, -state.tuning.impact_speed * state.tuning.attrition);
        assert!(approx(state.ball.velocity, expected));
    }

    #[test]
    fn test_wall_bounce_inverts_x() {
        let mut state = GameState::new(1);
        state
            .graph
            .set_position(state.ball.root(), Vec3::new(10.0, 0.3, 0.0));
        state.ball.velocity = Vec3::new(20.0, 0.0, 0.0);

        tick(&mut state, &TickInput::default(), 0.016);
        assert!(state.events.contains(&GameEvent::WallBounce { corner: false }));
        assert!(state.ball.velocity.x < 0.0);
        assert_eq!(state.ball.velocity.z, 0.0);
    }

    #[test]
    fn test_ground_bounce_restitution() {
        let mut state = GameState::new(1);
        state
            .graph
            .set_position(state.ball.root(), Vec3::new(0.5, 0.2, 0.0));
        state.ball.velocity = Vec3::new(0.0, -5.0, 0.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.events.contains(&GameEvent::GroundBounce));
        let expected = 5.0 * state.tuning.restitution * state.tuning.attrition;
        assert!((state.ball.velocity.y - expected).abs() < 1e-4);
    }

    #[test]
    fn test_boost_drains_and_speeds_up() {
        let input = TickInput {
            throttle: 1.0,
            boost: true,
            ..Default::default()
        };
        let mut boosted = GameState::new(1);
        let mut plain = GameState::new(1);
        let start = boosted.graph.global_position(boosted.player.root()).unwrap();
        let boost_before = boosted.boost.value();

        tick(&mut boosted, &input, 0.1);
        tick(
            &mut plain,
            &TickInput {
                boost: false,
                ..input.clone()
            },
            0.1,
        );

        let moved = |s: &GameState| {
            s.graph
                .global_position(s.player.root())
                .unwrap()
                .distance(start)
        };
        let t = &boosted.tuning;
        assert!((moved(&plain) - t.jetski_speed * 0.1).abs() < 1e-4);
        assert!((moved(&boosted) - t.jetski_speed * t.boost_multiplier * 0.1).abs() < 1e-4);
        assert!((boosted.boost.value() - (boost_before - t.boost_drain * 0.1)).abs() < 1e-4);
        assert_eq!(boosted.particles.len(), PARTICLES_PER_EMIT);
        assert!(plain.particles.is_empty());
    }

    #[test]
    fn test_empty_boost_gives_no_speed() {
        let mut state = GameState::new(1);
        state.boost.set(0.0);
        let start = state.graph.global_position(state.player.root()).unwrap();
        let input = TickInput {
            throttle: 1.0,
            boost: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.1);
        let moved = state
            .graph
            .global_position(state.player.root())
            .unwrap()
            .distance(start);
        assert!((moved - state.tuning.jetski_speed * 0.1).abs() < 1e-4);
        assert_eq!(state.boost.value(), 0.0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_reverse_inverts_steering() {
        let yaw_after = |throttle: f32| {
            let mut state = GameState::new(1);
            let input = TickInput {
                throttle,
                steer: 1.0,
                ..Default::default()
            };
            tick(&mut state, &input, 0.1);
            state
                .graph
                .global_matrix(state.player.root())
                .unwrap()
                .x_axis
                .truncate()
        };
        let turn = state_turn_step(0.1);
        let forward = Mat4::from_rotation_y(1.5 * PI + turn).x_axis.truncate();
        let reverse = Mat4::from_rotation_y(1.5 * PI - turn).x_axis.truncate();
        assert!(approx(yaw_after(1.0), forward));
        assert!(approx(yaw_after(-1.0), reverse));
    }

    #[test]
    fn test_reverse_held_with_forward_inverts_steering() {
        let mut state = GameState::new(1);
        let mut keys = KeyState::new();
        keys.press(Action::Forward);
        keys.press(Action::Back);
        keys.press(Action::TurnLeft);
        let input = TickInput::from_provider(&keys);
        assert_eq!(input.throttle, 0.0);
        assert!(input.reverse);

        tick(&mut state, &input, 0.1);
        let heading = state
            .graph
            .global_matrix(state.player.root())
            .unwrap()
            .x_axis
            .truncate();
        let expected = Mat4::from_rotation_y(1.5 * PI - state_turn_step(0.1))
            .x_axis
            .truncate();
        assert!(approx(heading, expected));
    }

    #[test]
    fn test_airborne_player_gets_speed_bonus() {
        let mut state = GameState::new(1);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT);
        assert!(state.player.rig.jump.airborne);

        let before = state.graph.global_position(state.player.root()).unwrap();
        let forward = TickInput {
            throttle: 1.0,
            ..Default::default()
        };
        tick(&mut state, &forward, SIM_DT);
        assert!(state.player.rig.jump.airborne);
        let after = state.graph.global_position(state.player.root()).unwrap();

        let moved = crate::planar_distance(before, after);
        let expected = (state.tuning.jetski_speed + state.tuning.air_speed_bonus) * SIM_DT;
        assert!((moved - expected).abs() < 1e-4);
    }

    fn state_turn_step(dt: f32) -> f32 {
        crate::Tuning::default().turn_rate.to_radians() * dt
    }

    #[test]
    fn test_jump_lifts_player() {
        let mut state = GameState::new(1);
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.player.rig.jump.airborne);
        let y = state.graph.global_position(state.player.root()).unwrap().y;
        assert!(y > state.tuning.jetski_ground);
    }

    #[test]
    fn test_jetski_confined_to_field() {
        let mut state = GameState::new(1);
        state
            .graph
            .set_position(state.player.root(), Vec3::new(100.0, 0.3, 5.0));
        tick(&mut state, &TickInput::default(), SIM_DT);
        let x = state.graph.global_position(state.player.root()).unwrap().x;
        assert!((x - (state.field.interior.max_x - state.tuning.jetski_radius)).abs() < 1e-5);
    }

    #[test]
    fn test_camera_toggle_from_keys() {
        let mut state = GameState::new(1);
        let mut keys = KeyState::new();
        keys.press(Action::ToggleCamera);

        tick(&mut state, &TickInput::from_provider(&keys), SIM_DT);
        assert_eq!(state.camera.mode, CameraMode::Cinematic);
        assert!(
            state
                .events
                .contains(&GameEvent::CameraModeChanged(CameraMode::Cinematic))
        );

        // Still held next frame: no second toggle
        keys.end_frame();
        tick(&mut state, &TickInput::from_provider(&keys), SIM_DT);
        assert_eq!(state.camera.mode, CameraMode::Cinematic);
    }

    #[test]
    fn test_input_from_keys() {
        let mut keys = KeyState::new();
        keys.press(Action::Back);
        keys.press(Action::TurnRight);
        keys.press(Action::Boost);
        let input = TickInput::from_provider(&keys);
        assert_eq!(input.throttle, -1.0);
        assert_eq!(input.steer, -1.0);
        assert!(input.boost);
        assert!(!input.jump);
    }

    #[test]
    fn test_shadow_tracks_ball() {
        let mut state = GameState::new(1);
        state.ball.velocity = Vec3::new(2.0, 0.0, 1.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        let ball = state.ball_position().unwrap();
        let shadow = state.graph.global_position(state.shadow.unwrap()).unwrap();
        assert_eq!(shadow, Vec3::new(ball.x, SHADOW_HEIGHT, ball.z));
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and inputs stay identical
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                throttle: 1.0,
                boost: true,
                ..Default::default()
            },
            TickInput {
                throttle: 1.0,
                steer: 0.5,
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..600 {
            let input = &inputs[(i / 50) % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.ball_position(), state2.ball_position());
        assert_eq!(state1.pickups.active(), state2.pickups.active());
        assert_eq!(state1.particles.len(), state2.particles.len());
        assert!(state1.elapsed > state1.tuning.pickup_spawn_interval);
    }
}
