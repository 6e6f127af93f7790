//! Rocket Water entry point
//!
//! Native headless driver: loads settings and tuning, then plays one scripted
//! match against the opponent controller and reports what a renderer would
//! have been handed.
//!
//! Usage: `rocket-water [settings.json] [tuning.json]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec3;
use rocket_water::consts::SIM_DT;
use rocket_water::platform::{Action, Clock, FixedClock, InputProvider, KeyState};
use rocket_water::renderer::FrameView;
use rocket_water::sim::{GameEvent, GameState, TickInput, tick};
use rocket_water::{Settings, Tuning};

/// One minute of play at the fixed step
const DEMO_FRAMES: u32 = 3600;

/// Keyboard stand-in steering the player toward the ball
struct Autopilot {
    keys: KeyState,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            keys: KeyState::new(),
        }
    }

    fn set(&mut self, action: Action, held: bool) {
        if held {
            self.keys.press(action);
        } else {
            self.keys.release(action);
        }
    }

    fn update(&mut self, state: &GameState, frame: u32) {
        self.keys.end_frame();

        let player = state.player.root();
        let (Some(me), Some(ball), Some(matrix)) = (
            state.graph.global_position(player),
            state.ball_position(),
            state.graph.global_matrix(player),
        ) else {
            return;
        };
        let nose = matrix.transform_vector3(-Vec3::X);
        let to_ball = Vec3::new(ball.x - me.x, 0.0, ball.z - me.z).normalize_or_zero();
        // Positive yaw turns left; the cross product's Y tells which way
        let side = nose.z * to_ball.x - nose.x * to_ball.z;
        let aligned = nose.dot(to_ball) > 0.9;

        self.set(Action::Forward, true);
        self.set(Action::TurnLeft, side > 0.05);
        self.set(Action::TurnRight, side < -0.05);
        self.set(Action::Boost, aligned && state.boost.fraction() > 0.3);
        self.set(Action::Jump, frame % 300 == 150);
        self.set(Action::ToggleCamera, frame % 600 == 599);
        self.set(Action::Quit, frame + 1 >= DEMO_FRAMES);
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Rocket Water (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME));
    let settings = Settings::load(&settings_path);
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("{}; using default tuning", e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut state = GameState::with_config(seed, tuning, &settings);
    let mut clock = FixedClock::new(SIM_DT);
    let mut pilot = Autopilot::new();
    let mut contacts = 0u32;
    let mut pickups = 0u32;

    for frame in 0.. {
        pilot.update(&state, frame);
        if pilot.keys.is_pressed(Action::Quit) {
            break;
        }
        let input = TickInput::from_provider(&pilot.keys);
        tick(&mut state, &input, clock.delta());

        for event in &state.events {
            match event {
                GameEvent::BallContact { .. } => contacts += 1,
                GameEvent::PickupCollected => pickups += 1,
                _ => {}
            }
        }
    }

    let view = FrameView::capture(&state);
    log::info!(
        "Finished after {:.1}s: {} instances, boost {:.0}%",
        clock.now(),
        view.instances.len(),
        view.boost_fraction * 100.0
    );
    println!(
        "Final score {} - {} ({} ball contacts, {} pickups, seed {})",
        view.player_score, view.opponent_score, contacts, pickups, seed
    );
}
