//! Game state and core simulation types
//!
//! The whole match lives in one explicitly owned [`GameState`]: the scene
//! graph, the parallel render list, every entity, the score and the RNG.
//! Systems borrow it mutably once per frame; nothing is global.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{CameraMode, CameraRig};
use super::field::{Field, Side};
use super::particles::ParticleSystem;
use super::pickups::Pickups;
use crate::renderer::{EntityFactory, MeshKind, RenderList};
use crate::scene::{MovementRig, NodeId, SceneGraph};
use crate::settings::{Difficulty, QualityPreset, Settings};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// A goal was just scored; the next tick only resumes play
    Reset,
}

/// Something noteworthy that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GoalScored { scorer: Side },
    BallContact { by: Side },
    GroundBounce,
    WallBounce { corner: bool },
    PickupSpawned,
    PickupCollected,
    CameraModeChanged(CameraMode),
}

/// Two-sided scoreboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn credit(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }

    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }
}

/// Player boost resource, always within `[0, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boost {
    value: f32,
    max: f32,
}

impl Boost {
    pub fn new(max: f32, initial: f32) -> Self {
        let max = max.max(0.0);
        Self {
            value: initial.clamp(0.0, max),
            max,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.value <= 0.0
    }

    /// Spend up to `amount`; returns what was actually spent
    pub fn consume(&mut self, amount: f32) -> f32 {
        let spent = amount.max(0.0).min(self.value);
        self.value -= spent;
        spent
    }

    pub fn add(&mut self, amount: f32) {
        self.value = (self.value + amount.max(0.0)).min(self.max);
    }

    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(0.0, self.max);
    }

    /// Fill level for the HUD bar
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.value / self.max
        } else {
            0.0
        }
    }
}

/// The ball: a rig carrying a scaled mesh, plus its velocity
#[derive(Debug, Clone)]
pub struct Ball {
    pub rig: MovementRig,
    pub mesh: NodeId,
    pub velocity: Vec3,
}

impl Ball {
    pub fn root(&self) -> NodeId {
        self.rig.root()
    }
}

/// A jet-ski, player or opponent
#[derive(Debug, Clone)]
pub struct JetSki {
    pub side: Side,
    pub rig: MovementRig,
    pub mesh: NodeId,
    start: Vec3,
    start_yaw: f32,
}

impl JetSki {
    pub fn root(&self) -> NodeId {
        self.rig.root()
    }

    /// Back to the kickoff spot and heading, feet on the water
    pub fn reset(&mut self, graph: &mut SceneGraph) {
        graph.set_rotation_y(self.rig.root(), self.start_yaw);
        graph.set_position(self.rig.root(), self.start);
        self.rig.jump = Default::default();
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub difficulty: Difficulty,
    pub quality: QualityPreset,
    /// Transform hierarchy for every entity
    pub graph: SceneGraph,
    /// What the renderer draws, keyed by node
    pub render_list: RenderList,
    pub field: Field,
    pub player: JetSki,
    pub opponent: JetSki,
    pub ball: Ball,
    /// Ground marker under the ball (absent on low quality)
    pub shadow: Option<NodeId>,
    pub camera: CameraRig,
    pub pickups: Pickups,
    pub particles: ParticleSystem,
    pub score: Score,
    pub boost: Boost,
    pub phase: GamePhase,
    /// Simulated seconds since kickoff
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised during the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New match with default tuning and settings
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), &Settings::default())
    }

    pub fn with_config(seed: u64, tuning: Tuning, settings: &Settings) -> Self {
        let mut graph = SceneGraph::new();
        let mut render_list = RenderList::new();
        let field = Field::from_tuning(&tuning);
        build_field_visuals(&mut graph, &mut render_list, &field);

        let ball_rig = MovementRig::new(&mut graph, "ball", 0.0, 0.0);
        let ball_mesh = graph.create("ball_mesh");
        ball_rig.attach(&mut graph, ball_mesh);
        graph.scale_uniform(ball_mesh, 0.3);
        graph.set_position(ball_rig.root(), Vec3::from(tuning.ball_start));
        render_list.spawn_visual(ball_mesh, MeshKind::Ball);
        let ball = Ball {
            rig: ball_rig,
            mesh: ball_mesh,
            velocity: Vec3::ZERO,
        };

        let mut player = spawn_jetski(
            &mut graph,
            &mut render_list,
            &tuning,
            Side::Player,
            Vec3::from(tuning.player_start),
            1.5 * PI,
        );
        let mut opponent = spawn_jetski(
            &mut graph,
            &mut render_list,
            &tuning,
            Side::Opponent,
            Vec3::from(tuning.opponent_start),
            FRAC_PI_2,
        );
        player.reset(&mut graph);
        opponent.reset(&mut graph);

        let shadow = settings.quality.shadow_enabled().then(|| {
            let node = graph.create("ball_shadow");
            graph.set_position(
                node,
                Vec3::new(tuning.ball_start[0], crate::consts::SHADOW_HEIGHT, tuning.ball_start[2]),
            );
            graph.scale(node, Vec3::new(0.3, 1.0, 0.3));
            render_list.spawn_visual(node, MeshKind::BallShadow);
            node
        });

        let camera = CameraRig::new(&mut graph, Vec3::from(tuning.camera_start), settings.camera);
        let particles = ParticleSystem::new(&mut graph, settings.quality.max_particles());
        let boost = Boost::new(tuning.max_boost, tuning.post_goal_boost);

        log::info!(
            "Kickoff: seed {}, difficulty {}, quality {}",
            seed,
            settings.difficulty.as_str(),
            settings.quality.as_str()
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            difficulty: settings.difficulty,
            quality: settings.quality,
            graph,
            render_list,
            field,
            player,
            opponent,
            ball,
            shadow,
            camera,
            pickups: Pickups::default(),
            particles,
            score: Score::default(),
            boost,
            phase: GamePhase::Playing,
            elapsed: 0.0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn ball_position(&self) -> Option<Vec3> {
        self.graph.global_position(self.ball.root())
    }

    pub fn jetski(&self, side: Side) -> &JetSki {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Opponent cruise speed after the difficulty multiplier
    pub fn opponent_speed(&self) -> f32 {
        self.tuning.opponent_speed * self.difficulty.speed_multiplier()
    }

    /// Hard reset after a goal: ball and jet-skis back to kickoff, boost
    /// refilled to the post-goal value, scorer credited
    pub fn goal_scored(&mut self, scorer: Side) {
        self.score.credit(scorer);
        self.graph
            .set_position(self.ball.root(), Vec3::from(self.tuning.ball_start));
        self.ball.velocity = Vec3::ZERO;
        self.player.reset(&mut self.graph);
        self.opponent.reset(&mut self.graph);
        self.boost.set(self.tuning.post_goal_boost);
        self.particles.clear(&mut self.graph, &mut self.render_list);
        self.phase = GamePhase::Reset;
        self.events.push(GameEvent::GoalScored { scorer });
        log::info!(
            "Goal for {:?}! Score {} - {}",
            scorer,
            self.score.player,
            self.score.opponent
        );
    }
}

fn spawn_jetski(
    graph: &mut SceneGraph,
    render_list: &mut RenderList,
    tuning: &Tuning,
    side: Side,
    start: Vec3,
    start_yaw: f32,
) -> JetSki {
    let (name, kind) = match side {
        Side::Player => ("player", MeshKind::PlayerJetSki),
        Side::Opponent => ("opponent", MeshKind::OpponentJetSki),
    };
    let rig = MovementRig::new(graph, name, tuning.jetski_speed, tuning.turn_rate);
    let mesh = graph.create("jetski_mesh");
    rig.attach(graph, mesh);
    render_list.spawn_visual(mesh, kind);
    JetSki {
        side,
        rig,
        mesh,
        start,
        start_yaw,
    }
}

/// Wall and goal-mouth slabs as scaled nodes under one field root
fn build_field_visuals(graph: &mut SceneGraph, render_list: &mut RenderList, field: &Field) {
    let root = graph.create("field");
    let slabs = field
        .walls
        .iter()
        .map(|w| (w.bounds, MeshKind::Wall))
        .chain(field.goals.iter().map(|g| (g.bounds, MeshKind::Goal)));
    for (bounds, kind) in slabs {
        let node = graph.create_child(root, "slab");
        let center = bounds.center();
        graph.set_position(node, Vec3::new(center.x, 0.5, center.z));
        graph.scale(node, Vec3::new(bounds.width(), 1.0, bounds.depth()));
        render_list.spawn_visual(node, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kickoff_layout() {
        let state = GameState::new(1);
        assert_eq!(state.ball_position().unwrap(), Vec3::new(0.5, 0.5, -4.0));
        let player = state.graph.global_position(state.player.root()).unwrap();
        assert!((player - Vec3::new(0.5, 0.3, 5.0)).length() < 1e-5);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.render_list.count(MeshKind::Wall), 6);
        assert_eq!(state.render_list.count(MeshKind::Goal), 2);
    }

    #[test]
    fn test_jetskis_face_each_other() {
        let state = GameState::new(1);
        // Model nose is local -X
        let nose = |side| {
            let m = state.graph.global_matrix(state.jetski(side).root()).unwrap();
            m.transform_vector3(-Vec3::X)
        };
        assert!((nose(Side::Player) - -Vec3::Z).length() < 1e-5);
        assert!((nose(Side::Opponent) - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_boost_clamps() {
        let mut boost = Boost::new(100.0, 150.0);
        assert_eq!(boost.value(), 100.0);
        assert_eq!(boost.consume(30.0), 30.0);
        assert_eq!(boost.consume(500.0), 70.0);
        assert!(boost.is_empty());
        boost.add(1000.0);
        assert_eq!(boost.fraction(), 1.0);
        boost.set(-5.0);
        assert_eq!(boost.value(), 0.0);
    }

    #[test]
    fn test_goal_scored_resets() {
        let mut state = GameState::new(1);
        state
            .graph
            .set_position(state.ball.root(), Vec3::new(3.0, 2.0, 1.0));
        state.ball.velocity = Vec3::new(1.0, 2.0, 3.0);
        state.boost.set(5.0);
        state.player.rig.jump(4.0);
        let emitted = state.particles.emit(
            &mut state.graph,
            &mut state.render_list,
            &mut state.rng,
            Vec3::new(0.5, 0.1, 5.0),
            4,
        );
        assert_eq!(emitted, 4);

        state.goal_scored(Side::Player);
        assert!(state.particles.is_empty());
        assert_eq!(state.render_list.count(MeshKind::BoostParticle), 0);
        assert_eq!(state.score.of(Side::Player), 1);
        assert_eq!(state.ball_position().unwrap(), Vec3::new(0.5, 0.5, -4.0));
        assert_eq!(state.ball.velocity, Vec3::ZERO);
        assert_eq!(state.boost.value(), state.tuning.post_goal_boost);
        assert!(!state.player.rig.jump.airborne);
        assert_eq!(state.phase, GamePhase::Reset);
        assert_eq!(state.events, vec![GameEvent::GoalScored { scorer: Side::Player }]);
    }

    #[test]
    fn test_low_quality_has_no_shadow() {
        let settings = Settings {
            quality: QualityPreset::Low,
            ..Default::default()
        };
        let state = GameState::with_config(1, Tuning::default(), &settings);
        assert!(state.shadow.is_none());
        assert_eq!(state.particles.max(), QualityPreset::Low.max_particles());
    }
}
