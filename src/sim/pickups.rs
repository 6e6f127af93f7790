//! Boost pickups: timed spawning, proximity collection and bobbing

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use super::collision::within_reach;
use super::state::{GameEvent, GameState};
use crate::renderer::{EntityFactory, MeshKind};
use crate::scene::NodeId;

/// A floating boost canister
#[derive(Debug, Clone, PartialEq)]
pub struct BoostPickup {
    pub node: NodeId,
    /// Rest position; the bob oscillates around it
    pub base: Vec3,
    pub phase: f32,
    /// Bob frequency (radians per second)
    pub frequency: f32,
}

impl BoostPickup {
    pub fn bob_height(&self, elapsed: f32, amplitude: f32) -> f32 {
        self.base.y + amplitude * (self.phase + self.frequency * elapsed).sin()
    }
}

/// Active pickups plus the spawn timer
#[derive(Debug, Clone, Default)]
pub struct Pickups {
    active: Vec<BoostPickup>,
    /// Simulated time of the last spawn (or kickoff)
    last_spawn: f32,
}

impl Pickups {
    pub fn active(&self) -> &[BoostPickup] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn spawn_due(&self, elapsed: f32, interval: f32, max: usize) -> bool {
        self.active.len() < max && elapsed - self.last_spawn >= interval
    }
}

/// Spawn, collect and animate pickups for this frame
pub fn update_pickups(state: &mut GameState) {
    spawn_pickup(state);
    collect_pickups(state);
    bob_pickups(state);
}

/// Spawn one pickup at a random in-bounds spot when the timer allows
pub fn spawn_pickup(state: &mut GameState) -> Option<NodeId> {
    let tuning = &state.tuning;
    if !state.pickups.spawn_due(
        state.elapsed,
        tuning.pickup_spawn_interval,
        tuning.max_pickups,
    ) {
        return None;
    }

    let area = state.field.interior.inset(tuning.pickup_margin);
    let base = Vec3::new(
        state.rng.random_range(area.min_x..=area.max_x),
        tuning.pickup_height,
        state.rng.random_range(area.min_z..=area.max_z),
    );
    let frequency = state
        .rng
        .random_range(tuning.pickup_bob_min_freq..=tuning.pickup_bob_max_freq);
    let phase = state.rng.random_range(0.0..TAU);

    let node = state.graph.create("boost_pickup");
    state.graph.set_position(node, base);
    state.render_list.spawn_visual(node, MeshKind::BoostPickup);
    state.pickups.active.push(BoostPickup {
        node,
        base,
        phase,
        frequency,
    });
    state.pickups.last_spawn = state.elapsed;
    state.events.push(GameEvent::PickupSpawned);
    log::debug!("Boost pickup spawned at {:?}", base);
    Some(node)
}

/// Collect every pickup within reach of the player. Returns how many.
///
/// Reach is the planar distance against `pickup_radius`, so a pickup bobbing
/// above a jet-ski still counts. The radius is its own tunable; by default it
/// equals the hitbox radius used for ball contacts.
pub fn collect_pickups(state: &mut GameState) -> usize {
    let Some(player) = state.graph.global_position(state.player.root()) else {
        return 0;
    };
    let radius = state.tuning.pickup_radius;
    let (collected, remaining): (Vec<BoostPickup>, Vec<BoostPickup>) = state
        .pickups
        .active
        .drain(..)
        .partition(|p| within_reach(player, p.base, radius));
    state.pickups.active = remaining;

    for pickup in &collected {
        state.boost.add(state.tuning.pickup_boost);
        state.render_list.despawn_visual(pickup.node);
        state.graph.destroy(pickup.node);
        state.events.push(GameEvent::PickupCollected);
        log::debug!("Boost pickup collected, boost {:.0}", state.boost.value());
    }
    collected.len()
}

fn bob_pickups(state: &mut GameState) {
    let amplitude = state.tuning.pickup_bob_amplitude;
    for pickup in &state.pickups.active {
        let y = pickup.bob_height(state.elapsed, amplitude);
        state
            .graph
            .set_position(pickup.node, Vec3::new(pickup.base.x, y, pickup.base.z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due_state() -> GameState {
        let mut state = GameState::new(42);
        state.elapsed = state.tuning.pickup_spawn_interval;
        state
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut state = GameState::new(42);
        state.elapsed = state.tuning.pickup_spawn_interval * 0.5;
        assert!(spawn_pickup(&mut state).is_none());
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_spawn_in_bounds_and_capped() {
        let mut state = due_state();
        let area = state.field.interior.inset(state.tuning.pickup_margin);
        for _ in 0..10 {
            state.elapsed += state.tuning.pickup_spawn_interval;
            spawn_pickup(&mut state);
        }
        assert_eq!(state.pickups.len(), state.tuning.max_pickups);
        for pickup in state.pickups.active() {
            assert!(area.contains(pickup.base));
            assert!(
                (state.tuning.pickup_bob_min_freq..=state.tuning.pickup_bob_max_freq)
                    .contains(&pickup.frequency)
            );
        }
        assert_eq!(
            state.render_list.count(MeshKind::BoostPickup),
            state.tuning.max_pickups
        );
    }

    #[test]
    fn test_collect_adds_boost_and_despawns() {
        let mut state = due_state();
        let node = spawn_pickup(&mut state).unwrap();
        let base = state.pickups.active()[0].base;
        state
            .graph
            .set_position(state.player.root(), Vec3::new(base.x, 0.3, base.z));
        state.boost.set(10.0);

        assert_eq!(collect_pickups(&mut state), 1);
        assert_eq!(state.boost.value(), 10.0 + state.tuning.pickup_boost);
        assert!(state.pickups.is_empty());
        assert!(!state.graph.contains(node));
        assert!(state.render_list.get(node).is_none());
        assert!(state.events.contains(&GameEvent::PickupCollected));
    }

    #[test]
    fn test_collect_clamps_boost() {
        let mut state = due_state();
        spawn_pickup(&mut state);
        let base = state.pickups.active()[0].base;
        state.graph.set_position(state.player.root(), base);
        state.boost.set(state.tuning.max_boost);
        collect_pickups(&mut state);
        assert_eq!(state.boost.value(), state.tuning.max_boost);
    }

    #[test]
    fn test_bob_stays_within_amplitude() {
        let mut state = due_state();
        spawn_pickup(&mut state);
        let pickup = state.pickups.active()[0].clone();
        for i in 0..50 {
            state.elapsed += 0.1 * i as f32;
            bob_pickups(&mut state);
            let y = state.graph.global_position(pickup.node).unwrap().y;
            assert!((y - pickup.base.y).abs() <= state.tuning.pickup_bob_amplitude + 1e-5);
        }
    }
}
