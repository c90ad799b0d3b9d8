mod components;
mod projectile;
mod tower;
mod waves;

use bevy::prelude::*;
use crate::game::GameState;

pub use components::*;
pub use projectile::{expire_projectiles, move_projectiles, resolve_projectile_hits, spawn_projectile, PROJECTILE_ORDER};
pub use tower::{draw_tower_ranges, nearest_in_range, spawn_tower, tower_fire, TOWER_ORDER};
pub use waves::{despawn_dead_enemies, enemies_reach_base, lane_band, move_enemies, spawn_enemies, WaveSpawner};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Projectiles,
    Towers,
    Enemies,
}

/// Plugin for towers, projectiles and enemy waves
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(FixedUpdate, (
               CombatSet::Projectiles,
               CombatSet::Towers,
               CombatSet::Enemies,
           ).chain().run_if(in_state(GameState::InGame)))
           .add_systems(Startup, waves::setup_waves)
           .add_systems(FixedUpdate, (
               (expire_projectiles, move_projectiles, resolve_projectile_hits).chain().in_set(CombatSet::Projectiles),
               tower_fire.in_set(CombatSet::Towers),
               (spawn_enemies, move_enemies, despawn_dead_enemies, enemies_reach_base).chain().in_set(CombatSet::Enemies),
           ))
           .add_systems(Update, draw_tower_ranges);
    }
}
