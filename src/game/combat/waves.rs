use bevy::prelude::*;
use rand::Rng;

use crate::game::config::InitialConfig;
use crate::game::player::PlayerStatus;
use super::components::*;

pub const ENEMY_ORDER: f32 = 2.0;
const ENEMY_COLOR: Color = Color::srgb(0.85, 0.2, 0.25);
/// Keeps spawn lanes clear of the shop row and the top edge
const LANE_MARGIN: f32 = 40.0;

#[derive(Resource)]
pub struct WaveSpawner {
    pub timer: Timer,
}

impl WaveSpawner {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval_secs.max(0.05), TimerMode::Repeating),
        }
    }
}

pub fn setup_waves(mut commands: Commands, config: Res<InitialConfig>) {
    commands.insert_resource(WaveSpawner::new(config.wave_interval_secs));
}

/// Vertical band enemies walk in: above the shop row, below the top edge.
pub fn lane_band(config: &InitialConfig) -> (f32, f32) {
    let bottom = config.menu_anchor.y + config.menu_rect_size.y * 0.5 + LANE_MARGIN;
    let top = config.playfield_size.y * 0.5 - LANE_MARGIN;
    if bottom < top { (bottom, top) } else { (top, bottom) }
}

pub fn spawn_enemies(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<InitialConfig>,
    mut spawner: ResMut<WaveSpawner>,
) {
    spawner.timer.tick(time.delta());
    let (low, high) = lane_band(&config);
    let mut rng = rand::rng();

    for _ in 0..spawner.timer.times_finished_this_tick() {
        let y = if high > low { rng.random_range(low..high) } else { low };
        let x = config.playfield_size.x * 0.5 + config.enemy_radius;
        commands.spawn((
            Name::new("Enemy"),
            Enemy { speed: config.enemy_speed, bounty: config.enemy_bounty },
            Alive,
            Health::new(config.enemy_health),
            Collider { radius: config.enemy_radius },
            Sprite::from_color(ENEMY_COLOR, Vec2::splat(config.enemy_radius * 2.0)),
            Transform::from_xyz(x, y, ENEMY_ORDER),
        ));
    }
}

pub fn move_enemies(time: Res<Time>, mut enemies: Query<(&Enemy, &mut Transform)>) {
    let dt = time.delta_secs();
    for (enemy, mut transform) in enemies.iter_mut() {
        transform.translation.x -= enemy.speed * dt;
    }
}

/// Enemies that walked off the left edge cost a life.
pub fn enemies_reach_base(
    mut commands: Commands,
    config: Res<InitialConfig>,
    mut player: ResMut<PlayerStatus>,
    enemies: Query<(Entity, &Transform, &Collider, &Health), With<Enemy>>,
) {
    let edge = -config.playfield_size.x * 0.5;
    for (entity, transform, collider, health) in enemies.iter() {
        // Already claimed by despawn_dead_enemies
        if health.is_dead() {
            continue;
        }
        if transform.translation.x + collider.radius < edge {
            commands.entity(entity).despawn();
            let remaining = player.lose_life();
            if remaining == 0 {
                warn!("The base has fallen");
            } else {
                info!("An enemy got through; {} lives left", remaining);
            }
        }
    }
}

pub fn despawn_dead_enemies(
    mut commands: Commands,
    mut player: ResMut<PlayerStatus>,
    enemies: Query<(Entity, &Enemy, &Health)>,
) {
    for (entity, enemy, health) in enemies.iter() {
        if health.is_dead() {
            commands.entity(entity).despawn();
            player.earn(enemy.bounty);
            debug!("Enemy {:?} defeated, +{} credits", entity, enemy.bounty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_band_sits_above_menu() {
        let config = InitialConfig::default();
        let (low, high) = lane_band(&config);
        let menu_top = config.menu_anchor.y + config.menu_rect_size.y * 0.5;
        assert!(low > menu_top);
        assert!(high < config.playfield_size.y * 0.5);
        assert!(low < high);
    }
}
