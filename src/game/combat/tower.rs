use bevy::prelude::*;

use crate::game::roster::UnitConfig;
use crate::game::selection::{Selectable, SelectionGained, SelectionLost};
use super::components::*;
use super::projectile::spawn_projectile;

pub const TOWER_ORDER: f32 = 1.0;
const TOWER_PROJECTILE_RADIUS: f32 = 3.0;
const RANGE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.6);

/// Place a bought unit on the field.
pub fn spawn_tower(commands: &mut Commands, unit: &UnitConfig, unit_index: usize, position: Vec2) -> Entity {
    info!("Placing {} at ({:.0}, {:.0})", unit.name, position.x, position.y);
    commands
        .spawn((
            Name::new(unit.name.clone()),
            Tower {
                unit_index,
                range: unit.range,
                fire_interval: unit.fire_interval_secs,
                cooldown: 0.0,
                projectile: ProjectileSpec {
                    damage: unit.projectile_damage,
                    speed: unit.projectile_speed,
                    lifetime: unit.projectile_lifetime_secs,
                    radius: TOWER_PROJECTILE_RADIUS,
                },
            },
            Collider { radius: unit.size * 0.5 },
            Selectable,
            Sprite::from_color(unit.color(), Vec2::splat(unit.size)),
            Transform::from_translation(position.extend(TOWER_ORDER)),
        ))
        .observe(show_range_on_select)
        .observe(hide_range_on_unselect)
        .id()
}

fn show_range_on_select(event: On<SelectionGained>, mut commands: Commands) {
    commands.entity(event.entity).insert(ShowRange);
}

fn hide_range_on_unselect(event: On<SelectionLost>, mut commands: Commands) {
    if let Ok(mut entity) = commands.get_entity(event.entity) {
        entity.remove::<ShowRange>();
    }
}

/// Closest candidate within `range` of `origin`.
pub fn nearest_in_range(origin: Vec2, range: f32, candidates: impl IntoIterator<Item = Vec2>) -> Option<Vec2> {
    let range_sq = range * range;
    candidates
        .into_iter()
        .map(|p| (p, origin.distance_squared(p)))
        .filter(|(_, d)| *d <= range_sq)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, _)| p)
}

pub fn tower_fire(
    mut commands: Commands,
    time: Res<Time>,
    mut towers: Query<(Entity, &mut Tower, &Transform)>,
    enemies: Query<&Transform, (With<Enemy>, With<Alive>, Without<Tower>)>,
) {
    let dt = time.delta_secs();

    for (entity, mut tower, transform) in towers.iter_mut() {
        tower.cooldown = (tower.cooldown - dt).max(0.0);
        if tower.cooldown > 0.0 {
            continue;
        }

        let origin = transform.translation.truncate();
        let Some(target) = nearest_in_range(origin, tower.range, enemies.iter().map(|t| t.translation.truncate())) else {
            continue;
        };

        spawn_projectile(&mut commands, &tower.projectile, origin, target - origin, Some(entity));
        tower.cooldown = tower.fire_interval;
    }
}

pub fn draw_tower_ranges(mut gizmos: Gizmos, towers: Query<(&Tower, &GlobalTransform), With<ShowRange>>) {
    for (tower, transform) in towers.iter() {
        gizmos.circle_2d(transform.translation().truncate(), tower.range, RANGE_COLOR);
    }
}
