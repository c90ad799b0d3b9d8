use bevy::prelude::*;

use super::components::*;

pub const PROJECTILE_ORDER: f32 = 5.0;
const PROJECTILE_COLOR: Color = Color::srgb(1.0, 0.9, 0.35);

pub fn spawn_projectile(
    commands: &mut Commands,
    spec: &ProjectileSpec,
    origin: Vec2,
    direction: Vec2,
    owner: Option<Entity>,
) -> Entity {
    commands
        .spawn((
            Projectile {
                direction: direction.normalize_or_zero(),
                speed: spec.speed,
                damage: spec.damage,
                max_lifetime: spec.lifetime,
                age: 0.0,
                owner,
            },
            Collider { radius: spec.radius },
            Sprite::from_color(PROJECTILE_COLOR, Vec2::splat(spec.radius * 2.0)),
            Transform::from_translation(origin.extend(PROJECTILE_ORDER)),
        ))
        .id()
}

/// Missed everything for too long. Age only grows on ticks that run, so time
/// spent paused does not count.
pub fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut projectiles: Query<(Entity, &mut Projectile, &mut ProjectilePhase)>,
) {
    let dt = time.delta_secs();
    for (entity, mut projectile, mut phase) in projectiles.iter_mut() {
        if !phase.is_flying() {
            continue;
        }
        projectile.age += dt;
        if phase.expire_if_due(&projectile) {
            debug!("Projectile {:?} expired", entity);
            commands.entity(entity).despawn();
        }
    }
}

pub fn move_projectiles(
    time: Res<Time>,
    mut projectiles: Query<(&Projectile, &ProjectilePhase, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (projectile, phase, mut transform) in projectiles.iter_mut() {
        if phase.is_flying() {
            transform.translation += projectile.displacement(dt).extend(0.0);
        }
    }
}

/// First collision ends the projectile. Damage is only applied to targets
/// tagged `Alive` that carry `Health`.
pub fn resolve_projectile_hits(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &Projectile, &mut ProjectilePhase, &Transform, &Collider)>,
    mut targets: Query<(Entity, &Transform, &Collider, Has<Alive>, Option<&mut Health>), Without<Projectile>>,
) {
    for (entity, projectile, mut phase, transform, collider) in projectiles.iter_mut() {
        if !phase.is_flying() {
            continue;
        }
        let position = transform.translation.truncate();

        // Nearest overlapping target wins
        let mut first_hit: Option<(Entity, f32)> = None;
        for (target, target_transform, target_collider, _, _) in targets.iter() {
            if Some(target) == projectile.owner {
                continue;
            }
            let target_position = target_transform.translation.truncate();
            if collider.overlaps(position, target_collider, target_position) {
                let distance_sq = position.distance_squared(target_position);
                if first_hit.is_none_or(|(_, best)| distance_sq < best) {
                    first_hit = Some((target, distance_sq));
                }
            }
        }

        let Some((target, _)) = first_hit else { continue };

        if let Ok((_, _, _, alive, health)) = targets.get_mut(target) {
            if let (true, Some(mut health)) = (alive, health) {
                health.damage(projectile.damage);
                debug!("Projectile {:?} hit {:?} for {} ({} left)", entity, target, projectile.damage, health.current);
            }
        }

        if phase.hit() {
            commands.entity(entity).despawn();
        }
    }
}
