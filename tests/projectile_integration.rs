use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bastion::game::GameState;
use bastion::game::combat::{
    expire_projectiles, move_projectiles, resolve_projectile_hits, Alive, Collider, Health,
    Projectile,
};

fn combat_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>();
    app.add_systems(Update, (expire_projectiles, move_projectiles, resolve_projectile_hits).chain());
    app
}

fn step(app: &mut App, secs: f32) {
    app.world_mut().resource_mut::<Time>().advance_by(Duration::from_secs_f32(secs));
    app.update();
}

fn fire(app: &mut App, origin: Vec2, owner: Option<Entity>) -> Entity {
    app.world_mut()
        .spawn((
            Projectile {
                direction: Vec2::X,
                speed: 100.0,
                damage: 15.0,
                max_lifetime: 1.0,
                age: 0.0,
                owner,
            },
            Collider { radius: 2.0 },
            Transform::from_translation(origin.extend(0.0)),
        ))
        .id()
}

fn target(app: &mut App, position: Vec2, alive: bool) -> Entity {
    let mut entity = app.world_mut().spawn((
        Health::new(40.0),
        Collider { radius: 5.0 },
        Transform::from_translation(position.extend(0.0)),
    ));
    if alive {
        entity.insert(Alive);
    }
    entity.id()
}

fn health(app: &App, entity: Entity) -> f32 {
    app.world().get::<Health>(entity).unwrap().current
}

#[test]
fn test_projectile_damages_living_target_once() {
    let mut app = combat_app();
    let enemy = target(&mut app, Vec2::new(20.0, 0.0), true);
    let shot = fire(&mut app, Vec2::ZERO, None);

    // Not in contact yet
    step(&mut app, 0.05);
    assert_eq!(health(&app, enemy), 40.0);
    assert!(app.world().get_entity(shot).is_ok());

    step(&mut app, 0.1);
    assert_eq!(health(&app, enemy), 25.0);
    assert!(app.world().get_entity(shot).is_err(), "projectile should be gone after its hit");

    step(&mut app, 0.1);
    assert_eq!(health(&app, enemy), 25.0);
}

#[test]
fn test_non_living_target_stops_projectile_without_damage() {
    let mut app = combat_app();
    let wall = target(&mut app, Vec2::new(5.0, 0.0), false);
    let enemy = target(&mut app, Vec2::new(30.0, 0.0), true);
    let shot = fire(&mut app, Vec2::ZERO, None);

    step(&mut app, 0.01);
    assert!(app.world().get_entity(shot).is_err());
    assert_eq!(health(&app, wall), 40.0);

    step(&mut app, 0.5);
    assert_eq!(health(&app, enemy), 40.0);
}

#[test]
fn test_projectile_ignores_its_owner() {
    let mut app = combat_app();
    let tower = target(&mut app, Vec2::ZERO, true);
    let shot = fire(&mut app, Vec2::ZERO, Some(tower));

    step(&mut app, 0.01);
    assert!(app.world().get_entity(shot).is_ok());
    assert_eq!(health(&app, tower), 40.0);
}

#[test]
fn test_projectile_expires_after_lifetime() {
    let mut app = combat_app();
    let far = target(&mut app, Vec2::new(500.0, 0.0), true);
    let shot = fire(&mut app, Vec2::ZERO, None);

    step(&mut app, 0.6);
    assert!(app.world().get_entity(shot).is_ok());

    step(&mut app, 0.6);
    assert!(app.world().get_entity(shot).is_err());
    assert_eq!(health(&app, far), 40.0);
}

#[test]
fn test_nearest_overlapping_target_takes_the_hit() {
    let mut app = combat_app();
    let near = target(&mut app, Vec2::new(3.0, 0.0), true);
    let behind = target(&mut app, Vec2::new(8.0, 0.0), true);
    fire(&mut app, Vec2::ZERO, None);

    step(&mut app, 0.01);
    assert_eq!(health(&app, near), 25.0);
    assert_eq!(health(&app, behind), 40.0);
}

#[test]
fn test_lifetime_does_not_run_while_paused_in_shop_editor() {
    let mut app = App::new();
    app.add_plugins(StatesPlugin);
    app.init_state::<GameState>();
    app.init_resource::<Time>();
    app.add_systems(
        Update,
        (expire_projectiles, move_projectiles, resolve_projectile_hits)
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
    let shot = fire(&mut app, Vec2::ZERO, None);

    step(&mut app, 0.3);

    app.world_mut().resource_mut::<NextState<GameState>>().set(GameState::ShopEditor);
    for _ in 0..4 {
        step(&mut app, 0.5);
    }
    assert!(app.world().get_entity(shot).is_ok());
    assert!((app.world().get::<Projectile>(shot).unwrap().age - 0.3).abs() < 1e-5);

    app.world_mut().resource_mut::<NextState<GameState>>().set(GameState::InGame);
    step(&mut app, 0.3);
    assert!(app.world().get_entity(shot).is_ok(), "only 0.6s of a 1s lifetime has been flown");

    step(&mut app, 0.5);
    assert!(app.world().get_entity(shot).is_err());
}
