use bevy::prelude::*;
use bastion::game::selection::{
    apply_selection_requests, forget_despawned_selection, Dimmer, Selectable, SelectionGained,
    SelectionLost, SelectionManager, SelectionRequest,
};

const HIGHLIGHT: f32 = 60.0;

#[derive(Resource, Default)]
struct Notifications {
    gained: Vec<Entity>,
    lost: Vec<Entity>,
}

fn selection_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_message::<SelectionRequest>();
    app.init_resource::<Notifications>();
    app.insert_resource(SelectionManager::new(HIGHLIGHT));
    app.add_systems(Update, (forget_despawned_selection, apply_selection_requests).chain());
    app.add_observer(|event: On<SelectionGained>, mut notes: ResMut<Notifications>| {
        notes.gained.push(event.entity);
    });
    app.add_observer(|event: On<SelectionLost>, mut notes: ResMut<Notifications>| {
        notes.lost.push(event.entity);
    });
    app.world_mut().spawn((Dimmer, Visibility::Hidden));
    app
}

fn request(app: &mut App, request: SelectionRequest) {
    app.world_mut().write_message(request);
    app.update();
}

fn dimmer_visible(app: &mut App) -> bool {
    let visibility = *app
        .world_mut()
        .query_filtered::<&Visibility, With<Dimmer>>()
        .single(app.world())
        .unwrap();
    visibility == Visibility::Visible
}

fn z(app: &App, entity: Entity) -> f32 {
    app.world().get::<Transform>(entity).unwrap().translation.z
}

#[test]
fn test_toggle_raises_and_restores_order() {
    let mut app = selection_app();
    let button = app.world_mut().spawn((Selectable, Transform::from_xyz(0.0, 0.0, 3.0))).id();
    app.update();

    request(&mut app, SelectionRequest::Toggle(button));
    assert_eq!(app.world().resource::<SelectionManager>().current(), Some(button));
    assert_eq!(z(&app, button), HIGHLIGHT);
    assert!(dimmer_visible(&mut app));

    request(&mut app, SelectionRequest::Toggle(button));
    assert_eq!(app.world().resource::<SelectionManager>().current(), None);
    assert_eq!(z(&app, button), 3.0);
    assert!(!dimmer_visible(&mut app));

    let notes = app.world().resource::<Notifications>();
    assert_eq!(notes.gained, vec![button]);
    assert_eq!(notes.lost, vec![button]);
}

#[test]
fn test_selecting_another_entity_restores_the_first() {
    let mut app = selection_app();
    let first = app.world_mut().spawn((Selectable, Transform::from_xyz(0.0, 0.0, 1.0))).id();
    let second = app.world_mut().spawn((Selectable, Transform::from_xyz(0.0, 0.0, 2.0))).id();
    app.update();

    request(&mut app, SelectionRequest::Select(first));
    request(&mut app, SelectionRequest::Toggle(second));

    assert_eq!(app.world().resource::<SelectionManager>().current(), Some(second));
    assert_eq!(z(&app, first), 1.0);
    assert_eq!(z(&app, second), HIGHLIGHT);
    assert!(dimmer_visible(&mut app));

    let notes = app.world().resource::<Notifications>();
    assert_eq!(notes.gained, vec![first, second]);
    assert_eq!(notes.lost, vec![first]);
}

#[test]
fn test_clear_without_selection_does_nothing() {
    let mut app = selection_app();
    app.update();

    request(&mut app, SelectionRequest::Clear);

    assert_eq!(app.world().resource::<SelectionManager>().current(), None);
    assert!(!dimmer_visible(&mut app));
    let notes = app.world().resource::<Notifications>();
    assert!(notes.gained.is_empty());
    assert!(notes.lost.is_empty());
}

#[test]
fn test_despawned_selection_is_forgotten() {
    let mut app = selection_app();
    let tower = app.world_mut().spawn((Selectable, Transform::default())).id();
    app.update();

    request(&mut app, SelectionRequest::Select(tower));
    assert!(dimmer_visible(&mut app));

    app.world_mut().despawn(tower);
    app.update();

    assert_eq!(app.world().resource::<SelectionManager>().current(), None);
    assert!(!dimmer_visible(&mut app));
    assert!(app.world().resource::<Notifications>().lost.is_empty());
}
