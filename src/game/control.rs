use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::game::camera::{cursor_world_position, FieldCamera};
use crate::game::combat::{spawn_tower, Collider, Tower};
use crate::game::config::{GameConfig, GameConfigHandle, InitialConfig};
use crate::game::player::PlayerStatus;
use crate::game::roster::UnitRoster;
use crate::game::selection::{SelectionManager, SelectionRequest};
use crate::game::shop::{BuyUnitButton, ShopCommand};
use crate::game::GameState;

pub struct ControlPlugin;

impl Plugin for ControlPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_hotkeys)
           .add_systems(Update, handle_field_clicks.run_if(in_state(GameState::InGame)));
    }
}

/// What a left click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickHit {
    ShopButton(Entity),
    Tower(Entity),
    Field,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    Toggle(Entity),
    Buy { unit_index: usize },
    Clear,
}

/// `selected_unit` is the unit index of the shop button currently selected,
/// if the selection is a shop button.
pub fn decide_click(hit: ClickHit, selected_unit: Option<usize>) -> ClickAction {
    match (hit, selected_unit) {
        (ClickHit::ShopButton(entity), _) | (ClickHit::Tower(entity), _) => ClickAction::Toggle(entity),
        (ClickHit::Field, Some(unit_index)) => ClickAction::Buy { unit_index },
        _ => ClickAction::Clear,
    }
}

fn handle_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    config_handle: Res<GameConfigHandle>,
    game_configs: Res<Assets<GameConfig>>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut shop_commands: MessageWriter<ShopCommand>,
    mut selection: MessageWriter<SelectionRequest>,
) {
    let Some(config) = game_configs.get(&config_handle.0) else { return };

    if keys.just_pressed(config.key_toggle_editor) {
        let next = match state.get() {
            GameState::InGame => GameState::ShopEditor,
            GameState::ShopEditor => GameState::InGame,
        };
        info!("Switching to {:?}", next);
        selection.write(SelectionRequest::Clear);
        next_state.set(next);
    }

    if *state.get() == GameState::ShopEditor {
        if keys.just_pressed(config.key_create_buttons) {
            shop_commands.write(ShopCommand::CreateButtons);
        }
        if keys.just_pressed(config.key_delete_buttons) {
            shop_commands.write(ShopCommand::DeleteButtons);
        }
    }

    if keys.just_pressed(config.key_clear_selection) {
        selection.write(SelectionRequest::Clear);
    }
}

fn handle_field_clicks(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<FieldCamera>>,
    buttons: Query<(Entity, &BuyUnitButton, &Sprite, &GlobalTransform)>,
    towers: Query<(Entity, &Collider, &GlobalTransform), With<Tower>>,
    manager: Res<SelectionManager>,
    roster: Res<UnitRoster>,
    config: Res<InitialConfig>,
    mut player: ResMut<PlayerStatus>,
    mut selection: MessageWriter<SelectionRequest>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else { return };
    let Ok((camera, camera_transform)) = cameras.single() else { return };
    let Some(cursor) = cursor_world_position(window, camera, camera_transform) else { return };

    let hit = if let Some(entity) = buttons.iter().find_map(|(entity, _, sprite, transform)| {
        sprite_contains(sprite, transform, cursor).then_some(entity)
    }) {
        ClickHit::ShopButton(entity)
    } else if let Some(entity) = towers.iter().find_map(|(entity, collider, transform)| {
        (transform.translation().truncate().distance(cursor) <= collider.radius).then_some(entity)
    }) {
        ClickHit::Tower(entity)
    } else if in_field(&config, cursor) {
        ClickHit::Field
    } else {
        ClickHit::Outside
    };

    let selected_unit = manager
        .current()
        .and_then(|entity| buttons.get(entity).ok())
        .map(|(_, button, _, _)| button.unit_status_index);

    match decide_click(hit, selected_unit) {
        ClickAction::Toggle(entity) => {
            selection.write(SelectionRequest::Toggle(entity));
        }
        ClickAction::Buy { unit_index } => {
            let Some(unit) = roster.unit(unit_index) else {
                error!("Shop button refers to unknown unit {}", unit_index);
                selection.write(SelectionRequest::Clear);
                return;
            };
            if player.try_spend(unit.cost) {
                spawn_tower(&mut commands, unit, unit_index, cursor);
                selection.write(SelectionRequest::Clear);
            } else {
                warn!("Not enough credits for {} ({} < {})", unit.name, player.credits, unit.cost);
            }
        }
        ClickAction::Clear => {
            selection.write(SelectionRequest::Clear);
        }
    }
}

fn sprite_contains(sprite: &Sprite, transform: &GlobalTransform, point: Vec2) -> bool {
    let Some(size) = sprite.custom_size else { return false };
    let world = transform.compute_transform();
    let half = size * world.scale.truncate().abs() * 0.5;
    Rect::from_center_half_size(world.translation.truncate(), half).contains(point)
}

/// Above the shop row and inside the playfield
fn in_field(config: &InitialConfig, point: Vec2) -> bool {
    let half = config.playfield_size * 0.5;
    let menu_top = config.menu_anchor.y + config.menu_rect_size.y * 0.5;
    point.x.abs() <= half.x && point.y <= half.y && point.y > menu_top
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clicks_on_selectables_toggle() {
        let mut world = World::new();
        let button = world.spawn_empty().id();
        let tower = world.spawn_empty().id();

        assert_eq!(decide_click(ClickHit::ShopButton(button), None), ClickAction::Toggle(button));
        assert_eq!(decide_click(ClickHit::ShopButton(button), Some(0)), ClickAction::Toggle(button));
        assert_eq!(decide_click(ClickHit::Tower(tower), Some(1)), ClickAction::Toggle(tower));
    }

    #[test]
    fn test_field_click_buys_selected_unit() {
        assert_eq!(decide_click(ClickHit::Field, Some(2)), ClickAction::Buy { unit_index: 2 });
        assert_eq!(decide_click(ClickHit::Field, None), ClickAction::Clear);
        assert_eq!(decide_click(ClickHit::Outside, Some(2)), ClickAction::Clear);
    }

    #[test]
    fn test_field_excludes_shop_row() {
        let config = InitialConfig::default();
        assert!(in_field(&config, Vec2::new(0.0, 0.0)));
        assert!(!in_field(&config, Vec2::new(0.0, -300.0)));
        assert!(!in_field(&config, Vec2::new(1000.0, 0.0)));
    }
}
