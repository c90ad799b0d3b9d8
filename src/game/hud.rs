use bevy::prelude::*;

use crate::game::player::PlayerStatus;
use crate::game::GameState;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
           .add_systems(Update, update_hud);
    }
}

#[derive(Component)]
struct HudText;

fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

fn update_hud(
    player: Res<PlayerStatus>,
    state: Res<State<GameState>>,
    mut text_query: Query<&mut Text, With<HudText>>,
) {
    if !player.is_changed() && !state.is_changed() {
        return;
    }
    let mode = match state.get() {
        GameState::InGame => "Defend",
        GameState::ShopEditor => "Shop editor (paused)",
    };
    let status = if player.is_defeated() { " - base fallen" } else { "" };
    for mut text in text_query.iter_mut() {
        text.0 = format!("Credits: {}   Lives: {}{}   [{}]", player.credits, player.lives, status, mode);
    }
}
