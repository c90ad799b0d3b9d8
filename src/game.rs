use bevy::prelude::*;

pub mod camera;
pub mod combat;
pub mod config;
pub mod control;
pub mod hud;
pub mod player;
pub mod preview;
pub mod profiling;
pub mod roster;
pub mod selection;
pub mod shop;

use camera::FieldCameraPlugin;
use combat::CombatPlugin;
use config::GameConfigPlugin;
use control::ControlPlugin;
use hud::HudPlugin;
use player::PlayerPlugin;
use preview::PreviewPlugin;
use roster::RosterPlugin;
use selection::SelectionPlugin;
use shop::ShopPlugin;

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    #[default]
    InGame,
    /// Simulation paused while the shop row is regenerated
    ShopEditor,
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
           .add_plugins((
               GameConfigPlugin,
               RosterPlugin,
               PreviewPlugin,
               FieldCameraPlugin,
               SelectionPlugin,
               ShopPlugin,
               CombatPlugin,
               PlayerPlugin,
               ControlPlugin,
               HudPlugin,
           ));
    }
}
