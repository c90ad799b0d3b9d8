mod build;
mod components;
mod layout;
mod manifest;
mod ui;

use bevy::prelude::*;
use crate::game::GameState;

pub use build::{build_button_row, delete_all_buttons, handle_shop_commands, poll_shop_build,
                restore_shop_from_manifest, spawn_shop_menu, BUTTON_ORDER, MENU_ORDER};
pub use components::*;
pub use layout::{horizontal_offset, ButtonPlacement, LayoutError, RowLayout};
pub use manifest::{load_manifest, manifest_path, remove_manifest, save_manifest, ManifestEntry, ManifestError, ShopManifest};

use ui::*;

/// Plugin for the buy-unit menu and its editor-side generator
pub struct ShopPlugin;

impl Plugin for ShopPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ShopCommand>()
           .add_systems(Startup, (spawn_shop_menu, restore_shop_from_manifest).chain())
           .add_systems(OnEnter(GameState::ShopEditor), setup_shop_editor_ui)
           .add_systems(OnExit(GameState::ShopEditor), cleanup_shop_editor_ui)
           .add_systems(Update, (handle_shop_commands, poll_shop_build).chain())
           .add_systems(Update, shop_editor_button_system.run_if(in_state(GameState::ShopEditor)));
    }
}
