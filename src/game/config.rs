use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use serde::{Deserialize, Serialize};

pub const INITIAL_CONFIG_PATH: &str = "assets/initial_config.ron";

/// Static configuration read once at startup. Layout geometry, asset paths and
/// balance values live here because the shop row and the persisted previews
/// are built from them; changing them mid-session would leave stale assets.
#[derive(Resource, Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct InitialConfig {
    // Preview generation
    pub asset_root: String,
    pub preview_folder: String,
    pub preview_file_prefix: String,
    pub preview_key_color: [u8; 4],
    pub thumbnail_timeout_secs: f32,

    // Shop menu
    pub menu_anchor: Vec2,
    pub menu_rect_size: Vec2,
    pub button_template_size: Option<Vec2>,
    pub button_color: [f32; 4],
    pub preview_slot_offset: Vec2,
    pub preview_slot_size: Option<Vec2>,

    // Selection
    pub dimmer_color: [f32; 4],
    pub dimmer_order: f32,
    pub highlight_order: f32,

    // Economy
    pub starting_credits: u32,
    pub starting_lives: u32,

    // Enemies
    pub enemy_health: f32,
    pub enemy_speed: f32,
    pub enemy_radius: f32,
    pub enemy_bounty: u32,
    pub wave_interval_secs: f32,

    pub playfield_size: Vec2,
}

impl InitialConfig {
    pub fn button_color(&self) -> Color {
        let [r, g, b, a] = self.button_color;
        Color::srgba(r, g, b, a)
    }

    pub fn dimmer_color(&self) -> Color {
        let [r, g, b, a] = self.dimmer_color;
        Color::srgba(r, g, b, a)
    }
}

/// Runtime configuration, hot-reloaded from `assets/game_config.ron`.
/// Nothing in here affects persisted assets.
#[derive(Deserialize, Serialize, Asset, TypePath, Clone, Debug)]
pub struct GameConfig {
    pub key_toggle_editor: KeyCode,
    pub key_create_buttons: KeyCode,
    pub key_delete_buttons: KeyCode,
    pub key_clear_selection: KeyCode,

    pub tick_rate: f64,
}

#[derive(Resource)]
pub struct GameConfigHandle(pub Handle<GameConfig>);

pub struct GameConfigPlugin;

impl Plugin for GameConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<GameConfig>::new(&["game_config.ron"]))
           .add_systems(PreStartup, (load_initial_config, setup_runtime_config))
           .add_systems(Update, apply_tick_rate);
    }
}

/// Read the static config synchronously; everything spawned at `Startup`
/// depends on it.
pub fn load_initial_config(mut commands: Commands) {
    commands.insert_resource(read_initial_config(INITIAL_CONFIG_PATH));
}

pub fn read_initial_config(path: &str) -> InitialConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => match ron::from_str::<InitialConfig>(&contents) {
            Ok(config) => {
                info!("Loaded initial config from {}", path);
                config
            }
            Err(e) => {
                error!("Failed to parse initial config: {}", e);
                error!("Using default InitialConfig");
                InitialConfig::default()
            }
        },
        Err(e) => {
            error!("Failed to read {}: {}", path, e);
            error!("Using default InitialConfig");
            InitialConfig::default()
        }
    }
}

fn setup_runtime_config(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load("game_config.ron");
    commands.insert_resource(GameConfigHandle(handle));
}

fn apply_tick_rate(
    mut fixed_time: ResMut<Time<Fixed>>,
    config_handle: Res<GameConfigHandle>,
    game_configs: Res<Assets<GameConfig>>,
    mut events: MessageReader<AssetEvent<GameConfig>>,
) {
    for event in events.read() {
        if event.is_modified(config_handle.0.id()) || event.is_loaded_with_dependencies(config_handle.0.id()) {
            if let Some(config) = game_configs.get(&config_handle.0) {
                fixed_time.set_timestep_hz(config.tick_rate);
                info!("Updated tick rate to {}", config.tick_rate);
            }
        }
    }
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            asset_root: "assets".to_string(),
            preview_folder: "auto_generated/buy_unit_menu".to_string(),
            preview_file_prefix: "menu_button_preview".to_string(),
            preview_key_color: [82, 82, 82, 255],
            thumbnail_timeout_secs: 10.0,
            menu_anchor: Vec2::new(-600.0, -300.0),
            menu_rect_size: Vec2::new(1200.0, 100.0),
            button_template_size: Some(Vec2::new(64.0, 80.0)),
            button_color: [0.22, 0.24, 0.3, 1.0],
            preview_slot_offset: Vec2::new(0.0, 6.0),
            preview_slot_size: Some(Vec2::new(52.0, 52.0)),
            dimmer_color: [0.0, 0.0, 0.0, 0.55],
            dimmer_order: 50.0,
            highlight_order: 60.0,
            starting_credits: 150,
            starting_lives: 10,
            enemy_health: 40.0,
            enemy_speed: 45.0,
            enemy_radius: 14.0,
            enemy_bounty: 15,
            wave_interval_secs: 2.5,
            playfield_size: Vec2::new(1280.0, 720.0),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            key_toggle_editor: KeyCode::F1,
            key_create_buttons: KeyCode::F5,
            key_delete_buttons: KeyCode::F6,
            key_clear_selection: KeyCode::Escape,
            tick_rate: 30.0,
        }
    }
}
