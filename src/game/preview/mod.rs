//! Shop button previews: key out a unit thumbnail's backdrop, persist the
//! result and wrap it as a sprite sized for a target rectangle.

mod error;
mod keying;
mod readiness;
mod sprite;
mod store;

use bevy::prelude::*;

use crate::game::config::{load_initial_config, InitialConfig};

pub use error::PreviewError;
pub use keying::{strip_background, thumbnail_pixels, KeyColor, TRANSPARENT};
pub use readiness::{evaluate_readiness, Readiness, ThumbnailState};
pub use sprite::{fit_scale, pixels_per_unit, PreviewSprite};
pub use store::{PreviewStore, PREVIEW_EXTENSION};

/// Result of turning one thumbnail into a persisted preview.
#[derive(Debug, Clone)]
pub struct GeneratedPreview {
    pub sprite: PreviewSprite,
    pub asset_path: String,
    pub cleared_pixels: usize,
}

/// Thumbnail in, fitted preview sprite out. The thumbnail must already be
/// loaded; see [`evaluate_readiness`].
pub fn generate_preview(
    thumbnail: &Image,
    index: usize,
    target: Vec2,
    key: KeyColor,
    store: &PreviewStore,
    asset_server: &AssetServer,
) -> Result<GeneratedPreview, PreviewError> {
    // Validate the target before touching the disk
    pixels_per_unit(UVec2::new(thumbnail.width(), thumbnail.height()), target)?;

    let pixels = thumbnail_pixels(thumbnail)?;
    let (keyed, cleared_pixels) = strip_background(&pixels, key);
    let asset_path = store.persist(index, &keyed)?;
    debug!("Preview {} -> {} ({} backdrop pixels cleared)", index, asset_path, cleared_pixels);

    let handle = load_persisted(asset_server, &asset_path);
    let sprite = PreviewSprite::new(handle, UVec2::from(keyed.dimensions()), target)?;

    Ok(GeneratedPreview { sprite, asset_path, cleared_pixels })
}

/// Load a preview from the asset store. A path that was loaded before is
/// reloaded so the handle picks up the file that was just written.
pub fn load_persisted(asset_server: &AssetServer, asset_path: &str) -> Handle<Image> {
    let already_loaded = asset_server.get_handle::<Image>(asset_path.to_string()).is_some();
    let handle = asset_server.load(asset_path.to_string());
    if already_loaded {
        asset_server.reload(asset_path.to_string());
    }
    handle
}

pub struct PreviewPlugin;

impl Plugin for PreviewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, init_preview_store.after(load_initial_config));
    }
}

fn init_preview_store(mut commands: Commands, config: Res<InitialConfig>) {
    let store = PreviewStore::from_config(&config);
    info!("Shop previews are stored under {}", store.folder_path().display());
    commands.insert_resource(store);
}
