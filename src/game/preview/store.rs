use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use bevy::prelude::*;
use image::{ImageFormat, RgbaImage};

use crate::game::config::InitialConfig;
use super::PreviewError;

pub const PREVIEW_EXTENSION: &str = "png";

/// Where generated previews live, both as files on disk and as asset paths
/// the `AssetServer` understands.
#[derive(Resource, Debug, Clone)]
pub struct PreviewStore {
    asset_root: PathBuf,
    folder: String,
    prefix: String,
}

impl PreviewStore {
    pub fn new(asset_root: impl Into<PathBuf>, folder: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            asset_root: asset_root.into(),
            folder: folder.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &InitialConfig) -> Self {
        Self::new(&config.asset_root, &config.preview_folder, &config.preview_file_prefix)
    }

    pub fn asset_path(&self, index: usize) -> String {
        format!("{}/{}{}.{}", self.folder, self.prefix, index, PREVIEW_EXTENSION)
    }

    pub fn file_path(&self, index: usize) -> PathBuf {
        self.asset_root.join(self.asset_path(index))
    }

    /// On-disk location of an asset path handed out by [`Self::persist`].
    pub fn file_for_asset(&self, asset_path: &str) -> PathBuf {
        self.asset_root.join(asset_path)
    }

    pub fn folder_path(&self) -> PathBuf {
        self.asset_root.join(&self.folder)
    }

    /// Write `preview` to its slot, replacing whatever was there. Returns the
    /// asset path to load it back with.
    pub fn persist(&self, index: usize, preview: &RgbaImage) -> Result<String, PreviewError> {
        let folder = self.folder_path();
        fs::create_dir_all(&folder).map_err(|source| PreviewError::Io {
            path: folder.display().to_string(),
            source,
        })?;

        let path = self.file_path(index);
        let shown = path.display().to_string();
        match fs::remove_file(&path) {
            Ok(()) => debug!("Removed previous preview {}", shown),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(PreviewError::Io { path: shown, source }),
        }

        preview
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| PreviewError::Encode { path: shown, source })?;

        Ok(self.asset_path(index))
    }
}
