use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::preview::PreviewStore;
use crate::game::roster::UnitStatus;

pub const MANIFEST_VERSION: u32 = 2;
pub const MANIFEST_FILE: &str = "manifest.bin";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("manifest encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("manifest version {found} is not supported")]
    Version { found: u32 },
}

/// Record of the previews written by the last successful button build.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ShopManifest {
    pub version: u32,
    pub entries: Vec<ManifestEntry>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ManifestEntry {
    pub unit_index: usize,
    pub unit_name: String,
    pub asset_path: String,
    pub pixel_size: [u32; 2],
    pub pixels_per_unit: f32,
}

impl ShopManifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { version: MANIFEST_VERSION, entries }
    }

    pub fn entry(&self, unit_index: usize) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.unit_index == unit_index)
    }

    /// Entries for `statuses` in order, or `None` when any unit is missing
    /// or was renamed since the manifest was written.
    pub fn entries_for(&self, statuses: &[UnitStatus]) -> Option<Vec<&ManifestEntry>> {
        if statuses.is_empty() {
            return None;
        }
        statuses
            .iter()
            .map(|status| {
                self.entry(status.index)
                    .filter(|entry| entry.unit_name == status.config.name)
            })
            .collect()
    }
}

pub fn manifest_path(store: &PreviewStore) -> PathBuf {
    store.folder_path().join(MANIFEST_FILE)
}

pub fn save_manifest(path: &Path, manifest: &ShopManifest) -> Result<(), ManifestError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let mut encoder = ZlibEncoder::new(writer, Compression::default());
    bincode::serialize_into(&mut encoder, manifest)?;
    encoder.finish()?.flush()?;
    Ok(())
}

/// Forget the last build. A manifest that is already gone is not an error.
pub fn remove_manifest(path: &Path) -> Result<(), ManifestError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

pub fn load_manifest(path: &Path) -> Result<ShopManifest, ManifestError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut decoder = ZlibDecoder::new(reader);
    let manifest: ShopManifest = bincode::deserialize_from(&mut decoder)?;
    if manifest.version != MANIFEST_VERSION {
        return Err(ManifestError::Version { found: manifest.version });
    }
    Ok(manifest)
}
