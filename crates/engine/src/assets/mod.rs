mod loader;
mod manifest;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::asset_names::AssetNameError;

pub use loader::{LoadProgress, ResourceLoader};
pub use manifest::{AssetKind, AssetManifest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Encoded audio bytes; decoding happens at playback time.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub name: String,
    pub bytes: Arc<Vec<u8>>,
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid asset name {name:?}: {source}")]
    InvalidName {
        name: String,
        #[source]
        source: AssetNameError,
    },
    #[error("failed to read asset at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image at {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
