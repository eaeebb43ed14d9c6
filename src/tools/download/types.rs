use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One row of `manifest.json`, keyed by cached file name.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    pub source_url: String,
    pub alt: Option<String>,
    pub is_floorplan: bool,
}

pub type Manifest = BTreeMap<String, ManifestEntry>;

/// An image on disk, with the candidate metadata it came from.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DownloadedImage {
    pub source_url: String,
    pub local_path: PathBuf,
    pub alt: Option<String>,
    pub is_floorplan: bool,
}

impl DownloadedImage {
    pub(super) fn manifest_entry(&self) -> ManifestEntry {
        ManifestEntry {
            source_url: self.source_url.clone(),
            alt: self.alt.clone(),
            is_floorplan: self.is_floorplan,
        }
    }
}
