use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::debug;
use url::Url;

use super::types::Manifest;
use crate::error::Result;

const MANIFEST_FILE: &str = "manifest.json";
const DEFAULT_EXTENSION: &str = ".jpg";
const MAX_EXTENSION_LEN: usize = 5;

/// Resolve a candidate URL against the page it was found on.
///
/// Absolute URLs pass through; protocol-relative and relative ones are
/// joined onto the page URL. Only http(s) results are kept.
pub fn resolve_url(page_url: &str, candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    let resolved = match Url::parse(candidate) {
        Ok(url) => url,
        Err(_) => Url::parse(page_url).ok()?.join(candidate).ok()?,
    };
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

/// File extension (with dot) taken from the URL path, `.jpg` when missing or implausible.
pub(super) fn safe_extension(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            Path::new(u.path())
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{e}"))
        })
        .filter(|ext| ext.len() <= MAX_EXTENSION_LEN)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Cache file name: 16 hex chars of the URL's SHA-256 plus its extension.
pub fn cache_name(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let hash = hex::encode(digest);
    format!("{}{}", &hash[..16], safe_extension(url))
}

/// Load the manifest; a missing or unreadable one starts empty.
pub(super) async fn load_manifest(dir: &Path) -> Manifest {
    let path = dir.join(MANIFEST_FILE);
    let Ok(text) = tokio::fs::read_to_string(&path).await else {
        return Manifest::new();
    };
    serde_json::from_str(&text).unwrap_or_else(|e| {
        debug!(path = %path.display(), error = %e, "ignoring unreadable manifest");
        Manifest::new()
    })
}

pub(super) async fn save_manifest(dir: &Path, manifest: &Manifest) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    tokio::fs::write(dir.join(MANIFEST_FILE), json).await?;
    Ok(())
}
