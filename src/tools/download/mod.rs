//! Download Tools
//!
//! Fetch candidate images into a cache directory. Files are named by a hash
//! of their URL, so a second run over the same listing skips the network.

pub mod types;
mod utils;

pub use types::*;
pub use utils::{cache_name, resolve_url};
use utils::*;

use reqwest::Client;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::DownloadConfig;
use crate::error::{Error, Result};
use crate::tools::batch::batch;
use crate::tools::extract::ImageCandidate;

struct Job {
    url: String,
    alt: Option<String>,
    is_floorplan: bool,
    dest: PathBuf,
}

/// Build the client used for image downloads.
pub fn build_download_client(cfg: &DownloadConfig) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(cfg.user_agent.as_str())
        .gzip(true)
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .build()?)
}

/// Download every candidate into `dir`, reusing cached files.
///
/// Output order follows input order. Candidates that cannot be resolved or
/// downloaded are logged and left out; `manifest.json` records the rest.
pub async fn download_images(
    client: &Client,
    page_url: &str,
    images: &[ImageCandidate],
    dir: &Path,
    cfg: &DownloadConfig,
) -> Result<Vec<DownloadedImage>> {
    tokio::fs::create_dir_all(dir).await?;

    let mut seen = HashSet::new();
    let jobs: Vec<Job> = images
        .iter()
        .filter_map(|c| match resolve_url(page_url, c.url()) {
            Some(url) => Some((url, c)),
            None => {
                warn!(url = c.url(), "skipping unresolvable image url");
                None
            }
        })
        .filter(|(url, _)| seen.insert(url.clone()))
        .map(|(url, c)| Job {
            dest: dir.join(cache_name(&url)),
            url,
            alt: c.alt().map(str::to_string),
            is_floorplan: c.is_floorplan(),
        })
        .collect();
    let total = jobs.len();

    let client = client.clone();
    let results = batch(jobs, cfg.concurrency, move |job| {
        let client = client.clone();
        async move { fetch_one(&client, job).await }
    })
    .await;

    let mut manifest = load_manifest(dir).await;
    let mut downloaded = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(image) => {
                if let Some(name) = image.local_path.file_name().and_then(|n| n.to_str()) {
                    manifest.insert(name.to_string(), image.manifest_entry());
                }
                downloaded.push(image);
            }
            Err(e) => warn!(error = %e, "image download failed"),
        }
    }
    save_manifest(dir, &manifest).await?;

    info!(
        dir = %dir.display(),
        downloaded = downloaded.len(),
        total,
        "downloaded images"
    );
    Ok(downloaded)
}

async fn fetch_one(client: &Client, job: Job) -> Result<DownloadedImage> {
    let Job {
        url,
        alt,
        is_floorplan,
        dest,
    } = job;

    if tokio::fs::metadata(&dest).await.is_ok() {
        debug!(url = %url, path = %dest.display(), "cached");
    } else {
        let response = client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::from_status(status, &url));
        }
        let bytes = response.bytes().await?;
        tokio::fs::write(&dest, &bytes).await?;
        debug!(url = %url, path = %dest.display(), bytes = bytes.len(), "downloaded");
    }

    Ok(DownloadedImage {
        source_url: url,
        local_path: dest,
        alt,
        is_floorplan,
    })
}
