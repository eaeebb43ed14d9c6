//! Fetch Tools

mod client;
mod cookies;
mod headers;

pub use client::build_client;
pub use cookies::*;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use crate::config::FetchConfig;
use crate::error::{Error, Result};
use headers::page_headers;

/// Source of listing page markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// Production fetcher backed by a cookie-aware reqwest client.
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig, cookies: Option<Arc<Jar>>) -> Result<Self> {
        let client = build_client(&config, cookies)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        fetch_page(&self.client, url, &self.config).await
    }
}

/// `scheme://host/` of a listing URL, used for the warm-up hit and as referer.
pub fn site_root(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|_| Error::InvalidUrl(url.into()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| Error::InvalidUrl(url.into()))?;
    match parsed.port() {
        Some(port) => Ok(format!("{}://{}:{}/", parsed.scheme(), host, port)),
        None => Ok(format!("{}://{}/", parsed.scheme(), host)),
    }
}

/// Fetch listing markup.
///
/// HTTP 403 becomes [`Error::Blocked`] so callers can suggest cookies; any
/// other non-success status becomes [`Error::Http`].
///
/// # Examples
/// ```no_run
/// use listing_photos::config::FetchConfig;
/// use listing_photos::tools::fetch::{build_client, fetch_page};
///
/// # async fn example() -> listing_photos::Result<()> {
/// let cfg = FetchConfig::default();
/// let client = build_client(&cfg, None)?;
/// let html = fetch_page(&client, "https://www.zillow.com/homedetails/1_zpid/", &cfg).await?;
/// # Ok(())
/// # }
/// ```
pub async fn fetch_page(client: &Client, url: &str, cfg: &FetchConfig) -> Result<String> {
    let root = site_root(url)?;
    let headers = page_headers(cfg, Some(&root));

    if cfg.warm_up {
        match client.get(&root).headers(headers.clone()).send().await {
            Ok(resp) => debug!(root = %root, status = resp.status().as_u16(), "warm-up"),
            Err(e) => debug!(root = %root, error = %e, "warm-up failed"),
        }
    }

    let response = client.get(url).headers(headers).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::from_status(status, url));
    }

    let body = response.text().await?;
    info!(url, bytes = body.len(), "fetched listing page");
    Ok(body)
}
