use reqwest::cookie::Jar;
use reqwest::{redirect, Client};
use std::sync::Arc;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::Result;

const REDIRECT_LIMIT: usize = 10;
const POOL_IDLE_TIMEOUT_SEC: u64 = 90;

/// Build a reqwest client for listing pages.
///
/// A supplied jar seeds the cookie store (browser cookies exported to a
/// file); without one the client still keeps cookies set during the run.
pub fn build_client(cfg: &FetchConfig, cookies: Option<Arc<Jar>>) -> Result<Client> {
    let builder = Client::builder()
        .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC));

    let builder = match cookies {
        Some(jar) => builder.cookie_provider(jar),
        None => builder.cookie_store(true),
    };

    Ok(builder.build()?)
}
