//! Runtime configuration.
//!
//! Every section has a `Default`; `Config::from_env` layers `.env` and
//! process variables on top, and the CLI layers its flags on top of that.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub timeout_ms: u64,
    /// Hit the site root first so the listing request carries session cookies.
    pub warm_up: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DESKTOP_USER_AGENT.into(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8".into(),
            accept_language: "en-US,en;q=0.9".into(),
            timeout_ms: 20_000,
            warm_up: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    pub user_agent: String,
    pub timeout_ms: u64,
    pub concurrency: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            user_agent: DESKTOP_USER_AGENT.into(),
            timeout_ms: 30_000,
            concurrency: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub api_base: String,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub max_polls: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.replicate.com/v1".into(),
            model: "stability-ai/sdxl".into(),
            api_token: None,
            timeout_ms: 60_000,
            poll_interval_ms: 2_000,
            max_polls: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub output_dir: PathBuf,
    pub design_style: String,
    pub address: Option<String>,
    pub render: bool,
    pub cookies: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            design_style: "Modern coastal".into(),
            address: None,
            render: false,
            cookies: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub fetch: FetchConfig,
    pub download: DownloadConfig,
    pub render: RenderConfig,
    pub run: RunConfig,
}

impl Config {
    /// Defaults overridden by `.env` and `LISTING_PHOTOS_*` / `REPLICATE_*` variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut cfg = Self::default();
        cfg.apply_env(|key| env::var(key).ok());
        cfg
    }

    /// Apply overrides from any key lookup; unparsable numbers are logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("LISTING_PHOTOS_USER_AGENT") {
            self.fetch.user_agent = v.clone();
            self.download.user_agent = v;
        }
        if let Some(v) = parse_var("LISTING_PHOTOS_TIMEOUT_MS", get("LISTING_PHOTOS_TIMEOUT_MS")) {
            self.fetch.timeout_ms = v;
        }
        if let Some(v) =
            parse_var("LISTING_PHOTOS_CONCURRENCY", get("LISTING_PHOTOS_CONCURRENCY"))
        {
            self.download.concurrency = v;
        }
        if let Some(v) = get("LISTING_PHOTOS_OUTPUT") {
            self.run.output_dir = PathBuf::from(v);
        }
        if let Some(v) = get("LISTING_PHOTOS_COOKIES") {
            self.run.cookies = Some(PathBuf::from(v));
        }
        if let Some(v) = get("REPLICATE_API_TOKEN") {
            self.render.api_token = Some(v);
        }
        if let Some(v) = get("REPLICATE_MODEL") {
            self.render.model = v;
        }
    }
}

fn parse_var<T: FromStr>(key: &str, value: Option<String>) -> Option<T> {
    let value = value?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(var = key, value = %value, "ignoring unparsable override");
            None
        }
    }
}
