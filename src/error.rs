use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The listing site answered 403; usually fixed by supplying browser cookies.
    #[error("listing site blocked the request to {url} (HTTP 403), try again with --cookies")]
    Blocked { url: String },

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("cookie file {path}: malformed line {line}")]
    Cookies { path: PathBuf, line: usize },

    #[error("no images found on {0}")]
    NoImages(String),

    #[error("rendering is not configured: {0}")]
    RenderNotConfigured(String),

    #[error("render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Map a non-success status to the caller-visible error.
    pub fn from_status(status: reqwest::StatusCode, url: &str) -> Self {
        if status == reqwest::StatusCode::FORBIDDEN {
            Error::Blocked { url: url.to_string() }
        } else {
            Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            }
        }
    }
}
