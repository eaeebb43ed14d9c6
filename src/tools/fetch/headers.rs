use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};

use crate::config::FetchConfig;

/// Browser-like headers for a listing page request.
pub(crate) fn page_headers(cfg: &FetchConfig, referer: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&cfg.user_agent).unwrap_or(HeaderValue::from_static("Mozilla/5.0")),
    );
    if let Ok(value) = HeaderValue::from_str(&cfg.accept) {
        headers.insert(ACCEPT, value);
    }
    if let Ok(value) = HeaderValue::from_str(&cfg.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }
    if let Some(value) = referer.and_then(|r| HeaderValue::from_str(r).ok()) {
        headers.insert(REFERER, value);
    }

    headers
}
