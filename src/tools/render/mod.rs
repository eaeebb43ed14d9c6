//! Render Tools
//!
//! Optional concept renders through the Replicate predictions API. Without
//! an API token every call returns [`Error::RenderNotConfigured`] and the
//! caller simply skips rendering.

pub mod types;

pub use types::*;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::error::{Error, Result};

pub fn build_render_client(cfg: &RenderConfig) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .build()?)
}

/// `POST` target and body for a prediction.
///
/// `owner/name:version` goes through the versioned endpoint; a bare
/// `owner/name` uses the model endpoint.
pub(crate) fn prediction_request(
    cfg: &RenderConfig,
    image_url: &str,
    prompt: &str,
) -> (String, serde_json::Value) {
    let input = json!({ "image": image_url, "prompt": prompt });
    match cfg.model.split_once(':') {
        Some((_, version)) => (
            format!("{}/predictions", cfg.api_base),
            json!({ "version": version, "input": input }),
        ),
        None => (
            format!("{}/models/{}/predictions", cfg.api_base, cfg.model),
            json!({ "input": input }),
        ),
    }
}

fn auth_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| Error::RenderNotConfigured("API token is not a valid header value".into()))?;
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Render `image_url` in the requested style and save the result to `dest`.
pub async fn render_room(
    client: &Client,
    image_url: &str,
    dest: &Path,
    prompt: &str,
    cfg: &RenderConfig,
) -> Result<PathBuf> {
    let token = cfg
        .api_token
        .as_deref()
        .ok_or_else(|| Error::RenderNotConfigured("set REPLICATE_API_TOKEN".into()))?;
    let headers = auth_headers(token)?;

    let (endpoint, body) = prediction_request(cfg, image_url, prompt);
    let mut prediction: Prediction = send_checked(
        client
            .post(&endpoint)
            .headers(headers.clone())
            .header("Prefer", "wait")
            .json(&body),
        &endpoint,
    )
    .await?;
    debug!(id = %prediction.id, status = ?prediction.status, "prediction created");

    let mut polls = 0;
    while !prediction.status.is_terminal() {
        if polls >= cfg.max_polls {
            return Err(Error::Render(format!(
                "prediction {} still {:?} after {} polls",
                prediction.id, prediction.status, polls
            )));
        }
        let Some(get_url) = prediction.urls.get.clone() else {
            return Err(Error::Render(format!("prediction {} has no status url", prediction.id)));
        };
        tokio::time::sleep(Duration::from_millis(cfg.poll_interval_ms)).await;
        prediction = send_checked(client.get(&get_url).headers(headers.clone()), &get_url).await?;
        polls += 1;
    }

    if prediction.status != PredictionStatus::Succeeded {
        let reason = prediction
            .error
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_else(|| format!("{:?}", prediction.status));
        return Err(Error::Render(reason));
    }
    let output = prediction
        .output_url()
        .ok_or_else(|| Error::Render("render service returned no output url".into()))?;

    let response = client.get(output).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::from_status(status, output));
    }
    let bytes = response.bytes().await?;
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(dest, &bytes).await?;

    info!(path = %dest.display(), polls, "render saved");
    Ok(dest.to_path_buf())
}

async fn send_checked(request: reqwest::RequestBuilder, url: &str) -> Result<Prediction> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::from_status(status, url));
    }
    Ok(response.json().await?)
}
