use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Element;
use scraper::Html;
use serde_json::Value;
use tracing::debug;

use super::types::{ExtractPolicy, ImageCandidate, SiteProfile};
use crate::selectors::{IMG_OR_NOSCRIPT_SELECTOR, IMG_SELECTOR};

/// Image URLs ending in a photo extension, with an optional query string.
static IMAGE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s'"<>]+?\.(?:jpg|jpeg|png|webp)(?:\?[^\s'"<>]*)?"#)
        .expect("valid regex")
});

/// Source attributes tried in order; lazy loaders park the real URL in `data-*`.
const SOURCE_ATTRS: [&str; 3] = ["src", "data-src", "data-lazy"];

/// Payload nesting deeper than this is skipped (serde_json refuses to parse past 128 anyway).
const MAX_WALK_DEPTH: usize = 128;

/// Walk every `<img>` in document order, including `<noscript>` fallbacks.
pub(super) fn scan_img_tags(doc: &Html, policy: &ExtractPolicy) -> Vec<ImageCandidate> {
    let mut out = Vec::new();
    for el in doc.select(&IMG_OR_NOSCRIPT_SELECTOR) {
        if el.value().name() == "noscript" {
            // Parsed with scripting on, so the fallback markup is a raw text child.
            let fragment = Html::parse_fragment(&el.text().collect::<String>());
            out.extend(
                fragment
                    .select(&IMG_SELECTOR)
                    .filter_map(|img| img_candidate(img.value(), policy)),
            );
        } else {
            out.extend(img_candidate(el.value(), policy));
        }
    }
    out
}

fn img_candidate(el: &Element, policy: &ExtractPolicy) -> Option<ImageCandidate> {
    let src = SOURCE_ATTRS
        .iter()
        .filter_map(|attr| el.attr(attr))
        .find(|value| !value.trim().is_empty())?;
    let alt = el.attr("alt");
    if !policy.accepts_tag(src, alt) {
        return None;
    }
    ImageCandidate::new(src, alt.map(str::to_string))
}

/// Match image URLs anywhere in the raw markup (inline styles, scripts, JSON).
pub(super) fn scan_patterns(markup: &str, policy: &ExtractPolicy) -> Vec<ImageCandidate> {
    let pattern = match policy {
        ExtractPolicy::Generic => &*IMAGE_URL_REGEX,
        ExtractPolicy::Specialized(profile) => profile.pattern(),
    };
    pattern
        .find_iter(markup)
        .map(|m| m.as_str())
        .filter(|url| policy.accepts_match(url))
        .filter_map(|url| ImageCandidate::new(url, None))
        .collect()
}

/// Parse the site's hydration payload and collect image fields from it.
///
/// A missing or malformed payload contributes nothing.
pub(super) fn scan_payload(doc: &Html, profile: &SiteProfile) -> Vec<ImageCandidate> {
    let Some(selector) = profile.payload else {
        return Vec::new();
    };
    let Some(script) = doc.select(selector).next() else {
        debug!(site = profile.name, "no embedded payload");
        return Vec::new();
    };
    let raw = script.text().collect::<String>();
    match serde_json::from_str::<Value>(&raw) {
        Ok(payload) => {
            let mut out = Vec::new();
            walk_payload(&payload, profile, 0, &mut out);
            out
        }
        Err(e) => {
            debug!(site = profile.name, error = %e, "embedded payload is not valid JSON");
            Vec::new()
        }
    }
}

/// Depth-first walk; every composite value is descended into whether or not
/// its key matched.
pub(super) fn walk_payload(
    value: &Value,
    profile: &SiteProfile,
    depth: usize,
    out: &mut Vec<ImageCandidate>,
) {
    if depth >= MAX_WALK_DEPTH {
        return;
    }
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match child {
                    Value::String(s) if profile.is_url_field(key) && profile.is_image_url(s) => {
                        out.extend(ImageCandidate::new(s.as_str(), None));
                    }
                    Value::Object(_) | Value::Array(_) => {
                        walk_payload(child, profile, depth + 1, out);
                    }
                    _ => {}
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_payload(item, profile, depth + 1, out);
            }
        }
        _ => {}
    }
}

/// Drop repeated URLs, keeping the first occurrence and its position.
pub(super) fn dedupe_candidates(candidates: Vec<ImageCandidate>) -> Vec<ImageCandidate> {
    crate::dedupe!(candidates, by ImageCandidate::url)
}
