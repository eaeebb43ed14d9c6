//! Extract Tools
//!
//! Turn raw listing markup into an ordered, deduplicated list of photo
//! candidates. Three stages run over the same page and are merged in a
//! fixed order, so the first stage to see a URL decides its alt text:
//!
//! 1. `<img>` tags (`src`, then `data-src`, then `data-lazy`), including
//!    those inside `<noscript>` fallbacks
//! 2. raw pattern matches over the markup text
//! 3. the embedded hydration payload (specialized sites only)

mod hints;
mod tests;
pub mod types;
mod utils;

pub use hints::{
    is_floorplan, is_likely_listing_image, FLOORPLAN_HINTS, NEGATIVE_HINTS, POSITIVE_HINTS,
};
pub use types::*;
use utils::*;

use scraper::Html;
use tracing::debug;

/// Extract candidates from any listing site using keyword hints.
///
/// # Examples
/// ```
/// use listing_photos::tools::extract::extract_generic;
///
/// let html = r#"<img src="https://example.com/listing/kitchen.jpg" alt="Kitchen">
///               <img src="https://example.com/assets/logo.png">"#;
/// let images = extract_generic(html);
/// assert_eq!(images.len(), 1);
/// assert_eq!(images[0].url(), "https://example.com/listing/kitchen.jpg");
/// ```
pub fn extract_generic(markup: &str) -> Vec<ImageCandidate> {
    extract_with_policy(markup, &ExtractPolicy::Generic)
}

/// Extract candidates from a Zillow listing page.
pub fn extract_specialized(markup: &str) -> Vec<ImageCandidate> {
    extract_with_policy(markup, &ExtractPolicy::zillow())
}

/// Run every stage the policy enables, then merge and dedupe by URL.
pub fn extract_with_policy(markup: &str, policy: &ExtractPolicy) -> Vec<ImageCandidate> {
    let doc = Html::parse_document(markup);

    let tags = scan_img_tags(&doc, policy);
    let patterns = scan_patterns(markup, policy);
    let payload = match policy {
        ExtractPolicy::Generic => Vec::new(),
        ExtractPolicy::Specialized(profile) => scan_payload(&doc, profile),
    };
    debug!(
        policy = policy.name(),
        tags = tags.len(),
        patterns = patterns.len(),
        payload = payload.len(),
        "scanned markup"
    );

    dedupe(crate::merge!(tags, patterns, payload))
}

/// Keep the first candidate for each URL, in order.
pub fn dedupe(candidates: Vec<ImageCandidate>) -> Vec<ImageCandidate> {
    dedupe_candidates(candidates)
}
