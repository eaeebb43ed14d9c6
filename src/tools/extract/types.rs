use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;
use serde::Serialize;
use std::hash::{Hash, Hasher};
use url::Url;

use super::hints::{is_floorplan, is_likely_listing_image};
use crate::selectors::NEXT_DATA_SELECTOR;

/// An image reference found in listing markup, prior to download.
///
/// Two candidates are equal iff their URLs are byte-equal. The floor-plan
/// flag is derived at construction and cannot be set independently.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCandidate {
    url: String,
    alt: Option<String>,
    is_floorplan: bool,
}

impl ImageCandidate {
    /// Build a candidate, or `None` when the URL is blank.
    ///
    /// The floor-plan flag comes from the alt text when it is present and
    /// non-blank, otherwise from the URL.
    pub fn new(url: impl Into<String>, alt: Option<String>) -> Option<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return None;
        }
        let is_floorplan = match alt.as_deref().filter(|a| !a.trim().is_empty()) {
            Some(text) => is_floorplan(text),
            None => is_floorplan(&url),
        };
        Some(Self {
            url,
            alt,
            is_floorplan,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }

    pub fn is_floorplan(&self) -> bool {
        self.is_floorplan
    }
}

impl PartialEq for ImageCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for ImageCandidate {}

impl Hash for ImageCandidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

/// A listing site whose image host is known up front.
#[derive(Debug)]
pub struct SiteProfile {
    /// Short name, used in logs and on the CLI.
    pub name: &'static str,
    /// Domain the listing pages live on (matched against the page host).
    pub page_domain: &'static str,
    /// Host substring every real photo URL contains.
    pub image_host: &'static str,
    /// Lowercase JSON keys that carry image URLs.
    pub url_fields: &'static [&'static str],
    /// Script element holding the hydration payload, if the site ships one.
    pub payload: Option<&'static Selector>,
    pattern: Regex,
}

impl SiteProfile {
    pub fn new(
        name: &'static str,
        page_domain: &'static str,
        image_host: &'static str,
        url_fields: &'static [&'static str],
        payload: Option<&'static Selector>,
    ) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r#"https?://[^\s'"<>]*{}[^\s'"<>]+"#,
            regex::escape(image_host)
        ))?;
        Ok(Self {
            name,
            page_domain,
            image_host,
            url_fields,
            payload,
            pattern,
        })
    }

    /// Host-anchored URL pattern for raw markup scanning.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn is_image_url(&self, value: &str) -> bool {
        value.contains(self.image_host)
    }

    pub fn is_url_field(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.url_fields.iter().any(|field| *field == key)
    }

    /// True when the page host is the profile's domain or one of its subdomains.
    pub fn matches_page(&self, page: &Url) -> bool {
        page.host_str()
            .map(|host| {
                let host = host.to_ascii_lowercase();
                host == self.page_domain || host.ends_with(&format!(".{}", self.page_domain))
            })
            .unwrap_or(false)
    }
}

pub static ZILLOW: Lazy<SiteProfile> = Lazy::new(|| {
    SiteProfile::new(
        "zillow",
        "zillow.com",
        "photos.zillowstatic.com",
        &["url", "imageurl", "image_url"],
        Some(&*NEXT_DATA_SELECTOR),
    )
    .expect("valid zillow profile")
});

/// Which extractor flavor to run over a page.
#[derive(Debug, Clone, Copy)]
pub enum ExtractPolicy {
    /// Keyword-hint relevance filter, extension-anchored pattern scan.
    Generic,
    /// Host-anchored scans plus the embedded-payload walk.
    Specialized(&'static SiteProfile),
}

impl ExtractPolicy {
    pub fn zillow() -> Self {
        Self::Specialized(&ZILLOW)
    }

    /// Pick the policy for a listing URL; unknown sites get `Generic`.
    pub fn for_url(url: &str) -> Self {
        let Ok(page) = Url::parse(url) else {
            return Self::Generic;
        };
        [&*ZILLOW]
            .into_iter()
            .find(|profile| profile.matches_page(&page))
            .map(Self::Specialized)
            .unwrap_or(Self::Generic)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Specialized(profile) => profile.name,
        }
    }

    /// Keep/drop decision for an `<img>` source and its alt text.
    pub(super) fn accepts_tag(&self, src: &str, alt: Option<&str>) -> bool {
        match self {
            Self::Generic => is_likely_listing_image(src, alt),
            Self::Specialized(profile) => profile.is_image_url(src),
        }
    }

    /// Keep/drop decision for a raw pattern match (no alt text available).
    pub(super) fn accepts_match(&self, url: &str) -> bool {
        match self {
            Self::Generic => is_likely_listing_image(url, None),
            Self::Specialized(_) => true,
        }
    }
}
