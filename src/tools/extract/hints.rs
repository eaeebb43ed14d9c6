//! Keyword tables and the relevance filter.

pub const FLOORPLAN_HINTS: [&str; 3] = ["floor", "plan", "blueprint"];

/// Site-chrome markers: logos, icons, social badges, map and footer assets.
pub const NEGATIVE_HINTS: [&str; 16] = [
    "logo",
    "icon",
    "sprite",
    "favicon",
    "avatar",
    "agent",
    "profile",
    "map",
    "facebook",
    "twitter",
    "instagram",
    "pin",
    "badge",
    "equal-housing",
    "/images/footer/",
    "footer/flags",
];

pub const POSITIVE_HINTS: [&str; 10] = [
    "listing",
    "home",
    "property",
    "photo",
    "photos",
    "gallery",
    "media",
    "res",
    "image",
    "images",
];

const REDFIN_PHOTO_PATH: &str = "cdn-redfin.com/photo";
const REDFIN_LARGE_SEGMENT: &str = "/bigphoto/";
const REDFIN_FOOTER_SEGMENT: &str = "/images/footer/";

fn contains_any(lowered: &str, hints: &[&str]) -> bool {
    hints.iter().any(|hint| lowered.contains(hint))
}

pub fn is_floorplan(text: &str) -> bool {
    contains_any(&text.to_lowercase(), &FLOORPLAN_HINTS)
}

/// Decide whether `(url, alt)` looks like real listing content.
///
/// Order matters: negative hints veto first, the Redfin CDN rule replaces
/// the positive check for its URLs, then any positive hint accepts.
pub fn is_likely_listing_image(url: &str, alt: Option<&str>) -> bool {
    let url_lower = url.to_lowercase();
    let alt_lower = alt.map(str::to_lowercase);

    if contains_any(&url_lower, &NEGATIVE_HINTS) {
        return false;
    }
    if alt_lower
        .as_deref()
        .is_some_and(|a| contains_any(a, &NEGATIVE_HINTS))
    {
        return false;
    }

    if url_lower.contains(REDFIN_PHOTO_PATH) {
        return url_lower.contains(REDFIN_LARGE_SEGMENT)
            && !url_lower.contains(REDFIN_FOOTER_SEGMENT);
    }

    contains_any(&url_lower, &POSITIVE_HINTS)
        || alt_lower
            .as_deref()
            .is_some_and(|a| contains_any(a, &POSITIVE_HINTS))
}
