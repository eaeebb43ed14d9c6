//! Label Tools
//!
//! Name a room from the text around its photo. Alt text is checked before
//! the URL; the first keyword hit wins.

const LABEL_RULES: [(&[&str], &str); 6] = [
    (&["kitchen"], "Kitchen"),
    (&["bath"], "Bathroom"),
    (&["bed"], "Bedroom"),
    (&["living", "family"], "Living Room"),
    (&["dining"], "Dining Room"),
    (&["floor"], "Floor Plan"),
];

pub const DEFAULT_LABEL: &str = "Room";

/// Infer a display label for an image from its alt text, then its URL.
///
/// # Examples
/// ```
/// use listing_photos::tools::label::infer_label;
///
/// let alt = Some("Primary bath with soaking tub");
/// assert_eq!(infer_label(alt, "https://x.com/1.jpg"), "Bathroom");
/// assert_eq!(infer_label(None, "https://x.com/photos/kitchen-2.jpg"), "Kitchen");
/// assert_eq!(infer_label(None, "https://x.com/photos/2.jpg"), "Room");
/// ```
pub fn infer_label(alt: Option<&str>, url: &str) -> &'static str {
    for source in [alt.unwrap_or(""), url] {
        let lowered = source.to_lowercase();
        let hit = LABEL_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)));
        if let Some((_, label)) = hit {
            return *label;
        }
    }
    DEFAULT_LABEL
}
