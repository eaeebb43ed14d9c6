//! Shared Selectors

use once_cell::sync::Lazy;
use scraper::Selector;

/// Selector for every `<img>` element.
pub static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("valid img selector"));

/// Selector for `<img>` and `<noscript>` elements, in one document-order walk.
pub static IMG_OR_NOSCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img, noscript").expect("valid img/noscript selector"));

/// Selector for the Next.js hydration payload.
pub static NEXT_DATA_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script#__NEXT_DATA__").expect("valid next data selector"));
