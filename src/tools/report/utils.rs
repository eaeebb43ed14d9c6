use std::path::Path;

/// Whole dollars with thousands separators, e.g. `$12,500`.
pub fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

/// Path as linked from the report: relative to the output dir, `/`-separated.
pub(super) fn link_path(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub(super) fn text(value: &str) -> String {
    html_escape::encode_text(value).to_string()
}

pub(super) fn attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).to_string()
}
