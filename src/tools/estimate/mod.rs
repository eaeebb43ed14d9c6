//! Estimate Tools
//!
//! Static per-room renovation ranges. Labels are bucketed by alias; anything
//! unrecognized lands in `other`.

mod tests;
pub mod types;

pub use types::*;

pub const OTHER_ROOM: &str = "other";

/// Canonical room → (low, high) USD.
pub const ROOM_DEFAULTS: [(&str, (u32, u32)); 9] = [
    ("living", (6_000, 15_000)),
    ("kitchen", (12_000, 35_000)),
    ("bath", (8_000, 22_000)),
    ("bed", (4_000, 12_000)),
    ("dining", (5_000, 14_000)),
    ("hall", (2_500, 6_000)),
    ("office", (3_000, 9_000)),
    ("exterior", (7_000, 20_000)),
    (OTHER_ROOM, (2_500, 8_000)),
];

/// Checked in order; the first canonical room with a matching alias wins.
const ROOM_ALIASES: [(&str, &[&str]); 8] = [
    ("living", &["living", "family", "great"]),
    ("kitchen", &["kitchen"]),
    ("bath", &["bath", "bathroom", "powder"]),
    ("bed", &["bed", "bedroom"]),
    ("dining", &["dining"]),
    ("hall", &["hall", "entry", "foyer"]),
    ("office", &["office", "study"]),
    ("exterior", &["exterior", "outside", "backyard", "front"]),
];

/// Map a free-text label onto a canonical room key.
pub fn normalize_room_label(label: Option<&str>) -> &'static str {
    let Some(label) = label.filter(|l| !l.trim().is_empty()) else {
        return OTHER_ROOM;
    };
    let lowered = label.to_lowercase();
    ROOM_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|a| lowered.contains(a)))
        .map(|(canonical, _)| *canonical)
        .unwrap_or(OTHER_ROOM)
}

/// Cost range for a label, falling back to the `other` bucket.
pub fn lookup(label: &str) -> (u32, u32) {
    let canonical = normalize_room_label(Some(label));
    ROOM_DEFAULTS
        .iter()
        .find(|(room, _)| *room == canonical)
        .map(|(_, range)| *range)
        .unwrap_or((2_500, 8_000))
}

/// One estimate row per label, in input order.
///
/// # Examples
/// ```
/// use listing_photos::tools::estimate::estimate_budget;
///
/// let budget = estimate_budget(["Kitchen", "Bathroom"]);
/// assert_eq!(budget.total_low(), 20_000);
/// assert_eq!(budget.total_high(), 57_000);
/// ```
pub fn estimate_budget<I, S>(labels: I) -> BudgetEstimate
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let rooms = labels
        .into_iter()
        .map(|label| {
            let label = label.as_ref();
            let (low, high) = lookup(label);
            RoomEstimate {
                room_label: label.to_string(),
                low,
                high,
            }
        })
        .collect();
    BudgetEstimate { rooms }
}
