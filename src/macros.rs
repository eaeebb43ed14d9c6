//! Shared Macros

/// Merge multiple vectors into one.
#[macro_export]
macro_rules! merge {
    ($($vec:expr),+ $(,)?) => {{
        let mut result = Vec::new();
        $(result.extend($vec);)+
        result
    }};
}

/// Deduplicate a collection by key while preserving order.
#[macro_export]
macro_rules! dedupe {
    // Deduplication by key, first occurrence wins
    ($list:expr, by $key:expr) => {{
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for item in $list {
            if seen.insert($key(&item).to_owned()) {
                result.push(item);
            }
        }
        result
    }};
}
