//! Platform and status vocabularies, plus listing de-duplication.
//!
//! Statuses are free-form strings at the storage layer; only the input
//! boundary validates them, so rows written under older vocabularies stay
//! readable.

/// Platforms a blogger can publish on.
pub const PLATFORMS: [&str; 4] = ["tiktok", "tg", "insta", "youtube"];

/// Order statuses accepted at the input boundary.
pub const ORDER_STATUSES: [&str; 4] = ["negotiation", "agreed", "paid", "published"];

/// Returns true if `platform` is a known platform.
#[must_use]
pub fn is_known_platform(platform: &str) -> bool {
    PLATFORMS.contains(&platform)
}

/// Returns true if `status` is an accepted order status.
#[must_use]
pub fn is_known_order_status(status: &str) -> bool {
    ORDER_STATUSES.contains(&status)
}

/// De-duplicates listing rows by name, case-insensitively.
///
/// Storage does not enforce name uniqueness for bloggers and advertisers, so
/// listing screens collapse duplicates at query time. The first row per name
/// wins; callers pass rows already in display order.
#[must_use]
pub fn dedupe_by_name<T, F>(items: Vec<T>, name: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(name(item).trim().to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_platforms() {
        assert!(is_known_platform("tiktok"));
        assert!(is_known_platform("tg"));
        assert!(is_known_platform("insta"));
        assert!(is_known_platform("youtube"));
        assert!(!is_known_platform("vk"));
        assert!(!is_known_platform(""));
    }

    #[test]
    fn test_known_order_statuses() {
        assert!(is_known_order_status("negotiation"));
        assert!(is_known_order_status("agreed"));
        assert!(is_known_order_status("paid"));
        assert!(is_known_order_status("published"));
        // Earlier vocabulary is no longer accepted on input.
        assert!(!is_known_order_status("planned"));
    }

    #[test]
    fn test_dedupe_by_name_keeps_first() {
        let items = vec![
            (1, "Anna"),
            (2, "anna"),
            (3, "Boris"),
            (4, "Anna "),
            (5, "Clara"),
        ];
        let deduped = dedupe_by_name(items, |(_, name)| name);
        assert_eq!(
            deduped.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            vec![1, 3, 5]
        );
    }

    #[test]
    fn test_dedupe_by_name_empty() {
        let items: Vec<(i32, String)> = vec![];
        assert!(dedupe_by_name(items, |(_, name)| name.as_str()).is_empty());
    }
}
