//! Shapes raw backend/fetcher output into `(url, content)` records.

use tracing::debug;

use crate::types::result::{RawResult, SearchResult};

/// Normalize raw results.
///
/// - Records with a missing or blank URL are dropped.
/// - Content falls back to the title, then to an empty string.
/// - Order is preserved and duplicates are kept.
pub fn normalize(raw: Vec<RawResult>) -> Vec<SearchResult> {
    let total = raw.len();
    let results: Vec<SearchResult> = raw
        .into_iter()
        .filter_map(|r| {
            let url = r.url.filter(|u| !u.trim().is_empty())?;
            let content = r.content.or(r.title).unwrap_or_default();
            Some(SearchResult { url, content })
        })
        .collect();

    if results.len() < total {
        debug!(
            dropped = total - results.len(),
            kept = results.len(),
            "Dropped results without URL"
        );
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_missing_and_blank_urls() {
        let raw = vec![
            RawResult::new("https://a.com").with_content("a"),
            RawResult {
                url: None,
                title: Some("orphan".into()),
                content: Some("no url".into()),
            },
            RawResult::new("   ").with_content("blank"),
            RawResult::new("https://b.com").with_content("b"),
        ];

        assert_eq!(
            normalize(raw),
            vec![
                SearchResult::new("https://a.com", "a"),
                SearchResult::new("https://b.com", "b"),
            ]
        );
    }

    #[test]
    fn test_content_falls_back_to_title_then_empty() {
        let raw = vec![
            RawResult::new("https://a.com").with_title("Title A"),
            RawResult::new("https://b.com"),
        ];

        assert_eq!(
            normalize(raw),
            vec![
                SearchResult::new("https://a.com", "Title A"),
                SearchResult::new("https://b.com", ""),
            ]
        );
    }

    #[test]
    fn test_keeps_duplicates_in_order() {
        let raw = vec![
            RawResult::new("https://same.com").with_content("1"),
            RawResult::new("https://other.com").with_content("2"),
            RawResult::new("https://same.com").with_content("3"),
        ];

        let contents: Vec<_> = normalize(raw).into_iter().map(|r| r.content).collect();
        assert_eq!(contents, ["1", "2", "3"]);
    }
}
