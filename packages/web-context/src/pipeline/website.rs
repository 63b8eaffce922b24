//! Finds an explicit website reference inside a free-text query.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use crate::types::website::WebsiteReference;

/// Candidate absolute URLs: scheme, then everything up to whitespace or a
/// character that can't appear unescaped in a URL.
static URL_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhttps?://[^\s<>"'`]+"#).expect("URL candidate pattern is valid")
});

/// Extract the first well-formed `http(s)` URL from `query`.
///
/// The URL is returned exactly as written. The residual query is the input
/// with every whole occurrence of that URL removed and nothing else touched,
/// so surrounding spaces stay: `"summarize https://example.com/article for me"`
/// leaves `"summarize  for me"`. Longer URLs that merely start with the
/// match are left intact.
///
/// Candidates that don't parse or have no host are skipped; this never fails.
pub fn extract_website(query: &str) -> WebsiteReference {
    for candidate in URL_CANDIDATE.find_iter(query) {
        let text = trim_trailing_punctuation(candidate.as_str());
        if !is_absolute_web_url(text) {
            debug!(candidate = %text, "Skipping malformed URL candidate");
            continue;
        }

        return WebsiteReference::found(text, remove_url(query, text));
    }

    WebsiteReference::none(query)
}

/// Cut each URL candidate in `query` that is exactly `url`.
fn remove_url(query: &str, url: &str) -> String {
    let mut residual = String::with_capacity(query.len());
    let mut last = 0;
    for candidate in URL_CANDIDATE.find_iter(query) {
        if trim_trailing_punctuation(candidate.as_str()) == url {
            residual.push_str(&query[last..candidate.start()]);
            last = candidate.start() + url.len();
        }
    }
    residual.push_str(&query[last..]);
    residual
}

fn is_absolute_web_url(text: &str) -> bool {
    match Url::parse(text) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Drop sentence punctuation and unbalanced closers glued to the URL end.
fn trim_trailing_punctuation(candidate: &str) -> &str {
    let mut end = candidate.len();

    while let Some(last) = candidate[..end].chars().last() {
        let head = &candidate[..end];
        let strip = match last {
            '.' | ',' | ';' | ':' | '!' | '?' => true,
            ')' => unbalanced(head, '(', ')'),
            ']' => unbalanced(head, '[', ']'),
            '}' => unbalanced(head, '{', '}'),
            _ => false,
        };
        if !strip {
            break;
        }
        end -= last.len_utf8();
    }

    &candidate[..end]
}

fn unbalanced(text: &str, open: char, close: char) -> bool {
    text.matches(close).count() > text.matches(open).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extracts_url_and_keeps_surrounding_whitespace() {
        let reference = extract_website("summarize https://example.com/article for me");
        assert!(reference.has_url);
        assert_eq!(reference.url, "https://example.com/article");
        assert_eq!(reference.residual_query, "summarize  for me");
    }

    #[test]
    fn test_no_url_returns_query_unchanged() {
        let query = "what is the tallest mountain?";
        let reference = extract_website(query);
        assert_eq!(reference, WebsiteReference::none(query));
    }

    #[test]
    fn test_first_url_wins() {
        let reference = extract_website("compare https://a.com/x and https://b.org/y");
        assert_eq!(reference.url, "https://a.com/x");
        assert_eq!(reference.residual_query, "compare  and https://b.org/y");
    }

    #[test]
    fn test_longer_url_with_same_prefix_is_kept() {
        let reference = extract_website("compare https://a.com/x with https://a.com/xyz please");
        assert_eq!(reference.url, "https://a.com/x");
        assert_eq!(reference.residual_query, "compare  with https://a.com/xyz please");
    }

    #[test]
    fn test_repeated_url_is_removed_everywhere() {
        let reference = extract_website("diff https://a.com/x against https://a.com/x.");
        assert_eq!(reference.url, "https://a.com/x");
        assert_eq!(reference.residual_query, "diff  against .");
    }

    #[test]
    fn test_trailing_sentence_punctuation_not_part_of_url() {
        let reference = extract_website("read https://example.com/post.");
        assert_eq!(reference.url, "https://example.com/post");
        assert_eq!(reference.residual_query, "read .");
    }

    #[test]
    fn test_parenthesised_url() {
        let reference = extract_website("(see https://en.wikipedia.org/wiki/Rust_(language))");
        assert_eq!(reference.url, "https://en.wikipedia.org/wiki/Rust_(language)");
        assert_eq!(reference.residual_query, "(see )");
    }

    #[test]
    fn test_near_misses_are_not_extracted() {
        for query in [
            "http:// is a scheme",
            "ftp://files.example.com/a",
            "example.com/article",
            "https:example.com",
        ] {
            let reference = extract_website(query);
            assert!(!reference.has_url, "false positive for {query:?}");
            assert_eq!(reference.residual_query, query);
        }
    }

    #[test]
    fn test_url_with_query_string_and_port() {
        let reference = extract_website("check http://localhost:8080/search?q=rust&p=2 now");
        assert_eq!(reference.url, "http://localhost:8080/search?q=rust&p=2");
        assert_eq!(reference.residual_query, "check  now");
    }

    #[test]
    fn test_uppercase_scheme() {
        let reference = extract_website("HTTPS://EXAMPLE.COM/A");
        assert!(reference.has_url);
        assert_eq!(reference.url, "HTTPS://EXAMPLE.COM/A");
        assert_eq!(reference.residual_query, "");
    }

    proptest! {
        #[test]
        fn prop_url_is_extracted_and_removed(
            before in "[a-z ]{0,20}",
            host in "[a-z]{1,12}\\.(com|org|net)",
            path in "(/[a-z0-9_-]{1,8}){0,3}",
            after in "[a-z ]{0,20}",
        ) {
            let url = format!("https://{host}{path}");
            let query = format!("{before} {url} {after}");
            let reference = extract_website(&query);

            prop_assert!(reference.has_url);
            prop_assert_eq!(&reference.url, &url);
            prop_assert!(!reference.residual_query.contains(&url));
        }

        #[test]
        fn prop_query_without_url_is_unchanged(query in "[a-zA-Z0-9 ,.?!:/()-]{0,80}") {
            prop_assume!(!query.to_ascii_lowercase().contains("http"));
            let reference = extract_website(&query);

            prop_assert!(!reference.has_url);
            prop_assert!(reference.url.is_empty());
            prop_assert_eq!(reference.residual_query, query);
        }
    }
}
