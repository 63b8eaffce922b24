//! The pipeline's sole output: a prompt plus its citations.

use serde::{Deserialize, Serialize};

/// Kind of a citation. Only URLs exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationKind {
    Url,
}

/// Where a block of prompt context came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub url: String,

    /// Host of `url`, or empty when `url` does not parse.
    pub name: String,

    #[serde(rename = "type")]
    pub kind: CitationKind,
}

impl Citation {
    /// Build a URL citation, deriving `name` from the host.
    pub fn for_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let name = host_name(&url);
        Self {
            url,
            name,
            kind: CitationKind::Url,
        }
    }
}

/// Assembled prompt and the sources it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPayload {
    pub prompt: String,
    pub source: Vec<Citation>,
}

impl PromptPayload {
    /// The payload handed out when no web context could be gathered.
    pub fn degraded() -> Self {
        Self::default()
    }

    /// True for the degraded payload.
    pub fn is_empty(&self) -> bool {
        self.prompt.is_empty() && self.source.is_empty()
    }
}

/// Host of a URL, or an empty string if it doesn't parse.
pub fn host_name(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_name_is_host() {
        let citation = Citation::for_url("https://docs.rs/tokio/latest/tokio/");
        assert_eq!(citation.name, "docs.rs");
        assert_eq!(citation.kind, CitationKind::Url);
    }

    #[test]
    fn test_citation_name_empty_for_invalid_url() {
        let citation = Citation::for_url("not a valid url");
        assert_eq!(citation.url, "not a valid url");
        assert_eq!(citation.name, "");
    }

    #[test]
    fn test_citation_serializes_type_field() {
        let citation = Citation::for_url("https://example.com/a");
        let json = serde_json::to_value(&citation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://example.com/a",
                "name": "example.com",
                "type": "url"
            })
        );
    }

    #[test]
    fn test_degraded_payload_is_empty() {
        let payload = PromptPayload::degraded();
        assert!(payload.is_empty());
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"prompt":"","source":[]}"#
        );
    }
}
