//! Web-search prompt template and assembly.

use chrono::{DateTime, FixedOffset};

use crate::types::payload::{Citation, PromptPayload};
use crate::types::result::SearchResult;

/// Placeholder replaced with the formatted current date and time.
pub const DATE_TIME_PLACEHOLDER: &str = "{current_date_time}";

/// Placeholder replaced with the tagged result blocks.
pub const SEARCH_RESULTS_PLACEHOLDER: &str = "{search_results}";

/// Default system prompt for answering with web context.
pub const WEB_SEARCH_PROMPT: &str = r#"You are an AI model who is an expert at searching the web and answering user's queries.

Generate a response that is informative and relevant to the user's query based on the provided search results. The current date and time are {current_date_time}.

The `search-results` block provides knowledge from web search results. Use it to build a meaningful answer, and cite the `source` of each result you rely on. If the results do not answer the query, say so instead of guessing.

<search-results>
{search_results}
</search-results>"#;

/// Render results as `<result source=".." id="..">..</result>` blocks, one
/// per line, ids zero-based in input order.
///
/// Content is inserted verbatim; the wire format carries no escaping.
pub fn format_search_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            format!(
                "<result source=\"{}\" id=\"{}\">{}</result>",
                result.url, idx, result.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render `now` as `M/D/YYYY, h:mm:ss AM` in its own offset.
pub fn format_date_time(now: &DateTime<FixedOffset>) -> String {
    now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Fill the template and derive one citation per result.
///
/// Each placeholder is replaced at its first occurrence only, date first.
/// Missing placeholders are not an error; the template passes through.
pub fn assemble(
    template: &str,
    results: &[SearchResult],
    now: &DateTime<FixedOffset>,
) -> PromptPayload {
    let prompt = template
        .replacen(DATE_TIME_PLACEHOLDER, &format_date_time(now), 1)
        .replacen(SEARCH_RESULTS_PLACEHOLDER, &format_search_results(results), 1);

    PromptPayload {
        prompt,
        source: results
            .iter()
            .map(|result| Citation::for_url(result.url.clone()))
            .collect(),
    }
}
