//! HTML to plain text, chunking, and query-focused chunk ranking.

use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;

/// Subtrees that never carry readable page content.
const SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "svg", "iframe", "nav", "header", "footer", "aside", "form",
    "template",
];

/// Elements that start a new line of text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "td", "th", "article",
    "section", "main", "blockquote", "pre", "figcaption", "dt", "dd", "table", "ul", "ol",
];

/// Regions tried, in order, before falling back to `<body>`.
const MAIN_SELECTORS: &[&str] = &["article", "main", "[role='main']", "#content", ".post-content"];

/// Main regions shorter than this are treated as misdetections.
const MIN_MAIN_CHARS: usize = 200;

/// Words that carry no relevance signal when ranking chunks.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "how", "in", "is", "it", "me",
    "of", "on", "or", "that", "the", "this", "to", "was", "what", "when", "where", "which", "who",
    "why", "with", "about", "please", "can", "you", "tell", "summarize", "explain",
];

/// Extract readable text from an HTML document.
///
/// Prefers an `article`/`main`-like region; falls back to `<body>` with
/// navigation, scripts and other chrome removed. Whitespace is collapsed
/// and the result is cut at `max_chars`.
pub fn html_to_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);

    for selector in MAIN_SELECTORS {
        if let Ok(selector) = Selector::parse(selector) {
            if let Some(region) = document.select(&selector).next() {
                let text = element_text(&region, max_chars);
                if text.chars().count() >= MIN_MAIN_CHARS {
                    return text;
                }
            }
        }
    }

    if let Ok(body) = Selector::parse("body") {
        if let Some(body) = document.select(&body).next() {
            return element_text(&body, max_chars);
        }
    }

    element_text(&document.root_element(), max_chars)
}

/// Page `<title>`, if any.
pub fn html_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

fn element_text(element: &ElementRef<'_>, max_chars: usize) -> String {
    let mut buf = String::new();
    collect_text(element, &mut buf, max_chars.saturating_mul(2));
    truncate_chars(&collapse_whitespace(&buf), max_chars)
}

fn collect_text(element: &ElementRef<'_>, buf: &mut String, budget: usize) {
    for child in element.children() {
        if buf.len() >= budget {
            return;
        }
        match child.value() {
            Node::Text(text) => buf.push_str(&text.replace(['\n', '\r', '\t'], " ")),
            Node::Element(el) => {
                let tag = el.name();
                if SKIP_TAGS.contains(&tag) {
                    continue;
                }
                let block = BLOCK_TAGS.contains(&tag);
                if block {
                    buf.push('\n');
                }
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(&child, buf, budget);
                }
                if block {
                    buf.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Collapse runs of spaces within lines and drop blank lines.
pub fn collapse_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}

/// Split `text` into chunks of at most `size` characters, neighbours sharing
/// `overlap` characters. Chunk boundaries prefer whitespace.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    let size = size.max(1);
    let overlap = overlap.min(size / 2);

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let mut end = (start + size).min(chars.len());
        if end < chars.len() {
            // Back off to the last whitespace in the second half of the window.
            if let Some(ws) = (start + size / 2..end).rev().find(|&i| chars[i].is_whitespace()) {
                end = ws;
            }
        }

        let chunk: String = chars[start..end].iter().collect();
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }

        if end >= chars.len() {
            break;
        }
        start = (end - overlap).max(start + 1);
        // Don't open the next chunk in the middle of a word.
        if let Some(ws) = (start..end).find(|&i| chars[i].is_whitespace()) {
            start = ws + 1;
        }
    }
    chunks
}

/// Significant lowercase terms of a query.
pub fn query_terms(query: &str) -> HashSet<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 1)
        .map(str::to_lowercase)
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
        .collect()
}

/// Keep the `top_k` chunks most relevant to `query`.
///
/// Relevance is the number of query-term occurrences in a chunk. Ties, and
/// queries without usable terms, keep document order.
pub fn rank_chunks(chunks: Vec<String>, query: &str, top_k: usize) -> Vec<String> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return chunks.into_iter().take(top_k).collect();
    }

    let mut scored: Vec<(usize, usize, String)> = chunks
        .into_iter()
        .enumerate()
        .map(|(idx, chunk)| (score(&chunk, &terms), idx, chunk))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    scored
        .into_iter()
        .take(top_k)
        .map(|(_, _, chunk)| chunk)
        .collect()
}

fn score(chunk: &str, terms: &HashSet<String>) -> usize {
    chunk
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty() && terms.contains(&word.to_lowercase()))
        .count()
}
