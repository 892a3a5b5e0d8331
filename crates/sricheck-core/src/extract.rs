//! `<script>` extraction from an HTML document.
//!
//! Uses `scraper` (html5ever), so malformed markup is repaired the way a browser
//! would repair it and parse errors are never surfaced.

use scraper::{Html, Selector};

use crate::tag::ScriptTag;

/// Returns every `<script>` element in document order, inline scripts included.
pub fn extract_script_tags(html: &str) -> Vec<ScriptTag> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("script") {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("script selector failed to parse: {}", e);
            return Vec::new();
        }
    };

    let tags: Vec<ScriptTag> = document
        .select(&selector)
        .map(|element| ScriptTag::from_attrs(element.value().attrs()))
        .collect();

    tracing::debug!(
        "extracted {} script tags ({} with src)",
        tags.len(),
        tags.iter().filter(|t| t.src().is_some()).count()
    );
    tags
}
