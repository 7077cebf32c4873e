use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

const NEXT_PAGE: &str = "next_page";

static PAGE_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&](?:page|start)=(\d+)").expect("static regex is valid")
});

/// Replaces the `next_page` URL of a paged listing with the bare page number.
///
/// Bodies without a `next_page` string, or whose URL carries no `page=` /
/// `start=` number, are returned unchanged.
pub fn normalize(mut body: Value) -> Value {
    if let Some(next_page) = body.get_mut(NEXT_PAGE) {
        if let Some(page) = next_page.as_str().and_then(page_number) {
            *next_page = Value::from(page);
        }
    }
    body
}

/// Extracts the page number from a next-page URL.
pub fn page_number(url: &str) -> Option<u64> {
    PAGE_PARAM
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
