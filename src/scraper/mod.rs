mod roster;

pub use roster::parse_roster;

use ::scraper::{ElementRef, Selector};

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .and_then(|d| d.text().map(|t| t.trim()).find(|t| !t.is_empty()))
        .unwrap_or_default()
        .trim()
        .replace(['\n', '\t'], "")
        .to_string()
}

/// Tolerant numeric coercion for statistic cells. Handles bare decimals
/// like `.322`; anything unparseable becomes `0.0`.
pub(crate) fn coerce_stat_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return 0.0;
    }
    trimmed.parse().unwrap_or(0.0)
}
