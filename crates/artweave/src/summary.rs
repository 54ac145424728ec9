//! Summary text processing.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use artweave_core::anchor::ArtworkAnchors;

/// Heading the producer puts in front of the comparison paragraph.
pub const SUMMARY_MARKER: &str = "**Comparison Summary**";

/// Shown when a job ends without ever producing a summary.
pub const SUMMARY_PLACEHOLDER: &str = "Summary unavailable.";

static LEADING_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[:\-–—]\s*").expect("separator pattern is a valid regex")
});

static ARTWORK_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bartwork ([ab])\b").expect("artwork token pattern is a valid regex")
});

/// Returns the comparison paragraph of a producer summary.
///
/// Everything after [`SUMMARY_MARKER`] is kept, minus one leading colon or
/// dash. Without the marker the whole trimmed text is the summary.
///
/// ```
/// use artweave::summary::extract_comparison_summary;
///
/// let text = "**Overview**\n- ...\n\n**Comparison Summary**: Both scenes share a river.";
/// assert_eq!(extract_comparison_summary(text), "Both scenes share a river.");
/// ```
pub fn extract_comparison_summary(text: &str) -> String {
    match text.split_once(SUMMARY_MARKER) {
        Some((_, rest)) => LEADING_SEPARATOR.replace(rest.trim(), "").into_owned(),
        None => text.trim().to_string(),
    }
}

/// Replaces the whole-word tokens "Artwork A" and "Artwork B", in any case,
/// with the anchors' titles.
pub fn substitute_artwork_tokens(summary: &str, anchors: &ArtworkAnchors) -> String {
    ARTWORK_TOKEN
        .replace_all(summary, |caps: &Captures| {
            if caps[1].eq_ignore_ascii_case("a") {
                anchors.a().display_title().to_string()
            } else {
                anchors.b().display_title().to_string()
            }
        })
        .into_owned()
}

/// Extracts and substitutes in one go.
pub fn process_summary(text: &str, anchors: &ArtworkAnchors) -> String {
    substitute_artwork_tokens(&extract_comparison_summary(text), anchors)
}
