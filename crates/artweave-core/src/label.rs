//! Label formatting for diagram nodes.
//!
//! Labels are truncated first and wrapped second. Lengths are counted in
//! characters, not bytes.

/// Labels longer than this many characters are truncated.
pub const MAX_LABEL_CHARS: usize = 42;

/// Number of characters kept before the ellipsis when truncating.
pub const TRUNCATED_PREFIX_CHARS: usize = 39;

/// Suffix appended to truncated labels.
pub const ELLIPSIS: &str = "...";

/// Labels longer than this many characters get a single line break.
pub const WRAP_AT_CHARS: usize = 24;

/// Trims, truncates and wraps a node label.
///
/// A label of more than [`MAX_LABEL_CHARS`] characters is cut to its first
/// [`TRUNCATED_PREFIX_CHARS`] characters followed by [`ELLIPSIS`]. If the
/// result is longer than [`WRAP_AT_CHARS`], the last space at or before that
/// index becomes a `\n`; without such a space the label stays on one line.
///
/// # Examples
///
/// ```
/// use artweave_core::label::truncate_label;
///
/// assert_eq!(truncate_label("  Shared river setting  "), "Shared river setting");
/// assert_eq!(
///     truncate_label("Shared education under Charles Gleyre"),
///     "Shared education under\nCharles Gleyre"
/// );
/// ```
pub fn truncate_label(label: &str) -> String {
    let trimmed = label.trim();
    let truncated = if trimmed.chars().count() <= MAX_LABEL_CHARS {
        trimmed.to_string()
    } else {
        let prefix: String = trimmed.chars().take(TRUNCATED_PREFIX_CHARS).collect();
        format!("{prefix}{ELLIPSIS}")
    };
    wrap_label(&truncated)
}

fn wrap_label(label: &str) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= WRAP_AT_CHARS {
        return label.to_string();
    }

    match chars[..=WRAP_AT_CHARS].iter().rposition(|&c| c == ' ') {
        Some(index) => chars
            .iter()
            .enumerate()
            .map(|(i, &c)| if i == index { '\n' } else { c })
            .collect(),
        None => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_unchanged() {
        assert_eq!(truncate_label("Impressionism"), "Impressionism");
    }

    #[test]
    fn test_run_on_label_truncated_without_wrap() {
        let label = "x".repeat(100);
        let result = truncate_label(&label);

        assert_eq!(result.chars().count(), 42);
        assert!(result.ends_with("..."));
        assert!(!result.contains('\n'));
    }

    #[test]
    fn test_exactly_max_length_is_kept() {
        let label = "y".repeat(MAX_LABEL_CHARS);
        assert_eq!(truncate_label(&label), label);
    }

    #[test]
    fn test_wrap_breaks_at_last_space_before_limit() {
        // Space at index 24 itself is eligible.
        let label = format!("{} tail", "a".repeat(24));
        assert_eq!(truncate_label(&label), format!("{}\ntail", "a".repeat(24)));
    }

    #[test]
    fn test_wrap_inserts_single_break() {
        let result = truncate_label("one two three four five six seven eight");
        assert_eq!(result.matches('\n').count(), 1);
        assert_eq!(result, "one two three four five\nsix seven eight");
    }

    #[test]
    fn test_truncation_happens_before_wrapping() {
        let label = "The garden of the Tuileries on a winter afternoon in Paris";
        let result = truncate_label(label);

        assert_eq!(result.replace('\n', " ").chars().count(), 42);
        assert!(result.ends_with("..."));
        assert_eq!(result, "The garden of the\nTuileries on a winter...");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let label = "é".repeat(42);
        assert_eq!(truncate_label(&label), label);
    }
}
