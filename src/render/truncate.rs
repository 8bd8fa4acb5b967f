//! Display-string truncation.

/// Bound `text` to at most `max_chars` characters.
///
/// Strings within budget pass through unchanged; longer ones keep the first
/// `max_chars - 3` characters and end in `"..."`, so the result is exactly
/// `max_chars` long. Only the start of the string is preserved. Applying
/// the same budget twice changes nothing.
///
/// # Examples
///
/// ```
/// use etiqueta::render::truncate;
///
/// assert_eq!(truncate("short", 20), "short");
/// assert_eq!(truncate("abcdefghij", 8), "abcde...");
/// ```
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    // Degenerate budgets below the marker length still honor the bound.
    if out.chars().count() > max_chars {
        out = out.chars().take(max_chars).collect();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_budget_unchanged() {
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello", 50), "hello");
        assert_eq!(truncate("", 5), "");
    }

    #[test]
    fn test_over_budget_exact_length() {
        let out = truncate("abcdefghijklmnop", 10);
        assert_eq!(out, "abcdefg...");
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn test_idempotent() {
        let once = truncate("the quick brown fox jumps over the lazy dog", 20);
        let twice = truncate(&once, 20);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_multibyte_chars() {
        let out = truncate("ação de transporte rodoviário", 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_tiny_budgets() {
        assert_eq!(truncate("abcdef", 3), "...");
        assert_eq!(truncate("abcdef", 2), "..");
        assert_eq!(truncate("abcdef", 0), "");
    }
}
