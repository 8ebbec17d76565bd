//! Formatting utilities

/// Format an age in whole days ("1 day", "12 days")
pub fn days(count: i64) -> String {
    if count == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", count)
    }
}

/// Pad `s` on the right to `width` columns.
///
/// Width is measured in UTF-16 code units so that emoji labels line up the
/// same way the published gist always has (a surrogate pair counts as 2).
pub fn pad_end(s: &str, width: usize) -> String {
    let len = s.encode_utf16().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

/// Pad `s` on the left to `width` columns, UTF-16 measured like [`pad_end`].
pub fn pad_start(s: &str, width: usize) -> String {
    let len = s.encode_utf16().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - len), s)
    }
}

/// Truncate a string to max length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
