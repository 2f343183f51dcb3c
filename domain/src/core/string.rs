//! String utilities for the domain layer.

/// Truncate a string for log output, appending an ellipsis (UTF-8 safe)
///
/// `max_len` is a byte budget; the cut always lands on a char boundary.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
