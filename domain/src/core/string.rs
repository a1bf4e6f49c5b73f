//! String utilities for the domain layer.

/// Separator between the segments of a fully-qualified tool path
pub const PATH_SEPARATOR: char = '_';

/// Normalize a tool display name into its path form.
///
/// Spaces become `_`, so `"get pod"` is addressed as `get_pod`.
pub fn normalize_tool_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// Join a parent path and a child display name into a fully-qualified path
pub fn join_tool_path(parent: &str, child_name: &str) -> String {
    format!("{}{}{}", parent, PATH_SEPARATOR, normalize_tool_name(child_name))
}

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
