//! Query-string accumulation for request paths.

/// Append `key=value` to `path`.
///
/// Returns `path` unchanged when `value` is `None` or empty. The separator is
/// `?` if `path` has no `?` yet, `&` otherwise. Neither `key` nor `value` is
/// percent-encoded; callers pre-encode reserved characters.
pub fn add_query_param(path: &str, key: &str, value: Option<&str>) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return path.to_string();
    };
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{key}={value}")
}
