//! Syntactic checks on requested package paths.

/// Returns true when `path` is a usable package path.
///
/// The path is split on `/` and every segment must be non-empty and consist of
/// ASCII letters, digits, `_`, `-` or `.`. Segments made only of `.` or `..` are
/// rejected even though their characters are allowed, so traversal-looking
/// paths never reach a template.
pub fn is_valid_package_path(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    path.split('/').all(is_valid_segment)
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
}
