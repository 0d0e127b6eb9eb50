//! Linux-safe filename sanitization for asset names taken from URLs.

/// Linux NAME_MAX, in bytes.
const NAME_MAX: usize = 255;

fn is_unsafe(c: char) -> bool {
    c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace()
}

/// Sanitizes a candidate filename for safe use in the media directory.
///
/// - Replaces NUL, `/`, `\`, whitespace and control characters with `_`, one per run
/// - Trims leading/trailing dots and underscores (no hidden files, which the
///   acquirer reserves for its staging files)
/// - Truncates to 255 bytes on a char boundary
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if is_unsafe(c) {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut take = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
