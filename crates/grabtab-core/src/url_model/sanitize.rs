//! Linux-safe filename sanitization for save locations.

const NAME_MAX: usize = 255;

/// Sanitizes a requested download filename for use on Linux.
///
/// - Replaces NUL, `/`, `\`, whitespace and control characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing dots and underscores
/// - Limits length to 255 bytes (NAME_MAX)
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let unsafe_char = c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace();
        if unsafe_char {
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

/// Sanitized `name`, or `fallback` when nothing usable remains.
pub fn safe_filename(name: &str, fallback: &str) -> String {
    let sanitized = sanitize_filename(name);
    if sanitized.is_empty() {
        fallback.to_string()
    } else {
        sanitized
    }
}
