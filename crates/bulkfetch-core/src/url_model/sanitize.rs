//! Linux-safe file names.

use crate::task::TEMP_SUFFIX;

/// Longest file name Linux accepts (NAME_MAX, bytes).
const NAME_MAX: usize = 255;

/// Longest final name that still leaves room for the in-progress suffix.
const MAX_NAME_BYTES: usize = NAME_MAX - TEMP_SUFFIX.len();

fn is_unsafe(c: char) -> bool {
    matches!(c, '\0' | '/' | '\\' | ' ' | '\t') || c.is_control()
}

/// Trims surrounding whitespace, replaces path separators, NUL, inner
/// whitespace and control characters with a single `_`, trims leading and
/// trailing dots, and truncates on a char boundary so that the name plus the
/// temp suffix fits NAME_MAX.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if is_unsafe(c) {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim_matches('.');
    let mut end = trimmed.len().min(MAX_NAME_BYTES);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}
