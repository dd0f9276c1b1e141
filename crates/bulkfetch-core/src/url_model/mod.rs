//! URL modeling and destination file naming.

mod path;
mod sanitize;

pub use path::last_path_segment;
pub use sanitize::sanitize_file_name;

/// Derives the destination file name for `url`: its last path segment,
/// sanitized for Linux. `None` when nothing usable remains.
pub fn derive_file_name(url: &str) -> Option<String> {
    let name = sanitize_file_name(&last_path_segment(url)?);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
