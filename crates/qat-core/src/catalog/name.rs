//! Asset name validation.
//!
//! Names come from the remote feed and end up joined onto local paths, so
//! they must be a single plain filename component.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Returns why `name` is not usable as a local filename, or None if it is.
///
/// Rejects empty names, `.`/`..`, path separators (`/` and `\`), NUL and
/// other control characters, and names longer than 255 bytes.
pub fn asset_name_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name is empty");
    }
    if name == "." || name == ".." {
        return Some("name is a relative directory reference");
    }
    if name.len() > NAME_MAX {
        return Some("name is longer than 255 bytes");
    }
    if name.contains('/') || name.contains('\\') {
        return Some("name contains a path separator");
    }
    if name.chars().any(|c| c == '\0' || c.is_control()) {
        return Some("name contains a control character");
    }
    None
}

pub fn is_safe_asset_name(name: &str) -> bool {
    asset_name_problem(name).is_none()
}
