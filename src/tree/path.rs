//! Path normalization for backup file paths.
//!
//! Paths arrive from both Windows and Unix agents, so backslashes are treated
//! as separators, a leading drive designator (`C:`) is dropped and empty
//! segments are discarded.

/// Replace every backslash with a forward slash.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Split a separator-normalized path into its non-empty segments.
pub fn segments(normalized: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
    if parts.first().is_some_and(|first| is_drive(first)) {
        parts.remove(0);
    }
    parts
}

/// Canonical tree path for a list of segments: `/a/b/c`.
pub fn from_segments(parts: &[&str]) -> String {
    parts.iter().fold(String::from("/"), |acc, part| join(&acc, part))
}

/// Join a child name onto a parent path with exactly one separator between them.
pub fn join(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}

fn is_drive(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
