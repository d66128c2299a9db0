//! Path helpers shared by the corpus, the naming rules and the tree.
//!
//! Every path inside the engine is a `/`-separated relative string. Host
//! separators are normalised once, when a path enters the domain.

use std::path::Path;

/// Canonical separator for every path the engine handles.
pub const SEPARATOR: char = '/';

/// Normalise a path to the canonical form.
///
/// - `\` becomes `/`
/// - repeated separators collapse
/// - leading `./` segments and trailing separators are dropped
///
/// A leading `/` is preserved so absolute paths can still be rejected.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with(SEPARATOR);

    let joined = unified
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// `true` for `/x`, `C:/x` and `C:\x`.
pub fn is_absolute(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with('\\') {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Directory segments of a path: every segment except the last.
pub fn directory_segments(path: &str) -> impl Iterator<Item = &str> {
    let dirs = path.rsplit_once(SEPARATOR).map(|(dirs, _)| dirs);
    dirs.into_iter()
        .flat_map(|dirs| dirs.split(SEPARATOR))
        .filter(|segment| !segment.is_empty())
}

/// Last segment of a path.
pub fn file_name(path: &str) -> &str {
    path.rsplit_once(SEPARATOR).map_or(path, |(_, name)| name)
}

/// Extension of a file name, without the dot. Dotfiles have none.
pub fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_string)
}
