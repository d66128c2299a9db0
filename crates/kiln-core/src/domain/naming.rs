//! Output-name rules that need no configuration.
//!
//! The name transformer applies these before (optionally) rendering the path
//! itself; see `application::services::name_transformer`.

use crate::domain::{entities::common, markers};

/// Suffix marking a corpus entry as template source.
pub const TEMPLATE_SUFFIX: &str = ".hbs";

/// Leading basename character standing in for a `.` (`_gitignore` → `.gitignore`).
pub const HIDDEN_FILE_MARKER: char = '_';

/// Opening delimiter of the template language.
pub const OPEN_DELIMITER: &str = "{{";

/// Remove the template-source suffix, if present.
pub fn strip_template_suffix(path: &str) -> &str {
    path.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(path)
}

/// Turn a leading `_` on the basename into a `.`.
pub fn convert_hidden_file(path: &str) -> String {
    let name = common::file_name(path);
    let Some(rest) = name.strip_prefix(HIDDEN_FILE_MARKER) else {
        return path.to_string();
    };
    let parent = &path[..path.len() - name.len()];
    format!("{parent}.{rest}")
}

/// Whether the path needs a pass through the renderer.
pub fn has_delimiters(path: &str) -> bool {
    path.contains(OPEN_DELIMITER)
}

/// Configuration-independent part of the name transform, in order:
/// marker directories dropped, template suffix stripped, dotfile converted.
pub fn prepare(path: &str) -> String {
    let without_markers = markers::strip_markers(path);
    convert_hidden_file(strip_template_suffix(&without_markers))
}
