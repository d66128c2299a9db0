//! Binary-vs-text classification by file extension.

use kiln_core::domain::entities::common;

/// Extensions whose files are copied byte-for-byte and never rendered.
///
/// `svg` is absent: SVG is text and may carry template tags.
pub const BINARY_EXTENSIONS: &[&str] = &[
    // images
    "png", "jpg", "jpeg", "gif", "webp", "ico", "bmp", "tiff", "avif", "svgz",
    // fonts
    "woff", "woff2", "ttf", "otf", "eot",
    // audio / video
    "mp3", "wav", "ogg", "flac", "mp4", "webm", "mov", "avi",
    // archives
    "zip", "tar", "gz", "tgz", "bz2", "7z", "rar",
    // documents
    "pdf",
];

/// Whether `path` names a binary asset. Case-insensitive.
pub fn is_binary_path(path: &str) -> bool {
    common::extension(common::file_name(path)).is_some_and(|ext| {
        BINARY_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(&ext))
    })
}
