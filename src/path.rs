//! Output path derivation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension written for every derived output path.
pub const WEBP_EXTENSION: &str = "webp";

/// Resolve where the converted image is written.
///
/// A non-empty `explicit` path is returned as is. Otherwise the output sits
/// next to `input`, with its last extension replaced by `.webp`.
///
/// ```rust
/// use std::path::{Path, PathBuf};
/// use webpify::resolve_output_path;
///
/// assert_eq!(resolve_output_path(Path::new("photos/img.PNG"), None), PathBuf::from("photos/img.webp"));
/// assert_eq!(
///     resolve_output_path(Path::new("x.png"), Some(Path::new("out/custom.webp"))),
///     PathBuf::from("out/custom.webp"),
/// );
/// ```
pub fn resolve_output_path(input: &Path, explicit: Option<&Path>) -> PathBuf {
    if let Some(explicit) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return explicit.to_path_buf();
    }

    let mut name: OsString = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(WEBP_EXTENSION);

    match input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
