use crate::utils::constants::CLEANED_SUFFIX;
use std::path::{Path, PathBuf};

/// Derive the default output path of a cleaned table: `<dir>/<stem>_limpio.csv`
pub fn cleaned_filename(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());

    let filename = format!("{}{}.csv", stem, CLEANED_SUFFIX);
    match input.parent() {
        Some(parent) => parent.join(filename),
        None => PathBuf::from(filename),
    }
}

/// Final path component of an image reference, lowercased.
///
/// Both `/` and `\` count as separators so references written on Windows
/// and on Unix hosts compare equal.
pub fn image_key(reference: &str) -> String {
    reference
        .trim()
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}
