//! Reads the newline-delimited list of product page URLs.

use std::path::Path;

use crate::error::TargetsError;

/// Loads target URLs from `path`, in file order.
///
/// Lines are trimmed and blank lines skipped. Duplicates are kept.
///
/// # Errors
///
/// - [`TargetsError::NotFound`] if the file does not exist.
/// - [`TargetsError::Io`] for any other read failure.
pub async fn load_targets(path: &Path) -> Result<Vec<String>, TargetsError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TargetsError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            TargetsError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    Ok(parse_targets(&contents))
}

/// Splits a target list into trimmed, non-blank lines.
#[must_use]
pub fn parse_targets(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
