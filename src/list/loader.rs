//! List file loader.
//!
//! Reads a list file and hands its content to a parse function. A missing
//! file is reported as `Ok(None)` so the caller can tell "nothing on disk"
//! apart from a failed read.

use std::io::ErrorKind;
use std::path::Path;

use crate::models::list::ListSnapshot;
use crate::{GateError, Result};

/// Split `content` on `'\n'` into entries, exactly as written.
///
/// No trimming, case folding, or de-duplication: a trailing newline yields a
/// trailing empty entry and CRLF files keep their `'\r'`.
///
/// # Errors
///
/// Never fails; the `Result` matches the parse-function signature expected
/// by [`ListStore::spawn`](crate::list::store::ListStore::spawn).
pub fn parse_lines(content: &str) -> Result<ListSnapshot> {
    Ok(content.split('\n').map(str::to_owned).collect())
}

/// Loads list files from disk.
pub struct ListLoader;

impl ListLoader {
    /// Read `path` and parse it with `parse`.
    ///
    /// # Behaviour
    ///
    /// - **Missing file**: `Ok(None)`.
    /// - **Unreadable file** (permissions, invalid UTF-8, is a directory):
    ///   `GateError::Io`.
    /// - **Parse failure**: whatever `parse` returned.
    ///
    /// # Errors
    ///
    /// Returns an error for any read failure other than not-found, or if
    /// `parse` rejects the content.
    pub async fn load<P>(path: &Path, parse: &P) -> Result<Option<ListSnapshot>>
    where
        P: Fn(&str) -> Result<ListSnapshot> + ?Sized,
    {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(GateError::Io(format!(
                    "failed to read list file '{}': {err}",
                    path.display()
                )))
            }
        };

        parse(&raw).map(Some)
    }
}
