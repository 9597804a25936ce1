//! Table loading errors.

use std::path::PathBuf;

/// Errors that can occur while loading pin tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The table file could not be opened or read.
    #[error("cannot read pin table {}", path.display())]
    FileAccess {
        /// The table that failed to load.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Read a whole table into memory, tagging failures with the path.
pub(crate) fn read_table(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| TableError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}
