//! Emission errors.

use std::path::PathBuf;

/// Errors that can occur while emitting a pin table.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The output file could not be created or written.
    #[error("cannot write pin table {}", path.display())]
    FileAccess {
        /// The destination that failed.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The MCU family name is not one of the known schemas (strict mode only).
    #[error("unknown MCU family '{name}' (expected SAMD21 or SAMD51)")]
    UnknownFamily { name: String },

    /// Formatting into the output buffer failed.
    #[error("formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Result type alias for emission operations.
pub type Result<T> = std::result::Result<T, EmitError>;
