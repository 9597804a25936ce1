//! Pin table emission for the pintable generator.
//!
//! Turns loaded capability rows and board overrides into the C source that
//! the firmware build compiles into its pin objects and pin dictionaries.
//!
//! ## Modules
//!
//! - [`family`]: MCU family and descriptor schema selection
//! - [`code`]: capability code serialization
//! - [`render`]: section generation
//! - [`output`]: atomic replacement of the generated file

pub mod code;
pub mod error;
pub mod family;
pub mod output;
pub mod render;

use std::path::Path;

use pintable_tables::{BoardPins, CapabilityRow};

pub use error::{EmitError, Result};
pub use family::McuFamily;
pub use render::{render_table, EmitOptions};

/// Render the pin table and replace the file at `output_path` with it.
pub fn render(
    rows: &[CapabilityRow],
    board: &BoardPins,
    family: McuFamily,
    output_path: &Path,
    options: &EmitOptions,
) -> Result<()> {
    let source = render_table(rows, board, family, options)?;
    output::write_atomic(output_path, &source)?;
    tracing::info!(path = %output_path.display(), bytes = source.len(), "wrote pin table");
    Ok(())
}
