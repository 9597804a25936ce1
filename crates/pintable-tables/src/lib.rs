//! Pin table loading for the pintable generator.
//!
//! Reads the two CSV inputs of a pin table build into memory: the MCU-wide
//! capability table and the per-board name table.
//!
//! ## Modules
//!
//! - [`record`]: comma-separated record splitting
//! - [`capability`]: capability rows (`pin-af-table.csv`)
//! - [`board`]: board overrides (`pins.csv`)

pub mod board;
pub mod capability;
pub mod error;
pub mod record;

pub use board::{parse_overrides, BoardPins, OverrideEntry, DEFAULT_TYPE_TAG};
pub use capability::{parse_capabilities, CapabilityRow, PIN_PREFIX};
pub use error::{Result, TableError};
