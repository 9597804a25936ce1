//! MCU family selection.
//!
//! The family decides the descriptor schema: SAMD21 pins carry a single ADC
//! channel, SAMD51 pins carry two. Any name other than `SAMD21` selects the
//! SAMD51 schema unless the caller asks for strict matching.

use std::fmt;
use std::str::FromStr;

use crate::error::{EmitError, Result};

/// The two descriptor schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McuFamily {
    /// Single ADC channel per pin.
    Samd21,
    /// Two ADC channels per pin.
    Samd51,
}

impl McuFamily {
    /// Schema used when the family name is absent or unrecognized.
    pub const DEFAULT: McuFamily = McuFamily::Samd51;

    pub fn name(self) -> &'static str {
        match self {
            McuFamily::Samd21 => "SAMD21",
            McuFamily::Samd51 => "SAMD51",
        }
    }

    /// Number of ADC code slots in each descriptor.
    pub fn adc_channels(self) -> usize {
        match self {
            McuFamily::Samd21 => 1,
            McuFamily::Samd51 => 2,
        }
    }

    /// Storage class of the emitted descriptor objects.
    pub fn storage_class(self) -> &'static str {
        match self {
            McuFamily::Samd21 => "static const",
            McuFamily::Samd51 => "const",
        }
    }

    /// Resolve a family name, falling back to [`McuFamily::DEFAULT`].
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    family = raw,
                    fallback = Self::DEFAULT.name(),
                    "unrecognized MCU family, using the dual-ADC schema"
                );
                Self::DEFAULT
            }),
            None => {
                tracing::debug!(fallback = Self::DEFAULT.name(), "no MCU family given");
                Self::DEFAULT
            }
        }
    }

    /// Resolve a family name, rejecting absent or unknown names.
    pub fn resolve_strict(name: Option<&str>) -> Result<Self> {
        match name {
            Some(raw) => raw.parse(),
            None => Err(EmitError::UnknownFamily {
                name: String::new(),
            }),
        }
    }
}

impl fmt::Display for McuFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for McuFamily {
    type Err = EmitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SAMD21" => Ok(McuFamily::Samd21),
            "SAMD51" => Ok(McuFamily::Samd51),
            other => Err(EmitError::UnknownFamily {
                name: other.to_string(),
            }),
        }
    }
}
