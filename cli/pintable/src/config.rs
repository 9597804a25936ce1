//! `pintable.toml` configuration parsing.
//!
//! A config file lets a port's build keep its table paths and emit settings in
//! one place. Command-line flags override any value set here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// The top-level config file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PintableConfig {
    /// Input and output locations.
    #[serde(default)]
    pub inputs: InputsConfig,
    /// Emission settings.
    #[serde(default)]
    pub emit: EmitConfig,
}

/// Table locations and MCU family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InputsConfig {
    /// Capability table (`pin-af-table.csv`).
    #[serde(default)]
    pub csv: Option<PathBuf>,
    /// Board pin table (`pins.csv`).
    #[serde(default)]
    pub board: Option<PathBuf>,
    /// Generated table output.
    #[serde(default)]
    pub table: Option<PathBuf>,
    /// MCU family name (`SAMD21` or `SAMD51`).
    #[serde(default)]
    pub mcu: Option<String>,
}

/// Emission settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmitConfig {
    /// Macro wrapping the pin dictionaries.
    #[serde(default)]
    pub board_cpu_flag: Option<String>,
    /// Reject unknown MCU family names instead of falling back.
    #[serde(default)]
    pub strict_mcu: Option<bool>,
}

impl PintableConfig {
    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a config from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing pintable.toml")
    }

    /// Input paths with relative entries resolved against `base`.
    pub fn resolved_inputs(&self, base: &Path) -> InputsConfig {
        let resolve = |path: &Option<PathBuf>| path.as_ref().map(|p| base.join(p));
        InputsConfig {
            csv: resolve(&self.inputs.csv),
            board: resolve(&self.inputs.board),
            table: resolve(&self.inputs.table),
            mcu: self.inputs.mcu.clone(),
        }
    }
}
