//! The table generation pipeline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pintable_emit::{EmitOptions, McuFamily};
use pintable_tables::BoardPins;

use crate::config::PintableConfig;

/// Everything one generator run needs, after flags and config are merged.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub csv: Option<PathBuf>,
    pub board: Option<PathBuf>,
    pub table: Option<PathBuf>,
    pub mcu: Option<String>,
    pub strict_mcu: bool,
    pub board_cpu_flag: Option<String>,
}

impl GenerateRequest {
    /// Fill unset fields from a config file located in `base`.
    pub fn with_config(mut self, config: &PintableConfig, base: &Path) -> Self {
        let inputs = config.resolved_inputs(base);
        self.csv = self.csv.or(inputs.csv);
        self.board = self.board.or(inputs.board);
        self.table = self.table.or(inputs.table);
        self.mcu = self.mcu.or(inputs.mcu);
        self.strict_mcu = self.strict_mcu || config.emit.strict_mcu.unwrap_or(false);
        self.board_cpu_flag = self
            .board_cpu_flag
            .or_else(|| config.emit.board_cpu_flag.clone());
        self
    }

    fn emit_options(&self) -> EmitOptions {
        match &self.board_cpu_flag {
            Some(flag) => EmitOptions {
                board_cpu_flag: flag.clone(),
            },
            None => EmitOptions::default(),
        }
    }

    fn family(&self) -> Result<McuFamily> {
        if self.strict_mcu {
            Ok(McuFamily::resolve_strict(self.mcu.as_deref())?)
        } else {
            Ok(McuFamily::resolve(self.mcu.as_deref()))
        }
    }
}

/// Load whichever tables were given and write the output table if requested.
///
/// Each step only runs when its path is present; a request with no output
/// path loads its inputs and writes nothing.
pub fn run(request: &GenerateRequest) -> Result<()> {
    let family = match request.table {
        Some(_) => Some(request.family()?),
        None => None,
    };

    let rows = match &request.csv {
        Some(path) => pintable_tables::parse_capabilities(path)
            .with_context(|| format!("loading capability table {}", path.display()))?,
        None => Vec::new(),
    };

    let board = match &request.board {
        Some(path) => pintable_tables::parse_overrides(path)
            .with_context(|| format!("loading board table {}", path.display()))?,
        None => BoardPins::new(),
    };

    let (Some(table), Some(family)) = (&request.table, family) else {
        tracing::info!("no output table requested, nothing written");
        return Ok(());
    };

    pintable_emit::render(&rows, &board, family, table, &request.emit_options())
        .with_context(|| format!("generating {}", table.display()))?;

    println!(
        "Generated {family} pin table ({} pins, {} board names) → {}",
        rows.len(),
        board.len(),
        table.display()
    );
    Ok(())
}
