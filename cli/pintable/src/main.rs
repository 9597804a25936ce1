//! pintable: generate the SAMD pin table source from CSV pin definitions.

mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use commands::generate::GenerateRequest;
use config::PintableConfig;

#[derive(Parser)]
#[command(
    name = "pintable",
    version,
    about = "Generate MCU-specific pin cap table file"
)]
struct Cli {
    /// Capability table (pin-af-table.csv)
    #[arg(short, long)]
    csv: Option<PathBuf>,
    /// Board pin table (pins.csv)
    #[arg(short, long)]
    board: Option<PathBuf>,
    /// Generated pin table file
    #[arg(short, long)]
    table: Option<PathBuf>,
    /// MCU family (SAMD21 or SAMD51)
    #[arg(short, long)]
    mcu: Option<String>,
    /// Config file supplying defaults for the flags above
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fail on an unknown MCU family instead of using the SAMD51 schema
    #[arg(long)]
    strict_mcu: bool,
    /// Macro guarding the pin dictionaries (default: MICROPY_HW_PIN_BOARD_CPU)
    #[arg(long)]
    board_cpu_flag: Option<String>,
    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut request = GenerateRequest {
        csv: cli.csv,
        board: cli.board,
        table: cli.table,
        mcu: cli.mcu,
        strict_mcu: cli.strict_mcu,
        board_cpu_flag: cli.board_cpu_flag,
    };

    if let Some(path) = &cli.config {
        let config = PintableConfig::load(path)?;
        request = request.with_config(&config, config_base(path));
    }

    commands::generate::run(&request)
}

/// Directory that relative config paths are resolved against.
fn config_base(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}
