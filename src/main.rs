mod event;
mod markup;
mod model;
mod navigator;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use log::LevelFilter;
use model::Catalog;
use navigator::ExitReason;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "vps-setup-wizard",
    about = "Step-by-step setup guide for the VPS deployment pipeline"
)]
struct Args {
    /// YAML pages file to show instead of the built-in guide
    pages: Option<PathBuf>,

    /// Write a log to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<()> {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let log_file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(level, log_config, log_file).context("Failed to initialize logging")?;
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Catalog::builtin().context("Built-in pages are invalid");
    };

    let yaml_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Catalog::from_yaml_str(&yaml_content)
        .with_context(|| format!("Invalid pages file {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path, args.log_level)?;
    }

    let catalog = load_catalog(args.pages.as_deref())?;
    log::info!(
        "loaded {} pages from {}",
        catalog.len(),
        args.pages
            .as_deref()
            .map_or_else(|| "built-in guide".to_string(), |p| p.display().to_string())
    );

    let reason = tui::run_tui(&catalog)?;

    // The terminal may already be gone after a hangup.
    if let Err(e) = print_farewell(reason) {
        log::warn!("could not print farewell: {}", e);
    }

    Ok(())
}

fn print_farewell(reason: ExitReason) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "\n{}", reason.farewell().yellow())?;
    if let Some(hint) = reason.restart_hint() {
        writeln!(out, "{}", hint.dim())?;
    }
    writeln!(out)?;
    out.flush()
}
