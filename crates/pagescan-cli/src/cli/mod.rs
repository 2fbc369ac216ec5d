//! CLI for pagescan.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use pagescan_core::config::{self, PagescanConfig, ScanConfig};
use pagescan_core::input;
use pagescan_core::links::NormalizeMode;
use pagescan_core::report::ExportFormat;
use pagescan_core::units::SizeUnit;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use commands::run_scan;

fn parse_size_unit(s: &str) -> Result<SizeUnit, String> {
    s.parse::<SizeUnit>().map_err(|e| e.to_string())
}

/// Measure page size and load time for every URL in a file.
#[derive(Debug, Parser)]
#[command(name = "pagescan")]
#[command(about = "pagescan: concurrent page size and latency checker", long_about = None)]
pub struct Cli {
    /// File with URLs (relative or absolute path).
    #[arg(long, value_name = "FILE")]
    pub path: PathBuf,

    /// Unit for content size: bytes, kb, mb or chars.
    #[arg(long, default_value = "bytes", value_parser = parse_size_unit)]
    pub size: SizeUnit,

    /// Save results next to the URL file (results.<ext>).
    #[arg(
        long,
        default_value_t = false,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = clap::ArgAction::Set
    )]
    pub save: bool,

    /// Link depth: 1 = listed URLs only, N follows links found on pages up to N levels.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub depth: u32,

    /// Export format for --save: txt, json or csv (unknown values fall back to txt).
    #[arg(long, default_value = "txt")]
    pub export: String,

    /// Upper bound on total fetches when --depth > 1 (default from config).
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_fetches: Option<u64>,

    /// Per-request timeout in seconds (default from config).
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Collapse every URL to https://<host>.
    #[arg(long)]
    pub host_only: bool,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let scan = cli.scan_config(&cfg);
        tracing::debug!("scan config: {:?}", scan);
        run_scan(&cli.path, &scan).await
    }

    /// Layers CLI flags over the file config.
    pub fn scan_config(&self, cfg: &PagescanConfig) -> ScanConfig {
        let export = resolve_export(&self.export, &mut std::io::stderr());
        let normalize = if self.host_only {
            NormalizeMode::HostOnly
        } else {
            cfg.normalize
        };
        let max_fetches = self
            .max_fetches
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
            .unwrap_or(cfg.max_fetches);

        ScanConfig {
            size_unit: self.size,
            save: self.save,
            depth: self.depth,
            export,
            output_path: input::output_path_for(&self.path, export),
            max_fetches,
            normalize,
            request_timeout: Duration::from_secs(self.timeout.unwrap_or(cfg.request_timeout_secs)),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// Unknown export names fall back to TXT with one warning on `warn_out`.
fn resolve_export(name: &str, warn_out: &mut impl Write) -> ExportFormat {
    ExportFormat::from_name(name).unwrap_or_else(|| {
        let _ = writeln!(warn_out, "warning: unsupported export type '{}', using txt", name);
        ExportFormat::Txt
    })
}

/// Loads the config file. Without a usable config dir, defaults are used; a
/// malformed file is an error.
fn load_config() -> Result<PagescanConfig> {
    match config::config_path() {
        Ok(path) => config::load_or_init_at(&path)
            .with_context(|| format!("load config {}", path.display())),
        Err(e) => {
            tracing::warn!("config dir unavailable, using defaults: {:#}", e);
            Ok(PagescanConfig::default())
        }
    }
}
