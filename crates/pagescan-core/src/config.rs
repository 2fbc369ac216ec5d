use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::links::NormalizeMode;
use crate::report::ExportFormat;
use crate::units::SizeUnit;

/// Global configuration loaded from `~/.config/pagescan/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagescanConfig {
    /// Total timeout for one GET, in seconds.
    pub request_timeout_secs: u64,
    /// Connect timeout for one GET, in seconds.
    pub connect_timeout_secs: u64,
    /// Hard cap on total fetches in one depth-mode run.
    pub max_fetches: usize,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Link normalization: "full" (default) or "host_only".
    #[serde(default)]
    pub normalize: NormalizeMode,
}

fn default_user_agent() -> String {
    format!("pagescan/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for PagescanConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_fetches: 500,
            user_agent: default_user_agent(),
            normalize: NormalizeMode::Full,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagescan")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

impl PagescanConfig {
    /// Rejects values that would disable a timeout or empty a depth-mode run.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be at least 1");
        }
        if self.connect_timeout_secs == 0 {
            bail!("connect_timeout_secs must be at least 1");
        }
        if self.max_fetches == 0 {
            bail!("max_fetches must be at least 1");
        }
        Ok(())
    }
}

/// Load configuration from `path`, creating a default file if none exists.
pub fn load_or_init_at(path: &Path) -> Result<PagescanConfig> {
    if !path.exists() {
        let default_cfg = PagescanConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: PagescanConfig = toml::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Per-run settings, built from CLI flags layered over `PagescanConfig`.
/// Passed explicitly to the coordinator and the writers.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub size_unit: SizeUnit,
    pub save: bool,
    /// 1 = seed URLs only.
    pub depth: u32,
    pub export: ExportFormat,
    /// Where results are written when `save` is set.
    pub output_path: PathBuf,
    pub max_fetches: usize,
    pub normalize: NormalizeMode,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PagescanConfig::default();
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.connect_timeout_secs, 10);
        assert_eq!(cfg.max_fetches, 500);
        assert_eq!(cfg.normalize, NormalizeMode::Full);
        assert!(cfg.user_agent.starts_with("pagescan/"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PagescanConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PagescanConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.request_timeout_secs, cfg.request_timeout_secs);
        assert_eq!(parsed.max_fetches, cfg.max_fetches);
        assert_eq!(parsed.user_agent, cfg.user_agent);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            request_timeout_secs = 5
            connect_timeout_secs = 2
            max_fetches = 50
            normalize = "host_only"
        "#;
        let cfg: PagescanConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.request_timeout_secs, 5);
        assert_eq!(cfg.connect_timeout_secs, 2);
        assert_eq!(cfg.max_fetches, 50);
        assert_eq!(cfg.normalize, NormalizeMode::HostOnly);
        assert!(cfg.user_agent.starts_with("pagescan/"));
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.max_fetches, 500);

        fs::write(&path, "request_timeout_secs = 7\nconnect_timeout_secs = 1\nmax_fetches = 3\n")
            .unwrap();
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg.request_timeout_secs, 7);
        assert_eq!(cfg.max_fetches, 3);
    }

    #[test]
    fn load_rejects_zero_timeout_and_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        for (body, field) in [
            ("request_timeout_secs = 0\nconnect_timeout_secs = 1\nmax_fetches = 3\n", "request_timeout_secs"),
            ("request_timeout_secs = 5\nconnect_timeout_secs = 0\nmax_fetches = 3\n", "connect_timeout_secs"),
            ("request_timeout_secs = 5\nconnect_timeout_secs = 1\nmax_fetches = 0\n", "max_fetches"),
        ] {
            fs::write(&path, body).unwrap();
            let err = load_or_init_at(&path).unwrap_err();
            assert!(err.to_string().contains(field), "{}: {}", field, err);
        }
    }
}
