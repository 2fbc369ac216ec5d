//! Rendering results to the console and persisting them as TXT, JSON or CSV.

mod csv;
mod duration;
mod json;
mod txt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::batch::FetchResult;
use crate::units::SizeUnit;

pub use self::csv::{read_csv, write_csv};
pub use self::duration::{format_duration, parse_duration};
pub use self::json::write_json;
pub use self::txt::write_txt;

/// File format for saved results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Txt,
    Json,
    Csv,
}

impl ExportFormat {
    /// Exact (case-insensitive) lookup by name: `txt`, `json` or `csv`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "txt" => Some(ExportFormat::Txt),
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One saved row: the `{URL, Size, Duration}` shape shared by JSON and CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Size")]
    pub size: i64,
    #[serde(rename = "Duration")]
    pub duration: String,
}

impl From<&FetchResult> for ResultRecord {
    fn from(r: &FetchResult) -> Self {
        Self {
            url: r.url.clone(),
            size: r.size,
            duration: format_duration(r.duration),
        }
    }
}

/// Writes the console form of `results` to `w`.
pub fn write_console<W: Write>(w: &mut W, results: &[FetchResult], unit: SizeUnit) -> io::Result<()> {
    for r in results {
        if r.is_error() {
            writeln!(
                w,
                "URL: {} - Error downloading content - Time: {}",
                r.url,
                format_duration(r.duration)
            )?;
        } else {
            writeln!(
                w,
                "URL: {} - Size: {} {} - Time: {}",
                r.url,
                r.size,
                unit.label(),
                format_duration(r.duration)
            )?;
        }
    }
    Ok(())
}

/// Prints results to stdout.
pub fn display_results(results: &[FetchResult], unit: SizeUnit) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_console(&mut out, results, unit).context("write results to stdout")?;
    out.flush().context("flush stdout")?;
    Ok(())
}

/// Saves results to `path` in `format`, replacing any existing file.
pub fn save_results(
    results: &[FetchResult],
    unit: SizeUnit,
    format: ExportFormat,
    path: &Path,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    let written = match format {
        ExportFormat::Txt => write_txt(&mut w, results, unit),
        ExportFormat::Json => write_json(&mut w, results),
        ExportFormat::Csv => write_csv(&mut w, results),
    };
    written.with_context(|| format!("write {} results to {}", format, path.display()))?;
    w.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    tracing::info!(path = %path.display(), %format, rows = results.len(), "results saved");
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_results() -> Vec<FetchResult> {
    use std::time::Duration;
    vec![
        FetchResult {
            url: "https://example.com".to_string(),
            size: 1256,
            duration: Duration::from_millis(250),
            depth: 1,
        },
        FetchResult {
            url: "https://down.example/page".to_string(),
            size: crate::batch::ERROR_SIZE,
            duration: Duration::from_micros(1500),
            depth: 1,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_format_lookup() {
        assert_eq!(ExportFormat::from_name("JSON"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_name("csv"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_name("txt"), Some(ExportFormat::Txt));
        assert_eq!(ExportFormat::from_name("xml"), None);
    }

    #[test]
    fn console_lines() {
        let mut out = Vec::new();
        write_console(&mut out, &sample_results(), SizeUnit::KB).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "URL: https://example.com - Size: 1256 KB - Time: 250ms");
        assert_eq!(
            lines[1],
            "URL: https://down.example/page - Error downloading content - Time: 1.5ms"
        );
    }

    #[test]
    fn save_results_each_format() {
        let dir = tempfile::tempdir().unwrap();
        for format in [ExportFormat::Txt, ExportFormat::Json, ExportFormat::Csv] {
            let path = dir.path().join(format!("results.{}", format.extension()));
            save_results(&sample_results(), SizeUnit::Bytes, format, &path).unwrap();
            let text = std::fs::read_to_string(&path).unwrap();
            assert!(text.contains("https://example.com"), "{}: {}", format, text);
        }
    }

    #[test]
    fn save_results_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("results.txt");
        let err = save_results(&sample_results(), SizeUnit::Bytes, ExportFormat::Txt, &path)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("missing-dir"));
    }
}
