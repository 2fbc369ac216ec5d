//! Batch coordinator: concurrent fetch-and-measure over a URL list.
//!
//! Flat mode (depth 1) fans out one worker per URL and returns results in
//! input order. Depth mode walks discovered links breadth-first, one fan-out
//! per depth level, bounded by a visited set and a total fetch cap.

mod depth;
mod flat;

use std::time::{Duration, Instant};

use crate::config::ScanConfig;
use crate::fetch::Fetcher;
use crate::links::NormalizeMode;
use crate::units::SizeUnit;

/// Size value recorded for a failed fetch.
pub const ERROR_SIZE: i64 = -1;

/// Outcome of fetching one URL. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub url: String,
    /// Body size in the requested unit, or `ERROR_SIZE`.
    pub size: i64,
    /// Wall-clock time from just before the request to its completion or failure.
    pub duration: Duration,
    /// 1 for seed URLs.
    pub depth: u32,
}

impl FetchResult {
    pub fn is_error(&self) -> bool {
        self.size == ERROR_SIZE
    }
}

/// Parameters for one `process_batch` run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub unit: SizeUnit,
    /// 1 = flat mode.
    pub max_depth: u32,
    /// Cap on total fetches across all depth levels (depth mode only).
    pub max_fetches: usize,
    /// Normalization applied to links discovered in page bodies.
    pub normalize: NormalizeMode,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            unit: SizeUnit::Bytes,
            max_depth: 1,
            max_fetches: 500,
            normalize: NormalizeMode::Full,
        }
    }
}

impl From<&ScanConfig> for BatchOptions {
    fn from(cfg: &ScanConfig) -> Self {
        Self {
            unit: cfg.size_unit,
            max_depth: cfg.depth,
            max_fetches: cfg.max_fetches,
            normalize: cfg.normalize,
        }
    }
}

/// Fetches every URL concurrently and returns one result per fetch.
///
/// In flat mode the output has exactly `urls.len()` entries and
/// `results[i].url == urls[i]`. In depth mode results are grouped by
/// ascending depth; within a level they follow discovery order.
/// A failed fetch never aborts the batch; it yields a result with `ERROR_SIZE`.
pub fn process_batch(
    fetcher: &dyn Fetcher,
    urls: &[String],
    opts: &BatchOptions,
) -> Vec<FetchResult> {
    let started = Instant::now();
    let results = if opts.max_depth <= 1 {
        flat::fetch_all(fetcher, urls, opts.unit, 1, false)
            .into_iter()
            .map(|(result, _)| result)
            .collect()
    } else {
        depth::walk(fetcher, urls, opts)
    };
    let failed = results.iter().filter(|r| r.is_error()).count();
    tracing::info!(
        urls = urls.len(),
        results = results.len(),
        failed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "batch finished"
    );
    results
}

/// Fetches one URL and measures it. Returns the body on success so callers
/// can scan it for links.
pub fn measure(
    fetcher: &dyn Fetcher,
    url: &str,
    unit: SizeUnit,
    depth: u32,
) -> (FetchResult, Option<Vec<u8>>) {
    let start = Instant::now();
    let outcome = fetcher.fetch(url);
    let duration = start.elapsed();

    match outcome {
        Ok(body) => {
            let result = FetchResult {
                url: url.to_string(),
                size: unit.scale(body.len()),
                duration,
                depth,
            };
            (result, Some(body))
        }
        Err(e) => {
            tracing::warn!(url, depth, timeout = e.is_timeout(), error = %e, "fetch failed");
            let result = FetchResult {
                url: url.to_string(),
                size: ERROR_SIZE,
                duration,
                depth,
            };
            (result, None)
        }
    }
}
