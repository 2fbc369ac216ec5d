//! `pagescan --path <file>`: load URLs, fetch them all, print and save results.

use anyhow::{Context, Result};
use pagescan_core::batch::{process_batch, BatchOptions};
use pagescan_core::config::ScanConfig;
use pagescan_core::fetch::{CurlFetcher, FetchOptions};
use pagescan_core::{input, report};
use std::path::Path;

pub async fn run_scan(input_path: &Path, scan: &ScanConfig) -> Result<()> {
    let urls = input::load_urls(input_path, scan.normalize).context("process URL file")?;
    if urls.is_empty() {
        anyhow::bail!("no valid URLs found in {}", input_path.display());
    }
    println!("URL list processed: {} URL(s).", urls.len());
    tracing::info!(count = urls.len(), depth = scan.depth, "starting batch");

    let fetcher = CurlFetcher::new(FetchOptions::from(scan));
    let opts = BatchOptions::from(scan);
    let results = tokio::task::spawn_blocking(move || process_batch(&fetcher, &urls, &opts))
        .await
        .context("batch task join")?;
    println!("Site processing finished.");

    report::display_results(&results, scan.size_unit)?;

    if scan.save {
        // A failed save is reported but doesn't change the exit status.
        match report::save_results(&results, scan.size_unit, scan.export, &scan.output_path) {
            Ok(()) => println!("Results saved to {}", scan.output_path.display()),
            Err(e) => {
                tracing::error!("saving results failed: {:#}", e);
                eprintln!("pagescan: failed to save results: {:#}", e);
            }
        }
    }

    Ok(())
}
