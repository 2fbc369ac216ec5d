//! One worker thread per URL, each writing only its own result slot.

use std::thread;
use std::time::Instant;

use super::{measure, FetchResult, ERROR_SIZE};
use crate::fetch::Fetcher;
use crate::units::SizeUnit;

type Slot = Option<(FetchResult, Option<Vec<u8>>)>;

/// Fetches all `urls` concurrently (unbounded fan-out) and returns one entry
/// per input URL, in input order. Bodies are returned only when `keep_bodies`.
pub(super) fn fetch_all(
    fetcher: &dyn Fetcher,
    urls: &[String],
    unit: SizeUnit,
    depth: u32,
    keep_bodies: bool,
) -> Vec<(FetchResult, Option<Vec<u8>>)> {
    let started = Instant::now();
    let mut slots: Vec<Slot> = urls.iter().map(|_| None).collect();

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(urls.len());
        for (index, (slot, url)) in slots.iter_mut().zip(urls).enumerate() {
            let work = move || {
                let (result, body) = measure(fetcher, url, unit, depth);
                *slot = Some((result, body.filter(|_| keep_bodies)));
            };
            match thread::Builder::new()
                .name(format!("fetch-{}", index))
                .spawn_scoped(scope, work)
            {
                Ok(handle) => handles.push((index, handle)),
                Err(e) => {
                    // The closure was consumed by the failed spawn; record the URL as failed.
                    tracing::warn!(url = %url, error = %e, "could not spawn fetch worker");
                }
            }
        }
        for (index, handle) in handles {
            if handle.join().is_err() {
                tracing::error!(url = %urls[index], "fetch worker panicked");
            }
        }
    });

    // Slots left empty belong to workers that never ran or panicked.
    slots
        .into_iter()
        .zip(urls)
        .map(|(slot, url)| {
            slot.unwrap_or_else(|| {
                let result = FetchResult {
                    url: url.clone(),
                    size: ERROR_SIZE,
                    duration: started.elapsed(),
                    depth,
                };
                (result, None)
            })
        })
        .collect()
}
