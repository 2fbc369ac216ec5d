//! Breadth-first link walk for `max_depth > 1`.
//!
//! Each depth level is one flat fan-out. A URL is fetched at most once per
//! run (visited set, seeds included). Every seed is always fetched; the
//! `max_fetches` budget only limits how many discovered links follow.

use std::collections::HashSet;

use super::{flat, BatchOptions, FetchResult};
use crate::fetch::Fetcher;
use crate::links::LinkExtractor;

pub(super) fn walk(fetcher: &dyn Fetcher, seeds: &[String], opts: &BatchOptions) -> Vec<FetchResult> {
    let extractor = LinkExtractor::for_page_body(opts.normalize);
    let mut visited: HashSet<String> = HashSet::new();
    let mut results = Vec::new();
    let mut fetched = 0usize;

    let mut frontier: Vec<String> = seeds
        .iter()
        .filter(|url| visited.insert((*url).clone()))
        .cloned()
        .collect();
    if frontier.len() < seeds.len() {
        tracing::debug!(
            skipped = seeds.len() - frontier.len(),
            "duplicate seed URLs skipped in depth mode"
        );
    }

    let mut depth = 1u32;
    while depth <= opts.max_depth && !frontier.is_empty() {
        let remaining = opts.max_fetches.saturating_sub(fetched);
        if depth > 1 && frontier.len() > remaining {
            tracing::warn!(
                depth,
                dropped = frontier.len() - remaining,
                max_fetches = opts.max_fetches,
                "fetch cap reached, dropping links"
            );
            frontier.truncate(remaining);
        }
        if frontier.is_empty() {
            break;
        }

        let keep_bodies = depth < opts.max_depth;
        let level = flat::fetch_all(fetcher, &frontier, opts.unit, depth, keep_bodies);
        fetched += frontier.len();

        let mut next = Vec::new();
        for (result, body) in level {
            if let Some(body) = body {
                let text = String::from_utf8_lossy(&body);
                for link in extractor.extract(&text) {
                    if visited.insert(link.clone()) {
                        next.push(link);
                    }
                }
            }
            results.push(result);
        }

        tracing::info!(
            depth,
            fetched = frontier.len(),
            discovered = next.len(),
            "depth level finished"
        );
        frontier = next;
        depth += 1;
    }

    results
}
