//! Link extraction and normalization.
//!
//! Scans text for URL-like tokens and rewrites each one to a canonical
//! absolute HTTPS form. Tokens that don't parse, or parse without a host,
//! are dropped silently: most tokens in a scanned document are not URLs.

mod normalize;
mod tokenize;

pub use normalize::{normalize_link, NormalizeMode};
pub use tokenize::Tokenizer;

/// Extracts normalized links from text with one fixed normalization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkExtractor {
    pub mode: NormalizeMode,
    pub tokenizer: Tokenizer,
}

impl LinkExtractor {
    pub fn new(mode: NormalizeMode, tokenizer: Tokenizer) -> Self {
        Self { mode, tokenizer }
    }

    /// Extractor for URL list files: every whitespace-separated token is a candidate.
    pub fn for_url_list(mode: NormalizeMode) -> Self {
        Self::new(mode, Tokenizer::Whitespace)
    }

    /// Extractor for fetched page bodies: only `http(s)://` substrings are candidates.
    pub fn for_page_body(mode: NormalizeMode) -> Self {
        Self::new(mode, Tokenizer::Schemed)
    }

    /// Returns normalized links in order of occurrence. Duplicates are kept.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.tokenizer
            .tokens(text)
            .filter_map(|token| {
                let link = normalize_link(token, self.mode);
                if link.is_none() {
                    tracing::trace!(token, "dropped non-link token");
                }
                link
            })
            .collect()
    }
}
