//! Single-page HTTP GET.
//!
//! Uses the curl crate (libcurl). A completed HTTP exchange yields the body
//! whatever the status code; only transport failures (DNS, connect, TLS,
//! timeout) are errors. The handle is dropped on every exit path so the
//! connection never outlives the call.

use std::time::Duration;

use crate::config::ScanConfig;

/// Transport-level failure of one GET.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be configured (bad URL, unsupported option).
    #[error("request setup for {url}: {source}")]
    Setup {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// The transfer failed: DNS, connect, TLS or timeout.
    #[error("GET {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
}

impl FetchError {
    fn setup(url: &str, source: curl::Error) -> Self {
        FetchError::Setup {
            url: url.to_string(),
            source,
        }
    }

    fn transport(url: &str, source: curl::Error) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// True when the request hit the configured timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Transport { source, .. } => source.is_operation_timedout(),
            FetchError::Setup { .. } => false,
        }
    }
}

/// Anything that can download one page body. Implemented by `CurlFetcher`;
/// the batch coordinator only depends on this trait.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Options applied to every GET.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Total time allowed for one request, connect included.
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
    pub max_redirections: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("pagescan/{}", env!("CARGO_PKG_VERSION")),
            max_redirections: 10,
        }
    }
}

impl From<&ScanConfig> for FetchOptions {
    fn from(cfg: &ScanConfig) -> Self {
        Self {
            request_timeout: cfg.request_timeout,
            connect_timeout: cfg.connect_timeout,
            user_agent: cfg.user_agent.clone(),
            ..Self::default()
        }
    }
}

/// libcurl-backed fetcher: one Easy handle per request.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: FetchOptions,
}

impl CurlFetcher {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(|e| FetchError::setup(url, e))?;
        easy.get(true).map_err(|e| FetchError::setup(url, e))?;
        easy.follow_location(true)
            .map_err(|e| FetchError::setup(url, e))?;
        easy.max_redirections(self.opts.max_redirections)
            .map_err(|e| FetchError::setup(url, e))?;
        easy.connect_timeout(self.opts.connect_timeout)
            .map_err(|e| FetchError::setup(url, e))?;
        easy.timeout(self.opts.request_timeout)
            .map_err(|e| FetchError::setup(url, e))?;
        easy.useragent(&self.opts.user_agent)
            .map_err(|e| FetchError::setup(url, e))?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(|e| FetchError::setup(url, e))?;
            transfer
                .perform()
                .map_err(|e| FetchError::transport(url, e))?;
        }

        // Status is informational only; the body counts either way.
        let code = easy.response_code().unwrap_or(0);
        if !(200..300).contains(&code) {
            tracing::debug!(url, status = code, "non-success status, keeping body");
        }
        tracing::debug!(url, status = code, bytes = body.len(), "GET complete");
        Ok(body)
    }
}
