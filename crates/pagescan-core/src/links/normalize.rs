//! Canonical HTTPS form for link tokens.

use serde::{Deserialize, Serialize};
use url::{Host, Url};

/// Characters stripped from the start of a token before parsing.
const LEADING_NOISE: &[char] = &['"', '\'', '(', '<', '[', '{', '`'];
/// Characters stripped from the end of a token before parsing.
const TRAILING_NOISE: &[char] = &[
    '"', '\'', ')', '>', ']', '}', '`', '.', ',', ';', ':', '!', '?',
];

/// Output form of a normalized link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeMode {
    /// `https://host[:port]/path?query` (fragment dropped).
    #[default]
    Full,
    /// `https://host[:port]`.
    HostOnly,
}

/// Normalizes one candidate token to an absolute HTTPS URL.
///
/// - Prepends `https://` when the token has no `http://`/`https://` prefix.
/// - Returns `None` if the token doesn't parse or has no host. Scheme-less
///   tokens must also look like a host name (contain a dot, be `localhost`,
///   or be an IP literal).
/// - Forces the scheme to `https` and drops any fragment.
///
/// # Examples
///
/// - `normalize_link("example.com", Full)` → `Some("https://example.com")`
/// - `normalize_link("http://test.org/page", Full)` → `Some("https://test.org/page")`
/// - `normalize_link("http://test.org/page", HostOnly)` → `Some("https://test.org")`
pub fn normalize_link(token: &str, mode: NormalizeMode) -> Option<String> {
    let token = token
        .trim_start_matches(LEADING_NOISE)
        .trim_end_matches(TRAILING_NOISE);
    if token.is_empty() {
        return None;
    }

    let has_scheme = has_http_scheme(token);
    let candidate = if has_scheme {
        token.to_string()
    } else {
        if token.contains("://") {
            return None;
        }
        format!("https://{}", token)
    };

    if !raw_authority(&candidate).is_ascii() {
        return None;
    }
    let mut parsed = Url::parse(&candidate).ok()?;
    let host = parsed.host()?;
    if let Host::Domain(name) = host {
        if !is_plain_domain(name) {
            return None;
        }
    }
    if !has_scheme && !looks_like_host(&host) {
        return None;
    }
    let host = host.to_string();
    if host.is_empty() {
        return None;
    }

    parsed.set_scheme("https").ok()?;
    parsed.set_fragment(None);

    let link = match mode {
        NormalizeMode::Full => render_full(&parsed, &candidate),
        NormalizeMode::HostOnly => match parsed.port() {
            Some(port) => format!("https://{}:{}", host, port),
            None => format!("https://{}", host),
        },
    };
    Some(link)
}

fn has_http_scheme(token: &str) -> bool {
    let head: String = token.chars().take(8).collect::<String>().to_ascii_lowercase();
    head.starts_with("http://") || head.starts_with("https://")
}

/// The `userinfo@host:port` part of `scheme://...` as written.
fn raw_authority(candidate: &str) -> &str {
    let rest = candidate
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(candidate);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

/// Letters, digits, dots and hyphens only.
fn is_plain_domain(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

fn looks_like_host(host: &Host<&str>) -> bool {
    match host {
        Host::Domain(name) => name.contains('.') || name.eq_ignore_ascii_case("localhost"),
        Host::Ipv4(_) | Host::Ipv6(_) => true,
    }
}

/// Serializes the URL, keeping a bare host bare: the parser always adds a
/// root path, which would turn `example.com` into `https://example.com/`.
fn render_full(parsed: &Url, candidate: &str) -> String {
    let mut out = parsed.to_string();
    let had_path = candidate
        .split_once("://")
        .map(|(_, rest)| rest.contains('/'))
        .unwrap_or(false);
    if parsed.path() == "/" && parsed.query().is_none() && !had_path && out.ends_with('/') {
        out.pop();
    }
    out
}
