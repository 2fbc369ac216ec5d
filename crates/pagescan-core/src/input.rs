//! Reading the URL list file and deriving the results path.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::links::{LinkExtractor, NormalizeMode};
use crate::report::ExportFormat;

/// Resolves `path` against the current directory when it is relative.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("get current working directory")?;
    Ok(cwd.join(path))
}

/// Reads the whole input file as UTF-8 text (invalid sequences are replaced).
pub fn read_input(path: &Path) -> Result<String> {
    let resolved = resolve_path(path)?;
    let bytes = fs::read(&resolved).with_context(|| format!("read {}", resolved.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Reads `path` and returns the normalized URLs found in it, in file order.
/// An empty result is not an error here; the caller decides.
pub fn load_urls(path: &Path, mode: NormalizeMode) -> Result<Vec<String>> {
    let text = read_input(path)?;
    let urls = LinkExtractor::for_url_list(mode).extract(&text);
    tracing::debug!(path = %path.display(), count = urls.len(), "loaded URL list");
    Ok(urls)
}

/// `<directory of input>/results.<ext>`.
pub fn output_path_for(input: &Path, format: ExportFormat) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("results.{}", format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_urls_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "example.com").unwrap();
        writeln!(f, "https://test.org/page").unwrap();
        f.flush().unwrap();

        let urls = load_urls(f.path(), NormalizeMode::Full).unwrap();
        assert_eq!(urls, vec!["https://example.com", "https://test.org/page"]);
    }

    #[test]
    fn load_urls_without_links_is_empty() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "nothing to see here").unwrap();
        f.flush().unwrap();
        assert!(load_urls(f.path(), NormalizeMode::Full).unwrap().is_empty());
    }

    #[test]
    fn missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let err = load_urls(&path, NormalizeMode::Full).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.txt"));
    }

    #[test]
    fn output_path_next_to_input() {
        assert_eq!(
            output_path_for(Path::new("/data/lists/urls.txt"), ExportFormat::Json),
            PathBuf::from("/data/lists/results.json")
        );
        assert_eq!(
            output_path_for(Path::new("urls.txt"), ExportFormat::Csv),
            PathBuf::from("results.csv")
        );
    }

    #[test]
    fn relative_paths_resolve_against_cwd() {
        let resolved = resolve_path(Path::new("urls.txt")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("urls.txt"));
    }
}
