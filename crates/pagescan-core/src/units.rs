//! Size units for reported page sizes.

use anyhow::Result;
use std::fmt;
use std::str::FromStr;

const KIB: i64 = 1024;
const MIB: i64 = 1024 * 1024;

/// Unit a page size is reported in. Only affects scaling and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeUnit {
    #[default]
    Bytes,
    KB,
    MB,
    /// Body length, reported as characters.
    Chars,
}

impl SizeUnit {
    /// Scales a byte length into this unit (integer division, no rounding).
    pub fn scale(self, byte_len: usize) -> i64 {
        let n = i64::try_from(byte_len).unwrap_or(i64::MAX);
        match self {
            SizeUnit::Bytes | SizeUnit::Chars => n,
            SizeUnit::KB => n / KIB,
            SizeUnit::MB => n / MIB,
        }
    }

    /// Label used in console and TXT output.
    pub fn label(self) -> &'static str {
        match self {
            SizeUnit::Bytes => "bytes",
            SizeUnit::KB => "KB",
            SizeUnit::MB => "MB",
            SizeUnit::Chars => "characters",
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SizeUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bytes" => Ok(SizeUnit::Bytes),
            "kb" => Ok(SizeUnit::KB),
            "mb" => Ok(SizeUnit::MB),
            "chars" => Ok(SizeUnit::Chars),
            other => anyhow::bail!(
                "invalid size unit '{}': use bytes, kb, mb or chars",
                other
            ),
        }
    }
}
