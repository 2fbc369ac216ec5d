//! Line-oriented text output.

use std::io::{self, Write};

use super::format_duration;
use crate::batch::FetchResult;
use crate::units::SizeUnit;

/// One line per result: `<url> - <size> <unit> - <duration>`, or
/// `<url> - Error downloading content - <duration>` for failures.
pub fn write_txt<W: Write>(w: &mut W, results: &[FetchResult], unit: SizeUnit) -> io::Result<()> {
    for r in results {
        let duration = format_duration(r.duration);
        if r.is_error() {
            writeln!(w, "{} - Error downloading content - {}", r.url, duration)?;
        } else {
            writeln!(w, "{} - {} {} - {}", r.url, r.size, unit.label(), duration)?;
        }
    }
    Ok(())
}
