//! JSON array output, 2-space indented.

use std::io::{self, Write};

use super::ResultRecord;
use crate::batch::FetchResult;

/// Writes `[{"URL": .., "Size": .., "Duration": ..}, ...]` followed by a newline.
pub fn write_json<W: Write>(w: &mut W, results: &[FetchResult]) -> io::Result<()> {
    let records: Vec<ResultRecord> = results.iter().map(ResultRecord::from).collect();
    serde_json::to_writer_pretty(&mut *w, &records)?;
    writeln!(w)
}
