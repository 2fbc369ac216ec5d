//! CSV output (`URL,Size,Duration`) and a reader for the same layout.

use anyhow::{Context, Result};
use std::io::{self, Write};

use super::ResultRecord;
use crate::batch::FetchResult;

const HEADER: [&str; 3] = ["URL", "Size", "Duration"];

/// Quotes a field when it contains a delimiter, quote or line break (RFC 4180).
fn escape_field(field: &str) -> std::borrow::Cow<'_, str> {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\"")).into()
    } else {
        field.into()
    }
}

fn write_row<W: Write>(w: &mut W, fields: &[&str]) -> io::Result<()> {
    let line: Vec<_> = fields.iter().map(|f| escape_field(f)).collect();
    write!(w, "{}\r\n", line.join(","))
}

pub fn write_csv<W: Write>(w: &mut W, results: &[FetchResult]) -> io::Result<()> {
    write_row(w, &HEADER)?;
    for r in results {
        let record = ResultRecord::from(r);
        let size = record.size.to_string();
        write_row(w, &[&record.url, &size, &record.duration])?;
    }
    Ok(())
}

/// Splits CSV text into records. Quoted fields may contain delimiters,
/// doubled quotes and line breaks.
fn split_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if in_quotes {
        anyhow::bail!("unterminated quoted field");
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}

/// Parses CSV produced by `write_csv` back into records.
pub fn read_csv(text: &str) -> Result<Vec<ResultRecord>> {
    let mut rows = split_records(text)?.into_iter();
    let header = rows.next().context("missing CSV header")?;
    if header != HEADER {
        anyhow::bail!("unexpected CSV header: {:?}", header);
    }
    rows.enumerate()
        .map(|(i, row)| -> Result<ResultRecord> {
            let line = i + 2;
            match row.as_slice() {
                [url, size, duration] => Ok(ResultRecord {
                    url: url.clone(),
                    size: size
                        .parse()
                        .with_context(|| format!("line {}: bad size '{}'", line, size))?,
                    duration: duration.clone(),
                }),
                _ => anyhow::bail!("line {}: expected 3 fields, got {}", line, row.len()),
            }
        })
        .collect()
}
