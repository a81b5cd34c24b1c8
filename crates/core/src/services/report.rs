//! Parser for the text emitted by gdb's `info functions`.
//!
//! Only lines beginning with the `0x` address marker are candidates; banners
//! such as `All defined functions:` or `File main.c:` are skipped. A candidate
//! must split into exactly three whitespace-separated tokens:
//! address, name, signature.

use std::fmt;

use thiserror::Error;

use crate::model::SymbolRecord;

/// Prefix that marks a report line as a symbol entry.
pub const ADDRESS_PREFIX: &str = "0x";

/// A candidate line that did not split into three tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number in the report.
    pub line: usize,
    pub content: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: expected `address name signature`, got {:?}", self.line, self.content)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("{}", summarize(.0))]
    Malformed(Vec<ParseError>),
}

fn summarize(errors: &[ParseError]) -> String {
    match errors.first() {
        Some(first) => format!("{} malformed report line(s); first at {first}", errors.len()),
        None => "malformed report".to_string(),
    }
}

/// Records plus every malformed candidate line, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReport {
    pub records: Vec<SymbolRecord>,
    pub errors: Vec<ParseError>,
}

/// Parse a report, failing the whole stage if any candidate line is malformed.
pub fn parse_report(text: &str) -> Result<Vec<SymbolRecord>, ReportError> {
    let parsed = parse_report_lenient(text);
    if parsed.errors.is_empty() {
        Ok(parsed.records)
    } else {
        Err(ReportError::Malformed(parsed.errors))
    }
}

/// Parse a report, keeping valid records and collecting malformed lines.
pub fn parse_report_lenient(text: &str) -> ParsedReport {
    let mut out = ParsedReport::default();
    for (idx, line) in text.lines().enumerate() {
        if !line.starts_with(ADDRESS_PREFIX) {
            continue;
        }
        match parse_line(line) {
            Some(record) => out.records.push(record),
            None => out.errors.push(ParseError { line: idx + 1, content: line.to_string() }),
        }
    }
    out
}

fn parse_line(line: &str) -> Option<SymbolRecord> {
    let mut tokens = line.split_whitespace();
    let (address, name, signature) = (tokens.next()?, tokens.next()?, tokens.next()?);
    if tokens.next().is_some() {
        return None;
    }
    Some(SymbolRecord::new(address, name, signature))
}
