//! Minimal LAS 2.0 reader/writer
//!
//! Reference ingestion collaborator for the CLI and tests. Handles the
//! `~V`, `~W`, `~C` and `~A` sections of unwrapped files. Data rows with the
//! wrong token count or unparsable numbers are skipped and counted; there is
//! no attempt to repair damaged files.
//!
//! Readings matching the file's own `NULL.` header value are read as absent.

use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use super::RawLog;
use crate::config::defaults::NULL_TOLERANCE;
use crate::types::CurveInfo;

#[derive(Debug, Error)]
pub enum LasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No ~Curve section found")]
    NoCurveSection,

    #[error("No ~ASCII data section found")]
    NoDataSection,

    #[error("Wrapped LAS files are not supported")]
    WrappedUnsupported,
}

/// Result of reading a LAS document
#[derive(Debug, Clone)]
pub struct LasDocument {
    pub log: RawLog,
    /// Data rows rejected for token count or parse failure
    pub skipped_rows: usize,
    /// Null value declared by the `~W` section, if any
    pub null_value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Version,
    Well,
    Curve,
    Ascii,
    Other,
}

impl Section {
    fn from_header(line: &str) -> Self {
        match line.trim_start_matches('~').chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('V') => Section::Version,
            Some('W') => Section::Well,
            Some('C') => Section::Curve,
            Some('A') => Section::Ascii,
            _ => Section::Other,
        }
    }
}

/// A header line `MNEM.UNIT  DATA : DESCRIPTION`
struct HeaderLine<'a> {
    mnemonic: &'a str,
    unit: &'a str,
    data: &'a str,
    description: &'a str,
}

fn parse_header_line(line: &str) -> Option<HeaderLine<'_>> {
    let (mnemonic, rest) = line.split_once('.')?;
    // Unit runs from the dot to the first whitespace
    let unit_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (unit, rest) = rest.split_at(unit_end);
    let (data, description) = match rest.rfind(':') {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None => (rest, ""),
    };
    Some(HeaderLine {
        mnemonic: mnemonic.trim(),
        unit: unit.trim(),
        data: data.trim(),
        description: description.trim(),
    })
}

/// Read a LAS file from disk.
pub fn read_las_file(path: &Path) -> Result<LasDocument, LasError> {
    let text = std::fs::read_to_string(path)?;
    read_las_str(&text)
}

/// Parse LAS text.
pub fn read_las_str(text: &str) -> Result<LasDocument, LasError> {
    let mut section = Section::Other;
    let mut log = RawLog::default();
    let mut saw_curves = false;
    let mut saw_data = false;
    let mut skipped_rows = 0;
    let mut null_value: Option<f64> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.starts_with('~') {
            section = Section::from_header(trimmed);
            saw_curves |= section == Section::Curve;
            saw_data |= section == Section::Ascii;
            continue;
        }

        match section {
            Section::Version => {
                if let Some(h) = parse_header_line(trimmed) {
                    if h.mnemonic.eq_ignore_ascii_case("WRAP") && h.data.eq_ignore_ascii_case("YES") {
                        return Err(LasError::WrappedUnsupported);
                    }
                }
            }
            Section::Well => {
                if let Some(h) = parse_header_line(trimmed) {
                    let value = if h.data.is_empty() { h.description } else { h.data };
                    if h.mnemonic.eq_ignore_ascii_case("NULL") {
                        null_value = value.parse::<f64>().ok().filter(|v| v.is_finite());
                    }
                    log.well.insert(h.mnemonic.to_string(), value.to_string());
                }
            }
            Section::Curve => {
                if let Some(h) = parse_header_line(trimmed) {
                    log.curves.push(
                        CurveInfo::new(h.mnemonic)
                            .with_unit(h.unit)
                            .with_description(h.description),
                    );
                }
            }
            Section::Ascii => {
                let tokens: Vec<&str> = trimmed.split_whitespace().collect();
                if tokens.len() != log.curves.len() {
                    skipped_rows += 1;
                    continue;
                }
                match tokens.iter().map(|t| t.parse::<f64>()).collect::<Result<Vec<_>, _>>() {
                    Ok(values) => log.push_row(
                        values
                            .into_iter()
                            .map(|v| match null_value {
                                Some(null) if (v - null).abs() <= NULL_TOLERANCE => None,
                                _ => Some(v),
                            })
                            .collect(),
                    ),
                    Err(_) => skipped_rows += 1,
                }
            }
            Section::Other => {}
        }
    }

    if !saw_curves || log.curves.is_empty() {
        return Err(LasError::NoCurveSection);
    }
    if !saw_data {
        return Err(LasError::NoDataSection);
    }
    if skipped_rows > 0 {
        warn!(skipped = skipped_rows, "Skipped malformed LAS data rows");
    }

    // LAS requires the first curve to be the index
    log.index_hint = log.curves.first().map(|c| c.mnemonic.clone());
    debug!(
        curves = log.curves.len(),
        rows = log.rows.len(),
        null = ?null_value,
        "Parsed LAS document"
    );

    Ok(LasDocument {
        log,
        skipped_rows,
        null_value,
    })
}

/// Render a `RawLog` as LAS 2.0 text, writing `null_value` for absent readings.
pub fn write_las(log: &RawLog, null_value: f64) -> String {
    let mut lines = vec![
        "~Version Information".to_string(),
        " VERS.   2.0 : CWLS LOG ASCII STANDARD - VERSION 2.0".to_string(),
        " WRAP.   NO  : ONE LINE PER DEPTH STEP".to_string(),
        "~Well Information".to_string(),
        format!(" NULL.   {null_value:.4} : NULL VALUE"),
    ];
    lines.extend(
        log.well
            .iter()
            .filter(|(k, _)| !k.eq_ignore_ascii_case("NULL"))
            .map(|(k, v)| format!(" {k}.   {v} : ")),
    );
    lines.push("~Curve Information".to_string());
    lines.extend(
        log.curves
            .iter()
            .map(|c| format!(" {}.{}   : {}", c.mnemonic, c.unit, c.description)),
    );
    lines.push("~ASCII".to_string());
    lines.extend(log.rows.iter().map(|row| {
        row.iter()
            .map(|v| format!("{:.4}", v.unwrap_or(null_value)))
            .collect::<Vec<_>>()
            .join(" ")
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
