//! Output formatting utilities for CLI operations

use crate::error::RenameError;
use crate::rename::RenameStats;
use crate::rpm::{format_thousands, RpmScale};
use std::io::{self, Write};
use std::str::FromStr;

/// Output format for CLI reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format from a string; anything but `json` is text.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_rename::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert!(matches!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json));
    /// assert!(matches!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

/// Write the read count and RPM scale factor.
///
/// Text output is two lines: the count with thousands separators, then alpha
/// to six decimal places.
///
/// # Examples
///
/// ```
/// use ferro_rename::cli::{output_rpm_scale, OutputFormat};
/// use ferro_rename::rpm::RpmScale;
///
/// let scale = RpmScale::from_reads(4, "reads.bed").unwrap();
/// let mut buffer = Vec::new();
/// output_rpm_scale(&mut buffer, &scale, OutputFormat::Text).unwrap();
/// assert_eq!(
///     String::from_utf8(buffer).unwrap(),
///     "# reads   : 4\nalpha (RPM scale) = 250000.000000\n"
/// );
/// ```
pub fn output_rpm_scale<W: Write>(
    writer: &mut W,
    scale: &RpmScale,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, scale)?;
            writeln!(writer)
        }
        OutputFormat::Text => {
            writeln!(writer, "# reads   : {}", format_thousands(scale.reads))?;
            writeln!(writer, "alpha (RPM scale) = {:.6}", scale.alpha)
        }
    }
}

/// Write a rename run summary.
pub fn output_stats<W: Write>(
    writer: &mut W,
    stats: &RenameStats,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, stats)?;
            writeln!(writer)
        }
        OutputFormat::Text => {
            writeln!(
                writer,
                "lines read: {}, written: {}, renamed: {}, unmapped: {}, passthrough: {}, no tab: {}, blank skipped: {}",
                stats.lines_read,
                stats.lines_written,
                stats.renamed,
                stats.unmapped,
                stats.passthrough,
                stats.malformed,
                stats.blank_skipped
            )
        }
    }
}

/// Write an error to the output
///
/// # Arguments
///
/// * `writer` - The output writer (usually stderr, or a buffer for testing)
/// * `error` - The error that occurred
/// * `format` - The output format
pub fn output_error<W: Write>(
    writer: &mut W,
    error: &RenameError,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "code": error.code().as_str(),
                "error": error.to_string(),
                "status": "error",
            });
            serde_json::to_writer(&mut *writer, &value)?;
            writeln!(writer)
        }
        OutputFormat::Text => writeln!(writer, "ERROR: {}", error.detailed_message()),
    }
}
