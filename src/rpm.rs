//! Reads-per-million scale factor.
//!
//! For a BED file with one aligned read per line, `alpha = 1_000_000 / reads`
//! converts raw coverage to RPM.

use crate::error::RenameError;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Bytes read per chunk while counting lines.
const CHUNK_SIZE: usize = 1 << 20;

/// Reads per million.
const PER_MILLION: f64 = 1_000_000.0;

/// Count `\n` bytes in a stream.
///
/// A final line without a terminator is not counted.
pub fn count_newlines<R: Read>(mut reader: R) -> io::Result<u64> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        total += memchr::memchr_iter(b'\n', &buf[..n]).count() as u64;
    }
    Ok(total)
}

/// Count the reads (lines) in a BED file.
pub fn count_reads<P: AsRef<Path>>(path: P) -> Result<u64, RenameError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(RenameError::InputNotFound {
            path: path.display().to_string(),
        });
    }
    let file = File::open(path).map_err(|e| RenameError::Io {
        msg: format!("Failed to open {}: {}", path.display(), e),
    })?;
    Ok(count_newlines(file)?)
}

/// Read count and the resulting RPM scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RpmScale {
    /// Total reads
    pub reads: u64,
    /// `1_000_000 / reads`
    pub alpha: f64,
}

impl RpmScale {
    /// Compute the scale for a read count. `source` names the input in the
    /// error raised for zero reads.
    pub fn from_reads(reads: u64, source: &str) -> Result<Self, RenameError> {
        if reads == 0 {
            return Err(RenameError::EmptyInput {
                path: source.to_string(),
            });
        }
        Ok(Self {
            reads,
            alpha: PER_MILLION / reads as f64,
        })
    }

    /// Count reads in a BED file and compute the scale.
    pub fn from_bed<P: AsRef<Path>>(path: P) -> Result<Self, RenameError> {
        let path = path.as_ref();
        let reads = count_reads(path)?;
        log::debug!("Counted {} reads in {}", reads, path.display());
        Self::from_reads(reads, &path.display().to_string())
    }
}

/// Format an integer with `,` thousands separators.
///
/// ```
/// use ferro_rename::rpm::format_thousands;
///
/// assert_eq!(format_thousands(4), "4");
/// assert_eq!(format_thousands(1234567), "1,234,567");
/// ```
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_count_newlines() {
        assert_eq!(count_newlines(Cursor::new("")).unwrap(), 0);
        assert_eq!(count_newlines(Cursor::new("a\nb\n")).unwrap(), 2);
        assert_eq!(count_newlines(Cursor::new("a\nb")).unwrap(), 1);
        assert_eq!(count_newlines(Cursor::new("\n\n\n")).unwrap(), 3);
    }

    #[test]
    fn test_count_newlines_across_chunks() {
        let data = "chrI\t1\t2\n".repeat(CHUNK_SIZE / 4);
        assert_eq!(
            count_newlines(Cursor::new(data)).unwrap(),
            (CHUNK_SIZE / 4) as u64
        );
    }

    #[test]
    fn test_four_reads() {
        let mut bed = NamedTempFile::new().unwrap();
        for i in 0..4 {
            writeln!(bed, "chrI\t{}\t{}\tread{}\t0\t+", i * 10, i * 10 + 50, i).unwrap();
        }
        bed.flush().unwrap();

        let scale = RpmScale::from_bed(bed.path()).unwrap();
        assert_eq!(scale.reads, 4);
        assert_eq!(format!("{:.6}", scale.alpha), "250000.000000");
    }

    #[test]
    fn test_empty_file_is_error() {
        let bed = NamedTempFile::new().unwrap();
        let err = RpmScale::from_bed(bed.path()).unwrap_err();
        assert!(matches!(err, RenameError::EmptyInput { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = count_reads("/nonexistent/reads.bed").unwrap_err();
        assert!(matches!(err, RenameError::InputNotFound { .. }));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(12345678), "12,345,678");
    }
}
