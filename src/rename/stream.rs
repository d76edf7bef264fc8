//! Streaming rename driver.
//!
//! Reads one line at a time into a reused buffer, classifies it, rewrites data
//! lines and writes the result straight away, so memory use does not depend
//! on file size. There is no rollback: an I/O failure part way through leaves
//! whatever was already written.
//!
//! A line ends at `\n`, `\r\n` or a lone `\r`; whichever it was, the output
//! line ends in `\n`.

use super::classify::{classify, LineKind};
use super::rewrite::write_data_line;
use crate::alias::AliasTable;
use crate::error::RenameError;
use serde::Serialize;
use std::fmt;
use memchr::memchr2;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// The file layouts the renamer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// bedGraph/BED tracks: every line is kept, blank lines included
    BedGraph,
    /// chrom.sizes tables: blank lines are dropped and every line ends in `\n`
    Sizes,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::BedGraph => write!(f, "bedGraph"),
            FileKind::Sizes => write!(f, "chrom.sizes"),
        }
    }
}

impl FromStr for FileKind {
    type Err = RenameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bedgraph" | "bg" | "bed" => Ok(FileKind::BedGraph),
            "sizes" | "chrom.sizes" => Ok(FileKind::Sizes),
            other => Err(RenameError::Config {
                msg: format!("unknown file kind '{}'", other),
            }),
        }
    }
}

/// Per-run line counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenameStats {
    /// Lines read from the input
    pub lines_read: u64,
    /// Lines written to the output
    pub lines_written: u64,
    /// Data lines whose identifier was replaced
    pub renamed: u64,
    /// Data lines whose identifier had no mapping
    pub unmapped: u64,
    /// `track`/`browser`/`#` lines
    pub passthrough: u64,
    /// Lines with no tab, written unchanged
    pub malformed: u64,
    /// Blank lines dropped (chrom.sizes only)
    pub blank_skipped: u64,
}

/// Rename identifiers in a bedGraph/BED stream.
///
/// Every input line produces one output line. `\r\n` and `\r` terminators
/// become `\n`; a last line without a terminator is written without one.
pub fn rename_bedgraph<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    table: &AliasTable,
) -> Result<RenameStats, RenameError> {
    rename(FileKind::BedGraph, reader, writer, table)
}

/// Rename identifiers in a chrom.sizes stream.
///
/// Blank (empty or whitespace-only) lines are dropped and every written line
/// ends in `\n`.
pub fn rename_sizes<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    table: &AliasTable,
) -> Result<RenameStats, RenameError> {
    rename(FileKind::Sizes, reader, writer, table)
}

/// Rename identifiers in a stream of the given kind.
///
/// # Examples
///
/// ```
/// use ferro_rename::alias::AliasTable;
/// use ferro_rename::rename::{rename, FileKind};
///
/// let table = AliasTable::from_pairs([("chrI", "NC_001133.9")]).unwrap();
/// let input = "track type=bedGraph\nchrI\t100\t200\t5.0\nchrUnknown\n";
/// let mut out = Vec::new();
/// let stats = rename(FileKind::BedGraph, input.as_bytes(), &mut out, &table).unwrap();
///
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "track type=bedGraph\nNC_001133.9\t100\t200\t5.0\nchrUnknown\n"
/// );
/// assert_eq!(stats.renamed, 1);
/// ```
pub fn rename<R: BufRead, W: Write>(
    kind: FileKind,
    mut reader: R,
    writer: &mut W,
    table: &AliasTable,
) -> Result<RenameStats, RenameError> {
    let mut stats = RenameStats::default();
    let mut buf = Vec::with_capacity(256);

    while let Some(terminated) = read_line(&mut reader, &mut buf)? {
        stats.lines_read += 1;
        let line = buf.as_slice();

        if kind == FileKind::Sizes && is_blank(line) {
            stats.blank_skipped += 1;
            continue;
        }

        match classify(line) {
            LineKind::Structural => {
                writer.write_all(line)?;
                stats.passthrough += 1;
            }
            LineKind::Malformed => {
                writer.write_all(line)?;
                stats.malformed += 1;
            }
            LineKind::Data {
                identifier,
                remainder,
            } => {
                if write_data_line(writer, identifier, remainder, table)? {
                    stats.renamed += 1;
                } else {
                    stats.unmapped += 1;
                }
            }
        }

        if terminated || kind == FileKind::Sizes {
            writer.write_all(b"\n")?;
        }
        stats.lines_written += 1;
    }

    writer.flush()?;
    log::info!(
        "Renamed {} of {} {} lines ({} unmapped, {} passthrough, {} without a tab, {} blank skipped)",
        stats.renamed,
        stats.lines_read,
        kind,
        stats.unmapped,
        stats.passthrough,
        stats.malformed,
        stats.blank_skipped
    );
    Ok(stats)
}

/// Read the next line into `buf` without its terminator.
///
/// Returns `None` at end of input, otherwise whether a `\n`, `\r\n` or lone
/// `\r` terminator was consumed.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<bool>> {
    buf.clear();
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(if buf.is_empty() { None } else { Some(false) });
        }

        match memchr2(b'\n', b'\r', available) {
            Some(end) => {
                buf.extend_from_slice(&available[..end]);
                let carriage_return = available[end] == b'\r';
                reader.consume(end + 1);
                if carriage_return {
                    skip_newline(reader)?;
                }
                return Ok(Some(true));
            }
            None => {
                let len = available.len();
                buf.extend_from_slice(available);
                reader.consume(len);
            }
        }
    }
}

/// Consume a `\n` directly following a `\r`, which may sit in the next chunk.
fn skip_newline<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        match reader.fill_buf() {
            Ok(available) => {
                if available.first() == Some(&b'\n') {
                    reader.consume(1);
                }
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Empty or whitespace-only, counting Unicode spaces and the `\x1c`-`\x1f`
/// separators as whitespace.
fn is_blank(line: &[u8]) -> bool {
    if line.iter().all(u8::is_ascii_whitespace) {
        return true;
    }
    String::from_utf8_lossy(line)
        .chars()
        .all(|c| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yeast() -> AliasTable {
        AliasTable::from_pairs([
            ("chrI", "NC_001133.9"),
            ("chrII", "NC_001134.8"),
            ("chrMT", "NC_001224.1"),
        ])
        .unwrap()
    }

    fn run(kind: FileKind, input: &str, table: &AliasTable) -> (String, RenameStats) {
        let mut out = Vec::new();
        let stats = rename(kind, input.as_bytes(), &mut out, table).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_bedgraph_basic_rename() {
        let (out, stats) = run(FileKind::BedGraph, "chrI\t100\t200\t5.0\n", &yeast());
        assert_eq!(out, "NC_001133.9\t100\t200\t5.0\n");
        assert_eq!(stats.renamed, 1);
        assert_eq!(stats.lines_written, 1);
    }

    #[test]
    fn test_bedgraph_passthrough_lines() {
        let input = "track type=bedGraph\nbrowser hide all\n# comment\twith tab\nchrUnknown\n";
        let (out, stats) = run(FileKind::BedGraph, input, &yeast());
        assert_eq!(out, input);
        assert_eq!(stats.passthrough, 3);
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.renamed, 0);
    }

    #[test]
    fn test_bedgraph_keeps_blank_lines_and_order() {
        let input = "chrII\t1\t2\t0.5\n\nchrV\t3\t4\t1.5\nchrI\t5\t6\t2\n";
        let (out, stats) = run(FileKind::BedGraph, input, &yeast());
        assert_eq!(
            out,
            "NC_001134.8\t1\t2\t0.5\n\nchrV\t3\t4\t1.5\nNC_001133.9\t5\t6\t2\n"
        );
        assert_eq!(stats.lines_read, 4);
        assert_eq!(stats.lines_written, 4);
        assert_eq!(stats.unmapped, 1);
        assert_eq!(stats.malformed, 1);
    }

    #[test]
    fn test_bedgraph_crlf_normalized() {
        let (out, _) = run(FileKind::BedGraph, "chrI\t1\t2\t3\r\n# c\r\n", &yeast());
        assert_eq!(out, "NC_001133.9\t1\t2\t3\n# c\n");
    }

    #[test]
    fn test_bedgraph_missing_final_newline() {
        let (out, stats) = run(FileKind::BedGraph, "chrI\t1\t2\t3\nchrII\t4\t5\t6", &yeast());
        assert_eq!(out, "NC_001133.9\t1\t2\t3\nNC_001134.8\t4\t5\t6");
        assert_eq!(stats.lines_written, 2);
    }

    #[test]
    fn test_bedgraph_empty_input() {
        let (out, stats) = run(FileKind::BedGraph, "", &yeast());
        assert_eq!(out, "");
        assert_eq!(stats, RenameStats::default());
    }

    #[test]
    fn test_bedgraph_non_utf8_bytes_preserved() {
        let input: &[u8] = b"chrI\t1\t2\t\xff\n\xfe\xfd\t1\n";
        let mut out = Vec::new();
        rename_bedgraph(input, &mut out, &yeast()).unwrap();
        assert_eq!(out, b"NC_001133.9\t1\t2\t\xff\n\xfe\xfd\t1\n".to_vec());
    }

    #[test]
    fn test_sizes_rename_and_blank_lines() {
        let input = "chrMT\t85779\n\nchrI\t230218\n   \nchrIXL\t1000\n";
        let (out, stats) = run(FileKind::Sizes, input, &yeast());
        assert_eq!(out, "NC_001224.1\t85779\nNC_001133.9\t230218\nchrIXL\t1000\n");
        assert_eq!(stats.blank_skipped, 2);
        assert_eq!(stats.lines_written, 3);
        assert_eq!(stats.lines_read, 5);
    }

    #[test]
    fn test_sizes_extra_columns_and_missing_length() {
        let input = "chrII\t813184\textra\tcols\nchrI\t\n";
        let (out, _) = run(FileKind::Sizes, input, &yeast());
        assert_eq!(out, "NC_001134.8\t813184\textra\tcols\nNC_001133.9\t\n");
    }

    #[test]
    fn test_sizes_always_terminates_and_strips_cr() {
        let (out, _) = run(FileKind::Sizes, "chrI\t230218\r\r\nchrII\t813184", &yeast());
        assert_eq!(out, "NC_001133.9\t230218\nNC_001134.8\t813184\n");
    }

    #[test]
    fn test_sizes_no_tab_line_passes_through() {
        let (out, stats) = run(FileKind::Sizes, "chrI\n# note\n", &yeast());
        assert_eq!(out, "chrI\n# note\n");
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.passthrough, 1);
    }

    #[test]
    fn test_bedgraph_cr_only_lines() {
        let (out, stats) = run(FileKind::BedGraph, "chrI\t1\t2\t3\rchrII\t4\t5\t6\r", &yeast());
        assert_eq!(out, "NC_001133.9\t1\t2\t3\nNC_001134.8\t4\t5\t6\n");
        assert_eq!(stats.renamed, 2);
        assert_eq!(stats.lines_written, 2);
    }

    #[test]
    fn test_bedgraph_mixed_terminators() {
        let (out, stats) = run(FileKind::BedGraph, "# a\r\rchrI\t1\r\nchrMT\t2\n", &yeast());
        assert_eq!(out, "# a\n\nNC_001133.9\t1\nNC_001224.1\t2\n");
        assert_eq!(stats.lines_read, 4);
    }

    #[test]
    fn test_final_lone_cr_keeps_terminator() {
        let (out, stats) = run(FileKind::BedGraph, "chrUnknown\r", &yeast());
        assert_eq!(out, "chrUnknown\n");
        assert_eq!(stats.malformed, 1);

        let (out, _) = run(FileKind::Sizes, "chrUnknown\r", &yeast());
        assert_eq!(out, "chrUnknown\n");
    }

    #[test]
    fn test_sizes_cr_only_lines() {
        let (out, stats) = run(FileKind::Sizes, "chrI\t230218\rchrMT\t85779\r", &yeast());
        assert_eq!(out, "NC_001133.9\t230218\nNC_001224.1\t85779\n");
        assert_eq!(stats.renamed, 2);
    }

    #[test]
    fn test_sizes_drops_unicode_blank_lines() {
        let input = "chrMT\t85779\n\x0b\n\x1c\x1f\n\u{a0}\u{3000}\n\x0c \n";
        let (out, stats) = run(FileKind::Sizes, input, &yeast());
        assert_eq!(out, "NC_001224.1\t85779\n");
        assert_eq!(stats.blank_skipped, 4);
    }

    #[test]
    fn test_cr_split_across_reads() {
        // A one-byte buffer puts every `\r\n` pair in separate chunks
        let reader = std::io::BufReader::with_capacity(1, "chrI\t1\r\nchrII\t2\r\n".as_bytes());
        let mut out = Vec::new();
        let stats = rename_bedgraph(reader, &mut out, &yeast()).unwrap();
        assert_eq!(out, b"NC_001133.9\t1\nNC_001134.8\t2\n".to_vec());
        assert_eq!(stats.lines_read, 2);
    }

    #[test]
    fn test_read_line_terminators() {
        let mut reader = "a\r\nb\rc\n\nd".as_bytes();
        let mut buf = Vec::new();
        let mut lines = Vec::new();
        while let Some(terminated) = read_line(&mut reader, &mut buf).unwrap() {
            lines.push((String::from_utf8(buf.clone()).unwrap(), terminated));
        }
        assert_eq!(
            lines,
            vec![
                ("a".to_string(), true),
                ("b".to_string(), true),
                ("c".to_string(), true),
                (String::new(), true),
                ("d".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(b""));
        assert!(is_blank(b" \t"));
        assert!(is_blank(b"\x0b"));
        assert!(is_blank("\u{85}".as_bytes()));
        assert!(!is_blank(b"chrI"));
        assert!(!is_blank(b"\xff"));
    }

    #[test]
    fn test_file_kind_from_str() {
        assert_eq!("bedGraph".parse::<FileKind>().unwrap(), FileKind::BedGraph);
        assert_eq!("sizes".parse::<FileKind>().unwrap(), FileKind::Sizes);
        assert!("vcf".parse::<FileKind>().is_err());
    }
}
