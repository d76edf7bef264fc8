//! Line classification for tab-delimited genomic files.

use memchr::memchr;

/// Prefixes of header, browser and comment lines that are never renamed.
pub const STRUCTURAL_PREFIXES: &[&[u8]] = &[b"track", b"browser", b"#"];

/// How a line (without its terminator) is treated by the renamer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `track`, `browser` or `#` line, emitted unchanged
    Structural,
    /// No tab to split on, emitted unchanged
    Malformed,
    /// Leading identifier and everything after the first tab
    Data {
        identifier: &'a [u8],
        remainder: &'a [u8],
    },
}

impl LineKind<'_> {
    /// Whether the line is written out verbatim.
    pub fn is_passthrough(&self) -> bool {
        !matches!(self, LineKind::Data { .. })
    }
}

/// Classify one line.
///
/// Structural prefixes are checked before the tab split, so a comment that
/// happens to contain tabs is never treated as data.
///
/// # Examples
///
/// ```
/// use ferro_rename::rename::{classify, LineKind};
///
/// assert_eq!(classify(b"track type=bedGraph"), LineKind::Structural);
/// assert_eq!(classify(b"chrUnknown"), LineKind::Malformed);
/// assert_eq!(
///     classify(b"chrI\t100\t200\t5.0"),
///     LineKind::Data { identifier: b"chrI", remainder: b"100\t200\t5.0" }
/// );
/// ```
pub fn classify(line: &[u8]) -> LineKind<'_> {
    if STRUCTURAL_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
    {
        return LineKind::Structural;
    }

    match memchr(b'\t', line) {
        Some(tab) => LineKind::Data {
            identifier: &line[..tab],
            remainder: &line[tab + 1..],
        },
        None => LineKind::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"track type=bedGraph name=sample".as_slice())]
    #[case(b"track\tname=with\ttabs".as_slice())]
    #[case(b"browser position chrI:1-1000".as_slice())]
    #[case(b"# comment".as_slice())]
    #[case(b"#chrI\t1\t2\t3".as_slice())]
    #[case(b"trackless\t1\t2".as_slice())]
    fn test_structural(#[case] line: &[u8]) {
        assert_eq!(classify(line), LineKind::Structural);
        assert!(classify(line).is_passthrough());
    }

    #[rstest]
    #[case(b"chrUnknown".as_slice())]
    #[case(b"".as_slice())]
    #[case(b"chrI 100 200 5.0".as_slice())]
    fn test_malformed(#[case] line: &[u8]) {
        assert_eq!(classify(line), LineKind::Malformed);
        assert!(classify(line).is_passthrough());
    }

    #[test]
    fn test_data_splits_on_first_tab() {
        match classify(b"chrI\t100\t200\t5.0") {
            LineKind::Data {
                identifier,
                remainder,
            } => {
                assert_eq!(identifier, b"chrI");
                assert_eq!(remainder, b"100\t200\t5.0");
            }
            other => panic!("expected data, got {:?}", other),
        }
    }

    #[test]
    fn test_data_edge_shapes() {
        assert_eq!(
            classify(b"chrI\t"),
            LineKind::Data {
                identifier: b"chrI",
                remainder: b""
            }
        );
        assert_eq!(
            classify(b"\t100"),
            LineKind::Data {
                identifier: b"",
                remainder: b"100"
            }
        );
        assert!(!classify(b"a\tb").is_passthrough());
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        assert!(matches!(classify(b"Track\t1"), LineKind::Data { .. }));
    }
}
