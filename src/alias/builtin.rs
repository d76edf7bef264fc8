//! Alias tables compiled into the program.
//!
//! These cover small, stable naming conventions that are versioned with the
//! code. Identifiers missing from a table are left as they are.

use super::AliasTable;
use crate::error::RenameError;
use std::fmt;
use std::str::FromStr;

/// S. cerevisiae R64 (sacCer3) roman-numeral names -> RefSeq accessions.
///
/// Chromosome IX is absent: the assembly this was built for splits it into
/// arms, and `chrIXL` has no single accession. The full native chromosome IX
/// would be `NC_001141.2`.
pub const SACCER3_ROMAN_TO_REFSEQ: &[(&str, &str)] = &[
    ("chrI", "NC_001133.9"),
    ("chrII", "NC_001134.8"),
    ("chrIII", "NC_001135.5"),
    ("chrIV", "NC_001136.10"),
    ("chrV", "NC_001137.3"),
    ("chrVI", "NC_001138.5"),
    ("chrVII", "NC_001139.9"),
    ("chrVIII", "NC_001140.6"),
    ("chrX", "NC_001142.9"),
    ("chrXI", "NC_001143.9"),
    ("chrXII", "NC_001144.5"),
    ("chrXIII", "NC_001145.3"),
    ("chrXIV", "NC_001146.8"),
    ("chrXV", "NC_001147.6"),
    ("chrXVI", "NC_001148.4"),
    ("chrMT", "NC_001224.1"),
];

/// A named built-in table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuiltinTable {
    /// Yeast R64 roman numerals to RefSeq
    #[default]
    SacCer3,
}

impl BuiltinTable {
    /// All built-in tables.
    pub const ALL: &'static [BuiltinTable] = &[BuiltinTable::SacCer3];

    /// The raw `(source, target)` pairs.
    pub fn pairs(self) -> &'static [(&'static str, &'static str)] {
        match self {
            BuiltinTable::SacCer3 => SACCER3_ROMAN_TO_REFSEQ,
        }
    }

    /// Short name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinTable::SacCer3 => "sacCer3",
        }
    }

    /// Materialize the table for renaming.
    pub fn to_alias_table(self) -> AliasTable {
        let mut table = AliasTable::new();
        for (source, target) in self.pairs() {
            table.map.insert(source.to_string(), target.to_string());
        }
        table
    }
}

impl fmt::Display for BuiltinTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BuiltinTable {
    type Err = RenameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "saccer3" | "r64" => Ok(BuiltinTable::SacCer3),
            other => Err(RenameError::Config {
                msg: format!(
                    "unknown built-in table '{}' (available: {})",
                    other,
                    BuiltinTable::ALL
                        .iter()
                        .map(|t| t.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saccer3_lookups() {
        let table = BuiltinTable::SacCer3.to_alias_table();
        assert_eq!(table.len(), 16);
        assert_eq!(table.get("chrI"), Some("NC_001133.9"));
        assert_eq!(table.get("chrIV"), Some("NC_001136.10"));
        assert_eq!(table.get("chrXVI"), Some("NC_001148.4"));
        assert_eq!(table.get("chrMT"), Some("NC_001224.1"));
    }

    #[test]
    fn test_chromosome_ix_unmapped() {
        let table = BuiltinTable::SacCer3.to_alias_table();
        assert_eq!(table.get("chrIX"), None);
        assert_eq!(table.get("chrIXL"), None);
        assert_eq!(table.resolve("chrIXL"), "chrIXL");
    }

    #[test]
    fn test_pairs_are_unique_and_tab_free() {
        let pairs = BuiltinTable::SacCer3.pairs();
        let checked = AliasTable::from_pairs(pairs.iter().copied()).unwrap();
        assert_eq!(checked.len(), pairs.len());
        assert_eq!(checked, BuiltinTable::SacCer3.to_alias_table());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("sacCer3".parse::<BuiltinTable>().unwrap(), BuiltinTable::SacCer3);
        assert_eq!("R64".parse::<BuiltinTable>().unwrap(), BuiltinTable::SacCer3);
        let err = "hg38".parse::<BuiltinTable>().unwrap_err();
        assert!(err.to_string().contains("sacCer3"));
        assert_eq!(BuiltinTable::SacCer3.to_string(), "sacCer3");
    }
}
