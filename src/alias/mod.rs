//! Contig name aliases for renaming between naming conventions.
//!
//! An [`AliasTable`] maps a source identifier (e.g. the roman-numeral yeast
//! name `chrI`) to a target identifier (e.g. the RefSeq accession
//! `NC_001133.9`). Tables are built once, before any line is renamed, from one
//! of three sources:
//!
//! - a two-column TSV file (`old_name<TAB>new_name`), see [`delimited`]
//! - a canonical -> alias JSON registry, consumed *inverted*, see [`registry`]
//! - a constant table compiled into the binary, see [`builtin`]
//!
//! # Example
//!
//! ```
//! use ferro_rename::alias::AliasTable;
//!
//! let table = AliasTable::from_pairs([("chrI", "NC_001133.9")]).unwrap();
//! assert_eq!(table.resolve("chrI"), "NC_001133.9");
//! assert_eq!(table.resolve("chrIXL"), "chrIXL");
//! ```

pub mod builtin;
pub mod delimited;
pub mod registry;

pub use builtin::BuiltinTable;
pub use delimited::{load_delimited, parse_delimited};
pub use registry::CanonicalRegistry;

use crate::error::RenameError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What to do with an alias record that is not a clean `old -> new` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Log a warning and keep loading the remaining records
    #[default]
    Skip,
    /// Fail the whole load with [`RenameError::MalformedAliasRecord`]
    Abort,
}

impl FromStr for MalformedPolicy {
    type Err = RenameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(MalformedPolicy::Skip),
            "abort" => Ok(MalformedPolicy::Abort),
            other => Err(RenameError::Config {
                msg: format!("unknown malformed-record policy '{}'", other),
            }),
        }
    }
}

impl MalformedPolicy {
    /// Apply the policy to a rejected record.
    ///
    /// Returns `Ok(())` when the record should simply be skipped.
    pub(crate) fn handle(self, err: RenameError) -> Result<(), RenameError> {
        match self {
            MalformedPolicy::Skip => {
                log::warn!("Skipping alias record: {}", err);
                Ok(())
            }
            MalformedPolicy::Abort => Err(err),
        }
    }
}

/// Immutable source -> target identifier mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    map: HashMap<String, String>,
}

impl AliasTable {
    /// Create an empty table (every lookup misses).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(source, target)` pairs.
    ///
    /// A repeated source key keeps the last target seen. Fails if any key or
    /// value is empty or contains a tab.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, RenameError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (i, (source, target)) in pairs.into_iter().enumerate() {
            table.insert(i + 1, source.into(), target.into())?;
        }
        Ok(table)
    }

    /// Insert one pair during construction. `line` is only used for errors.
    pub(crate) fn insert(
        &mut self,
        line: usize,
        source: String,
        target: String,
    ) -> Result<(), RenameError> {
        check_token(line, &source, &target)?;
        if let Some(previous) = self.map.get(&source) {
            if previous != &target {
                log::debug!(
                    "Alias {} remapped from {} to {} at record {}",
                    source,
                    previous,
                    target,
                    line
                );
            }
        }
        self.map.insert(source, target);
        Ok(())
    }

    /// Look up the target for `source`, if mapped.
    pub fn get(&self, source: &str) -> Option<&str> {
        self.map.get(source).map(|s| s.as_str())
    }

    /// Resolve `source` to its target, or return it unchanged when unmapped.
    pub fn resolve<'a>(&'a self, source: &'a str) -> &'a str {
        self.get(source).unwrap_or(source)
    }

    /// Whether `source` has a mapping.
    pub fn contains(&self, source: &str) -> bool {
        self.map.contains_key(source)
    }

    /// Number of mapped identifiers.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table has no mappings.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `(source, target)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Reject identifiers that could not round-trip through a tab-delimited line.
fn check_token(line: usize, source: &str, target: &str) -> Result<(), RenameError> {
    for (what, token) in [("source", source), ("target", target)] {
        if token.is_empty() {
            return Err(RenameError::malformed(
                line,
                format!("{}\t{}", source, target),
                format!("empty {} name", what),
            ));
        }
        if token.contains('\t') {
            return Err(RenameError::malformed(
                line,
                format!("{}\t{}", source, target),
                format!("{} name contains a tab", what),
            ));
        }
    }
    Ok(())
}

/// Serialization of an alias source on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasFormat {
    /// `old_name<TAB>new_name` lines
    Tsv,
    /// JSON object of `canonical: alias` strings (inverted on load)
    Json,
}

impl AliasFormat {
    /// Guess the format from a file extension: `.json` is a registry,
    /// anything else is TSV.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => AliasFormat::Json,
            _ => AliasFormat::Tsv,
        }
    }
}

impl FromStr for AliasFormat {
    type Err = RenameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" | "tab" => Ok(AliasFormat::Tsv),
            "json" => Ok(AliasFormat::Json),
            other => Err(RenameError::Config {
                msg: format!("unknown alias format '{}'", other),
            }),
        }
    }
}

/// Where an [`AliasTable`] comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasSource {
    /// Two-column TSV file, read as `old -> new`
    Delimited(PathBuf),
    /// Canonical -> alias registry document, read as `alias -> canonical`
    Registry(PathBuf),
    /// Constant table compiled into the program
    Builtin(BuiltinTable),
}

impl AliasSource {
    /// Pick a file-backed source for `path` in the given format.
    pub fn from_path(path: impl Into<PathBuf>, format: AliasFormat) -> Self {
        let path = path.into();
        match format {
            AliasFormat::Tsv => AliasSource::Delimited(path),
            AliasFormat::Json => AliasSource::Registry(path),
        }
    }

    /// Build the table this source describes.
    pub fn build(&self, policy: MalformedPolicy) -> Result<AliasTable, RenameError> {
        let table = match self {
            AliasSource::Delimited(path) => load_delimited(path, policy)?,
            AliasSource::Registry(path) => CanonicalRegistry::from_file(path, policy)?.invert(),
            AliasSource::Builtin(table) => table.to_alias_table(),
        };
        log::debug!("Loaded {} aliases from {}", table.len(), self);
        Ok(table)
    }
}

impl std::fmt::Display for AliasSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AliasSource::Delimited(path) => write!(f, "{}", path.display()),
            AliasSource::Registry(path) => write!(f, "{} (inverted)", path.display()),
            AliasSource::Builtin(table) => write!(f, "built-in table {}", table),
        }
    }
}

/// Fail with [`RenameError::AliasSourceNotFound`] unless `path` is a file.
pub(crate) fn require_alias_file(path: &Path) -> Result<(), RenameError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(RenameError::AliasSourceNotFound {
            path: path.display().to_string(),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasTable {
    /// Collect pairs without validation errors; invalid pairs are skipped.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (i, (source, target)) in iter.into_iter().enumerate() {
            if let Err(err) = table.insert(i + 1, source.into(), target.into()) {
                log::warn!("Skipping alias pair: {}", err);
            }
        }
        table
    }
}
