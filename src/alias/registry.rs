//! Canonical -> alias registry documents.
//!
//! A registry is a flat JSON object authored canonical-first:
//!
//! ```json
//! {
//!   "NC_001133.9": "chrI",
//!   "NC_001134.8": "chrII"
//! }
//! ```
//!
//! Renaming is applied alias-first, so the table handed to the renamer is the
//! *inverse* of the document (`chrI -> NC_001133.9`). The inversion is the
//! explicit [`CanonicalRegistry::invert`] step and is applied to every
//! registry source, whatever its content. A registry that is already written
//! alias-first will therefore produce a backwards table.
//!
//! # Example
//!
//! ```
//! use ferro_rename::alias::{CanonicalRegistry, MalformedPolicy};
//!
//! let registry = CanonicalRegistry::from_json_str(
//!     r#"{"NC_001133.9": "chrI"}"#,
//!     MalformedPolicy::Abort,
//! ).unwrap();
//! assert_eq!(registry.alias_of("NC_001133.9"), Some("chrI"));
//!
//! let table = registry.invert();
//! assert_eq!(table.get("chrI"), Some("NC_001133.9"));
//! ```

use super::{check_token, require_alias_file, AliasTable, MalformedPolicy};
use crate::error::RenameError;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Registry entries in document order, canonical name first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalRegistry {
    entries: Vec<(String, String)>,
}

impl CanonicalRegistry {
    /// Load a registry document from disk.
    pub fn from_file<P: AsRef<Path>>(path: P, policy: MalformedPolicy) -> Result<Self, RenameError> {
        let path = path.as_ref();
        require_alias_file(path)?;
        let file = File::open(path).map_err(|e| RenameError::Io {
            msg: format!("Failed to open alias registry {}: {}", path.display(), e),
        })?;
        Self::from_reader(BufReader::new(file), policy)
    }

    /// Parse a registry document from a reader.
    pub fn from_reader<R: Read>(reader: R, policy: MalformedPolicy) -> Result<Self, RenameError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value, policy)
    }

    /// Parse a registry document from a string.
    pub fn from_json_str(content: &str, policy: MalformedPolicy) -> Result<Self, RenameError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value, policy)
    }

    fn from_value(value: Value, policy: MalformedPolicy) -> Result<Self, RenameError> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(RenameError::Json {
                    msg: format!(
                        "alias registry must be a JSON object of canonical -> alias names, found {}",
                        json_kind(&other)
                    ),
                })
            }
        };

        let mut entries = Vec::with_capacity(object.len());
        for (idx, (canonical, alias)) in object.into_iter().enumerate() {
            let entry_num = idx + 1;
            let alias = match alias {
                Value::String(alias) => alias,
                other => {
                    policy.handle(RenameError::malformed(
                        entry_num,
                        format!("{}: {}", canonical, other),
                        format!("alias must be a string, found {}", json_kind(&other)),
                    ))?;
                    continue;
                }
            };
            if let Err(err) = check_token(entry_num, &canonical, &alias) {
                policy.handle(err)?;
                continue;
            }
            entries.push((canonical, alias));
        }

        Ok(Self { entries })
    }

    /// Canonical -> alias entries in document order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// The alias recorded for a canonical name (last entry wins).
    pub fn alias_of(&self, canonical: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(c, _)| c == canonical)
            .map(|(_, a)| a.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Turn the canonical -> alias registry into the alias -> canonical table
    /// used for renaming.
    ///
    /// When several canonical names share one alias, the entry later in the
    /// document wins.
    pub fn invert(&self) -> AliasTable {
        let mut table = AliasTable::new();
        for (canonical, alias) in &self.entries {
            table.map.insert(alias.clone(), canonical.clone());
        }
        table
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
