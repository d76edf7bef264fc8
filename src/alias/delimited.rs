//! Two-column TSV alias files.
//!
//! Each record is `old_name<TAB>new_name`, one per line, no header. Blank
//! lines are ignored. Records that do not split into exactly two non-empty
//! fields are handled according to [`MalformedPolicy`].

use super::{require_alias_file, AliasTable, MalformedPolicy};
use crate::error::RenameError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load a TSV alias file from disk.
pub fn load_delimited<P: AsRef<Path>>(
    path: P,
    policy: MalformedPolicy,
) -> Result<AliasTable, RenameError> {
    let path = path.as_ref();
    require_alias_file(path)?;
    let file = File::open(path).map_err(|e| RenameError::Io {
        msg: format!("Failed to open alias file {}: {}", path.display(), e),
    })?;
    parse_delimited(BufReader::new(file), policy)
}

/// Parse TSV alias records from a reader.
pub fn parse_delimited<R: BufRead>(
    reader: R,
    policy: MalformedPolicy,
) -> Result<AliasTable, RenameError> {
    let mut table = AliasTable::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = idx + 1;
        let record = line.strip_suffix('\r').unwrap_or(&line);

        if record.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = record.split('\t').collect();
        if fields.len() != 2 {
            policy.handle(RenameError::malformed(
                line_num,
                record,
                format!("expected 2 fields, found {}", fields.len()),
            ))?;
            continue;
        }

        if let Err(err) = table.insert(line_num, fields[0].to_string(), fields[1].to_string()) {
            policy.handle(err)?;
        }
    }

    Ok(table)
}
