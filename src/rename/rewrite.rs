//! Data-line rewriting.

use crate::alias::AliasTable;
use std::io::{self, Write};

/// Look up an identifier, returning the mapped name if there is one.
///
/// Identifiers that are not valid UTF-8 cannot be table keys and always miss.
pub fn resolve_identifier<'t>(identifier: &[u8], table: &'t AliasTable) -> Option<&'t str> {
    std::str::from_utf8(identifier)
        .ok()
        .and_then(|id| table.get(id))
}

/// Write `resolved_identifier<TAB>remainder` to `writer`.
///
/// The remainder is copied byte-for-byte; no column in it is inspected.
/// Returns whether the identifier was renamed.
pub fn write_data_line<W: Write + ?Sized>(
    writer: &mut W,
    identifier: &[u8],
    remainder: &[u8],
    table: &AliasTable,
) -> io::Result<bool> {
    let renamed = resolve_identifier(identifier, table);
    writer.write_all(renamed.map_or(identifier, str::as_bytes))?;
    writer.write_all(b"\t")?;
    writer.write_all(remainder)?;
    Ok(renamed.is_some())
}

/// Rebuild a data line as an owned buffer.
///
/// # Examples
///
/// ```
/// use ferro_rename::alias::AliasTable;
/// use ferro_rename::rename::rewrite;
///
/// let table = AliasTable::from_pairs([("chrI", "NC_001133.9")]).unwrap();
/// assert_eq!(rewrite(b"chrI", b"100\t200\t5.0", &table), b"NC_001133.9\t100\t200\t5.0");
/// assert_eq!(rewrite(b"chrQ", b"1", &table), b"chrQ\t1");
/// ```
pub fn rewrite(identifier: &[u8], remainder: &[u8], table: &AliasTable) -> Vec<u8> {
    let mut out = Vec::with_capacity(identifier.len() + remainder.len() + 16);
    // Writing into a Vec cannot fail
    let _ = write_data_line(&mut out, identifier, remainder, table);
    out
}
