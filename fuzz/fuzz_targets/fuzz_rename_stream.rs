//! Fuzz target for the streaming renamer
//!
//! Feeds arbitrary bytes through both file kinds and checks the line-count
//! guarantees hold for any input.

#![no_main]

use ferro_rename::{rename, BuiltinTable, FileKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Diminishing returns beyond a few kilobytes
    if data.len() > 8192 {
        return;
    }

    let table = BuiltinTable::SacCer3.to_alias_table();

    let mut out = Vec::new();
    let stats = rename(FileKind::BedGraph, data, &mut out, &table).unwrap();
    assert_eq!(stats.lines_read, stats.lines_written);
    // Every `\r` is part of a terminator, and each terminator becomes one `\n`
    assert!(!out.contains(&b'\r'));
    let terminators = data
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\r' || (b == b'\n' && (i == 0 || data[i - 1] != b'\r')))
        .count();
    assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), terminators);

    let mut out = Vec::new();
    let stats = rename(FileKind::Sizes, data, &mut out, &table).unwrap();
    assert_eq!(stats.lines_read, stats.lines_written + stats.blank_skipped);
});
