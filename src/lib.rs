// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-rename: chromosome alias renaming for genomic interval files
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Renames the leading chromosome/contig column of bedGraph/BED tracks and
//! chrom.sizes tables through an alias table, passing header, comment and
//! unrecognized lines through untouched. Also computes RPM scale factors for
//! BED read files.
//!
//! # Example
//!
//! ```
//! use ferro_rename::{rename_bedgraph, AliasTable};
//!
//! let table = AliasTable::from_pairs([("chrI", "NC_001133.9")]).unwrap();
//!
//! let mut out = Vec::new();
//! rename_bedgraph("chrI\t100\t200\t5.0\n".as_bytes(), &mut out, &table).unwrap();
//! assert_eq!(out, b"NC_001133.9\t100\t200\t5.0\n");
//! ```

pub mod alias;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod rename;
pub mod rpm;

// Re-export commonly used types
pub use alias::{AliasFormat, AliasSource, AliasTable, BuiltinTable, CanonicalRegistry, MalformedPolicy};
pub use error::{ErrorCode, RenameError};
pub use rename::{classify, rename, rename_bedgraph, rename_sizes, FileKind, LineKind, RenameStats};
pub use rpm::RpmScale;

/// Result type alias for ferro-rename operations
pub type Result<T> = std::result::Result<T, RenameError>;
