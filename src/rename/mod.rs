//! Alias-driven streaming renamer.
//!
//! Each line goes through [`classify`]; structural and tab-less lines are
//! written unchanged, data lines have their leading identifier resolved
//! through an [`AliasTable`](crate::alias::AliasTable) and everything after
//! the first tab copied verbatim.

pub mod classify;
pub mod rewrite;
pub mod stream;

pub use classify::{classify, LineKind, STRUCTURAL_PREFIXES};
pub use rewrite::{resolve_identifier, rewrite, write_data_line};
pub use stream::{rename, rename_bedgraph, rename_sizes, FileKind, RenameStats};
