//! File-level rename and RPM commands.
//!
//! These functions wire paths, alias sources and the streaming renamer
//! together for the ferro-rename CLI. Every check that can fail before any
//! output exists (input present, alias source present and well-formed) runs
//! before the output file is created.

use crate::alias::{AliasSource, MalformedPolicy};
use crate::cli::{open_input, open_output, require_input};
use crate::error::RenameError;
use crate::rename::{rename, FileKind, RenameStats};
use crate::rpm::RpmScale;
use std::path::PathBuf;
use std::time::Instant;

/// One rename run over a file (or stdin) into a file (or stdout).
#[derive(Debug, Clone)]
pub struct RenameJob {
    /// bedGraph or chrom.sizes handling
    pub kind: FileKind,
    /// Input path, `-` for stdin
    pub input: PathBuf,
    /// Output path, `-` for stdout
    pub output: PathBuf,
    /// Where the alias table comes from
    pub alias: AliasSource,
    /// What to do with malformed alias records
    pub policy: MalformedPolicy,
}

impl RenameJob {
    /// Validate inputs, build the alias table and stream the input to the
    /// output.
    pub fn run(&self) -> Result<RenameStats, RenameError> {
        require_input(&self.input)?;
        let table = self.alias.build(self.policy)?;

        let start = Instant::now();
        let reader = open_input(&self.input)?;
        let mut writer = open_output(&self.output)?;
        let stats = rename(self.kind, reader, &mut writer, &table)?;

        log::debug!(
            "{} -> {} in {:.3}s",
            self.input.display(),
            self.output.display(),
            start.elapsed().as_secs_f64()
        );
        Ok(stats)
    }
}

/// Count reads in a BED file and compute its RPM scale factor.
pub fn rpm_alpha(bed: &std::path::Path) -> Result<RpmScale, RenameError> {
    RpmScale::from_bed(bed)
}
