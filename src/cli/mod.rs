//! CLI utilities for ferro-rename
//!
//! This module provides testable functions used by the CLI binary: opening
//! inputs and outputs (with `-` meaning stdin/stdout) and formatting reports.

pub mod format;

pub use format::{output_error, output_rpm_scale, output_stats, OutputFormat};

use crate::error::RenameError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Path that stands for stdin (as input) or stdout (as output).
pub const STDIO_PATH: &str = "-";

/// Whether `path` is the `-` stdin/stdout sentinel.
///
/// # Examples
///
/// ```
/// use ferro_rename::cli::is_stdio;
/// use std::path::Path;
///
/// assert!(is_stdio(Path::new("-")));
/// assert!(!is_stdio(Path::new("out.bedGraph")));
/// ```
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

/// Fail with [`RenameError::InputNotFound`] unless `path` is `-` or a file.
pub fn require_input(path: &Path) -> Result<(), RenameError> {
    if is_stdio(path) || path.is_file() {
        Ok(())
    } else {
        Err(RenameError::InputNotFound {
            path: path.display().to_string(),
        })
    }
}

/// Open an input for buffered line reading.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, RenameError> {
    require_input(path)?;
    if is_stdio(path) {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|e| RenameError::Io {
        msg: format!("Failed to open {}: {}", path.display(), e),
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Create a buffered output, truncating an existing file.
pub fn open_output(path: &Path) -> Result<Box<dyn Write>, RenameError> {
    if is_stdio(path) {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    let file = File::create(path).map_err(|e| RenameError::Io {
        msg: format!("Failed to create {}: {}", path.display(), e),
    })?;
    Ok(Box::new(BufWriter::new(file)))
}
