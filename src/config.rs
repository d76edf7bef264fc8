//! Configuration file support for ferro-rename.
//!
//! This module loads `.ferro-rename.toml` configuration files that set
//! defaults for the renaming commands.
//!
//! # Example Configuration
//!
//! ```toml
//! [rename]
//! on-malformed = "abort"
//! table = "sacCer3"
//! alias-format = "json"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-rename.toml` in current directory
//! 2. `~/.config/ferro-rename/config.toml`
//!
//! CLI flags take precedence over config file settings.

use crate::alias::{AliasFormat, BuiltinTable, MalformedPolicy};
use crate::error::RenameError;
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed configuration from a .ferro-rename.toml file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameConfig {
    /// `[rename]` section.
    pub rename: RenameSection,
}

/// Rename section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameSection {
    /// Policy for malformed alias records (`skip` or `abort`).
    pub on_malformed: Option<String>,
    /// Built-in table for chrom.sizes renaming.
    pub table: Option<String>,
    /// Alias file format (`auto`, `tsv` or `json`).
    pub alias_format: Option<String>,
}

impl RenameConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.ferro-rename.toml` in current directory
    /// 2. `~/.config/ferro-rename/config.toml`
    pub fn load() -> Option<Self> {
        let cwd_config = PathBuf::from(".ferro-rename.toml");
        if cwd_config.exists() {
            match Self::load_from_path(&cwd_config) {
                Ok(config) => return Some(config),
                Err(e) => log::warn!("Ignoring {}: {}", cwd_config.display(), e),
            }
        }

        if let Some(home) = dirs_home() {
            let home_config = home
                .join(".config")
                .join("ferro-rename")
                .join("config.toml");
            if home_config.exists() {
                match Self::load_from_path(&home_config) {
                    Ok(config) => return Some(config),
                    Err(e) => log::warn!("Ignoring {}: {}", home_config.display(), e),
                }
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        // Only flat string keys are needed, so this is a minimal TOML reader
        let mut config = RenameConfig::default();
        let mut in_rename = false;

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.starts_with('#') || line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let section = &line[1..line.len() - 1];
                in_rename = section.trim() == "rename";
                continue;
            }

            if !in_rename {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!(
                    "line {}: expected `key = value`, found {:?}",
                    idx + 1,
                    line
                )));
            };
            let value = parse_string(value);

            match key.trim() {
                "on-malformed" => config.rename.on_malformed = Some(value),
                "table" => config.rename.table = Some(value),
                "alias-format" => config.rename.alias_format = Some(value),
                _ => {}
            }
        }

        Ok(config)
    }

    /// Malformed-record policy: CLI value, then config, then the default.
    pub fn malformed_policy(
        &self,
        cli: Option<&str>,
    ) -> Result<MalformedPolicy, RenameError> {
        match cli.or(self.rename.on_malformed.as_deref()) {
            Some(value) => value.parse(),
            None => Ok(MalformedPolicy::default()),
        }
    }

    /// Built-in table: CLI value, then config, then the default.
    pub fn builtin_table(&self, cli: Option<&str>) -> Result<BuiltinTable, RenameError> {
        match cli.or(self.rename.table.as_deref()) {
            Some(value) => value.parse(),
            None => Ok(BuiltinTable::default()),
        }
    }

    /// Alias file format for `path`: CLI value, then config, then detection
    /// from the extension. `auto` also means detection.
    pub fn alias_format(&self, cli: Option<&str>, path: &Path) -> Result<AliasFormat, RenameError> {
        match cli.or(self.rename.alias_format.as_deref()) {
            Some(value) if !value.eq_ignore_ascii_case("auto") => value.parse(),
            _ => Ok(AliasFormat::detect(path)),
        }
    }
}

/// Configuration loading error.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String),
    /// Parse error in config file.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for RenameError {
    fn from(err: ConfigError) -> Self {
        RenameError::Config {
            msg: err.to_string(),
        }
    }
}

/// Parse a TOML string value, dropping quotes and a trailing comment.
fn parse_string(value: &str) -> String {
    let value = value.trim();
    let value = match value.find(" #") {
        Some(pos) => value[..pos].trim(),
        None => value,
    };
    value.trim_matches('"').trim_matches('\'').to_string()
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = RenameConfig::parse("").unwrap();
        assert_eq!(config, RenameConfig::default());
    }

    #[test]
    fn test_parse_rename_section() {
        let content = r#"
# defaults for the lab
[rename]
on-malformed = "abort"
table = 'sacCer3'
alias-format = "json"  # registries only
"#;
        let config = RenameConfig::parse(content).unwrap();
        assert_eq!(config.rename.on_malformed.as_deref(), Some("abort"));
        assert_eq!(config.rename.table.as_deref(), Some("sacCer3"));
        assert_eq!(config.rename.alias_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_other_sections_ignored() {
        let content = r#"
[other]
on-malformed = "abort"
garbage line
[rename]
unknown = "x"
"#;
        let config = RenameConfig::parse(content).unwrap();
        assert!(config.rename.on_malformed.is_none());
    }

    #[test]
    fn test_malformed_line_in_section() {
        let err = RenameConfig::parse("[rename]\njust words\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let config = RenameConfig::parse("[rename]\non-malformed = \"abort\"\n").unwrap();
        assert_eq!(config.malformed_policy(None).unwrap(), MalformedPolicy::Abort);
        assert_eq!(
            config.malformed_policy(Some("skip")).unwrap(),
            MalformedPolicy::Skip
        );
        assert_eq!(
            RenameConfig::default().malformed_policy(None).unwrap(),
            MalformedPolicy::Skip
        );
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let config = RenameConfig::parse("[rename]\ntable = \"hg38\"\non-malformed = \"maybe\"\n")
            .unwrap();
        assert!(matches!(
            config.builtin_table(None),
            Err(RenameError::Config { .. })
        ));
        assert!(config.malformed_policy(None).is_err());
        assert_eq!(
            config.builtin_table(Some("R64")).unwrap(),
            BuiltinTable::SacCer3
        );
    }

    #[test]
    fn test_alias_format_resolution() {
        let config = RenameConfig::default();
        let json = Path::new("alias.json");
        let tsv = Path::new("alias.tsv");
        assert_eq!(config.alias_format(None, json).unwrap(), AliasFormat::Json);
        assert_eq!(config.alias_format(Some("auto"), tsv).unwrap(), AliasFormat::Tsv);
        assert_eq!(config.alias_format(Some("json"), tsv).unwrap(), AliasFormat::Json);

        let config = RenameConfig::parse("[rename]\nalias-format = \"tsv\"\n").unwrap();
        assert_eq!(config.alias_format(None, json).unwrap(), AliasFormat::Tsv);
    }

    #[test]
    fn test_load_from_path() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[rename]").unwrap();
        writeln!(file, "table = \"sacCer3\"").unwrap();
        file.flush().unwrap();

        let config = RenameConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.rename.table.as_deref(), Some("sacCer3"));

        assert!(matches!(
            RenameConfig::load_from_path(Path::new("/nonexistent/config.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
