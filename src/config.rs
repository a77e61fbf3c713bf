/// Configuration resolution module
///
/// This module handles:
/// - Loading the renderer configuration from a TOML file
/// - Resolving which file to use (explicit path, environment, user config dir)
/// - Validating values before any renderer sees them
use crate::error::{ReportError, Result};
use crate::report::PageOrientation;
use log::debug;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at a configuration file
pub const CONFIG_ENV_VAR: &str = "GRUA_REPORT_CONFIG";

/// Default per-page row capacity for the document renderer
pub const DEFAULT_ROWS_PER_PAGE: usize = 25;

/// Get the default configuration file location
/// Uses platform-specific config directories:
/// - Linux: ~/.config/grua-report/config.toml
/// - macOS: ~/Library/Application Support/grua-report/config.toml
/// - Windows: %APPDATA%/grua-report/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("grua-report").join("config.toml"))
}

/// Renderer and output settings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub document: DocumentConfig,
    pub delimited: DelimitedConfig,
    pub output: OutputConfig,
}

/// `[document]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// Maximum table rows per page
    pub rows_per_page: usize,
    pub orientation: PageOrientation,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self { rows_per_page: DEFAULT_ROWS_PER_PAGE, orientation: PageOrientation::Landscape }
    }
}

/// `[delimited]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DelimitedConfig {
    /// Single ASCII field separator for csv output. Tab is refused: use the tsv format
    pub delimiter: String,
    /// Prefix the output with a UTF-8 byte order mark (helps some spreadsheet imports)
    pub include_bom: bool,
}

impl Default for DelimitedConfig {
    fn default() -> Self {
        Self { delimiter: ",".to_string(), include_bom: false }
    }
}

impl DelimitedConfig {
    /// The delimiter as a byte. Only valid after [`ReportConfig::validate`].
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }
}

/// `[output]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory the CLI writes artifacts into
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { directory: PathBuf::from("informes") }
    }
}

impl ReportConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: ReportConfig =
            toml::from_str(s).map_err(|e| ReportError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading report config from {:?}", path);
        let contents = fs::read_to_string(path)
            .map_err(|e| ReportError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Resolve the configuration to use
    ///
    /// Order: explicit path → `GRUA_REPORT_CONFIG` → user config dir (if the file exists)
    /// → built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
            if !env_path.trim().is_empty() {
                debug!("Using config from {}", CONFIG_ENV_VAR);
                return Self::load(Path::new(&env_path));
            }
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.document.rows_per_page == 0 {
            return Err(ReportError::Config("document.rows_per_page must be at least 1".to_string()));
        }

        let delimiter = self.delimited.delimiter.as_bytes();
        if delimiter.len() != 1 || !delimiter[0].is_ascii() {
            return Err(ReportError::Config(format!(
                "delimited.delimiter must be a single ASCII character, got {:?}",
                self.delimited.delimiter
            )));
        }
        if delimiter[0] == b'\t' {
            return Err(ReportError::Config(
                "delimited.delimiter cannot be a tab, use the tsv format instead".to_string(),
            ));
        }
        if matches!(delimiter[0], b'"' | b'\r' | b'\n') {
            return Err(ReportError::Config(format!(
                "delimited.delimiter cannot be {:?}",
                self.delimited.delimiter
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
