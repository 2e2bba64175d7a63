// Configuration loading and parsing (rankdiff.toml).

use rankdiff_core::sources::SourceSpec;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up under `config/` and seeded from `defaults/`.
pub const CONFIG_FILE: &str = "rankdiff.toml";

const DEFAULT_MAX_ROWS: usize = 400;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Fully loaded and validated configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Only the first `max_rows` data rows of each source are read.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Ranking sources keyed by the id reports refer to them by.
    pub sources: BTreeMap<String, SourceSpec>,
    #[serde(default)]
    pub reports: Vec<ReportConfig>,
}

/// One comparison to produce: `primary` drives the sort order and is the
/// baseline the `secondary` source is judged against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Output file stem: `<name>.csv` and `<name>_formatted.xlsx`.
    pub name: String,
    pub primary: String,
    pub secondary: String,
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/output")
}

impl Config {
    pub fn source(&self, id: &str) -> Option<&SourceSpec> {
        self.sources.get(id)
    }

    pub fn report(&self, name: &str) -> Option<&ReportConfig> {
        self.reports.iter().find(|r| r.name == name)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/rankdiff.toml` relative to `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    load_config_file(&base_dir.join("config").join(CONFIG_FILE))
}

/// Load and validate an explicit config file.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let text = read_file(path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Seed `config/rankdiff.toml` from `defaults/rankdiff.toml` when it is
/// missing. Returns the path written, or `None` when the config file already
/// exists. An existing file is never touched.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let default = base_dir.join("defaults").join(CONFIG_FILE);
    let content = std::fs::read(&default).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!(
            "no config/{CONFIG_FILE} and cannot read {}: {e}; \
             run from the project root or pass --config",
            default.display()
        ),
    })?;

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", dir.display()),
        })?;
    }

    // create_new so a file that appeared since the check above is kept.
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("failed to create {}: {e}", target.display()),
            });
        }
    };
    dest.write_all(&content).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;

    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Seeds the config file from `defaults/` first when it is missing.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.max_rows == 0 {
        return Err(ConfigError::ValidationError {
            field: "max_rows".into(),
            message: "must be greater than 0".into(),
        });
    }

    for (id, source) in &config.sources {
        if source.label.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("sources.{id}.label"),
                message: "must not be empty".into(),
            });
        }
    }

    if config.reports.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "reports".into(),
            message: "at least one report is required".into(),
        });
    }

    for (i, report) in config.reports.iter().enumerate() {
        if report.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("reports[{i}].name"),
                message: "must not be empty".into(),
            });
        }
        if config.reports[..i].iter().any(|r| r.name == report.name) {
            return Err(ConfigError::ValidationError {
                field: format!("reports[{i}].name"),
                message: format!("duplicate report name '{}'", report.name),
            });
        }
        for (field, id) in [("primary", &report.primary), ("secondary", &report.secondary)] {
            if !config.sources.contains_key(id) {
                return Err(ConfigError::ValidationError {
                    field: format!("reports[{i}].{field}"),
                    message: format!("unknown source '{id}'"),
                });
            }
        }
        if report.primary == report.secondary {
            return Err(ConfigError::ValidationError {
                field: format!("reports[{i}].secondary"),
                message: "must differ from primary".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
