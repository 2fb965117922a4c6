//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then command line flags (applied by the CLI).
//! The extraction heuristics themselves are fixed in [`crate::constants`].

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_FILE_EXTENSION, DEFAULT_INPUT_DIR,
    DEFAULT_OUTPUT_DIR, ENV_INPUT_PATH, ENV_OUTPUT_PATH, MAX_WORKERS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Input discovery and output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Directory holding the statement XML files
    pub input_path: PathBuf,

    /// Directory receiving the generated workbook
    pub output_path: PathBuf,

    /// Explicit output file; a timestamped name in `output_path` is used when unset
    pub output_file: Option<PathBuf>,

    /// Extension of input files, without the dot
    pub file_extension: String,

    /// Search subdirectories of the input directory
    pub recursive: bool,

    /// Classify and extract without writing the workbook
    pub dry_run: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: None,
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            recursive: false,
            dry_run: false,
        }
    }
}

/// Concurrency settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of files processed concurrently
    pub workers: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().clamp(1, MAX_WORKERS),
        }
    }
}

/// Logging settings used when the CLI installs the subscriber
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive such as "debug" or "statement_extractor=trace"
    pub level: Option<String>,

    /// Only report errors
    pub quiet: bool,
}

/// Main configuration for the statement extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub performance: PerformanceConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from defaults, a TOML file and the environment
    ///
    /// An explicit `config_file` must exist. Without one, the user config
    /// file is read when present.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_toml_file(path)?,
            None => match Self::user_config_path().filter(|path| path.is_file()) {
                Some(path) => Self::from_toml_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a TOML configuration file; missing keys take their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config file {}", path.display()), e))?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            Error::Configuration { message } => {
                Error::configuration(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;

        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Parse TOML configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::configuration(format!("Invalid TOML: {}", e)))
    }

    /// `<config_dir>/statement-extractor/config.toml`, if the platform has a config dir
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Apply input/output directory overrides from environment variables
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(input) = lookup(ENV_INPUT_PATH).filter(|v| !v.is_empty()) {
            debug!(input = %input, "Input path overridden from environment");
            self.processing.input_path = PathBuf::from(input);
        }
        if let Some(output) = lookup(ENV_OUTPUT_PATH).filter(|v| !v.is_empty()) {
            debug!(output = %output, "Output path overridden from environment");
            self.processing.output_path = PathBuf::from(output);
        }
    }

    /// Set the input directory
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.processing.input_path = path.into();
        self
    }

    /// Set the output directory
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.processing.output_path = path.into();
        self
    }

    /// Write to an explicit output file
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.processing.output_file = Some(path.into());
        self
    }

    /// Set the input file extension (a leading dot is ignored)
    pub fn with_file_extension(mut self, extension: &str) -> Self {
        self.processing.file_extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Search the input directory recursively
    pub fn with_recursive(mut self) -> Self {
        self.processing.recursive = true;
        self
    }

    /// Enable dry run mode
    pub fn with_dry_run(mut self) -> Self {
        self.processing.dry_run = true;
        self
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.performance.workers = workers;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let workers = self.performance.workers;
        if workers == 0 {
            return Err(Error::configuration("workers must be at least 1"));
        }
        if workers > MAX_WORKERS {
            return Err(Error::configuration(format!(
                "workers must be at most {} (got {})",
                MAX_WORKERS, workers
            )));
        }

        let extension = self.processing.file_extension.trim();
        if extension.is_empty() {
            return Err(Error::configuration("file extension must not be empty"));
        }
        if extension.contains(['/', '\\', '*', '?']) {
            return Err(Error::configuration(format!(
                "file extension '{}' contains path or pattern characters",
                extension
            )));
        }

        let input = &self.processing.input_path;
        if input.exists() && !input.is_dir() {
            return Err(Error::configuration(format!(
                "input path {} is not a directory",
                input.display()
            )));
        }

        Ok(())
    }
}
