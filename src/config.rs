use crate::error::{DeckAuditError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Relative path the audit deck is expected at when no path is given.
pub const DEFAULT_INPUT_PATH: &str = "data/Strategic & Operational Overview.pptx";

/// Directory all analysis artifacts are written into.
pub const DEFAULT_OUTPUT_DIR: &str = "powerpoint-analysis";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub input: InputConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// A text run shorter than this many characters may become the slide title.
    pub title_max_chars: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub base_directory: PathBuf,
    pub write_reconciliation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INPUT_PATH),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            title_max_chars: 100,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            write_reconciliation: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DeckAuditError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| DeckAuditError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| DeckAuditError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["deckaudit.toml", ".deckaudit.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref input) = cli_args.input {
            self.input.path = input.clone();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.base_directory = output_dir.clone();
        }

        if let Some(title_max_chars) = cli_args.title_max_chars {
            self.extraction.title_max_chars = title_max_chars;
        }

        if let Some(write_reconciliation) = cli_args.write_reconciliation {
            self.output.write_reconciliation = write_reconciliation;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| DeckAuditError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| DeckAuditError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.path.as_os_str().is_empty() {
            return Err(DeckAuditError::Config {
                message: "Input path must not be empty".to_string(),
            });
        }

        if self.extraction.title_max_chars == 0 {
            return Err(DeckAuditError::Config {
                message: "Title length limit must be greater than 0".to_string(),
            });
        }

        if self.output.base_directory.as_os_str().is_empty() {
            return Err(DeckAuditError::Config {
                message: "Output directory must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub title_max_chars: Option<usize>,
    pub write_reconciliation: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: Option<PathBuf>) -> Self {
        self.input = input;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_title_max_chars(mut self, limit: Option<usize>) -> Self {
        self.title_max_chars = limit;
        self
    }

    pub fn with_write_reconciliation(mut self, write: Option<bool>) -> Self {
        self.write_reconciliation = write;
        self
    }
}
