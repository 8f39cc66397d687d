use crate::adapters::storage::TextEncoding;
use crate::config::paths::{DEFAULT_CARS_FILE, DEFAULT_MARKER, DEFAULT_MOTOR_BOATS_FILE};
use crate::utils::error::{FleetError, Result};
use crate::utils::validation::{
    validate_file_name, validate_non_empty_string, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub output: OutputConfig,
    pub generator: GeneratorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Skips marker discovery when set.
    pub dir: Option<PathBuf>,
    pub cars_file: String,
    pub motor_boats_file: String,
    pub encoding: TextEncoding,
    /// File name or `*.ext` pattern marking the project root.
    pub marker: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            cars_file: DEFAULT_CARS_FILE.to_string(),
            motor_boats_file: DEFAULT_MOTOR_BOATS_FILE.to_string(),
            encoding: TextEncoding::default(),
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| FleetError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FleetError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are kept.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.output.dir {
            validate_path("output.dir", &dir.to_string_lossy())?;
        }
        validate_file_name("output.cars_file", &self.output.cars_file)?;
        validate_file_name("output.motor_boats_file", &self.output.motor_boats_file)?;
        validate_non_empty_string("output.marker", &self.output.marker)?;

        if self.output.cars_file == self.output.motor_boats_file {
            return Err(FleetError::ConfigValidationError {
                field: "output.motor_boats_file".to_string(),
                message: "Cars and motor boats must be written to different files".to_string(),
            });
        }

        Ok(())
    }
}
