pub mod paths;
pub mod toml_config;

use crate::adapters::storage::TextEncoding;
use crate::domain::ports::{ConfigProvider, OutputPaths};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Fully resolved settings; output paths are fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct Settings {
    pub output_paths: OutputPaths,
    pub encoding: TextEncoding,
    pub seed: Option<u64>,
}

impl Settings {
    /// `start_dir` is where marker discovery begins when no output
    /// directory is configured.
    pub fn resolve(config: &TomlConfig, start_dir: &Path) -> Result<Self> {
        config.validate()?;

        let dir = paths::resolve_output_dir(
            config.output.dir.as_deref(),
            start_dir,
            &config.output.marker,
        );
        let output_paths =
            OutputPaths::in_dir(&dir, &config.output.cars_file, &config.output.motor_boats_file);

        Ok(Self {
            output_paths,
            encoding: config.output.encoding,
            seed: config.generator.seed,
        })
    }
}

impl ConfigProvider for Settings {
    fn output_paths(&self) -> &OutputPaths {
        &self.output_paths
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn encoding(&self) -> TextEncoding {
        self.encoding
    }
}

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use crate::utils::validation::validate_range;
    use clap::Parser;
    use std::path::PathBuf;

    pub const MAX_ITERATIONS: usize = 1_000_000;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "fleet-etl")]
    #[command(about = "Generates random cars and motor boats and appends them to per-kind files")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Directory for the output files (skips project root discovery)
        #[arg(long)]
        pub output_dir: Option<PathBuf>,

        /// Seed for a reproducible run
        #[arg(long)]
        pub seed: Option<u64>,

        /// Run this many iterations without prompting
        #[arg(long)]
        pub iterations: Option<usize>,

        /// Output file encoding (utf16 or utf8)
        #[arg(long)]
        pub encoding: Option<TextEncoding>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    impl CliConfig {
        /// Configuration file merged with the command line flags.
        pub fn load(&self) -> Result<TomlConfig> {
            let mut config = match &self.config {
                Some(path) => TomlConfig::from_file(path)?,
                None => TomlConfig::default(),
            };
            self.apply_overrides(&mut config);
            Ok(config)
        }

        pub fn apply_overrides(&self, config: &mut TomlConfig) {
            if let Some(dir) = &self.output_dir {
                config.output.dir = Some(dir.clone());
            }
            if let Some(seed) = self.seed {
                config.generator.seed = Some(seed);
            }
            if let Some(encoding) = self.encoding {
                config.output.encoding = encoding;
            }
            config.logging.verbose |= self.verbose;
            config.logging.json |= self.json_logs;
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(iterations) = self.iterations {
                validate_range("iterations", iterations, 1, MAX_ITERATIONS)?;
            }
            Ok(())
        }
    }

}
