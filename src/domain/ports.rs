use crate::adapters::storage::TextEncoding;
use crate::domain::model::{Batches, Extraction, LoadReport, Transport, TransportKind};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// One generate, classify, write pass.
pub trait Pipeline {
    fn extract(&mut self) -> Result<Extraction>;
    fn transform(&self, transports: &[Transport]) -> Result<Batches>;
    /// Write failures are reported per kind instead of aborting the load.
    fn load(&self, batches: &Batches) -> LoadReport;
}

/// Destination for rendered record batches.
pub trait Storage {
    /// Appends `text` to the file at `path`. Never truncates existing content.
    fn append_text(&self, path: &Path, text: &str) -> Result<()>;

    fn read_text(&self, path: &Path) -> Result<String>;
}

/// Asked after every iteration whether the loop should run again.
pub trait ContinuePrompt {
    fn should_continue(&mut self) -> Result<bool>;
}

pub trait ConfigProvider {
    fn output_paths(&self) -> &OutputPaths;
    fn seed(&self) -> Option<u64>;
    /// Encoding the storage should write new and existing files in.
    fn encoding(&self) -> TextEncoding;
}

/// Per-kind output files, resolved once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub cars: PathBuf,
    pub motor_boats: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path, cars_file: &str, motor_boats_file: &str) -> Self {
        Self {
            cars: dir.join(cars_file),
            motor_boats: dir.join(motor_boats_file),
        }
    }

    pub fn for_kind(&self, kind: TransportKind) -> &Path {
        match kind {
            TransportKind::Car => &self.cars,
            TransportKind::MotorBoat => &self.motor_boats,
        }
    }
}
