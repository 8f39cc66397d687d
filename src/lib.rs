pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use adapters::console::KeyPrompt;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::console::FixedIterations;
pub use adapters::storage::{LocalStorage, TextEncoding};
pub use config::Settings;
pub use crate::core::{
    classify::{classify, classify_slots},
    etl::{FleetEngine, IterationReport, RunSummary},
    generator::Generator,
    pipeline::FleetPipeline,
};
pub use domain::model::{Batches, Transport, TransportKind};
pub use domain::ports::OutputPaths;
pub use utils::error::{FleetError, Result};
