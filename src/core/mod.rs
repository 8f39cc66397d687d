pub mod classify;
pub mod etl;
pub mod generator;
pub mod pipeline;

pub use crate::domain::model::{
    Batches, Extraction, LoadReport, Transport, TransportKind, WriteOutcome,
};
pub use crate::domain::ports::{ConfigProvider, ContinuePrompt, Pipeline, Storage};
pub use crate::utils::error::Result;
