use crate::core::classify::classify;
use crate::core::generator::Generator;
use crate::core::{
    Batches, ConfigProvider, Extraction, LoadReport, Pipeline, Storage, Transport, TransportKind,
    WriteOutcome,
};
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::Rng;

pub struct FleetPipeline<S: Storage, C: ConfigProvider, R: Rng = StdRng> {
    storage: S,
    config: C,
    generator: Generator<R>,
}

impl<S: Storage, C: ConfigProvider> FleetPipeline<S, C> {
    /// Uses the configured seed if there is one.
    pub fn new(storage: S, config: C) -> Self {
        let generator = match config.seed() {
            Some(seed) => Generator::with_seed(seed),
            None => Generator::new(),
        };
        Self::with_generator(storage, config, generator)
    }
}

impl<S: Storage, C: ConfigProvider, R: Rng> FleetPipeline<S, C, R> {
    pub fn with_generator(storage: S, config: C, generator: Generator<R>) -> Self {
        Self {
            storage,
            config,
            generator,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn write_batch(&self, kind: TransportKind, batch: &str) -> WriteOutcome {
        let path = self.config.output_paths().for_kind(kind);

        if batch.is_empty() {
            tracing::debug!("No {} to write, leaving {} untouched", kind.plural(), path.display());
            return WriteOutcome::Skipped;
        }

        match self.storage.append_text(path, batch) {
            Ok(()) => {
                println!(
                    "Information about {} was saved to\n{}",
                    kind.plural(),
                    path.display()
                );
                WriteOutcome::Written {
                    path: path.to_path_buf(),
                    lines: batch.lines().count(),
                }
            }
            Err(e) => {
                tracing::error!("Failed to write {}: {}", kind.plural(), e);
                println!("An error occurred while saving information about {}", kind.plural());
                WriteOutcome::Failed {
                    path: path.to_path_buf(),
                    error: e,
                }
            }
        }
    }
}

impl<S: Storage, C: ConfigProvider, R: Rng> Pipeline for FleetPipeline<S, C, R> {
    fn extract(&mut self) -> Result<Extraction> {
        let length = self.generator.next_list_length();
        let mut transports: Vec<Transport> = Vec::with_capacity(length);
        let mut rejected = 0;

        while transports.len() < length {
            let transport = self.generator.next_valid_transport(|e| {
                rejected += 1;
                println!("{}", e.user_friendly_message());
            })?;
            println!("{}", transport.start_engine());
            transports.push(transport);
        }

        tracing::debug!(
            "Generated {} transports ({} draws rejected)",
            transports.len(),
            rejected
        );
        Ok(Extraction {
            transports,
            rejected,
        })
    }

    fn transform(&self, transports: &[Transport]) -> Result<Batches> {
        Ok(classify(transports))
    }

    fn load(&self, batches: &Batches) -> LoadReport {
        let mut report = LoadReport::default();
        for kind in TransportKind::ALL {
            report.set(kind, self.write_batch(kind, batches.for_kind(kind)));
        }
        report
    }
}
