use crate::core::{Batches, ContinuePrompt, LoadReport, Pipeline, Transport, TransportKind};
use crate::utils::error::Result;

/// Everything one iteration produced.
#[derive(Debug)]
pub struct IterationReport {
    pub transports: Vec<Transport>,
    pub rejected: usize,
    pub batches: Batches,
    pub load: LoadReport,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub iterations: usize,
    pub cars: usize,
    pub motor_boats: usize,
    pub rejected: usize,
    pub failed_writes: usize,
}

impl RunSummary {
    fn add(&mut self, report: &IterationReport) {
        self.iterations += 1;
        self.cars += report.batches.line_count(TransportKind::Car);
        self.motor_boats += report.batches.line_count(TransportKind::MotorBoat);
        self.rejected += report.rejected;
        self.failed_writes += report.load.failures();
    }

    pub fn transports(&self) -> usize {
        self.cars + self.motor_boats
    }
}

pub struct FleetEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> FleetEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn run_once(&mut self) -> Result<IterationReport> {
        let extraction = self.pipeline.extract()?;
        let batches = self.pipeline.transform(&extraction.transports)?;
        let load = self.pipeline.load(&batches);

        tracing::info!(
            "Iteration done: {} cars, {} motor boats, {} rejected draws, {} failed writes",
            batches.line_count(TransportKind::Car),
            batches.line_count(TransportKind::MotorBoat),
            extraction.rejected,
            load.failures()
        );

        Ok(IterationReport {
            transports: extraction.transports,
            rejected: extraction.rejected,
            batches,
            load,
        })
    }

    /// Runs iterations until `prompt` declines; the first one always runs.
    pub fn run<Q: ContinuePrompt>(&mut self, prompt: &mut Q) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        loop {
            let report = self.run_once()?;
            summary.add(&report);

            if !prompt.should_continue()? {
                break;
            }
        }

        tracing::info!(
            "Finished after {} iterations, {} transports written",
            summary.iterations,
            summary.transports()
        );
        Ok(summary)
    }
}
