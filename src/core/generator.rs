use crate::domain::model::{Transport, TransportKind, MODEL_LENGTH};
use crate::utils::error::{FleetError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

pub const LIST_LENGTH_RANGE: Range<usize> = 6..10;

/// Wider than the valid power range on purpose: draws below
/// [`MIN_ENGINE_POWER`](crate::domain::model::MIN_ENGINE_POWER) are rejected
/// by [`Transport::new`] and retried.
pub const POWER_RANGE: Range<u32> = 10..100;

/// Produces random transports and batch sizes from an owned random source.
///
/// Not meant to be shared between threads; give each caller its own instance.
#[derive(Debug, Clone)]
pub struct Generator<R: Rng = StdRng> {
    rng: R,
}

impl Generator<StdRng> {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Reproducible sequence for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Generator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Generator<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn next_list_length(&mut self) -> usize {
        self.rng.random_range(LIST_LENGTH_RANGE)
    }

    pub fn next_power(&mut self) -> u32 {
        self.rng.random_range(POWER_RANGE)
    }

    /// Each position is a letter or a digit with equal probability.
    pub fn next_model_string(&mut self) -> String {
        (0..MODEL_LENGTH)
            .map(|_| {
                if self.rng.random_bool(0.5) {
                    self.rng.random_range(b'A'..=b'Z') as char
                } else {
                    self.rng.random_range(b'0'..=b'9') as char
                }
            })
            .collect()
    }

    pub fn next_kind(&mut self) -> TransportKind {
        if self.rng.random_bool(0.5) {
            TransportKind::Car
        } else {
            TransportKind::MotorBoat
        }
    }

    /// May fail with [`FleetError::PowerTooLow`] since [`POWER_RANGE`]
    /// reaches below the minimum.
    pub fn next_transport(&mut self) -> Result<Transport> {
        let kind = self.next_kind();
        let model = self.next_model_string();
        let power = self.next_power();
        Transport::new(kind, &model, power)
    }

    /// Draws until construction succeeds, reporting every rejected draw.
    /// Errors that are not retryable end the loop and are returned.
    pub fn next_valid_transport<F>(&mut self, on_reject: F) -> Result<Transport>
    where
        F: FnMut(&FleetError),
    {
        Self::retry_draws(|| self.next_transport(), on_reject)
    }

    fn retry_draws<D, F>(mut draw: D, mut on_reject: F) -> Result<Transport>
    where
        D: FnMut() -> Result<Transport>,
        F: FnMut(&FleetError),
    {
        loop {
            match draw() {
                Ok(transport) => return Ok(transport),
                Err(e) if e.is_retryable() => {
                    tracing::debug!("Rejected generated transport: {}", e);
                    on_reject(&e);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
