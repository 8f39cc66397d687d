use crate::domain::model::{Batches, Transport};
use crate::utils::error::{FleetError, Result};

pub fn classify(transports: &[Transport]) -> Batches {
    let mut batches = Batches::default();
    for transport in transports {
        batches.push(transport);
    }
    batches
}

/// Like [`classify`], for input where the collection or its elements may be
/// missing. Nothing is returned unless every element is present.
pub fn classify_slots(transports: Option<&[Option<Transport>]>) -> Result<Batches> {
    let transports = transports.ok_or(FleetError::NullCollection)?;

    if let Some(index) = transports.iter().position(Option::is_none) {
        return Err(FleetError::NullElement { index });
    }

    let mut batches = Batches::default();
    for transport in transports.iter().flatten() {
        batches.push(transport);
    }
    Ok(batches)
}
