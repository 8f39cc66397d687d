use crate::utils::error::{FleetError, Result};
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

/// Number of characters in a model name.
pub const MODEL_LENGTH: usize = 5;

/// Minimum engine power, in horsepower.
pub const MIN_ENGINE_POWER: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum TransportKind {
    Car,
    MotorBoat,
}

impl TransportKind {
    pub const ALL: [TransportKind; 2] = [TransportKind::Car, TransportKind::MotorBoat];

    /// Display name, also used as the record line prefix.
    pub fn name(&self) -> &'static str {
        match self {
            TransportKind::Car => "Car",
            TransportKind::MotorBoat => "MotorBoat",
        }
    }

    /// Lower-case plural used in console messages.
    pub fn plural(&self) -> &'static str {
        match self {
            TransportKind::Car => "cars",
            TransportKind::MotorBoat => "motor boats",
        }
    }

    pub fn sound(&self) -> &'static str {
        match self {
            TransportKind::Car => "Vroom",
            TransportKind::MotorBoat => "Brrrbrr",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransportKind {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self> {
        TransportKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FleetError::RecordParseError {
                line: s.to_string(),
            })
    }
}

/// A vehicle with a validated model name and engine power.
///
/// Values are only obtainable through [`Transport::new`] (or the per-kind
/// shorthands), so every instance satisfies both invariants and cannot be
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transport {
    kind: TransportKind,
    model: String,
    power: u32,
}

impl Transport {
    pub fn new(kind: TransportKind, model: &str, power: u32) -> Result<Self> {
        validate_model(model)?;
        validate_power(power)?;

        Ok(Self {
            kind,
            model: model.to_string(),
            power,
        })
    }

    pub fn car(model: &str, power: u32) -> Result<Self> {
        Self::new(TransportKind::Car, model, power)
    }

    pub fn motor_boat(model: &str, power: u32) -> Result<Self> {
        Self::new(TransportKind::MotorBoat, model, power)
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn start_engine(&self) -> String {
        format!("{}: {}", self.model, self.kind.sound())
    }

    /// The line written to the per-kind output file (without terminator).
    pub fn to_record_line(&self) -> String {
        format!("{}. {}", self.kind, self)
    }

    /// Reads back a line produced by [`Transport::to_record_line`].
    pub fn parse_record_line(line: &str) -> Result<Self> {
        let malformed = || FleetError::RecordParseError {
            line: line.to_string(),
        };

        let caps = record_line_regex()
            .captures(line.trim_end_matches(['\r', '\n']))
            .ok_or_else(malformed)?;

        let kind = caps[1].parse::<TransportKind>().map_err(|_| malformed())?;
        let power = caps[3].parse::<u32>().map_err(|_| malformed())?;

        Self::new(kind, &caps[2], power)
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Model: {}, Power: {}", self.model, self.power)
    }
}

/// Transports produced by one extraction, plus how many draws were rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub transports: Vec<Transport>,
    pub rejected: usize,
}

/// Record lines split by kind, each in input order and newline-terminated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batches {
    cars: String,
    motor_boats: String,
}

impl Batches {
    pub fn cars(&self) -> &str {
        &self.cars
    }

    pub fn motor_boats(&self) -> &str {
        &self.motor_boats
    }

    pub fn for_kind(&self, kind: TransportKind) -> &str {
        match kind {
            TransportKind::Car => &self.cars,
            TransportKind::MotorBoat => &self.motor_boats,
        }
    }

    pub fn line_count(&self, kind: TransportKind) -> usize {
        self.for_kind(kind).lines().count()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty() && self.motor_boats.is_empty()
    }

    pub(crate) fn push(&mut self, transport: &Transport) {
        let batch = match transport.kind() {
            TransportKind::Car => &mut self.cars,
            TransportKind::MotorBoat => &mut self.motor_boats,
            // Kinds without an output file are left out.
            #[allow(unreachable_patterns)]
            other => {
                tracing::trace!("Skipping transport of unrouted kind {}", other);
                return;
            }
        };
        batch.push_str(&transport.to_record_line());
        batch.push('\n');
    }
}

#[derive(Debug, Default)]
pub enum WriteOutcome {
    /// Nothing to write; the file was not touched.
    #[default]
    Skipped,
    Written { path: PathBuf, lines: usize },
    Failed { path: PathBuf, error: FleetError },
}

impl WriteOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, WriteOutcome::Failed { .. })
    }
}

/// Result of writing one set of batches; each kind succeeds or fails on its own.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub cars: WriteOutcome,
    pub motor_boats: WriteOutcome,
}

impl LoadReport {
    pub fn for_kind(&self, kind: TransportKind) -> &WriteOutcome {
        match kind {
            TransportKind::Car => &self.cars,
            TransportKind::MotorBoat => &self.motor_boats,
        }
    }

    pub(crate) fn set(&mut self, kind: TransportKind, outcome: WriteOutcome) {
        match kind {
            TransportKind::Car => self.cars = outcome,
            TransportKind::MotorBoat => self.motor_boats = outcome,
        }
    }

    pub fn failures(&self) -> usize {
        [&self.cars, &self.motor_boats]
            .into_iter()
            .filter(|outcome| outcome.is_failed())
            .count()
    }
}

fn record_line_regex() -> &'static Regex {
    static RECORD_LINE: OnceLock<Regex> = OnceLock::new();
    RECORD_LINE.get_or_init(|| {
        Regex::new(r"^(\w+)\. Model: (.*), Power: (\d+)$").expect("record line pattern is valid")
    })
}

pub fn validate_model(model: &str) -> Result<()> {
    let well_formed = model.len() == MODEL_LENGTH
        && model
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());

    if !well_formed {
        return Err(FleetError::InvalidModelFormat {
            model: model.to_string(),
        });
    }
    Ok(())
}

pub fn validate_power(power: u32) -> Result<()> {
    if power < MIN_ENGINE_POWER {
        return Err(FleetError::PowerTooLow {
            power,
            min: MIN_ENGINE_POWER,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transport() {
        let car = Transport::car("AB12C", 20).unwrap();
        assert_eq!(car.kind(), TransportKind::Car);
        assert_eq!(car.model(), "AB12C");
        assert_eq!(car.power(), 20);
    }

    #[test]
    fn test_rejects_wrong_length_models() {
        for model in ["", "A", "ABCD", "ABCDEF", "1234567"] {
            let err = Transport::car(model, 50).unwrap_err();
            assert!(
                matches!(err, FleetError::InvalidModelFormat { .. }),
                "{model:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_models_outside_character_class() {
        // "ÄBCD" is 5 bytes but only 4 characters, and not ASCII anyway.
        for model in ["abcde", "AB-12", "AB 12", "ÄBCD", "A1b2C", "_____"] {
            let err = Transport::motor_boat(model, 50).unwrap_err();
            assert!(
                matches!(err, FleetError::InvalidModelFormat { .. }),
                "{model:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_power_floor() {
        for power in 0..MIN_ENGINE_POWER {
            let err = Transport::car("ZZ999", power).unwrap_err();
            assert!(matches!(err, FleetError::PowerTooLow { power: p, min: 20 } if p == power));
        }
        for power in [20, 21, 99, u32::MAX] {
            assert!(Transport::car("ZZ999", power).is_ok());
        }
    }

    #[test]
    fn test_model_is_checked_before_power() {
        let err = Transport::car("bad", 1).unwrap_err();
        assert!(matches!(err, FleetError::InvalidModelFormat { .. }));
    }

    #[test]
    fn test_start_engine_per_kind() {
        let car = Transport::car("A1B2C", 30).unwrap();
        let boat = Transport::motor_boat("00000", 30).unwrap();
        assert_eq!(car.start_engine(), "A1B2C: Vroom");
        assert_eq!(boat.start_engine(), "00000: Brrrbrr");
    }

    #[test]
    fn test_display_and_record_line() {
        let boat = Transport::motor_boat("QWERT", 45).unwrap();
        assert_eq!(boat.to_string(), "Model: QWERT, Power: 45");
        assert_eq!(boat.to_record_line(), "MotorBoat. Model: QWERT, Power: 45");
    }

    #[test]
    fn test_equality_includes_kind() {
        let car = Transport::car("AAAAA", 40).unwrap();
        let boat = Transport::motor_boat("AAAAA", 40).unwrap();
        assert_ne!(car, boat);
        assert_eq!(car, Transport::car("AAAAA", 40).unwrap());
    }

    #[test]
    fn test_parse_record_line_recovers_fields() {
        let car = Transport::car("9Z8Y7", 77).unwrap();
        let parsed = Transport::parse_record_line(&format!("{}\r\n", car.to_record_line())).unwrap();
        assert_eq!(parsed, car);
    }

    #[test]
    fn test_parse_record_line_rejects_garbage() {
        for line in [
            "",
            "Truck. Model: AAAAA, Power: 40",
            "Car. Model: AAAAA Power: 40",
            "Car. Model: AAAAA, Power: -4",
        ] {
            assert!(matches!(
                Transport::parse_record_line(line),
                Err(FleetError::RecordParseError { .. })
            ));
        }
        // Well-formed line, but the values break the invariants.
        assert!(matches!(
            Transport::parse_record_line("Car. Model: AAAAA, Power: 4"),
            Err(FleetError::PowerTooLow { .. })
        ));
    }

    #[test]
    fn test_every_kind_has_a_batch_and_outcome() {
        let mut batches = Batches::default();
        batches.push(&Transport::car("AAAAA", 40).unwrap());
        batches.push(&Transport::car("BBBBB", 50).unwrap());

        assert_eq!(batches.for_kind(TransportKind::Car), batches.cars());
        assert_eq!(batches.line_count(TransportKind::Car), 2);
        assert_eq!(batches.for_kind(TransportKind::MotorBoat), "");
        assert_eq!(batches.line_count(TransportKind::MotorBoat), 0);

        let mut report = LoadReport::default();
        for kind in TransportKind::ALL {
            assert!(matches!(report.for_kind(kind), WriteOutcome::Skipped));
        }
        report.set(
            TransportKind::MotorBoat,
            WriteOutcome::Written {
                path: PathBuf::from("MotorBoats.txt"),
                lines: 3,
            },
        );
        assert!(matches!(report.cars, WriteOutcome::Skipped));
        assert!(matches!(
            report.for_kind(TransportKind::MotorBoat),
            WriteOutcome::Written { lines: 3, .. }
        ));
    }
}
