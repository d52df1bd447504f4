//! Structural anomalies observed during path extraction.

use std::fmt;

use scry_ir::Datum;

/// A value that failed to line up with the previously inferred pattern.
///
/// Anomalies are observations, not errors: analysis continues, skipping
/// the offending entry. They surface through the observer callback so a
/// host application can log or count them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Anomaly {
    /// A map key did not validate against the inferred key pattern.
    KeyMismatch { key: Datum, expected: String },
    /// A record column index/name did not validate against the inferred
    /// index pattern.
    ColumnMismatch { column: Datum, expected: String },
    /// A mandatory literal key was absent from a map.
    MissingKey { key: Datum },
    /// A mandatory column was absent from a record.
    MissingColumn { column: Datum },
    /// A value had a different outer kind than the selector expected.
    KindMismatch { found: &'static str, expected: &'static str },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::KeyMismatch { key, expected } => {
                write!(f, "failed to validate key {key} against {expected}")
            }
            Anomaly::ColumnMismatch { column, expected } => {
                write!(f, "failed to validate column {column} against {expected}")
            }
            Anomaly::MissingKey { key } => write!(f, "mandatory key {key} missing"),
            Anomaly::MissingColumn { column } => write!(f, "mandatory column {column} missing"),
            Anomaly::KindMismatch { found, expected } => {
                write!(f, "expected a {expected} value, found {found}")
            }
        }
    }
}
