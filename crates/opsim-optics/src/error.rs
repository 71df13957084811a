//! Errors raised while building optical property tables.

use thiserror::Error;

use crate::properties::PropertyKey;

/// Errors from curve construction, dispersion models and the registry.
#[derive(Debug, Error)]
pub enum OpticsError {
    #[error("Invalid energy range [{min}, {max}] eV: need 0 < min < max")]
    InvalidRange { min: f64, max: f64 },

    #[error("Invalid sampling: {0}")]
    InvalidSampling(String),

    #[error("Energy and value sequences differ in length ({energies} vs {values})")]
    CurveLength { energies: usize, values: usize },

    #[error("A curve needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("Energies must be finite and strictly increasing (violated at index {index}: {previous} -> {current} eV)")]
    NotIncreasing {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("{key} value {value} at {energy_ev} eV is outside the physical domain")]
    OutOfDomain {
        key: PropertyKey,
        energy_ev: f64,
        value: f64,
    },

    #[error("Material '{material}', property {key}: {source}")]
    Property {
        material: String,
        key: PropertyKey,
        #[source]
        source: Box<OpticsError>,
    },

    #[error("Material not found: {0}")]
    NotFound(String),
}
