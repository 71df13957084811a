//! Piecewise-linear property curves over photon energy.
//!
//! An [`EnergyCurve`] is the table handed to the transport engine, which
//! interpolates it linearly at arbitrary photon energies. Construction
//! enforces the table invariants: matching lengths, at least two points and
//! finite, strictly increasing energies. The builder never sorts its input,
//! so a table that violates ordering is rejected rather than repaired.

use serde::{Deserialize, Serialize};

use crate::error::OpticsError;
use crate::properties::PropertyKey;
use crate::units::energy_to_wavelength;

/// Ordered `(energy, value)` samples with energies in eV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurve", into = "RawCurve")]
pub struct EnergyCurve {
    energies: Vec<f64>,
    values: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct RawCurve {
    energies_ev: Vec<f64>,
    values: Vec<f64>,
}

impl TryFrom<RawCurve> for EnergyCurve {
    type Error = OpticsError;

    fn try_from(raw: RawCurve) -> Result<Self, Self::Error> {
        EnergyCurve::new(raw.energies_ev, raw.values)
    }
}

impl From<EnergyCurve> for RawCurve {
    fn from(curve: EnergyCurve) -> Self {
        RawCurve {
            energies_ev: curve.energies,
            values: curve.values,
        }
    }
}

impl EnergyCurve {
    /// Construct a curve from parallel energy/value sequences.
    ///
    /// # Errors
    /// Fails if the lengths differ, fewer than 2 points are given, or the
    /// energies are not finite and strictly increasing.
    pub fn new(energies: Vec<f64>, values: Vec<f64>) -> Result<Self, OpticsError> {
        if energies.len() != values.len() {
            return Err(OpticsError::CurveLength {
                energies: energies.len(),
                values: values.len(),
            });
        }
        if energies.len() < 2 {
            return Err(OpticsError::TooFewPoints(energies.len()));
        }
        if !energies[0].is_finite() {
            return Err(OpticsError::NotIncreasing {
                index: 0,
                previous: energies[0],
                current: energies[0],
            });
        }
        for i in 1..energies.len() {
            if !energies[i].is_finite() || energies[i] <= energies[i - 1] {
                return Err(OpticsError::NotIncreasing {
                    index: i,
                    previous: energies[i - 1],
                    current: energies[i],
                });
            }
        }
        Ok(Self { energies, values })
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    /// Always false: a valid curve has at least two points.
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.energies.iter().copied().zip(self.values.iter().copied())
    }

    /// `(first, last)` energy of the table.
    pub fn energy_range(&self) -> (f64, f64) {
        (self.energies[0], self.energies[self.energies.len() - 1])
    }

    /// Wavelength of each sample in nm (descending, since energies ascend).
    pub fn wavelengths_nm(&self) -> Vec<f64> {
        self.energies.iter().map(|&e| energy_to_wavelength(e)).collect()
    }

    /// Linear interpolation at `energy`, clamped to the end values outside
    /// the tabulated domain.
    pub fn value_at(&self, energy: f64) -> f64 {
        interpolate_clamped(&self.energies, &self.values, energy)
    }

    /// Check every value against the physical domain of `key`.
    pub fn check_domain(&self, key: &PropertyKey) -> Result<(), OpticsError> {
        match self.points().find(|&(_, v)| !key.admits(v)) {
            Some((energy_ev, value)) => Err(OpticsError::OutOfDomain {
                key: key.clone(),
                energy_ev,
                value,
            }),
            None => Ok(()),
        }
    }
}

/// Piecewise-linear lookup through ascending `xs`, clamped to the end values.
///
/// `xs` and `ys` must have the same non-zero length.
pub(crate) fn interpolate_clamped(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len();
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }

    // First knot strictly above `x`; guaranteed in 1..n here.
    let hi = xs.partition_point(|&k| k <= x);
    let lo = hi - 1;
    let t = (x - xs[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + t * (ys[hi] - ys[lo])
}
