//! Named bundles of optical property curves.
//!
//! A [`MaterialOpticalProperties`] is what the transport engine attaches to a
//! material: a set of [`EnergyCurve`]s keyed by the engine's property names
//! (`RINDEX`, `ABSLENGTH`, ...) plus scalar constants such as the
//! wavelength-shifting time constant. Bundles are built once and never
//! mutated afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::curve::EnergyCurve;

/// Energy-dependent property names understood by the transport engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PropertyKey {
    Rindex,
    AbsLength,
    WlsAbsLength,
    WlsComponent,
    Reflectivity,
    Efficiency,
    Other(String),
}

impl PropertyKey {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyKey::Rindex => "RINDEX",
            PropertyKey::AbsLength => "ABSLENGTH",
            PropertyKey::WlsAbsLength => "WLSABSLENGTH",
            PropertyKey::WlsComponent => "WLSCOMPONENT",
            PropertyKey::Reflectivity => "REFLECTIVITY",
            PropertyKey::Efficiency => "EFFICIENCY",
            PropertyKey::Other(name) => name,
        }
    }

    /// Whether `value` is physically meaningful for this quantity.
    ///
    /// Refractive indices are at least 1, lengths are positive,
    /// probabilities live in [0, 1] and spectra are non-negative.
    /// Unknown properties only need to be finite.
    pub fn admits(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            PropertyKey::Rindex => value >= 1.0,
            PropertyKey::AbsLength | PropertyKey::WlsAbsLength => value > 0.0,
            PropertyKey::Reflectivity | PropertyKey::Efficiency => (0.0..=1.0).contains(&value),
            PropertyKey::WlsComponent => value >= 0.0,
            PropertyKey::Other(_) => true,
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        match name {
            "RINDEX" => PropertyKey::Rindex,
            "ABSLENGTH" => PropertyKey::AbsLength,
            "WLSABSLENGTH" => PropertyKey::WlsAbsLength,
            "WLSCOMPONENT" => PropertyKey::WlsComponent,
            "REFLECTIVITY" => PropertyKey::Reflectivity,
            "EFFICIENCY" => PropertyKey::Efficiency,
            other => PropertyKey::Other(other.to_string()),
        }
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        PropertyKey::from(name.as_str())
    }
}

impl From<PropertyKey> for String {
    fn from(key: PropertyKey) -> Self {
        key.as_str().to_string()
    }
}

impl FromStr for PropertyKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PropertyKey::from(s))
    }
}

/// Scalar (energy-independent) material constants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ConstantKey {
    /// Re-emission delay of a wavelength shifter, in ns.
    WlsTimeConstant,
    /// Mean number of photons re-emitted per absorbed photon.
    WlsMeanNumberPhotons,
    Other(String),
}

impl ConstantKey {
    pub fn as_str(&self) -> &str {
        match self {
            ConstantKey::WlsTimeConstant => "WLSTIMECONSTANT",
            ConstantKey::WlsMeanNumberPhotons => "WLSMEANNUMBERPHOTONS",
            ConstantKey::Other(name) => name,
        }
    }
}

impl fmt::Display for ConstantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ConstantKey {
    fn from(name: &str) -> Self {
        match name {
            "WLSTIMECONSTANT" => ConstantKey::WlsTimeConstant,
            "WLSMEANNUMBERPHOTONS" => ConstantKey::WlsMeanNumberPhotons,
            other => ConstantKey::Other(other.to_string()),
        }
    }
}

impl From<String> for ConstantKey {
    fn from(name: String) -> Self {
        ConstantKey::from(name.as_str())
    }
}

impl From<ConstantKey> for String {
    fn from(key: ConstantKey) -> Self {
        key.as_str().to_string()
    }
}

/// Optical property bundle of one material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialOpticalProperties {
    name: String,
    curves: BTreeMap<PropertyKey, EnergyCurve>,
    constants: BTreeMap<ConstantKey, f64>,
}

impl MaterialOpticalProperties {
    pub(crate) fn new(
        name: impl Into<String>,
        curves: BTreeMap<PropertyKey, EnergyCurve>,
        constants: BTreeMap<ConstantKey, f64>,
    ) -> Self {
        Self {
            name: name.into(),
            curves,
            constants,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn curve(&self, key: &PropertyKey) -> Option<&EnergyCurve> {
        self.curves.get(key)
    }

    pub fn constant(&self, key: &ConstantKey) -> Option<f64> {
        self.constants.get(key).copied()
    }

    pub fn curves(&self) -> impl Iterator<Item = (&PropertyKey, &EnergyCurve)> {
        self.curves.iter()
    }

    pub fn constants(&self) -> impl Iterator<Item = (&ConstantKey, f64)> {
        self.constants.iter().map(|(k, v)| (k, *v))
    }

    /// True when the bundle carries no curves and no constants.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty() && self.constants.is_empty()
    }
}
