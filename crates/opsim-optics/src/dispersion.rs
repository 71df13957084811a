//! Dispersion models: refractive index (or any optical quantity) versus
//! photon energy.
//!
//! Every model answers a single question through [`DispersionModel::evaluate`]:
//! the value of the quantity at a photon energy in eV. Fitted models are
//! parameterised in wavelength, so the energy is converted with
//! $\lambda = hc / E$ before the fit is applied.
//!
//! ## Variants
//!
//! | Variant | Formula |
//! |---------|---------|
//! | [`Constant`](DispersionModel::Constant) | $v$ |
//! | [`Sellmeier`](DispersionModel::Sellmeier) | $n = \sqrt{A + B_1 \lambda^2 / (\lambda^2 - C_1)}$ |
//! | [`LarCorrelation`](DispersionModel::LarCorrelation) | $n = \sqrt{1 + 3x/(3-x)}$ with $x = a_0 + a_{UV}\lambda^2/(\lambda^2-\lambda_{UV}^2) + a_{IR}\lambda^2/(\lambda^2-\lambda_{IR}^2)$ |
//! | [`Table`](DispersionModel::Table) | digitised literature data |
//!
//! Fits diverge at their poles. Evaluating at or near a pole yields a
//! non-physical number (NaN or a huge value) and is not trapped: callers pick
//! an upper energy bound below the pole energy.

use serde::{Deserialize, Serialize};

use crate::curve::interpolate_clamped;
use crate::error::OpticsError;
use crate::units::{energy_to_wavelength, wavelength_to_energy};

/// Parallel energy/value sequences digitised from a published plot or table.
///
/// Energies are expected in ascending order. The constructor does not sort;
/// unsorted data is rejected when the curve is built. Deserialisation goes
/// through [`LiteratureTable::new`], so the two sequences always match in length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable", into = "RawTable")]
pub struct LiteratureTable {
    energies: Vec<f64>,
    values: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct RawTable {
    energies: Vec<f64>,
    values: Vec<f64>,
}

impl TryFrom<RawTable> for LiteratureTable {
    type Error = OpticsError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        LiteratureTable::new(raw.energies, raw.values)
    }
}

impl From<LiteratureTable> for RawTable {
    fn from(table: LiteratureTable) -> Self {
        RawTable {
            energies: table.energies,
            values: table.values,
        }
    }
}

impl LiteratureTable {
    pub fn new(energies: Vec<f64>, values: Vec<f64>) -> Result<Self, OpticsError> {
        if energies.len() != values.len() {
            return Err(OpticsError::CurveLength {
                energies: energies.len(),
                values: values.len(),
            });
        }
        Ok(Self { energies, values })
    }

    /// Build from data digitised against ascending wavelength (nm).
    ///
    /// The samples are converted to energy and reversed, so the table comes
    /// out in ascending energy order.
    pub fn from_wavelengths(wavelengths_nm: &[f64], values: &[f64]) -> Result<Self, OpticsError> {
        let energies = wavelengths_nm
            .iter()
            .rev()
            .map(|&l| wavelength_to_energy(l))
            .collect();
        let values = values.iter().rev().copied().collect();
        Self::new(energies, values)
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

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Linear interpolation, clamped to the end values.
    fn lookup(&self, energy: f64) -> f64 {
        if self.energies.is_empty() {
            return f64::NAN;
        }
        interpolate_clamped(&self.energies, &self.values, energy)
    }
}

/// A material's dispersion model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispersionModel {
    /// Energy-independent value.
    Constant { value: f64 },
    /// One-term Sellmeier fit; `c1_nm2` in nm².
    Sellmeier { a: f64, b1: f64, c1_nm2: f64 },
    /// Liquid-argon index correlation with UV and IR resonances (nm).
    LarCorrelation {
        a0: f64,
        a_uv: f64,
        a_ir: f64,
        lambda_uv_nm: f64,
        lambda_ir_nm: f64,
    },
    /// Digitised literature data.
    Table(LiteratureTable),
}

impl DispersionModel {
    /// The liquid-argon correlation with its published constants.
    pub fn lar() -> Self {
        DispersionModel::LarCorrelation {
            a0: 0.335,
            a_uv: 0.099,
            a_ir: 0.008,
            lambda_uv_nm: 106.6,
            lambda_ir_nm: 908.3,
        }
    }

    /// Sellmeier fit for polyvinyltoluene (PVT) based plastics such as BC-418.
    pub fn pvt() -> Self {
        DispersionModel::Sellmeier {
            a: 1.421,
            b1: 0.9944,
            c1_nm2: 26250.0,
        }
    }

    /// Value of the modelled quantity at `energy_ev`.
    pub fn evaluate(&self, energy_ev: f64) -> f64 {
        match self {
            DispersionModel::Constant { value } => *value,
            DispersionModel::Sellmeier { a, b1, c1_nm2 } => {
                let l2 = energy_to_wavelength(energy_ev).powi(2);
                (a + b1 * l2 / (l2 - c1_nm2)).sqrt()
            }
            DispersionModel::LarCorrelation {
                a0,
                a_uv,
                a_ir,
                lambda_uv_nm,
                lambda_ir_nm,
            } => {
                let l2 = energy_to_wavelength(energy_ev).powi(2);
                let x = a0
                    + a_uv * l2 / (l2 - lambda_uv_nm.powi(2))
                    + a_ir * l2 / (l2 - lambda_ir_nm.powi(2));
                (1.0 + 3.0 * x / (3.0 - x)).sqrt()
            }
            DispersionModel::Table(table) => table.lookup(energy_ev),
        }
    }

    /// Whether this model is sampled on a grid (fits) rather than passed
    /// through as-is.
    pub fn is_fit(&self) -> bool {
        matches!(
            self,
            DispersionModel::Sellmeier { .. } | DispersionModel::LarCorrelation { .. }
        )
    }

    /// Wavelengths (nm) at which the fit diverges, ascending.
    pub fn poles_nm(&self) -> Vec<f64> {
        match self {
            DispersionModel::Sellmeier { c1_nm2, .. } if *c1_nm2 > 0.0 => vec![c1_nm2.sqrt()],
            DispersionModel::LarCorrelation {
                lambda_uv_nm,
                lambda_ir_nm,
                ..
            } => {
                let mut poles = vec![*lambda_uv_nm, *lambda_ir_nm];
                poles.sort_by(f64::total_cmp);
                poles
            }
            _ => Vec::new(),
        }
    }

    /// Highest energy (eV) whose wavelength stays `margin_nm` above the
    /// shortest pole, or `None` for models without poles.
    ///
    /// A helper for choosing a per-material `energy_max`; nothing enforces it.
    pub fn max_safe_energy(&self, margin_nm: f64) -> Option<f64> {
        self.poles_nm()
            .first()
            .map(|&pole| wavelength_to_energy(pole + margin_nm))
    }
}
