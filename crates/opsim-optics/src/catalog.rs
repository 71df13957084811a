//! Built-in material recipes for the detector assembly.
//!
//! Each function returns a [`MaterialSpec`] ready for
//! [`MaterialRegistry::build_material`](crate::registry::MaterialRegistry::build_material).
//! The tabulated arrays for TPB and the silicone window are approximate
//! placeholder shapes, not digitisations of a published measurement, and the
//! same holds for their constant refractive indices. Replace them with
//! measured data before relying on absolute numbers.
//!
//! ## Available materials
//!
//! | Name | Function | Optical content |
//! |------|----------|-----------------|
//! | `VACUUM` | [`vacuum()`] | RINDEX 1, ABSLENGTH 10 km |
//! | `LAr` | [`lar()`] | LAr correlation RINDEX up to 11.3 eV |
//! | `PVT` | [`pvt()`] | Sellmeier RINDEX up to 7 eV |
//! | `BC418` | [`bc418()`] | PVT Sellmeier RINDEX up to 7 eV |
//! | `TPB` | [`tpb()`] | WLS absorption, emission, time constant |
//! | `OPTICAL_SILICONE` | [`optical_silicone()`] | glass-epoxy window properties |
//! | `FR4` | [`fr4()`] | none |
//! | `ENRICHED_XENON` | [`enriched_xenon()`] | RINDEX 1 |

use std::collections::BTreeMap;

use crate::builder::{build_bundle, MaterialSpec, PropertySpec};
use crate::dispersion::{DispersionModel, LiteratureTable};
use crate::error::OpticsError;
use crate::properties::{ConstantKey, MaterialOpticalProperties, PropertyKey};
use crate::registry::MaterialState;
use crate::sampling::{EnergyRange, Sampling};
use crate::units::{KM, NS};

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &[
    "VACUUM",
    "LAr",
    "PVT",
    "BC418",
    "TPB",
    "OPTICAL_SILICONE",
    "FR4",
    "ENRICHED_XENON",
];

/// Upper energy bound for the LAr fit; keeps samples 3 nm above the 106.6 nm pole.
pub const LAR_ENERGY_MAX: f64 = 11.3;

/// Upper energy bound for the PVT fit; its pole sits near 162 nm (7.65 eV).
pub const PVT_ENERGY_MAX: f64 = 7.0;

const TRANSPARENT_ABSLENGTH: f64 = 10.0 * KM;

/// Look up a built-in recipe by name.
pub fn by_name(name: &str) -> Option<Result<MaterialSpec, OpticsError>> {
    let spec = match name {
        "VACUUM" => Ok(vacuum()),
        "LAr" => lar(),
        "PVT" => pvt(),
        "BC418" => bc418(),
        "TPB" => tpb(),
        "OPTICAL_SILICONE" => optical_silicone(),
        "FR4" => Ok(fr4()),
        "ENRICHED_XENON" => Ok(enriched_xenon()),
        _ => return None,
    };
    Some(spec)
}

/// Empty space with unit index and effectively no absorption.
pub fn vacuum() -> MaterialSpec {
    let range = EnergyRange::global();
    MaterialSpec::new("VACUUM", 1.0e-25, MaterialState::Gas)
        .with_property(PropertyKey::Rindex, PropertySpec::constant(1.0, range))
        .with_property(
            PropertyKey::AbsLength,
            PropertySpec::constant(TRANSPARENT_ABSLENGTH, range),
        )
}

/// Liquid argon at its boiling point.
///
/// The refractive index uses [`DispersionModel::lar`] sampled on the
/// 0.3 nm / 1 nm wavelength grid. The upper bound is reduced from the global
/// 11.5 eV to [`LAR_ENERGY_MAX`] so no sample comes within 2 nm of the UV pole.
pub fn lar() -> Result<MaterialSpec, OpticsError> {
    Ok(MaterialSpec::new("LAr", 1.396, MaterialState::Liquid)
        .with_property(
            PropertyKey::Rindex,
            PropertySpec::new(
                DispersionModel::lar(),
                EnergyRange::global_up_to(LAR_ENERGY_MAX)?,
                Sampling::default_wavelength_steps(),
            ),
        )
        .with_property(
            PropertyKey::AbsLength,
            PropertySpec::constant(TRANSPARENT_ABSLENGTH, EnergyRange::global()),
        ))
}

/// Polyvinyltoluene plastic.
pub fn pvt() -> Result<MaterialSpec, OpticsError> {
    pvt_like("PVT", 1.023)
}

/// Saint-Gobain BC-418, a PVT-based plastic scintillator.
pub fn bc418() -> Result<MaterialSpec, OpticsError> {
    pvt_like("BC418", 1.032)
}

fn pvt_like(name: &str, density: f64) -> Result<MaterialSpec, OpticsError> {
    let range = EnergyRange::global_up_to(PVT_ENERGY_MAX)?;
    Ok(MaterialSpec::new(name, density, MaterialState::Solid)
        .with_property(
            PropertyKey::Rindex,
            PropertySpec::new(
                DispersionModel::pvt(),
                range,
                Sampling::default_wavelength_steps(),
            ),
        )
        .with_property(
            PropertyKey::AbsLength,
            PropertySpec::constant(TRANSPARENT_ABSLENGTH, range),
        ))
}

/// Tetraphenyl butadiene, the wavelength shifter coating the plate.
///
/// Absorbs the argon VUV light and re-emits in the blue. The absorption and
/// emission arrays are placeholder shapes with the qualitative features of
/// TPB (strong VUV absorption, emission peaking near 425 nm); the RINDEX of
/// 1.67 and time constant of 1.2 ns are nominal values.
pub fn tpb() -> Result<MaterialSpec, OpticsError> {
    // (λ/nm, absorption length/mm)
    let absorption: &[(f64, f64)] = &[
        (100.0, 4.0e-4),
        (150.0, 4.0e-4),
        (200.0, 4.0e-4),
        (250.0, 5.0e-4),
        (300.0, 6.0e-4),
        (340.0, 8.0e-4),
        (360.0, 1.0e-3),
        (380.0, 1.0e-2),
        (390.0, 1.0e-1),
        (400.0, 1.0),
        (420.0, 1.0e3),
        (620.0, 1.0e3),
    ];
    // (λ/nm, relative intensity)
    let emission: &[(f64, f64)] = &[
        (350.0, 0.0),
        (370.0, 0.02),
        (380.0, 0.08),
        (390.0, 0.22),
        (400.0, 0.48),
        (410.0, 0.78),
        (420.0, 0.97),
        (425.0, 1.0),
        (430.0, 0.96),
        (440.0, 0.82),
        (450.0, 0.64),
        (460.0, 0.48),
        (470.0, 0.35),
        (480.0, 0.25),
        (500.0, 0.12),
        (520.0, 0.05),
        (550.0, 0.015),
        (600.0, 0.0),
    ];

    let range = EnergyRange::global();
    Ok(MaterialSpec::new("TPB", 1.079, MaterialState::Solid)
        .with_property(PropertyKey::Rindex, PropertySpec::constant(1.67, range))
        .with_property(
            PropertyKey::WlsAbsLength,
            PropertySpec::new(
                DispersionModel::Table(table_from_wavelengths(absorption)?),
                range,
                Sampling::Count(2),
            ),
        )
        .with_property(
            PropertyKey::WlsComponent,
            PropertySpec::new(
                DispersionModel::Table(table_from_wavelengths(emission)?),
                range,
                Sampling::Count(2),
            ),
        )
        .with_constant(ConstantKey::WlsTimeConstant, 1.2 * NS))
}

/// Methyl silicone resin used as the photosensor window, carrying the
/// glass-epoxy optical properties.
///
/// RINDEX 1.54 and the absorption curve are placeholders: opaque in the deep
/// UV, transparent over a few mm in the visible.
pub fn optical_silicone() -> Result<MaterialSpec, OpticsError> {
    // (λ/nm, absorption length/mm)
    let absorption: &[(f64, f64)] = &[
        (200.0, 1.0e-3),
        (250.0, 1.0e-2),
        (300.0, 0.1),
        (350.0, 1.0),
        (400.0, 5.0),
        (450.0, 10.0),
        (620.0, 12.0),
    ];

    let range = EnergyRange::global();
    Ok(MaterialSpec::new("OPTICAL_SILICONE", 1.05, MaterialState::Solid)
        .with_property(PropertyKey::Rindex, PropertySpec::constant(1.54, range))
        .with_property(
            PropertyKey::AbsLength,
            PropertySpec::new(
                DispersionModel::Table(table_from_wavelengths(absorption)?),
                range,
                Sampling::Count(2),
            ),
        ))
}

/// Glass-fibre/epoxy circuit-board substrate (60 % fused silica, 40 % epoxy).
/// Opaque, so it carries no optical curves.
pub fn fr4() -> MaterialSpec {
    MaterialSpec::new("FR4", 1.850, MaterialState::Solid)
}

/// Xenon enriched to 91 % Xe-136, gaseous at 15 bar.
pub fn enriched_xenon() -> MaterialSpec {
    MaterialSpec::new("ENRICHED_XENON", 97.49e-3, MaterialState::Gas)
        .with_property(
            PropertyKey::Rindex,
            PropertySpec::constant(1.0, EnergyRange::global()),
        )
}

/// Skin-surface properties of the photosensor sensitive area: no reflection,
/// full detection efficiency from 0.2 to 11.5 eV.
pub fn photosensor_surface() -> Result<MaterialOpticalProperties, OpticsError> {
    let range = EnergyRange::new(0.2, 11.5)?;
    let mut properties = BTreeMap::new();
    properties.insert(PropertyKey::Reflectivity, PropertySpec::constant(0.0, range));
    properties.insert(PropertyKey::Efficiency, PropertySpec::constant(1.0, range));
    build_bundle("PHOTOSENSOR_OPSURF", &properties, &BTreeMap::new())
}

fn table_from_wavelengths(data: &[(f64, f64)]) -> Result<LiteratureTable, OpticsError> {
    let (wavelengths, values): (Vec<f64>, Vec<f64>) = data.iter().copied().unzip();
    LiteratureTable::from_wavelengths(&wavelengths, &values)
}
