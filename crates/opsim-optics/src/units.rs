//! Units and physical constants.
//!
//! Every quantity inside this crate is stored in a fixed canonical unit:
//!
//! | Quantity | Unit |
//! |----------|------|
//! | photon energy | eV |
//! | wavelength | nm |
//! | length (absorption lengths) | mm |
//! | time | ns |
//! | density | g/cm³ |
//!
//! The scale factors below express other units in terms of the canonical
//! ones, so a raw value `v` given in metres becomes `v * M` millimetres.
//! They are what the CSV reader multiplies each column by.

/// $hc$ in eV·nm (CODATA 2018).
pub const HC_EV_NM: f64 = 1239.841984;

/// Lower photon-energy bound shared by most tables.
pub const GLOBAL_ENERGY_MIN: f64 = 2.0;

/// Upper photon-energy bound shared by most tables.
pub const GLOBAL_ENERGY_MAX: f64 = 11.5;

/// Electronvolt; canonical energy unit.
pub const EV: f64 = 1.0;
/// Nanometre; canonical wavelength unit.
pub const NM: f64 = 1.0;
/// Millimetre; canonical length unit.
pub const MM: f64 = 1.0;
/// Centimetre in mm.
pub const CM: f64 = 10.0;
/// Metre in mm.
pub const M: f64 = 1000.0;
/// Kilometre in mm.
pub const KM: f64 = 1.0e6;
/// Nanosecond; canonical time unit.
pub const NS: f64 = 1.0;

/// Photon wavelength (nm) for an energy in eV.
#[inline]
pub fn energy_to_wavelength(energy_ev: f64) -> f64 {
    HC_EV_NM / energy_ev
}

/// Photon energy (eV) for a wavelength in nm.
#[inline]
pub fn wavelength_to_energy(wavelength_nm: f64) -> f64 {
    HC_EV_NM / wavelength_nm
}
