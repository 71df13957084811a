//! # OpSim Optics
//!
//! Optical property tables for photon-transport setups in liquid argon and
//! xenon: refractive index, absorption length and wavelength-shifting
//! spectra tabulated against photon energy, ready for a transport engine to
//! interpolate.
//!
//! ## Building blocks
//!
//! | Concept | Module |
//! |---------|--------|
//! | Energy/wavelength units and $hc$ | [`units`] |
//! | Tabulated curve (energy → value) | [`curve`] |
//! | Fits and literature tables | [`dispersion`] |
//! | Sampling grids | [`sampling`] |
//! | Curve and bundle construction | [`builder`] |
//! | Property bundles | [`properties`] |
//! | Build-once material registry | [`registry`] |
//! | Built-in detector materials | [`catalog`] |
//! | Two-column CSV ingestion | [`reader`] |
//!
//! ## Example
//!
//! ```
//! use opsim_optics::catalog;
//! use opsim_optics::properties::PropertyKey;
//! use opsim_optics::registry::MaterialRegistry;
//!
//! let mut registry = MaterialRegistry::new();
//! let lar = registry.build_material(&catalog::lar().unwrap()).unwrap();
//! let rindex = lar.optical().curve(&PropertyKey::Rindex).unwrap();
//! assert!(rindex.values().iter().all(|&n| n >= 1.0));
//! ```

pub mod builder;
pub mod catalog;
pub mod curve;
pub mod dispersion;
pub mod error;
pub mod properties;
pub mod reader;
pub mod registry;
pub mod sampling;
pub mod units;

pub use builder::{build_curve, build_properties, MaterialSpec, PropertySpec};
pub use curve::EnergyCurve;
pub use dispersion::{DispersionModel, LiteratureTable};
pub use error::OpticsError;
pub use properties::{ConstantKey, MaterialOpticalProperties, PropertyKey};
pub use registry::{Material, MaterialRegistry, MaterialState};
pub use sampling::{EnergyRange, Sampling};
