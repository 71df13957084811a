//! TOML configuration deserialisation for table-building jobs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use opsim_optics::dispersion::DispersionModel;
use opsim_optics::registry::MaterialState;
use opsim_optics::sampling::Sampling;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    #[serde(default, rename = "material")]
    pub materials: Vec<MaterialConfig>,
    /// Built-in optical surfaces to tabulate (e.g. "PHOTOSENSOR_OPSURF").
    #[serde(default)]
    pub surfaces: Vec<String>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// A material to build: either a catalog entry or a custom recipe.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MaterialConfig {
    Catalog { catalog: String },
    Custom(CustomMaterialConfig),
}

/// A user-defined material.
#[derive(Debug, Deserialize)]
pub struct CustomMaterialConfig {
    pub name: String,
    /// Density in g/cm³.
    pub density: f64,
    pub state: MaterialState,
    /// Property curves keyed by engine name ("RINDEX", "WLSCOMPONENT", ...).
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyConfig>,
    /// Scalar constants keyed by engine name ("WLSTIMECONSTANT", ...).
    #[serde(default)]
    pub constants: BTreeMap<String, f64>,
}

/// Source of one property curve.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PropertyConfig {
    /// Analytic model or inline table.
    Model {
        model: DispersionModel,
        /// `[min, max]` in eV; the global [2.0, 11.5] when omitted.
        range: Option<[f64; 2]>,
        #[serde(default = "default_sampling")]
        sampling: Sampling,
    },
    /// Two-column CSV file, path relative to the job file.
    Csv {
        csv: PathBuf,
        /// Unit of the first column; "nm" files are wavelength-ordered.
        #[serde(default)]
        x_unit: AxisUnit,
        /// Multiplier bringing the second column into canonical units.
        #[serde(default = "default_scale")]
        y_scale: f64,
        range: Option<[f64; 2]>,
    },
}

/// Unit of the first CSV column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisUnit {
    #[default]
    Ev,
    Nm,
}

fn default_sampling() -> Sampling {
    Sampling::default_wavelength_steps()
}

fn default_scale() -> f64 {
    1.0
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./tables").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to write one CSV per property (default: true).
    #[serde(default = "default_true")]
    pub save_csv: bool,
    /// Whether to also dump every bundle as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_csv: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./tables".into()
}
fn default_true() -> bool {
    true
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}
