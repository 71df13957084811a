//! Job runner: resolves configured materials, builds their tables and writes
//! them out.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use opsim_optics::builder::{MaterialSpec, PropertySpec};
use opsim_optics::catalog;
use opsim_optics::dispersion::DispersionModel;
use opsim_optics::properties::{ConstantKey, MaterialOpticalProperties, PropertyKey};
use opsim_optics::reader::read_two_column_csv;
use opsim_optics::registry::{Material, MaterialRegistry};
use opsim_optics::sampling::{EnergyRange, Sampling};
use opsim_optics::units::{EV, NM};

use crate::config::{AxisUnit, CustomMaterialConfig, JobConfig, MaterialConfig, PropertyConfig};

/// Everything built by a job.
pub struct BuildOutput {
    pub registry: MaterialRegistry,
    pub surfaces: Vec<MaterialOpticalProperties>,
}

/// Build every material and surface named in `job`.
///
/// Relative CSV paths are resolved against `base_dir`, normally the
/// directory holding the job file.
pub fn build_job(job: &JobConfig, base_dir: &Path) -> Result<BuildOutput> {
    let mut registry = MaterialRegistry::new();

    for entry in &job.materials {
        let spec = match entry {
            MaterialConfig::Catalog { catalog: name } => catalog::by_name(name)
                .with_context(|| {
                    format!(
                        "Unknown catalog material '{}'. Valid names: {}",
                        name,
                        catalog::NAMES.join(", ")
                    )
                })?
                .with_context(|| format!("Catalog material '{}'", name))?,
            MaterialConfig::Custom(custom) => custom_spec(custom, base_dir)?,
        };
        let material = registry.build_material(&spec)?;
        println!(
            "  Material '{}': {} curves, {} constants",
            material.name(),
            material.optical().curves().count(),
            material.optical().constants().count()
        );
    }

    let mut surfaces = Vec::with_capacity(job.surfaces.len());
    for name in &job.surfaces {
        let surface = match name.as_str() {
            "PHOTOSENSOR_OPSURF" => catalog::photosensor_surface()?,
            other => anyhow::bail!(
                "Unknown optical surface '{}'. Valid names: PHOTOSENSOR_OPSURF",
                other
            ),
        };
        println!("  Surface '{}': {} curves", surface.name(), surface.curves().count());
        surfaces.push(surface);
    }

    Ok(BuildOutput { registry, surfaces })
}

/// Translate a custom material section into a [`MaterialSpec`].
fn custom_spec(custom: &CustomMaterialConfig, base_dir: &Path) -> Result<MaterialSpec> {
    let mut spec = MaterialSpec::new(custom.name.clone(), custom.density, custom.state);

    for (key, prop) in &custom.properties {
        let key = PropertyKey::from(key.as_str());
        let prop_spec = match prop {
            PropertyConfig::Model {
                model,
                range,
                sampling,
            } => PropertySpec::new(model.clone(), resolve_range(*range)?, sampling.clone()),
            PropertyConfig::Csv {
                csv,
                x_unit,
                y_scale,
                range,
            } => {
                let path = base_dir.join(csv);
                let x_scale = match x_unit {
                    AxisUnit::Ev => EV,
                    AxisUnit::Nm => NM,
                };
                let columns = read_two_column_csv(&path, x_scale, *y_scale)
                    .with_context(|| format!("Material '{}', property {}", custom.name, key))?;
                let table = match x_unit {
                    AxisUnit::Ev => columns.into_table()?,
                    AxisUnit::Nm => columns.into_table_from_wavelengths()?,
                };
                PropertySpec::new(
                    DispersionModel::Table(table),
                    resolve_range(*range)?,
                    Sampling::Count(2),
                )
            }
        };
        spec = spec.with_property(key, prop_spec);
    }

    for (key, value) in &custom.constants {
        spec = spec.with_constant(ConstantKey::from(key.as_str()), *value);
    }

    Ok(spec)
}

fn resolve_range(range: Option<[f64; 2]>) -> Result<EnergyRange> {
    Ok(match range {
        Some([min, max]) => EnergyRange::new(min, max)?,
        None => EnergyRange::global(),
    })
}

/// Write one CSV per property curve of `optical` into `dir`.
///
/// Files are named `<bundle>_<PROPERTY>.csv`.
pub fn write_tables_csv(optical: &MaterialOpticalProperties, dir: &Path) -> Result<()> {
    use std::io::Write;

    std::fs::create_dir_all(dir)?;

    for (key, curve) in optical.curves() {
        let path = dir.join(format!("{}_{}.csv", optical.name(), key));
        let mut file = std::fs::File::create(&path)
            .with_context(|| format!("Creating {}", path.display()))?;

        writeln!(file, "# OpSim optical table")?;
        writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(file, "# bundle: {}", optical.name())?;
        writeln!(file, "# property: {}", key)?;
        for (ckey, value) in optical.constants() {
            writeln!(file, "# {} = {}", ckey, value)?;
        }
        writeln!(file, "#")?;
        writeln!(file, "energy_ev,wavelength_nm,value")?;

        for ((energy, value), wavelength) in curve.points().zip(curve.wavelengths_nm()) {
            writeln!(file, "{:.6},{:.4},{:.8e}", energy, wavelength, value)?;
        }
        log::debug!("Wrote {} points to {}", curve.len(), path.display());
    }

    Ok(())
}

/// Write all built materials and surfaces to a single JSON file.
pub fn write_json(
    materials: &[Arc<Material>],
    surfaces: &[MaterialOpticalProperties],
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let materials: Vec<&Material> = materials.iter().map(|m| m.as_ref()).collect();
    let mut doc = BTreeMap::new();
    doc.insert("materials", serde_json::to_value(&materials)?);
    doc.insert("surfaces", serde_json::to_value(surfaces)?);

    let json = serde_json::to_string_pretty(&doc)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Tables (JSON) written to: {}", path.display());
    Ok(())
}
