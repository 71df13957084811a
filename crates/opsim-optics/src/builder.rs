//! Optical property table construction.
//!
//! [`build_curve`] turns a [`DispersionModel`] into an [`EnergyCurve`]:
//!
//! - **Fits** (Sellmeier, LAr correlation) are evaluated on the grid given by
//!   a [`Sampling`] rule. The last sample may overshoot the range bound.
//! - **Constants** become the two-point table `(min, v), (max, v)`.
//! - **Literature tables** are passed through verbatim. When the table does
//!   not reach the range bounds, a sentinel point carrying the nearest real
//!   value is inserted at `min` and/or `max` so the engine never interpolates
//!   outside the table.
//!
//! [`build_properties`] applies this to every property of a [`MaterialSpec`];
//! [`build_bundle`] does the same for surfaces and other non-bulk bundles.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::curve::EnergyCurve;
use crate::dispersion::DispersionModel;
use crate::error::OpticsError;
use crate::properties::{ConstantKey, MaterialOpticalProperties, PropertyKey};
use crate::registry::MaterialState;
use crate::sampling::{EnergyRange, Sampling};

/// Build a single property curve.
///
/// `sampling` only matters for fitted models.
///
/// # Errors
/// Fails on an invalid sampling rule, or when a literature table is not
/// strictly ascending in energy (tables are never sorted here).
pub fn build_curve(
    model: &DispersionModel,
    range: &EnergyRange,
    sampling: &Sampling,
) -> Result<EnergyCurve, OpticsError> {
    match model {
        DispersionModel::Constant { value } => {
            EnergyCurve::new(vec![range.min(), range.max()], vec![*value, *value])
        }
        DispersionModel::Table(table) => {
            let mut energies = Vec::with_capacity(table.len() + 2);
            let mut values = Vec::with_capacity(table.len() + 2);

            if let (Some(&first_e), Some(&first_v)) = (table.energies().first(), table.values().first()) {
                if first_e > range.min() {
                    energies.push(range.min());
                    values.push(first_v);
                }
            }
            energies.extend_from_slice(table.energies());
            values.extend_from_slice(table.values());
            if let (Some(&last_e), Some(&last_v)) = (table.energies().last(), table.values().last()) {
                if last_e < range.max() {
                    energies.push(range.max());
                    values.push(last_v);
                }
            }

            EnergyCurve::new(energies, values)
        }
        DispersionModel::Sellmeier { .. } | DispersionModel::LarCorrelation { .. } => {
            let energies = sampling.grid(range)?;
            let values = energies.iter().map(|&e| model.evaluate(e)).collect();
            EnergyCurve::new(energies, values)
        }
    }
}

/// How one property of a material is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    pub model: DispersionModel,
    pub range: EnergyRange,
    pub sampling: Sampling,
}

impl PropertySpec {
    pub fn new(model: DispersionModel, range: EnergyRange, sampling: Sampling) -> Self {
        Self {
            model,
            range,
            sampling,
        }
    }

    /// A constant value over `range`.
    pub fn constant(value: f64, range: EnergyRange) -> Self {
        Self::new(
            DispersionModel::Constant { value },
            range,
            Sampling::Count(2),
        )
    }

    pub fn build(&self) -> Result<EnergyCurve, OpticsError> {
        build_curve(&self.model, &self.range, &self.sampling)
    }
}

/// Everything needed to build a material and its optical properties.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSpec {
    pub name: String,
    /// Density in g/cm³.
    pub density: f64,
    pub state: MaterialState,
    pub properties: BTreeMap<PropertyKey, PropertySpec>,
    pub constants: BTreeMap<ConstantKey, f64>,
}

impl MaterialSpec {
    pub fn new(name: impl Into<String>, density: f64, state: MaterialState) -> Self {
        Self {
            name: name.into(),
            density,
            state,
            properties: BTreeMap::new(),
            constants: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: PropertyKey, spec: PropertySpec) -> Self {
        self.properties.insert(key, spec);
        self
    }

    pub fn with_constant(mut self, key: ConstantKey, value: f64) -> Self {
        self.constants.insert(key, value);
        self
    }
}

/// Build the optical property bundle described by `spec`.
///
/// Values outside a property's physical domain are logged, not rejected:
/// keeping fits away from their poles is the caller's job.
pub fn build_properties(spec: &MaterialSpec) -> Result<MaterialOpticalProperties, OpticsError> {
    build_bundle(&spec.name, &spec.properties, &spec.constants)
}

/// Build a named bundle that is not tied to a bulk material, such as the
/// properties of an optical surface.
pub fn build_bundle(
    name: &str,
    properties: &BTreeMap<PropertyKey, PropertySpec>,
    constants: &BTreeMap<ConstantKey, f64>,
) -> Result<MaterialOpticalProperties, OpticsError> {
    let mut curves = BTreeMap::new();
    for (key, prop) in properties {
        let curve = prop.build().map_err(|e| OpticsError::Property {
            material: name.to_string(),
            key: key.clone(),
            source: Box::new(e),
        })?;
        let (lo, hi) = curve.energy_range();
        debug!(
            "{}: {} with {} points over [{:.4}, {:.4}] eV",
            name,
            key,
            curve.len(),
            lo,
            hi
        );
        if let Err(e) = curve.check_domain(key) {
            warn!("{}: {}", name, e);
        }
        curves.insert(key.clone(), curve);
    }
    Ok(MaterialOpticalProperties::new(name, curves, constants.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispersion::LiteratureTable;

    fn range() -> EnergyRange {
        EnergyRange::new(2.0, 11.5).unwrap()
    }

    #[test]
    fn test_constant_gives_two_points() {
        let curve = build_curve(
            &DispersionModel::Constant { value: 1.0 },
            &range(),
            &Sampling::EnergyStep(0.01),
        )
        .unwrap();
        assert_eq!(curve.energies(), &[2.0, 11.5]);
        assert_eq!(curve.values(), &[1.0, 1.0]);
    }

    #[test]
    fn test_table_gets_both_sentinels() {
        let table = LiteratureTable::new(vec![3.0, 4.0, 5.0], vec![0.1, 0.5, 0.2]).unwrap();
        let curve = build_curve(&DispersionModel::Table(table), &range(), &Sampling::Count(2)).unwrap();
        assert_eq!(curve.energies(), &[2.0, 3.0, 4.0, 5.0, 11.5]);
        assert_eq!(curve.values(), &[0.1, 0.1, 0.5, 0.2, 0.2]);
    }

    #[test]
    fn test_table_covering_range_is_verbatim() {
        let table = LiteratureTable::new(vec![2.0, 6.0, 11.5], vec![3.0, 2.0, 1.0]).unwrap();
        let curve = build_curve(&DispersionModel::Table(table), &range(), &Sampling::Count(2)).unwrap();
        assert_eq!(curve.energies(), &[2.0, 6.0, 11.5]);
        assert_eq!(curve.values(), &[3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_unsorted_table_is_rejected() {
        let table = LiteratureTable::new(vec![5.0, 3.0, 4.0], vec![1.0, 1.0, 1.0]).unwrap();
        let err = build_curve(&DispersionModel::Table(table), &range(), &Sampling::Count(2)).unwrap_err();
        assert!(matches!(err, OpticsError::NotIncreasing { .. }));
    }

    #[test]
    fn test_failed_property_names_material() {
        let spec = MaterialSpec::new("BROKEN", 1.0, MaterialState::Solid).with_property(
            PropertyKey::Rindex,
            PropertySpec::new(DispersionModel::pvt(), range(), Sampling::EnergyStep(0.0)),
        );
        let msg = build_properties(&spec).unwrap_err().to_string();
        assert!(msg.contains("BROKEN") && msg.contains("RINDEX"), "{}", msg);
    }
}
