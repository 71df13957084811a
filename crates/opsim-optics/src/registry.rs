//! Material registry: build-if-absent lookup by name.
//!
//! The transport engine refuses two materials with the same name, so every
//! material is built at most once per setup. [`MaterialRegistry`] owns that
//! cache explicitly; setup code creates one and passes it to whatever needs
//! material lookups. Entries live as long as the registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::builder::{build_properties, MaterialSpec};
use crate::error::OpticsError;
use crate::properties::MaterialOpticalProperties;

/// Aggregate state of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialState {
    Solid,
    Liquid,
    Gas,
}

impl fmt::Display for MaterialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MaterialState::Solid => "solid",
            MaterialState::Liquid => "liquid",
            MaterialState::Gas => "gas",
        };
        f.pad(s)
    }
}

/// A built material together with the optical bundle that annotates it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    name: String,
    /// g/cm³
    density: f64,
    state: MaterialState,
    optical: MaterialOpticalProperties,
}

impl Material {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn state(&self) -> MaterialState {
        self.state
    }

    pub fn optical(&self) -> &MaterialOpticalProperties {
        &self.optical
    }
}

/// Materials built so far, keyed by name.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: BTreeMap<String, Arc<Material>>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the material described by `spec`, or return the one already
    /// registered under the same name.
    ///
    /// A repeated request hands back the same `Arc` and ignores the rest of
    /// `spec`. A failed build leaves the registry untouched.
    pub fn build_material(&mut self, spec: &MaterialSpec) -> Result<Arc<Material>, OpticsError> {
        if let Some(existing) = self.materials.get(&spec.name) {
            debug!("Material '{}' already built, reusing it", spec.name);
            return Ok(Arc::clone(existing));
        }

        let optical = build_properties(spec)?;
        let material = Arc::new(Material {
            name: spec.name.clone(),
            density: spec.density,
            state: spec.state,
            optical,
        });
        info!(
            "Built material '{}' ({}, {} g/cm3, {} optical curves)",
            material.name,
            material.state,
            material.density,
            material.optical.curves().count()
        );
        self.materials.insert(spec.name.clone(), Arc::clone(&material));
        Ok(material)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Material>> {
        self.materials.get(name).cloned()
    }

    /// Like [`get`](Self::get) but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<Arc<Material>, OpticsError> {
        self.get(name)
            .ok_or_else(|| OpticsError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Material>> {
        self.materials.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::PropertySpec;
    use crate::dispersion::DispersionModel;
    use crate::properties::PropertyKey;
    use crate::sampling::{EnergyRange, Sampling};

    #[test]
    fn test_failed_build_is_not_registered() {
        let mut registry = MaterialRegistry::new();
        let spec = MaterialSpec::new("BAD", 1.0, MaterialState::Solid).with_property(
            PropertyKey::Rindex,
            PropertySpec::new(
                DispersionModel::pvt(),
                EnergyRange::global(),
                Sampling::Count(0),
            ),
        );
        assert!(registry.build_material(&spec).is_err());
        assert!(!registry.contains("BAD"));
        assert!(matches!(registry.require("BAD"), Err(OpticsError::NotFound(_))));
    }

    #[test]
    fn test_second_request_ignores_new_spec() {
        let mut registry = MaterialRegistry::new();
        let first = registry
            .build_material(&MaterialSpec::new("X", 1.0, MaterialState::Liquid))
            .unwrap();
        let second = registry
            .build_material(&MaterialSpec::new("X", 9.0, MaterialState::Gas))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.density(), 1.0);
        assert_eq!(registry.len(), 1);
    }
}
