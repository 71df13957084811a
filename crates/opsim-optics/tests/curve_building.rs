//! Integration tests for curve construction.
//!
//! - Literature tables pass through verbatim, plus sentinel endpoints
//! - LAr index samples stay clear of the correlation's poles
//! - PVT index shows normal dispersion across the sampled range
//! - Energy ↔ wavelength conversion round-trips

use approx::assert_relative_eq;
use proptest::prelude::*;

use opsim_optics::catalog;
use opsim_optics::dispersion::{DispersionModel, LiteratureTable};
use opsim_optics::properties::PropertyKey;
use opsim_optics::registry::MaterialRegistry;
use opsim_optics::sampling::{EnergyRange, Sampling};
use opsim_optics::units::{energy_to_wavelength, wavelength_to_energy};
use opsim_optics::{build_curve, EnergyCurve};

fn built_rindex(spec: opsim_optics::MaterialSpec) -> EnergyCurve {
    let mut registry = MaterialRegistry::new();
    let material = registry.build_material(&spec).expect("catalog recipe builds");
    material
        .optical()
        .curve(&PropertyKey::Rindex)
        .expect("RINDEX present")
        .clone()
}

// ─────────────────────────────────────────────────────────────
// Literature tables
// ─────────────────────────────────────────────────────────────

fn ascending_table() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (
        1.0f64..4.0,
        prop::collection::vec((0.01f64..0.5, 0.0f64..10.0), 2..40),
    )
        .prop_map(|(start, steps)| {
            let mut e = start;
            let mut energies = Vec::with_capacity(steps.len());
            let mut values = Vec::with_capacity(steps.len());
            for (de, v) in steps {
                energies.push(e);
                values.push(v);
                e += de;
            }
            (energies, values)
        })
}

proptest! {
    #[test]
    fn literature_table_passes_through((energies, values) in ascending_table()) {
        let range = EnergyRange::global();
        let n = energies.len();
        let prepend = energies[0] > range.min();
        let append = energies[n - 1] < range.max();

        let table = LiteratureTable::new(energies.clone(), values.clone()).unwrap();
        let curve = build_curve(&DispersionModel::Table(table), &range, &Sampling::Count(2)).unwrap();

        prop_assert_eq!(curve.len(), n + prepend as usize + append as usize);
        prop_assert!(curve.energies().windows(2).all(|w| w[1] > w[0]));

        let offset = prepend as usize;
        for i in 0..n {
            prop_assert_eq!(curve.energies()[i + offset], energies[i]);
            prop_assert_eq!(curve.values()[i + offset], values[i]);
        }
        if prepend {
            prop_assert_eq!(curve.energies()[0], range.min());
            prop_assert_eq!(curve.values()[0], values[0]);
        }
        if append {
            prop_assert_eq!(*curve.energies().last().unwrap(), range.max());
            prop_assert_eq!(*curve.values().last().unwrap(), values[n - 1]);
        }
    }
}

#[test]
fn test_reversed_table_is_not_sorted_for_the_caller() {
    let table = LiteratureTable::new(vec![9.0, 6.0, 3.0], vec![1.0, 2.0, 3.0]).unwrap();
    let result = build_curve(
        &DispersionModel::Table(table),
        &EnergyRange::global(),
        &Sampling::Count(2),
    );
    assert!(result.is_err());
}

// ─────────────────────────────────────────────────────────────
// LAr
// ─────────────────────────────────────────────────────────────

#[test]
fn test_lar_samples_avoid_poles() {
    let rindex = built_rindex(catalog::lar().unwrap());
    for lambda in rindex.wavelengths_nm() {
        assert!((lambda - 106.6).abs() >= 2.0, "sample at {:.2} nm is near the UV pole", lambda);
        assert!((lambda - 908.3).abs() >= 2.0, "sample at {:.2} nm is near the IR pole", lambda);
    }
    for &n in rindex.values() {
        assert!(n.is_finite() && n >= 1.0, "non-physical LAr index {}", n);
    }
}

#[test]
fn test_lar_energy_step_walk_overshoots_once() {
    let range = EnergyRange::new(2.0, 11.3).unwrap();
    let curve = build_curve(&DispersionModel::lar(), &range, &Sampling::EnergyStep(0.02)).unwrap();
    let (lo, hi) = curve.energy_range();
    assert_eq!(lo, 2.0);
    assert!(hi >= 11.3 && hi < 11.32 + 1e-9, "last energy {}", hi);
    assert!(curve.energies()[curve.len() - 2] < 11.3);
    assert!(energy_to_wavelength(hi) - 106.6 >= 2.0);
}

// ─────────────────────────────────────────────────────────────
// PVT
// ─────────────────────────────────────────────────────────────

#[test]
fn test_pvt_normal_dispersion() {
    let rindex = built_rindex(catalog::pvt().unwrap());
    let (lo, hi) = rindex.energy_range();

    // Ascending energy = descending wavelength, so the index must rise.
    let samples: Vec<f64> = (0..10)
        .map(|i| rindex.value_at(lo + (hi - lo) * i as f64 / 9.0))
        .collect();
    for pair in samples.windows(2) {
        assert!(pair[1] > pair[0], "index not increasing: {:?}", samples);
    }
    assert!(rindex.values().windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_pvt_bound_is_below_pole() {
    let pvt = DispersionModel::pvt();
    let pole_energy = wavelength_to_energy(pvt.poles_nm()[0]);
    assert!(catalog::PVT_ENERGY_MAX < pole_energy);
}

// ─────────────────────────────────────────────────────────────
// Units
// ─────────────────────────────────────────────────────────────

#[test]
fn test_energy_wavelength_round_trip() {
    let mut e = 0.5;
    while e < 20.0 {
        assert_relative_eq!(
            wavelength_to_energy(energy_to_wavelength(e)),
            e,
            max_relative = 1e-9
        );
        e += 0.37;
    }
}
