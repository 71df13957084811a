//! Energy ranges and sampling grids for fitted dispersion models.
//!
//! Fits are sampled on a grid produced by a [`Sampling`] rule inside an
//! [`EnergyRange`]. The energy walk stops at the first sample that reaches
//! the far bound, so the final sample may overshoot it by less than one step.
//! The wavelength walk takes one further coarse step past that sample before
//! stopping. Downstream tables rely on both boundary behaviours exactly.
//!
//! No grid may exceed [`MAX_GRID_POINTS`] samples.

use serde::{Deserialize, Serialize};

use crate::error::OpticsError;
use crate::units::{energy_to_wavelength, wavelength_to_energy, GLOBAL_ENERGY_MAX, GLOBAL_ENERGY_MIN};

/// Upper limit on the number of samples in one grid.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Photon-energy interval in eV with `0 < min < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyRange {
    min: f64,
    max: f64,
}

impl EnergyRange {
    pub fn new(min: f64, max: f64) -> Result<Self, OpticsError> {
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
            return Err(OpticsError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// The shared [2.0, 11.5] eV interval.
    pub fn global() -> Self {
        Self {
            min: GLOBAL_ENERGY_MIN,
            max: GLOBAL_ENERGY_MAX,
        }
    }

    /// The global interval with a reduced upper bound.
    ///
    /// Fits with a UV pole need `max` kept below the pole energy; the safe
    /// value depends on the material, so there is no universal default.
    pub fn global_up_to(max: f64) -> Result<Self, OpticsError> {
        Self::new(GLOBAL_ENERGY_MIN, max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// `(shortest, longest)` wavelength in nm.
    pub fn wavelength_bounds(&self) -> (f64, f64) {
        (energy_to_wavelength(self.max), energy_to_wavelength(self.min))
    }
}

/// How a fitted model is sampled over an [`EnergyRange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// Walk up from `min` in fixed energy steps (eV) until reaching `max`.
    EnergyStep(f64),
    /// `n >= 2` evenly spaced energies from `min` to `max` inclusive.
    Count(usize),
    /// Walk up in wavelength from `hc/max` until reaching `hc/min`, with a
    /// finer step below `split_nm`, then take one more step.
    ///
    /// The lowest sampled energy therefore lies just under `min`.
    WavelengthSteps {
        fine_step_nm: f64,
        coarse_step_nm: f64,
        split_nm: f64,
    },
}

impl Sampling {
    /// 0.3 nm below 300 nm, 1 nm above.
    pub fn default_wavelength_steps() -> Self {
        Sampling::WavelengthSteps {
            fine_step_nm: 0.3,
            coarse_step_nm: 1.0,
            split_nm: 300.0,
        }
    }

    /// Produce strictly increasing sample energies (eV) for `range`.
    pub fn grid(&self, range: &EnergyRange) -> Result<Vec<f64>, OpticsError> {
        match *self {
            Sampling::EnergyStep(step) => {
                check_step("energy step", step)?;
                check_size((range.max - range.min) / step + 2.0)?;
                let mut energies = vec![range.min];
                let mut i = 0usize;
                while energies[i] < range.max {
                    i += 1;
                    energies.push(range.min + i as f64 * step);
                }
                Ok(energies)
            }
            Sampling::Count(points) => {
                if points < 2 {
                    return Err(OpticsError::InvalidSampling(format!(
                        "need at least 2 sample points, got {}",
                        points
                    )));
                }
                check_size(points as f64)?;
                let span = range.max - range.min;
                let last = points - 1;
                Ok((0..points)
                    .map(|i| {
                        if i == last {
                            range.max
                        } else {
                            range.min + span * i as f64 / last as f64
                        }
                    })
                    .collect())
            }
            Sampling::WavelengthSteps {
                fine_step_nm,
                coarse_step_nm,
                split_nm,
            } => {
                check_step("fine wavelength step", fine_step_nm)?;
                check_step("coarse wavelength step", coarse_step_nm)?;
                let (lambda_lo, lambda_hi) = range.wavelength_bounds();
                check_size((lambda_hi - lambda_lo) / fine_step_nm.min(coarse_step_nm) + 3.0)?;
                let step = |l: f64| if l < split_nm { fine_step_nm } else { coarse_step_nm };

                let mut lambdas = vec![lambda_lo];
                let mut last = lambda_lo;
                while last < lambda_hi {
                    last += step(last);
                    lambdas.push(last);
                }
                last += step(last);
                lambdas.push(last);
                Ok(lambdas.into_iter().rev().map(wavelength_to_energy).collect())
            }
        }
    }
}

/// Reject grids whose estimated size exceeds [`MAX_GRID_POINTS`].
fn check_size(points: f64) -> Result<(), OpticsError> {
    if points > MAX_GRID_POINTS as f64 {
        return Err(OpticsError::InvalidSampling(format!(
            "grid would need about {:.0} points, more than the limit of {}",
            points, MAX_GRID_POINTS
        )));
    }
    Ok(())
}

fn check_step(what: &str, step: f64) -> Result<(), OpticsError> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(OpticsError::InvalidSampling(format!(
            "{} must be positive and finite, got {}",
            what, step
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_range_validation() {
        assert!(EnergyRange::new(2.0, 11.5).is_ok());
        assert!(EnergyRange::new(0.0, 1.0).is_err());
        assert!(EnergyRange::new(3.0, 3.0).is_err());
        assert!(EnergyRange::new(5.0, 2.0).is_err());
        assert!(EnergyRange::new(2.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_energy_step_overshoots_by_less_than_one_step() {
        let range = EnergyRange::new(2.0, 3.05).unwrap();
        let grid = Sampling::EnergyStep(0.1).grid(&range).unwrap();
        let last = *grid.last().unwrap();
        assert!(last >= range.max());
        assert!(last < range.max() + 0.1);
        assert!(grid[grid.len() - 2] < range.max());
        assert_eq!(grid.len(), 12);
        assert_relative_eq!(last, 3.1, epsilon = 1e-12);
    }

    #[test]
    fn test_energy_step_lands_on_bound() {
        let range = EnergyRange::new(2.0, 3.0).unwrap();
        let grid = Sampling::EnergyStep(0.5).grid(&range).unwrap();
        assert_eq!(grid, vec![2.0, 2.5, 3.0]);
    }

    #[test]
    fn test_count_hits_both_ends() {
        let range = EnergyRange::new(2.0, 7.0).unwrap();
        let grid = Sampling::Count(11).grid(&range).unwrap();
        assert_eq!(grid.len(), 11);
        assert_eq!(grid[0], 2.0);
        assert_eq!(grid[10], 7.0);
        assert!(Sampling::Count(1).grid(&range).is_err());
    }

    #[test]
    fn test_wavelength_steps_are_ascending_in_energy() {
        let range = EnergyRange::new(2.0, 7.0).unwrap();
        let grid = Sampling::default_wavelength_steps().grid(&range).unwrap();
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
        assert_relative_eq!(*grid.last().unwrap(), 7.0, max_relative = 1e-12);
    }

    #[test]
    fn test_wavelength_walk_steps_once_past_the_bound() {
        let range = EnergyRange::new(2.0, 7.0).unwrap();
        let grid = Sampling::default_wavelength_steps().grid(&range).unwrap();
        assert_eq!(grid.len(), 732);

        // First wavelength at or beyond hc/min, then one more 1 nm step.
        let longest = energy_to_wavelength(grid[0]);
        let first_past = energy_to_wavelength(grid[1]);
        assert!(first_past >= energy_to_wavelength(2.0));
        assert!(energy_to_wavelength(grid[2]) < energy_to_wavelength(2.0));
        assert_relative_eq!(longest - first_past, 1.0, epsilon = 1e-9);
        assert_relative_eq!(longest, 621.120283, epsilon = 1e-5);
    }

    #[test]
    fn test_oversized_grids_rejected() {
        let range = EnergyRange::global();
        assert!(matches!(
            Sampling::EnergyStep(1e-12).grid(&range),
            Err(OpticsError::InvalidSampling(_))
        ));
        assert!(Sampling::Count(MAX_GRID_POINTS + 1).grid(&range).is_err());
        assert!(Sampling::Count(MAX_GRID_POINTS).grid(&range).is_ok());
        let tiny = Sampling::WavelengthSteps {
            fine_step_nm: 1e-9,
            coarse_step_nm: 1.0,
            split_nm: 300.0,
        };
        assert!(tiny.grid(&range).is_err());
        assert!(Sampling::EnergyStep(1e-5).grid(&range).is_ok());
    }

    #[test]
    fn test_non_positive_step_rejected() {
        let range = EnergyRange::global();
        assert!(Sampling::EnergyStep(0.0).grid(&range).is_err());
        assert!(Sampling::EnergyStep(-0.1).grid(&range).is_err());
    }
}
