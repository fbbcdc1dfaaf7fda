//! Hamiltonian module
//!
//! Creates the perturbing Hamiltonian for the Dyson equation. The perturbation is the attractive Coulomb interaction
//! between an electron at site `r` and a hole pinned at the central site of the chain:
//!
//! - At the central site the potential is `-A - delta`, where `A` sets the depth of the Coulomb well and `delta`
//!   detunes the on-site charge transfer state.
//! - At separation `r != 0` it decays as `-A / |r|`.
//!
//! The potential is local, so the Hamiltonian is diagonal and of dimension `2R + 1` where `R` is the truncation
//! distance. A `CoulombPotential` is a frequency independent `MatrixFunction`, so it composes directly with the
//! Green's functions.

use crate::{
    error::GreensFunctionError,
    greens_functions::{sites_in_range, validate_finite, MatrixFunction},
};
use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

#[derive(Copy, Clone, Debug, PartialEq)]
/// The Coulomb potential of a hole at the centre of a chain truncated at distance `range`
pub struct CoulombPotential {
    /// Additional on-site energy of the central, charge transfer, site
    detuning: f64,
    /// Depth of the Coulomb well
    well_depth: f64,
    range: usize,
}

impl CoulombPotential {
    /// Create a potential with the given `detuning` and `well_depth`
    pub fn new(detuning: f64, well_depth: f64, range: usize) -> Result<Self, GreensFunctionError> {
        Ok(Self {
            detuning: validate_finite("detuning", detuning)?,
            well_depth: validate_finite("well depth", well_depth)?,
            range,
        })
    }

    /// The potential at each site, ordered from `-range` to `range`
    pub fn diagonal(&self) -> DVector<f64> {
        DVector::from_fn(sites_in_range(self.range), |site, _| {
            let separation = site.abs_diff(self.range);
            if separation == 0 {
                -self.well_depth - self.detuning
            } else {
                -self.well_depth / separation as f64
            }
        })
    }
}

impl MatrixFunction for CoulombPotential {
    fn dimension(&self) -> usize {
        sites_in_range(self.range)
    }

    fn evaluate(&self, _frequency: Complex<f64>) -> Result<DMatrix<Complex<f64>>, GreensFunctionError> {
        Ok(DMatrix::from_diagonal(&self.diagonal().map(Complex::from)))
    }
}

#[cfg(test)]
mod test {
    use super::CoulombPotential;
    use crate::error::GreensFunctionError;
    use crate::greens_functions::MatrixFunction;
    use approx::assert_relative_eq;
    use num_complex::Complex;
    use rand::Rng;

    #[test]
    fn central_site_holds_the_detuned_well() {
        let mut rng = rand::thread_rng();
        let detuning: f64 = rng.gen();
        let well_depth: f64 = rng.gen();
        let potential = CoulombPotential::new(detuning, well_depth, 4).unwrap();
        assert_relative_eq!(potential.diagonal()[4], -well_depth - detuning);
    }

    #[test]
    fn potential_decays_inversely_with_separation() {
        let potential = CoulombPotential::new(0.5, 3., 3).unwrap();
        let diagonal = potential.diagonal();
        for (site, separation) in [(0, 3), (1, 2), (2, 1), (4, 1), (5, 2), (6, 3)] {
            assert_relative_eq!(diagonal[site], -3. / separation as f64);
        }
    }

    #[test]
    fn matrix_is_diagonal_and_real() {
        let potential = CoulombPotential::new(0.5, 3., 2).unwrap();
        let matrix = potential.evaluate(Complex::new(1., 0.1)).unwrap();
        assert_eq!(matrix.shape(), (5, 5));
        for row in 0..5 {
            for column in 0..5 {
                assert_eq!(matrix[(row, column)].im, 0.);
                if row != column {
                    assert_eq!(matrix[(row, column)].re, 0.);
                }
            }
        }
    }

    #[test]
    fn zero_range_potential_is_a_single_site() {
        let potential = CoulombPotential::new(0.5, 3., 0).unwrap();
        let matrix = potential.evaluate(Complex::new(0., 0.)).unwrap();
        assert_eq!(matrix.shape(), (1, 1));
        assert_relative_eq!(matrix[(0, 0)].re, -3.5);
    }

    #[test]
    fn non_finite_parameters_are_rejected() {
        assert!(matches!(
            CoulombPotential::new(f64::INFINITY, 3., 2),
            Err(GreensFunctionError::InvalidParameter(_))
        ));
        assert!(matches!(
            CoulombPotential::new(0.5, f64::NAN, 2),
            Err(GreensFunctionError::InvalidParameter(_))
        ));
    }
}
