//! The retarded Green's function of an infinite one dimensional tight-binding chain
//!
//! For on-site energy `E` and bandwidth `B` the propagator between sites `n` and `m` is
//!
//! ```text
//! G0(w)[n, m] = beta * gamma^|n - m|,   beta = -i / sqrt(B^2 - (w - E)^2),   gamma = -x + i sqrt(1 - x^2)
//! ```
//!
//! with `x = (w - E) / B`. The band occupies `E - B < w < E + B`, and outside the band `|gamma| < 1` so the propagator
//! decays with distance. The function is truncated to the `2R + 1` sites within distance `R` of the central site.

use super::{sites_in_range, validate_finite, MatrixFunction};
use crate::{constants::CHAIN_REGULARISER, error::GreensFunctionError};
use nalgebra::DMatrix;
use num_complex::Complex;

/// Closed-form Green's function of a tight-binding chain, truncated at distance `range`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TightBindingChain {
    energy: f64,
    bandwidth: f64,
    range: usize,
    /// Imaginary part added to every frequency before evaluation, keeps the square roots off their branch cuts
    regulariser: f64,
}

impl TightBindingChain {
    /// Create the chain Green's function with on-site `energy` and `bandwidth`
    pub fn new(energy: f64, bandwidth: f64, range: usize) -> Result<Self, GreensFunctionError> {
        let energy = validate_finite("energy", energy)?;
        let bandwidth = validate_finite("bandwidth", bandwidth)?;
        if bandwidth < 0. {
            return Err(GreensFunctionError::invalid_parameter(format!(
                "the bandwidth must be non-negative, got {bandwidth}"
            )));
        }
        Ok(Self {
            energy,
            bandwidth,
            range,
            regulariser: CHAIN_REGULARISER,
        })
    }

    /// Replace the default imaginary regulariser
    pub fn with_regulariser(self, regulariser: f64) -> Result<Self, GreensFunctionError> {
        let regulariser = validate_finite("regulariser", regulariser)?;
        if regulariser < 0. {
            return Err(GreensFunctionError::invalid_parameter(format!(
                "the regulariser must be non-negative, got {regulariser}"
            )));
        }
        Ok(Self {
            regulariser,
            ..self
        })
    }

    /// The truncation distance
    pub fn range(&self) -> usize {
        self.range
    }

    /// Propagators `beta * gamma^s` for separations `s = 0..number_of_sites`
    fn propagators(&self, frequency: Complex<f64>) -> Vec<Complex<f64>> {
        let number_of_sites = self.dimension();
        let detuning = frequency + Complex::new(0., self.regulariser) - self.energy;

        let x = detuning / self.bandwidth;

        // Without hopping every site is isolated, a vanishing bandwidth overflows `x`
        if self.bandwidth == 0. || !(x.re.is_finite() && x.im.is_finite()) {
            let mut propagators = vec![Complex::new(0., 0.); number_of_sites];
            propagators[0] = detuning.inv();
            return propagators;
        }

        // `gamma` and `1 / gamma` are the roots of `z^2 + 2xz + 1`. The larger root is free of cancellation, and
        // splitting the square root avoids overflowing `x * x`.
        let i = Complex::<f64>::i();
        let root = (1. - x).sqrt() * (1. + x).sqrt();
        let (first, second) = (-x + i * root, -x - i * root);
        let outer = if first.norm() >= second.norm() {
            first
        } else {
            second
        };
        let gamma = outer.inv();
        // -i / sqrt(B^2 - (w - E)^2) written in terms of the two roots
        let beta = -2. / ((outer - gamma) * self.bandwidth);

        std::iter::successors(Some(beta), |previous| Some(previous * gamma))
            .take(number_of_sites)
            .collect()
    }
}

impl MatrixFunction for TightBindingChain {
    fn dimension(&self) -> usize {
        sites_in_range(self.range)
    }

    fn evaluate(&self, frequency: Complex<f64>) -> Result<DMatrix<Complex<f64>>, GreensFunctionError> {
        let propagators = self.propagators(frequency);
        let number_of_sites = self.dimension();
        Ok(DMatrix::from_fn(number_of_sites, number_of_sites, |row, column| {
            propagators[row.abs_diff(column)]
        }))
    }
}
