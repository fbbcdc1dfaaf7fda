//! # Dyson equation
//!
//! Assembles the Green's function of the perturbed chain and reduces it to a spectrum. For an unperturbed Green's
//! function `G0` and perturbation `Hp` the scattering matrix and full Green's function are
//!
//! ```text
//! T = Hp (I - G0 Hp)^-1
//! G = G0 + G0 T G0
//! ```
//!
//! The unperturbed chain is centred on `E + A + delta`, so that after adding the Coulomb potential the central site
//! sits at the bare on-site energy `E`. The absorption is the local density of states at the central site and the
//! total density of states is the normalised trace.

mod parameters;

pub use parameters::{Numerics, SpectrumParameters};

use crate::{
    error::GreensFunctionError,
    greens_functions::{validate_range, Compose, Identity, MatrixFunction, TightBindingChain},
    hamiltonian::CoulombPotential,
    postprocessor::DensityOfStates,
    spectral::FrequencyScan,
};
use itertools::Itertools;
use nalgebra::DMatrix;
use ndarray::Array1;
use num_complex::Complex;
use rayon::prelude::*;

/// The output of a spectrum calculation, all arrays share the length of the frequency scan
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum {
    /// The real frequencies of the scan
    pub frequencies: Array1<f64>,
    /// Local density of states at the central site
    pub absorption: Array1<f64>,
    /// Total density of states, normalised by the number of sites
    pub density_of_states: Array1<f64>,
}

impl Spectrum {
    /// The frequency and height of the largest absorption
    pub fn absorption_peak(&self) -> Option<(f64, f64)> {
        self.absorption
            .iter()
            .position_max_by(|a, b| a.total_cmp(b))
            .map(|index| (self.frequencies[index], self.absorption[index]))
    }
}

/// Compose the Dyson equation for `unperturbed` and `perturbation` into a single matrix function
///
/// Right division by `I - G0 Hp` uses `singularity_threshold`. The operands are borrowed, so the returned expression
/// cannot outlive them.
pub fn dyson_greens_function<'a, G, P>(
    unperturbed: &'a G,
    perturbation: &'a P,
    singularity_threshold: f64,
) -> Result<impl MatrixFunction + Sync + 'a, GreensFunctionError>
where
    G: MatrixFunction + Sync,
    P: MatrixFunction + Sync,
{
    let identity = Identity::new(unperturbed.dimension())?;
    let scattering = perturbation.rdiv_with_threshold(
        identity.minus(unperturbed.matmul(perturbation)?)?,
        singularity_threshold,
    )?;
    unperturbed.plus(unperturbed.matmul(scattering)?.matmul(unperturbed)?)
}

/// Evaluate `greens_function` at every frequency of `scan`
///
/// The scan stops at the first failure. When `parallel` is set the frequencies are shared across the rayon thread pool,
/// in which case the reported failure is not necessarily the earliest in the scan.
pub fn evaluate_scan<M>(
    greens_function: &M,
    scan: &FrequencyScan,
    parallel: bool,
) -> Result<Vec<DMatrix<Complex<f64>>>, GreensFunctionError>
where
    M: MatrixFunction + Sync,
{
    let dimension = greens_function.dimension();
    let mut matrices = vec![DMatrix::zeros(dimension, dimension); scan.num_points()];

    let evaluate_into = |(index, matrix): (usize, &mut DMatrix<Complex<f64>>)| {
        let frequency = scan.frequency_at(index);
        *matrix = greens_function.evaluate(frequency).map_err(|e| {
            tracing::error!("Failed to evaluate the Green's function at {frequency}: {e}");
            e
        })?;
        Ok::<(), GreensFunctionError>(())
    };

    if parallel {
        matrices.par_iter_mut().enumerate().try_for_each(evaluate_into)?;
    } else {
        matrices.iter_mut().enumerate().try_for_each(evaluate_into)?;
    }
    Ok(matrices)
}

/// Compute the absorption and density of states of the charge transfer chain
#[tracing::instrument(name = "Spectrum", level = "info", skip_all)]
pub fn compute_spectrum(parameters: &SpectrumParameters) -> Result<Spectrum, GreensFunctionError> {
    let range = validate_range(parameters.range)?;
    let scan = parameters.frequency_scan()?;
    let numerics = &parameters.numerics;

    let unperturbed = TightBindingChain::new(
        parameters.energy + parameters.well_depth + parameters.detuning,
        parameters.bandwidth,
        range,
    )?
    .with_regulariser(numerics.chain_regulariser)?;
    let perturbation = CoulombPotential::new(parameters.detuning, parameters.well_depth, range)?;
    let greens_function =
        dyson_greens_function(&unperturbed, &perturbation, numerics.singularity_threshold)?;

    tracing::info!(
        "Evaluating the Green's function of {} sites at {} frequencies",
        greens_function.dimension(),
        scan.num_points()
    );
    let matrices = evaluate_scan(&greens_function, &scan, numerics.parallel)?;

    let absorption = DensityOfStates::at_site(range).reduce_matrices(&matrices)?;
    let density_of_states = DensityOfStates::total().reduce_matrices(&matrices)?;
    tracing::info!("Spectrum complete");

    Ok(Spectrum {
        frequencies: scan.points().clone(),
        absorption,
        density_of_states,
    })
}
