//! Computes observables from Green's functions
//!
//! The spectral density of a retarded Green's function is `-Im G / pi`. Evaluated on the diagonal element of a single
//! site it gives the local density of states, which models the absorption of light by a charge transfer state at that
//! site. Evaluated on the trace, and normalised by the number of sites, it gives the total density of states.
//!
//! Every entry point funnels each matrix through [`DensityOfStates::reduce`], so a spectrum is the same whether the
//! Green's function is evaluated lazily or read from precomputed matrices.

use crate::{error::GreensFunctionError, greens_functions::MatrixFunction};
use nalgebra::DMatrix;
use ndarray::{Array1, ArrayView3, Axis};
use num_complex::Complex;

/// Reduction of a Green's function matrix to a single spectral density
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DensityOfStates {
    /// When set the reduction reads only this diagonal element, otherwise the normalised trace
    site: Option<usize>,
}

impl DensityOfStates {
    /// The total density of states, `-Im(Tr G) / (pi N)`
    pub fn total() -> Self {
        Self { site: None }
    }

    /// The local density of states at `site`, `-Im(G[site, site]) / pi`
    pub fn at_site(site: usize) -> Self {
        Self { site: Some(site) }
    }

    /// Reduce one matrix to a spectral density
    pub fn reduce(&self, matrix: &DMatrix<Complex<f64>>) -> Result<f64, GreensFunctionError> {
        if !matrix.is_square() {
            let (rows, columns) = matrix.shape();
            return Err(GreensFunctionError::invalid_parameter(format!(
                "the density of states needs a square matrix, got {rows}x{columns}"
            )));
        }
        let number_of_sites = matrix.nrows();
        match self.site {
            Some(site) if site < number_of_sites => {
                Ok(-matrix[(site, site)].im / std::f64::consts::PI)
            }
            Some(site) => Err(GreensFunctionError::invalid_parameter(format!(
                "site {site} lies outside a chain of {number_of_sites} sites"
            ))),
            None if number_of_sites == 0 => Err(GreensFunctionError::invalid_parameter(
                "the density of states of an empty matrix is undefined",
            )),
            None => Ok(-matrix.trace().im / (std::f64::consts::PI * number_of_sites as f64)),
        }
    }

    /// Evaluate `greens_function` at each frequency in turn and reduce the results
    pub fn scan_matrix_function<M: MatrixFunction>(
        &self,
        greens_function: &M,
        frequencies: &[Complex<f64>],
    ) -> Result<Array1<f64>, GreensFunctionError> {
        frequencies
            .iter()
            .map(|&frequency| self.reduce(&greens_function.evaluate(frequency)?))
            .collect()
    }

    /// Reduce a sequence of precomputed matrices
    pub fn reduce_matrices(
        &self,
        matrices: &[DMatrix<Complex<f64>>],
    ) -> Result<Array1<f64>, GreensFunctionError> {
        matrices.iter().map(|matrix| self.reduce(matrix)).collect()
    }

    /// Reduce a stack of precomputed matrices, indexed by frequency along the first axis
    pub fn reduce_array(
        &self,
        matrices: ArrayView3<Complex<f64>>,
    ) -> Result<Array1<f64>, GreensFunctionError> {
        matrices
            .axis_iter(Axis(0))
            .map(|slice| {
                let (rows, columns) = slice.dim();
                let matrix = DMatrix::from_fn(rows, columns, |row, column| slice[[row, column]]);
                self.reduce(&matrix)
            })
            .collect()
    }
}
