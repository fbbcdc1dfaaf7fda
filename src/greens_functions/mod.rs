// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Green's Functions
//!
//! A Green's function is represented lazily as a [`MatrixFunction`], an object which produces a dense complex matrix
//! when evaluated at a complex frequency. Leaf functions have closed forms, the chain Green's function
//! [`TightBindingChain`], the [`Identity`] and a [`Constant`] matrix. Leaves are combined with the methods of [`Compose`]
//! into an [`Expression`] tree:
//!
//! ```ignore
//! let chain = TightBindingChain::new(0.0, 2.0, 3)?;
//! let identity = Identity::new(7)?;
//! let resolvent = (&identity).minus(&chain)?;
//! let matrix = resolvent.evaluate(Complex::new(0.5, 0.1))?;
//! ```
//!
//! Nothing is cached: every call to `evaluate` regenerates the matrices of all the nodes in the tree, so an expression
//! may be evaluated at any frequency in any order.

mod chain;
mod constant;
mod expression;

pub use chain::TightBindingChain;
pub use constant::{Constant, Identity};
pub use expression::{Compose, Expression, Operation};

use crate::error::GreensFunctionError;
use nalgebra::DMatrix;
use num_complex::Complex;

/// A function of complex frequency returning a square complex matrix
pub trait MatrixFunction {
    /// The number of rows, and columns, of every matrix returned by `evaluate`
    fn dimension(&self) -> usize;
    /// Evaluate the function at `frequency`, producing a freshly allocated matrix
    fn evaluate(&self, frequency: Complex<f64>) -> Result<DMatrix<Complex<f64>>, GreensFunctionError>;
}

impl<M: MatrixFunction + ?Sized> MatrixFunction for &M {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn evaluate(&self, frequency: Complex<f64>) -> Result<DMatrix<Complex<f64>>, GreensFunctionError> {
        (**self).evaluate(frequency)
    }
}

impl<M: MatrixFunction + ?Sized> MatrixFunction for Box<M> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn evaluate(&self, frequency: Complex<f64>) -> Result<DMatrix<Complex<f64>>, GreensFunctionError> {
        (**self).evaluate(frequency)
    }
}

/// Checks a truncation distance, returning it as a `usize`
///
/// A chain truncated at distance `range` from the central site has `2 * range + 1` sites.
pub fn validate_range(range: i64) -> Result<usize, GreensFunctionError> {
    usize::try_from(range).map_err(|_| {
        GreensFunctionError::invalid_parameter(format!(
            "the range must be a non-negative integer, got {range}"
        ))
    })
}

/// Fails with `InvalidParameter` unless `value` is a finite float
pub(crate) fn validate_finite(name: &str, value: f64) -> Result<f64, GreensFunctionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GreensFunctionError::invalid_parameter(format!(
            "{name} must be a finite float, got {value}"
        )))
    }
}

/// Number of sites in a chain truncated at `range`
pub(crate) fn sites_in_range(range: usize) -> usize {
    2 * range + 1
}
