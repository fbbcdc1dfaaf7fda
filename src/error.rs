// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::greens_functions::Operation;
use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised while constructing or evaluating matrix valued functions
pub enum GreensFunctionError {
    /// A physical or numerical parameter is non-numeric or outside its domain
    #[error("Invalid parameter: {0}")]
    #[diagnostic(code(ct_spectrum::invalid_parameter))]
    InvalidParameter(String),
    /// Two operands produce matrices which cannot be combined
    #[error("Cannot {operation} a {}x{} matrix with a {}x{} matrix", left.0, left.1, right.0, right.1)]
    #[diagnostic(code(ct_spectrum::shape_mismatch))]
    ShapeMismatch {
        /// The operation which was attempted
        operation: Operation,
        /// Shape of the left operand
        left: (usize, usize),
        /// Shape of the right operand
        right: (usize, usize),
    },
    /// The divisor of a right division could not be inverted
    #[error("Singular matrix: reciprocal condition number {reciprocal_condition:e} is below {threshold:e}")]
    #[diagnostic(
        code(ct_spectrum::singular_matrix),
        help("the frequency may coincide with a pole, try increasing the broadening")
    )]
    SingularMatrix {
        /// Estimated reciprocal condition number of the divisor
        reciprocal_condition: f64,
        /// The threshold below which matrices are rejected
        threshold: f64,
    },
}

impl GreensFunctionError {
    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}
