use crate::{error::GreensFunctionError, greens_functions::Operation};
use nalgebra::DMatrix;
use num_complex::Complex;

#[cfg(test)]
/// Tests for symmetry of a matrix, `matrix[(n, m)] == matrix[(m, n)]` to within `tolerance`
pub(crate) fn is_symmetric(matrix: &DMatrix<Complex<f64>>, tolerance: f64) -> bool {
    matrix.is_square()
        && matrix
            .iter()
            .zip(matrix.transpose().iter())
            .all(|(element, transpose_element)| (element - transpose_element).norm() <= tolerance)
}

/// The ratio of the smallest to the largest singular value of `matrix`
///
/// This is the reciprocal of the condition number in the 2-norm. It is `NaN` for the zero matrix.
pub(crate) fn reciprocal_condition_number(matrix: &DMatrix<Complex<f64>>) -> f64 {
    let singular_values = matrix.singular_values();
    singular_values.min() / singular_values.max()
}

/// Inverts `matrix`, failing if its reciprocal condition number is below `threshold`
pub(crate) fn checked_inverse(
    matrix: DMatrix<Complex<f64>>,
    threshold: f64,
) -> Result<DMatrix<Complex<f64>>, GreensFunctionError> {
    // The SVD does not terminate on non-finite input
    if !matrix
        .iter()
        .all(|value| value.re.is_finite() && value.im.is_finite())
    {
        return Err(GreensFunctionError::SingularMatrix {
            reciprocal_condition: f64::NAN,
            threshold,
        });
    }
    let reciprocal_condition = reciprocal_condition_number(&matrix);
    // NaN compares false, so the zero matrix lands here too
    if !(reciprocal_condition >= threshold) {
        return Err(GreensFunctionError::SingularMatrix {
            reciprocal_condition,
            threshold,
        });
    }
    matrix
        .try_inverse()
        .ok_or(GreensFunctionError::SingularMatrix {
            reciprocal_condition,
            threshold,
        })
}

/// Checks the evaluated operands of `operation` can be combined
pub(crate) fn check_shapes(
    operation: Operation,
    left: &DMatrix<Complex<f64>>,
    right: &DMatrix<Complex<f64>>,
) -> Result<(), GreensFunctionError> {
    let compatible = match operation {
        Operation::Add | Operation::Sub => left.shape() == right.shape(),
        Operation::MatMul => left.ncols() == right.nrows(),
        Operation::MatRDiv { .. } => right.is_square() && left.ncols() == right.nrows(),
    };
    if compatible {
        Ok(())
    } else {
        Err(GreensFunctionError::ShapeMismatch {
            operation,
            left: left.shape(),
            right: right.shape(),
        })
    }
}

/// Asserts two matrices agree elementwise, comparing real and imaginary parts separately
#[cfg(test)]
pub(crate) fn assert_matrices_close(
    left: &DMatrix<Complex<f64>>,
    right: &DMatrix<Complex<f64>>,
    epsilon: f64,
) {
    assert_eq!(left.shape(), right.shape());
    for (left, right) in left.iter().zip(right.iter()) {
        approx::assert_relative_eq!(left.re, right.re, epsilon = epsilon);
        approx::assert_relative_eq!(left.im, right.im, epsilon = epsilon);
    }
}
