//! Deferred arithmetic on matrix functions
//!
//! An [`Expression`] holds two operands and one [`Operation`]. Evaluating the expression evaluates both operands at the
//! same frequency and combines the resulting matrices. Addition and subtraction are elementwise, multiplication is the
//! matrix product and division multiplies on the right by the inverse of the divisor. There is deliberately no power
//! operation.

use super::MatrixFunction;
use crate::{
    constants::SINGULARITY_THRESHOLD,
    error::GreensFunctionError,
    utilities::matrices::{check_shapes, checked_inverse},
};
use nalgebra::DMatrix;
use num_complex::Complex;

/// The closed set of binary operations on matrix functions
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Operation {
    /// Elementwise sum
    Add,
    /// Elementwise difference
    Sub,
    /// Matrix product
    MatMul,
    /// Right multiplication by the inverse of the second operand
    MatRDiv {
        /// Divisors whose reciprocal condition number falls below this value are treated as singular
        singularity_threshold: f64,
    },
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Sub => "subtract",
            Operation::MatMul => "multiply",
            Operation::MatRDiv { .. } => "right-divide",
        };
        write!(f, "{}", name)
    }
}

/// A binary node in a tree of matrix functions
#[derive(Clone, Debug)]
pub struct Expression<L, R> {
    operation: Operation,
    left: L,
    right: R,
}

impl<L, R> Expression<L, R>
where
    L: MatrixFunction,
    R: MatrixFunction,
{
    /// Combine `left` and `right` under `operation`
    ///
    /// Fails with `ShapeMismatch` if the operands do not share a dimension
    pub fn new(operation: Operation, left: L, right: R) -> Result<Self, GreensFunctionError> {
        let (n_left, n_right) = (left.dimension(), right.dimension());
        if n_left != n_right {
            return Err(GreensFunctionError::ShapeMismatch {
                operation,
                left: (n_left, n_left),
                right: (n_right, n_right),
            });
        }
        tracing::trace!("Composing {} of two {}x{} matrix functions", operation, n_left, n_left);
        Ok(Self {
            operation,
            left,
            right,
        })
    }

    /// The operation applied at this node
    pub fn operation(&self) -> Operation {
        self.operation
    }
}

impl<L, R> MatrixFunction for Expression<L, R>
where
    L: MatrixFunction,
    R: MatrixFunction,
{
    fn dimension(&self) -> usize {
        self.left.dimension()
    }

    fn evaluate(&self, frequency: Complex<f64>) -> Result<DMatrix<Complex<f64>>, GreensFunctionError> {
        let left = self.left.evaluate(frequency)?;
        let right = self.right.evaluate(frequency)?;
        check_shapes(self.operation, &left, &right)?;

        match self.operation {
            Operation::Add => Ok(left + right),
            Operation::Sub => Ok(left - right),
            Operation::MatMul => Ok(left * right),
            Operation::MatRDiv {
                singularity_threshold,
            } => {
                let inverse = checked_inverse(right, singularity_threshold)?;
                Ok(left * inverse)
            }
        }
    }
}

/// Builder methods composing matrix functions into expressions
///
/// Implemented for every `MatrixFunction`. Borrowed operands compose without being consumed:
///
/// ```ignore
/// let t_matrix = (&potential).rdiv((&identity).minus((&chain).matmul(&potential)?)?)?;
/// ```
pub trait Compose: MatrixFunction + Sized {
    /// Elementwise `self + right`
    fn plus<R: MatrixFunction>(self, right: R) -> Result<Expression<Self, R>, GreensFunctionError> {
        Expression::new(Operation::Add, self, right)
    }

    /// Elementwise `self - right`
    fn minus<R: MatrixFunction>(self, right: R) -> Result<Expression<Self, R>, GreensFunctionError> {
        Expression::new(Operation::Sub, self, right)
    }

    /// Matrix product `self * right`
    fn matmul<R: MatrixFunction>(self, right: R) -> Result<Expression<Self, R>, GreensFunctionError> {
        Expression::new(Operation::MatMul, self, right)
    }

    /// Right division `self * right^-1` with the default singularity threshold
    fn rdiv<R: MatrixFunction>(self, right: R) -> Result<Expression<Self, R>, GreensFunctionError> {
        self.rdiv_with_threshold(right, SINGULARITY_THRESHOLD)
    }

    /// Right division `self * right^-1`, rejecting divisors with reciprocal condition number below `threshold`
    fn rdiv_with_threshold<R: MatrixFunction>(
        self,
        right: R,
        threshold: f64,
    ) -> Result<Expression<Self, R>, GreensFunctionError> {
        if !(threshold.is_finite() && threshold >= 0.) {
            return Err(GreensFunctionError::invalid_parameter(format!(
                "the singularity threshold must be a finite non-negative float, got {threshold}"
            )));
        }
        Expression::new(
            Operation::MatRDiv {
                singularity_threshold: threshold,
            },
            self,
            right,
        )
    }
}

impl<M: MatrixFunction> Compose for M {}

#[cfg(test)]
mod test {
    use super::{Compose, Operation};
    use crate::error::GreensFunctionError;
    use crate::greens_functions::{Constant, Identity, MatrixFunction, TightBindingChain};
    use crate::utilities::matrices::assert_matrices_close;
    use nalgebra::DMatrix;
    use num_complex::Complex;
    use proptest::prelude::*;

    /// Claims one dimension but produces matrices of another
    struct Misreported;

    impl MatrixFunction for Misreported {
        fn dimension(&self) -> usize {
            2
        }

        fn evaluate(
            &self,
            _frequency: Complex<f64>,
        ) -> Result<DMatrix<Complex<f64>>, GreensFunctionError> {
            Ok(DMatrix::identity(3, 3))
        }
    }

    fn complex_matrix(n: usize, values: &[(f64, f64)]) -> DMatrix<Complex<f64>> {
        DMatrix::from_iterator(n, n, values.iter().map(|&(re, im)| Complex::new(re, im)))
    }

    fn square_matrix() -> impl Strategy<Value = DMatrix<Complex<f64>>> {
        (1_usize..6).prop_flat_map(|n| {
            proptest::collection::vec((-10_f64..10., -10_f64..10.), n * n)
                .prop_map(move |values| complex_matrix(n, &values))
        })
    }

    proptest! {
        #[test]
        fn addition_commutes(
            (left, right) in (1_usize..6).prop_flat_map(|n| (
                proptest::collection::vec((-10_f64..10., -10_f64..10.), n * n),
                proptest::collection::vec((-10_f64..10., -10_f64..10.), n * n),
            ).prop_map(move |(a, b)| (complex_matrix(n, &a), complex_matrix(n, &b)))),
            re in -5_f64..5.,
            im in 0.01_f64..1.,
        ) {
            let left = Constant::new(left).unwrap();
            let right = Constant::new(right).unwrap();
            let frequency = Complex::new(re, im);
            let forward = (&left).plus(&right).unwrap().evaluate(frequency).unwrap();
            let backward = (&right).plus(&left).unwrap().evaluate(frequency).unwrap();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn dividing_by_the_identity_is_a_no_op(matrix in square_matrix()) {
            let n = matrix.nrows();
            let numerator = Constant::new(matrix.clone()).unwrap();
            let quotient = numerator.rdiv(Identity::new(n).unwrap()).unwrap();
            let result = quotient.evaluate(Complex::new(0.3, 0.1)).unwrap();
            assert_matrices_close(&result, &matrix, 1e-12);
        }
    }

    #[test]
    fn subtraction_is_elementwise() {
        let left = Constant::new(complex_matrix(2, &[(1., 1.), (2., 0.), (3., -1.), (4., 2.)])).unwrap();
        let right = Identity::new(2).unwrap();
        let difference = left.minus(right).unwrap();
        let result = difference.evaluate(Complex::new(0., 0.)).unwrap();
        let expected = complex_matrix(2, &[(0., 1.), (2., 0.), (3., -1.), (3., 2.)]);
        assert_eq!(result, expected);
    }

    #[test]
    fn multiplication_is_the_matrix_product() {
        let left_matrix = complex_matrix(2, &[(1., 0.), (0., 1.), (2., 0.), (1., 1.)]);
        let right_matrix = complex_matrix(2, &[(0., 2.), (1., 0.), (3., 0.), (0., -1.)]);
        let product = Constant::new(left_matrix.clone())
            .unwrap()
            .matmul(Constant::new(right_matrix.clone()).unwrap())
            .unwrap();
        let result = product.evaluate(Complex::new(1., 0.)).unwrap();
        assert_matrices_close(&result, &(&left_matrix * &right_matrix), 1e-14);
        assert_ne!(result, left_matrix.component_mul(&right_matrix));
    }

    #[test]
    fn division_multiplies_by_the_inverse_on_the_right() {
        let numerator = complex_matrix(2, &[(1., 0.), (2., 0.), (0., 1.), (1., 0.)]);
        let divisor = complex_matrix(2, &[(2., 0.), (0., 0.), (1., 0.), (1., 1.)]);
        let quotient = Constant::new(numerator.clone())
            .unwrap()
            .rdiv(Constant::new(divisor.clone()).unwrap())
            .unwrap();
        let result = quotient.evaluate(Complex::new(0., 0.1)).unwrap();
        assert_matrices_close(&(result * divisor), &numerator, 1e-12);
    }

    #[test]
    fn dividing_by_a_singular_matrix_fails() {
        let divisor = complex_matrix(2, &[(1., 0.), (2., 0.), (2., 0.), (4., 0.)]);
        let quotient = Identity::new(2)
            .unwrap()
            .rdiv(Constant::new(divisor).unwrap())
            .unwrap();
        assert!(matches!(
            quotient.evaluate(Complex::new(0., 0.1)),
            Err(GreensFunctionError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn operands_of_different_dimension_cannot_be_composed() {
        let result = Identity::new(3).unwrap().plus(Identity::new(5).unwrap());
        assert!(matches!(
            result,
            Err(GreensFunctionError::ShapeMismatch {
                operation: Operation::Add,
                left: (3, 3),
                right: (5, 5)
            })
        ));
    }

    #[test]
    fn misreported_shapes_are_caught_on_evaluation() {
        let product = Identity::new(2).unwrap().matmul(Misreported).unwrap();
        assert!(matches!(
            product.evaluate(Complex::new(0., 0.)),
            Err(GreensFunctionError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn negative_thresholds_are_rejected() {
        let result = Identity::new(2)
            .unwrap()
            .rdiv_with_threshold(Identity::new(2).unwrap(), -1.);
        assert!(matches!(result, Err(GreensFunctionError::InvalidParameter(_))));
    }

    #[test]
    fn borrowed_operands_are_re_evaluated_at_each_frequency() {
        let chain = TightBindingChain::new(0., 2., 2).unwrap();
        let identity = Identity::new(5).unwrap();
        let sum = (&chain).plus(&identity).unwrap();

        for frequency in [Complex::new(0.5, 0.1), Complex::new(-3., 0.1), Complex::new(0.5, 0.1)] {
            let expected = chain.evaluate(frequency).unwrap() + identity.evaluate(frequency).unwrap();
            assert_matrices_close(&sum.evaluate(frequency).unwrap(), &expected, 1e-14);
        }
    }
}
