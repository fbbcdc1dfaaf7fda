//! Frequency independent matrix functions

use super::MatrixFunction;
use crate::error::GreensFunctionError;
use nalgebra::DMatrix;
use num_complex::Complex;

/// The `dimension x dimension` identity at every frequency
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    dimension: usize,
}

impl Identity {
    /// Create an identity function of size `dimension`
    pub fn new(dimension: usize) -> Result<Self, GreensFunctionError> {
        if dimension == 0 {
            return Err(GreensFunctionError::invalid_parameter(
                "the identity must have at least one row",
            ));
        }
        Ok(Self { dimension })
    }
}

impl MatrixFunction for Identity {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn evaluate(&self, _frequency: Complex<f64>) -> Result<DMatrix<Complex<f64>>, GreensFunctionError> {
        Ok(DMatrix::identity(self.dimension, self.dimension))
    }
}

/// A fixed matrix, returned unchanged at every frequency
#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    matrix: DMatrix<Complex<f64>>,
}

impl Constant {
    /// Wrap a square, non-empty `matrix`
    pub fn new(matrix: DMatrix<Complex<f64>>) -> Result<Self, GreensFunctionError> {
        if !matrix.is_square() || matrix.is_empty() {
            let (rows, columns) = matrix.shape();
            return Err(GreensFunctionError::invalid_parameter(format!(
                "a constant matrix function must be square and non-empty, got {rows}x{columns}"
            )));
        }
        Ok(Self { matrix })
    }

    /// `value` times the `dimension x dimension` identity
    pub fn scaled_identity(value: Complex<f64>, dimension: usize) -> Result<Self, GreensFunctionError> {
        Self::new(DMatrix::identity(dimension, dimension) * value)
    }
}

impl MatrixFunction for Constant {
    fn dimension(&self) -> usize {
        self.matrix.nrows()
    }

    fn evaluate(&self, _frequency: Complex<f64>) -> Result<DMatrix<Complex<f64>>, GreensFunctionError> {
        Ok(self.matrix.clone())
    }
}

#[cfg(test)]
mod test {
    use super::{Constant, Identity};
    use crate::error::GreensFunctionError;
    use crate::greens_functions::MatrixFunction;
    use nalgebra::DMatrix;
    use num_complex::Complex;
    use rand::Rng;

    #[test]
    fn identity_is_independent_of_frequency() {
        let mut rng = rand::thread_rng();
        let identity = Identity::new(7).unwrap();
        let expected = DMatrix::<Complex<f64>>::identity(7, 7);
        for _ in 0..10 {
            let frequency = Complex::new(rng.gen_range(-20_f64..20.), rng.gen_range(-1_f64..1.));
            assert_eq!(identity.evaluate(frequency).unwrap(), expected);
        }
    }

    #[test]
    fn empty_functions_are_rejected() {
        assert!(matches!(
            Identity::new(0),
            Err(GreensFunctionError::InvalidParameter(_))
        ));
        assert!(matches!(
            Constant::new(DMatrix::zeros(0, 0)),
            Err(GreensFunctionError::InvalidParameter(_))
        ));
    }

    #[test]
    fn rectangular_constants_are_rejected() {
        assert!(matches!(
            Constant::new(DMatrix::zeros(2, 3)),
            Err(GreensFunctionError::InvalidParameter(_))
        ));
    }

    #[test]
    fn scaled_identity_has_the_value_on_the_diagonal() {
        let value = Complex::new(1.5, -0.25);
        let constant = Constant::scaled_identity(value, 3).unwrap();
        let matrix = constant.evaluate(Complex::new(0., 0.)).unwrap();
        assert_eq!(constant.dimension(), 3);
        for n in 0..3 {
            for m in 0..3 {
                let expected = if n == m { value } else { Complex::new(0., 0.) };
                assert_eq!(matrix[(n, m)], expected);
            }
        }
    }
}
