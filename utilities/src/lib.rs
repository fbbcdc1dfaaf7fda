use ct_spectrum::SpectrumParameters;
use nalgebra::DMatrix;
use num_complex::Complex;
use rand::{thread_rng, Rng};

/// A square matrix with real and imaginary parts drawn uniformly from `-1..1`
pub fn random_complex_matrix(dimension: usize) -> DMatrix<Complex<f64>> {
    let mut rng = thread_rng();
    DMatrix::from_fn(dimension, dimension, |_, _| {
        Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
    })
}

/// A physically sensible parameter set with randomised energies, truncated at `range`
pub fn random_parameters(range: i64) -> SpectrumParameters {
    let mut rng = thread_rng();
    SpectrumParameters {
        energy: rng.gen_range(-1.0..1.0),
        bandwidth: rng.gen_range(0.5..3.0),
        detuning: rng.gen_range(0.0..1.0),
        well_depth: rng.gen_range(0.5..4.0),
        range,
        ..SpectrumParameters::default()
    }
}
