//! This module provides the discrete frequency scan over which Green's functions are evaluated
//!
//! A scan is a uniform grid of real frequencies, inclusive of both end points, together with a broadening. Green's
//! functions are retarded, so each point is shifted into the upper half plane and evaluated at `w + i * broadening`.

use crate::{constants::DEFAULT_BROADENING, error::GreensFunctionError, greens_functions::validate_finite};
use ndarray::Array1;
use num_complex::Complex;
use std::ops::Range;

/// Builder for a `FrequencyScan`
pub struct FrequencyScanBuilder<FrequencyRange> {
    number_of_points: usize,
    frequency_range: FrequencyRange,
    broadening: f64,
}

impl FrequencyScanBuilder<()> {
    /// Initialise an empty builder
    pub fn new() -> Self {
        Self {
            number_of_points: 0,
            frequency_range: (),
            broadening: DEFAULT_BROADENING,
        }
    }
}

impl Default for FrequencyScanBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<FrequencyRange> FrequencyScanBuilder<FrequencyRange> {
    /// Set the number of points, which must be at least one
    pub fn with_number_of_points(self, number_of_points: usize) -> Self {
        Self {
            number_of_points,
            ..self
        }
    }

    /// Set the broadening, which must be positive
    pub fn with_broadening(self, broadening: f64) -> Self {
        Self { broadening, ..self }
    }

    /// Set the first and last frequency of the scan
    pub fn with_frequency_range(
        self,
        frequency_range: Range<f64>,
    ) -> FrequencyScanBuilder<Range<f64>> {
        FrequencyScanBuilder {
            number_of_points: self.number_of_points,
            frequency_range,
            broadening: self.broadening,
        }
    }
}

impl FrequencyScanBuilder<Range<f64>> {
    /// Validate the settings and generate the grid
    pub fn build(self) -> Result<FrequencyScan, GreensFunctionError> {
        let start = validate_finite("minimum frequency", self.frequency_range.start)?;
        let end = validate_finite("maximum frequency", self.frequency_range.end)?;
        let broadening = validate_finite("broadening", self.broadening)?;
        if start >= end {
            return Err(GreensFunctionError::invalid_parameter(format!(
                "the frequency range must be ordered, got {start}..{end}"
            )));
        }
        if self.number_of_points == 0 {
            return Err(GreensFunctionError::invalid_parameter(
                "a frequency scan needs at least one point",
            ));
        }
        if broadening <= 0. {
            return Err(GreensFunctionError::invalid_parameter(format!(
                "the broadening must be positive, got {broadening}"
            )));
        }

        // A single point scan sits at the start of the range
        let points = if self.number_of_points == 1 {
            Array1::from_elem(1, start)
        } else {
            Array1::linspace(start, end, self.number_of_points)
        };
        Ok(FrequencyScan { points, broadening })
    }
}

/// A uniform grid of real frequencies and the broadening applied to each
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyScan {
    points: Array1<f64>,
    broadening: f64,
}

impl FrequencyScan {
    /// The number of frequencies in the scan
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The real frequencies
    pub fn points(&self) -> &Array1<f64> {
        &self.points
    }

    /// The imaginary shift applied to every frequency
    pub fn broadening(&self) -> f64 {
        self.broadening
    }

    /// The broadened frequency at `index`
    pub fn frequency_at(&self, index: usize) -> Complex<f64> {
        Complex::new(self.points[index], self.broadening)
    }

    /// Iterate over the broadened frequencies, in order
    pub fn iter_frequencies(&self) -> impl Iterator<Item = Complex<f64>> + '_ {
        self.points
            .iter()
            .map(move |&point| Complex::new(point, self.broadening))
    }
}
