// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Defines the numerical defaults used in the calculation

pub const CHAIN_REGULARISER: f64 = 1e-9; // Imaginary shift added inside the chain Green's function
pub const DEFAULT_BROADENING: f64 = 0.1; // Linewidth added to each scanned frequency
pub const SINGULARITY_THRESHOLD: f64 = 1e-12; // Smallest reciprocal condition number accepted for inversion
