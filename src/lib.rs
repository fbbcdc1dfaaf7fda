// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! ct-spectrum computes the absorption spectrum of a one-dimensional charge transfer system
//!
//! # Overview
//! An electron-hole pair in a one dimensional lattice is modelled as a tight-binding chain, perturbed by the
//! attractive Coulomb potential between the two carriers. The retarded Green's function of the perturbed system is
//! found from the Dyson equation
//!
//! ```text
//! G = G0 + G0 T G0,    T = Hp (I - G0 Hp)^-1
//! ```
//!
//! where `G0` is the closed-form Green's function of the unperturbed chain and `Hp` the Coulomb potential. Rather than
//! evaluating matrices eagerly the crate describes each term as a [`MatrixFunction`](greens_functions::MatrixFunction),
//! a function of complex frequency returning a dense square matrix. Matrix functions are composed into expression trees
//! which are evaluated afresh at every frequency of a scan, and the result is reduced to a density of states.
//!
//! # Usage
//! The binary reads its parameters from a `.toml` file layered over `.config/default.toml`:
//!
//! ```toml
//! [spectrum]
//! energy = 0.0
//! bandwidth = 2.0
//! detuning = 0.5
//! well_depth = 3.0
//! broadening = 0.1
//! range = 15
//! minimum_frequency = -4.0
//! maximum_frequency = 6.0
//! number_of_points = 200
//! ```
//!
//! and writes the absorption and density of states to a `.csv` file in the output directory.

#![warn(missing_docs)]
#![allow(clippy::type_complexity)]

/// The command line application, configuration and tracing
pub mod app;

/// Numerical constants and defaults
mod constants;

/// The Dyson equation and the spectrum assembler
pub mod dyson;

/// Error handling
mod error;

/// Matrix valued functions of frequency and their algebra
pub mod greens_functions;

/// Perturbing potentials
pub mod hamiltonian;

/// Reductions of Green's functions to observable spectra
pub mod postprocessor;

/// Discrete frequency scans
pub mod spectral;

/// Helper functions for dense complex matrices
mod utilities;

pub use dyson::{compute_spectrum, Numerics, Spectrum, SpectrumParameters};
pub use error::GreensFunctionError;
