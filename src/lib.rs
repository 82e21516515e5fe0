//! OpenRotor is a Fourier-analysis library for complex-valued functions on bounded real domains,
//! built around rotor decompositions: every function can be expanded into a set of rotating
//! phasors whose tips sum back to the function.
//!
//! The crate combines a common function contract ([`core::DomainFunction`]), frequency
//! providers that choose which rotors to compute, a quadrature Fourier engine, an
//! arbitrary-frequency radix-2 spectral evaluator for sampled data, and combinators that merge or
//! decorate functions.
//!
//! Conventions:
//! - The series kernel rotates counter-clockwise (`c * exp(+2πi f t)`) and the analysis kernel
//!   clockwise. The pairing is fixed at compile time; see [`core::SERIES_DIRECTION`].
//! - Series coefficients are transforms divided by the domain range, so a unit sine at frequency
//!   `f` has coefficients of magnitude 0.5 at `±f`. Sampled data of `N` points is analysed over
//!   `N` steps, the span its samples tile, so its coefficients are plain DFT coefficients.
//! - Reversed domains (`domain_end < domain_start`) are legal and carry a negative range.
//!
//! Numerical considerations:
//! - Quadrature uses composite Simpson rules; accuracy follows the interval count, which can be
//!   set per call, per function, or in [`engines::fourier::FourierConfig`].
//! - Discrete functions analysed over their own domain use the spectral evaluator, which is exact
//!   up to rounding and does not depend on the interval count.
//!
//! # Feature Flags
//! - `parallel`: enables Rayon-powered loading of rotor states.
//!
//! # Quick Start
//! Extract the rotors of a sine wave:
//! ```rust
//! use openrotor::core::DomainFunction;
//! use openrotor::engines::fourier::FourierEngine;
//! use openrotor::functions::SignalFunction;
//!
//! let sine = SignalFunction::sine(2.0, 1.0, 0.0, 1.0);
//! let engine = FourierEngine::default();
//! let rotor = engine.rotor_state(&sine, 2.0);
//! assert!((rotor.magnitude() - 0.5).abs() < 1.0e-6);
//! assert!(engine.rotor_state(&sine, 5.0).magnitude() < 1.0e-6);
//! assert_eq!(sine.domain_range(), 1.0);
//! ```
//!
//! Reconstruct a function from a finite rotor set:
//! ```rust
//! use openrotor::core::DomainFunction;
//! use openrotor::engines::fourier::FourierEngine;
//! use openrotor::functions::{FunctionNode, RotorStatesFunction, SignalFunction};
//!
//! let source = FunctionNode::from(SignalFunction::sine(1.0, 1.0, 0.0, 1.0)).into_shared();
//! let rotors = RotorStatesFunction::from_source(source.clone(), 5, FourierEngine::default());
//! let err = (rotors.compute(0.3) - source.compute(0.3)).norm();
//! assert!(err < 1.0e-6);
//! ```
//!
//! Evaluate one fractional bin of sampled data:
//! ```rust
//! use num_complex::Complex64;
//! use openrotor::engines::fourier::evaluate_single_frequency;
//!
//! let samples = vec![Complex64::new(1.0, 0.0); 8];
//! let dc = evaluate_single_frequency(&samples, 0.0);
//! assert_eq!(dc, Complex64::new(8.0, 0.0));
//! ```
//!
//! Load engine settings from JSON:
//! ```rust
//! use openrotor::engines::fourier::{FourierConfig, FourierEngine};
//!
//! let config = FourierConfig::from_json(r#"{"default_interval_count": 400}"#).unwrap();
//! let engine = FourierEngine::new(config).unwrap();
//! assert_eq!(engine.config().default_interval_count, 400);
//! ```

pub mod core;
pub mod engines;
pub mod frequency;
pub mod functions;
pub mod math;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::engines::fourier::{
        FourierConfig, FourierEngine, RotorState, RotorStateCache, SpectralEvaluator,
        evaluate_single_frequency, fs_coefficient_to_transform, ft_to_fs_coefficient,
        full_spectrum,
    };
    pub use crate::frequency::*;
    pub use crate::functions::*;
    pub use crate::math::QuadratureRule;
}
