//! Module `engines::fourier`.
//!
//! Fourier analysis of domain functions: quadrature transforms and series coefficients, rotor
//! states with their concurrent cache, the arbitrary-frequency radix-2 spectral evaluator, and
//! `rustfft`-backed full spectra.
//!
//! Numerical considerations: quadrature accuracy is governed by the interval count (see
//! [`FourierConfig`]); the spectral evaluator is exact up to rounding for any real bin index.

mod fft_core;

pub mod rotor;
pub mod spectral;
pub mod transform;

pub use fft_core::{full_spectrum, inverse_spectrum, spectrum_inplace};
pub use rotor::{RotorState, RotorStateCache, RotorStateRecord};
pub use spectral::{SpectralEvaluator, evaluate_single_frequency, pad_to_power_of_two};
pub use transform::{
    DEFAULT_INTERVAL_COUNT, FourierConfig, FourierEngine, MIN_INTERVAL_COUNT,
    fs_coefficient_to_transform, ft_to_fs_coefficient,
};
