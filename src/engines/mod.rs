//! Analysis engine implementations.

pub mod fourier;
