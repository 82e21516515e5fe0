//! Numerical building blocks shared by the engines.

pub mod quadrature;

pub use quadrature::{QuadratureRule, simpson_13, simpson_38};
