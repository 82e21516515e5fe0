//! Core contract, shared value types, and the library-wide error type.
//!
//! Every function variant implements [`DomainFunction`]: a complex-valued function defined on a
//! bounded real domain whose direction is fixed by `(domain_start, domain_end)`. The contract
//! carries the frequency-support queries the Fourier engine consults and the sampling helpers
//! renderers consume.

use std::sync::Arc;

use num_complex::Complex64;

use crate::engines::fourier::RotorState;
use crate::frequency::FrequencyProvider;

pub mod types;

pub use types::*;

/// Relative tolerance used when matching a frequency against an explicit frequency list.
pub const FREQUENCY_MATCH_EPS: f64 = 1e-12;

/// Errors surfaced by constructors and checked entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FourierError {
    /// A construction precondition was violated.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// An internal entry point was called with arguments its caller should have normalized.
    #[error("precondition violated: {0}")]
    Precondition(String),
    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Returns `true` when `a` and `b` denote the same frequency.
#[inline]
pub fn same_frequency(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= FREQUENCY_MATCH_EPS * (1.0 + a.abs().max(b.abs()))
}

/// Returns `true` when `x` lies between `start` and `end` inclusive, in either direction.
#[inline]
pub fn within_bounds(x: f64, start: f64, end: f64) -> bool {
    if start <= end {
        start <= x && x <= end
    } else {
        end <= x && x <= start
    }
}

/// Evenly spaced points from `start` to `end` inclusive.
pub fn sample_points(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + i as f64 * step
                    }
                })
                .collect()
        }
    }
}

/// A complex-valued function on a bounded, possibly reversed, real domain.
pub trait DomainFunction: Send + Sync {
    fn domain_start(&self) -> f64;

    fn domain_end(&self) -> f64;

    /// Evaluates the function. Total: variants clamp or wrap instead of failing.
    fn compute(&self, x: f64) -> Complex64;

    /// `domain_end - domain_start`; negative for reversed domains.
    fn domain_range(&self) -> f64 {
        self.domain_end() - self.domain_start()
    }

    fn is_within_domain(&self, x: f64) -> bool {
        within_bounds(x, self.domain_start(), self.domain_end())
    }

    /// Frequencies this function is known to consist of, if it has such a list.
    fn explicit_frequencies(&self) -> Option<Vec<f64>> {
        None
    }

    /// Whether frequencies outside [`DomainFunction::explicit_frequencies`] may be non-zero.
    fn frequencies_except_explicit_supported(&self) -> bool {
        true
    }

    /// Unsupported frequencies have a zero transform by definition.
    fn is_frequency_supported(&self, frequency: f64) -> bool {
        if self.frequencies_except_explicit_supported() {
            return true;
        }
        self.explicit_frequencies()
            .is_some_and(|list| list.iter().any(|f| same_frequency(*f, frequency)))
    }

    /// Interval count this function wants for quadrature, overriding the engine default.
    fn preferred_interval_count(&self) -> Option<usize> {
        None
    }

    fn default_frequency_provider(&self) -> FrequencyProvider {
        FrequencyProvider::for_declared(
            self.explicit_frequencies(),
            self.frequencies_except_explicit_supported(),
            self.domain_range(),
        )
    }

    fn default_graph_mode(&self) -> GraphMode {
        GraphMode::default()
    }

    fn color(&self) -> Option<Color> {
        None
    }

    fn animation_duration_bounds(&self) -> AnimationBounds {
        AnimationBounds::for_domain_range(self.domain_range())
    }

    fn has_cached_rotor_state(&self, _frequency: f64) -> bool {
        false
    }

    fn cached_rotor_state(&self, _frequency: f64) -> Option<Arc<RotorState>> {
        None
    }

    fn sample_domain(&self, count: usize) -> Vec<f64> {
        sample_points(self.domain_start(), self.domain_end(), count)
    }

    fn sample_range(&self, count: usize) -> Vec<Complex64> {
        self.sample_domain(count)
            .into_iter()
            .map(|x| self.compute(x))
            .collect()
    }

    fn sample_real_range(&self, count: usize, transform: SampleTransform) -> Vec<f64> {
        self.sample_range(count)
            .into_iter()
            .map(|z| transform.apply(z))
            .collect()
    }

    /// `(domain, transform(value))` pairs for plotting against the domain axis.
    fn sample_graph(&self, count: usize, transform: SampleTransform) -> Vec<(f64, f64)> {
        self.sample_domain(count)
            .into_iter()
            .zip(self.sample_real_range(count, transform))
            .collect()
    }

    /// `(re, im)` pairs for plotting in the complex plane.
    fn sample_complex_plane(&self, count: usize) -> Vec<(f64, f64)> {
        self.sample_range(count)
            .into_iter()
            .map(|z| (z.re, z.im))
            .collect()
    }
}
