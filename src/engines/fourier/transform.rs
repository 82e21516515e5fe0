use std::f64::consts::TAU;

use num_complex::Complex64;
use num_traits::Zero;

use crate::core::{DomainFunction, FourierError, TRANSFORM_DIRECTION};
use crate::functions::{DiscreteFunction, FunctionNode};
use crate::math::quadrature::QuadratureRule;

use super::rotor::RotorState;
use super::spectral::SpectralEvaluator;

/// Interval count used when neither the caller nor the function asks for one.
pub const DEFAULT_INTERVAL_COUNT: usize = 100;
/// Lower bound accepted for [`FourierConfig::default_interval_count`].
pub const MIN_INTERVAL_COUNT: usize = 2;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FourierConfig {
    /// Quadrature intervals when no other count applies.
    pub default_interval_count: usize,
    /// Quadrature rule for continuous integrands.
    pub rule: QuadratureRule,
    /// Route discrete functions over their own domain through the spectral evaluator.
    pub spectral_discrete: bool,
}

impl Default for FourierConfig {
    fn default() -> Self {
        Self {
            default_interval_count: DEFAULT_INTERVAL_COUNT,
            rule: QuadratureRule::Simpson13,
            spectral_discrete: true,
        }
    }
}

impl FourierConfig {
    pub fn with_default_interval_count(mut self, n: usize) -> Self {
        self.default_interval_count = n;
        self
    }

    pub fn with_rule(mut self, rule: QuadratureRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_spectral_discrete(mut self, enabled: bool) -> Self {
        self.spectral_discrete = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), FourierError> {
        if self.default_interval_count < MIN_INTERVAL_COUNT {
            return Err(FourierError::InvalidInput(format!(
                "default interval count must be >= {MIN_INTERVAL_COUNT}, got {}",
                self.default_interval_count
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, FourierError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| FourierError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Converts a Fourier-transform value into a Fourier-series coefficient.
///
/// A zero range has no series; the coefficient is zero.
#[inline]
pub fn ft_to_fs_coefficient(transform: Complex64, domain_range: f64) -> Complex64 {
    if domain_range == 0.0 {
        Complex64::zero()
    } else {
        transform / domain_range
    }
}

/// Inverse of [`ft_to_fs_coefficient`] for non-zero ranges.
#[inline]
pub fn fs_coefficient_to_transform(coefficient: Complex64, domain_range: f64) -> Complex64 {
    coefficient * domain_range
}

/// Computes Fourier transforms, series coefficients and rotor states of domain functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FourierEngine {
    config: FourierConfig,
}

impl FourierEngine {
    pub fn new(config: FourierConfig) -> Result<Self, FourierError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &FourierConfig {
        &self.config
    }

    /// Interval count for integrating `f`: explicit request, then the function's preference,
    /// then the configured default, never below the rule's minimum.
    pub fn interval_count<F>(&self, f: &F, n: Option<usize>) -> usize
    where
        F: DomainFunction + ?Sized,
    {
        let requested = n
            .filter(|n| *n > 0)
            .or_else(|| f.preferred_interval_count().filter(|n| *n > 0))
            .unwrap_or(self.config.default_interval_count);
        requested.max(MIN_INTERVAL_COUNT)
    }

    /// `∫_a^b exp(dir * 2πi * frequency * t) * f(t) dt` by quadrature.
    ///
    /// Frequencies the function does not support transform to zero.
    pub fn fourier_transform<F>(
        &self,
        f: &F,
        frequency: f64,
        a: f64,
        b: f64,
        n: Option<usize>,
    ) -> Complex64
    where
        F: DomainFunction + ?Sized,
    {
        if !f.is_frequency_supported(frequency) {
            log::trace!("frequency {frequency} unsupported; transform is zero");
            return Complex64::zero();
        }
        if a == b {
            return Complex64::zero();
        }

        let intervals = self.interval_count(f, n);
        log::trace!(
            "quadrature transform at {frequency} over [{a}, {b}] with {intervals} intervals ({:?})",
            self.config.rule
        );

        let rate = TRANSFORM_DIRECTION.sign() * TAU * frequency;
        let kernel = |t: f64| Complex64::cis(rate * t) * f.compute(t);
        self.config.rule.integrate(kernel, a, b, intervals)
    }

    /// Fourier-series coefficient over `[a, b]`: the transform divided by `b - a`.
    pub fn fourier_series_coefficient<F>(
        &self,
        f: &F,
        frequency: f64,
        a: f64,
        b: f64,
        n: Option<usize>,
    ) -> Complex64
    where
        F: DomainFunction + ?Sized,
    {
        ft_to_fs_coefficient(self.fourier_transform(f, frequency, a, b, n), b - a)
    }

    /// Series rotor for `frequency` over the function's own domain.
    pub fn rotor_state<F>(&self, f: &F, frequency: f64) -> RotorState
    where
        F: DomainFunction + ?Sized,
    {
        let coefficient = self.fourier_series_coefficient(
            f,
            frequency,
            f.domain_start(),
            f.domain_end(),
            None,
        );
        RotorState::new(frequency, coefficient)
    }

    /// Transform of a node over its own series period, choosing the method by variant.
    ///
    /// Discrete bases are analysed over `[start, start + N * step]` on both paths, so their
    /// default rotor frequencies fall on DFT bins; every other node over its domain.
    pub fn transform_node(&self, node: &FunctionNode, frequency: f64, n: Option<usize>) -> Complex64 {
        let Some(discrete) = node.as_discrete() else {
            return self.fourier_transform(node, frequency, node.domain_start(), node.domain_end(), n);
        };

        if !node.is_frequency_supported(frequency) {
            return Complex64::zero();
        }
        if self.config.spectral_discrete {
            return self.discrete_transform(discrete, frequency);
        }
        let start = discrete.domain_start();
        self.fourier_transform(node, frequency, start, start + discrete.period(), n)
    }

    /// Series coefficient over the node's [`FunctionNode::series_period`].
    pub fn series_coefficient_node(
        &self,
        node: &FunctionNode,
        frequency: f64,
        n: Option<usize>,
    ) -> Complex64 {
        ft_to_fs_coefficient(self.transform_node(node, frequency, n), node.series_period())
    }

    pub fn rotor_state_node(&self, node: &FunctionNode, frequency: f64) -> RotorState {
        RotorState::new(frequency, self.series_coefficient_node(node, frequency, None))
    }

    /// Spectral transform of fixed-step samples over their period `N * step`.
    ///
    /// Sums `step * s_j * exp(dir * 2πi * f * (start + j * step))`, the rectangle rule for the
    /// period integral. The bin index is `k = f * N * step`, so the series coefficient at a
    /// harmonic of the period is the plain DFT coefficient `sum / N`.
    fn discrete_transform(&self, discrete: &DiscreteFunction, frequency: f64) -> Complex64 {
        let period = discrete.period();
        if period == 0.0 {
            return Complex64::zero();
        }

        let samples = discrete.samples();
        let k = frequency * period;
        log::trace!(
            "spectral transform at {frequency} (bin {k}) over {} samples",
            samples.len()
        );

        let evaluator = SpectralEvaluator::new(TRANSFORM_DIRECTION);
        let sum = evaluator.aligned_sum(samples, k);
        let origin = TRANSFORM_DIRECTION.phasor(frequency * discrete.domain_start());
        sum * origin * discrete.domain_step()
    }
}
