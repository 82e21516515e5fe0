use std::sync::Arc;

use num_complex::Complex64;

use crate::core::{AnimationBounds, Color, DomainFunction, FourierError, GraphMode, SampleTransform};
use crate::engines::fourier::RotorState;
use crate::frequency::FrequencyProvider;

use super::FunctionNode;

/// Pass-through view of another function with optional display overrides.
///
/// Overrides apply only when set; everything else is answered by the wrapped node.
#[derive(Debug, Clone)]
pub struct WrappedFunction {
    inner: Arc<FunctionNode>,
    color: Option<Color>,
    animation_scale: Option<f64>,
}

impl WrappedFunction {
    pub fn new(inner: Arc<FunctionNode>) -> Self {
        Self {
            inner,
            color: None,
            animation_scale: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Scales the wrapped animation-duration bounds by `scale`.
    pub fn with_animation_scale(mut self, scale: f64) -> Result<Self, FourierError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(FourierError::InvalidInput(format!(
                "animation scale must be finite and > 0, got {scale}"
            )));
        }
        self.animation_scale = Some(scale);
        Ok(self)
    }

    #[inline]
    pub fn inner(&self) -> &Arc<FunctionNode> {
        &self.inner
    }
}

impl DomainFunction for WrappedFunction {
    fn domain_start(&self) -> f64 {
        self.inner.domain_start()
    }

    fn domain_end(&self) -> f64 {
        self.inner.domain_end()
    }

    fn compute(&self, x: f64) -> Complex64 {
        self.inner.compute(x)
    }

    fn domain_range(&self) -> f64 {
        self.inner.domain_range()
    }

    fn is_within_domain(&self, x: f64) -> bool {
        self.inner.is_within_domain(x)
    }

    fn explicit_frequencies(&self) -> Option<Vec<f64>> {
        self.inner.explicit_frequencies()
    }

    fn frequencies_except_explicit_supported(&self) -> bool {
        self.inner.frequencies_except_explicit_supported()
    }

    fn is_frequency_supported(&self, frequency: f64) -> bool {
        self.inner.is_frequency_supported(frequency)
    }

    fn preferred_interval_count(&self) -> Option<usize> {
        self.inner.preferred_interval_count()
    }

    fn default_frequency_provider(&self) -> FrequencyProvider {
        self.inner.default_frequency_provider()
    }

    fn default_graph_mode(&self) -> GraphMode {
        self.inner.default_graph_mode()
    }

    fn color(&self) -> Option<Color> {
        self.color.or_else(|| self.inner.color())
    }

    fn animation_duration_bounds(&self) -> AnimationBounds {
        let bounds = self.inner.animation_duration_bounds();
        match self.animation_scale {
            Some(scale) => bounds.scaled(scale),
            None => bounds,
        }
    }

    fn has_cached_rotor_state(&self, frequency: f64) -> bool {
        self.inner.has_cached_rotor_state(frequency)
    }

    fn cached_rotor_state(&self, frequency: f64) -> Option<Arc<RotorState>> {
        self.inner.cached_rotor_state(frequency)
    }

    fn sample_domain(&self, count: usize) -> Vec<f64> {
        self.inner.sample_domain(count)
    }

    fn sample_range(&self, count: usize) -> Vec<Complex64> {
        self.inner.sample_range(count)
    }

    fn sample_real_range(&self, count: usize, transform: SampleTransform) -> Vec<f64> {
        self.inner.sample_real_range(count, transform)
    }
}
