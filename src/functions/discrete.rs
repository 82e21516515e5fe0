use num_complex::Complex64;

use crate::core::{DomainFunction, FourierError, StickMode};
use crate::frequency::FrequencyProvider;

/// Fixed-step samples reconstructed by a [`StickMode`].
///
/// Sample `j` sits at `domain_start + j * domain_step`. Inputs before the first sample return the
/// first sample and inputs at or past the last sample return the last one; there is no
/// extrapolation.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteFunction {
    domain_start: f64,
    domain_step: f64,
    samples: Vec<Complex64>,
    stick_mode: StickMode,
}

impl DiscreteFunction {
    pub fn new(
        domain_start: f64,
        domain_step: f64,
        samples: Vec<Complex64>,
        stick_mode: StickMode,
    ) -> Result<Self, FourierError> {
        if samples.is_empty() {
            return Err(FourierError::InvalidInput(
                "discrete function needs at least one sample".to_string(),
            ));
        }
        if !domain_step.is_finite() || domain_step < 0.0 {
            return Err(FourierError::InvalidInput(format!(
                "discrete function step must be finite and >= 0, got {domain_step}"
            )));
        }
        if !domain_start.is_finite() {
            return Err(FourierError::InvalidInput(
                "discrete function start must be finite".to_string(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_step,
            samples,
            stick_mode,
        })
    }

    /// Samples `count` evenly spaced points of `f`, starting from the lower domain bound.
    pub fn from_function<F>(f: &F, count: usize, stick_mode: StickMode) -> Result<Self, FourierError>
    where
        F: DomainFunction + ?Sized,
    {
        if count == 0 {
            return Err(FourierError::InvalidInput(
                "sample count must be at least 1".to_string(),
            ));
        }

        let lower = f.domain_start().min(f.domain_end());
        let span = f.domain_range().abs();
        let step = if count == 1 {
            0.0
        } else {
            span / (count - 1) as f64
        };
        let samples = (0..count)
            .map(|j| f.compute(lower + j as f64 * step))
            .collect();

        Self::new(lower, step, samples, stick_mode)
    }

    #[inline]
    pub fn domain_step(&self) -> f64 {
        self.domain_step
    }

    /// Span the samples tile when repeated: `N * step`.
    ///
    /// Series of a discrete function repeat over this period, which is one step longer than the
    /// domain range. Zero for a single sample or a zero step.
    pub fn period(&self) -> f64 {
        if self.samples.len() < 2 {
            return 0.0;
        }
        self.domain_step * self.samples.len() as f64
    }

    #[inline]
    pub fn samples(&self) -> &[Complex64] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; construction rejects empty sample sets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn stick_mode(&self) -> StickMode {
        self.stick_mode
    }

    pub fn with_stick_mode(mut self, stick_mode: StickMode) -> Self {
        self.stick_mode = stick_mode;
        self
    }
}

impl DomainFunction for DiscreteFunction {
    fn domain_start(&self) -> f64 {
        self.domain_start
    }

    fn domain_end(&self) -> f64 {
        self.domain_start + self.domain_step * (self.samples.len() - 1) as f64
    }

    fn compute(&self, x: f64) -> Complex64 {
        if x.is_nan() {
            return Complex64::new(f64::NAN, f64::NAN);
        }

        let last = self.samples.len() - 1;
        if last == 0 || self.domain_step == 0.0 {
            return self.samples[0];
        }

        let position = (x - self.domain_start) / self.domain_step;
        if position <= 0.0 {
            return self.samples[0];
        }
        let index = position.floor();
        if index + 1.0 >= self.samples.len() as f64 {
            return self.samples[last];
        }

        let i = index as usize;
        let frac = position - index;
        match self.stick_mode {
            StickMode::StickNearest => {
                if frac >= 0.5 {
                    self.samples[i + 1]
                } else {
                    self.samples[i]
                }
            }
            StickMode::Interpolate => self.samples[i] + (self.samples[i + 1] - self.samples[i]) * frac,
        }
    }

    /// Harmonics of the sampled period, so default rotors land on DFT bins.
    fn default_frequency_provider(&self) -> FrequencyProvider {
        FrequencyProvider::for_domain_range(self.period())
    }

    fn sample_domain(&self, count: usize) -> Vec<f64> {
        if count == self.samples.len() {
            return (0..count)
                .map(|j| self.domain_start + j as f64 * self.domain_step)
                .collect();
        }
        crate::core::sample_points(self.domain_start(), self.domain_end(), count)
    }

    fn sample_range(&self, count: usize) -> Vec<Complex64> {
        if count == self.samples.len() {
            return self.samples.clone();
        }
        self.sample_domain(count)
            .into_iter()
            .map(|x| self.compute(x))
            .collect()
    }
}
