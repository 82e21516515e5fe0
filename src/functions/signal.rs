use std::f64::consts::TAU;
use std::fmt;
use std::sync::{Arc, OnceLock};

use num_complex::Complex64;

use crate::core::{AnimationBounds, Color, DomainFunction, GraphMode};
use crate::frequency::FrequencyProvider;

/// Shared closure evaluated by a [`SignalFunction`].
pub type SignalEvaluator = Arc<dyn Fn(f64) -> Complex64 + Send + Sync>;

/// Continuous function given by a closure over `[domain_start, domain_end]`.
///
/// The closure must be total. With [`SignalFunction::with_periodic`] inputs outside the domain
/// are first reduced modulo the domain range, so the function repeats with that period.
#[derive(Clone)]
pub struct SignalFunction {
    domain_start: f64,
    domain_end: f64,
    evaluator: SignalEvaluator,
    periodic: bool,
    explicit_frequencies: Option<Vec<f64>>,
    except_explicit_supported: bool,
    preferred_intervals: Option<usize>,
    color: Option<Color>,
    graph_mode: GraphMode,
    default_provider: OnceLock<FrequencyProvider>,
    animation_bounds: OnceLock<AnimationBounds>,
}

impl SignalFunction {
    pub fn new<F>(domain_start: f64, domain_end: f64, f: F) -> Self
    where
        F: Fn(f64) -> Complex64 + Send + Sync + 'static,
    {
        Self {
            domain_start,
            domain_end,
            evaluator: Arc::new(f),
            periodic: false,
            explicit_frequencies: None,
            except_explicit_supported: true,
            preferred_intervals: None,
            color: None,
            graph_mode: GraphMode::default(),
            default_provider: OnceLock::new(),
            animation_bounds: OnceLock::new(),
        }
    }

    /// Real-valued signal with zero imaginary part.
    pub fn real<F>(domain_start: f64, domain_end: f64, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::new(domain_start, domain_end, move |t| Complex64::new(f(t), 0.0))
    }

    /// `amplitude * sin(2π * frequency * t)`.
    pub fn sine(frequency: f64, amplitude: f64, domain_start: f64, domain_end: f64) -> Self {
        Self::real(domain_start, domain_end, move |t| {
            amplitude * (TAU * frequency * t).sin()
        })
    }

    pub fn with_periodic(mut self, periodic: bool) -> Self {
        self.periodic = periodic;
        self
    }

    /// Declares the frequencies the signal is made of.
    ///
    /// With `except_supported == false` every other frequency transforms to zero.
    pub fn with_explicit_frequencies(
        mut self,
        mut frequencies: Vec<f64>,
        except_supported: bool,
    ) -> Self {
        frequencies.sort_by(f64::total_cmp);
        self.explicit_frequencies = Some(frequencies);
        self.except_explicit_supported = except_supported;
        self.default_provider = OnceLock::new();
        self
    }

    pub fn with_preferred_interval_count(mut self, n: usize) -> Self {
        self.preferred_intervals = Some(n);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_graph_mode(mut self, mode: GraphMode) -> Self {
        self.graph_mode = mode;
        self
    }

    #[inline]
    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    fn wrap(&self, x: f64) -> f64 {
        let span = (self.domain_end - self.domain_start).abs();
        if !self.periodic || span == 0.0 || !span.is_finite() || !x.is_finite() {
            return x;
        }
        let lo = self.domain_start.min(self.domain_end);
        lo + (x - lo).rem_euclid(span)
    }
}

impl fmt::Debug for SignalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalFunction")
            .field("domain_start", &self.domain_start)
            .field("domain_end", &self.domain_end)
            .field("periodic", &self.periodic)
            .field("explicit_frequencies", &self.explicit_frequencies)
            .field("except_explicit_supported", &self.except_explicit_supported)
            .field("preferred_intervals", &self.preferred_intervals)
            .finish_non_exhaustive()
    }
}

impl DomainFunction for SignalFunction {
    fn domain_start(&self) -> f64 {
        self.domain_start
    }

    fn domain_end(&self) -> f64 {
        self.domain_end
    }

    fn compute(&self, x: f64) -> Complex64 {
        (self.evaluator)(self.wrap(x))
    }

    fn explicit_frequencies(&self) -> Option<Vec<f64>> {
        self.explicit_frequencies.clone()
    }

    fn frequencies_except_explicit_supported(&self) -> bool {
        self.except_explicit_supported
    }

    fn preferred_interval_count(&self) -> Option<usize> {
        self.preferred_intervals
    }

    fn default_frequency_provider(&self) -> FrequencyProvider {
        self.default_provider
            .get_or_init(|| {
                FrequencyProvider::for_declared(
                    self.explicit_frequencies.clone(),
                    self.except_explicit_supported,
                    self.domain_range(),
                )
            })
            .clone()
    }

    fn default_graph_mode(&self) -> GraphMode {
        self.graph_mode
    }

    fn color(&self) -> Option<Color> {
        self.color
    }

    fn animation_duration_bounds(&self) -> AnimationBounds {
        *self
            .animation_bounds
            .get_or_init(|| AnimationBounds::for_domain_range(self.domain_range()))
    }
}
