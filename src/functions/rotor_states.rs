use std::sync::Arc;

use num_complex::Complex64;
use num_traits::Zero;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{DomainFunction, GraphMode, same_frequency};
use crate::engines::fourier::{FourierEngine, RotorState, RotorStateCache};
use crate::frequency::FrequencyProvider;

use super::FunctionNode;

/// Fourier-series reconstruction of a source function from a finite set of rotors.
///
/// Rotor states are computed on demand through the engine and cached by frequency. The function
/// evaluates to the sum of every rotor tip, so its explicit frequencies are exactly the rotor
/// frequencies and nothing else is supported.
#[derive(Debug)]
pub struct RotorStatesFunction {
    source: Arc<FunctionNode>,
    provider: FrequencyProvider,
    rotor_count: usize,
    frequencies: Vec<f64>,
    engine: FourierEngine,
    cache: RotorStateCache,
}

impl RotorStatesFunction {
    pub fn new(
        source: Arc<FunctionNode>,
        provider: FrequencyProvider,
        rotor_count: usize,
        engine: FourierEngine,
    ) -> Self {
        let rotor_count = provider.effective_count(rotor_count);
        let mut frequencies: Vec<f64> = Vec::with_capacity(rotor_count);
        for f in provider.frequencies(rotor_count) {
            if !frequencies.iter().any(|g| same_frequency(*g, f)) {
                frequencies.push(f);
            }
        }

        Self {
            source,
            provider,
            rotor_count,
            frequencies,
            engine,
            cache: RotorStateCache::new(),
        }
    }

    /// Uses the source's own default frequency provider.
    pub fn from_source(source: Arc<FunctionNode>, rotor_count: usize, engine: FourierEngine) -> Self {
        let provider = source.default_frequency_provider();
        Self::new(source, provider, rotor_count, engine)
    }

    #[inline]
    pub fn source(&self) -> &Arc<FunctionNode> {
        &self.source
    }

    #[inline]
    pub fn provider(&self) -> &FrequencyProvider {
        &self.provider
    }

    /// Rotor count after the provider's adjustment (centered providers force it odd).
    #[inline]
    pub fn rotor_count(&self) -> usize {
        self.rotor_count
    }

    /// Distinct rotor frequencies in index order.
    #[inline]
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    #[inline]
    pub fn cache(&self) -> &RotorStateCache {
        &self.cache
    }

    /// Rotor state for `index`, computed on first request.
    pub fn rotor_state(&self, index: usize) -> Arc<RotorState> {
        let frequency = self.provider.rotor_frequency(index, self.rotor_count);
        self.rotor_state_for_frequency(frequency)
    }

    pub fn rotor_state_for_frequency(&self, frequency: f64) -> Arc<RotorState> {
        self.cache.get_or_insert_with(frequency, || {
            self.engine.rotor_state_node(&self.source, frequency)
        })
    }

    /// Computes every rotor state, returning them in frequency-list order.
    pub fn load_all(&self) -> Vec<Arc<RotorState>> {
        log::debug!(
            "loading {} rotor states with {}",
            self.frequencies.len(),
            self.provider
        );

        #[cfg(feature = "parallel")]
        let states = self
            .frequencies
            .par_iter()
            .map(|f| self.rotor_state_for_frequency(*f))
            .collect::<Vec<_>>();
        #[cfg(not(feature = "parallel"))]
        let states = self
            .frequencies
            .iter()
            .map(|f| self.rotor_state_for_frequency(*f))
            .collect::<Vec<_>>();

        states
    }
}

impl DomainFunction for RotorStatesFunction {
    fn domain_start(&self) -> f64 {
        self.source.domain_start()
    }

    fn domain_end(&self) -> f64 {
        self.source.domain_end()
    }

    fn compute(&self, x: f64) -> Complex64 {
        self.frequencies
            .iter()
            .fold(Complex64::zero(), |acc, f| acc + self.rotor_state_for_frequency(*f).tip(x))
    }

    fn explicit_frequencies(&self) -> Option<Vec<f64>> {
        let mut out = self.frequencies.clone();
        out.sort_by(f64::total_cmp);
        Some(out)
    }

    fn frequencies_except_explicit_supported(&self) -> bool {
        false
    }

    fn is_frequency_supported(&self, frequency: f64) -> bool {
        self.frequencies.iter().any(|f| same_frequency(*f, frequency))
    }

    fn preferred_interval_count(&self) -> Option<usize> {
        self.source.preferred_interval_count()
    }

    fn default_frequency_provider(&self) -> FrequencyProvider {
        self.provider.clone()
    }

    fn default_graph_mode(&self) -> GraphMode {
        GraphMode::ComplexPlane
    }

    fn has_cached_rotor_state(&self, frequency: f64) -> bool {
        self.cache.contains(frequency)
    }

    fn cached_rotor_state(&self, frequency: f64) -> Option<Arc<RotorState>> {
        self.cache.get(frequency)
    }
}
