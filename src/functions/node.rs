use std::sync::Arc;

use num_complex::Complex64;

use crate::core::{AnimationBounds, Color, DomainFunction, GraphMode, SampleTransform};
use crate::engines::fourier::RotorState;
use crate::frequency::FrequencyProvider;

use super::{DiscreteFunction, MergedFunction, RotorStatesFunction, SignalFunction, WrappedFunction};

/// Variant tag of a [`FunctionNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Continuous,
    Discrete,
    Rotors,
    Merged,
    Wrapped,
}

/// Closed set of function variants.
///
/// The tag is fixed at construction, so consumers pick sampling and transform strategies by
/// matching on it instead of probing capabilities at call time. Wrappers may nest; use
/// [`FunctionNode::unwrap_to_base`] to reach the function they decorate.
#[derive(Debug)]
pub enum FunctionNode {
    Continuous(SignalFunction),
    Discrete(DiscreteFunction),
    Rotors(RotorStatesFunction),
    Merged(MergedFunction),
    Wrapped(WrappedFunction),
}

impl FunctionNode {
    pub fn kind(&self) -> FunctionKind {
        match self {
            Self::Continuous(_) => FunctionKind::Continuous,
            Self::Discrete(_) => FunctionKind::Discrete,
            Self::Rotors(_) => FunctionKind::Rotors,
            Self::Merged(_) => FunctionKind::Merged,
            Self::Wrapped(_) => FunctionKind::Wrapped,
        }
    }

    /// Follows wrapper links down to the first non-wrapper node.
    pub fn unwrap_to_base(&self) -> &FunctionNode {
        let mut node = self;
        while let Self::Wrapped(wrapped) = node {
            node = wrapped.inner();
        }
        node
    }

    /// Number of wrappers between this node and its base.
    pub fn wrapper_depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self;
        while let Self::Wrapped(wrapped) = node {
            depth += 1;
            node = wrapped.inner();
        }
        depth
    }

    /// The discrete function at the base of this node, if that is what it wraps.
    pub fn as_discrete(&self) -> Option<&DiscreteFunction> {
        match self.unwrap_to_base() {
            Self::Discrete(discrete) => Some(discrete),
            _ => None,
        }
    }

    /// Range the node's Fourier series repeats over: the sampled period for a discrete base,
    /// the domain range otherwise.
    pub fn series_period(&self) -> f64 {
        match self.as_discrete() {
            Some(discrete) => discrete.period(),
            None => self.domain_range(),
        }
    }

    pub fn as_rotors(&self) -> Option<&RotorStatesFunction> {
        match self.unwrap_to_base() {
            Self::Rotors(rotors) => Some(rotors),
            _ => None,
        }
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn as_function(&self) -> &dyn DomainFunction {
        match self {
            Self::Continuous(f) => f,
            Self::Discrete(f) => f,
            Self::Rotors(f) => f,
            Self::Merged(f) => f,
            Self::Wrapped(f) => f,
        }
    }
}

impl From<SignalFunction> for FunctionNode {
    fn from(value: SignalFunction) -> Self {
        Self::Continuous(value)
    }
}

impl From<DiscreteFunction> for FunctionNode {
    fn from(value: DiscreteFunction) -> Self {
        Self::Discrete(value)
    }
}

impl From<RotorStatesFunction> for FunctionNode {
    fn from(value: RotorStatesFunction) -> Self {
        Self::Rotors(value)
    }
}

impl From<MergedFunction> for FunctionNode {
    fn from(value: MergedFunction) -> Self {
        Self::Merged(value)
    }
}

impl From<WrappedFunction> for FunctionNode {
    fn from(value: WrappedFunction) -> Self {
        Self::Wrapped(value)
    }
}

impl DomainFunction for FunctionNode {
    fn domain_start(&self) -> f64 {
        self.as_function().domain_start()
    }

    fn domain_end(&self) -> f64 {
        self.as_function().domain_end()
    }

    fn compute(&self, x: f64) -> Complex64 {
        self.as_function().compute(x)
    }

    fn domain_range(&self) -> f64 {
        self.as_function().domain_range()
    }

    fn is_within_domain(&self, x: f64) -> bool {
        self.as_function().is_within_domain(x)
    }

    fn explicit_frequencies(&self) -> Option<Vec<f64>> {
        self.as_function().explicit_frequencies()
    }

    fn frequencies_except_explicit_supported(&self) -> bool {
        self.as_function().frequencies_except_explicit_supported()
    }

    fn is_frequency_supported(&self, frequency: f64) -> bool {
        self.as_function().is_frequency_supported(frequency)
    }

    fn preferred_interval_count(&self) -> Option<usize> {
        self.as_function().preferred_interval_count()
    }

    fn default_frequency_provider(&self) -> FrequencyProvider {
        self.as_function().default_frequency_provider()
    }

    fn default_graph_mode(&self) -> GraphMode {
        self.as_function().default_graph_mode()
    }

    fn color(&self) -> Option<Color> {
        self.as_function().color()
    }

    fn animation_duration_bounds(&self) -> AnimationBounds {
        self.as_function().animation_duration_bounds()
    }

    fn has_cached_rotor_state(&self, frequency: f64) -> bool {
        self.as_function().has_cached_rotor_state(frequency)
    }

    fn cached_rotor_state(&self, frequency: f64) -> Option<Arc<RotorState>> {
        self.as_function().cached_rotor_state(frequency)
    }

    fn sample_domain(&self, count: usize) -> Vec<f64> {
        self.as_function().sample_domain(count)
    }

    fn sample_range(&self, count: usize) -> Vec<Complex64> {
        self.as_function().sample_range(count)
    }

    fn sample_real_range(&self, count: usize, transform: SampleTransform) -> Vec<f64> {
        self.as_function().sample_real_range(count, transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MergeMode, StickMode};

    fn discrete() -> FunctionNode {
        let samples = vec![Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0), Complex64::new(3.0, 0.0)];
        DiscreteFunction::new(0.0, 1.0, samples, StickMode::Interpolate)
            .unwrap()
            .into()
    }

    #[test]
    fn unwrap_reaches_base_through_nested_wrappers() {
        let base = discrete().into_shared();
        let once: FunctionNode = WrappedFunction::new(Arc::clone(&base)).into();
        let twice: FunctionNode = WrappedFunction::new(once.into_shared()).into();

        assert_eq!(twice.kind(), FunctionKind::Wrapped);
        assert_eq!(twice.wrapper_depth(), 2);
        assert_eq!(twice.unwrap_to_base().kind(), FunctionKind::Discrete);
        assert!(twice.as_discrete().is_some());
        assert!(twice.as_rotors().is_none());
    }

    #[test]
    fn wrapped_discrete_keeps_native_sampling() {
        let base = discrete().into_shared();
        let wrapped: FunctionNode = WrappedFunction::new(Arc::clone(&base)).into();
        assert_eq!(wrapped.sample_range(3), base.as_discrete().unwrap().samples().to_vec());
        assert_eq!(
            wrapped.sample_real_range(3, SampleTransform::Real),
            vec![1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn series_period_follows_the_base_variant() {
        let base = discrete().into_shared();
        let wrapped: FunctionNode = WrappedFunction::new(Arc::clone(&base)).into();
        assert_eq!(base.domain_range(), 2.0);
        assert_eq!(wrapped.series_period(), 3.0);

        let signal: FunctionNode = SignalFunction::real(1.0, -1.0, |t| t).into();
        assert_eq!(signal.series_period(), -2.0);
    }

    #[test]
    fn merged_is_not_unwrapped() {
        let merged: FunctionNode = MergedFunction::new(MergeMode::Union, vec![discrete().into_shared()])
            .unwrap()
            .into();
        assert_eq!(merged.unwrap_to_base().kind(), FunctionKind::Merged);
        assert!(merged.as_discrete().is_none());
        assert_eq!(merged.compute(0.5).re, 1.5);
    }

    #[test]
    fn node_dispatch_matches_variant() {
        let node: FunctionNode = SignalFunction::real(0.0, 1.0, |t| 3.0 * t).into();
        assert_eq!(node.kind(), FunctionKind::Continuous);
        assert_eq!(node.compute(2.0).re, 6.0);
        assert_eq!(node.sample_graph(2, SampleTransform::Real), vec![(0.0, 0.0), (1.0, 3.0)]);
        assert_eq!(node.sample_complex_plane(1), vec![(0.0, 0.0)]);
    }
}
