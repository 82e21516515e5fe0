use std::sync::Arc;

use num_complex::Complex64;
use num_traits::Zero;

use crate::core::{DomainFunction, FourierError, GraphMode, MergeMode, same_frequency};
use crate::frequency::FrequencyProvider;

use super::FunctionNode;

/// Sum of several functions over a folded domain.
///
/// Constituents only contribute inside their own domain, also in [`MergeMode::Union`]: the
/// merge mode decides where the merged function is defined, not where each part contributes.
#[derive(Debug, Clone)]
pub struct MergedFunction {
    mode: MergeMode,
    functions: Vec<Arc<FunctionNode>>,
    domain_start: f64,
    domain_end: f64,
}

impl MergedFunction {
    pub fn new(mode: MergeMode, functions: Vec<Arc<FunctionNode>>) -> Result<Self, FourierError> {
        let Some(first) = functions.first() else {
            return Err(FourierError::InvalidInput(
                "merged function needs at least one constituent".to_string(),
            ));
        };

        let init = (first.domain_start(), first.domain_end());
        let (domain_start, domain_end) = functions[1..].iter().fold(init, |(s, e), f| match mode {
            MergeMode::Union => (s.min(f.domain_start()), e.max(f.domain_end())),
            MergeMode::Intersection => (s.max(f.domain_start()), e.min(f.domain_end())),
        });

        Ok(Self {
            mode,
            functions,
            domain_start,
            domain_end,
        })
    }

    #[inline]
    pub fn mode(&self) -> MergeMode {
        self.mode
    }

    #[inline]
    pub fn functions(&self) -> &[Arc<FunctionNode>] {
        &self.functions
    }
}

impl DomainFunction for MergedFunction {
    fn domain_start(&self) -> f64 {
        self.domain_start
    }

    fn domain_end(&self) -> f64 {
        self.domain_end
    }

    fn compute(&self, x: f64) -> Complex64 {
        self.functions
            .iter()
            .filter(|f| f.is_within_domain(x))
            .fold(Complex64::zero(), |acc, f| acc + f.compute(x))
    }

    fn explicit_frequencies(&self) -> Option<Vec<f64>> {
        let mut all = Vec::new();
        for f in &self.functions {
            all.extend(f.explicit_frequencies()?);
        }
        all.sort_by(f64::total_cmp);
        all.dedup_by(|a, b| same_frequency(*a, *b));
        Some(all)
    }

    fn frequencies_except_explicit_supported(&self) -> bool {
        self.functions
            .iter()
            .any(|f| f.frequencies_except_explicit_supported())
    }

    fn is_frequency_supported(&self, frequency: f64) -> bool {
        self.functions
            .iter()
            .any(|f| f.is_frequency_supported(frequency))
    }

    fn preferred_interval_count(&self) -> Option<usize> {
        self.functions
            .iter()
            .filter_map(|f| f.preferred_interval_count())
            .max()
    }

    fn default_frequency_provider(&self) -> FrequencyProvider {
        self.functions[0].default_frequency_provider()
    }

    fn default_graph_mode(&self) -> GraphMode {
        self.functions[0].default_graph_mode()
    }
}
