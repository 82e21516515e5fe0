//! Frequency providers map a rotor index to the frequency that rotor represents.
//!
//! Providers are plain configuration values: evaluation is pure, equality and hashing are
//! bitwise on the configured floats, and the `Display` form is stable so callers can key caches
//! and logs on it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::core::{FourierError, same_frequency};

/// What an explicit provider returns for indices past the end of its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrapolationPolicy {
    /// Wrap around: `list[index % len]`.
    Repeat,
    /// Bounce back and forth across the list: `1, 2, 3, 2, 1, 2, ...`.
    Cycle,
    /// Return one tag frequency that is not in the list, so out-of-range indices cannot alias
    /// (and overwrite cached state for) a listed frequency.
    #[default]
    UniqueConstant,
}

impl ExtrapolationPolicy {
    fn as_str(self) -> &'static str {
        match self {
            Self::Repeat => "repeat",
            Self::Cycle => "cycle",
            Self::UniqueConstant => "unique_constant",
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct ExplicitFrequenciesRepr {
    frequencies: Vec<f64>,
    #[serde(default)]
    policy: ExtrapolationPolicy,
}

/// Sorted, de-duplicated list of required frequencies.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ExplicitFrequenciesRepr", into = "ExplicitFrequenciesRepr")]
pub struct ExplicitFrequencies {
    frequencies: Vec<f64>,
    policy: ExtrapolationPolicy,
    tag: OnceLock<f64>,
}

impl ExplicitFrequencies {
    pub fn new(
        mut frequencies: Vec<f64>,
        policy: ExtrapolationPolicy,
    ) -> Result<Self, FourierError> {
        if frequencies.is_empty() {
            return Err(FourierError::InvalidInput(
                "explicit frequency list must not be empty".to_string(),
            ));
        }
        if frequencies.iter().any(|f| !f.is_finite()) {
            return Err(FourierError::InvalidInput(
                "explicit frequencies must be finite".to_string(),
            ));
        }

        frequencies.sort_by(f64::total_cmp);
        frequencies.dedup_by(|a, b| same_frequency(*a, *b));

        Ok(Self {
            frequencies,
            policy,
            tag: OnceLock::new(),
        })
    }

    #[inline]
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    #[inline]
    pub fn policy(&self) -> ExtrapolationPolicy {
        self.policy
    }

    /// Frequency strictly above every listed one; computed once.
    pub fn unique_tag(&self) -> f64 {
        *self.tag.get_or_init(|| {
            let last = self.frequencies[self.frequencies.len() - 1];
            last + last.abs().max(1.0)
        })
    }

    pub fn frequency_at(&self, index: usize) -> f64 {
        let len = self.frequencies.len();
        if index < len {
            return self.frequencies[index];
        }

        match self.policy {
            ExtrapolationPolicy::Repeat => self.frequencies[index % len],
            ExtrapolationPolicy::Cycle => {
                if len == 1 {
                    return self.frequencies[0];
                }
                let period = len - 1;
                let (pass, offset) = (index / period, index % period);
                if pass % 2 == 0 {
                    self.frequencies[offset]
                } else {
                    self.frequencies[len - 1 - offset]
                }
            }
            ExtrapolationPolicy::UniqueConstant => self.unique_tag(),
        }
    }
}

impl TryFrom<ExplicitFrequenciesRepr> for ExplicitFrequencies {
    type Error = FourierError;

    fn try_from(repr: ExplicitFrequenciesRepr) -> Result<Self, Self::Error> {
        Self::new(repr.frequencies, repr.policy)
    }
}

impl From<ExplicitFrequencies> for ExplicitFrequenciesRepr {
    fn from(value: ExplicitFrequencies) -> Self {
        Self {
            frequencies: value.frequencies,
            policy: value.policy,
        }
    }
}

impl PartialEq for ExplicitFrequencies {
    fn eq(&self, other: &Self) -> bool {
        self.policy == other.policy
            && self.frequencies.len() == other.frequencies.len()
            && self
                .frequencies
                .iter()
                .zip(&other.frequencies)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for ExplicitFrequencies {}

impl Hash for ExplicitFrequencies {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.policy.hash(state);
        for f in &self.frequencies {
            f.to_bits().hash(state);
        }
    }
}

/// Strategy deciding which frequency rotor `index` out of `count` represents.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrequencyProvider {
    /// `start + step * index`.
    FixedStart { start: f64, step: f64 },
    /// `count` frequencies spread evenly over `[start, end)`; `end` defaults to `start + count`.
    Bounded { start: f64, end: Option<f64> },
    /// Harmonics of the DFT fundamental `1 / domain_range`, optionally centered on zero.
    Fundamental { domain_range: f64, centered: bool },
    /// Listed frequencies, extrapolated per policy.
    Explicit(ExplicitFrequencies),
    /// `index * multiplier`.
    IndexProportional { multiplier: f64 },
}

impl FrequencyProvider {
    pub fn fixed_start(start: f64, step: f64) -> Self {
        Self::FixedStart { start, step }
    }

    pub fn bounded(start: f64, end: Option<f64>) -> Self {
        Self::Bounded { start, end }
    }

    pub fn fundamental(domain_range: f64, centered: bool) -> Result<Self, FourierError> {
        if !domain_range.is_finite() || domain_range == 0.0 {
            return Err(FourierError::InvalidInput(format!(
                "fundamental frequency needs a finite non-zero domain range, got {domain_range}"
            )));
        }
        Ok(Self::Fundamental {
            domain_range,
            centered,
        })
    }

    pub fn explicit(
        frequencies: Vec<f64>,
        policy: ExtrapolationPolicy,
    ) -> Result<Self, FourierError> {
        ExplicitFrequencies::new(frequencies, policy).map(Self::Explicit)
    }

    pub fn index_proportional(multiplier: f64) -> Self {
        Self::IndexProportional { multiplier }
    }

    /// Centered harmonics for a usable range, plain integer indices otherwise.
    pub fn for_domain_range(domain_range: f64) -> Self {
        Self::fundamental(domain_range, true).unwrap_or(Self::IndexProportional { multiplier: 1.0 })
    }

    /// Default for a function that may declare its own frequencies.
    ///
    /// A closed list (`except_supported == false`) is the only place the function has energy, so
    /// rotors walk that list. Open or missing lists fall back to [`Self::for_domain_range`].
    pub fn for_declared(explicit: Option<Vec<f64>>, except_supported: bool, domain_range: f64) -> Self {
        explicit
            .filter(|_| !except_supported)
            .and_then(|list| Self::explicit(list, ExtrapolationPolicy::UniqueConstant).ok())
            .unwrap_or_else(|| Self::for_domain_range(domain_range))
    }

    /// Number of rotors actually produced for a requested `count`.
    ///
    /// Centered fundamentals need an odd count to stay symmetric around zero.
    pub fn effective_count(&self, count: usize) -> usize {
        match self {
            Self::Fundamental { centered: true, .. } if count > 0 && count % 2 == 0 => count + 1,
            _ => count,
        }
    }

    pub fn rotor_frequency(&self, index: usize, count: usize) -> f64 {
        let i = index as f64;
        match self {
            Self::FixedStart { start, step } => start + step * i,
            Self::Bounded { start, end } => {
                if count == 0 {
                    return *start;
                }
                let end = end.unwrap_or(start + count as f64);
                start + (end - start) * i / count as f64
            }
            Self::Fundamental {
                domain_range,
                centered,
            } => {
                let step = 1.0 / domain_range;
                if *centered {
                    let half = (self.effective_count(count).max(1) - 1) / 2;
                    (i - half as f64) * step
                } else {
                    i * step
                }
            }
            Self::Explicit(explicit) => explicit.frequency_at(index),
            Self::IndexProportional { multiplier } => i * multiplier,
        }
    }

    /// Frequencies for every index up to [`FrequencyProvider::effective_count`].
    pub fn frequencies(&self, count: usize) -> Vec<f64> {
        let count = self.effective_count(count);
        (0..count).map(|i| self.rotor_frequency(i, count)).collect()
    }
}

impl PartialEq for FrequencyProvider {
    fn eq(&self, other: &Self) -> bool {
        let bits = |x: &f64| x.to_bits();
        match (self, other) {
            (
                Self::FixedStart { start, step },
                Self::FixedStart {
                    start: s2,
                    step: st2,
                },
            ) => bits(start) == bits(s2) && bits(step) == bits(st2),
            (Self::Bounded { start, end }, Self::Bounded { start: s2, end: e2 }) => {
                bits(start) == bits(s2) && end.map(f64::to_bits) == e2.map(f64::to_bits)
            }
            (
                Self::Fundamental {
                    domain_range,
                    centered,
                },
                Self::Fundamental {
                    domain_range: r2,
                    centered: c2,
                },
            ) => bits(domain_range) == bits(r2) && centered == c2,
            (Self::Explicit(a), Self::Explicit(b)) => a == b,
            (
                Self::IndexProportional { multiplier },
                Self::IndexProportional { multiplier: m2 },
            ) => bits(multiplier) == bits(m2),
            _ => false,
        }
    }
}

impl Eq for FrequencyProvider {}

impl Hash for FrequencyProvider {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::FixedStart { start, step } => {
                start.to_bits().hash(state);
                step.to_bits().hash(state);
            }
            Self::Bounded { start, end } => {
                start.to_bits().hash(state);
                end.map(f64::to_bits).hash(state);
            }
            Self::Fundamental {
                domain_range,
                centered,
            } => {
                domain_range.to_bits().hash(state);
                centered.hash(state);
            }
            Self::Explicit(explicit) => explicit.hash(state),
            Self::IndexProportional { multiplier } => multiplier.to_bits().hash(state),
        }
    }
}

impl fmt::Display for FrequencyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedStart { start, step } => write!(f, "fixed_start(start={start}, step={step})"),
            Self::Bounded { start, end } => match end {
                Some(end) => write!(f, "bounded(start={start}, end={end})"),
                None => write!(f, "bounded(start={start}, end=start+count)"),
            },
            Self::Fundamental {
                domain_range,
                centered,
            } => write!(
                f,
                "fundamental(range={domain_range}, centered={centered})"
            ),
            Self::Explicit(explicit) => {
                write!(f, "explicit([")?;
                for (i, freq) in explicit.frequencies().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{freq}")?;
                }
                write!(f, "], {})", explicit.policy().as_str())
            }
            Self::IndexProportional { multiplier } => {
                write!(f, "index_proportional(multiplier={multiplier})")
            }
        }
    }
}
