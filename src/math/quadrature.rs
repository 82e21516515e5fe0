//! Composite Simpson quadrature for complex-valued integrands.
//!
//! Both rules normalize the requested interval count instead of rejecting it: `0` selects the
//! rule's default, counts below the rule's minimum are raised to it, and counts that do not fit
//! the rule's panel width are rounded up to the next multiple.

use num_complex::Complex64;
use num_traits::Zero;

/// Default interval count for Simpson's 1/3 rule.
pub const SIMPSON_13_DEFAULT_INTERVALS: usize = 100;
/// Smallest interval count Simpson's 1/3 rule can use.
pub const SIMPSON_13_MIN_INTERVALS: usize = 2;
/// Default interval count for Simpson's 3/8 rule.
pub const SIMPSON_38_DEFAULT_INTERVALS: usize = 51;
/// Smallest interval count Simpson's 3/8 rule can use.
pub const SIMPSON_38_MIN_INTERVALS: usize = 3;

/// Quadrature rule selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum QuadratureRule {
    /// Simpson's 1/3 rule on an even number of intervals.
    #[default]
    Simpson13,
    /// Simpson's 3/8 rule on a multiple-of-three number of intervals.
    Simpson38,
}

impl QuadratureRule {
    pub fn default_intervals(self) -> usize {
        match self {
            Self::Simpson13 => SIMPSON_13_DEFAULT_INTERVALS,
            Self::Simpson38 => SIMPSON_38_DEFAULT_INTERVALS,
        }
    }

    pub fn min_intervals(self) -> usize {
        match self {
            Self::Simpson13 => SIMPSON_13_MIN_INTERVALS,
            Self::Simpson38 => SIMPSON_38_MIN_INTERVALS,
        }
    }

    fn panel_width(self) -> usize {
        match self {
            Self::Simpson13 => 2,
            Self::Simpson38 => 3,
        }
    }

    /// Interval count the rule will actually use for a requested `n`.
    pub fn normalize_intervals(self, n: usize) -> usize {
        let n = if n == 0 { self.default_intervals() } else { n };
        let n = n.max(self.min_intervals());
        n.next_multiple_of(self.panel_width())
    }

    /// Integrates `f` over `[a, b]` with (roughly) `n` intervals.
    pub fn integrate<F>(self, f: F, a: f64, b: f64, n: usize) -> Complex64
    where
        F: Fn(f64) -> Complex64,
    {
        match self {
            Self::Simpson13 => simpson_13(f, a, b, n),
            Self::Simpson38 => simpson_38(f, a, b, n),
        }
    }
}

/// Composite Simpson 1/3 rule: weights `1, 4, 2, 4, ..., 2, 4, 1` scaled by `h / 3`.
pub fn simpson_13<F>(f: F, a: f64, b: f64, n: usize) -> Complex64
where
    F: Fn(f64) -> Complex64,
{
    if a == b {
        return Complex64::zero();
    }

    let n = QuadratureRule::Simpson13.normalize_intervals(n);
    let h = (b - a) / n as f64;

    let mut sum = f(a) + f(b);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += f(a + i as f64 * h) * weight;
    }

    sum * (h / 3.0)
}

/// Composite Simpson 3/8 rule: interior points on panel boundaries get weight 2, others 3,
/// scaled by `3h / 8`.
pub fn simpson_38<F>(f: F, a: f64, b: f64, n: usize) -> Complex64
where
    F: Fn(f64) -> Complex64,
{
    if a == b {
        return Complex64::zero();
    }

    let n = QuadratureRule::Simpson38.normalize_intervals(n);
    let h = (b - a) / n as f64;

    let mut sum = f(a) + f(b);
    for i in 1..n {
        let weight = if i % 3 == 0 { 2.0 } else { 3.0 };
        sum += f(a + i as f64 * h) * weight;
    }

    sum * (3.0 * h / 8.0)
}
