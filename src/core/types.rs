use std::f64::consts::TAU;

use num_complex::Complex64;

/// Rotational convention of the complex exponential kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Negative angular rate, `exp(-i * theta)`.
    Clockwise,
    /// Positive angular rate, `exp(+i * theta)`.
    CounterClockwise,
}

impl Direction {
    /// Returns the reversed rotation.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }

    /// Returns -1 or +1 as an integer; usable in const context.
    pub const fn signum(self) -> i8 {
        match self {
            Self::Clockwise => -1,
            Self::CounterClockwise => 1,
        }
    }

    /// Returns -1.0 or +1.0.
    #[inline]
    pub fn sign(self) -> f64 {
        f64::from(self.signum())
    }

    /// Unit phasor `exp(sign * 2πi * cycles)`.
    #[inline]
    pub fn phasor(self, cycles: f64) -> Complex64 {
        Complex64::cis(self.sign() * TAU * cycles)
    }
}

/// Rotation used when rotors synthesize a signal (`c * exp(+2πi f t)`).
pub const SERIES_DIRECTION: Direction = Direction::CounterClockwise;

/// Rotation used by the analysis kernel. Always the opposite of
/// [`SERIES_DIRECTION`]; coefficients only reconstruct their source when the
/// two conventions cancel.
pub const TRANSFORM_DIRECTION: Direction = SERIES_DIRECTION.opposite();

const _: () = assert!(SERIES_DIRECTION.signum() == -TRANSFORM_DIRECTION.signum());

/// Projection of a complex sample onto the real line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SampleTransform {
    Real,
    Imaginary,
    Magnitude,
    Argument,
}

impl SampleTransform {
    #[inline]
    pub fn apply(self, value: Complex64) -> f64 {
        match self {
            Self::Real => value.re,
            Self::Imaginary => value.im,
            Self::Magnitude => value.norm(),
            Self::Argument => value.arg(),
        }
    }
}

/// How a renderer should plot a function by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GraphMode {
    /// `(domain, transform(value))` pairs.
    DomainValue(SampleTransform),
    /// `(re, im)` pairs traced in the complex plane.
    ComplexPlane,
}

impl Default for GraphMode {
    fn default() -> Self {
        Self::DomainValue(SampleTransform::Real)
    }
}

/// Display color attached to a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Shortest and longest time, in seconds, one animated pass over the domain should take.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationBounds {
    pub min_seconds: f64,
    pub max_seconds: f64,
}

impl AnimationBounds {
    const MIN_FLOOR: f64 = 0.5;
    const MAX_CEILING: f64 = 600.0;

    /// Heuristic bounds proportional to the absolute domain range.
    pub fn for_domain_range(range: f64) -> Self {
        let base = if range.is_finite() && range != 0.0 {
            range.abs()
        } else {
            1.0
        };
        let min_seconds = base.clamp(Self::MIN_FLOOR, Self::MAX_CEILING);
        let max_seconds = (10.0 * base).clamp(min_seconds, Self::MAX_CEILING);
        Self {
            min_seconds,
            max_seconds,
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self {
            min_seconds: self.min_seconds * factor,
            max_seconds: self.max_seconds * factor,
        }
    }
}

/// How a merged function combines constituent domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MergeMode {
    /// Defined wherever any constituent is defined.
    Union,
    /// Defined only where every constituent is defined.
    Intersection,
}

/// Reconstruction policy between two discrete samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum StickMode {
    /// Snap to the closer sample; a fractional position of exactly 0.5 snaps forward.
    StickNearest,
    /// Linear blend of the two bracketing samples.
    #[default]
    Interpolate,
}
