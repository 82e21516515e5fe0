//! Single-bin spectral evaluation by radix-2 decimation in time.
//!
//! The recursion is Cooley-Tukey restricted to one output bin, with the bin index allowed to be
//! any real number. Splitting `N` samples into even and odd halves gives
//!
//! `X_N(k) = E_{N/2}(k) + exp(dir * 2πi * k / N) * O_{N/2}(k)`
//!
//! which holds for fractional `k` as well, because the twiddle of sample `2m` over `N` equals the
//! twiddle of sample `m` over `N / 2`. Each level needs one twiddle, so a bin costs `O(N)`
//! multiply-adds at `log2(N)` recursion depth instead of the `O(N log N)` full spectrum.
//!
//! Leaves (single samples) carry the phase `exp(dir * 2πi * k)`, which is exactly 1 for integer
//! `k`. For fractional `k` that phase is a constant factor on the whole result;
//! [`SpectralEvaluator::aligned_sum`] removes it.

use num_complex::Complex64;
use num_traits::Zero;

use crate::core::{Direction, FourierError, TRANSFORM_DIRECTION};

/// Evaluates one (possibly fractional) DFT bin of a sample sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectralEvaluator {
    direction: Direction,
}

impl Default for SpectralEvaluator {
    fn default() -> Self {
        Self::new(TRANSFORM_DIRECTION)
    }
}

impl SpectralEvaluator {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Twiddle applied to each single-sample leaf.
    #[inline]
    pub fn leaf_phase(&self, k: f64) -> Complex64 {
        if k.fract() == 0.0 {
            Complex64::new(1.0, 0.0)
        } else {
            self.direction.phasor(k)
        }
    }

    /// Evaluates bin `k`, where `k` counts cycles across all of `samples`.
    ///
    /// Any length is accepted: non-power-of-two inputs are zero-padded to `M` samples and the
    /// bin is rescaled to `k * M / N` so it still targets the same frequency.
    pub fn evaluate_single_frequency(&self, samples: &[Complex64], k: f64) -> Complex64 {
        if samples.is_empty() {
            return Complex64::zero();
        }
        if k == 0.0 {
            return samples.iter().sum();
        }

        let n = samples.len();
        if n.is_power_of_two() {
            return self.radix2_unchecked(samples, k);
        }

        let (padded, k_padded) = pad_to_power_of_two(samples, k);
        self.radix2_unchecked(&padded, k_padded)
    }

    /// Radix-2 recursion on an already padded input.
    ///
    /// Rejects lengths that are not a power of two; padding is the job of
    /// [`SpectralEvaluator::evaluate_single_frequency`].
    pub fn evaluate_radix2(&self, samples: &[Complex64], k: f64) -> Result<Complex64, FourierError> {
        if !samples.len().is_power_of_two() {
            return Err(FourierError::Precondition(format!(
                "radix-2 evaluation needs a power-of-two length, got {}",
                samples.len()
            )));
        }
        Ok(self.radix2_unchecked(samples, k))
    }

    /// `Σ_j samples[j] * exp(dir * 2πi * k * j / N)` for any real `k`, without the leaf phase.
    pub fn aligned_sum(&self, samples: &[Complex64], k: f64) -> Complex64 {
        if samples.is_empty() {
            return Complex64::zero();
        }
        if k == 0.0 {
            return samples.iter().sum();
        }

        let n = samples.len();
        if n.is_power_of_two() {
            return self.radix2_unchecked(samples, k) * self.leaf_phase(k).conj();
        }

        let (padded, k_padded) = pad_to_power_of_two(samples, k);
        self.radix2_unchecked(&padded, k_padded) * self.leaf_phase(k_padded).conj()
    }

    fn radix2_unchecked(&self, samples: &[Complex64], k: f64) -> Complex64 {
        let len = samples.len();
        let depth = len.trailing_zeros() as usize;

        // One twiddle per block size: twiddles[d] is used when combining blocks of 2^(d+1).
        let twiddles: Vec<Complex64> = (0..depth)
            .map(|d| self.direction.phasor(k / (1usize << (d + 1)) as f64))
            .collect();
        let leaf = self.leaf_phase(k);

        self.combine(samples, 0, 1, len, leaf, &twiddles)
    }

    fn combine(
        &self,
        samples: &[Complex64],
        offset: usize,
        stride: usize,
        len: usize,
        leaf: Complex64,
        twiddles: &[Complex64],
    ) -> Complex64 {
        if len == 1 {
            return samples[offset] * leaf;
        }

        let half = len / 2;
        let even = self.combine(samples, offset, stride * 2, half, leaf, twiddles);
        let odd = self.combine(samples, offset + stride, stride * 2, half, leaf, twiddles);
        let level = len.trailing_zeros() as usize - 1;
        even + twiddles[level] * odd
    }
}

/// Zero-pads `samples` to the next power of two and rescales bin `k` to the padded length.
pub fn pad_to_power_of_two(samples: &[Complex64], k: f64) -> (Vec<Complex64>, f64) {
    let n = samples.len();
    let m = n.next_power_of_two();
    let mut padded = Vec::with_capacity(m);
    padded.extend_from_slice(samples);
    padded.resize(m, Complex64::zero());
    (padded, k * m as f64 / n as f64)
}

/// [`SpectralEvaluator::evaluate_single_frequency`] with the analysis direction.
pub fn evaluate_single_frequency(samples: &[Complex64], k: f64) -> Complex64 {
    SpectralEvaluator::default().evaluate_single_frequency(samples, k)
}
