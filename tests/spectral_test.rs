//! Single-bin spectral evaluation checked against `rustfft` full spectra and a direct DTFT.

use std::f64::consts::TAU;

use approx::assert_abs_diff_eq;
use num_complex::Complex64;
use openrotor::core::{Direction, TRANSFORM_DIRECTION};
use openrotor::engines::fourier::{
    SpectralEvaluator, evaluate_single_frequency, full_spectrum, inverse_spectrum,
    pad_to_power_of_two,
};

fn chirp(n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|j| {
            let t = j as f64 / n as f64;
            Complex64::new((TAU * 3.0 * t * t).cos(), 0.25 * (TAU * 5.0 * t).sin())
        })
        .collect()
}

fn dtft(samples: &[Complex64], k: f64) -> Complex64 {
    let n = samples.len() as f64;
    samples
        .iter()
        .enumerate()
        .map(|(j, s)| s * TRANSFORM_DIRECTION.phasor(k * j as f64 / n))
        .sum()
}

#[test]
fn every_integer_bin_matches_the_full_spectrum() {
    for n in [1, 2, 16, 64, 256] {
        let x = chirp(n);
        let spectrum = full_spectrum(&x);
        for (k, want) in spectrum.iter().enumerate() {
            let got = evaluate_single_frequency(&x, k as f64);
            assert!(
                (got - want).norm() < 1e-9 * n as f64,
                "n={n} k={k}: got {got}, want {want}"
            );
        }
    }
}

#[test]
fn negative_integer_bins_alias_to_the_top_of_the_spectrum() {
    let x = chirp(32);
    let spectrum = full_spectrum(&x);
    let got = evaluate_single_frequency(&x, -3.0);
    assert_abs_diff_eq!((got - spectrum[29]).norm(), 0.0, epsilon = 1e-9);
}

#[test]
fn aligned_sums_are_the_dtft_for_any_length() {
    let eval = SpectralEvaluator::default();
    for n in [5, 12, 64, 100] {
        let x = chirp(n);
        for k in [0.5, 1.25, 7.9, -2.2] {
            let got = eval.aligned_sum(&x, k);
            let want = dtft(&x, k);
            assert!((got - want).norm() < 1e-9, "n={n} k={k}: got {got}, want {want}");
        }
    }
}

#[test]
fn non_power_of_two_lengths_reach_integer_bins_through_padding() {
    let x = chirp(12);
    let spectrum = full_spectrum(&x);
    let eval = SpectralEvaluator::default();
    for k in [0, 3, 6, 9] {
        // 12 pads to 16; bins that are multiples of 3 rescale to integers.
        let (padded, k_padded) = pad_to_power_of_two(&x, k as f64);
        assert_eq!(padded.len(), 16);
        assert_abs_diff_eq!(k_padded, k as f64 * 16.0 / 12.0, epsilon = 1e-15);
        let got = eval.aligned_sum(&x, k as f64);
        assert_abs_diff_eq!((got - spectrum[k]).norm(), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn evaluator_direction_matches_the_spectrum_direction() {
    let x = chirp(16);
    let mut inverse_bins = x.clone();
    openrotor::engines::fourier::spectrum_inplace(&mut inverse_bins, Direction::CounterClockwise);

    let ccw = SpectralEvaluator::new(Direction::CounterClockwise);
    for k in 0..16 {
        let got = ccw.evaluate_single_frequency(&x, k as f64);
        assert_abs_diff_eq!((got - inverse_bins[k]).norm(), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn full_spectrum_round_trips() {
    let x = chirp(24);
    let back = inverse_spectrum(&full_spectrum(&x));
    for (a, b) in x.iter().zip(&back) {
        assert_abs_diff_eq!((a - b).norm(), 0.0, epsilon = 1e-12);
    }
}
