//! Full-spectrum transforms backed by `rustfft`, with plans cached per length.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

use crate::core::{Direction, TRANSFORM_DIRECTION};

#[derive(Clone)]
struct SpectrumPlan {
    clockwise: Arc<dyn Fft<f64>>,
    counter_clockwise: Arc<dyn Fft<f64>>,
}

static SPECTRUM_PLAN_CACHE: OnceLock<Mutex<HashMap<usize, SpectrumPlan>>> = OnceLock::new();

thread_local! {
    static SPECTRUM_SCRATCH: RefCell<HashMap<(usize, bool), Vec<Complex64>>> =
        RefCell::new(HashMap::new());
}

fn spectrum_plan(n: usize) -> SpectrumPlan {
    let cache = SPECTRUM_PLAN_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = cache.lock().expect("spectrum plan cache lock poisoned");
    if let Some(plan) = guard.get(&n) {
        return plan.clone();
    }

    log::debug!("planning {n}-point spectrum");
    let mut planner = FftPlanner::<f64>::new();
    let plan = SpectrumPlan {
        clockwise: planner.plan_fft_forward(n),
        counter_clockwise: planner.plan_fft_inverse(n),
    };
    guard.insert(n, plan.clone());
    plan
}

/// In-place unnormalized DFT: `X[k] = Σ_j x[j] * exp(dir * 2πi * j * k / N)`.
pub fn spectrum_inplace(values: &mut [Complex64], direction: Direction) {
    let n = values.len();
    if n == 0 {
        return;
    }

    let plan = spectrum_plan(n);
    let clockwise = direction == Direction::Clockwise;
    let fft = if clockwise {
        &plan.clockwise
    } else {
        &plan.counter_clockwise
    };
    let scratch_len = fft.get_inplace_scratch_len();

    SPECTRUM_SCRATCH.with(|cache| {
        let mut cache = cache.borrow_mut();
        let scratch = cache.entry((n, clockwise)).or_default();
        if scratch.len() < scratch_len {
            scratch.resize(scratch_len, Complex64::new(0.0, 0.0));
        }
        fft.process_with_scratch(values, &mut scratch[..scratch_len]);
    });
}

/// Every integer bin of `samples` under the analysis direction.
pub fn full_spectrum(samples: &[Complex64]) -> Vec<Complex64> {
    let mut out = samples.to_vec();
    spectrum_inplace(&mut out, TRANSFORM_DIRECTION);
    out
}

/// Rebuilds samples from a [`full_spectrum`] output.
pub fn inverse_spectrum(spectrum: &[Complex64]) -> Vec<Complex64> {
    let mut out = spectrum.to_vec();
    spectrum_inplace(&mut out, TRANSFORM_DIRECTION.opposite());
    let inv_n = 1.0 / out.len().max(1) as f64;
    for x in &mut out {
        *x *= inv_n;
    }
    out
}
