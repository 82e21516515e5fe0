use std::collections::HashMap;
use std::f64::consts::TAU;
use std::sync::{Arc, Mutex, OnceLock};

use num_complex::Complex64;

use crate::core::{Direction, SERIES_DIRECTION};

/// One harmonic of a Fourier series: a frequency and its coefficient.
///
/// Derived quantities are computed on first use and kept for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct RotorState {
    frequency: f64,
    coefficient: Complex64,
    direction: Direction,
    magnitude: OnceLock<f64>,
    argument: OnceLock<f64>,
    angular_rate: OnceLock<f64>,
}

impl RotorState {
    /// Series-synthesis rotor (`coefficient * exp(+2πi f t)`).
    pub fn new(frequency: f64, coefficient: Complex64) -> Self {
        Self::with_direction(frequency, coefficient, SERIES_DIRECTION)
    }

    pub fn with_direction(frequency: f64, coefficient: Complex64, direction: Direction) -> Self {
        Self {
            frequency,
            coefficient,
            direction,
            magnitude: OnceLock::new(),
            argument: OnceLock::new(),
            angular_rate: OnceLock::new(),
        }
    }

    #[inline]
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    #[inline]
    pub fn coefficient(&self) -> Complex64 {
        self.coefficient
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// `|coefficient|`, i.e. the rotor's radius.
    pub fn magnitude(&self) -> f64 {
        *self.magnitude.get_or_init(|| self.coefficient.norm())
    }

    /// Phase of the coefficient in `(-π, π]`.
    pub fn argument(&self) -> f64 {
        *self.argument.get_or_init(|| self.coefficient.arg())
    }

    /// Signed radians per unit of input.
    pub fn angular_rate(&self) -> f64 {
        *self
            .angular_rate
            .get_or_init(|| self.direction.sign() * TAU * self.frequency)
    }

    /// Position of the rotor's tip relative to its pivot at `input`.
    #[inline]
    pub fn tip(&self, input: f64) -> Complex64 {
        self.coefficient * Complex64::cis(self.angular_rate() * input)
    }

    pub fn to_record(&self) -> RotorStateRecord {
        RotorStateRecord {
            frequency: self.frequency,
            re: self.coefficient.re,
            im: self.coefficient.im,
        }
    }
}

impl PartialEq for RotorState {
    fn eq(&self, other: &Self) -> bool {
        self.frequency == other.frequency
            && self.coefficient == other.coefficient
            && self.direction == other.direction
    }
}

impl From<RotorStateRecord> for RotorState {
    fn from(record: RotorStateRecord) -> Self {
        Self::new(record.frequency, Complex64::new(record.re, record.im))
    }
}

/// Flat numeric form of a series rotor, for tabular persistence.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RotorStateRecord {
    pub frequency: f64,
    pub re: f64,
    pub im: f64,
}

#[inline]
fn frequency_key(frequency: f64) -> u64 {
    // -0.0 and 0.0 are the same harmonic.
    if frequency == 0.0 {
        0.0_f64.to_bits()
    } else {
        frequency.to_bits()
    }
}

/// Frequency-keyed rotor states; the first state stored for a frequency wins.
#[derive(Debug, Default)]
pub struct RotorStateCache {
    states: Mutex<HashMap<u64, Arc<RotorState>>>,
}

impl RotorStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, frequency: f64) -> bool {
        self.states
            .lock()
            .expect("rotor state cache lock poisoned")
            .contains_key(&frequency_key(frequency))
    }

    pub fn get(&self, frequency: f64) -> Option<Arc<RotorState>> {
        self.states
            .lock()
            .expect("rotor state cache lock poisoned")
            .get(&frequency_key(frequency))
            .cloned()
    }

    /// Returns the cached state for `frequency`, computing it with `compute` on a miss.
    ///
    /// `compute` runs without the lock held. If another caller stores a state for the same
    /// frequency first, that state is returned and the local result is dropped.
    pub fn get_or_insert_with<F>(&self, frequency: f64, compute: F) -> Arc<RotorState>
    where
        F: FnOnce() -> RotorState,
    {
        if let Some(state) = self.get(frequency) {
            return state;
        }

        let computed = Arc::new(compute());
        let mut guard = self.states.lock().expect("rotor state cache lock poisoned");
        let stored = guard
            .entry(frequency_key(frequency))
            .or_insert_with(|| Arc::clone(&computed));
        if !Arc::ptr_eq(stored, &computed) {
            log::debug!("rotor state for frequency {frequency} was filled concurrently; keeping first");
        }
        Arc::clone(stored)
    }

    pub fn len(&self) -> usize {
        self.states
            .lock()
            .expect("rotor state cache lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached state.
    pub fn clear(&self) {
        self.states
            .lock()
            .expect("rotor state cache lock poisoned")
            .clear();
    }

    /// Cached states ordered by frequency.
    pub fn snapshot(&self) -> Vec<Arc<RotorState>> {
        let mut out: Vec<_> = self
            .states
            .lock()
            .expect("rotor state cache lock poisoned")
            .values()
            .cloned()
            .collect();
        out.sort_by(|a, b| a.frequency().total_cmp(&b.frequency()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn derived_quantities_follow_the_coefficient() {
        let rotor = RotorState::new(2.0, Complex64::new(0.0, -0.5));
        assert_abs_diff_eq!(rotor.magnitude(), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(rotor.argument(), -FRAC_PI_2, epsilon = 1e-15);
        assert_abs_diff_eq!(rotor.angular_rate(), 4.0 * std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn tip_rotates_with_direction() {
        let ccw = RotorState::new(1.0, Complex64::new(1.0, 0.0));
        let cw = RotorState::with_direction(1.0, Complex64::new(1.0, 0.0), Direction::Clockwise);

        let a = ccw.tip(0.25);
        let b = cw.tip(0.25);
        assert_abs_diff_eq!(a.im, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.im, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ccw.tip(1.0).re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn record_keeps_plain_fields() {
        let rotor = RotorState::new(-3.0, Complex64::new(0.25, 0.75));
        let record = rotor.to_record();
        assert_eq!(record, RotorStateRecord { frequency: -3.0, re: 0.25, im: 0.75 });
        assert_eq!(RotorState::from(record), rotor);
    }

    #[test]
    fn cache_treats_signed_zero_as_one_key() {
        let cache = RotorStateCache::new();
        cache.get_or_insert_with(0.0, || RotorState::new(0.0, Complex64::new(1.0, 0.0)));
        assert!(cache.contains(-0.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_keeps_first_value() {
        let cache = RotorStateCache::new();
        let first = cache.get_or_insert_with(1.0, || RotorState::new(1.0, Complex64::new(1.0, 0.0)));
        let second =
            cache.get_or_insert_with(1.0, || RotorState::new(1.0, Complex64::new(9.0, 0.0)));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.coefficient(), Complex64::new(1.0, 0.0));

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(1.0).is_none());
    }

    #[test]
    fn concurrent_fills_agree_on_one_entry() {
        let cache = Arc::new(RotorStateCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    cache.get_or_insert_with(5.0, || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        RotorState::new(5.0, Complex64::new(i as f64, 0.0))
                    })
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(calls.load(Ordering::SeqCst) >= 1);
        let cached = cache.get(5.0).unwrap();
        for state in &results {
            assert!(Arc::ptr_eq(state, &cached));
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn snapshot_is_sorted_by_frequency() {
        let cache = RotorStateCache::new();
        for f in [3.0, -1.0, 2.0] {
            cache.get_or_insert_with(f, || RotorState::new(f, Complex64::new(f, 0.0)));
        }
        let freqs: Vec<f64> = cache.snapshot().iter().map(|s| s.frequency()).collect();
        assert_eq!(freqs, vec![-1.0, 2.0, 3.0]);
    }
}
