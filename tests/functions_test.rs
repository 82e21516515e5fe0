//! Cross-module behaviour of the function variants: sampling, merging, wrapping and rotor
//! reconstruction working together through `FunctionNode`.

use std::f64::consts::TAU;
use std::sync::Arc;

use approx::assert_abs_diff_eq;
use num_complex::Complex64;
use openrotor::core::{Color, DomainFunction, GraphMode, MergeMode, SampleTransform, StickMode};
use openrotor::engines::fourier::FourierEngine;
use openrotor::frequency::{ExtrapolationPolicy, FrequencyProvider};
use openrotor::functions::{
    DiscreteFunction, FunctionKind, FunctionNode, MergedFunction, RotorStatesFunction,
    SignalFunction, WrappedFunction,
};

fn shared(node: impl Into<FunctionNode>) -> Arc<FunctionNode> {
    let node: FunctionNode = node.into();
    node.into_shared()
}

#[test]
fn merged_sines_decompose_into_both_components() {
    let low = shared(SignalFunction::sine(1.0, 1.0, 0.0, 1.0));
    let high = shared(SignalFunction::sine(3.0, 0.5, 0.0, 1.0));
    let merged = shared(MergedFunction::new(MergeMode::Union, vec![low, high]).unwrap());

    let engine = FourierEngine::default();
    let c1 = engine.rotor_state_node(&merged, 1.0);
    let c3 = engine.rotor_state_node(&merged, 3.0);
    let c2 = engine.rotor_state_node(&merged, 2.0);
    assert_abs_diff_eq!(c1.magnitude(), 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(c3.magnitude(), 0.25, epsilon = 1e-9);
    assert!(c2.magnitude() < 1e-9);
}

#[test]
fn rotor_reconstruction_of_sampled_data_hits_every_sample() {
    // Eight samples of a trigonometric polynomial band-limited to |f| <= 2 on [0, 8).
    let n = 8;
    let step = 1.0;
    let signal = |t: f64| Complex64::new((TAU * t / 8.0).cos(), 0.5 * (TAU * 2.0 * t / 8.0).sin());
    let samples: Vec<Complex64> = (0..n).map(|j| signal(j as f64 * step)).collect();
    let discrete = DiscreteFunction::new(0.0, step, samples.clone(), StickMode::Interpolate).unwrap();
    let source = shared(discrete);

    // Spectral coefficients are taken over the sample period N * step, not the domain range.
    let provider = FrequencyProvider::fixed_start(-3.0 / 8.0, 1.0 / 8.0);
    let rotors = RotorStatesFunction::new(source, provider, n, FourierEngine::default());
    assert_eq!(rotors.frequencies().len(), n);

    for (j, want) in samples.iter().enumerate() {
        let got = rotors.compute(j as f64 * step);
        assert!((got - want).norm() < 1e-9, "sample {j}: got {got}, want {want}");
    }
}

#[test]
fn default_rotors_of_a_sampled_cosine_rebuild_every_sample() {
    let n = 16;
    let step = 1.0 / n as f64;
    let samples: Vec<Complex64> = (0..n)
        .map(|j| Complex64::new((TAU * 2.0 * j as f64 * step).cos(), 0.0))
        .collect();
    let source = shared(DiscreteFunction::new(0.0, step, samples.clone(), StickMode::Interpolate).unwrap());

    let rotors = RotorStatesFunction::from_source(source.clone(), 9, FourierEngine::default());
    assert_eq!(rotors.frequencies(), &[-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0]);

    let dc = rotors.rotor_state_for_frequency(0.0);
    assert!(dc.magnitude() < 1e-12, "dc leaked {}", dc.coefficient());
    let c2 = rotors.rotor_state_for_frequency(2.0);
    assert_abs_diff_eq!(c2.coefficient().re, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(c2.coefficient().im, 0.0, epsilon = 1e-12);

    for (j, want) in samples.iter().enumerate() {
        let got = rotors.compute(j as f64 * step);
        assert!((got - want).norm() < 1e-9, "sample {j}: got {got}, want {want}");
    }
}

#[test]
fn closed_frequency_list_drives_the_default_rotors() {
    // 2.5 Hz is not a harmonic of the unit domain; only the declared list can carry it.
    let source = shared(
        SignalFunction::sine(2.5, 1.0, 0.0, 1.0).with_explicit_frequencies(vec![-2.5, 2.5], false),
    );
    assert_eq!(
        source.default_frequency_provider(),
        FrequencyProvider::explicit(vec![-2.5, 2.5], ExtrapolationPolicy::UniqueConstant).unwrap()
    );

    let rotors = RotorStatesFunction::from_source(source.clone(), 2, FourierEngine::default());
    assert_eq!(rotors.frequencies(), &[-2.5, 2.5]);
    for x in [0.1, 0.3, 0.47, 0.9] {
        let got = rotors.compute(x);
        let want = source.compute(x);
        assert!((got - want).norm() < 1e-6, "x={x}: got {got}, want {want}");
    }
}

#[test]
fn rotors_over_rotors_reproduce_the_same_states() {
    let source = shared(SignalFunction::sine(2.0, 1.0, 0.0, 1.0));
    let first = shared(RotorStatesFunction::from_source(source, 7, FourierEngine::default()));
    let second = RotorStatesFunction::from_source(first.clone(), 7, FourierEngine::default());

    assert_eq!(first.kind(), FunctionKind::Rotors);
    assert_eq!(second.default_graph_mode(), GraphMode::ComplexPlane);
    let a = first.as_rotors().unwrap().rotor_state_for_frequency(2.0);
    let b = second.rotor_state_for_frequency(2.0);
    assert_abs_diff_eq!((a.coefficient() - b.coefficient()).norm(), 0.0, epsilon = 1e-9);

    // Frequencies outside the first rotor set are unsupported, so their transform is zero.
    let engine = FourierEngine::default();
    assert_eq!(
        engine.transform_node(&first, 0.5, None),
        Complex64::new(0.0, 0.0)
    );
}

#[test]
fn unique_constant_tag_never_aliases_listed_frequencies() {
    let source = shared(SignalFunction::sine(1.0, 1.0, 0.0, 1.0));
    let provider =
        FrequencyProvider::explicit(vec![-1.0, 1.0], ExtrapolationPolicy::UniqueConstant).unwrap();
    let rotors = RotorStatesFunction::new(source, provider, 6, FourierEngine::default());
    rotors.load_all();

    let listed = rotors.cached_rotor_state(1.0).unwrap();
    assert_abs_diff_eq!(listed.magnitude(), 0.5, epsilon = 1e-9);
    let tag = rotors.rotor_state(5);
    assert!(tag.frequency() > 1.0);
    assert_eq!(rotors.cache().len(), 3);
}

#[test]
fn wrappers_decorate_without_changing_values() {
    let base = shared(
        DiscreteFunction::from_function(
            &SignalFunction::real(0.0, 4.0, |t| t * 0.5),
            9,
            StickMode::Interpolate,
        )
        .unwrap(),
    );
    let wrapped = shared(
        WrappedFunction::new(base.clone())
            .with_color(Color::rgb(255, 0, 0))
            .with_animation_scale(2.0)
            .unwrap(),
    );
    let rewrapped = FunctionNode::from(WrappedFunction::new(wrapped.clone()));

    assert_eq!(rewrapped.color(), Some(Color::rgb(255, 0, 0)));
    assert_eq!(
        rewrapped.animation_duration_bounds(),
        base.animation_duration_bounds().scaled(2.0)
    );
    assert_eq!(
        rewrapped.sample_real_range(9, SampleTransform::Real),
        base.sample_real_range(9, SampleTransform::Real)
    );
    assert_eq!(rewrapped.unwrap_to_base().kind(), FunctionKind::Discrete);
    assert_eq!(rewrapped.wrapper_depth(), 2);
}

#[test]
fn intersection_merge_limits_the_sampled_domain() {
    let a = shared(SignalFunction::real(-1.0, 3.0, |_| 1.0));
    let b = shared(SignalFunction::real(0.0, 5.0, |_| 2.0));
    let merged = FunctionNode::from(MergedFunction::new(MergeMode::Intersection, vec![a, b]).unwrap());

    assert_eq!(merged.sample_domain(4), vec![0.0, 1.0, 2.0, 3.0]);
    assert!(merged
        .sample_real_range(4, SampleTransform::Real)
        .iter()
        .all(|v| *v == 3.0));
}

#[test]
fn periodic_signals_repeat_outside_their_domain() {
    let saw = SignalFunction::real(0.0, 2.0, |t| t).with_periodic(true);
    assert_abs_diff_eq!(saw.compute(2.5).re, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(saw.compute(-0.5).re, 1.5, epsilon = 1e-12);

    let reversed = SignalFunction::real(2.0, 0.0, |t| t).with_periodic(true);
    assert_abs_diff_eq!(reversed.compute(3.0).re, 1.0, epsilon = 1e-12);
}
