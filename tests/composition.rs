use arbwave::{
    Arbitrary, Delay, Ramp, RepeatCount, SequenceBuilder, Sine, Square, Waveform, WaveformExt,
    combine_product, combine_sum,
};
use rand::Rng;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn random_times(count: usize, max: f64) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen_range(0.0..max)).collect()
}

#[test]
fn test_two_sample_arbitrary_endpoints() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let s0: f64 = rng.gen_range(-10.0..10.0);
        let s1: f64 = rng.gen_range(-10.0..10.0);
        let period: f64 = rng.gen_range(1e-6..1.0);
        let arb = Arbitrary::new(period, vec![s0, s1]).unwrap();

        assert_eq!(arb.value_at(0.0), s0);
        assert!(approx_eq(arb.value_at(period), s1));
        assert!(approx_eq(arb.value_at(period / 2.0), (s0 + s1) / 2.0));
    }
}

#[test]
fn test_sum_is_pointwise() {
    let a = Sine::new(1e-3).unwrap().with_repeat(RepeatCount::Infinite).shared();
    let b = Square::new(0.4e-3, 0.3).unwrap().shared();
    let sum = combine_sum([a.clone().into(), b.clone().into()]).unwrap();

    for t in random_times(500, 5e-3) {
        assert_eq!(sum.value_at(t), a.value_at(t) + b.value_at(t));
    }
}

#[test]
fn test_product_is_pointwise() {
    let a = Ramp::up(1.0).unwrap().shared();
    let b = Sine::new(0.25).unwrap().with_repeat(RepeatCount::Infinite).shared();
    let product = combine_product([a.clone().into(), b.clone().into(), 2.0.into()]).unwrap();

    for t in random_times(500, 2.0) {
        assert_eq!(product.value_at(t), a.value_at(t) * b.value_at(t) * 2.0);
    }
}

#[test]
fn test_sequence_hands_off_to_second_child() {
    let first = Arbitrary::new(0.3, vec![1.0, -1.0, 0.5]).unwrap().shared();
    let second = Sine::new(0.7).unwrap().shared();
    let mut builder = SequenceBuilder::new();
    builder.append(first.clone()).append(second.clone());
    let seq = builder.build().unwrap();

    for x in random_times(200, 0.7) {
        assert!(approx_eq(seq.value_at(0.3 + x), second.value_at(x)));
    }
    for t in random_times(50, 10.0) {
        assert_eq!(seq.value_at(1.0 + t), 0.0);
    }
}

#[test]
fn test_construction_failures_are_loud() {
    assert!(Sine::new(0.0).unwrap_err().is_construction());
    assert!(Sine::new(-1.0).is_err());
    assert!(Square::new(1.0, 1.0).is_err());
    assert!(Arbitrary::new(1.0, vec![0.0]).is_err());
    assert!(RepeatCount::times(0).is_err());
    assert!(Delay::new(f64::NAN).is_err());
}
