#![cfg(feature = "modulation")]

use arbwave::{
    AmplitudeShift, Bitstream, Delay, EncodingProfile, GapConfig, RepeatCount, ShiftConfig, Sine,
    UartConfig, Waveform, encode_uart, gap_modulate,
};
use rand::Rng;

fn random_times(count: usize, max: f64) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen_range(0.0..max)).collect()
}

#[test]
fn test_uart_frame_for_0x01() {
    let bits = encode_uart(&[0x01], 1.0, &UartConfig::default());
    assert_eq!(bits.to_vec_u8(), vec![1, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0]);
}

#[test]
fn test_non_destructive_shift_of_constant_carrier() {
    let carrier = Delay::holding(1.0, 1.0)
        .unwrap()
        .with_repeat(RepeatCount::Infinite);
    let ask = AmplitudeShift::new(carrier, Bitstream::from_bits(&[1, 0]), &ShiftConfig::default())
        .unwrap();

    assert_eq!(ask.value_at(0.5), 0.5);
    assert_eq!(ask.value_at(1.5), 1.0);
}

#[test]
fn test_destructive_shift_of_inverted_carrier() {
    let carrier = Delay::holding(1.0, -1.0)
        .unwrap()
        .with_repeat(RepeatCount::Infinite);
    let ask = AmplitudeShift::new(
        carrier,
        Bitstream::from_bits(&[1, 0]),
        &ShiftConfig::destructive(),
    )
    .unwrap();

    assert_eq!(ask.value_at(0.5), 0.5);
    assert_eq!(ask.value_at(1.5), 0.0);
}

#[test]
fn test_evaluation_is_pure() {
    let carrier = Sine::carrier(Sine::LF).unwrap();
    let envelope = gap_modulate(
        &carrier,
        &Bitstream::from_bytes_msb_first(b"\x5A"),
        &GapConfig::default(),
    )
    .unwrap();
    let profile = EncodingProfile::from_json(r#"{"carrier_hz": 125e3, "scheme": "uart"}"#).unwrap();
    let uart = profile.build(b"ok").unwrap();

    let waves: Vec<&dyn Waveform> = vec![&carrier, &envelope, uart.as_ref()];
    let mut times = random_times(300, 2e-3);
    // Out of order and repeated queries
    times.extend(times.clone().into_iter().rev());

    for wave in waves {
        let first: Vec<f64> = times.iter().map(|&t| wave.value_at(t)).collect();
        let second: Vec<f64> = times.iter().map(|&t| wave.value_at(t)).collect();
        assert_eq!(first, second, "{} is not pure", wave.name());
    }
}
