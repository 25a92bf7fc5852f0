//! Approximates a square wave by summing odd sine harmonics and compares it
//! against the ideal square.
//!
//! Run with `cargo run --example harmonics`.

use anyhow::Result;
use arbwave::{Operand, RepeatCount, Sine, Square, WaveformExt, combine_sum, sample};
use std::f64::consts::PI;

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

fn main() -> Result<()> {
    init_logger();

    let period = 1e-3;
    let square = Square::new(period, 0.5)?;

    for count in [1, 3, 10, 50] {
        let mut partials: Vec<Operand> = Vec::with_capacity(count);
        for k in 0..count {
            let n = (2 * k + 1) as f64;
            let harmonic = Sine::new(period / n)?.with_repeat(RepeatCount::Infinite);
            partials.push(Operand::from(harmonic.gain(4.0 / (PI * n))));
        }
        let approx = combine_sum(partials)?;

        let points = 1000;
        let reference = sample(&square, points, 0.0, period);
        let actual = sample(&approx, points, 0.0, period);
        let rms = (reference
            .iter()
            .zip(&actual)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            / points as f64)
            .sqrt();

        log::info!("{count:>3} harmonics: rms error {rms:.4}");
    }
    Ok(())
}
