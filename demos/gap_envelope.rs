//! Builds a gap/ASK envelope and prints a coarse view of it, then renders the
//! same job from a JSON profile.
//!
//! Run with `cargo run --example gap_envelope`.

use anyhow::Result;
use arbwave::{Bitstream, EncodingProfile, GapConfig, Playback, Sine, Waveform, gap_modulate};

const PROFILE: &str = r#"{
    "carrier_hz": 125000.0,
    "scheme": "gap",
    "gap": { "delay": 20e-6, "name": "gapDemo" }
}"#;

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

fn main() -> Result<()> {
    init_logger();

    let payload = [0xA5];
    let profile = EncodingProfile::from_json(PROFILE)?;

    let carrier = Sine::carrier(Sine::LF)?;
    let gap = GapConfig {
        delay: 20e-6,
        ..GapConfig::default()
    };
    let envelope = gap_modulate(&carrier, &Bitstream::from_bytes_msb_first(&payload), &gap)?;
    log::info!("{}", envelope.describe());

    // One point every 4 carrier cycles is enough to see the gaps
    let line: String = Playback::<31_250>::new(&envelope)
        .map(|v| if v > 0.5 { '#' } else { '_' })
        .collect();
    println!("{line}");

    let buffer = profile.render(&payload)?;
    println!("{} points as {}", buffer.data.len(), buffer.identifier());
    Ok(())
}
