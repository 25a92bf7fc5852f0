//! Encodes a few bytes as a destructive UART burst on a 125 kHz carrier and
//! writes the upload buffer to a WAV file for inspection.
//!
//! Run with `cargo run --example uart_burst --features wav`.

use anyhow::Result;
use arbwave::{
    AmplitudeShift, IntoShared, Parity, SampleMode, ShiftConfig, Sine, UartConfig, UploadBuffer,
    Waveform, combine_sum,
};

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

fn main() -> Result<()> {
    init_logger();

    let carrier = Sine::carrier(Sine::LF)?.into_shared();
    let uart = UartConfig {
        parity: Parity::Even,
        delay: 40e-6,
        ..UartConfig::default()
    };
    let shift = ShiftConfig {
        mod_index: 0.2,
        name: "uartMod".to_string(),
        ..ShiftConfig::destructive()
    };

    let payload = b"RFID";
    let ask = AmplitudeShift::uart(carrier.clone(), payload, &uart, &shift)?;
    log::info!("bits: {}", ask.bits());

    // Summing the cancellation signal with the carrier cuts the dips in
    let burst = combine_sum([carrier.into(), ask.into()])?.with_name("uartBurst");
    let buffer = UploadBuffer::render(&burst, SampleMode::Tarb)?;
    log::info!(
        "{} -> {} ({:.0} S/s)",
        buffer,
        buffer.identifier(),
        buffer.sample_rate()
    );

    for i in 0..8 {
        let t = i as f64 * burst.period() / 8.0;
        println!("{:>12.9} {:+.4}", t, burst.value_at(t));
    }

    let path = "uart_burst.wav";
    buffer.write_wav(path, 48_000)?;
    log::info!("wrote {path}");
    Ok(())
}
