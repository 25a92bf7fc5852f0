//! Arbwave - composable waveform synthesis for arbitrary signal generators
//!
//! This library models periodic signals as pure functions of time that can be
//! summed, multiplied, sequenced and modulated with bitstreams, then sampled
//! and quantized into buffers for upload to an instrument.

pub mod combinators;
#[cfg(feature = "modulation")]
pub mod config;
pub mod error;
pub mod generators;
#[cfg(feature = "modulation")]
pub mod modulation;
pub mod sampling;
pub mod sequence;
pub mod waveform;

// Re-export commonly used types at the crate root
pub use combinators::{Combine, CombineOp, WaveformExt, combine_product, combine_sum};
#[cfg(feature = "modulation")]
pub use config::{EncodingProfile, Scheme};
pub use error::{Result, WaveformError};
pub use generators::{Delay, Direction, Ramp, Sine, Square};
#[cfg(feature = "modulation")]
pub use modulation::{
    AmplitudeShift, Bitstream, GapConfig, Parity, ShiftConfig, ShiftMode, UartConfig,
    encode_uart, gap_modulate,
};
pub use sampling::{
    Playback, SampleMode, UploadBuffer, normalize, playback_duration, quantize, sample,
    validate_name,
};
pub use sequence::{Sequence, SequenceBuilder};
pub use waveform::{
    Arbitrary, Burst, Constant, IntoShared, Operand, RepeatCount, SharedWaveform, Waveform,
};

#[cfg(feature = "macros")]
pub use arbwave_macros::{bits, wave_name};
