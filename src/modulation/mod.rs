//! Bit-to-waveform encoders.
//!
//! - [`encode_uart`] frames bytes into a [`Bitstream`]
//! - [`AmplitudeShift`] scales a continuous carrier bit by bit
//! - [`gap_modulate`] builds a ramp-and-hold envelope with idle guards

mod ask;
mod bits;
mod gap;
mod uart;

pub use ask::{AmplitudeShift, ShiftConfig, ShiftMode};
pub use bits::Bitstream;
pub use gap::{GapConfig, gap_modulate};
pub use uart::{Parity, UartConfig, encode_uart};
