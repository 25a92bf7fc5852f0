//! Primitive waveform generators.
//!
//! This module provides the leaf waveforms everything else is built from:
//! sine, square, ramp, and constant-valued delays.

mod delay;
mod ramp;
mod sine;
mod square;

pub use delay::Delay;
pub use ramp::{Direction, Ramp};
pub use sine::Sine;
pub use square::Square;
