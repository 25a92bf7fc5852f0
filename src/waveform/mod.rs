//! Waveform contract and the sample-table waveform.
//!
//! This module provides the abstractions every other part of the crate builds on:
//! - `Waveform` trait for random-access evaluation of continuous signals
//! - `RepeatCount` and `Burst` for period arithmetic and end-of-burst handling
//! - `Constant` and `Operand` for lifting bare numbers into waveforms
//! - `Arbitrary` for waveforms defined by an interpolated sample table

mod arbitrary;
mod core;

pub use arbitrary::Arbitrary;
pub use self::core::{Burst, Constant, IntoShared, Operand, RepeatCount, SharedWaveform, Waveform};
