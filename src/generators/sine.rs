//! Sine wave generator.

use crate::error::Result;
use crate::{Burst, RepeatCount, Waveform};
use std::f64::consts::PI;

/// A sine wave starting at zero phase.
///
/// Sines are the usual carrier onto which data is modulated.
///
/// # Examples
///
/// ```
/// use arbwave::{Sine, Waveform};
///
/// // Low-frequency RFID carrier, repeating forever
/// let carrier = Sine::carrier(Sine::LF).unwrap();
/// assert_eq!(carrier.name(), "carrier");
/// assert!((carrier.period() - 8e-6).abs() < 1e-18);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sine {
    burst: Burst,
    name: String,
}

impl Sine {
    /// 125 kHz low-frequency RFID carrier
    pub const LF: f64 = 125e3;
    /// 13.56 MHz high-frequency RFID carrier
    pub const HF: f64 = 13.56e6;

    /// Creates a single period of a sine wave.
    ///
    /// # Arguments
    ///
    /// * `period` - Period in seconds
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `period` is not finite and positive.
    pub fn new(period: f64) -> Result<Self> {
        Ok(Self {
            burst: Burst::new(period, RepeatCount::ONCE)?,
            name: "sine".to_string(),
        })
    }

    /// Creates a continuous carrier at `frequency` Hz named `carrier`.
    pub fn carrier(frequency: f64) -> Result<Self> {
        Ok(Self::new(1.0 / frequency)?
            .with_repeat(RepeatCount::Infinite)
            .with_name("carrier"))
    }

    /// Builder-style method to set the repeat count.
    pub fn with_repeat(mut self, repeat: RepeatCount) -> Self {
        self.burst.set_repeat(repeat);
        self
    }

    /// Builder-style method to set the value returned after the burst.
    pub fn with_after(mut self, after: f64) -> Self {
        self.burst.set_after(after);
        self
    }

    /// Builder-style method to set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Waveform for Sine {
    fn value_at(&self, time: f64) -> f64 {
        match self.burst.phase(time) {
            Some(local) => (local / self.burst.period() * 2.0 * PI).sin(),
            None => self.burst.after(),
        }
    }

    fn period(&self) -> f64 {
        self.burst.period()
    }

    fn repeat_count(&self) -> RepeatCount {
        self.burst.repeat()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
