//! Constant-valued hold for a fixed duration.

use crate::error::Result;
use crate::{Burst, RepeatCount, Waveform};

/// Holds a constant value for `period` seconds.
///
/// Unlike [`crate::Constant`] a delay has a period, so it can take up time
/// inside a [`crate::Sequence`].
#[derive(Debug, Clone, PartialEq)]
pub struct Delay {
    burst: Burst,
    value: f64,
    name: String,
}

impl Delay {
    /// Creates a delay of `period` seconds holding zero.
    pub fn new(period: f64) -> Result<Self> {
        Self::holding(period, 0.0)
    }

    /// Creates a delay of `period` seconds holding `value`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `period` is not finite and positive.
    pub fn holding(period: f64, value: f64) -> Result<Self> {
        Ok(Self {
            burst: Burst::new(period, RepeatCount::ONCE)?,
            value,
            name: "delay".to_string(),
        })
    }

    /// Builder-style method to set the repeat count.
    pub fn with_repeat(mut self, repeat: RepeatCount) -> Self {
        self.burst.set_repeat(repeat);
        self
    }

    /// Builder-style method to set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Waveform for Delay {
    fn value_at(&self, time: f64) -> f64 {
        match self.burst.phase(time) {
            Some(_) => self.value,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_value() {
        let hold = Delay::holding(2.0, 0.75).unwrap();
        assert_eq!(hold.value_at(0.0), 0.75);
        assert_eq!(hold.value_at(1.999), 0.75);
        assert_eq!(hold.value_at(2.0), 0.0);
    }

    #[test]
    fn test_default_is_silence() {
        let delay = Delay::new(1.0).unwrap();
        assert_eq!(delay.value_at(0.5), 0.0);
        assert_eq!(delay.value(), 0.0);
    }

    #[test]
    fn test_rejects_zero_period() {
        assert!(Delay::new(0.0).is_err());
        assert!(Delay::holding(-1.0, 1.0).is_err());
    }

    #[test]
    fn test_infinite_hold_as_carrier() {
        let hold = Delay::holding(1.0, 1.0)
            .unwrap()
            .with_repeat(RepeatCount::Infinite);
        assert_eq!(hold.value_at(1e6), 1.0);
    }
}
