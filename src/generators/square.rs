//! Square wave generator.

use crate::error::{Result, ensure_unit_open};
use crate::{Burst, RepeatCount, Waveform};

/// A bipolar pulse: `1.0` for the first `duty` fraction of each period,
/// `-1.0` for the rest.
///
/// Repeats forever unless a repeat count is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    burst: Burst,
    duty: f64,
    name: String,
}

impl Square {
    /// Creates a square wave.
    ///
    /// # Arguments
    ///
    /// * `period` - Period in seconds
    /// * `duty` - Fraction of the period spent high, strictly between 0 and 1
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the period is not positive or the duty
    /// cycle is outside (0.0, 1.0).
    pub fn new(period: f64, duty: f64) -> Result<Self> {
        Ok(Self {
            burst: Burst::new(period, RepeatCount::Infinite)?,
            duty: ensure_unit_open("duty", duty)?,
            name: "square".to_string(),
        })
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

    pub fn duty(&self) -> f64 {
        self.duty
    }
}

impl Waveform for Square {
    fn value_at(&self, time: f64) -> f64 {
        match self.burst.phase(time) {
            Some(local) if local < self.burst.period() * self.duty => 1.0,
            Some(_) => -1.0,
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

    fn describe(&self) -> String {
        format!(
            "{}:{}:{}:duty={}",
            self.name,
            self.burst.period(),
            self.burst.repeat(),
            self.duty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_bounds() {
        assert!(Square::new(1.0, 0.0).is_err());
        assert!(Square::new(1.0, 1.0).is_err());
        assert!(Square::new(1.0, -0.1).is_err());
        assert!(Square::new(1.0, 0.25).is_ok());
    }

    #[test]
    fn test_waveform_shape_50_percent() {
        let square = Square::new(1.0, 0.5).unwrap();
        let mut high_count = 0;
        let mut low_count = 0;
        for i in 0..1000 {
            let sample = square.value_at(i as f64 / 1000.0);
            if sample == 1.0 {
                high_count += 1;
            } else {
                low_count += 1;
            }
        }
        assert_eq!(high_count, 500);
        assert_eq!(low_count, 500);
    }

    #[test]
    fn test_quarter_duty() {
        let square = Square::new(4.0, 0.25).unwrap();
        assert_eq!(square.value_at(0.5), 1.0);
        assert_eq!(square.value_at(1.5), -1.0);
        assert_eq!(square.value_at(4.5), 1.0);
    }

    #[test]
    fn test_finite_burst() {
        let square = Square::new(1.0, 0.5)
            .unwrap()
            .with_repeat(RepeatCount::times(2).unwrap());
        assert_eq!(square.value_at(1.25), 1.0);
        assert_eq!(square.value_at(2.25), 0.0);
    }

    #[test]
    fn test_describe_includes_duty() {
        let square = Square::new(1.0, 0.5).unwrap();
        assert_eq!(square.describe(), "square:1:inf:duty=0.5");
    }
}
