//! Linear ramp between 0 and 1.

use crate::error::Result;
use crate::{Arbitrary, RepeatCount, Waveform};

/// Direction of a [`Ramp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Rises from 0 to 1
    Up,
    /// Falls from 1 to 0
    Down,
}

/// A linear transition over one period, stored as a two-point [`Arbitrary`].
///
/// # Examples
///
/// ```
/// use arbwave::{Ramp, Waveform};
///
/// let fall = Ramp::down(4e-6).unwrap();
/// assert_eq!(fall.value_at(0.0), 1.0);
/// assert!((fall.value_at(2e-6) - 0.5).abs() < 1e-12);
/// assert_eq!(fall.value_at(4e-6), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ramp {
    table: Arbitrary,
    direction: Direction,
}

impl Ramp {
    /// Creates a ramp over `period` seconds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `period` is not finite and positive.
    pub fn new(period: f64, direction: Direction) -> Result<Self> {
        let (samples, name) = match direction {
            Direction::Up => (vec![0.0, 1.0], "rampUp"),
            Direction::Down => (vec![1.0, 0.0], "rampDown"),
        };
        Ok(Self {
            table: Arbitrary::new(period, samples)?.with_name(name),
            direction,
        })
    }

    pub fn up(period: f64) -> Result<Self> {
        Self::new(period, Direction::Up)
    }

    pub fn down(period: f64) -> Result<Self> {
        Self::new(period, Direction::Down)
    }

    /// Builder-style method to set the repeat count.
    pub fn with_repeat(mut self, repeat: RepeatCount) -> Self {
        self.table = self.table.with_repeat(repeat);
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Waveform for Ramp {
    fn value_at(&self, time: f64) -> f64 {
        self.table.value_at(time)
    }

    fn period(&self) -> f64 {
        self.table.period()
    }

    fn repeat_count(&self) -> RepeatCount {
        self.table.repeat_count()
    }

    fn name(&self) -> &str {
        self.table.name()
    }

    fn samples(&self) -> Option<&[f64]> {
        self.table.samples()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_ramp_up() {
        let ramp = Ramp::up(1.0).unwrap();
        assert_eq!(ramp.value_at(0.0), 0.0);
        assert!(approx_eq(ramp.value_at(0.25), 0.25));
        assert_eq!(ramp.value_at(1.0), 1.0);
        assert_eq!(ramp.direction(), Direction::Up);
        assert_eq!(ramp.name(), "rampUp");
    }

    #[test]
    fn test_ramp_down() {
        let ramp = Ramp::down(2.0).unwrap();
        assert_eq!(ramp.value_at(0.0), 1.0);
        assert!(approx_eq(ramp.value_at(1.5), 0.25));
        assert_eq!(ramp.samples().unwrap(), &[1.0, 0.0]);
    }

    #[test]
    fn test_rejects_zero_length() {
        assert!(Ramp::up(0.0).is_err());
    }
}
