//! Core waveform trait, repeat counts, and constant values.
//!
//! This module provides the fundamental `Waveform` trait that every signal in
//! the crate implements, along with the `Operand` type used wherever a bare
//! number can stand in for a waveform.

use crate::error::{Result, WaveformError, ensure_positive};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Common interface for all continuous-time waveforms.
///
/// A waveform is a pure function of time: `value_at()` never mutates state,
/// so it may be called repeatedly and out of order. This is what allows a
/// sampler to evaluate any set of timestamps, not just a forward stream.
///
/// The trait provides:
/// - Random-access evaluation via `value_at()`
/// - The period and repeat count that bound the waveform's active window
/// - A human-readable name used as an upload identifier
pub trait Waveform: Send + Sync {
    /// Evaluates the waveform at `time` seconds.
    ///
    /// Defined for every non-negative time. Past the end of a finite burst
    /// the waveform returns its after-burst value rather than failing.
    fn value_at(&self, time: f64) -> f64;

    /// Length of one period in seconds.
    ///
    /// Zero for constants, which have no period.
    fn period(&self) -> f64;

    /// How many times the period plays before the burst ends.
    fn repeat_count(&self) -> RepeatCount;

    /// Diagnostic label, also used as the upload identifier.
    fn name(&self) -> &str;

    /// Raw sample table for waveforms defined by stored samples.
    ///
    /// The sampling layer uploads these unchanged instead of resampling.
    fn samples(&self) -> Option<&[f64]> {
        None
    }

    /// Total active duration: `period * repeat_count`, or `None` when the
    /// waveform repeats forever.
    fn duration(&self) -> Option<f64> {
        self.repeat_count().active_duration(self.period())
    }

    /// Repetition frequency in Hz, if the waveform has a period.
    fn frequency(&self) -> Option<f64> {
        let period = self.period();
        (period > 0.0).then(|| 1.0 / period)
    }

    /// Evaluates `buffer.len()` evenly spaced points starting at `start`.
    ///
    /// Default implementation calls `value_at()` for each element.
    ///
    /// # Arguments
    ///
    /// * `start` - Time of the first point in seconds
    /// * `step` - Spacing between points in seconds
    /// * `buffer` - Mutable slice to fill with values
    fn render(&self, start: f64, step: f64, buffer: &mut [f64]) {
        for (i, value) in buffer.iter_mut().enumerate() {
            *value = self.value_at(start + i as f64 * step);
        }
    }

    /// One-line description: `name:period:count`.
    fn describe(&self) -> String {
        format!("{}:{}:{}", self.name(), self.period(), self.repeat_count())
    }
}

/// A waveform shared between several owners.
///
/// Composites and sequences hold their children through this type so the
/// same template (a symbol shape, a carrier) can appear many times without
/// being copied.
pub type SharedWaveform = Arc<dyn Waveform>;

/// Conversion into a [`SharedWaveform`].
///
/// Implemented for every concrete waveform and for `SharedWaveform` itself,
/// so constructors accept either an owned waveform or an existing share.
pub trait IntoShared {
    fn into_shared(self) -> SharedWaveform;
}

impl<W: Waveform + 'static> IntoShared for W {
    fn into_shared(self) -> SharedWaveform {
        Arc::new(self)
    }
}

impl IntoShared for SharedWaveform {
    fn into_shared(self) -> SharedWaveform {
        self
    }
}

/// Number of times a waveform's period is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatCount {
    /// A burst of a fixed number of periods
    Finite(NonZeroU32),
    /// Continuous output that never ends
    Infinite,
}

impl RepeatCount {
    /// A single period.
    pub const ONCE: RepeatCount = RepeatCount::Finite(NonZeroU32::MIN);

    /// A burst of `count` periods.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `count` is zero.
    pub fn times(count: u32) -> Result<Self> {
        NonZeroU32::new(count)
            .map(RepeatCount::Finite)
            .ok_or_else(|| WaveformError::invalid("repeat_count", "must be at least 1"))
    }

    /// Returns true if this count never ends.
    pub fn is_infinite(&self) -> bool {
        matches!(self, RepeatCount::Infinite)
    }

    /// Active duration for a given period, `None` if infinite.
    pub fn active_duration(&self, period: f64) -> Option<f64> {
        match self {
            RepeatCount::Finite(n) => Some(period * n.get() as f64),
            RepeatCount::Infinite => None,
        }
    }

    /// Time at which a burst of this count ends; infinity if it never does.
    pub fn end_time(&self, period: f64) -> f64 {
        self.active_duration(period).unwrap_or(f64::INFINITY)
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        RepeatCount::ONCE
    }
}

impl fmt::Display for RepeatCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatCount::Finite(n) => write!(f, "{n}"),
            RepeatCount::Infinite => write!(f, "inf"),
        }
    }
}

/// Period, repeat count and after-burst value shared by every periodic waveform.
///
/// `Burst` maps absolute time into the local time of one period and decides
/// when the burst is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    period: f64,
    repeat: RepeatCount,
    after: f64,
}

impl Burst {
    /// Creates a burst of `repeat` periods, each `period` seconds long.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `period` is not finite and positive.
    pub fn new(period: f64, repeat: RepeatCount) -> Result<Self> {
        Ok(Self {
            period: ensure_positive("period", period)?,
            repeat,
            after: 0.0,
        })
    }

    /// Period in seconds.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Repeat count.
    pub fn repeat(&self) -> RepeatCount {
        self.repeat
    }

    /// Value returned once the burst is over.
    pub fn after(&self) -> f64 {
        self.after
    }

    pub fn set_repeat(&mut self, repeat: RepeatCount) {
        self.repeat = repeat;
    }

    pub fn set_after(&mut self, after: f64) {
        self.after = after;
    }

    /// End of the active window.
    pub fn end(&self) -> f64 {
        self.repeat.end_time(self.period)
    }

    /// Local time within the current period, or `None` at or past the end.
    pub fn phase(&self, time: f64) -> Option<f64> {
        if time >= self.end() {
            None
        } else {
            Some(time.rem_euclid(self.period))
        }
    }

    /// Like [`Burst::phase`], but the exact end of the burst belongs to the
    /// final period and maps to local time `period`.
    pub fn phase_closed(&self, time: f64) -> Option<f64> {
        let end = self.end();
        if time > end {
            None
        } else if time == end {
            Some(self.period)
        } else {
            Some(time.rem_euclid(self.period))
        }
    }
}

/// A waveform that always returns the same value.
///
/// Constants have no period and never end. They are what bare numbers are
/// lifted into when combined with other waveforms.
///
/// # Examples
///
/// ```
/// use arbwave::{Constant, Waveform};
///
/// let half = Constant::new(0.5);
/// assert_eq!(half.value_at(0.0), 0.5);
/// assert_eq!(half.value_at(1e9), 0.5);
/// assert_eq!(half.period(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    value: f64,
    name: String,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            name: format!("{value}"),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Waveform for Constant {
    fn value_at(&self, _time: f64) -> f64 {
        self.value
    }

    fn period(&self) -> f64 {
        0.0
    }

    fn repeat_count(&self) -> RepeatCount {
        RepeatCount::Infinite
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, _start: f64, _step: f64, buffer: &mut [f64]) {
        buffer.fill(self.value);
    }
}

impl From<f64> for Constant {
    fn from(value: f64) -> Self {
        Constant::new(value)
    }
}

/// Either a bare number or a waveform, as accepted by the combinators.
///
/// Numbers are lifted into a [`Constant`] when the composite is built, so
/// `carrier * 0.5` and `carrier * Constant::new(0.5)` are the same waveform.
///
/// # Examples
///
/// ```
/// use arbwave::{Operand, Sine};
///
/// let fixed: Operand = 0.5.into();
/// let wave: Operand = Sine::new(1e-3).unwrap().into();
/// assert!(fixed.is_fixed());
/// assert!(!wave.is_fixed());
/// ```
#[derive(Clone)]
pub enum Operand {
    /// A fixed, constant value
    Fixed(f64),
    /// A waveform evaluated at each point
    Wave(SharedWaveform),
}

impl Operand {
    /// Returns true if this operand is a bare number.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Operand::Fixed(_))
    }

    /// Label used when naming the composite this operand ends up in.
    pub fn label(&self) -> String {
        match self {
            Operand::Fixed(v) => format!("{v}"),
            Operand::Wave(w) => w.name().to_string(),
        }
    }

    /// Lifts the operand into a waveform.
    pub fn into_waveform(self) -> SharedWaveform {
        match self {
            Operand::Fixed(v) => Arc::new(Constant::new(v)),
            Operand::Wave(w) => w,
        }
    }
}

impl fmt::Debug for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Operand::Wave(w) => f.debug_tuple("Wave").field(&w.describe()).finish(),
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Fixed(value)
    }
}

impl From<SharedWaveform> for Operand {
    fn from(wave: SharedWaveform) -> Self {
        Operand::Wave(wave)
    }
}

impl<W: Waveform + 'static> From<W> for Operand {
    fn from(wave: W) -> Self {
        Operand::Wave(Arc::new(wave))
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
    fn test_repeat_count_times() {
        assert_eq!(RepeatCount::times(1).unwrap(), RepeatCount::ONCE);
        assert!(RepeatCount::times(0).is_err());
    }

    #[test]
    fn test_repeat_count_duration() {
        let three = RepeatCount::times(3).unwrap();
        assert!(approx_eq(three.active_duration(2.0).unwrap(), 6.0));
        assert_eq!(RepeatCount::Infinite.active_duration(2.0), None);
        assert_eq!(RepeatCount::Infinite.end_time(2.0), f64::INFINITY);
    }

    #[test]
    fn test_repeat_count_display() {
        assert_eq!(RepeatCount::times(4).unwrap().to_string(), "4");
        assert_eq!(RepeatCount::Infinite.to_string(), "inf");
    }

    #[test]
    fn test_burst_rejects_bad_period() {
        assert!(Burst::new(0.0, RepeatCount::ONCE).is_err());
        assert!(Burst::new(-1.0, RepeatCount::ONCE).is_err());
        assert!(Burst::new(f64::NAN, RepeatCount::ONCE).is_err());
    }

    #[test]
    fn test_burst_phase_wraps() {
        let burst = Burst::new(2.0, RepeatCount::times(2).unwrap()).unwrap();
        assert!(approx_eq(burst.phase(0.5).unwrap(), 0.5));
        assert!(approx_eq(burst.phase(2.5).unwrap(), 0.5));
        assert_eq!(burst.phase(4.0), None);
        assert_eq!(burst.phase(10.0), None);
    }

    #[test]
    fn test_burst_phase_closed_end() {
        let burst = Burst::new(2.0, RepeatCount::ONCE).unwrap();
        assert!(approx_eq(burst.phase_closed(2.0).unwrap(), 2.0));
        assert_eq!(burst.phase_closed(2.0 + 1e-9), None);
    }

    #[test]
    fn test_infinite_burst_never_ends() {
        let burst = Burst::new(1.0, RepeatCount::Infinite).unwrap();
        assert!(approx_eq(burst.phase(1e6 + 0.25).unwrap(), 0.25));
    }

    #[test]
    fn test_constant() {
        let c = Constant::new(-1.0);
        assert_eq!(c.value_at(123.0), -1.0);
        assert_eq!(c.name(), "-1");
        assert_eq!(c.duration(), None);
        assert_eq!(c.frequency(), None);

        let mut buffer = [0.0; 4];
        c.render(0.0, 1.0, &mut buffer);
        assert_eq!(buffer, [-1.0; 4]);
    }

    #[test]
    fn test_operand_lifting() {
        let wave = Operand::from(2.5).into_waveform();
        assert_eq!(wave.value_at(7.0), 2.5);
        assert_eq!(wave.name(), "2.5");
    }

    #[test]
    fn test_shared_into_shared_is_identity() {
        let shared: SharedWaveform = Arc::new(Constant::new(1.0));
        let again = Arc::clone(&shared).into_shared();
        assert!(Arc::ptr_eq(&shared, &again));
    }
}
