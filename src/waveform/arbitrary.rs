//! Arbitrary-sample waveform with linear interpolation.
//!
//! # Design Overview
//!
//! `Arbitrary` stores one period of a waveform as an ordered table of samples
//! spread evenly over the period, first sample at time zero and last sample at
//! the end of the period. Any time in between is answered by linear
//! interpolation between the two bracketing samples.
//!
//! ## Sample Spacing
//!
//! With `n` samples over a period `P` the spacing is `P / (n - 1)`, so the
//! table closes on its final sample rather than wrapping back to the first.
//! A two-sample table is a straight line, which is how ramps are built.
//!
//! ## Edges
//!
//! - A query at exactly the end of the burst clamps to the last sample
//! - A query past the end of the burst returns the after-burst value
//!
//! ## Example Usage
//!
//! ```
//! use arbwave::{Arbitrary, Waveform};
//!
//! let tri = Arbitrary::new(4e-3, vec![0.0, 1.0, 0.0, -1.0, 0.0]).unwrap();
//! assert_eq!(tri.value_at(1e-3), 1.0);
//! assert!((tri.value_at(0.5e-3) - 0.5).abs() < 1e-12);
//! ```

use super::core::{Burst, RepeatCount, Waveform};
use crate::error::{Result, WaveformError};

#[cfg(feature = "wav")]
use std::path::Path;

/// A waveform defined by a table of evenly spaced samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Arbitrary {
    /// One period of samples, first at t = 0, last at t = period
    samples: Vec<f64>,
    burst: Burst,
    name: String,
}

impl Arbitrary {
    /// Creates an arbitrary waveform playing `samples` once over `period` seconds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if fewer than two samples are given or the
    /// period is not finite and positive.
    pub fn new(period: f64, samples: Vec<f64>) -> Result<Self> {
        if samples.len() < 2 {
            return Err(WaveformError::invalid(
                "samples",
                format!("need at least 2 samples, got {}", samples.len()),
            ));
        }
        Ok(Self {
            samples,
            burst: Burst::new(period, RepeatCount::ONCE)?,
            name: "arb".to_string(),
        })
    }

    /// Creates an arbitrary waveform by sampling a function over one period.
    ///
    /// The function maps normalized phase (0.0 to 1.0, both ends included) to
    /// amplitude.
    ///
    /// # Arguments
    ///
    /// * `period` - Period in seconds
    /// * `points` - Number of samples in the table
    /// * `f` - Function mapping phase to amplitude
    ///
    /// # Examples
    ///
    /// ```
    /// use arbwave::{Arbitrary, Waveform};
    ///
    /// let saw = Arbitrary::from_function(1e-3, 64, |phase| 2.0 * phase - 1.0).unwrap();
    /// assert_eq!(saw.value_at(0.0), -1.0);
    /// ```
    pub fn from_function<F>(period: f64, points: usize, f: F) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        if points < 2 {
            return Err(WaveformError::invalid(
                "points",
                format!("need at least 2 points, got {points}"),
            ));
        }
        let last = (points - 1) as f64;
        let samples = (0..points).map(|i| f(i as f64 / last)).collect();
        Self::new(period, samples)
    }

    /// A table holding `value` for the whole period.
    pub fn flat(period: f64, value: f64) -> Result<Self> {
        Self::new(period, vec![value, value])
    }

    /// Loads one period of samples from a WAV file (requires `wav` feature).
    ///
    /// Reads the first channel of the file. Integer samples are scaled to
    /// [-1.0, 1.0]; float samples are used as-is.
    ///
    /// # Arguments
    ///
    /// * `period` - Period in seconds the file's samples are spread over
    /// * `path` - Path to the WAV file
    #[cfg(feature = "wav")]
    pub fn from_wav_file<P: AsRef<Path>>(period: f64, path: P) -> Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples: std::result::Result<Vec<f64>, _> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(|v| v as f64))
                .collect(),
            hound::SampleFormat::Int => {
                let max_value = (1_i64 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / max_value))
                    .collect()
            }
        };
        let samples = samples?;

        // Multi-channel files keep only the first channel
        let channel_samples: Vec<f64> = if spec.channels > 1 {
            samples
                .iter()
                .step_by(spec.channels as usize)
                .copied()
                .collect()
        } else {
            samples
        };

        log::debug!(
            "loaded {} samples from WAV ({} Hz, {} ch)",
            channel_samples.len(),
            spec.sample_rate,
            spec.channels
        );
        Self::new(period, channel_samples)
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

    /// Number of samples in the table.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; construction guarantees at least two samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time between neighbouring samples.
    pub fn step(&self) -> f64 {
        self.burst.period() / (self.samples.len() - 1) as f64
    }

    /// Interpolates the table at local time `local` within one period.
    #[inline]
    fn interpolate(&self, local: f64) -> f64 {
        let step = self.step();
        let last_segment = self.samples.len() - 2;
        let index = ((local / step).floor().max(0.0) as usize).min(last_segment);

        let x0 = index as f64 * step;
        let y0 = self.samples[index];
        let y1 = self.samples[index + 1];

        y0 + (local - x0) * (y1 - y0) / step
    }
}

impl Waveform for Arbitrary {
    fn value_at(&self, time: f64) -> f64 {
        match self.burst.phase_closed(time) {
            Some(local) => self.interpolate(local),
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

    fn samples(&self) -> Option<&[f64]> {
        Some(&self.samples)
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
    fn test_rejects_short_table() {
        assert!(Arbitrary::new(1.0, vec![]).is_err());
        assert!(Arbitrary::new(1.0, vec![1.0]).is_err());
        assert!(Arbitrary::new(0.0, vec![0.0, 1.0]).is_err());
    }

    #[test]
    fn test_two_point_line() {
        let line = Arbitrary::new(2.0, vec![1.0, 3.0]).unwrap();
        assert_eq!(line.value_at(0.0), 1.0);
        assert!(approx_eq(line.value_at(1.0), 2.0));
        assert!(approx_eq(line.value_at(0.5), 1.5));
        assert!(approx_eq(line.value_at(2.0), 3.0));
    }

    #[test]
    fn test_hits_every_sample() {
        let samples = vec![0.0, 0.25, -0.5, 1.0, 0.75];
        let arb = Arbitrary::new(1.0, samples.clone()).unwrap();
        for (i, &s) in samples.iter().enumerate() {
            assert!(approx_eq(arb.value_at(i as f64 * arb.step()), s));
        }
    }

    #[test]
    fn test_after_burst_value() {
        let arb = Arbitrary::new(1.0, vec![0.0, 1.0]).unwrap().with_after(0.25);
        assert_eq!(arb.value_at(1.5), 0.25);

        let zero = Arbitrary::new(1.0, vec![0.0, 1.0]).unwrap();
        assert_eq!(zero.value_at(1.5), 0.0);
    }

    #[test]
    fn test_repeats_wrap() {
        let arb = Arbitrary::new(1.0, vec![0.0, 1.0])
            .unwrap()
            .with_repeat(RepeatCount::times(3).unwrap());
        assert!(approx_eq(arb.value_at(1.25), 0.25));
        assert!(approx_eq(arb.value_at(2.5), 0.5));
        assert!(approx_eq(arb.value_at(3.0), 1.0));
        assert_eq!(arb.value_at(3.1), 0.0);
    }

    #[test]
    fn test_from_function_spans_whole_period() {
        let arb = Arbitrary::from_function(1.0, 5, |phase| phase).unwrap();
        assert_eq!(arb.samples().unwrap(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(Arbitrary::from_function(1.0, 1, |p| p).is_err());
    }

    #[test]
    fn test_flat() {
        let hold = Arbitrary::flat(1e-3, 1.0).unwrap();
        assert_eq!(hold.value_at(0.0), 1.0);
        assert_eq!(hold.value_at(0.7e-3), 1.0);
    }
}
