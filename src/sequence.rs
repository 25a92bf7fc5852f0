//! Piecewise concatenation of waveforms.
//!
//! A [`Sequence`] plays its children end to end, each for its own
//! `period * repeat_count`. Sequences are assembled with a
//! [`SequenceBuilder`] and are immutable once built, so nothing can append to
//! a sequence while it is being sampled.

use crate::error::{Result, WaveformError};
use crate::{Burst, IntoShared, RepeatCount, SharedWaveform, Waveform};

/// Accumulates children for a [`Sequence`].
///
/// The running total period is updated by each `append`/`prepend`, and
/// always equals the sum of the children's active durations.
///
/// # Examples
///
/// ```
/// use arbwave::{Delay, Ramp, SequenceBuilder, Waveform};
///
/// let mut builder = SequenceBuilder::new();
/// builder.append(Ramp::down(1.0).unwrap());
/// builder.append(Delay::new(2.0).unwrap());
/// let seq = builder.build().unwrap();
///
/// assert_eq!(seq.period(), 3.0);
/// assert_eq!(seq.value_at(0.0), 1.0);
/// assert_eq!(seq.value_at(3.5), 0.0);
/// ```
#[derive(Default)]
pub struct SequenceBuilder {
    children: Vec<SharedWaveform>,
    period: f64,
    repeat: RepeatCount,
    name: Option<String>,
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a waveform after the current last child.
    pub fn append(&mut self, wave: impl IntoShared) -> &mut Self {
        let wave = wave.into_shared();
        self.period += child_duration(wave.as_ref());
        self.children.push(wave);
        self
    }

    /// Adds a waveform before the current first child.
    pub fn prepend(&mut self, wave: impl IntoShared) -> &mut Self {
        let wave = wave.into_shared();
        self.period += child_duration(wave.as_ref());
        self.children.insert(0, wave);
        self
    }

    /// Sets how many times the whole sequence plays.
    pub fn repeat(&mut self, repeat: RepeatCount) -> &mut Self {
        self.repeat = repeat;
        self
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Total period accumulated so far.
    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Freezes the children into an immutable [`Sequence`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the builder is empty, a child repeats
    /// forever, or the children add up to no time at all.
    pub fn build(self) -> Result<Sequence> {
        if self.children.is_empty() {
            return Err(WaveformError::invalid(
                "children",
                "a sequence needs at least one child",
            ));
        }
        if let Some(endless) = self.children.iter().find(|c| c.repeat_count().is_infinite()) {
            return Err(WaveformError::invalid(
                "children",
                format!("child '{}' repeats forever", endless.name()),
            ));
        }

        let burst = Burst::new(self.period, self.repeat)?;
        let name = self.name.unwrap_or_else(|| "seq".to_string());
        log::debug!(
            "built sequence '{}' of {} children, period {}",
            name,
            self.children.len(),
            self.period
        );

        Ok(Sequence {
            children: self.children,
            burst,
            name,
        })
    }
}

/// Active duration of a child; infinite children are rejected at build time.
fn child_duration(wave: &dyn Waveform) -> f64 {
    wave.duration().unwrap_or(f64::INFINITY)
}

/// An immutable end-to-end concatenation of waveforms.
///
/// Evaluation walks the children in order and delegates to the first whose
/// window `[elapsed, elapsed + duration)` contains the time, passing the
/// offset into that window. Past the last child the sequence is silent.
pub struct Sequence {
    children: Vec<SharedWaveform>,
    burst: Burst,
    name: String,
}

impl Sequence {
    /// Creates a sequence playing `waves` in order, once.
    pub fn new<I, W>(waves: I) -> Result<Self>
    where
        I: IntoIterator<Item = W>,
        W: IntoShared,
    {
        let mut builder = SequenceBuilder::new();
        for wave in waves {
            builder.append(wave);
        }
        builder.build()
    }

    pub fn children(&self) -> &[SharedWaveform] {
        &self.children
    }

    /// Reopens the sequence for further appends.
    pub fn into_builder(self) -> SequenceBuilder {
        SequenceBuilder {
            children: self.children,
            period: self.burst.period(),
            repeat: self.burst.repeat(),
            name: Some(self.name),
        }
    }

    /// Finds the child playing at local time `local`, and the offset into it.
    fn locate(&self, local: f64) -> Option<(&SharedWaveform, f64)> {
        let mut elapsed = 0.0;
        for child in &self.children {
            let duration = child_duration(child.as_ref());
            if local < elapsed + duration {
                return Some((child, local - elapsed));
            }
            elapsed += duration;
        }
        None
    }
}

impl Waveform for Sequence {
    fn value_at(&self, time: f64) -> f64 {
        self.burst
            .phase(time)
            .and_then(|local| self.locate(local))
            .map_or(0.0, |(child, offset)| child.value_at(offset))
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

impl std::fmt::Debug for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequence")
            .field("name", &self.name)
            .field("period", &self.burst.period())
            .field("repeat", &self.burst.repeat())
            .field(
                "children",
                &self.children.iter().map(|c| c.describe()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
