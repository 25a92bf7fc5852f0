//! Sampling and quantization of waveforms into upload buffers.
//!
//! This is the boundary with the instrument layer. A waveform is walked over
//! its playback duration at a fixed number of points, normalized to
//! `[-1.0, 1.0]` by its peak magnitude, and scaled into signed 16-bit values.
//!
//! Two buffer modes are supported:
//! - **DDS**: a fixed 16384-point table replayed at any rate
//! - **TARB**: one point per tick of a 75 MS/s clock, capped at 8M points
//!
//! Waveforms defined by a sample table upload that table unchanged.

use crate::error::{Result, WaveformError, ensure_positive};
use crate::{Arbitrary, RepeatCount, Waveform};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "wav")]
use std::path::Path;

/// Points in a DDS table.
pub const DDS_POINTS: usize = 16_384;

/// TARB sample clock in samples per second.
pub const TARB_SAMPLE_RATE: f64 = 75e6;

/// Largest TARB buffer the instrument accepts.
pub const TARB_MAX_POINTS: usize = 8_000_000;

/// Characters the instrument protocol uses as separators.
pub const RESERVED_CHARS: [char; 6] = ['.', '_', ':', '-', '*', '+'];

/// Evaluates `points` evenly spaced values over `[start, end)`.
///
/// The end point itself is not sampled.
///
/// # Examples
///
/// ```
/// use arbwave::{Ramp, sample};
///
/// let ramp = Ramp::up(1.0).unwrap();
/// assert_eq!(sample(&ramp, 4, 0.0, 1.0), vec![0.0, 0.25, 0.5, 0.75]);
/// ```
pub fn sample(wave: &dyn Waveform, points: usize, start: f64, end: f64) -> Vec<f64> {
    let mut buffer = vec![0.0; points];
    if points > 0 {
        let step = (end - start) / points as f64;
        log::trace!("sampling '{}': {points} points from {start}s, step {step}s", wave.name());
        wave.render(start, step, &mut buffer);
    }
    buffer
}

/// Scales `values` so the largest magnitude becomes 1.0.
///
/// A buffer whose peak is zero comes back as all zeros.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let peak = values.iter().fold(0.0_f64, |peak, v| peak.max(v.abs()));
    if peak == 0.0 {
        if !values.is_empty() {
            log::warn!("normalizing a flat zero buffer of {} points", values.len());
        }
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / peak).collect()
}

/// Normalizes `values` and scales them to signed 16-bit full scale.
///
/// Values are truncated toward zero, so full scale is `±32767`.
///
/// # Examples
///
/// ```
/// use arbwave::quantize;
///
/// assert_eq!(quantize(&[0.0, 2.0, -1.0]), vec![0, 32767, -16383]);
/// assert_eq!(quantize(&[0.0, 0.0]), vec![0, 0]);
/// ```
pub fn quantize(values: &[f64]) -> Vec<i16> {
    normalize(values)
        .into_iter()
        .map(|v| (v * f64::from(i16::MAX)) as i16)
        .collect()
}

/// Time span an upload of `wave` covers.
///
/// A finite burst covers `period * repeat_count`; an endless waveform covers a
/// single period, which the instrument then loops.
///
/// # Errors
///
/// Returns `InvalidParameter` for waveforms without a period, such as bare
/// constants.
pub fn playback_duration(wave: &dyn Waveform) -> Result<f64> {
    let period = ensure_positive("period", wave.period())?;
    Ok(wave.duration().unwrap_or(period))
}

/// How a waveform is laid out in instrument memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleMode {
    /// Fixed-length table replayed by direct digital synthesis
    #[default]
    Dds,
    /// True arbitrary mode, one point per sample clock tick
    Tarb,
}

impl SampleMode {
    /// Number of points needed to cover `duration` seconds in this mode.
    ///
    /// # Errors
    ///
    /// Returns `BufferTooLarge` if a TARB buffer would exceed
    /// [`TARB_MAX_POINTS`].
    pub fn points(&self, duration: f64) -> Result<usize> {
        match self {
            SampleMode::Dds => Ok(DDS_POINTS),
            SampleMode::Tarb => {
                let points = (duration * TARB_SAMPLE_RATE).round() as usize;
                if points > TARB_MAX_POINTS {
                    return Err(WaveformError::BufferTooLarge {
                        points,
                        limit: TARB_MAX_POINTS,
                    });
                }
                Ok(points)
            }
        }
    }

    /// Mode implied by a buffer's length: anything longer than a DDS table is TARB.
    pub fn for_len(len: usize) -> Self {
        if len > DDS_POINTS {
            SampleMode::Tarb
        } else {
            SampleMode::Dds
        }
    }
}

impl fmt::Display for SampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleMode::Dds => write!(f, "DDS"),
            SampleMode::Tarb => write!(f, "TARB"),
        }
    }
}

/// Fails if `name` is empty or contains a character reserved by the
/// instrument protocol.
///
/// # Examples
///
/// ```
/// use arbwave::validate_name;
///
/// assert!(validate_name("gapMod").is_ok());
/// assert!(validate_name("ramp_up").is_err());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(WaveformError::invalid("name", "upload name is empty"));
    }
    match name.chars().find(|c| RESERVED_CHARS.contains(c)) {
        Some(ch) => Err(WaveformError::ReservedCharacter {
            name: name.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

/// A quantized buffer ready to hand to the instrument layer.
///
/// # Examples
///
/// ```
/// use arbwave::{SampleMode, Sine, UploadBuffer};
///
/// let sine = Sine::new(1e-3).unwrap().with_name("tone");
/// let buffer = UploadBuffer::render(&sine, SampleMode::Dds).unwrap();
///
/// assert_eq!(buffer.data.len(), 16_384);
/// assert_eq!(buffer.identifier(), "tone_0_001000000");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UploadBuffer {
    pub name: String,
    /// Time span the buffer covers, in seconds
    pub period: f64,
    pub mode: SampleMode,
    pub data: Vec<i16>,
}

impl UploadBuffer {
    /// Samples and quantizes `wave` under its own name.
    ///
    /// A waveform backed by a sample table that plays once, or loops forever,
    /// uploads its table as is. Everything else is sampled over its
    /// [`playback_duration`] at the number of points `mode` calls for.
    ///
    /// # Errors
    ///
    /// Returns `ReservedCharacter` for a name with a separator in it,
    /// `InvalidParameter` for an empty name or a waveform without a period, and `BufferTooLarge` for an oversized
    /// TARB buffer.
    pub fn render(wave: &dyn Waveform, mode: SampleMode) -> Result<Self> {
        Self::render_named(wave, wave.name(), mode)
    }

    /// Like [`UploadBuffer::render`], but uploads under `name`.
    ///
    /// Composite names such as `(carrier*-1)` contain reserved characters, so
    /// composites are usually rendered this way.
    pub fn render_named(wave: &dyn Waveform, name: &str, mode: SampleMode) -> Result<Self> {
        validate_name(name)?;
        let period = playback_duration(wave)?;

        let single_pass = matches!(wave.repeat_count(), RepeatCount::Infinite)
            || wave.repeat_count() == RepeatCount::ONCE;
        let (mode, data) = match wave.samples() {
            Some(table) if single_pass => (SampleMode::for_len(table.len()), quantize(table)),
            _ => {
                let points = mode.points(period)?;
                (mode, quantize(&sample(wave, points, 0.0, period)))
            }
        };

        log::debug!(
            "rendered '{}': {} {} points over {}s",
            name,
            data.len(),
            mode,
            period
        );
        Ok(Self {
            name: name.to_string(),
            period,
            mode,
            data,
        })
    }

    /// Replaces the upload name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `name` is empty and `ReservedCharacter`
    /// if it holds a separator.
    pub fn rename(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(self)
    }

    /// Upload identifier: the name followed by the period to nine decimals,
    /// with `.` swapped for `_`.
    pub fn identifier(&self) -> String {
        let period = format!("{:.9}", self.period).replace('.', "_");
        format!("{}_{}", self.name, period)
    }

    /// Splits an identifier back into its name and period.
    ///
    /// # Errors
    ///
    /// Returns `MalformedIdentifier` if there is no separator, the name is
    /// empty, or the period does not parse.
    pub fn parse_identifier(identifier: &str) -> Result<(String, f64)> {
        let malformed = || WaveformError::MalformedIdentifier(identifier.to_string());
        let (name, period) = identifier.split_once('_').ok_or_else(malformed)?;
        if name.is_empty() {
            return Err(malformed());
        }
        let period: f64 = period.replace('_', ".").parse().map_err(|_| malformed())?;
        Ok((name.to_string(), period))
    }

    /// Rebuilds a buffer from an identifier and little-endian 16-bit data, as
    /// read back from the instrument.
    ///
    /// # Errors
    ///
    /// Returns `MalformedIdentifier` if the identifier does not parse or the
    /// data has an odd number of bytes.
    pub fn from_le_bytes(identifier: &str, bytes: &[u8]) -> Result<Self> {
        let (name, period) = Self::parse_identifier(identifier)?;
        if bytes.len() % 2 != 0 {
            return Err(WaveformError::MalformedIdentifier(format!(
                "{identifier}: odd data length {}",
                bytes.len()
            )));
        }
        let data: Vec<i16> = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(Self {
            name,
            period,
            mode: SampleMode::for_len(data.len()),
            data,
        })
    }

    /// Data as little-endian 16-bit words, the instrument's upload format.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    /// Points per second the instrument must play the buffer at.
    pub fn sample_rate(&self) -> f64 {
        self.data.len() as f64 / self.period
    }

    /// Turns the buffer back into a waveform, scaled to `[-1.0, 1.0]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the buffer holds fewer than two points.
    pub fn to_arbitrary(&self) -> Result<Arbitrary> {
        let samples = self
            .data
            .iter()
            .map(|&v| f64::from(v) / f64::from(i16::MAX))
            .collect();
        Ok(Arbitrary::new(self.period, samples)?.with_name(self.name.clone()))
    }

    /// Writes the buffer as a mono 16-bit WAV file (requires `wav` feature).
    #[cfg(feature = "wav")]
    pub fn write_wav<P: AsRef<Path>>(&self, path: P, sample_rate: u32) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &self.data {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }
}

impl fmt::Display for UploadBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.mode,
            self.data.len(),
            self.name,
            self.period
        )
    }
}

/// Streams a waveform at a fixed sample rate.
///
/// The sample rate is part of the type. Finite bursts stop at the end of
/// their active duration; endless waveforms stream forever.
///
/// # Examples
///
/// ```
/// use arbwave::{Playback, Ramp};
///
/// let ramp = Ramp::up(1.0).unwrap();
/// let samples: Vec<f64> = Playback::<4>::new(&ramp).collect();
/// assert_eq!(samples, vec![0.0, 0.25, 0.5, 0.75]);
/// ```
pub struct Playback<'a, const SAMPLE_RATE: u32> {
    wave: &'a dyn Waveform,
    index: u64,
    end: Option<f64>,
}

impl<'a, const SAMPLE_RATE: u32> Playback<'a, SAMPLE_RATE> {
    pub fn new(wave: &'a dyn Waveform) -> Self {
        Self {
            wave,
            index: 0,
            end: wave.duration(),
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        SAMPLE_RATE as f64
    }

    /// Time of the next sample.
    pub fn time(&self) -> f64 {
        self.index as f64 / self.sample_rate()
    }
}

impl<const SAMPLE_RATE: u32> Iterator for Playback<'_, SAMPLE_RATE> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let time = self.time();
        if self.end.is_some_and(|end| time >= end) {
            return None;
        }
        self.index += 1;
        Some(self.wave.value_at(time))
    }
}
