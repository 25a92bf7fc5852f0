//! Amplitude-shift modulation of a carrier by a bitstream.
//!
//! One bit occupies one carrier period. The slot for time `t` is
//! `floor((t mod period) / carrier_period)`, where `period` is the carrier
//! period times the number of bits.
//!
//! Two modes are fixed at construction:
//! - `NonDestructive`: a set bit passes the carrier scaled by `1 - m`, a
//!   clear bit passes it unchanged. The result is transmitted on its own.
//! - `Destructive`: the carrier is inverted first; a set bit passes the
//!   inverted carrier scaled by `m`, a clear bit is silent. Summed with an
//!   unmodified carrier, this cuts dips of depth `m` into it.

use super::{Bitstream, UartConfig, encode_uart};
use crate::error::{Result, WaveformError, ensure_positive, ensure_unit_open};
use crate::{Burst, IntoShared, RepeatCount, SharedWaveform, Waveform, combine_product};
use serde::{Deserialize, Serialize};

/// How set and clear bits act on the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftMode {
    /// Scales the carrier down on set bits
    #[default]
    NonDestructive,
    /// Emits an inverted, scaled carrier on set bits for cancellation
    Destructive,
}

/// Amplitude-shift modulation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftConfig {
    /// Modulation index, strictly between 0 and 1
    #[serde(default = "default_mod_index")]
    pub mod_index: f64,
    /// Modulation mode
    #[serde(default)]
    pub mode: ShiftMode,
    /// How many times the whole bitstream plays
    #[serde(default)]
    pub repeat: RepeatCount,
    /// Upload identifier
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_mod_index() -> f64 {
    0.5
}
fn default_name() -> String {
    "mod".to_string()
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            mod_index: default_mod_index(),
            mode: ShiftMode::NonDestructive,
            repeat: RepeatCount::ONCE,
            name: default_name(),
        }
    }
}

impl ShiftConfig {
    /// Default options in destructive mode.
    pub fn destructive() -> Self {
        Self {
            mode: ShiftMode::Destructive,
            ..Self::default()
        }
    }
}

/// A carrier amplitude-modulated by a bitstream.
///
/// # Examples
///
/// ```
/// use arbwave::{AmplitudeShift, Bitstream, Delay, RepeatCount, ShiftConfig, Waveform};
///
/// let carrier = Delay::holding(1.0, 1.0).unwrap().with_repeat(RepeatCount::Infinite);
/// let bits = Bitstream::from_bits(&[1, 0]);
/// let ask = AmplitudeShift::new(carrier, bits, &ShiftConfig::default()).unwrap();
///
/// assert_eq!(ask.value_at(0.5), 0.5);
/// assert_eq!(ask.value_at(1.5), 1.0);
/// ```
pub struct AmplitudeShift {
    /// Carrier as evaluated; already inverted in destructive mode
    carrier: SharedWaveform,
    bits: Bitstream,
    mod_index: f64,
    mode: ShiftMode,
    slot: f64,
    burst: Burst,
    name: String,
}

impl AmplitudeShift {
    /// Modulates `carrier` with `bits`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the carrier has no period, the bitstream
    /// is empty, or the modulation index is outside (0.0, 1.0).
    pub fn new(carrier: impl IntoShared, bits: Bitstream, config: &ShiftConfig) -> Result<Self> {
        let carrier = carrier.into_shared();
        let mod_index = ensure_unit_open("mod_index", config.mod_index)?;
        let slot = ensure_positive("carrier period", carrier.period())?;
        if bits.is_empty() {
            return Err(WaveformError::invalid(
                "bitstream",
                "nothing to modulate, bitstream is empty",
            ));
        }

        let carrier = match config.mode {
            ShiftMode::NonDestructive => carrier,
            ShiftMode::Destructive => {
                combine_product([carrier.into(), (-1.0).into()])?.into_shared()
            }
        };
        let burst = Burst::new(slot * bits.len() as f64, config.repeat)?;

        log::debug!(
            "amplitude shift '{}': {} bits, m={}, {:?}, period {}",
            config.name,
            bits.len(),
            mod_index,
            config.mode,
            burst.period()
        );

        Ok(Self {
            carrier,
            bits,
            mod_index,
            mode: config.mode,
            slot,
            burst,
            name: config.name.clone(),
        })
    }

    /// Frames `data` as UART and modulates `carrier` with the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbwave::{AmplitudeShift, ShiftConfig, Sine, UartConfig, Waveform};
    ///
    /// let carrier = Sine::carrier(Sine::LF).unwrap();
    /// let ask = AmplitudeShift::uart(carrier, b"uart", &UartConfig::default(), &ShiftConfig::destructive()).unwrap();
    /// assert_eq!(ask.bits().len(), 4 * 11);
    /// ```
    pub fn uart(
        carrier: impl IntoShared,
        data: &[u8],
        uart: &UartConfig,
        config: &ShiftConfig,
    ) -> Result<Self> {
        let carrier = carrier.into_shared();
        let bits = encode_uart(data, carrier.period(), uart);
        Self::new(carrier, bits, config)
    }

    pub fn bits(&self) -> &Bitstream {
        &self.bits
    }

    pub fn mode(&self) -> ShiftMode {
        self.mode
    }

    pub fn mod_index(&self) -> f64 {
        self.mod_index
    }

    /// The carrier as evaluated, inverted in destructive mode.
    pub fn carrier(&self) -> &SharedWaveform {
        &self.carrier
    }

    /// Modulated value at local time `local` within one pass of the bitstream.
    fn modulate(&self, local: f64) -> f64 {
        let index = (local / self.slot).floor().max(0.0) as usize;
        let index = if index >= self.bits.len() {
            log::warn!("slot {index} past end of {} bits, clamping", self.bits.len());
            self.bits.len() - 1
        } else {
            index
        };
        let set = self.bits.get(index).unwrap_or(false);

        match (self.mode, set) {
            (ShiftMode::NonDestructive, true) => {
                self.carrier.value_at(local) * (1.0 - self.mod_index)
            }
            (ShiftMode::NonDestructive, false) => self.carrier.value_at(local),
            (ShiftMode::Destructive, true) => self.carrier.value_at(local) * self.mod_index,
            (ShiftMode::Destructive, false) => 0.0,
        }
    }
}

impl Waveform for AmplitudeShift {
    fn value_at(&self, time: f64) -> f64 {
        match self.burst.phase(time) {
            Some(local) => self.modulate(local),
            None => match self.mode {
                ShiftMode::NonDestructive => self.carrier.value_at(time),
                ShiftMode::Destructive => 0.0,
            },
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
    use crate::{Delay, Sine, combine_sum};

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn flat_carrier(value: f64) -> Delay {
        Delay::holding(1.0, value)
            .unwrap()
            .with_repeat(RepeatCount::Infinite)
    }

    #[test]
    fn test_non_destructive_slots() {
        let ask = AmplitudeShift::new(
            flat_carrier(1.0),
            Bitstream::from_bits(&[1, 0]),
            &ShiftConfig::default(),
        )
        .unwrap();
        assert_eq!(ask.period(), 2.0);
        assert_eq!(ask.value_at(0.5), 0.5);
        assert_eq!(ask.value_at(1.5), 1.0);
    }

    #[test]
    fn test_destructive_slots() {
        let ask = AmplitudeShift::new(
            flat_carrier(-1.0),
            Bitstream::from_bits(&[1, 0]),
            &ShiftConfig::destructive(),
        )
        .unwrap();
        assert_eq!(ask.value_at(0.5), 0.5);
        assert_eq!(ask.value_at(1.5), 0.0);
        assert_eq!(ask.carrier().name(), "(delay*-1)");
    }

    #[test]
    fn test_after_burst_defaults() {
        let bits = Bitstream::from_bits(&[1, 1]);
        let plain = AmplitudeShift::new(flat_carrier(0.75), bits.clone(), &ShiftConfig::default())
            .unwrap();
        let destructive =
            AmplitudeShift::new(flat_carrier(0.75), bits, &ShiftConfig::destructive()).unwrap();

        // Past the burst the plain variant falls back to the raw carrier
        assert_eq!(plain.value_at(2.0), 0.75);
        assert_eq!(plain.value_at(50.0), 0.75);
        assert_eq!(destructive.value_at(2.0), 0.0);
    }

    #[test]
    fn test_destructive_sum_cuts_dips() {
        let carrier = Sine::carrier(1000.0).unwrap().with_name("c").into_shared();
        let config = ShiftConfig {
            mod_index: 0.2,
            ..ShiftConfig::destructive()
        };
        let ask = AmplitudeShift::new(
            carrier.clone(),
            Bitstream::from_bits(&[1, 0, 1]),
            &config,
        )
        .unwrap();
        let combined = combine_sum([carrier.clone().into(), ask.into()]).unwrap();

        let peak = 0.25e-3;
        // Set bit: carrier reduced to 80%
        assert!(approx_eq(combined.value_at(peak), 0.8));
        // Clear bit: carrier untouched
        assert!(approx_eq(combined.value_at(1e-3 + peak), 1.0));
        // After the burst: carrier untouched
        assert!(approx_eq(combined.value_at(5e-3 + peak), 1.0));
    }

    #[test]
    fn test_default_plays_once_unless_endless() {
        assert_eq!(ShiftConfig::default().repeat, RepeatCount::ONCE);

        let bits = Bitstream::from_bits(&[1, 0]);
        let once = AmplitudeShift::new(flat_carrier(1.0), bits.clone(), &ShiftConfig::default())
            .unwrap();
        let endless = ShiftConfig {
            repeat: RepeatCount::Infinite,
            ..ShiftConfig::default()
        };
        let endless = AmplitudeShift::new(flat_carrier(1.0), bits, &endless).unwrap();

        // Past the first pass only the endless variant keeps modulating
        assert_eq!(once.value_at(100.5), 1.0);
        assert_eq!(endless.value_at(100.5), 0.5);
    }

    #[test]
    fn test_repeat_wraps_bitstream() {
        let config = ShiftConfig {
            repeat: RepeatCount::times(2).unwrap(),
            ..ShiftConfig::default()
        };
        let ask =
            AmplitudeShift::new(flat_carrier(1.0), Bitstream::from_bits(&[1, 0]), &config).unwrap();
        assert_eq!(ask.value_at(2.5), 0.5);
        assert_eq!(ask.value_at(3.5), 1.0);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let bits = Bitstream::from_bits(&[1]);
        let bad_index = ShiftConfig {
            mod_index: 1.0,
            ..ShiftConfig::default()
        };
        assert!(AmplitudeShift::new(flat_carrier(1.0), bits.clone(), &bad_index).is_err());
        let defaults = ShiftConfig::default();
        assert!(AmplitudeShift::new(flat_carrier(1.0), Bitstream::new(), &defaults).is_err());
        assert!(AmplitudeShift::new(crate::Constant::new(1.0), bits, &defaults).is_err());
    }

    #[test]
    fn test_uart_uses_carrier_period() {
        let uart = UartConfig {
            delay: 2.0,
            ..UartConfig::default()
        };
        let ask = AmplitudeShift::uart(flat_carrier(1.0), &[0x01], &uart, &ShiftConfig::default())
            .unwrap();
        assert_eq!(ask.bits().to_string(), "0010111111100");
        assert_eq!(ask.period(), 13.0);
        // Idle slot: clear bit passes the carrier
        assert_eq!(ask.value_at(0.5), 1.0);
        // Start bit: set, scaled down
        assert_eq!(ask.value_at(2.5), 0.5);
    }
}
