//! JSON-loadable encoding profiles.
//!
//! A profile describes a whole encoding job: the carrier, the modulation
//! scheme and its options, and how the result is laid out for upload.
//!
//! ```json
//! {
//!   "carrier_hz": 125000.0,
//!   "mode": "tarb",
//!   "scheme": "uart",
//!   "uart": { "parity": "even" },
//!   "shift": { "mode": "destructive", "mod_index": 0.2 }
//! }
//! ```
//!
//! Every option except `carrier_hz` and `scheme` has a default.

use crate::error::Result;
use crate::modulation::{
    AmplitudeShift, Bitstream, GapConfig, ShiftConfig, ShiftMode, UartConfig, gap_modulate,
};
use crate::sampling::{SampleMode, UploadBuffer};
use crate::{IntoShared, SharedWaveform, Sine, WaveformExt, combine_sum};
use serde::{Deserialize, Serialize};

/// Modulation scheme of a profile, tagged by `scheme`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum Scheme {
    /// UART frames amplitude-shifted onto the carrier
    Uart {
        #[serde(default)]
        uart: UartConfig,
        #[serde(default)]
        shift: ShiftConfig,
    },
    /// Gap/ASK envelope applied to the carrier, payload bytes sent MSB first
    Gap {
        #[serde(default)]
        gap: GapConfig,
    },
}

/// A complete encoding job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingProfile {
    /// Carrier frequency in Hz
    pub carrier_hz: f64,
    /// Upload layout
    #[serde(default)]
    pub mode: SampleMode,
    #[serde(flatten)]
    pub scheme: Scheme,
}

impl EncodingProfile {
    /// Parses a profile from JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbwave::{EncodingProfile, Scheme};
    ///
    /// let profile = EncodingProfile::from_json(r#"{"carrier_hz": 125e3, "scheme": "gap"}"#).unwrap();
    /// assert!(matches!(profile.scheme, Scheme::Gap { .. }));
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: EncodingProfile = serde_json::from_str(json)?;
        log::debug!("loaded profile: {profile:?}");
        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the transmitted waveform for `payload`.
    ///
    /// - UART: the amplitude-shifted carrier. In destructive mode the
    ///   cancellation signal is summed with the carrier, so the result is the
    ///   carrier with dips cut into it.
    /// - Gap: the gap envelope multiplied with the carrier.
    ///
    /// The result carries the scheme's configured name.
    pub fn build(&self, payload: &[u8]) -> Result<SharedWaveform> {
        let carrier = Sine::carrier(self.carrier_hz)?.into_shared();

        let wave = match &self.scheme {
            Scheme::Uart { uart, shift } => {
                let ask = AmplitudeShift::uart(carrier.clone(), payload, uart, shift)?;
                match shift.mode {
                    ShiftMode::NonDestructive => ask.shared(),
                    ShiftMode::Destructive => combine_sum([carrier.into(), ask.into()])?
                        .with_name(shift.name.clone())
                        .shared(),
                }
            }
            Scheme::Gap { gap } => {
                let bits = Bitstream::from_bytes_msb_first(payload);
                gap_modulate(carrier.as_ref(), &bits, gap)?
                    .multiply(carrier)
                    .with_name(gap.name.clone())
                    .shared()
            }
        };

        log::info!(
            "built '{}' for {} payload bytes, period {}s",
            wave.name(),
            payload.len(),
            wave.period()
        );
        Ok(wave)
    }

    /// Builds the waveform for `payload` and renders it for upload.
    pub fn render(&self, payload: &[u8]) -> Result<UploadBuffer> {
        let wave = self.build(payload)?;
        UploadBuffer::render(wave.as_ref(), self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Parity, Waveform};

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_parse_uart_profile() {
        let json = r#"{
            "carrier_hz": 125000.0,
            "mode": "tarb",
            "scheme": "uart",
            "uart": { "parity": "odd", "stop_bits": 1 },
            "shift": { "mode": "destructive", "mod_index": 0.2, "name": "burst" }
        }"#;
        let profile = EncodingProfile::from_json(json).unwrap();

        assert_eq!(profile.mode, SampleMode::Tarb);
        match &profile.scheme {
            Scheme::Uart { uart, shift } => {
                assert_eq!(uart.parity, Parity::Odd);
                assert_eq!(uart.stop_bits, 1);
                assert_eq!(uart.cycles_per_bit, 1);
                assert_eq!(shift.mode, ShiftMode::Destructive);
                assert_eq!(shift.name, "burst");
            }
            other => panic!("expected uart scheme, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_fill_in() {
        let json = r#"{"carrier_hz": 1000, "scheme": "gap"}"#;
        let profile = EncodingProfile::from_json(json).unwrap();
        assert_eq!(profile.mode, SampleMode::Dds);
        assert_eq!(
            profile.scheme,
            Scheme::Gap {
                gap: GapConfig::default()
            }
        );
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let json = r#"{"carrier_hz": 1000, "scheme": "fsk"}"#;
        let err = EncodingProfile::from_json(json).unwrap_err();
        assert!(matches!(err, crate::WaveformError::Config(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let profile = EncodingProfile {
            carrier_hz: 13.56e6,
            mode: SampleMode::Tarb,
            scheme: Scheme::Uart {
                uart: UartConfig::default(),
                shift: ShiftConfig::destructive(),
            },
        };
        let json = profile.to_json().unwrap();
        assert_eq!(EncodingProfile::from_json(&json).unwrap(), profile);
    }

    #[test]
    fn test_build_destructive_uart() {
        let profile = EncodingProfile {
            carrier_hz: 1000.0,
            mode: SampleMode::Dds,
            scheme: Scheme::Uart {
                uart: UartConfig::default(),
                shift: ShiftConfig::destructive(),
            },
        };
        let wave = profile.build(&[0x01]).unwrap();
        assert_eq!(wave.name(), "mod");
        assert!(approx_eq(wave.period(), 11e-3));

        // Start bit is set: the carrier peak is cut to half
        assert!(approx_eq(wave.value_at(0.25e-3), 0.5));
        // First data bit of 0x01 is clear: full carrier
        assert!(approx_eq(wave.value_at(1.25e-3), 1.0));
    }

    #[test]
    fn test_build_gap() {
        let json = r#"{"carrier_hz": 1000, "scheme": "gap"}"#;
        let profile = EncodingProfile::from_json(json).unwrap();
        let wave = profile.build(&[0x80]).unwrap();

        // 0x80 is one `1` and seven `0` symbols, each followed by an idle guard
        assert!(approx_eq(wave.period(), (15.0 + 7.0 * 9.0 + 8.0 * 20.0) * 1e-3));
        assert_eq!(wave.name(), "gapMod");
        // Mid-gap the envelope is zero
        assert_eq!(wave.value_at(10.25e-3), 0.0);

        let buffer = profile.render(&[0x80]).unwrap();
        assert_eq!(buffer.data.len(), crate::sampling::DDS_POINTS);
        assert_eq!(buffer.name, "gapMod");
    }
}
