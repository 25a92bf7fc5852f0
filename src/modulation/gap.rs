//! Gap/ASK envelope builder.
//!
//! Each bit becomes a falling ramp and a low hold, followed by an idle guard
//! made of a rising ramp and a high hold:
//!
//! ```text
//!  \__     one  (long gap)
//!  \_      zero (short gap)
//!  /--     idle
//! ```
//!
//! The result is a plain [`Sequence`] envelope in `[0, 1]`. Multiply it with
//! the carrier to get the transmitted signal.

use super::Bitstream;
use crate::error::{Result, ensure_positive};
use crate::{
    Delay, IntoShared, Ramp, RepeatCount, Sequence, SequenceBuilder, SharedWaveform, Waveform,
};
use serde::{Deserialize, Serialize};

/// Symbol timing for gap modulation, in carrier cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapConfig {
    /// Length of a `0` symbol, ramp included
    #[serde(default = "default_zero_cycles")]
    pub zero_cycles: u32,
    /// Length of a `1` symbol, ramp included
    #[serde(default = "default_one_cycles")]
    pub one_cycles: u32,
    /// Length of the idle guard after every symbol, ramp included
    #[serde(default = "default_idle_cycles")]
    pub idle_cycles: u32,
    /// Length of each ramp; zero gives hard edges
    #[serde(default = "default_transition_cycles")]
    pub transition_cycles: u32,
    /// High hold before the first symbol, in seconds
    #[serde(default)]
    pub delay: f64,
    /// How many times the whole envelope plays
    #[serde(default)]
    pub repeat: RepeatCount,
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_zero_cycles() -> u32 {
    9
}
fn default_one_cycles() -> u32 {
    15
}
fn default_idle_cycles() -> u32 {
    20
}
fn default_transition_cycles() -> u32 {
    4
}
fn default_name() -> String {
    "gapMod".to_string()
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            zero_cycles: default_zero_cycles(),
            one_cycles: default_one_cycles(),
            idle_cycles: default_idle_cycles(),
            transition_cycles: default_transition_cycles(),
            delay: 0.0,
            repeat: RepeatCount::ONCE,
            name: default_name(),
        }
    }
}

/// A ramp toward `level` over `transition` seconds, then a hold at `level`
/// for `hold` seconds.
///
/// A zero `transition` gives a hard edge. A symbol no longer than its ramp
/// leaves a non-positive hold, which [`Delay::holding`] rejects.
fn symbol(transition: f64, hold: f64, level: f64, name: &str) -> Result<SharedWaveform> {
    let mut builder = SequenceBuilder::new();
    if transition > 0.0 {
        let ramp = if level > 0.0 {
            Ramp::up(transition)?
        } else {
            Ramp::down(transition)?
        };
        builder.append(ramp);
    }
    builder.append(Delay::holding(hold, level)?).name(name);
    Ok(builder.build()?.into_shared())
}

/// Builds the gap-modulation envelope for `bits` on `carrier`'s timing.
///
/// The symbol templates are built once and shared by every bit, so the
/// envelope holds two children per bit regardless of symbol complexity.
/// A positive `delay` is rounded up to whole carrier periods and played as a
/// high hold before the first symbol.
///
/// # Errors
///
/// Returns `InvalidParameter` if the carrier has no period, a symbol is not
/// longer than its ramp, or `bits` is empty.
///
/// # Examples
///
/// ```
/// use arbwave::{Bitstream, GapConfig, Sine, Waveform, gap_modulate};
///
/// let carrier = Sine::carrier(Sine::LF).unwrap();
/// let env = gap_modulate(&carrier, &Bitstream::from_bits(&[1, 0]), &GapConfig::default()).unwrap();
///
/// // one (15) + idle (20) + zero (9) + idle (20) carrier periods
/// assert!((env.period() - 64.0 / Sine::LF).abs() < 1e-12);
/// assert_eq!(env.value_at(0.0), 1.0);
/// ```
pub fn gap_modulate(
    carrier: &dyn Waveform,
    bits: &Bitstream,
    config: &GapConfig,
) -> Result<Sequence> {
    let cycle = ensure_positive("carrier period", carrier.period())?;
    let t_transition = f64::from(config.transition_cycles) * cycle;
    let t_zero = f64::from(config.zero_cycles) * cycle;
    let t_one = f64::from(config.one_cycles) * cycle;
    let t_idle = f64::from(config.idle_cycles) * cycle;

    let zero = symbol(t_transition, t_zero - t_transition, 0.0, "zero")?;
    let one = symbol(t_transition, t_one - t_transition, 0.0, "one")?;
    let idle = symbol(t_transition, t_idle - t_transition, 1.0, "idle")?;

    let mut builder = SequenceBuilder::new();
    if config.delay > 0.0 {
        let lead = (config.delay / cycle).ceil() * cycle;
        builder.append(Delay::holding(lead, 1.0)?.with_name("lead"));
    }
    for bit in bits.iter() {
        builder.append(if bit { one.clone() } else { zero.clone() });
        builder.append(idle.clone());
    }
    builder.repeat(config.repeat).name(config.name.clone());

    log::debug!(
        "gap envelope '{}': {} bits, {} children",
        config.name,
        bits.len(),
        builder.len()
    );
    builder.build()
}
