//! UART framing of byte data into modulation bits.
//!
//! Each byte becomes a start bit, eight data bits least significant first,
//! an optional parity bit, and a run of stop bits. Data bits are inverted to
//! match the active-low line: a `0` data bit occupies a `1` slot.

use super::Bitstream;
use serde::{Deserialize, Serialize};

/// Parity bit appended after the data bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    /// No parity bit
    #[default]
    None,
    /// XOR of the data bits
    Even,
    /// Inverted XOR of the data bits
    Odd,
}

/// UART framing options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UartConfig {
    /// Parity mode
    #[serde(default)]
    pub parity: Parity,
    /// Number of stop bits after each byte
    #[serde(default = "default_stop_bits")]
    pub stop_bits: usize,
    /// Carrier cycles each logical bit occupies
    #[serde(default = "default_cycles_per_bit")]
    pub cycles_per_bit: usize,
    /// Idle time before the first byte, in seconds
    #[serde(default)]
    pub delay: f64,
}

fn default_stop_bits() -> usize {
    2
}
fn default_cycles_per_bit() -> usize {
    1
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            parity: Parity::None,
            stop_bits: default_stop_bits(),
            cycles_per_bit: default_cycles_per_bit(),
            delay: 0.0,
        }
    }
}

impl UartConfig {
    /// Number of idle slots that fit in the configured delay.
    ///
    /// Rounds down; a non-positive carrier period or delay gives no padding.
    pub fn idle_slots(&self, carrier_period: f64) -> usize {
        let slots = self.delay / carrier_period;
        if carrier_period > 0.0 && slots.is_finite() && slots > 0.0 {
            slots as usize
        } else {
            0
        }
    }
}

/// Frames `data` as UART bits, one entry per carrier period.
///
/// # Examples
///
/// ```
/// use arbwave::{UartConfig, encode_uart};
///
/// let bits = encode_uart(&[0x01], 8e-6, &UartConfig::default());
/// assert_eq!(bits.to_string(), "10111111100");
/// ```
pub fn encode_uart(data: &[u8], carrier_period: f64, config: &UartConfig) -> Bitstream {
    let cpb = config.cycles_per_bit;
    let mut bits = Bitstream::new();
    bits.push_repeated(false, config.idle_slots(carrier_period));

    for &byte in data {
        bits.push_repeated(true, cpb);

        let mut parity = false;
        let mut d = byte;
        for _ in 0..8 {
            let set = d & 1 == 1;
            bits.push_repeated(!set, cpb);
            parity ^= set;
            d >>= 1;
        }

        match config.parity {
            Parity::None => {}
            Parity::Even => bits.push_repeated(parity, cpb),
            Parity::Odd => bits.push_repeated(!parity, cpb),
        }

        bits.push_repeated(false, config.stop_bits * cpb);
    }

    log::debug!(
        "framed {} bytes into {} UART slots ({:?} parity, {} stop)",
        data.len(),
        bits.len(),
        config.parity,
        config.stop_bits
    );
    bits
}
