//! Bit sequences consumed by the modulation encoders.

use std::fmt;

/// An ordered sequence of logical bits, one per modulation slot.
///
/// # Examples
///
/// ```
/// use arbwave::Bitstream;
///
/// let bits = Bitstream::from_bytes_msb_first(&[0xA0]);
/// assert_eq!(bits.to_string(), "10100000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitstream {
    bits: Vec<bool>,
}

impl Bitstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bitstream from `0`/`1` values; any non-zero value is a one.
    pub fn from_bits(bits: &[u8]) -> Self {
        bits.iter().map(|&b| b != 0).collect()
    }

    /// Expands bytes into bits, most significant bit first.
    pub fn from_bytes_msb_first(bytes: &[u8]) -> Self {
        bytes
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
            .collect()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Appends `bit` `count` times.
    pub fn push_repeated(&mut self, bit: bool, count: usize) {
        self.bits.extend(std::iter::repeat_n(bit, count));
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// The bits as `0`/`1` values.
    pub fn to_vec_u8(&self) -> Vec<u8> {
        self.bits.iter().map(|&b| b as u8).collect()
    }
}

impl FromIterator<bool> for Bitstream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl Extend<bool> for Bitstream {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        self.bits.extend(iter);
    }
}

impl From<Vec<bool>> for Bitstream {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl fmt::Display for Bitstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
