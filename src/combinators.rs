//! Pointwise combinators for composing waveforms.
//!
//! This module provides the sum and product of any number of waveforms, with
//! bare numbers lifted into constants, and a fluent extension trait for
//! building them.
//!
//! A composite's period is the longest of its components' periods, not their
//! least common multiple. Callers are responsible for combining waveforms
//! whose periods already line up, such as a carrier with a modulation
//! envelope that is a whole number of carrier periods long.

use crate::error::{Result, WaveformError};
use crate::{Operand, RepeatCount, SharedWaveform, Waveform};
use std::sync::Arc;

/// Reduction applied across a composite's components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOp {
    /// Pointwise addition (mixing)
    Sum,
    /// Pointwise multiplication (amplitude modulation)
    Product,
}

impl CombineOp {
    fn symbol(&self) -> char {
        match self {
            CombineOp::Sum => '+',
            CombineOp::Product => '*',
        }
    }

    fn identity(&self) -> f64 {
        match self {
            CombineOp::Sum => 0.0,
            CombineOp::Product => 1.0,
        }
    }

    #[inline]
    fn apply(&self, acc: f64, value: f64) -> f64 {
        match self {
            CombineOp::Sum => acc + value,
            CombineOp::Product => acc * value,
        }
    }
}

/// The pointwise sum or product of several waveforms.
///
/// Every component is evaluated at the same absolute time; nothing is shifted.
///
/// # Examples
///
/// ```
/// use arbwave::{Delay, Waveform, combine_sum};
///
/// let hold = Delay::holding(1.0, 2.0).unwrap();
/// let mixed = combine_sum([hold.into(), 0.5.into()]).unwrap();
/// assert_eq!(mixed.value_at(0.25), 2.5);
/// assert_eq!(mixed.name(), "(delay+0.5)");
/// ```
pub struct Combine {
    op: CombineOp,
    components: Vec<SharedWaveform>,
    period: f64,
    name: String,
}

impl Combine {
    /// Combines `operands` with `op`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `operands` is empty.
    pub fn new(op: CombineOp, operands: impl IntoIterator<Item = Operand>) -> Result<Self> {
        let operands: Vec<Operand> = operands.into_iter().collect();
        if operands.is_empty() {
            return Err(WaveformError::invalid(
                "components",
                "a composite needs at least one component",
            ));
        }

        let labels: Vec<String> = operands.iter().map(Operand::label).collect();
        let separator = op.symbol().to_string();
        let name = format!("({})", labels.join(&separator));

        let components: Vec<SharedWaveform> =
            operands.into_iter().map(Operand::into_waveform).collect();
        let period = components
            .iter()
            .map(|c| c.period())
            .fold(0.0, f64::max);

        Ok(Self {
            op,
            components,
            period,
            name,
        })
    }

    /// Builder-style method to set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn op(&self) -> CombineOp {
        self.op
    }

    pub fn components(&self) -> &[SharedWaveform] {
        &self.components
    }
}

impl Waveform for Combine {
    fn value_at(&self, time: f64) -> f64 {
        self.components
            .iter()
            .fold(self.op.identity(), |acc, c| self.op.apply(acc, c.value_at(time)))
    }

    fn period(&self) -> f64 {
        self.period
    }

    /// Composites are sampled over a single period.
    fn repeat_count(&self) -> RepeatCount {
        RepeatCount::ONCE
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Pointwise sum of `operands`.
pub fn combine_sum(operands: impl IntoIterator<Item = Operand>) -> Result<Combine> {
    Combine::new(CombineOp::Sum, operands)
}

/// Pointwise product of `operands`.
pub fn combine_product(operands: impl IntoIterator<Item = Operand>) -> Result<Combine> {
    Combine::new(CombineOp::Product, operands)
}

/// Builds a two-operand composite; never empty, so never fails.
fn pair(op: CombineOp, a: Operand, b: Operand) -> Combine {
    let labels = format!("({}{}{})", a.label(), op.symbol(), b.label());
    let components = vec![a.into_waveform(), b.into_waveform()];
    let period = components[0].period().max(components[1].period());
    Combine {
        op,
        components,
        period,
        name: labels,
    }
}

/// Extension trait providing convenient combinator methods on any waveform.
///
/// This trait is automatically implemented for all types that implement
/// `Waveform`, providing a fluent API for composing waveforms.
///
/// # Examples
///
/// ```
/// use arbwave::{Sine, Waveform, WaveformExt};
///
/// let carrier = Sine::carrier(125e3).unwrap();
/// let inverted = carrier.invert();
/// assert_eq!(inverted.name(), "(carrier*-1)");
/// ```
pub trait WaveformExt: Waveform + Sized + 'static {
    /// Adds another waveform or number to this one.
    fn add(self, other: impl Into<Operand>) -> Combine {
        pair(CombineOp::Sum, self.into(), other.into())
    }

    /// Multiplies this waveform by another waveform or number.
    fn multiply(self, other: impl Into<Operand>) -> Combine {
        pair(CombineOp::Product, self.into(), other.into())
    }

    /// Scales this waveform by a fixed factor.
    fn gain(self, gain: f64) -> Combine {
        self.multiply(gain)
    }

    /// Negates this waveform.
    fn invert(self) -> Combine {
        self.multiply(-1.0)
    }

    /// Moves this waveform behind a shared pointer.
    fn shared(self) -> SharedWaveform {
        Arc::new(self)
    }
}

// Blanket implementation for all Waveform types
impl<T: Waveform + 'static> WaveformExt for T {}
