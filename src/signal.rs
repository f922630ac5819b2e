//! Wire values and bit-vector helpers.
//!
//! Every multi-bit value in the crate is ordered LSB-first: index 0 is the
//! least significant bit.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Low,
    High,
    HighZ, // Tri-state
}

impl Signal {
    pub fn to_str(&self) -> &'static str {
        match self {
            Signal::Low => "Low",
            Signal::High => "High",
            Signal::HighZ => "HighZ",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Signal::Low => '0',
            Signal::High => '1',
            Signal::HighZ => 'Z',
        }
    }

    pub fn from_bool(value: bool) -> Self {
        if value {
            Signal::High
        } else {
            Signal::Low
        }
    }

    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Signal::Low => Some(false),
            Signal::High => Some(true),
            Signal::HighZ => None,
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Signal::High)
    }

    /// True for Low and High, false for a floating line.
    pub fn is_driven(&self) -> bool {
        match self {
            Signal::Low | Signal::High => true,
            Signal::HighZ => false,
        }
    }
}

impl From<bool> for Signal {
    fn from(value: bool) -> Self {
        Signal::from_bool(value)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Split `value` into `width` bits.
pub fn bits_from_value(value: u64, width: usize) -> Vec<bool> {
    (0..width)
        .map(|i| i < u64::BITS as usize && (value >> i) & 1 == 1)
        .collect()
}

/// Reassemble bits into an integer. Bits past the 64th are ignored.
pub fn value_from_bits(bits: &[bool]) -> u64 {
    bits.iter()
        .take(u64::BITS as usize)
        .enumerate()
        .filter(|(_, bit)| **bit)
        .fold(0, |acc, (i, _)| acc | (1u64 << i))
}

/// Integer value of a fully driven vector, `None` if any line floats.
pub fn value_from_signals(signals: &[Signal]) -> Option<u64> {
    let bits = signals
        .iter()
        .map(Signal::to_bool)
        .collect::<Option<Vec<bool>>>()?;
    Some(value_from_bits(&bits))
}

/// Sample a vector of signals the way a loading register sees it: a floating
/// line reads as Low.
pub fn resolve_signals(signals: &[Signal]) -> Vec<bool> {
    signals.iter().map(Signal::is_high).collect()
}

pub fn signals_from_bits(bits: &[bool]) -> Vec<Signal> {
    bits.iter().copied().map(Signal::from_bool).collect()
}

/// Render MSB-first, the way a row of LEDs reads.
pub fn format_signals(signals: &[Signal]) -> String {
    signals.iter().rev().map(Signal::to_char).collect()
}
