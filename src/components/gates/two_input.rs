//! Two-input combinational gates.
//!
//! A gate only remembers its inputs; the output is derived from them on every
//! read, so it can never lag behind a setter.

use crate::signal::Signal;

macro_rules! two_input_gate {
    ($(#[$meta:meta])* $name:ident, $label:literal, |$a:ident, $b:ident| $logic:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            input_a: bool,
            input_b: bool,
        }

        impl $name {
            pub const LABEL: &'static str = $label;

            pub fn new() -> Self {
                Self::default()
            }

            pub fn set_input_a(&mut self, value: bool) {
                self.input_a = value;
            }

            pub fn set_input_b(&mut self, value: bool) {
                self.input_b = value;
            }

            pub fn output_q(&self) -> Signal {
                let ($a, $b) = (self.input_a, self.input_b);
                Signal::from_bool($logic)
            }
        }
    };
}

two_input_gate!(AndGate, "AND", |a, b| a && b);
two_input_gate!(OrGate, "OR", |a, b| a || b);
two_input_gate!(
    /// Cross-coupled pairs of these form the SR latch.
    NorGate,
    "NOR",
    |a, b| !(a || b)
);
two_input_gate!(XorGate, "XOR", |a, b| a != b);
