//! Wide AND gates built by cascading two-input ANDs.

use crate::components::gates::AndGate;
use crate::signal::Signal;

#[derive(Debug, Clone, Default)]
pub struct And3 {
    first: AndGate,
    second: AndGate,
}

impl And3 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input_a(&mut self, value: bool) {
        self.first.set_input_a(value);
        self.sync();
    }

    pub fn set_input_b(&mut self, value: bool) {
        self.first.set_input_b(value);
        self.sync();
    }

    pub fn set_input_c(&mut self, value: bool) {
        self.second.set_input_b(value);
        self.sync();
    }

    pub fn output_q(&self) -> Signal {
        self.second.output_q()
    }

    fn sync(&mut self) {
        self.second.set_input_a(self.first.output_q().is_high());
    }
}

/// `(A AND B) AND (C AND D)`.
#[derive(Debug, Clone, Default)]
pub struct And4 {
    low_pair: AndGate,
    high_pair: AndGate,
    out: AndGate,
}

impl And4 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input_a(&mut self, value: bool) {
        self.low_pair.set_input_a(value);
        self.sync();
    }

    pub fn set_input_b(&mut self, value: bool) {
        self.low_pair.set_input_b(value);
        self.sync();
    }

    pub fn set_input_c(&mut self, value: bool) {
        self.high_pair.set_input_a(value);
        self.sync();
    }

    pub fn set_input_d(&mut self, value: bool) {
        self.high_pair.set_input_b(value);
        self.sync();
    }

    /// Drive input `index` (0 = A .. 3 = D).
    pub fn set_input(&mut self, index: usize, value: bool) {
        match index {
            0 => self.set_input_a(value),
            1 => self.set_input_b(value),
            2 => self.set_input_c(value),
            3 => self.set_input_d(value),
            _ => {}
        }
    }

    pub fn output_q(&self) -> Signal {
        self.out.output_q()
    }

    fn sync(&mut self) {
        self.out.set_input_a(self.low_pair.output_q().is_high());
        self.out.set_input_b(self.high_pair.output_q().is_high());
    }
}
