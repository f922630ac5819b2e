use crate::components::gates::{AndGate, OrGate, XorGate};
use crate::signal::Signal;

/// `Sum = A XOR B`, `Carry = A AND B`.
#[derive(Debug, Clone, Default)]
pub struct HalfAdder {
    sum: XorGate,
    carry: AndGate,
}

impl HalfAdder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input_a(&mut self, value: bool) {
        self.sum.set_input_a(value);
        self.carry.set_input_a(value);
    }

    pub fn set_input_b(&mut self, value: bool) {
        self.sum.set_input_b(value);
        self.carry.set_input_b(value);
    }

    pub fn output_sum(&self) -> Signal {
        self.sum.output_q()
    }

    pub fn output_carry(&self) -> Signal {
        self.carry.output_q()
    }
}

/// Two half adders with their carries ORed together.
#[derive(Debug, Clone, Default)]
pub struct FullAdder {
    operands: HalfAdder,
    carry_in: HalfAdder,
    carry_out: OrGate,
}

impl FullAdder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input_a(&mut self, value: bool) {
        self.operands.set_input_a(value);
        self.sync();
    }

    pub fn set_input_b(&mut self, value: bool) {
        self.operands.set_input_b(value);
        self.sync();
    }

    pub fn set_input_carry(&mut self, value: bool) {
        self.carry_in.set_input_b(value);
        self.sync();
    }

    pub fn output_sum(&self) -> Signal {
        self.carry_in.output_sum()
    }

    pub fn output_carry(&self) -> Signal {
        self.carry_out.output_q()
    }

    fn sync(&mut self) {
        self.carry_in.set_input_a(self.operands.output_sum().is_high());
        self.carry_out.set_input_a(self.operands.output_carry().is_high());
        self.carry_out.set_input_b(self.carry_in.output_carry().is_high());
    }
}
