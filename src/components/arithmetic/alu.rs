//! N-bit ripple-carry adder/subtractor.

use crate::component::BusModule;
use crate::components::combinational::FullAdder;
use crate::components::gates::{Buffer, TriStateBuffer, XorGate};
use crate::error::{check_width, Result};
use crate::signal::{value_from_bits, Signal};

/// Every B bit passes through an XOR with the shared `Subtract` line, and
/// `Subtract` also drives the carry into bit 0, so subtraction is computed
/// as `A + NOT B + 1`. Sum bits leave through tri-state buffers on the
/// shared output-enable line.
#[derive(Debug, Clone)]
pub struct Alu {
    name: String,
    subtract: Buffer,
    complement: Vec<XorGate>,
    adders: Vec<FullAdder>,
    outputs: Vec<TriStateBuffer>,
    carry_out: bool,
}

impl Alu {
    pub fn new(width: usize) -> Result<Self> {
        check_width(width, "width")?;
        let mut alu = Alu {
            name: "ALU".to_string(),
            subtract: Buffer::new(),
            complement: vec![XorGate::new(); width],
            adders: vec![FullAdder::new(); width],
            outputs: vec![TriStateBuffer::new(); width],
            carry_out: false,
        };
        alu.ripple();
        Ok(alu)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn width(&self) -> usize {
        self.adders.len()
    }

    /// Same partial-update rule as a register's data lines.
    pub fn set_input_a(&mut self, operand: &[bool]) {
        for (adder, value) in self.adders.iter_mut().zip(operand.iter().copied()) {
            adder.set_input_a(value);
        }
        self.ripple();
    }

    pub fn set_input_b(&mut self, operand: &[bool]) {
        for (xor, value) in self.complement.iter_mut().zip(operand.iter().copied()) {
            xor.set_input_a(value);
        }
        self.ripple();
    }

    pub fn set_input_su(&mut self, subtract: bool) {
        self.subtract.set_input_a(subtract);
        for xor in &mut self.complement {
            xor.set_input_b(subtract);
        }
        self.ripple();
    }

    pub fn set_input_eo(&mut self, enable: bool) {
        for output in &mut self.outputs {
            output.set_input_b(enable);
        }
    }

    /// Raw sum bits, ignoring the output enable.
    pub fn probe_state(&self) -> Vec<bool> {
        self.outputs
            .iter()
            .map(TriStateBuffer::probe_input_a)
            .collect()
    }

    pub fn value(&self) -> u64 {
        value_from_bits(&self.probe_state())
    }

    /// Carry out of the most significant adder.
    pub fn carry_out(&self) -> bool {
        self.carry_out
    }

    pub fn is_zero(&self) -> bool {
        self.probe_state().iter().all(|bit| !bit)
    }

    fn ripple(&mut self) {
        let mut carry = self.subtract.output_q().is_high();
        for ((xor, adder), output) in self
            .complement
            .iter()
            .zip(self.adders.iter_mut())
            .zip(self.outputs.iter_mut())
        {
            adder.set_input_b(xor.output_q().is_high());
            adder.set_input_carry(carry);
            carry = adder.output_carry().is_high();
            output.set_input_a(adder.output_sum().is_high());
        }
        self.carry_out = carry;
    }
}

impl BusModule for Alu {
    fn name(&self) -> &str {
        &self.name
    }

    fn output(&self) -> Vec<Signal> {
        self.outputs.iter().map(TriStateBuffer::output_q).collect()
    }

    fn set_input_e(&mut self, enable: bool) {
        self.set_input_eo(enable);
    }
}
