use crate::component::{BusModule, Clocked};
use crate::components::storage::register::Register;
use crate::error::{check_width, Result};
use crate::signal::{value_from_bits, Signal};

/// Width of the operand field in the low bits of an instruction.
pub const OPERAND_BITS: usize = 4;

/// A register whose bus output carries only the operand field; the opcode
/// lines above it never reach the bus.
#[derive(Debug, Clone)]
pub struct InstructionRegister {
    register: Register,
}

impl InstructionRegister {
    pub fn new(width: usize) -> Result<Self> {
        check_width(width, "width")?;
        Ok(InstructionRegister {
            register: Register::new(width)?.with_name("IR"),
        })
    }

    pub fn set_input_d(&mut self, data: &[bool]) {
        self.register.set_input_d(data);
    }

    pub fn set_input_l(&mut self, load: bool) {
        self.register.set_input_l(load);
    }

    pub fn probe_state(&self) -> Vec<bool> {
        self.register.probe_state()
    }

    pub fn value(&self) -> u64 {
        self.register.value()
    }

    pub fn opcode(&self) -> u64 {
        let bits = self.probe_state();
        value_from_bits(bits.get(OPERAND_BITS..).unwrap_or(&[]))
    }

    pub fn operand(&self) -> u64 {
        let bits = self.probe_state();
        value_from_bits(&bits[..bits.len().min(OPERAND_BITS)])
    }
}

impl Clocked for InstructionRegister {
    fn clock(&mut self) {
        self.register.clock();
    }
}

impl BusModule for InstructionRegister {
    fn name(&self) -> &str {
        self.register.name()
    }

    fn output(&self) -> Vec<Signal> {
        self.register
            .output()
            .into_iter()
            .enumerate()
            .map(|(i, signal)| if i < OPERAND_BITS { signal } else { Signal::HighZ })
            .collect()
    }

    fn set_input_e(&mut self, enable: bool) {
        self.register.set_input_e(enable);
    }
}
