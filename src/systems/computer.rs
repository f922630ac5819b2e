//! # Breadboard computer
//!
//! Registers A and B, an instruction register, an output register, a 4-bit
//! memory address register, the ALU, a 4-bit program counter and 16 words of
//! RAM, all hanging off one data bus and one clock.
//!
//! Each clock cycle runs the same way:
//!
//! 1. the bus is sampled (two drivers abort the cycle with a contention
//!    error before anything is clocked);
//! 2. the sampled value is presented to the data inputs of every module;
//! 3. the sequential parts are clocked once each, in the order PC, MAR, RAM,
//!    IR, A, B, OUT;
//! 4. the ALU operands are re-derived from the latched content of A and B,
//!    and the RAM address from the MAR. These are hard-wired connections, not
//!    bus transfers, so they ignore the registers' output enables.

use tracing::{event, Level};

use crate::bus::ParallelBus;
use crate::component::{BusModule, Clocked};
use crate::components::arithmetic::Alu;
use crate::components::counter::ProgramCounter;
use crate::components::memory::Ram;
use crate::components::storage::{InstructionRegister, Register};
use crate::error::{check_min_width, Result};
use crate::signal::{format_signals, resolve_signals, Signal};
use crate::system_config::SystemInfo;
use crate::systems::microcode::{ControlWord, Instruction, FETCH};

pub const ADDRESS_WIDTH: usize = 4;

/// An instruction word is a 4-bit opcode above a 4-bit operand, so the data
/// path must hold at least eight bits.
pub const MIN_DATA_WIDTH: usize = 8;

#[derive(Debug, Clone)]
pub struct Computer {
    name: String,
    data_width: usize,
    pc: ProgramCounter,
    mar: Register,
    ram: Ram,
    ir: InstructionRegister,
    a: Register,
    b: Register,
    alu: Alu,
    out: Register,
    control: ControlWord,
    halted: bool,
    ticks: u64,
}

impl Computer {
    pub fn new(data_width: usize) -> Result<Self> {
        check_min_width(data_width, MIN_DATA_WIDTH, "data_width")?;
        let mut computer = Computer {
            name: "Breadboard".to_string(),
            data_width,
            pc: ProgramCounter::new(ADDRESS_WIDTH)?,
            mar: Register::new(ADDRESS_WIDTH)?.with_name("MAR"),
            ram: Ram::new(data_width)?,
            ir: InstructionRegister::new(data_width)?,
            a: Register::new(data_width)?.with_name("A"),
            b: Register::new(data_width)?.with_name("B"),
            alu: Alu::new(data_width)?,
            out: Register::new(data_width)?.with_name("OUT"),
            control: ControlWord::NONE,
            halted: false,
            ticks: 0,
        };
        computer.rewire();
        Ok(computer)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_width(&self) -> usize {
        self.data_width
    }

    pub fn get_system_info(&self) -> SystemInfo {
        SystemInfo {
            name: self.name.clone(),
            data_width: self.data_width,
            address_width: ADDRESS_WIDTH,
            ram_words: self.ram.capacity(),
            component_count: 8,
        }
    }

    /// Copy a program image into RAM from address 0. Returns the number of
    /// bytes that fit.
    pub fn load_program(&mut self, image: &[u8]) -> usize {
        let written = self.ram.load_image(image);
        self.rewire();
        written
    }

    /// Drive every control line for the next clock cycle.
    pub fn set_control(&mut self, control: ControlWord) {
        self.control = control;

        self.pc.set_input_e(control.contains(ControlWord::CO));
        self.ram.set_input_e(control.contains(ControlWord::RO));
        self.ir.set_input_e(control.contains(ControlWord::IO));
        self.a.set_input_e(control.contains(ControlWord::AO));
        self.alu.set_input_eo(control.contains(ControlWord::EO));

        self.mar.set_input_l(control.contains(ControlWord::MI));
        self.ram.set_input_we(control.contains(ControlWord::RI));
        self.ir.set_input_l(control.contains(ControlWord::II));
        self.a.set_input_l(control.contains(ControlWord::AI));
        self.b.set_input_l(control.contains(ControlWord::BI));
        self.out.set_input_l(control.contains(ControlWord::OI));
        self.pc.set_input_ce(control.contains(ControlWord::CE));
        self.pc.set_input_l(control.contains(ControlWord::J));
        self.alu.set_input_su(control.contains(ControlWord::SU));

        event!(Level::DEBUG, "control word {}", control);
    }

    pub fn control(&self) -> ControlWord {
        self.control
    }

    fn bus(&mut self) -> Result<ParallelBus<'_>> {
        let modules: Vec<&mut dyn BusModule> = vec![
            &mut self.pc,
            &mut self.ram,
            &mut self.ir,
            &mut self.a,
            &mut self.b,
            &mut self.alu,
        ];
        ParallelBus::new(self.data_width, modules)
    }

    /// Sample the data bus as it stands.
    pub fn bus_value(&mut self) -> Result<Vec<Signal>> {
        self.bus()?.output()
    }

    /// One clock cycle. A halt line in the current control word stops the
    /// machine instead of clocking it; a halted machine ignores the clock
    /// until `reset()`.
    pub fn clock(&mut self) -> Result<()> {
        if self.halted {
            return Ok(());
        }
        if self.control.contains(ControlWord::HLT) {
            if !self.halted {
                event!(Level::INFO, "{} halted after {} ticks", self.name, self.ticks);
            }
            self.halted = true;
            return Ok(());
        }

        let sampled = self.bus_value()?;
        let data = resolve_signals(&sampled);
        event!(
            Level::TRACE,
            "tick {}: bus {}",
            self.ticks,
            format_signals(&sampled)
        );

        self.pc.set_input_d(&data);
        self.mar.set_input_d(&data);
        self.ram.set_input_d(&data);
        self.ir.set_input_d(&data);
        self.a.set_input_d(&data);
        self.b.set_input_d(&data);
        self.out.set_input_d(&data);

        let order: [&mut dyn Clocked; 7] = [
            &mut self.pc,
            &mut self.mar,
            &mut self.ram,
            &mut self.ir,
            &mut self.a,
            &mut self.b,
            &mut self.out,
        ];
        for part in order {
            part.clock();
        }

        self.rewire();
        self.ticks += 1;
        Ok(())
    }

    /// Fetch and execute one instruction. Returns false once the machine
    /// has halted.
    pub fn step_instruction(&mut self) -> Result<bool> {
        if self.halted {
            return Ok(false);
        }

        for word in FETCH {
            self.set_control(word);
            self.clock()?;
        }

        let opcode = self.ir.opcode();
        let instruction = Instruction::decode(opcode).unwrap_or_else(|| {
            event!(Level::DEBUG, "opcode {:#x} is not assigned, treating as NOP", opcode);
            Instruction::Nop
        });
        event!(
            Level::DEBUG,
            "execute {} {:#x}",
            instruction,
            self.ir.operand()
        );

        for word in instruction.microcode() {
            self.set_control(*word);
            self.clock()?;
            if self.halted {
                break;
            }
        }
        self.set_control(ControlWord::NONE);
        Ok(!self.halted)
    }

    /// Run until halt or until `max_instructions` have executed. Returns the
    /// number of instructions executed.
    pub fn run(&mut self, max_instructions: usize) -> Result<usize> {
        let mut executed = 0;
        while executed < max_instructions {
            let running = self.step_instruction()?;
            executed += 1;
            if !running {
                break;
            }
        }
        Ok(executed)
    }

    /// Clear the program counter and every register by loading them from the
    /// idle bus. RAM keeps its content.
    pub fn reset(&mut self) -> Result<()> {
        self.halted = false;
        self.set_control(
            ControlWord::J
                | ControlWord::MI
                | ControlWord::II
                | ControlWord::AI
                | ControlWord::BI
                | ControlWord::OI,
        );
        let result = self.clock();
        self.set_control(ControlWord::NONE);
        result
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn program_counter(&self) -> &ProgramCounter {
        &self.pc
    }

    pub fn memory_address_register(&self) -> &Register {
        &self.mar
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    pub fn instruction_register(&self) -> &InstructionRegister {
        &self.ir
    }

    pub fn register_a(&self) -> &Register {
        &self.a
    }

    pub fn register_b(&self) -> &Register {
        &self.b
    }

    pub fn alu(&self) -> &Alu {
        &self.alu
    }

    pub fn output_register(&self) -> &Register {
        &self.out
    }

    fn rewire(&mut self) {
        self.alu.set_input_a(&self.a.probe_state());
        self.alu.set_input_b(&self.b.probe_state());
        self.ram.set_input_address(&self.mar.probe_state());
    }
}
