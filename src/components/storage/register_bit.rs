use crate::component::Clocked;
use crate::components::gates::{AndGate, Inverter, OrGate, TriStateBuffer};
use crate::components::sequential::DFlipFlop;
use crate::signal::Signal;

/// One bit of register storage.
///
/// The flip-flop's D input is fed by a load-or-hold network:
/// `next = (Q AND NOT Load) OR (Data AND Load)`. The stored bit reaches the
/// outside world through a tri-state buffer controlled by `Enable`.
#[derive(Debug, Clone)]
pub struct RegisterBit {
    flip_flop: DFlipFlop,
    load_inverter: Inverter,
    hold_gate: AndGate,
    load_gate: AndGate,
    next_d: OrGate,
    output: TriStateBuffer,
}

impl RegisterBit {
    pub fn new() -> Self {
        let mut bit = RegisterBit {
            flip_flop: DFlipFlop::new(),
            load_inverter: Inverter::new(),
            hold_gate: AndGate::new(),
            load_gate: AndGate::new(),
            next_d: OrGate::new(),
            output: TriStateBuffer::new(),
        };
        bit.sync_feedback();
        bit.output.set_input_a(bit.flip_flop.q());
        bit
    }

    pub fn set_input_d(&mut self, data: bool) {
        self.load_gate.set_input_a(data);
        self.sync_feedback();
    }

    pub fn set_input_l(&mut self, load: bool) {
        self.load_inverter.set_input_a(load);
        self.load_gate.set_input_b(load);
        self.sync_feedback();
    }

    pub fn set_input_e(&mut self, enable: bool) {
        self.output.set_input_b(enable);
    }

    pub fn output_q(&self) -> Signal {
        self.output.output_q()
    }

    /// The latched bit, bypassing the output buffer.
    pub fn probe_state(&self) -> bool {
        self.output.probe_input_a()
    }

    fn sync_feedback(&mut self) {
        self.hold_gate.set_input_a(self.flip_flop.q());
        self.hold_gate
            .set_input_b(self.load_inverter.output_q().is_high());
        self.next_d.set_input_a(self.hold_gate.output_q().is_high());
        self.next_d.set_input_b(self.load_gate.output_q().is_high());
        self.flip_flop.set_input_d(self.next_d.output_q().is_high());
    }
}

impl Default for RegisterBit {
    fn default() -> Self {
        Self::new()
    }
}

impl Clocked for RegisterBit {
    fn clock(&mut self) {
        self.flip_flop.clock();
        self.sync_feedback();
        self.output.set_input_a(self.flip_flop.q());
    }
}
