use crate::components::gates::{AndGate, Inverter, OrGate};
use crate::signal::Signal;

/// 2:1 multiplexer: `(A AND NOT S) OR (B AND S)`.
#[derive(Debug, Clone)]
pub struct Mux2 {
    select_inverter: Inverter,
    pass_a: AndGate,
    pass_b: AndGate,
    out: OrGate,
}

impl Mux2 {
    pub fn new() -> Self {
        let mut mux = Mux2 {
            select_inverter: Inverter::new(),
            pass_a: AndGate::new(),
            pass_b: AndGate::new(),
            out: OrGate::new(),
        };
        mux.sync();
        mux
    }

    pub fn set_input_a(&mut self, value: bool) {
        self.pass_a.set_input_a(value);
        self.sync();
    }

    pub fn set_input_b(&mut self, value: bool) {
        self.pass_b.set_input_a(value);
        self.sync();
    }

    pub fn set_input_s(&mut self, select: bool) {
        self.select_inverter.set_input_a(select);
        self.pass_b.set_input_b(select);
        self.sync();
    }

    pub fn output_q(&self) -> Signal {
        self.out.output_q()
    }

    fn sync(&mut self) {
        self.pass_a
            .set_input_b(self.select_inverter.output_q().is_high());
        self.out.set_input_a(self.pass_a.output_q().is_high());
        self.out.set_input_b(self.pass_b.output_q().is_high());
    }
}

impl Default for Mux2 {
    fn default() -> Self {
        Self::new()
    }
}
