//! Level-sensitive latches: transparent while `E` is High, holding while Low.

use crate::component::Bistable;
use crate::components::gates::{AndGate, Inverter};
use crate::components::sequential::sr_latch::SrLatch;
use crate::signal::Signal;

/// An SR-shaped latch whose set and reset lines are ANDed with an enable.
///
/// The gated set line always reaches the inner latch before the gated reset
/// line.
#[derive(Debug, Clone)]
pub struct GatedSrLatch<L: Bistable = SrLatch> {
    gate_s: AndGate,
    gate_r: AndGate,
    latch: L,
}

impl GatedSrLatch<SrLatch> {
    pub fn new() -> Self {
        Self::wrapping(SrLatch::new())
    }
}

impl Default for GatedSrLatch<SrLatch> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Bistable> GatedSrLatch<L> {
    pub fn wrapping(latch: L) -> Self {
        GatedSrLatch {
            gate_s: AndGate::new(),
            gate_r: AndGate::new(),
            latch,
        }
    }

    pub fn set_input_e(&mut self, enable: bool) {
        self.gate_s.set_input_b(enable);
        self.gate_r.set_input_b(enable);
        self.forward();
    }

    fn forward(&mut self) {
        self.latch.set_input_s(self.gate_s.output_q().is_high());
        self.latch.set_input_r(self.gate_r.output_q().is_high());
    }
}

impl<L: Bistable> Bistable for GatedSrLatch<L> {
    fn set_input_s(&mut self, set: bool) {
        self.gate_s.set_input_a(set);
        self.forward();
    }

    fn set_input_r(&mut self, reset: bool) {
        self.gate_r.set_input_a(reset);
        self.forward();
    }

    fn output_q(&self) -> Signal {
        self.latch.output_q()
    }

    fn output_nq(&self) -> Signal {
        self.latch.output_nq()
    }
}

/// Drives `S = D` and `R = NOT D`, so set and reset are never both asserted.
///
/// On a change of `D` the line being released drops before the other one
/// rises.
#[derive(Debug, Clone)]
pub struct GatedDLatch<L: Bistable = SrLatch> {
    inverter: Inverter,
    latch: GatedSrLatch<L>,
}

impl GatedDLatch<SrLatch> {
    pub fn new() -> Self {
        Self::wrapping(SrLatch::new())
    }
}

impl Default for GatedDLatch<SrLatch> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Bistable> GatedDLatch<L> {
    pub fn wrapping(latch: L) -> Self {
        GatedDLatch {
            inverter: Inverter::new(),
            latch: GatedSrLatch::wrapping(latch),
        }
    }

    pub fn set_input_d(&mut self, value: bool) {
        self.inverter.set_input_a(value);
        let reset = self.inverter.output_q().is_high();
        if value {
            self.latch.set_input_r(reset);
            self.latch.set_input_s(value);
        } else {
            self.latch.set_input_s(value);
            self.latch.set_input_r(reset);
        }
    }

    pub fn set_input_e(&mut self, enable: bool) {
        self.latch.set_input_e(enable);
    }

    pub fn output_q(&self) -> Signal {
        self.latch.output_q()
    }

    pub fn output_nq(&self) -> Signal {
        self.latch.output_nq()
    }
}
