use crate::component::Clocked;
use crate::components::sequential::gated_latch::GatedDLatch;
use crate::signal::Signal;

/// Edge-triggered D flip-flop.
///
/// `set_input_d` only records the pending value; `clock()` presents it to a
/// gated D latch and pulses the latch enable High then Low. A flip-flop that
/// has never been clocked still shows the latch's power-on `Q = High`.
#[derive(Debug, Clone, Default)]
pub struct DFlipFlop {
    latch: GatedDLatch,
    input_d: bool,
}

impl DFlipFlop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input_d(&mut self, value: bool) {
        self.input_d = value;
    }

    pub fn output_q(&self) -> Signal {
        self.latch.output_q()
    }

    pub fn output_nq(&self) -> Signal {
        self.latch.output_nq()
    }

    pub fn q(&self) -> bool {
        self.output_q().is_high()
    }
}

impl Clocked for DFlipFlop {
    fn clock(&mut self) {
        self.latch.set_input_d(self.input_d);
        self.latch.set_input_e(true);
        self.latch.set_input_e(false);
    }
}
