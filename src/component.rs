//! Capability traits shared by the simulated parts.

use crate::signal::Signal;

/// A sequential part that commits its pending state on a clock edge.
pub trait Clocked {
    fn clock(&mut self);
}

/// A module whose output passes through a tri-state stage and may be
/// attached to a shared bus.
pub trait BusModule {
    fn name(&self) -> &str;

    /// Visible output; every line is `HighZ` while the module is disabled.
    fn output(&self) -> Vec<Signal>;

    fn set_input_e(&mut self, enable: bool);

    /// True when at least one output line is actively driven.
    fn is_driving(&self) -> bool {
        self.output().iter().any(Signal::is_driven)
    }
}

/// Anything shaped like a set/reset latch: two complementary outputs
/// steered by set and reset inputs.
pub trait Bistable {
    fn set_input_s(&mut self, set: bool);
    fn set_input_r(&mut self, reset: bool);
    fn output_q(&self) -> Signal;
    fn output_nq(&self) -> Signal;
}
