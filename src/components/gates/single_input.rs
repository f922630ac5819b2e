use crate::signal::Signal;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inverter {
    input_a: bool,
}

impl Inverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input_a(&mut self, value: bool) {
        self.input_a = value;
    }

    pub fn output_q(&self) -> Signal {
        Signal::from_bool(!self.input_a)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    input_a: bool,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input_a(&mut self, value: bool) {
        self.input_a = value;
    }

    pub fn output_q(&self) -> Signal {
        Signal::from_bool(self.input_a)
    }
}

/// Passes `A` through while `B` is High and floats otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriStateBuffer {
    input_a: bool,
    input_b: bool,
}

impl TriStateBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input_a(&mut self, value: bool) {
        self.input_a = value;
    }

    pub fn set_input_b(&mut self, enable: bool) {
        self.input_b = enable;
    }

    pub fn output_q(&self) -> Signal {
        if self.input_b {
            Signal::from_bool(self.input_a)
        } else {
            Signal::HighZ
        }
    }

    /// The stored data input, whatever the enable line says.
    pub fn probe_input_a(&self) -> bool {
        self.input_a
    }
}
