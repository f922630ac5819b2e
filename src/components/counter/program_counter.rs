use tracing::{event, Level};

use crate::component::{BusModule, Clocked};
use crate::components::counter::binary_counter::BinaryCounter;
use crate::components::gates::TriStateBuffer;
use crate::error::{check_width, Result};
use crate::signal::{value_from_bits, Signal};

/// A binary counter behind a tri-state output stage.
///
/// Counting is off until `CE` is raised. A load requested with `L` takes
/// precedence over counting; with neither asserted the address holds.
#[derive(Debug, Clone)]
pub struct ProgramCounter {
    name: String,
    counter: BinaryCounter,
    output_stage: Vec<TriStateBuffer>,
}

impl ProgramCounter {
    pub fn new(address_size: usize) -> Result<Self> {
        check_width(address_size, "address_size")?;
        let mut counter = BinaryCounter::new(address_size)?;
        counter.set_input_ce(false);

        let mut pc = ProgramCounter {
            name: "PC".to_string(),
            counter,
            output_stage: vec![TriStateBuffer::new(); address_size],
        };
        pc.sync_output();
        Ok(pc)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn address_size(&self) -> usize {
        self.output_stage.len()
    }

    pub fn set_input_ce(&mut self, count: bool) {
        self.counter.set_input_ce(count);
    }

    pub fn set_input_l(&mut self, load: bool) {
        self.counter.set_input_l(load);
    }

    pub fn set_input_d(&mut self, data: &[bool]) {
        self.counter.set_input_d(data);
    }

    pub fn probe_state(&self) -> Vec<bool> {
        self.output_stage
            .iter()
            .map(TriStateBuffer::probe_input_a)
            .collect()
    }

    pub fn value(&self) -> u64 {
        value_from_bits(&self.probe_state())
    }

    fn sync_output(&mut self) {
        for (buffer, bit) in self
            .output_stage
            .iter_mut()
            .zip(self.counter.probe_state())
        {
            buffer.set_input_a(bit);
        }
    }
}

impl Clocked for ProgramCounter {
    fn clock(&mut self) {
        self.counter.clock();
        self.sync_output();
        event!(Level::DEBUG, "{} = {}", self.name, self.value());
    }
}

impl BusModule for ProgramCounter {
    fn name(&self) -> &str {
        &self.name
    }

    fn output(&self) -> Vec<Signal> {
        self.output_stage
            .iter()
            .map(TriStateBuffer::output_q)
            .collect()
    }

    fn set_input_e(&mut self, enable: bool) {
        for buffer in &mut self.output_stage {
            buffer.set_input_b(enable);
        }
    }
}
