use tracing::{event, Level};

use crate::component::{BusModule, Clocked};
use crate::components::storage::register_bit::RegisterBit;
use crate::error::{check_width, Result};
use crate::signal::{value_from_bits, Signal};

/// N register bits sharing `Load`, `Enable` and the clock.
#[derive(Debug, Clone)]
pub struct Register {
    name: String,
    bits: Vec<RegisterBit>,
}

impl Register {
    pub fn new(width: usize) -> Result<Self> {
        check_width(width, "width")?;
        Ok(Register {
            name: "REG".to_string(),
            bits: (0..width).map(|_| RegisterBit::new()).collect(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Drive the data lines. Positions past the end of `data` keep their
    /// current value; entries past the register width are dropped.
    pub fn set_input_d(&mut self, data: &[bool]) {
        for (bit, value) in self.bits.iter_mut().zip(data.iter().copied()) {
            bit.set_input_d(value);
        }
    }

    pub fn set_input_l(&mut self, load: bool) {
        for bit in &mut self.bits {
            bit.set_input_l(load);
        }
    }

    /// Latched content, whether or not the output is enabled.
    pub fn probe_state(&self) -> Vec<bool> {
        self.bits.iter().map(RegisterBit::probe_state).collect()
    }

    pub fn value(&self) -> u64 {
        value_from_bits(&self.probe_state())
    }
}

impl Clocked for Register {
    fn clock(&mut self) {
        for bit in &mut self.bits {
            bit.clock();
        }
        event!(Level::TRACE, "{} latched {:#x}", self.name, self.value());
    }
}

impl BusModule for Register {
    fn name(&self) -> &str {
        &self.name
    }

    fn output(&self) -> Vec<Signal> {
        self.bits.iter().map(RegisterBit::output_q).collect()
    }

    fn set_input_e(&mut self, enable: bool) {
        for bit in &mut self.bits {
            bit.set_input_e(enable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::signal::bits_from_value;

    #[test]
    fn test_zero_width_is_rejected() {
        assert!(matches!(
            Register::new(0),
            Err(SimError::InvalidWidth { parameter: "width" })
        ));
    }

    #[test]
    fn test_register_round_trip() {
        let mut reg = Register::new(8).unwrap();
        reg.set_input_d(&bits_from_value(0xA5, 8));
        reg.set_input_l(true);
        reg.clock();
        assert_eq!(reg.value(), 0xA5);

        reg.set_input_l(false);
        reg.set_input_d(&bits_from_value(0x00, 8));
        reg.clock();
        assert_eq!(reg.value(), 0xA5);
    }

    #[test]
    fn test_power_on_content_is_all_high() {
        let reg = Register::new(4).unwrap();
        assert_eq!(reg.probe_state(), vec![true; 4]);
    }

    #[test]
    fn test_output_is_high_z_until_enabled() {
        let mut reg = Register::new(4).unwrap().with_name("A");
        reg.set_input_d(&bits_from_value(0b1010, 4));
        reg.set_input_l(true);
        reg.clock();

        assert!(reg.output().iter().all(|s| *s == Signal::HighZ));
        assert!(!reg.is_driving());
        assert_eq!(reg.value(), 0b1010);

        reg.set_input_e(true);
        assert_eq!(
            reg.output(),
            vec![Signal::Low, Signal::High, Signal::Low, Signal::High]
        );
        assert_eq!(reg.name(), "A");
    }

    #[test]
    fn test_short_and_long_data_vectors() {
        let mut reg = Register::new(4).unwrap();
        reg.set_input_l(true);
        reg.set_input_d(&[false, false, false, false]);
        reg.clock();

        // Only the first two positions change.
        reg.set_input_d(&[true, true]);
        reg.clock();
        assert_eq!(reg.probe_state(), vec![true, true, false, false]);

        // The fifth and sixth entries fall off the end.
        reg.set_input_d(&[false, false, true, true, true, true]);
        reg.clock();
        assert_eq!(reg.probe_state(), vec![false, false, true, true]);
        assert_eq!(reg.width(), 4);
    }
}
