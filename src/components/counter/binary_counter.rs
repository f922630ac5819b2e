use tracing::{event, Level};

use crate::component::{BusModule, Clocked};
use crate::components::combinational::{HalfAdder, Mux2};
use crate::components::gates::OrGate;
use crate::components::storage::Register;
use crate::error::{check_width, Result};
use crate::signal::Signal;

/// A register fed by a half-adder incrementer.
///
/// Each bit's next value comes from a 2:1 mux choosing between the
/// incremented value and the load value, with `L` as the select line. The
/// register loads whenever `L OR CE` is High, so a load always beats the
/// increment and dropping both lines holds the count.
#[derive(Debug, Clone)]
pub struct BinaryCounter {
    register: Register,
    incrementer: Vec<HalfAdder>,
    selectors: Vec<Mux2>,
    load_line: OrGate,
}

impl BinaryCounter {
    /// A new counter counts by default; see [`BinaryCounter::set_input_ce`].
    pub fn new(width: usize) -> Result<Self> {
        check_width(width, "width")?;
        let mut register = Register::new(width)?.with_name("CNT");
        register.set_input_e(true);

        let mut counter = BinaryCounter {
            register,
            incrementer: vec![HalfAdder::new(); width],
            selectors: vec![Mux2::new(); width],
            load_line: OrGate::new(),
        };
        counter.load_line.set_input_b(true);
        counter.resync();
        Ok(counter)
    }

    pub fn width(&self) -> usize {
        self.selectors.len()
    }

    pub fn set_input_l(&mut self, load: bool) {
        for selector in &mut self.selectors {
            selector.set_input_s(load);
        }
        self.load_line.set_input_a(load);
        self.push_next();
    }

    pub fn set_input_ce(&mut self, count: bool) {
        self.load_line.set_input_b(count);
        self.push_next();
    }

    /// Value to load. Same partial-update rule as a register.
    pub fn set_input_d(&mut self, data: &[bool]) {
        for (selector, value) in self.selectors.iter_mut().zip(data.iter().copied()) {
            selector.set_input_b(value);
        }
        self.push_next();
    }

    /// The counter's own output, always driven.
    pub fn output_q(&self) -> Vec<Signal> {
        self.register.output()
    }

    pub fn probe_state(&self) -> Vec<bool> {
        self.register.probe_state()
    }

    pub fn value(&self) -> u64 {
        self.register.value()
    }

    /// Re-derive the increment network from the stored count.
    fn resync(&mut self) {
        let mut carry = true;
        for ((adder, selector), current) in self
            .incrementer
            .iter_mut()
            .zip(self.selectors.iter_mut())
            .zip(self.register.probe_state())
        {
            adder.set_input_a(current);
            adder.set_input_b(carry);
            carry = adder.output_carry().is_high();
            selector.set_input_a(adder.output_sum().is_high());
        }
        self.push_next();
    }

    fn push_next(&mut self) {
        let next: Vec<bool> = self
            .selectors
            .iter()
            .map(|selector| selector.output_q().is_high())
            .collect();
        self.register.set_input_d(&next);
        self.register
            .set_input_l(self.load_line.output_q().is_high());
    }
}

impl Clocked for BinaryCounter {
    fn clock(&mut self) {
        self.register.clock();
        self.resync();
        event!(Level::TRACE, "counter advanced to {}", self.value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::bits_from_value;

    #[test]
    fn test_counts_from_power_on_state() {
        let mut counter = BinaryCounter::new(3).unwrap();
        assert_eq!(counter.value(), 7);
        let seen: Vec<u64> = (0..9)
            .map(|_| {
                counter.clock();
                counter.value()
            })
            .collect();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 6, 7, 0]);
    }

    #[test]
    fn test_load_beats_increment() {
        let mut counter = BinaryCounter::new(4).unwrap();
        counter.set_input_d(&bits_from_value(9, 4));
        counter.set_input_l(true);
        counter.clock();
        assert_eq!(counter.value(), 9);
        counter.clock();
        assert_eq!(counter.value(), 9);

        counter.set_input_l(false);
        counter.clock();
        assert_eq!(counter.value(), 10);
    }

    #[test]
    fn test_count_enable_low_holds() {
        let mut counter = BinaryCounter::new(4).unwrap();
        counter.clock();
        counter.set_input_ce(false);
        counter.clock();
        counter.clock();
        assert_eq!(counter.value(), 0);
        assert!(counter.output_q().iter().all(|s| *s == Signal::Low));
    }
}
