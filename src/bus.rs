//! Shared parallel bus with single-driver arbitration.

use tracing::{event, Level};

use crate::component::BusModule;
use crate::error::{check_width, Result, SimError};
use crate::signal::Signal;

/// A fixed-width bus over a fixed set of attached modules.
///
/// The bus borrows its modules for as long as it exists; the modules stay
/// owned by whoever built them. Contention is only detected when the bus is
/// read, never when a module enables its output.
pub struct ParallelBus<'a> {
    width: usize,
    modules: Vec<&'a mut dyn BusModule>,
}

impl<'a> ParallelBus<'a> {
    pub fn new(width: usize, modules: Vec<&'a mut dyn BusModule>) -> Result<Self> {
        check_width(width, "width")?;
        if modules.is_empty() {
            return Err(SimError::MissingCollaborator {
                parameter: "modules",
            });
        }
        Ok(ParallelBus { width, modules })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|module| module.name()).collect()
    }

    /// Names of the modules currently driving at least one line.
    pub fn drivers(&self) -> Vec<&str> {
        self.modules
            .iter()
            .filter(|module| module.is_driving())
            .map(|module| module.name())
            .collect()
    }

    /// Drive the enable line of the module at `index`. Returns false if no
    /// such module is attached.
    pub fn set_input_e(&mut self, index: usize, enable: bool) -> bool {
        match self.modules.get_mut(index) {
            Some(module) => {
                module.set_input_e(enable);
                true
            }
            None => false,
        }
    }

    /// Enable the named module's output and disable every other one.
    pub fn enable_only(&mut self, name: &str) -> bool {
        let mut found = false;
        for module in &mut self.modules {
            let selected = module.name() == name;
            found |= selected;
            module.set_input_e(selected);
        }
        found
    }

    pub fn release_all(&mut self) {
        for module in &mut self.modules {
            module.set_input_e(false);
        }
    }

    /// Sample the bus.
    ///
    /// No driver gives all `HighZ`; one driver gives its value, zero-padded
    /// at the top or truncated to the bus width; two or more drivers is
    /// contention.
    pub fn output(&self) -> Result<Vec<Signal>> {
        let driving: Vec<&dyn BusModule> = self
            .modules
            .iter()
            .filter(|module| module.is_driving())
            .map(|module| &**module)
            .collect();

        match driving.as_slice() {
            [] => Ok(vec![Signal::HighZ; self.width]),
            [driver] => {
                let mut value = driver.output();
                value.resize(self.width, Signal::Low);
                Ok(value)
            }
            _ => {
                let drivers: Vec<String> = driving
                    .iter()
                    .map(|module| module.name().to_string())
                    .collect();
                event!(Level::WARN, "bus contention between {}", drivers.join(", "));
                Err(SimError::BusContention { drivers })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Clocked;
    use crate::components::storage::Register;
    use crate::signal::{bits_from_value, value_from_signals};

    fn loaded(name: &str, width: usize, value: u64) -> Register {
        let mut reg = Register::new(width).unwrap().with_name(name);
        reg.set_input_d(&bits_from_value(value, width));
        reg.set_input_l(true);
        reg.clock();
        reg.set_input_l(false);
        reg
    }

    #[test]
    fn test_bus_creation() {
        let mut a = loaded("A", 8, 1);
        let bus = ParallelBus::new(8, vec![&mut a]).unwrap();
        assert_eq!(bus.width(), 8);
        assert_eq!(bus.module_names(), vec!["A"]);
    }

    #[test]
    fn test_bus_rejects_bad_construction() {
        let mut a = loaded("A", 8, 1);
        assert!(matches!(
            ParallelBus::new(0, vec![&mut a]),
            Err(SimError::InvalidWidth { parameter: "width" })
        ));
        assert!(matches!(
            ParallelBus::new(8, Vec::new()),
            Err(SimError::MissingCollaborator {
                parameter: "modules"
            })
        ));
    }

    #[test]
    fn test_idle_bus_floats() {
        let mut a = loaded("A", 8, 47);
        let mut b = loaded("B", 8, 3);
        let bus = ParallelBus::new(8, vec![&mut a, &mut b]).unwrap();
        assert_eq!(bus.output().unwrap(), vec![Signal::HighZ; 8]);
        assert!(bus.drivers().is_empty());
    }

    #[test]
    fn test_single_driver_is_padded_or_truncated() {
        let mut narrow = loaded("PC", 4, 0b1011);
        let mut wide = loaded("WIDE", 12, 0xABC);
        let mut bus = ParallelBus::new(8, vec![&mut narrow, &mut wide]).unwrap();

        assert!(bus.enable_only("PC"));
        let value = bus.output().unwrap();
        assert_eq!(value.len(), 8);
        assert_eq!(value_from_signals(&value), Some(0b1011));

        assert!(bus.enable_only("WIDE"));
        assert_eq!(value_from_signals(&bus.output().unwrap()), Some(0xBC));
    }

    #[test]
    fn test_bus_contention_detection() {
        let mut a = loaded("A", 8, 47);
        let mut b = loaded("B", 8, 3);
        let mut bus = ParallelBus::new(8, vec![&mut a, &mut b]).unwrap();

        // Enabling two outputs is not an error by itself.
        assert!(bus.set_input_e(0, true));
        assert!(bus.set_input_e(1, true));
        assert!(!bus.set_input_e(2, true));

        match bus.output() {
            Err(SimError::BusContention { drivers }) => assert_eq!(drivers, vec!["A", "B"]),
            other => panic!("expected contention, got {:?}", other),
        }

        // The bus is still usable once one driver lets go.
        bus.set_input_e(1, false);
        assert_eq!(value_from_signals(&bus.output().unwrap()), Some(47));

        bus.release_all();
        assert!(bus.drivers().is_empty());
    }
}
