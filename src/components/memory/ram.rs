use tracing::{event, Level};

use crate::component::{BusModule, Clocked};
use crate::components::combinational::decoder::{AddressDecoder, ADDRESS_BITS, OUTPUT_LINES};
use crate::components::storage::Register;
use crate::error::{check_width, Result};
use crate::signal::{bits_from_value, Signal};

/// Sixteen words of register storage selected by a 4-to-16 decoder.
///
/// The data lines are shared by every word. A word loads on `clock()` only
/// while write is asserted and its decoder line is High, and drives the
/// output only while output is enabled and its line is High.
#[derive(Debug, Clone)]
pub struct Ram {
    name: String,
    decoder: AddressDecoder,
    words: Vec<Register>,
    address: Vec<bool>,
    data: Vec<bool>,
    write_enable: bool,
    output_enable: bool,
}

impl Ram {
    pub fn new(data_width: usize) -> Result<Self> {
        check_width(data_width, "data_width")?;
        let words = (0..OUTPUT_LINES)
            .map(|index| Register::new(data_width).map(|w| w.with_name(format!("RAM[{index}]"))))
            .collect::<Result<Vec<_>>>()?;

        let mut ram = Ram {
            name: "RAM".to_string(),
            decoder: AddressDecoder::new(),
            words,
            address: vec![false; ADDRESS_BITS],
            data: vec![false; data_width],
            write_enable: false,
            output_enable: false,
        };
        ram.route_select_lines();
        Ok(ram)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn capacity(&self) -> usize {
        self.words.len()
    }

    pub fn data_width(&self) -> usize {
        self.data.len()
    }

    pub fn set_input_address(&mut self, address: &[bool]) {
        for (line, value) in self.address.iter_mut().zip(address.iter().copied()) {
            *line = value;
        }
        self.decoder.set_input_address(address);
        self.route_select_lines();
    }

    pub fn set_input_d(&mut self, data: &[bool]) {
        for (line, value) in self.data.iter_mut().zip(data.iter().copied()) {
            *line = value;
        }
        for word in &mut self.words {
            word.set_input_d(data);
        }
    }

    pub fn set_input_we(&mut self, write: bool) {
        self.write_enable = write;
        self.route_select_lines();
    }

    pub fn selected_address(&self) -> Option<usize> {
        self.decoder.selected()
    }

    /// Latched content of one word, `None` past the end of memory.
    pub fn read_word(&self, address: usize) -> Option<Vec<bool>> {
        self.words.get(address).map(Register::probe_state)
    }

    pub fn get_memory_snapshot(&self) -> Vec<u64> {
        self.words.iter().map(Register::value).collect()
    }

    /// Write `image` into consecutive words from address 0 through the
    /// normal write path. Bytes past the last word are discarded. Returns the
    /// number of bytes written. The address, data and write lines are
    /// restored afterwards.
    pub fn load_image(&mut self, image: &[u8]) -> usize {
        if image.len() > self.capacity() {
            event!(
                Level::WARN,
                "{}: image of {} bytes truncated to {} words",
                self.name,
                image.len(),
                self.capacity()
            );
        }

        let saved_address = self.address.clone();
        let saved_data = self.data.clone();
        let saved_write = self.write_enable;
        let width = self.data_width();

        let written = image.len().min(self.capacity());
        for (address, byte) in image.iter().take(written).enumerate() {
            self.set_input_address(&bits_from_value(address as u64, ADDRESS_BITS));
            self.set_input_d(&bits_from_value(u64::from(*byte), width));
            self.set_input_we(true);
            self.clock();
        }

        self.set_input_we(saved_write);
        self.set_input_address(&saved_address);
        self.set_input_d(&saved_data);
        event!(Level::DEBUG, "{}: loaded {} bytes", self.name, written);
        written
    }

    fn route_select_lines(&mut self) {
        let lines = self.decoder.output_y();
        for (word, line) in self.words.iter_mut().zip(lines) {
            let selected = line.is_high();
            word.set_input_l(self.write_enable && selected);
            word.set_input_e(self.output_enable && selected);
        }
    }
}

impl Clocked for Ram {
    fn clock(&mut self) {
        for word in &mut self.words {
            word.clock();
        }
    }
}

impl BusModule for Ram {
    fn name(&self) -> &str {
        &self.name
    }

    fn output(&self) -> Vec<Signal> {
        self.words
            .iter()
            .find(|word| word.is_driving())
            .map(|word| word.output())
            .unwrap_or_else(|| vec![Signal::HighZ; self.data_width()])
    }

    fn set_input_e(&mut self, enable: bool) {
        self.output_enable = enable;
        self.route_select_lines();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::value_from_signals;

    #[test]
    fn test_ram_creation() {
        let ram = Ram::new(8).unwrap();
        assert_eq!(ram.name(), "RAM");
        assert_eq!(ram.capacity(), 16);
        assert_eq!(ram.data_width(), 8);
        assert!(Ram::new(0).is_err());
    }

    #[test]
    fn test_ram_write_then_read() {
        let mut ram = Ram::new(8).unwrap();
        ram.set_input_address(&bits_from_value(5, 4));
        ram.set_input_d(&bits_from_value(0xAB, 8));
        ram.set_input_we(true);
        ram.clock();
        ram.set_input_we(false);

        ram.set_input_address(&bits_from_value(5, 4));
        ram.set_input_e(true);
        assert_eq!(value_from_signals(&ram.output()), Some(0xAB));

        ram.set_input_e(false);
        assert!(ram.output().iter().all(|s| *s == Signal::HighZ));
    }

    #[test]
    fn test_write_touches_only_the_selected_word() {
        let mut ram = Ram::new(8).unwrap();
        ram.load_image(&[0; 16]);

        ram.set_input_address(&bits_from_value(3, 4));
        ram.set_input_d(&bits_from_value(0x33, 8));
        ram.set_input_we(true);
        ram.clock();

        let snapshot = ram.get_memory_snapshot();
        assert_eq!(snapshot[3], 0x33);
        assert!(snapshot
            .iter()
            .enumerate()
            .all(|(i, v)| i == 3 || *v == 0));
    }

    #[test]
    fn test_ram_data_loading() {
        let mut ram = Ram::new(8).unwrap();
        let written = ram.load_image(&[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(written, 4);
        assert_eq!(&ram.get_memory_snapshot()[..4], &[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(ram.read_word(1), Some(bits_from_value(0x34, 8)));
        assert_eq!(ram.read_word(16), None);
        // Untouched words keep their power-on content.
        assert_eq!(ram.get_memory_snapshot()[4], 0xFF);
    }

    #[test]
    fn test_oversized_image_is_truncated() {
        let mut ram = Ram::new(8).unwrap();
        let image: Vec<u8> = (0..20).collect();
        assert_eq!(ram.load_image(&image), 16);
        assert_eq!(ram.get_memory_snapshot()[15], 15);
    }

    #[test]
    fn test_load_restores_control_lines() {
        let mut ram = Ram::new(8).unwrap();
        ram.set_input_address(&bits_from_value(9, 4));
        ram.load_image(&[1, 2, 3]);
        assert_eq!(ram.selected_address(), Some(9));

        // Write stays deasserted, so clocking changes nothing.
        ram.clock();
        assert_eq!(&ram.get_memory_snapshot()[..3], &[1, 2, 3]);
    }
}
