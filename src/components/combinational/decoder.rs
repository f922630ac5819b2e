//! 4-to-16 line address decoder.

use crate::components::combinational::multi_and::And4;
use crate::components::gates::Inverter;
use crate::signal::Signal;

pub const ADDRESS_BITS: usize = 4;
pub const OUTPUT_LINES: usize = 1 << ADDRESS_BITS;

/// `Y[i]` is High iff the address lines hold `i`. Gate `i` reads the raw
/// address bit where `i` has a one and the inverted bit where it has a zero.
#[derive(Debug, Clone)]
pub struct AddressDecoder {
    address: [bool; ADDRESS_BITS],
    inverters: [Inverter; ADDRESS_BITS],
    lines: Vec<And4>,
}

impl AddressDecoder {
    pub fn new() -> Self {
        let mut decoder = AddressDecoder {
            address: [false; ADDRESS_BITS],
            inverters: Default::default(),
            lines: vec![And4::new(); OUTPUT_LINES],
        };
        for bit in 0..ADDRESS_BITS {
            decoder.sync_bit(bit);
        }
        decoder
    }

    /// Positions past the end of `address` keep their value; extra bits are
    /// dropped.
    pub fn set_input_address(&mut self, address: &[bool]) {
        for (bit, value) in address.iter().copied().enumerate().take(ADDRESS_BITS) {
            self.set_address_bit(bit, value);
        }
    }

    pub fn set_address_bit(&mut self, bit: usize, value: bool) {
        if bit >= ADDRESS_BITS {
            return;
        }
        self.address[bit] = value;
        self.inverters[bit].set_input_a(value);
        self.sync_bit(bit);
    }

    pub fn output_y(&self) -> Vec<Signal> {
        self.lines.iter().map(And4::output_q).collect()
    }

    /// Index of the asserted line, if any.
    pub fn selected(&self) -> Option<usize> {
        self.lines.iter().position(|line| line.output_q().is_high())
    }

    fn sync_bit(&mut self, bit: usize) {
        let raw = self.address[bit];
        let inverted = self.inverters[bit].output_q().is_high();
        for (index, line) in self.lines.iter_mut().enumerate() {
            let wants_one = (index >> bit) & 1 == 1;
            line.set_input(bit, if wants_one { raw } else { inverted });
        }
    }
}

impl Default for AddressDecoder {
    fn default() -> Self {
        Self::new()
    }
}
