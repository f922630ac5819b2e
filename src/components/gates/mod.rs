// Primitive gates
pub mod single_input;
pub mod two_input;

pub use single_input::{Buffer, Inverter, TriStateBuffer};
pub use two_input::{AndGate, NorGate, OrGate, XorGate};
