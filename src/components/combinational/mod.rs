// Combinational composites
pub mod adder;
pub mod decoder;
pub mod multi_and;
pub mod mux;

pub use adder::{FullAdder, HalfAdder};
pub use decoder::AddressDecoder;
pub use multi_and::{And3, And4};
pub use mux::Mux2;
