pub mod computer;
pub mod microcode;

pub use computer::Computer;
pub use microcode::{ControlWord, Instruction};
