// Arithmetic modules
pub mod alu;

pub use alu::Alu;
