// Storage modules
pub mod instruction_register;
pub mod register;
pub mod register_bit;

pub use instruction_register::InstructionRegister;
pub use register::Register;
pub use register_bit::RegisterBit;
