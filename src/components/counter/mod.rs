// Counter modules
pub mod binary_counter;
pub mod program_counter;

pub use binary_counter::BinaryCounter;
pub use program_counter::ProgramCounter;
