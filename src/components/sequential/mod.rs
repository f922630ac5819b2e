// Sequential elements
pub mod d_flip_flop;
pub mod gated_latch;
pub mod sr_latch;

pub use d_flip_flop::DFlipFlop;
pub use gated_latch::{GatedDLatch, GatedSrLatch};
pub use sr_latch::SrLatch;
