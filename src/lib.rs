//! # Rusty Logic
//!
//! A gate-level logic simulator and an 8-bit breadboard computer built from it.
//!
//! This library provides:
//! - Three-state signals and logic gates, including tri-state buffers
//! - Adders, multiplexers, an address decoder and a ripple-carry ALU
//! - SR latches, gated latches and edge-triggered D flip-flops
//! - Registers, counters and RAM assembled from those parts
//! - A shared parallel bus that detects contention when it is read
//! - A microcoded computer and JSON machine descriptions

pub mod bus;
pub mod component;
pub mod components;
pub mod error;
pub mod signal;
pub mod system_config;
pub mod systems;

// Re-export commonly used items for easier importing
pub use bus::ParallelBus;
pub use component::{Bistable, BusModule, Clocked};
pub use error::{Result, SimError};
pub use signal::Signal;
pub use systems::{Computer, ControlWord, Instruction};
