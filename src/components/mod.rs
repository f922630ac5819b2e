pub mod arithmetic;
pub mod combinational;
pub mod counter;
pub mod gates;
pub mod memory;
pub mod sequential;
pub mod storage;
