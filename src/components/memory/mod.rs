// Memory modules
pub mod ram;

pub use ram::Ram;
