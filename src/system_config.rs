//! # JSON Machine Descriptions
//!
//! Machines can be described in JSON and built through [`MachineFactory`].
//!
//! ## Usage
//!
//! ```no_run
//! use rusty_logic::system_config::MachineFactory;
//!
//! let factory = MachineFactory::new();
//! let computer = factory
//!     .create_from_json("configs/breadboard8.json")
//!     .expect("Could not create machine!");
//!
//! let info = computer.get_system_info();
//! println!("Created machine: {} with {} components", info.name, info.component_count);
//! ```
//!
//! ## Configuration File Format
//!
//! ```json
//! {
//!   "name": "Breadboard",
//!   "description": "8-bit bus, 16 bytes of RAM",
//!   "version": "1.0",
//!   "data_width": 8,
//!   "program": ["LDA 14", "ADD 15", "OUT", "HLT", 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 28, 14],
//!   "metadata": {"author": "bench"}
//! }
//! ```
//!
//! Program entries are raw bytes or assembly text; both may be mixed freely.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{event, Level};

use crate::error::{Result, SimError};
use crate::systems::computer::Computer;
use crate::systems::microcode::Instruction;

fn default_data_width() -> usize {
    8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(default = "default_data_width")]
    pub data_width: usize,
    #[serde(default)]
    pub program: Vec<ProgramWord>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// One RAM word of a program image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgramWord {
    Byte(u8),
    Assembly(String),
}

impl ProgramWord {
    pub fn to_byte(&self) -> Result<u8> {
        match self {
            ProgramWord::Byte(byte) => Ok(*byte),
            ProgramWord::Assembly(line) => {
                Instruction::assemble(line).ok_or_else(|| SimError::Program { word: line.clone() })
            }
        }
    }
}

impl MachineConfig {
    /// Assemble the program section into a RAM image.
    pub fn program_image(&self) -> Result<Vec<u8>> {
        self.program.iter().map(ProgramWord::to_byte).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub name: String,
    pub data_width: usize,
    pub address_width: usize,
    pub ram_words: usize,
    pub component_count: usize,
}

/// Builds computers from JSON machine descriptions.
#[derive(Debug, Default)]
pub struct MachineFactory;

impl MachineFactory {
    pub fn new() -> Self {
        MachineFactory
    }

    pub fn create_from_json(&self, json_path: impl AsRef<Path>) -> Result<Computer> {
        let config = self.load_json_config(json_path.as_ref())?;
        self.create_from_config(&config)
    }

    pub fn create_from_str(&self, json: &str) -> Result<Computer> {
        let config: MachineConfig = serde_json::from_str(json)?;
        self.create_from_config(&config)
    }

    /// Build the machine, load its program and reset it so it is ready to
    /// run from address 0.
    pub fn create_from_config(&self, config: &MachineConfig) -> Result<Computer> {
        let image = config.program_image()?;
        let mut computer = Computer::new(config.data_width)?.with_name(config.name.clone());
        let written = computer.load_program(&image);
        computer.reset()?;
        event!(
            Level::INFO,
            "created {} ({}-bit data path, {} program bytes)",
            config.name,
            config.data_width,
            written
        );
        Ok(computer)
    }

    fn load_json_config(&self, path: &Path) -> Result<MachineConfig> {
        event!(Level::DEBUG, "reading machine description {}", path.display());
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_words_mix_bytes_and_text() {
        let config: MachineConfig = serde_json::from_str(
            r#"{"name": "T", "program": ["LDI 3", 224, "hlt"]}"#,
        )
        .unwrap();
        assert_eq!(config.data_width, 8);
        assert_eq!(config.program_image().unwrap(), vec![0x53, 0xE0, 0xF0]);
    }

    #[test]
    fn test_unknown_mnemonic_is_reported() {
        let config: MachineConfig =
            serde_json::from_str(r#"{"name": "T", "program": ["JSR 2"]}"#).unwrap();
        match config.program_image() {
            Err(SimError::Program { word }) => assert_eq!(word, "JSR 2"),
            other => panic!("expected program error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_from_str_resets_machine() {
        let computer = MachineFactory::new()
            .create_from_str(r#"{"name": "Wide", "data_width": 12, "program": [5, 6]}"#)
            .unwrap();
        let info = computer.get_system_info();
        assert_eq!(info.name, "Wide");
        assert_eq!(info.data_width, 12);
        assert_eq!(info.ram_words, 16);
        assert_eq!(computer.program_counter().value(), 0);
        assert_eq!(computer.ram().get_memory_snapshot()[..2], [5, 6]);
    }

    #[test]
    fn test_narrow_machine_is_rejected() {
        let err = MachineFactory::new()
            .create_from_str(r#"{"name": "Four", "data_width": 4, "program": ["LDI 3", "OUT", "HLT"]}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidWidth {
                parameter: "data_width"
            }
        ));
    }

    #[test]
    fn test_bad_json_is_a_config_error() {
        let err = MachineFactory::new().create_from_str("{").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }
}
