use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{parameter} is out of range")]
    InvalidWidth { parameter: &'static str },

    #[error("required collaborator missing: {parameter}")]
    MissingCollaborator { parameter: &'static str },

    #[error("bus contention: {} drivers asserted ({})", .drivers.len(), .drivers.join(", "))]
    BusContention { drivers: Vec<String> },

    #[error("unrecognised program word: {word}")]
    Program { word: String },

    #[error("failed to read machine description: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid machine description: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject zero-sized construction before any part is built.
pub(crate) fn check_width(width: usize, parameter: &'static str) -> Result<()> {
    if width == 0 {
        Err(SimError::InvalidWidth { parameter })
    } else {
        Ok(())
    }
}

/// Reject widths narrower than `minimum`, zero included.
pub(crate) fn check_min_width(
    width: usize,
    minimum: usize,
    parameter: &'static str,
) -> Result<()> {
    check_width(width, parameter)?;
    if width < minimum {
        Err(SimError::InvalidWidth { parameter })
    } else {
        Ok(())
    }
}
