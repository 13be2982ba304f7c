//! Roster import error types.

use thiserror::Error;

/// Roster errors. Row numbers are 1-based line numbers of the source.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Row {row}: Expected 2 columns (Name, Slots), found {found}")]
    WrongColumnCount { row: usize, found: usize },

    #[error("Row {row}: Participant name cannot be empty")]
    EmptyName { row: usize },

    #[error("Row {row}: Slots must be a positive number (found '{value}')")]
    InvalidSlots { row: usize, value: String },

    #[error("Row {row}: Participant '{name}' is listed more than once")]
    DuplicateName { row: usize, name: String },

    /// Nothing but blank lines
    #[error("Roster contains no participants")]
    Empty,

    #[error("Failed to read roster: {0}")]
    Io(#[from] std::io::Error),
}

impl RosterError {
    /// Row the error was found on, if it is tied to one
    pub fn row(&self) -> Option<usize> {
        match self {
            RosterError::WrongColumnCount { row, .. }
            | RosterError::EmptyName { row }
            | RosterError::InvalidSlots { row, .. }
            | RosterError::DuplicateName { row, .. } => Some(*row),
            RosterError::Empty | RosterError::Io(_) => None,
        }
    }
}

/// Result type for roster operations
pub type RosterResult<T> = Result<T, RosterError>;
