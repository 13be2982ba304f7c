//! Participant roster import.
//!
//! A roster is plain text with one `name,slots` row per line, the format
//! participant lists are exported in from spreadsheets. Every row is
//! validated before a bracket is generated from it:
//! - exactly two columns
//! - a non-empty name, unique within the roster
//! - a positive whole number of slots
//!
//! Blank lines are skipped. Rows are reported by their line number.

pub mod errors;

pub use errors::{RosterError, RosterResult};

use crate::bracket::models::{Entrant, Slots};
use std::{collections::HashSet, fs, path::Path, str::FromStr};

/// Validated list of entrants, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    entrants: Vec<Entrant>,
}

impl Roster {
    /// Parse and validate roster text.
    pub fn parse(input: &str) -> RosterResult<Self> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let mut entrants = Vec::new();
        let mut seen = HashSet::new();

        for (idx, line) in input.lines().enumerate() {
            let row = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let entrant = parse_row(row, line)?;
            if !seen.insert(entrant.name.clone()) {
                return Err(RosterError::DuplicateName {
                    row,
                    name: entrant.name,
                });
            }
            entrants.push(entrant);
        }

        if entrants.is_empty() {
            return Err(RosterError::Empty);
        }

        log::debug!("Parsed roster with {} participant(s)", entrants.len());
        Ok(Self { entrants })
    }

    /// Read and parse a roster file.
    pub fn from_path(path: impl AsRef<Path>) -> RosterResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    pub fn into_entrants(self) -> Vec<Entrant> {
        self.entrants
    }

    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    /// Sum of all starting slots
    pub fn total_slots(&self) -> u128 {
        self.entrants.iter().map(|e| u128::from(e.slots)).sum()
    }
}

impl FromStr for Roster {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_row(row: usize, line: &str) -> RosterResult<Entrant> {
    let columns: Vec<&str> = line.split(',').collect();
    let [name, slots] = columns[..] else {
        return Err(RosterError::WrongColumnCount {
            row,
            found: columns.len(),
        });
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(RosterError::EmptyName { row });
    }

    let value = slots.trim();
    let slots = value
        .parse::<Slots>()
        .ok()
        .filter(|&slots| slots > 0)
        .ok_or_else(|| RosterError::InvalidSlots {
            row,
            value: value.to_string(),
        })?;

    Ok(Entrant::new(name, slots))
}
