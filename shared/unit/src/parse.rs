//! Interprets text typed into a mass field, e.g. `"5 kg"` or `"2 lb"`

use std::str::FromStr;

use common::*;
use thiserror::Error;

use crate::mass::{Mass, MassUnit};

/// A value and the unit it was typed in
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MassEntry {
    pub unit: MassUnit,
    pub value: f32,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MassParseError {
    #[error("Invalid number {0:?}")]
    InvalidNumber(String),

    #[error("Mass must be finite, not {0}")]
    NotFinite(f32),
}

impl MassEntry {
    pub fn new(unit: MassUnit, value: f32) -> Self {
        Self { unit, value }
    }

    pub fn to_mass(self) -> Mass {
        Mass::from_unit(self.unit, self.value)
    }

    /// Fails if the value overflows when converted to kilograms
    pub fn try_to_mass(self) -> Result<Mass, MassParseError> {
        let mass = self.to_mass();
        if mass.kilograms().is_finite() {
            Ok(mass)
        } else {
            Err(MassParseError::NotFinite(mass.kilograms()))
        }
    }
}

/// Strips a trailing unit code if there is one. A suffix that isn't a known code is left in
/// place, and the displayed unit is kept
fn split_unit(text: &str, displayed: MassUnit) -> (&str, MassUnit) {
    // byte index of the suffix, only if there is at least 1 char before it
    let suffix_start = match text.char_indices().rev().nth(MassUnit::CODE_LEN - 1) {
        Some((idx, _)) if idx > 0 => idx,
        _ => return (text, displayed),
    };

    let (number, suffix) = text.split_at(suffix_start);
    if suffix == displayed.code() {
        (number, displayed)
    } else if let Some(unit) = MassUnit::from_code(suffix) {
        (number, unit)
    } else {
        (text, displayed)
    }
}

/// Parses `"<number> <code>"`, where the code is optional and defaults to `displayed`. Typing
/// a different known code switches the unit of the returned entry
pub fn try_parse_entry(text: &str, displayed: MassUnit) -> Result<MassEntry, MassParseError> {
    let (number, unit) = split_unit(text, displayed);
    let number = number.trim();

    let value: f32 = number
        .parse()
        .map_err(|_| MassParseError::InvalidNumber(number.to_owned()))?;

    if !value.is_finite() {
        return Err(MassParseError::NotFinite(value));
    }

    Ok(MassEntry { unit, value })
}

/// Never fails: on bad input the whole edit is discarded and `previous` is returned in the
/// displayed unit
pub fn parse_entry(text: &str, displayed: MassUnit, previous: f32) -> MassEntry {
    match try_parse_entry(text, displayed) {
        Ok(entry) => entry,
        Err(err) => {
            debug!("discarding mass edit"; "text" => text, "unit" => displayed, "error" => %err);
            MassEntry::new(displayed, previous)
        }
    }
}

impl FromStr for Mass {
    type Err = MassParseError;

    /// Kilograms unless another unit code is given
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_parse_entry(s.trim(), MassUnit::CANONICAL).and_then(MassEntry::try_to_mass)
    }
}
