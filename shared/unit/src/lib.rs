//! Physical quantities stored in a canonical unit, with conversions to and from display units

pub mod mass;
pub mod parse;

pub use mass::{Mass, MassUnit};
pub use parse::{parse_entry, try_parse_entry, MassEntry, MassParseError};
