//! Editor-side state for mass fields, to be driven by whichever UI draws them

pub use field::{FieldEdit, MassField, UnitMenuItem};

mod field;
