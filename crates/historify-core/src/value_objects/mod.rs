//! Value objects - immutable types that represent domain concepts

mod field_value;

pub use field_value::FieldValue;
