//! Collect the data required to generate code.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod named_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use named_struct::{NamedField, NamedStruct};
