use alloc::boxed::Box;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Errors reported while building or registering a [`Schema`](crate::Schema).
///
/// A successfully built schema may still be empty; that is not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("`{type_name}` is not a struct, only struct types can be named")]
    NotAStruct { type_name: &'static str },

    #[error("`{type_name}` is already bound to tag key `{bound}`, cannot bind it to `{requested}`")]
    TagKeyConflict {
        type_name: &'static str,
        bound: Box<str>,
        requested: Box<str>,
    },
}
