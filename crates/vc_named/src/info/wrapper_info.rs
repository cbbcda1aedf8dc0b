use core::any::Any;

use crate::Field;
use crate::info::{Type, TypeInfo};

/// Metadata of a [`Field<T>`].
///
/// The payload accessor is what lets the builder descend into a
/// `Field<Nested>` whose `Nested` derives `Named`.
///
/// # Examples
///
/// ```
/// use vc_named::{Field, info::Typed};
///
/// let info = <Field<u8>>::type_info().as_wrapper().unwrap();
///
/// assert!(info.payload().ty().is::<u8>());
/// assert_eq!(info.value_offset(), Field::<u8>::VALUE_OFFSET);
/// ```
#[derive(Debug, Clone)]
pub struct WrapperInfo {
    ty: Type,
    // Created on first access.
    payload: fn() -> &'static TypeInfo,
    value_offset: usize,
}

impl WrapperInfo {
    /// Creates the [`WrapperInfo`] of `Field<P>`, with `payload` returning
    /// the [`TypeInfo`] of `P`.
    #[inline]
    pub const fn new<P: Any>(payload: fn() -> &'static TypeInfo) -> Self {
        Self {
            ty: Type::of::<Field<P>>(),
            payload,
            value_offset: Field::<P>::VALUE_OFFSET,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the [`TypeInfo`] of the wrapped value.
    #[inline]
    pub fn payload(&self) -> &'static TypeInfo {
        (self.payload)()
    }

    /// Returns the byte offset of the value inside the wrapper.
    #[inline]
    pub const fn value_offset(&self) -> usize {
        self.value_offset
    }
}
