use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Automatically implemented by [`#[derive(Named)]`](crate::derive::Named),
/// and for primitives, `String`, `Option`, `Vec`, `Box` and [`Field<T>`](crate::Field).
///
/// # Safety
///
/// The returned [`TypeInfo`] must describe `Self` exactly: a
/// [`StructInfo`](crate::info::StructInfo) must carry the real byte offset
/// of every listed field, and every offset whose [`FieldInfo`](crate::info::FieldInfo)
/// reports a [`WrapperInfo`](crate::info::WrapperInfo) must hold a
/// [`Field<_>`](crate::Field). The linker writes through these offsets.
///
/// # Examples
///
/// ```
/// use vc_named::{Field, derive::Named, info::{Typed, TypeInfo}};
///
/// #[derive(Named)]
/// struct A {
///     pub id: Field<u32>,
///     pub raw: u32,
/// }
///
/// let info = A::type_info().as_struct().unwrap();
/// assert!(info.field("id").unwrap().type_info().is_wrapper());
/// assert!(!info.field("raw").unwrap().type_info().is_wrapper());
/// ```
#[expect(unsafe_code, reason = "the linker writes through the reported offsets")]
pub unsafe trait Typed: 'static {
    /// A static accessor to compile-time type information.
    fn type_info() -> &'static TypeInfo;
}
